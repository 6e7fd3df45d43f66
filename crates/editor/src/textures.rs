use std::fs;
use std::io;
use std::path::PathBuf;

use forms::texture::FileLister;

/// Lists texture files below the resource pack's texture root.
#[derive(Debug, Clone)]
pub struct DirLister {
    root: PathBuf,
}

impl DirLister {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileLister for DirLister {
    fn list(&self, folder: &str) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.root.join(folder))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}
