//! Texture path suggestions.
//!
//! Texture fields name one or more folders inside the resource pack's
//! texture root. `suggestions` turns the files found there into the
//! candidate list shown while editing; `complete` narrows it by prefix.
//! File access sits behind `FileLister` so the forms crate stays free of I/O.

use std::io;

/// Lists file names (not paths) directly inside a folder relative to the
/// texture root.
pub trait FileLister {
    fn list(&self, folder: &str) -> io::Result<Vec<String>>;
}

impl<F> FileLister for F
where
    F: Fn(&str) -> io::Result<Vec<String>>,
{
    fn list(&self, folder: &str) -> io::Result<Vec<String>> {
        self(folder)
    }
}

/// Candidate values for a texture field.
///
/// With a single folder every `.png` becomes `folder` + file stem, the path
/// relative to the texture root. Layered textures (several folders) are
/// referenced by bare name, so only stems present in every folder are kept.
/// Unreadable folders contribute nothing.
pub fn suggestions(folders: &[String], lister: &dyn FileLister) -> Vec<String> {
    let stems_in = |folder: &String| -> Vec<String> {
        match lister.list(folder) {
            Ok(files) => {
                let mut stems: Vec<String> = files
                    .iter()
                    .filter_map(|name| name.strip_suffix(".png"))
                    .map(str::to_string)
                    .collect();
                stems.sort();
                stems.dedup();
                stems
            }
            Err(err) => {
                tracing::debug!(folder = %folder, error = %err, "texture folder not readable");
                Vec::new()
            }
        }
    };

    match folders {
        [] => Vec::new(),
        [folder] => stems_in(folder)
            .into_iter()
            .map(|stem| format!("{folder}{stem}"))
            .collect(),
        [first, rest @ ..] => {
            let others: Vec<Vec<String>> = rest.iter().map(&stems_in).collect();
            stems_in(first)
                .into_iter()
                .filter(|stem| others.iter().all(|stems| stems.binary_search(stem).is_ok()))
                .collect()
        }
    }
}

/// Label shown for a candidate in the suggestion list. With a single folder
/// the folder prefix is dropped (`item/ruby` reads as `ruby`); the value
/// written to the field keeps it.
pub fn display_name<'a>(folders: &[String], candidate: &'a str) -> &'a str {
    match folders {
        [folder] => candidate.strip_prefix(folder.as_str()).unwrap_or(candidate),
        _ => candidate,
    }
}

/// Candidates starting with `prefix`, in their original order.
pub fn complete<'a>(prefix: &str, candidates: &'a [String]) -> Vec<&'a str> {
    candidates
        .iter()
        .map(String::as_str)
        .filter(|c| c.starts_with(prefix))
        .collect()
}

/// Longest common prefix of all matches, used for Tab completion.
pub fn common_prefix(matches: &[&str]) -> Option<String> {
    let first = matches.first()?;
    let mut len = first.len();
    for other in &matches[1..] {
        len = first
            .char_indices()
            .zip(other.chars())
            .take_while(|((_, a), b)| a == b)
            .map(|((i, a), _)| i + a.len_utf8())
            .last()
            .unwrap_or(0)
            .min(len);
    }
    Some(first[..len].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lister(folder: &str) -> io::Result<Vec<String>> {
        match folder {
            "item/" => Ok(vec![
                "ruby.png".into(),
                "amber.png".into(),
                "notes.txt".into(),
            ]),
            "block/" => Ok(vec!["ruby_ore.png".into()]),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "missing")),
        }
    }

    #[test]
    fn only_png_files_become_candidates() {
        assert_eq!(
            suggestions(&["item/".to_string()], &lister),
            vec!["item/amber", "item/ruby"]
        );
        assert!(suggestions(&["gone/".to_string()], &lister).is_empty());
    }

    #[test]
    fn layered_folders_keep_shared_names() {
        let layers = |folder: &str| -> io::Result<Vec<String>> {
            match folder {
                "humanoid/" => Ok(vec!["ruby.png".into(), "amber.png".into()]),
                "humanoid_leggings/" => Ok(vec!["ruby.png".into()]),
                _ => Ok(Vec::new()),
            }
        };
        let folders = vec!["humanoid/".to_string(), "humanoid_leggings/".to_string()];
        assert_eq!(suggestions(&folders, &layers), vec!["ruby"]);
    }

    #[test]
    fn single_folder_candidates_show_their_stem() {
        let folders = vec!["item/".to_string()];
        let candidates = suggestions(&folders, &lister);
        let shown: Vec<&str> = candidates
            .iter()
            .map(|candidate| display_name(&folders, candidate))
            .collect();
        assert_eq!(shown, vec!["amber", "ruby"]);
        assert_eq!(candidates, vec!["item/amber", "item/ruby"]);

        let layers = vec!["humanoid/".to_string(), "humanoid_leggings/".to_string()];
        assert_eq!(display_name(&layers, "ruby"), "ruby");
        assert_eq!(display_name(&folders, "block/ruby_ore"), "block/ruby_ore");
    }

    #[test]
    fn completion_narrows_by_prefix() {
        let candidates = suggestions(&["item/".to_string()], &lister);
        assert_eq!(complete("item/r", &candidates), vec!["item/ruby"]);
        assert_eq!(complete("", &candidates).len(), 2);
        assert!(complete("block/", &candidates).is_empty());

        let matches = complete("item/", &candidates);
        assert_eq!(common_prefix(&matches).as_deref(), Some("item/"));
        assert_eq!(common_prefix(&["block/ruby_ore"]).as_deref(), Some("block/ruby_ore"));
        assert_eq!(common_prefix(&[]), None);
    }
}
