//! Subcommand bodies.

use std::io::Write;
use std::path::Path;

use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use engine_config::{texture_path, ConfigDocument, Record, Upsert};
use forms::texture::FileLister;
use forms::EntityKind;
use strum::IntoEnumIterator;
use tracing::{info, warn};

use crate::app::{EditorApp, Outcome};
use crate::persist;
use crate::settings::EditorSettings;
use crate::sounds;
use crate::textures::DirLister;
use crate::tui::Tui;

pub fn load_document(path: &Path) -> Result<ConfigDocument> {
    let text =
        persist::read_or_empty(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    ConfigDocument::parse(&text).wrap_err_with(|| format!("parsing {}", path.display()))
}

/// `editor new <kind>`: run the wizard and patch the submitted entry in.
pub async fn new_entry(settings: &EditorSettings, kind: EntityKind) -> Result<()> {
    let mut doc = load_document(&settings.file)?;
    let textures = settings
        .textures
        .clone()
        .map(|root| Box::new(DirLister::new(root)) as Box<dyn FileLister>);
    let sounds = settings.sounds.clone().map(sounds::spawn_fetch);
    let mut app = EditorApp::new(kind, doc.option_lists(), textures, sounds);

    let outcome = {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let outcome = app.run(&mut tui).await;
        tui.exit()?;
        outcome?
    };

    let result = match outcome {
        Outcome::Cancelled => {
            info!(%kind, "wizard cancelled");
            println!("Cancelled; {} is unchanged.", settings.file.display());
            return Ok(());
        }
        Outcome::Submitted(result) => result,
    };

    let path = settings.file.as_path();
    let mut written = Ok(());
    let patched = engine_config::apply(kind, &result, &mut doc, |text| {
        written = persist::write_locked(path, text);
    })?;
    written.wrap_err_with(|| format!("writing {}", path.display()))?;

    let verb = match patched.outcome {
        Upsert::Inserted => "Added",
        Upsert::Replaced => "Replaced",
    };
    println!("{verb} {}.{} in {}", patched.section, patched.key, path.display());
    Ok(())
}

/// `editor list [section]`: keys per section, with the entry's preview texture.
pub fn list_entries(
    doc: &ConfigDocument,
    section: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let sections: Vec<String> = match section {
        Some(section) => vec![section.to_string()],
        None => {
            let present = doc.sections();
            EntityKind::iter()
                .map(|kind| kind.section().to_string())
                .filter(|section| present.contains(section))
                .collect()
        }
    };

    let item = |key: &str| match doc.record(EntityKind::Item, key) {
        Ok(Some(Record::Item(item))) => Some(item),
        _ => None,
    };

    for section in &sections {
        writeln!(out, "{section}:")?;
        let kind = EntityKind::from_section(section);
        for key in doc.keys(section) {
            let texture = match kind.map(|kind| doc.record(kind, &key)) {
                Some(Ok(Some(record))) => texture_path(&record, item),
                Some(Err(err)) => {
                    warn!(%section, %key, error = %err, "entry does not match its record shape");
                    None
                }
                _ => None,
            };
            match texture {
                Some(texture) => writeln!(out, "  {key}  {texture}")?,
                None => writeln!(out, "  {key}")?,
            }
        }
    }
    Ok(())
}

pub fn list(settings: &EditorSettings, section: Option<&str>) -> Result<()> {
    let doc = load_document(&settings.file)?;
    let stdout = std::io::stdout();
    list_entries(&doc, section, &mut stdout.lock())
}

/// `editor remove <section> <key>`: drop one entry, leaving the rest of the file untouched.
pub fn remove_entry(path: &Path, section: &str, key: &str) -> Result<()> {
    let mut doc = load_document(path)?;
    if !doc.remove(section, key)? {
        bail!("{section}.{key} not found in {}", path.display());
    }
    persist::write_locked(path, doc.as_str())
        .wrap_err_with(|| format!("writing {}", path.display()))?;
    info!(%section, %key, "entry removed");
    Ok(())
}

pub fn remove(settings: &EditorSettings, section: &str, key: &str) -> Result<()> {
    remove_entry(&settings.file, section, key)?;
    println!("Removed {section}.{key} from {}", settings.file.display());
    Ok(())
}
