use std::fs;

use editor::commands::{list_entries, load_document, remove_entry};
use editor::persist::write_locked;
use engine_config::ConfigDocument;
use pretty_assertions::assert_eq;

const CONFIG: &str = "\
# pack settings
settings:
  namespace: lost

items:
  ruby:
    type: generic
    icon: item/ruby
  wand:
    type: generic
    texture: item/wand.png
blocks:
  ruby_ore:
    type: regular
    texture: block/ruby_ore
materials:
  RUBY:
    repair_item: ruby
";

fn listing(section: Option<&str>) -> String {
    let doc = ConfigDocument::parse(CONFIG).unwrap();
    let mut out = Vec::new();
    list_entries(&doc, section, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn list_shows_keys_and_thumbnails() {
    assert_eq!(
        listing(None),
        "\
items:
  ruby  item/ruby.png
  wand  item/wand.png
blocks:
  ruby_ore  block/ruby_ore.png
materials:
  RUBY  item/ruby.png
"
    );
    assert_eq!(listing(Some("settings")), "settings:\n  namespace\n");
    assert_eq!(listing(Some("glyphs")), "glyphs:\n");
}

#[test]
fn remove_rewrites_only_the_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yml");
    write_locked(&path, CONFIG).unwrap();

    remove_entry(&path, "items", "wand").unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        CONFIG.replace("  wand:\n    type: generic\n    texture: item/wand.png\n", "")
    );

    assert!(remove_entry(&path, "items", "wand").is_err());
    assert_eq!(load_document(&path).unwrap().keys("items"), vec!["ruby"]);
}

#[test]
fn missing_config_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let doc = load_document(&dir.path().join("config.yml")).unwrap();
    assert_eq!(doc.as_str(), "");
    assert!(doc.sections().is_empty());
}
