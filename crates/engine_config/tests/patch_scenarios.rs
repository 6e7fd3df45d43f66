use engine_config::patch::{patch_glyph, patch_material};
use engine_config::{
    apply, authoring_form, texture_path, ConfigDocument, PatchError, Record, Upsert,
};
use forms::{Blocked, EntityKind, FormResult, FormState, LocalizedNames, OptionLists, Wizard};
use pretty_assertions::assert_eq;

const CONFIG: &str = "\
# managed by the editor
items:
  ruby:
    type: generic
    icon: item/ruby
";

fn result(kind: EntityKind, values: &[(&str, &str, &str)]) -> FormResult {
    let schema = authoring_form(kind, &OptionLists::default());
    let mut state = FormState::new();
    for (tab, field, value) in values {
        state.set(tab, field, *value);
    }
    FormResult::from_state(&schema, &state)
}

#[test]
fn iron_sword_through_the_wizard() {
    let mut doc = ConfigDocument::parse(CONFIG).unwrap();
    let mut wizard = Wizard::new(authoring_form(EntityKind::Item, &doc.option_lists()));
    wizard.set("itemIDAndType", "id", "Iron Sword").unwrap();
    wizard.set("itemIDAndType", "type", "sword").unwrap();
    wizard.jump_to("tool").unwrap();
    wizard.set("tool", "material", "IRON").unwrap();
    wizard.set("tool", "attack_damage", "6").unwrap();
    wizard.set("tool", "attack_speed", "-2.4").unwrap();
    wizard.jump_to("resourcePack").unwrap();
    wizard.set("resourcePack", "icon", "item/iron_sword").unwrap();
    let names: LocalizedNames = [("en_us", "Iron Sword")].into_iter().collect();
    wizard.set("resourcePack", "name", names).unwrap();
    let submitted = wizard.submit().unwrap();

    let mut changed = Vec::new();
    let patched = apply(EntityKind::Item, &submitted, &mut doc, |text| {
        changed.push(text.to_string())
    })
    .unwrap();
    assert_eq!(patched.key, "iron_sword");
    assert_eq!(patched.outcome, Upsert::Inserted);

    let expected = format!(
        "{CONFIG}  iron_sword:
    type: sword
    material: IRON
    attack_damage: 6
    attack_speed: -2.4
    icon: item/iron_sword
    name:
      en_us: Iron Sword
"
    );
    assert_eq!(doc.as_str(), expected);
    assert_eq!(changed, vec![expected]);

    let record = doc.record(EntityKind::Item, "iron_sword").unwrap().unwrap();
    assert_eq!(
        texture_path(&record, |_| None).as_deref(),
        Some("item/iron_sword.png")
    );
}

#[test]
fn material_key_is_upper_case() {
    let mut doc = ConfigDocument::parse("").unwrap();
    let r = result(
        EntityKind::Material,
        &[
            ("materialIDAndRepairItem", "id", "my diamond+"),
            ("materialIDAndRepairItem", "repair_item", "ruby"),
            ("tool", "durability", "1561"),
            ("tool", "base", "DIAMOND"),
        ],
    );
    let patched = patch_material(&r, &mut doc).unwrap();
    assert_eq!(patched.key, "MY_DIAMOND");
    assert_eq!(
        doc.as_str(),
        "\
materials:
  MY_DIAMOND:
    repair_item: ruby
    tool:
      durability: 1561
      base: DIAMOND
"
    );
}

#[test]
fn material_thumbnail_uses_the_repair_item() {
    let mut doc = ConfigDocument::parse(CONFIG).unwrap();
    let r = result(
        EntityKind::Material,
        &[
            ("materialIDAndRepairItem", "id", "ruby"),
            ("materialIDAndRepairItem", "repair_item", "ruby"),
        ],
    );
    patch_material(&r, &mut doc).unwrap();
    let material = doc.record(EntityKind::Material, "RUBY").unwrap().unwrap();
    let lookup = |key: &str| match doc.record(EntityKind::Item, key) {
        Ok(Some(Record::Item(item))) => Some(item),
        _ => None,
    };
    assert_eq!(texture_path(&material, lookup).as_deref(), Some("item/ruby.png"));
}

#[test]
fn glyph_numbers_are_coerced() {
    let mut doc = ConfigDocument::parse(CONFIG).unwrap();
    let r = result(
        EntityKind::Glyph,
        &[
            ("generic", "id", "note_glyph"),
            ("generic", "image_path", "font/note"),
            ("generic", "height", "8"),
            ("generic", "ascent", "7"),
        ],
    );
    patch_glyph(&r, &mut doc).unwrap();
    assert_eq!(
        doc.as_str(),
        format!(
            "{CONFIG}glyphs:
  note_glyph:
    image_path: font/note
    ascent: 7
    height: 8
"
        )
    );
}

#[test]
fn elytra_values_vanish_when_the_type_changes() {
    let mut doc = ConfigDocument::parse(CONFIG).unwrap();
    let schema = authoring_form(EntityKind::Item, &OptionLists::default());
    let mut state = FormState::new();
    state.set("itemIDAndType", "id", "wings");
    state.set("itemIDAndType", "type", "elytra");
    state.set("elytra", "durability", "432");
    state.set("itemIDAndType", "type", "generic");
    let r = FormResult::from_state(&schema, &state);

    apply(EntityKind::Item, &r, &mut doc, |_| {}).unwrap();
    assert_eq!(doc.as_str(), format!("{CONFIG}  wings:\n    type: generic\n"));
}

#[test]
fn collisions_overwrite_the_entry() {
    let mut doc = ConfigDocument::parse(CONFIG).unwrap();
    let r = result(
        EntityKind::Item,
        &[("itemIDAndType", "id", "Ruby"), ("itemIDAndType", "type", "generic")],
    );
    let patched = apply(EntityKind::Item, &r, &mut doc, |_| {}).unwrap();
    assert_eq!(patched.outcome, Upsert::Replaced);
    assert_eq!(doc.as_str(), "# managed by the editor\nitems:\n  ruby:\n    type: generic\n");
}

#[test]
fn unusable_ids_change_nothing() {
    let mut doc = ConfigDocument::parse(CONFIG).unwrap();
    let r = result(EntityKind::Glyph, &[("generic", "id", "???")]);
    let mut called = false;
    let err = apply(EntityKind::Glyph, &r, &mut doc, |_| called = true).unwrap_err();
    assert!(matches!(err, PatchError::EmptyKey { .. }));
    assert!(!called);
    assert_eq!(doc.as_str(), CONFIG);

    let mut wizard = Wizard::new(authoring_form(EntityKind::Glyph, &OptionLists::default()));
    wizard.set("generic", "id", "???").unwrap();
    assert!(matches!(wizard.submit(), Err(Blocked::Incomplete { .. })));
}

#[test]
fn unparseable_numbers_are_kept_as_text() {
    let mut doc = ConfigDocument::parse("").unwrap();
    let r = result(
        EntityKind::Glyph,
        &[("generic", "id", "odd"), ("generic", "height", "tall")],
    );
    patch_glyph(&r, &mut doc).unwrap();
    assert_eq!(doc.as_str(), "glyphs:\n  odd:\n    height: tall\n");
}
