use std::sync::{Arc, Mutex};

use forms::{
    form_for, Blocked, EntityKind, FormResult, LocalizedNames, OptionLists, Phase, Transition,
    Wizard,
};
use pretty_assertions::assert_eq;

fn wizard(kind: EntityKind) -> Wizard {
    Wizard::new(form_for(kind, &OptionLists::default()))
}

fn visible_ids(wizard: &Wizard) -> Vec<String> {
    wizard.visible_tabs().map(|tab| tab.id.clone()).collect()
}

fn active_id(wizard: &Wizard) -> String {
    wizard.active_tab().map(|tab| tab.id.clone()).unwrap_or_default()
}

#[test]
fn iron_sword_walkthrough() {
    let submitted: Arc<Mutex<Option<FormResult>>> = Arc::default();
    let sink = submitted.clone();
    let mut wizard = Wizard::new(form_for(EntityKind::Item, &OptionLists::default())).on_submit(
        move |result| {
            *sink.lock().unwrap() = Some(result.clone());
        },
    );

    assert!(matches!(wizard.next(), Err(Blocked::Incomplete { .. })));
    wizard.set("itemIDAndType", "id", "Iron Sword").unwrap();
    wizard.set("itemIDAndType", "type", "sword").unwrap();
    assert_eq!(
        visible_ids(&wizard),
        ["itemIDAndType", "tool", "components", "resourcePack"]
    );

    wizard.next().unwrap();
    assert_eq!(active_id(&wizard), "tool");
    assert!(!wizard.can_next(), "tool material is required");
    wizard.set("tool", "material", "IRON").unwrap();
    wizard.set("tool", "attack_damage", "5").unwrap();
    wizard.next().unwrap();
    wizard.next().unwrap();
    assert!(wizard.is_last());
    assert!(!wizard.can_submit());

    wizard.set("resourcePack", "icon", "item/iron_sword").unwrap();
    let names: LocalizedNames = [("en_us", "Iron Sword")].into_iter().collect();
    wizard.set("resourcePack", "name", names).unwrap();

    let result = wizard.submit().unwrap();
    assert_eq!(wizard.phase(), Phase::Submitted);
    assert_eq!(result.text("tool", "material"), Some("IRON"));
    assert_eq!(result.text("tool", "attack_damage"), Some("5"));
    assert!(!result.has_tab("components"), "untouched tabs are left out");
    assert_eq!(submitted.lock().unwrap().as_ref(), Some(&result));

    assert!(matches!(wizard.back(), Err(Blocked::Finished)));
}

#[test]
fn switching_elytra_back_to_generic_drops_the_elytra_tab() {
    let mut wizard = wizard(EntityKind::Item);
    wizard.set("itemIDAndType", "id", "wings").unwrap();
    wizard.set("itemIDAndType", "type", "elytra").unwrap();
    wizard.next().unwrap();
    assert_eq!(active_id(&wizard), "elytra");
    wizard.set("elytra", "durability", "432").unwrap();

    let transition = wizard.set("itemIDAndType", "type", "generic").unwrap();
    assert_eq!(transition, Transition::Updated { visibility_changed: true });
    assert_eq!(active_id(&wizard), "itemIDAndType");
    assert!(!visible_ids(&wizard).contains(&"elytra".to_string()));

    wizard.jump_to("resourcePack").unwrap();
    wizard.set("resourcePack", "icon", "item/wings").unwrap();
    wizard
        .set("resourcePack", "name", [("en_us", "Wings")].into_iter().collect::<LocalizedNames>())
        .unwrap();
    let result = wizard.submit().unwrap();
    assert!(!result.has_tab("elytra"));
}

#[test]
fn jumping_forward_needs_a_complete_tab() {
    let mut wizard = wizard(EntityKind::Block);
    assert!(!wizard.can_jump_to("resourcePack"));
    wizard.set("blockIDAndType", "id", "ruby_ore").unwrap();
    wizard.set("blockIDAndType", "type", "regular").unwrap();
    wizard.set("blockIDAndType", "registry", "note_block").unwrap();
    assert!(wizard.can_jump_to("resourcePack"));
    assert!(matches!(wizard.jump_to("tnt"), Err(Blocked::HiddenTab(_))));
    assert!(matches!(wizard.jump_to("nope"), Err(Blocked::UnknownTab(_))));

    wizard.jump_to("resourcePack").unwrap();
    assert!(wizard.can_jump_to("blockIDAndType"));
}

#[test]
fn material_tabs_are_all_optional_after_the_id() {
    let mut wizard = wizard(EntityKind::Material);
    assert_eq!(visible_ids(&wizard), ["materialIDAndRepairItem", "tool", "armor"]);
    wizard.set("materialIDAndRepairItem", "id", "my diamond").unwrap();
    wizard.next().unwrap();
    wizard.next().unwrap();
    let result = wizard.submit().unwrap();
    assert_eq!(result.text("materialIDAndRepairItem", "id"), Some("my diamond"));
    assert!(!result.has_tab("armor"));
}

#[test]
fn late_option_lists_keep_entered_values() {
    let mut wizard = wizard(EntityKind::Material);
    wizard.set("materialIDAndRepairItem", "id", "ruby").unwrap();
    wizard.next().unwrap();
    wizard.next().unwrap();
    wizard.set("armor", "equip_sound", "item.armor.equip_gold").unwrap();

    let options = OptionLists {
        sounds: vec!["item.armor.equip_gold".into(), "item.armor.equip_iron".into()],
        ..OptionLists::default()
    };
    wizard.refresh_schema(form_for(EntityKind::Material, &options));
    assert_eq!(active_id(&wizard), "armor");
    assert_eq!(wizard.state().text("armor", "equip_sound"), Some("item.armor.equip_gold"));
    assert_eq!(
        wizard.schema().field("armor", "equip_sound").map(|f| f.options.len()),
        Some(2)
    );

    wizard.cancel().unwrap();
    wizard.refresh_schema(form_for(EntityKind::Material, &OptionLists::default()));
    assert_eq!(wizard.phase(), Phase::Cancelled);
    assert!(wizard.state().is_empty());
}

#[test]
fn glyph_has_a_single_tab() {
    let mut wizard = wizard(EntityKind::Glyph);
    assert!(wizard.is_first() && wizard.is_last());
    assert!(matches!(wizard.submit(), Err(Blocked::Incomplete { .. })));
    wizard.set("generic", "id", "note_glyph").unwrap();
    wizard.set("generic", "height", "8").unwrap();
    let result = wizard.submit().unwrap();
    assert_eq!(result.text("generic", "height"), Some("8"));
}
