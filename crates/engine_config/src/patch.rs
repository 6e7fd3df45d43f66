//! Document patcher: turns a submitted `FormResult` into a record and
//! upserts it into the matching section of a `ConfigDocument`.

use std::sync::Arc;

use forms::{form_for, EntityKind, FormResult, FormSchema, OptionLists};
use serde::Serialize;
use tracing::{info, warn};

use crate::document::{ConfigDocument, Upsert};
use crate::errors::PatchError;
use crate::key::{derive_key, id_validator, KeyCase};
use crate::records::{
    Block, Components, Defense, Drops, Elytra, Food, Glyph, Item, Material, MaterialArmor,
    MaterialTool, Numeric, TooltipDisplay, Trident, UseCooldown,
};

/// Where a record ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub section: &'static str,
    pub key: String,
    pub outcome: Upsert,
}

/// Wizard schema for `kind` whose id field refuses ids that would produce
/// an empty key.
pub fn authoring_form(kind: EntityKind, options: &OptionLists) -> FormSchema {
    let mut schema = form_for(kind, options);
    if let Some(field) = schema
        .tab_by_id_mut(kind.id_tab())
        .and_then(|tab| tab.field_by_name_mut("id"))
    {
        field.validator = Some(Arc::new(id_validator(KeyCase::for_kind(kind))));
    }
    schema
}

/// Patch `doc` with the record built from `result` and hand the new text to
/// `on_changed`. The callback is not called when patching fails.
pub fn apply(
    kind: EntityKind,
    result: &FormResult,
    doc: &mut ConfigDocument,
    mut on_changed: impl FnMut(&str),
) -> Result<Patched, PatchError> {
    let patched = match kind {
        EntityKind::Item => patch_item(result, doc)?,
        EntityKind::Block => patch_block(result, doc)?,
        EntityKind::Material => patch_material(result, doc)?,
        EntityKind::Glyph => patch_glyph(result, doc)?,
    };
    on_changed(doc.as_str());
    Ok(patched)
}

pub fn patch_item(result: &FormResult, doc: &mut ConfigDocument) -> Result<Patched, PatchError> {
    upsert_record(EntityKind::Item, result, &item_record(result), doc)
}

pub fn patch_block(result: &FormResult, doc: &mut ConfigDocument) -> Result<Patched, PatchError> {
    upsert_record(EntityKind::Block, result, &block_record(result), doc)
}

pub fn patch_material(
    result: &FormResult,
    doc: &mut ConfigDocument,
) -> Result<Patched, PatchError> {
    upsert_record(EntityKind::Material, result, &material_record(result), doc)
}

pub fn patch_glyph(result: &FormResult, doc: &mut ConfigDocument) -> Result<Patched, PatchError> {
    upsert_record(EntityKind::Glyph, result, &glyph_record(result), doc)
}

/// Sanitized entry key of a submitted result.
pub fn entry_key(kind: EntityKind, result: &FormResult) -> Result<String, PatchError> {
    let raw = result
        .text(kind.id_tab(), "id")
        .ok_or_else(|| PatchError::MissingValue {
            tab: kind.id_tab().to_string(),
            field: "id".to_string(),
        })?;
    let key = derive_key(raw, KeyCase::for_kind(kind));
    if key.is_empty() {
        return Err(PatchError::EmptyKey { raw: raw.to_string() });
    }
    Ok(key)
}

fn upsert_record<T: Serialize>(
    kind: EntityKind,
    result: &FormResult,
    record: &T,
    doc: &mut ConfigDocument,
) -> Result<Patched, PatchError> {
    let key = entry_key(kind, result)?;
    let value = serde_yaml::to_value(record).map_err(PatchError::Serialize)?;
    let section = kind.section();
    let outcome = doc.upsert(section, &key, &value)?;
    match outcome {
        Upsert::Replaced => warn!(section, key = %key, "existing entry overwritten"),
        Upsert::Inserted => info!(section, key = %key, "entry added"),
    }
    Ok(Patched { section, key, outcome })
}

fn num(result: &FormResult, tab: &str, field: &str) -> Option<Numeric> {
    result.text(tab, field).map(Numeric::coerce)
}

pub fn item_record(r: &FormResult) -> Item {
    let kind = r.string("itemIDAndType", "type");
    let material = if kind.as_deref() == Some("armor") {
        r.string("armor", "material")
    } else {
        r.string("tool", "material")
    };

    let elytra = r.has_tab("elytra").then(|| Elytra {
        durability: num(r, "elytra", "durability"),
        repair_item: r.string("elytra", "repair_item"),
        texture: r.string("elytra", "texture"),
        use_player_skin: r.flag("elytra", "use_player_skin"),
    });
    let trident = r.has_tab("trident").then(|| Trident {
        durability: num(r, "trident", "durability"),
        attack_damage: num(r, "trident", "attack_damage"),
    });
    let components = r.has_tab("components").then(|| Components {
        enchantment_glint_override: r.flag("components", "enchantment_glint_override"),
        fire_resistant: r.flag("components", "fire_resistant"),
        food: r.has_tab("food").then(|| Food {
            can_always_eat: r.flag("food", "can_always_eat"),
            consume_seconds: num(r, "food", "consume_seconds"),
            nutrition: num(r, "food", "nutrition"),
            saturation_modifier: num(r, "food", "saturation_modifier"),
        }),
        max_damage: num(r, "components", "max_damage"),
        max_stack_size: num(r, "components", "max_stack_size"),
        rarity: r.string("components", "rarity"),
        tooltip_display: (r.flag("components", "hide_tooltip") == Some(true))
            .then(|| TooltipDisplay { hide_tooltip: Some(true) }),
        unbreakable: r.flag("components", "unbreakable"),
        use_cooldown: r.has_tab("use_cooldown").then(|| UseCooldown {
            cooldown_seconds: num(r, "use_cooldown", "cooldown_seconds"),
            group: r.string("use_cooldown", "group"),
        }),
    });

    Item {
        kind,
        material,
        attack_damage: num(r, "tool", "attack_damage"),
        attack_speed: num(r, "tool", "attack_speed"),
        armor_type: r.string("armor", "armor_type"),
        elytra,
        trident,
        texture: r.string("trident", "texture"),
        components,
        icon: r.string("resourcePack", "icon"),
        name: r.names("resourcePack", "name").cloned(),
    }
}

pub fn block_record(r: &FormResult) -> Block {
    let drops = r.string("blockIDAndType", "drop_type").map(|drop_type| Drops {
        kind: Some(drop_type),
        item: r.string("ore_drops", "item"),
        max: num(r, "ore_drops", "max"),
        min: num(r, "ore_drops", "min"),
    });
    Block {
        kind: r.string("blockIDAndType", "type"),
        registry: r.string("blockIDAndType", "registry"),
        drops,
        tool_type: r.string("regular", "tool_type"),
        destroy_time: num(r, "regular", "destroy_time"),
        explosion_resistance: num(r, "regular", "explosion_resistance"),
        required_material: r.string("regular", "required_material"),
        explosion_power: num(r, "tnt", "explosion_power"),
        name: r.names("resourcePack", "name").cloned(),
        texture: r.string("resourcePack", "texture"),
    }
}

pub fn material_record(r: &FormResult) -> Material {
    const DEFENSE: [&str; 4] = [
        "defense_boots",
        "defense_chestplate",
        "defense_helmet",
        "defense_leggings",
    ];

    let armor = r.has_tab("armor").then(|| MaterialArmor {
        defense: DEFENSE
            .iter()
            .any(|field| r.get("armor", field).is_some())
            .then(|| Defense {
                boots: num(r, "armor", "defense_boots"),
                chestplate: num(r, "armor", "defense_chestplate"),
                helmet: num(r, "armor", "defense_helmet"),
                leggings: num(r, "armor", "defense_leggings"),
            }),
        durability: num(r, "armor", "durability"),
        equip_sound: r.string("armor", "equip_sound"),
        knockback_resistance: num(r, "armor", "knockback_resistance"),
        texture: r.string("armor", "texture"),
        toughness: num(r, "armor", "toughness"),
    });
    let tool = r.has_tab("tool").then(|| MaterialTool {
        durability: num(r, "tool", "durability"),
        base: r.string("tool", "base"),
        attack_damage_bonus: num(r, "tool", "attack_damage_bonus"),
        speed: num(r, "tool", "speed"),
    });
    Material {
        enchantment_value: num(r, "materialIDAndRepairItem", "enchantment_value"),
        repair_item: r.string("materialIDAndRepairItem", "repair_item"),
        armor,
        tool,
    }
}

pub fn glyph_record(r: &FormResult) -> Glyph {
    Glyph {
        image_path: r.string("generic", "image_path"),
        ascent: num(r, "generic", "ascent"),
        height: num(r, "generic", "height"),
    }
}
