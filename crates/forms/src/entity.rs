//! Wizard schemas for the four configuration record families.
//!
//! Every constructor is a pure function of the option lists it receives, so a
//! schema can be rebuilt whenever a list finishes loading and handed to
//! `Wizard::refresh_schema` without touching entered values.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::catalog::{
    ARMOR_TYPES, BASE_MATERIALS, BLOCK_DROP_TYPES, BLOCK_REGISTRIES, BLOCK_REQUIRED_MATERIALS,
    BLOCK_TOOL_TYPES, BLOCK_TYPES, ITEM_TYPES, RARITIES, TOOL_TYPES,
};
use crate::condition::Condition;
use crate::field::{FieldKind, FormField};
use crate::schema::{FormSchema, FormTab};

/// The record families a wizard can create.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Item,
    Block,
    Material,
    Glyph,
}

impl EntityKind {
    /// Top-level section of the configuration document holding this kind.
    pub fn section(self) -> &'static str {
        match self {
            EntityKind::Item => "items",
            EntityKind::Block => "blocks",
            EntityKind::Material => "materials",
            EntityKind::Glyph => "glyphs",
        }
    }

    pub fn from_section(section: &str) -> Option<Self> {
        match section {
            "items" => Some(EntityKind::Item),
            "blocks" => Some(EntityKind::Block),
            "materials" => Some(EntityKind::Material),
            "glyphs" => Some(EntityKind::Glyph),
            _ => None,
        }
    }

    /// Tab holding the user supplied `id` field.
    pub fn id_tab(self) -> &'static str {
        match self {
            EntityKind::Item => "itemIDAndType",
            EntityKind::Block => "blockIDAndType",
            EntityKind::Material => "materialIDAndRepairItem",
            EntityKind::Glyph => "generic",
        }
    }
}

/// Dynamically supplied option lists. Any of them may still be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionLists {
    pub materials: Vec<String>,
    pub items: Vec<String>,
    pub sounds: Vec<String>,
}

pub fn form_for(kind: EntityKind, options: &OptionLists) -> FormSchema {
    match kind {
        EntityKind::Item => item_form(options),
        EntityKind::Block => block_form(options),
        EntityKind::Material => material_form(options),
        EntityKind::Glyph => glyph_form(),
    }
}

fn item_type_is(value: &str) -> Condition {
    Condition::equals("itemIDAndType", "type", value)
}

pub fn item_form(options: &OptionLists) -> FormSchema {
    FormSchema::new(vec![
        FormTab::new("itemIDAndType", "Item ID and Type", "New Item")
            .field(
                FormField::new("id", "Item ID", FieldKind::Text)
                    .required()
                    .placeholder("my_custom_item"),
            )
            .field(
                FormField::new("type", "Type", FieldKind::Select)
                    .required()
                    .options(ITEM_TYPES.iter().copied()),
            ),
        FormTab::new("tool", "Tool", "Tool Properties")
            .when(Condition::one_of("itemIDAndType", "type", TOOL_TYPES.iter().copied()))
            .field(
                FormField::new("material", "Material", FieldKind::OpenSelect)
                    .required()
                    .placeholder("NETHERITE")
                    .options(options.materials.iter().cloned()),
            )
            .field(
                FormField::new("attack_damage", "Attack Damage", FieldKind::Float)
                    .placeholder("sword: 3.0, shovel: 1.5, pickaxe: 1.0, axe: 5.0, hoe: 0.0"),
            )
            .field(
                FormField::new("attack_speed", "Attack Speed", FieldKind::Float)
                    .placeholder("sword: -2.4, shovel: -3.0, pickaxe: -2.8, axe: -3.0, hoe: 0.0"),
            ),
        FormTab::new("armor", "Armor", "Armor Properties")
            .when(item_type_is("armor"))
            .field(
                FormField::new("material", "Material", FieldKind::OpenSelect)
                    .required()
                    .placeholder("NETHERITE")
                    .options(options.materials.iter().cloned()),
            )
            .field(
                FormField::new("armor_type", "Armor Type", FieldKind::Select)
                    .options(ARMOR_TYPES.iter().copied()),
            ),
        FormTab::new("elytra", "Elytra", "Elytra Properties")
            .when(item_type_is("elytra"))
            .field(FormField::new("durability", "Durability", FieldKind::Int).placeholder("432"))
            .field(FormField::new(
                "texture",
                "Elytra Texture",
                FieldKind::texture(["entity/equipment/wings/"]),
            ))
            .field(FormField::new("use_player_skin", "Use Player Skin", FieldKind::Bool))
            .field(
                FormField::new("repair_item", "Repair Item", FieldKind::OpenSelect)
                    .options(options.items.iter().cloned()),
            ),
        FormTab::new("trident", "Trident", "Trident Properties")
            .when(item_type_is("trident"))
            .field(FormField::new("durability", "Durability", FieldKind::Int).placeholder("250"))
            .field(FormField::new(
                "texture",
                "Trident Texture",
                FieldKind::texture(["item/"]),
            ))
            .field(
                FormField::new("attack_damage", "Attack Damage", FieldKind::Float)
                    .placeholder("8.0"),
            ),
        FormTab::new("components", "Components", "Custom Components")
            .field(FormField::new(
                "enchantment_glint_override",
                "Enchantment Glint Override",
                FieldKind::Bool,
            ))
            .field(FormField::new("fire_resistant", "Fire Resistant", FieldKind::Bool))
            .field(FormField::new("food", "Food", FieldKind::Bool))
            .field(FormField::new("max_damage", "Maximum Damage/Durability", FieldKind::Int))
            .field(
                FormField::new("max_stack_size", "Max Stack Size", FieldKind::Int)
                    .placeholder("64 (1-99)"),
            )
            .field(
                FormField::new("rarity", "Rarity", FieldKind::Select)
                    .options(RARITIES.iter().copied()),
            )
            .field(FormField::new("hide_tooltip", "Hide Tooltip", FieldKind::Bool))
            .field(FormField::new("unbreakable", "Unbreakable", FieldKind::Bool))
            .field(FormField::new("use_cooldown", "Use Cooldown", FieldKind::Bool)),
        FormTab::new("food", "Food", "Food Properties")
            .when(Condition::flag("components", "food"))
            .field(FormField::new("nutrition", "Nutrition", FieldKind::Int).placeholder("6"))
            .field(
                FormField::new("saturation_modifier", "Saturation Modifier", FieldKind::Float)
                    .placeholder("0.6"),
            )
            .field(FormField::new("can_always_eat", "Can Always Eat", FieldKind::Bool))
            .field(
                FormField::new("consume_seconds", "Consume Seconds", FieldKind::Float)
                    .placeholder("1.6"),
            ),
        FormTab::new("use_cooldown", "Use Cooldown", "Use Cooldown Properties")
            .when(Condition::flag("components", "use_cooldown"))
            .field(
                FormField::new("cooldown_seconds", "Cooldown Seconds", FieldKind::Float)
                    .placeholder("4.0"),
            )
            .field(
                FormField::new("group", "Group", FieldKind::Text)
                    .placeholder("Usually generated automatically"),
            ),
        FormTab::new("resourcePack", "Resource Pack", "Resource Pack Properties")
            .field(
                FormField::new("icon", "Icon", FieldKind::texture(["item/"])).required(),
            )
            .field(FormField::new("name", "Name by language", FieldKind::LocalizedName).required()),
    ])
}

pub fn block_form(options: &OptionLists) -> FormSchema {
    let block_field = |field: &str, value: &str| Condition::equals("blockIDAndType", field, value);

    FormSchema::new(vec![
        FormTab::new("blockIDAndType", "Block ID and Type", "New Block")
            .field(
                FormField::new("id", "Block ID", FieldKind::Text)
                    .required()
                    .placeholder("my_custom_block"),
            )
            .field(
                FormField::new("type", "Type", FieldKind::Select)
                    .required()
                    .options(BLOCK_TYPES.iter().copied()),
            )
            .field(
                FormField::new("registry", "Block Registry", FieldKind::Select)
                    .required()
                    .options(BLOCK_REGISTRIES.iter().copied()),
            )
            .field(
                FormField::new("drop_type", "Drop Type", FieldKind::Select)
                    .options(BLOCK_DROP_TYPES.iter().copied()),
            ),
        FormTab::new("regular", "Regular", "Regular Block Properties")
            .when(block_field("type", "regular"))
            .field(
                FormField::new("required_material", "Required Material", FieldKind::Select)
                    .options(BLOCK_REQUIRED_MATERIALS.iter().copied()),
            )
            .field(
                FormField::new("destroy_time", "Destroy Time", FieldKind::Float)
                    .placeholder("1.0"),
            )
            .field(
                FormField::new("explosion_resistance", "Explosion Resistance", FieldKind::Float)
                    .placeholder("1.0"),
            )
            .field(
                FormField::new("tool_type", "Tool Type", FieldKind::Select)
                    .options(BLOCK_TOOL_TYPES.iter().copied()),
            ),
        FormTab::new("tnt", "Tnt", "Tnt Block Properties")
            .when(block_field("type", "tnt"))
            .field(
                FormField::new("explosion_power", "Explosion Power", FieldKind::Int)
                    .placeholder("4"),
            ),
        FormTab::new("ore_drops", "Drops", "Block Drops Properties")
            .when(block_field("drop_type", "ore"))
            .field(
                FormField::new("item", "Drop Item", FieldKind::OpenSelect)
                    .options(options.items.iter().cloned()),
            )
            .field(FormField::new("max", "Maximum", FieldKind::Int).placeholder("1"))
            .field(FormField::new("min", "Minimum", FieldKind::Int).placeholder("1")),
        FormTab::new("resourcePack", "Resource Pack", "Resource Pack Properties")
            .field(
                FormField::new("texture", "Block Texture", FieldKind::texture(["block/"]))
                    .required(),
            )
            .field(FormField::new("name", "Name by language", FieldKind::LocalizedName).required()),
    ])
}

pub fn material_form(options: &OptionLists) -> FormSchema {
    FormSchema::new(vec![
        FormTab::new("materialIDAndRepairItem", "Generic", "New Material")
            .field(
                FormField::new("id", "Material ID", FieldKind::Text)
                    .required()
                    .placeholder("MY_CUSTOM_MATERIAL"),
            )
            .field(
                FormField::new("repair_item", "Repair Item", FieldKind::OpenSelect)
                    .options(options.items.iter().cloned()),
            )
            .field(
                FormField::new("enchantment_value", "Enchantment Value", FieldKind::Int)
                    .placeholder("15"),
            ),
        FormTab::new("tool", "Tool Properties", "Material Tool Properties")
            .field(
                FormField::new("base", "Base Material", FieldKind::Select)
                    .options(BASE_MATERIALS.iter().copied()),
            )
            .field(FormField::new("durability", "Durability", FieldKind::Int).placeholder("2031"))
            .field(
                FormField::new("speed", "Block Break Speed", FieldKind::Float)
                    .placeholder("9.0"),
            )
            .field(
                FormField::new("attack_damage_bonus", "Attack Damage Bonus", FieldKind::Float)
                    .placeholder("4.0"),
            ),
        FormTab::new("armor", "Armor Properties", "Material Armor Properties")
            .field(FormField::new("durability", "Durability", FieldKind::Int).placeholder("37"))
            .field(
                FormField::new("defense_boots", "Boots Defense", FieldKind::Int)
                    .placeholder("3"),
            )
            .field(
                FormField::new("defense_leggings", "Leggings Defense", FieldKind::Int)
                    .placeholder("6"),
            )
            .field(
                FormField::new("defense_chestplate", "Chestplate Defense", FieldKind::Int)
                    .placeholder("8"),
            )
            .field(
                FormField::new("defense_helmet", "Helmet Defense", FieldKind::Int)
                    .placeholder("3"),
            )
            .field(
                FormField::new("equip_sound", "Equip Sound", FieldKind::OpenSelect)
                    .placeholder("item.armor.equip_netherite")
                    .options(options.sounds.iter().cloned()),
            )
            .field(FormField::new("toughness", "Toughness", FieldKind::Float).placeholder("3.0"))
            .field(
                FormField::new("knockback_resistance", "Knockback Resistance", FieldKind::Float)
                    .placeholder("0.1"),
            )
            .field(FormField::new(
                "texture",
                "Texture",
                FieldKind::texture([
                    "entity/equipment/humanoid/",
                    "entity/equipment/humanoid_leggings/",
                ]),
            )),
    ])
}

pub fn glyph_form() -> FormSchema {
    FormSchema::new(vec![FormTab::new("generic", "Generic", "New Glyph")
        .field(
            FormField::new("id", "Glyph ID", FieldKind::Text)
                .required()
                .placeholder("my_custom_glyph"),
        )
        .field(FormField::new("image_path", "Image Path", FieldKind::texture(["font/"])))
        .field(FormField::new("height", "Glyph Height", FieldKind::Int).placeholder("8"))
        .field(FormField::new("ascent", "Glyph Ascent", FieldKind::Int).placeholder("7"))])
}
