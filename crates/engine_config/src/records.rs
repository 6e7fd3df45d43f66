//! Typed shapes of the four record families.
//!
//! Every field is optional and `None` is never written, so a record only
//! contains what the user actually entered.

use forms::{EntityKind, LocalizedNames};
use serde::{Deserialize, Serialize};

/// A numeric field value. Text that does not parse as a number is kept
/// verbatim instead of being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return Numeric::Int(int);
        }
        match trimmed.parse::<f64>() {
            Ok(float) if float.is_finite() => Numeric::Float(float),
            _ => Numeric::Text(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_damage: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_speed: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elytra: Option<Elytra>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trident: Option<Trident>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedNames>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Elytra {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durability: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_player_skin: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trident {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durability: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_damage: Option<Numeric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enchantment_glint_override: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fire_resistant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food: Option<Food>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_damage: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stack_size: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_display: Option<TooltipDisplay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unbreakable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_cooldown: Option<UseCooldown>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Food {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_always_eat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consume_seconds: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation_modifier: Option<Numeric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipDisplay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_tooltip: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UseCooldown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown_seconds: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Block {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drops: Option<Drops>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destroy_time: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explosion_resistance: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explosion_power: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedNames>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Drops {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Numeric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enchantment_value: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor: Option<MaterialArmor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<MaterialTool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialArmor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense: Option<Defense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durability: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equip_sound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knockback_resistance: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toughness: Option<Numeric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defense {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boots: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chestplate: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helmet: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leggings: Option<Numeric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialTool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durability: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_damage_bonus: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<Numeric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyph {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascent: Option<Numeric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Numeric>,
}

/// A record of any family, as read back from a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Item(Item),
    Block(Block),
    Material(Material),
    Glyph(Glyph),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Item(_) => EntityKind::Item,
            Record::Block(_) => EntityKind::Block,
            Record::Material(_) => EntityKind::Material,
            Record::Glyph(_) => EntityKind::Glyph,
        }
    }

    pub fn from_value(
        kind: EntityKind,
        value: serde_yaml::Value,
    ) -> Result<Self, serde_yaml::Error> {
        Ok(match kind {
            EntityKind::Item => Record::Item(serde_yaml::from_value(value)?),
            EntityKind::Block => Record::Block(serde_yaml::from_value(value)?),
            EntityKind::Material => Record::Material(serde_yaml::from_value(value)?),
            EntityKind::Glyph => Record::Glyph(serde_yaml::from_value(value)?),
        })
    }

    pub fn to_value(&self) -> Result<serde_yaml::Value, serde_yaml::Error> {
        match self {
            Record::Item(r) => serde_yaml::to_value(r),
            Record::Block(r) => serde_yaml::to_value(r),
            Record::Material(r) => serde_yaml::to_value(r),
            Record::Glyph(r) => serde_yaml::to_value(r),
        }
    }
}

fn with_png(name: &str) -> String {
    if name.ends_with(".png") {
        name.to_string()
    } else {
        format!("{name}.png")
    }
}

/// Preview texture of a record, relative to the texture root.
///
/// Items prefer `icon` over `texture`. Materials borrow the texture of their
/// repair item, looked up through `item`.
pub fn texture_path(record: &Record, item: impl Fn(&str) -> Option<Item>) -> Option<String> {
    let item_texture = |item: &Item| item.icon.as_deref().or(item.texture.as_deref()).map(with_png);
    match record {
        Record::Item(i) => item_texture(i),
        Record::Block(b) => b.texture.as_deref().map(with_png),
        Record::Material(m) => {
            let repair = item(m.repair_item.as_deref()?)?;
            item_texture(&repair)
        }
        Record::Glyph(g) => g.image_path.as_deref().map(with_png),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_prefers_integers_then_floats() {
        assert_eq!(Numeric::coerce("5"), Numeric::Int(5));
        assert_eq!(Numeric::coerce(" -3 "), Numeric::Int(-3));
        assert_eq!(Numeric::coerce("1.6"), Numeric::Float(1.6));
        assert_eq!(Numeric::coerce("12x"), Numeric::Text("12x".into()));
        assert_eq!(Numeric::coerce("inf"), Numeric::Text("inf".into()));
    }

    #[test]
    fn none_fields_are_not_written() {
        let glyph = Glyph {
            height: Some(Numeric::Int(8)),
            ..Glyph::default()
        };
        assert_eq!(serde_yaml::to_string(&glyph).unwrap(), "height: 8\n");
    }

    #[test]
    fn texture_resolution() {
        let sword = Item {
            texture: Some("item/ruby_sword".into()),
            ..Item::default()
        };
        assert_eq!(
            texture_path(&Record::Item(sword.clone()), |_| None).as_deref(),
            Some("item/ruby_sword.png")
        );

        let iconed = Item {
            icon: Some("item/ruby.png".into()),
            ..sword
        };
        let material = Record::Material(Material {
            repair_item: Some("ruby".into()),
            ..Material::default()
        });
        let lookup = |key: &str| (key == "ruby").then(|| iconed.clone());
        assert_eq!(texture_path(&material, lookup).as_deref(), Some("item/ruby.png"));
        assert_eq!(texture_path(&Record::Material(Material::default()), lookup), None);
    }
}
