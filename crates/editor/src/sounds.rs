//! Background load of the known sound ids.

use std::path::{Path, PathBuf};

use color_eyre::{eyre::WrapErr, Result};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Sound ids of a `sounds.json` index: the top-level object keys, sorted.
pub fn parse_sound_index(text: &str) -> serde_json::Result<Vec<String>> {
    let index: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
    let mut ids: Vec<String> = index.into_iter().map(|(id, _)| id).collect();
    ids.sort();
    Ok(ids)
}

pub async fn load_sounds(path: &Path) -> Result<Vec<String>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    parse_sound_index(&text).wrap_err_with(|| format!("parsing {}", path.display()))
}

/// Start loading `path` on a background task.
///
/// The receiver yields the list once. A failed load only closes the channel;
/// a receiver dropped before delivery makes the send a no-op.
pub fn spawn_fetch(path: PathBuf) -> mpsc::Receiver<Vec<String>> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(async move {
        match load_sounds(&path).await {
            Ok(sounds) => {
                debug!(count = sounds.len(), "sound list loaded");
                if tx.send(sounds).await.is_err() {
                    debug!("sound list dropped, wizard already closed");
                }
            }
            Err(err) => warn!(error = ?err, "sound list unavailable"),
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_are_the_object_keys() {
        let text = r#"{
            "item.armor.equip_iron": {"sounds": ["item/armor/equip_iron1"]},
            "block.anvil.land": {"sounds": []},
            "item.armor.equip_gold": {"subtitle": "subtitles.item.armor.equip_gold"}
        }"#;
        assert_eq!(
            parse_sound_index(text).unwrap(),
            vec!["block.anvil.land", "item.armor.equip_gold", "item.armor.equip_iron"]
        );
    }

    #[test]
    fn non_objects_are_rejected() {
        assert!(parse_sound_index("[\"a\"]").is_err());
        assert!(parse_sound_index("{").is_err());
    }

    #[tokio::test]
    async fn missing_file_closes_the_channel() {
        let mut rx = spawn_fetch(PathBuf::from("/nonexistent/sounds.json"));
        assert_eq!(rx.recv().await, None);
    }
}
