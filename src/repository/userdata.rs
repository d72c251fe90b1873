use std::path::Path;

use indexmap::IndexSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::sportcast_error::{SportcastError, SportcastErrorKind};
use crate::utils::json_utils::{json_read_document, json_write_document};

/// Small persisted key-value state per install. Read at the start of a
/// handler, written back at its end; there is no concurrent writer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Userdata {
    #[serde(default)]
    pub username: Option<String>,
    /// Asset ids the user wants to be reminded about. The set keeps insertion
    /// order and holds each id at most once.
    #[serde(default)]
    pub alerts: IndexSet<String>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Userdata {
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match json_read_document(path) {
            Ok(userdata) => userdata,
            Err(err) => {
                debug!("cant read userdata {path:?}: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SportcastError> {
        json_write_document(path, self).map_err(|err| {
            SportcastError::new(SportcastErrorKind::Persist, format!("cant write userdata {path:?}: {err}"))
        })
    }

    /// Flips reminder membership for an asset id, returns `true` when the
    /// alert is now set.
    pub fn toggle_alert(&mut self, asset_id: &str) -> bool {
        if self.alerts.shift_remove(asset_id) {
            false
        } else {
            self.alerts.insert(String::from(asset_id));
            true
        }
    }

    pub fn has_alert(&self, asset_id: &str) -> bool {
        self.alerts.contains(asset_id)
    }
}

#[cfg(test)]
mod tests {
    use super::Userdata;

    #[test]
    fn test_toggle_alert_is_involution() {
        let mut userdata = Userdata::default();
        assert!(userdata.toggle_alert("a1"));
        assert!(userdata.has_alert("a1"));
        assert!(!userdata.toggle_alert("a1"));
        assert!(!userdata.has_alert("a1"));
    }

    #[test]
    fn test_alert_ids_unique() {
        let mut userdata = Userdata::default();
        userdata.alerts.insert(String::from("a1"));
        userdata.alerts.insert(String::from("a1"));
        assert_eq!(userdata.alerts.len(), 1);
    }

    #[test]
    fn test_load_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("userdata.json");

        let missing = Userdata::load(&path);
        assert!(missing.alerts.is_empty());

        let mut userdata = Userdata::default();
        userdata.username = Some(String::from("fan@example.com"));
        userdata.toggle_alert("a1");
        userdata.toggle_alert("a2");
        userdata.save(&path).unwrap();

        let loaded = Userdata::load(&path);
        assert_eq!(loaded.username.as_deref(), Some("fan@example.com"));
        assert_eq!(loaded.alerts.iter().collect::<Vec<_>>(), vec!["a1", "a2"]);
    }
}
