use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use tracing::warn;

/// The three option groups a recipient picks from. Stored on the event as a
/// JSON text column and decoded through this one codec; the menu is a live
/// reference, so edits apply to every invite issued against the event.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Menu {
    pub dinner: Vec<String>,
    pub activity: Vec<String>,
    pub mood: Vec<String>,
}

impl Menu {
    /// Decode failure falls back to empty groups rather than failing the
    /// request, but the corruption is surfaced in the log.
    pub fn decode(raw: &str) -> Menu {
        match serde_json::from_str(raw) {
            Ok(menu) => menu,
            Err(e) => {
                warn!("Failed to decode stored menu, falling back to empty groups: {}", e);
                Menu::default()
            }
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn is_complete(&self) -> bool {
        !self.dinner.is_empty() && !self.activity.is_empty() && !self.mood.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub theme: String,
    pub event_date: Option<NaiveDate>,
    pub menu_json: String,
    pub blurb: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn menu(&self) -> Menu {
        Menu::decode(&self.menu_json)
    }
}
