//! Reminder record types

use crate::timeparse::parse_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Guidance shown when a reminder's time cannot be understood
pub const TIME_FORMAT_HINT: &str =
    "Could not understand the time format. Try '5pm', '17:30', or 'in 2 hours'";

/// A reminder owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: String,
    /// When the reminder is due (ISO-8601 local time)
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub completed: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub notified: bool,
}

/// Hand-edited records may carry `null` or numbers here; read those as empty
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

impl Task {
    /// Parsed due time, `None` if the stored value is malformed
    pub fn due_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.time)
    }

    /// Not completed, not yet surfaced, and due at or before `now`
    pub fn is_pending(&self, now: NaiveDateTime) -> bool {
        if self.completed || self.notified {
            return false;
        }
        matches!(self.due_at(), Some(due) if due <= now)
    }

    /// Confirmation line shown after the reminder is created
    pub fn confirmation(&self) -> String {
        match self.due_at() {
            Some(due) => format!(
                "Reminder set for {}: {}",
                due.format("%I:%M %p on %B %d"),
                self.reason
            ),
            None => format!("Reminder set: {}", self.reason),
        }
    }
}
