//! Note record types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display format for `date_display` ("May 01, 2024 at 05:00 PM")
pub const DATE_DISPLAY_FORMAT: &str = "%B %d, %Y at %I:%M %p";

/// A quick note owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Last write time (ISO-8601 local time)
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub date_display: String,
}

pub fn date_display(at: NaiveDateTime) -> String {
    at.format(DATE_DISPLAY_FORMAT).to_string()
}
