//! Archive entries as returned by the APOD API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of media an archive entry links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// One day of the Astronomy Picture of the Day archive.
///
/// The `date` is unique within a fetched batch. Entries are never mutated
/// after they have been parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub date: NaiveDate,
    pub title: String,
    pub explanation: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

impl ArchiveEntry {
    /// Image reference for full-screen display: the HD variant when present.
    pub fn display_url(&self) -> &str {
        self.hdurl.as_deref().unwrap_or(&self.url)
    }

    /// Date formatted as `YYYY.MM.DD`.
    pub fn date_label(&self) -> String {
        self.date.format("%Y.%m.%d").to_string()
    }
}

/// Sort a batch chronologically (ascending) and drop repeated dates,
/// keeping the first occurrence.
pub fn normalize_batch(mut entries: Vec<ArchiveEntry>) -> Vec<ArchiveEntry> {
    // Stable sort keeps the first occurrence of a date ahead of later ones.
    entries.sort_by_key(|e| e.date);
    entries.dedup_by_key(|e| e.date);
    entries
}
