use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A remotely-hosted media asset as served by `GET /assets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl Asset {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or("Unknown title")
    }

    pub fn display_author(&self) -> &str {
        self.author
            .as_deref()
            .filter(|author| !author.trim().is_empty())
            .unwrap_or("Unknown author")
    }
}

/// Media availability for one asset. `uri` is absent when no playable media
/// exists in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MediaStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

impl MediaStatus {
    pub fn display_status(&self) -> &str {
        self.status
            .as_deref()
            .filter(|status| !status.trim().is_empty())
            .unwrap_or("Media not found")
    }
}

/// Newest assets first; an asset without a date sorts as if published now.
pub fn sort_newest_first(assets: &mut [Asset]) {
    let now = Utc::now();
    assets.sort_by_key(|asset| std::cmp::Reverse(asset.date.unwrap_or(now)));
}
