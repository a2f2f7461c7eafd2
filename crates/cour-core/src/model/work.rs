use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::WorkId;

/// A TV anime work the user tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    pub title: String,

    /// Official site, if known.
    pub official_url: Option<String>,

    /// Whether the user follows this work. Only subscribed works count
    /// towards watch duty.
    pub subscribed: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Work {
    #[must_use]
    pub fn new(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: WorkId::new(),
            title: title.into(),
            official_url: None,
            subscribed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_official_url(mut self, url: impl Into<String>) -> Self {
        self.official_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn subscribed(mut self) -> Self {
        self.subscribed = true;
        self
    }
}
