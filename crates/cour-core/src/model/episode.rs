use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::Quarter;
use crate::error::CalendarError;
use crate::model::ids::{EpisodeId, WorkId};

/// One broadcast episode of a work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub work_id: WorkId,
    pub number: u32,
    pub title: Option<String>,

    /// First broadcast, stored with millisecond precision.
    pub aired_at: DateTime<Utc>,
}

impl Episode {
    #[must_use]
    pub fn new(work_id: WorkId, number: u32, aired_at: DateTime<Utc>) -> Self {
        Self {
            id: EpisodeId::new(),
            work_id,
            number,
            title: None,
            aired_at,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The broadcast quarter this episode aired in.
    pub fn quarter(&self) -> Result<Quarter, CalendarError> {
        Quarter::containing(&self.aired_at)
    }
}
