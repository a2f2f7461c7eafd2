use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::ids::EpisodeId;

/// Lowest and highest accepted ratings.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A record of the user watching an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watch {
    pub episode_id: EpisodeId,
    pub watched_at: DateTime<Utc>,
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

impl Watch {
    #[must_use]
    pub fn new(episode_id: EpisodeId, watched_at: DateTime<Utc>) -> Self {
        Self {
            episode_id,
            watched_at,
            rating: None,
            comment: None,
        }
    }

    /// Attach a rating, rejecting values outside [`RATING_RANGE`].
    pub fn with_rating(mut self, rating: u8) -> Result<Self> {
        if !RATING_RANGE.contains(&rating) {
            return Err(Error::InvalidData(format!(
                "rating {rating} is outside {}..={}",
                RATING_RANGE.start(),
                RATING_RANGE.end()
            )));
        }
        self.rating = Some(rating);
        Ok(self)
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_with_rating() {
        let watch = Watch::new(EpisodeId::new(), Utc::now())
            .with_rating(4)
            .unwrap()
            .with_comment("great fight animation");
        assert_eq!(watch.rating, Some(4));
        assert_eq!(watch.comment.as_deref(), Some("great fight animation"));
    }

    #[test]
    fn test_watch_rejects_out_of_range_rating() {
        let watch = Watch::new(EpisodeId::new(), Utc::now());
        assert!(matches!(watch.clone().with_rating(0), Err(Error::InvalidData(_))));
        assert!(matches!(watch.with_rating(6), Err(Error::InvalidData(_))));
    }
}
