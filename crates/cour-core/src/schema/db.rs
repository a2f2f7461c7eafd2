use chrono::{DateTime, TimeZone, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;

use crate::calendar::{enumerate_quarter_range, Quarter};
use crate::error::{Error, Result};
use crate::model::{Episode, EpisodeId, QuarterStats, Watch, Work, WorkId, RATING_RANGE};

use super::migrations::MIGRATIONS;

/// A catalog connection with the queries the web layer and dashboard need.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }
}

// Works
impl Database {
    pub fn insert_work(&self, work: &Work) -> Result<()> {
        self.conn.execute(
            "INSERT INTO works (id, title, official_url, subscribed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                work.id.to_string(),
                work.title,
                work.official_url,
                work.subscribed,
                work.created_at.to_rfc3339(),
                work.updated_at.to_rfc3339(),
            ],
        )?;
        log::debug!("Inserted work {} ({})", work.id, work.title);
        Ok(())
    }

    pub fn get_work(&self, id: WorkId) -> Result<Work> {
        self.conn
            .query_row(
                "SELECT id, title, official_url, subscribed, created_at, updated_at
                 FROM works WHERE id = ?1",
                [id.to_string()],
                row_to_work,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound {
                entity: "work",
                id: id.to_string(),
            })
    }

    /// All works, ordered by title.
    pub fn list_works(&self) -> Result<Vec<Work>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, official_url, subscribed, created_at, updated_at
             FROM works
             ORDER BY title",
        )?;
        let works = stmt
            .query_map([], row_to_work)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(works)
    }

    /// Subscribe to or unsubscribe from a work.
    pub fn set_subscribed(&self, id: WorkId, subscribed: bool, now: DateTime<Utc>) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE works SET subscribed = ?2, updated_at = ?3 WHERE id = ?1",
            rusqlite::params![id.to_string(), subscribed, now.to_rfc3339()],
        )?;
        if changed == 0 {
            return Err(Error::NotFound {
                entity: "work",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Works with at least one episode aired within the quarter's span.
    pub fn list_works_airing_in(&self, quarter: Quarter) -> Result<Vec<Work>> {
        let span = quarter.span()?;
        let mut stmt = self.conn.prepare(
            "SELECT id, title, official_url, subscribed, created_at, updated_at
             FROM works w
             WHERE EXISTS (
                 SELECT 1 FROM episodes e
                 WHERE e.work_id = w.id AND e.aired_at >= ?1 AND e.aired_at < ?2
             )
             ORDER BY title",
        )?;
        let works = stmt
            .query_map([span.start_millis(), span.end_millis()], row_to_work)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(works)
    }
}

// Episodes
impl Database {
    pub fn insert_episode(&self, episode: &Episode) -> Result<()> {
        // Surface a missing work as NotFound rather than a constraint error.
        self.get_work(episode.work_id)?;
        self.conn.execute(
            "INSERT INTO episodes (id, work_id, number, title, aired_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                episode.id.to_string(),
                episode.work_id.to_string(),
                episode.number,
                episode.title,
                episode.aired_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    pub fn get_episode(&self, id: EpisodeId) -> Result<Episode> {
        self.conn
            .query_row(
                "SELECT id, work_id, number, title, aired_at FROM episodes WHERE id = ?1",
                [id.to_string()],
                row_to_episode,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound {
                entity: "episode",
                id: id.to_string(),
            })
    }

    /// Episodes of one work, in broadcast order.
    pub fn list_episodes_for_work(&self, work_id: WorkId) -> Result<Vec<Episode>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, work_id, number, title, aired_at
             FROM episodes
             WHERE work_id = ?1
             ORDER BY number",
        )?;
        let episodes = stmt
            .query_map([work_id.to_string()], row_to_episode)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(episodes)
    }

    /// Air time of the oldest episode in the catalog, in epoch milliseconds.
    pub fn earliest_episode_aired_at(&self) -> Result<Option<i64>> {
        let earliest = self
            .conn
            .query_row("SELECT MIN(aired_at) FROM episodes", [], |row| row.get(0))?;
        Ok(earliest)
    }
}

// Watch history
impl Database {
    pub fn record_watch(&self, watch: &Watch) -> Result<i64> {
        if let Some(rating) = watch.rating {
            if !RATING_RANGE.contains(&rating) {
                return Err(Error::InvalidData(format!("rating {rating} is out of range")));
            }
        }
        self.get_episode(watch.episode_id)?;
        self.conn.execute(
            "INSERT INTO watches (episode_id, watched_at, rating, comment)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                watch.episode_id.to_string(),
                watch.watched_at.timestamp_millis(),
                watch.rating,
                watch.comment,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list_watches_for_episode(&self, episode_id: EpisodeId) -> Result<Vec<Watch>> {
        let mut stmt = self.conn.prepare(
            "SELECT episode_id, watched_at, rating, comment
             FROM watches
             WHERE episode_id = ?1
             ORDER BY watched_at, id",
        )?;
        let watches = stmt
            .query_map([episode_id.to_string()], |row| {
                Ok(Watch {
                    episode_id: parse_id(row, 0)?,
                    watched_at: millis_column(row, 1)?,
                    rating: row.get(2)?,
                    comment: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(watches)
    }
}

// Quarter queries
impl Database {
    /// Quarters to offer in a selector, newest first.
    ///
    /// Runs from the quarter of the oldest episode to the quarter of `now`.
    /// An empty catalog yields only the current quarter.
    pub fn available_quarters<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<Vec<Quarter>> {
        let current = Quarter::containing(now)?;
        let earliest = match self.earliest_episode_aired_at()? {
            Some(millis) => Quarter::from_timestamp_millis(millis)?,
            None => current,
        };
        let (first, last) = if earliest <= current {
            (earliest, current)
        } else {
            (current, earliest)
        };
        let mut quarters = enumerate_quarter_range(first, last)?;
        quarters.reverse();
        log::debug!(
            "Offering {} quarters from {} to {}",
            quarters.len(),
            first,
            last
        );
        Ok(quarters)
    }

    /// Duty and achievement over subscribed works for one quarter.
    pub fn quarter_stats(&self, quarter: Quarter) -> Result<QuarterStats> {
        let span = quarter.span()?;
        let (duty, achieved): (i64, i64) = self.conn.query_row(
            "SELECT
                 COUNT(*),
                 COUNT(CASE WHEN EXISTS (
                     SELECT 1 FROM watches x WHERE x.episode_id = e.id
                 ) THEN 1 END)
             FROM episodes e
             JOIN works w ON w.id = e.work_id
             WHERE w.subscribed = 1 AND e.aired_at >= ?1 AND e.aired_at < ?2",
            [span.start_millis(), span.end_millis()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(QuarterStats {
            quarter,
            duty: duty.unsigned_abs(),
            achieved: achieved.unsigned_abs(),
        })
    }
}

fn row_to_work(row: &Row) -> rusqlite::Result<Work> {
    Ok(Work {
        id: parse_id(row, 0)?,
        title: row.get(1)?,
        official_url: row.get(2)?,
        subscribed: row.get(3)?,
        created_at: rfc3339_column(row, 4)?,
        updated_at: rfc3339_column(row, 5)?,
    })
}

fn row_to_episode(row: &Row) -> rusqlite::Result<Episode> {
    Ok(Episode {
        id: parse_id(row, 0)?,
        work_id: parse_id(row, 1)?,
        number: row.get(2)?,
        title: row.get(3)?,
        aired_at: millis_column(row, 4)?,
    })
}

fn parse_id<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = uuid::Error>,
{
    let text: String = row.get(idx)?;
    text.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn rfc3339_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn millis_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp {millis} ms is out of range").into(),
        )
    })
}
