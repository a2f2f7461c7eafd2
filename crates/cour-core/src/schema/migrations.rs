/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const MIGRATION_001: &str = r#"
-- Works
CREATE TABLE IF NOT EXISTS works (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    official_url TEXT,
    subscribed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_works_subscribed ON works(subscribed);

-- Episodes; aired_at is milliseconds since the Unix epoch so quarter
-- spans can be compared numerically.
CREATE TABLE IF NOT EXISTS episodes (
    id TEXT PRIMARY KEY,
    work_id TEXT NOT NULL REFERENCES works(id),
    number INTEGER NOT NULL,
    title TEXT,
    aired_at INTEGER NOT NULL,
    UNIQUE (work_id, number)
);

CREATE INDEX IF NOT EXISTS idx_episodes_work_id ON episodes(work_id);
CREATE INDEX IF NOT EXISTS idx_episodes_aired_at ON episodes(aired_at);
"#;

const MIGRATION_002: &str = r#"
-- Watch history
CREATE TABLE IF NOT EXISTS watches (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    episode_id TEXT NOT NULL REFERENCES episodes(id),
    watched_at INTEGER NOT NULL,
    rating INTEGER CHECK (rating IS NULL OR rating BETWEEN 1 AND 5),
    comment TEXT
);

CREATE INDEX IF NOT EXISTS idx_watches_episode_id ON watches(episode_id);
"#;

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "works_and_episodes",
        sql: MIGRATION_001,
    },
    Migration {
        version: 2,
        name: "watch_history",
        sql: MIGRATION_002,
    },
];
