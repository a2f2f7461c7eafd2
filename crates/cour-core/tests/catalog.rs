//! Quarter-aware catalog queries against an on-disk database.

use chrono::{DateTime, Utc};
use cour_core::calendar::{Quarter, Season};
use cour_core::model::{Episode, Watch, Work};
use cour_core::schema::Database;
use tempfile::TempDir;

fn jst(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

fn open_temp() -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(temp_dir.path().join("cour.db")).expect("Failed to open database");
    (temp_dir, db)
}

#[test]
fn test_reopen_keeps_data_and_migrations() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cour.db");
    let work = Work::new("Kusuriya no Hitorigoto", jst("2023-10-01T00:00:00+09:00"));
    {
        let db = Database::open(&path).unwrap();
        db.insert_work(&work).unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.list_works().unwrap(), vec![work]);
}

#[test]
fn test_available_quarters_newest_first() {
    let (_dir, db) = open_temp();
    let work = Work::new("Long Runner", jst("2022-01-01T00:00:00+09:00"));
    db.insert_work(&work).unwrap();
    db.insert_episode(&Episode::new(work.id, 1, jst("2022-11-15T23:30:00+09:00")))
        .unwrap();
    db.insert_episode(&Episode::new(work.id, 2, jst("2023-05-01T23:30:00+09:00")))
        .unwrap();

    let now = jst("2023-07-01T03:00:00+09:00");
    let symbols: Vec<String> = db
        .available_quarters(&now)
        .unwrap()
        .iter()
        .map(Quarter::symbol)
        .collect();
    assert_eq!(
        symbols,
        ["2023spring", "2023winter", "2022autumn"],
        "03:00 on Jul 1 is still spring"
    );
}

#[test]
fn test_available_quarters_with_future_episode() {
    let (_dir, db) = open_temp();
    let work = Work::new("Announced", jst("2024-01-01T00:00:00+09:00"));
    db.insert_work(&work).unwrap();
    db.insert_episode(&Episode::new(work.id, 1, jst("2024-10-05T01:00:00+09:00")))
        .unwrap();

    let now = jst("2024-05-01T12:00:00+09:00");
    assert_eq!(
        db.available_quarters(&now).unwrap(),
        vec![
            Quarter::new(2024, Season::Autumn).unwrap(),
            Quarter::new(2024, Season::Summer).unwrap(),
            Quarter::new(2024, Season::Spring).unwrap(),
        ],
        "01:00 on Oct 5 is broadcast day Oct 4, already autumn"
    );
}

#[test]
fn test_quarter_stats_counts_subscribed_episodes_in_span() {
    let (_dir, db) = open_temp();
    let followed = Work::new("Followed", jst("2023-01-01T00:00:00+09:00")).subscribed();
    let ignored = Work::new("Ignored", jst("2023-01-01T00:00:00+09:00"));
    db.insert_work(&followed).unwrap();
    db.insert_work(&ignored).unwrap();

    let ep1 = Episode::new(followed.id, 1, jst("2023-01-07T23:00:00+09:00"));
    let ep2 = Episode::new(followed.id, 2, jst("2023-01-14T23:00:00+09:00"));
    // Airs at 01:00 on Apr 1, so it is still winter duty.
    let ep3 = Episode::new(followed.id, 3, jst("2023-04-01T01:00:00+09:00"));
    let ep4 = Episode::new(followed.id, 4, jst("2023-04-08T01:00:00+09:00"));
    let other = Episode::new(ignored.id, 1, jst("2023-01-10T23:00:00+09:00"));
    for episode in [&ep1, &ep2, &ep3, &ep4, &other] {
        db.insert_episode(episode).unwrap();
    }

    db.record_watch(&Watch::new(ep1.id, jst("2023-01-08T20:00:00+09:00")))
        .unwrap();
    db.record_watch(&Watch::new(ep1.id, jst("2023-02-08T20:00:00+09:00")))
        .unwrap();
    db.record_watch(&Watch::new(ep3.id, jst("2023-04-02T20:00:00+09:00")))
        .unwrap();
    db.record_watch(&Watch::new(other.id, jst("2023-01-11T20:00:00+09:00")))
        .unwrap();

    let winter = db.quarter_stats(Quarter::new(2023, Season::Winter).unwrap()).unwrap();
    assert_eq!(winter.duty, 3);
    assert_eq!(winter.achieved, 2);
    assert_eq!(winter.backlog(), 1);

    let spring = db.quarter_stats(Quarter::new(2023, Season::Spring).unwrap()).unwrap();
    assert_eq!(spring.duty, 1);
    assert_eq!(spring.achieved, 0);

    let summer = db.quarter_stats(Quarter::new(2023, Season::Summer).unwrap()).unwrap();
    assert_eq!(summer.achievement_rate(), None);
}

#[test]
fn test_garbage_timestamp_is_invalid_instant() {
    let (_dir, db) = open_temp();
    let work = Work::new("Corrupt", jst("2023-01-01T00:00:00+09:00"));
    db.insert_work(&work).unwrap();
    db.conn()
        .execute(
            "INSERT INTO episodes (id, work_id, number, aired_at) VALUES (?1, ?2, 1, ?3)",
            rusqlite::params!["00000000-0000-0000-0000-000000000001", work.id.to_string(), i64::MIN],
        )
        .unwrap();

    let err = db
        .available_quarters(&jst("2023-05-01T00:00:00+09:00"))
        .unwrap_err();
    assert!(matches!(
        err,
        cour_core::Error::Calendar(cour_core::CalendarError::InvalidInstant(_))
    ));
}
