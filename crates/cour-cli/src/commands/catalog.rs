use anyhow::{Context, Result};
use chrono::Utc;
use cour_core::calendar::REFERENCE_ZONE;
use cour_core::model::{Episode, EpisodeId, Watch, Work, WorkId};
use cour_core::schema::Database;

use super::{parse_instant, quarter_filter};

fn parse_work_id(id: &str) -> Result<WorkId> {
    id.parse().with_context(|| format!("Invalid work id {id:?}"))
}

pub fn add_work(db: &Database, title: String, url: Option<String>, subscribe: bool) -> Result<()> {
    let mut work = Work::new(title, Utc::now());
    if let Some(url) = url {
        work = work.with_official_url(url);
    }
    if subscribe {
        work = work.subscribed();
    }
    db.insert_work(&work)?;

    println!("✓ Added {} ({})", work.title, work.id);
    Ok(())
}

/// List works, narrowed to one quarter when `cour` is a valid symbol.
pub fn list_works(db: &Database, cour: Option<&str>) -> Result<()> {
    let works = match quarter_filter(cour) {
        Some(quarter) => {
            println!("Works airing in {} ({}):\n", quarter.display_label(), quarter.symbol());
            db.list_works_airing_in(quarter)?
        }
        None => db.list_works()?,
    };

    if works.is_empty() {
        println!("No works found.");
    }
    for work in works {
        let marker = if work.subscribed { "★" } else { " " };
        println!("{marker} {}  {}", work.id, work.title);
    }
    Ok(())
}

pub fn subscribe(db: &Database, id: &str, subscribed: bool) -> Result<()> {
    let id = parse_work_id(id)?;
    db.set_subscribed(id, subscribed, Utc::now())?;
    let work = db.get_work(id)?;

    if subscribed {
        println!("✓ Subscribed to {}", work.title);
    } else {
        println!("✓ Unsubscribed from {}", work.title);
    }
    Ok(())
}

pub fn add_episode(
    db: &Database,
    work_id: &str,
    number: u32,
    aired_at: &str,
    title: Option<String>,
) -> Result<()> {
    let work_id = parse_work_id(work_id)?;
    let aired_at = parse_instant(aired_at)?.with_timezone(&Utc);
    let mut episode = Episode::new(work_id, number, aired_at);
    if let Some(title) = title {
        episode = episode.with_title(title);
    }
    db.insert_episode(&episode)?;

    println!(
        "✓ Added episode {} ({}) airing in {}",
        episode.number,
        episode.id,
        episode.quarter()?.display_label()
    );
    Ok(())
}

pub fn list_episodes(db: &Database, work_id: &str) -> Result<()> {
    let work = db.get_work(parse_work_id(work_id)?)?;
    let episodes = db.list_episodes_for_work(work.id)?;

    println!("{}\n", work.title);
    let zone = REFERENCE_ZONE;
    for episode in episodes {
        println!(
            "  #{:<3} {}  {}  {}",
            episode.number,
            episode.aired_at.with_timezone(&zone).format("%Y-%m-%d %H:%M"),
            episode.quarter()?.symbol(),
            episode.title.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

pub fn record_watch(
    db: &Database,
    episode_id: &str,
    rating: Option<u8>,
    comment: Option<String>,
    at: Option<&str>,
) -> Result<()> {
    let episode_id: EpisodeId = episode_id
        .parse()
        .with_context(|| format!("Invalid episode id {episode_id:?}"))?;
    let watched_at = match at {
        Some(text) => parse_instant(text)?.with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut watch = Watch::new(episode_id, watched_at);
    if let Some(rating) = rating {
        watch = watch.with_rating(rating)?;
    }
    if let Some(comment) = comment {
        watch = watch.with_comment(comment);
    }
    db.record_watch(&watch)?;

    println!("✓ Recorded watch of episode {episode_id}");
    Ok(())
}
