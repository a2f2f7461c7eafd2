use anyhow::Result;
use chrono::Utc;
use cour_core::schema::Database;
use cour_core::Quarter;
use serde::Serialize;

use super::quarter_filter;

#[derive(Debug, Serialize)]
struct CourOption {
    symbol: String,
    label: String,
}

/// Print the quarters a selector should offer, newest first.
pub fn list_cours(db: &Database, json: bool) -> Result<()> {
    let quarters = db.available_quarters(&Utc::now())?;

    if json {
        let options: Vec<CourOption> = quarters
            .iter()
            .map(|q| CourOption {
                symbol: q.symbol(),
                label: q.display_label(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        for quarter in quarters {
            println!("{}\t{}", quarter.symbol(), quarter.display_label());
        }
    }
    Ok(())
}

/// Show duty vs. achievement for one quarter (default: the current one).
pub fn show_stats(db: &Database, cour: Option<&str>) -> Result<()> {
    let quarter = match quarter_filter(cour) {
        Some(quarter) => quarter,
        None => Quarter::containing(&Utc::now())?,
    };
    let stats = db.quarter_stats(quarter)?;

    println!("\n📊 {} ({})\n", quarter.display_label(), quarter.symbol());
    println!("  Duty:     {}", stats.duty);
    println!("  Watched:  {}", stats.achieved);
    println!("  Backlog:  {}", stats.backlog());
    match stats.achievement_rate() {
        Some(rate) => println!("  Achieved: {:.1}%", rate * 100.0),
        None => println!("  Achieved: -"),
    }

    if stats.duty == 0 {
        println!("\n  No subscribed episodes aired this quarter.");
        println!("  Run `cour work subscribe <ID>` to follow a work.");
    }

    Ok(())
}
