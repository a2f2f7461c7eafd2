use anyhow::Result;
use chrono::Utc;
use cour_core::calendar::{enumerate_quarter_range, Quarter, REFERENCE_ZONE};

use super::parse_instant;

/// Show the quarter containing `instant`, or the current one.
pub fn show_at(instant: Option<&str>) -> Result<()> {
    let instant = match instant {
        Some(text) => parse_instant(text)?,
        None => Utc::now().with_timezone(&REFERENCE_ZONE),
    };
    let quarter = Quarter::containing(&instant)?;
    log::debug!("{} falls in {}", instant.to_rfc3339(), quarter);
    show_quarter(quarter);
    Ok(())
}

pub fn show_quarter(quarter: Quarter) {
    println!("{}\t{}", quarter.symbol(), quarter.display_label());
}

pub fn show_range(from: Quarter, to: Quarter, json: bool) -> Result<()> {
    let quarters = enumerate_quarter_range(from, to)?;
    if json {
        println!("{}", serde_json::to_string(&quarters)?);
    } else {
        for quarter in quarters {
            show_quarter(quarter);
        }
    }
    Ok(())
}

pub fn show_span(quarter: Quarter) -> Result<()> {
    let span = quarter.span()?;
    println!("{} ({})", quarter.symbol(), quarter.display_label());
    println!("  start: {} (inclusive)", span.start.to_rfc3339());
    println!("  end:   {} (exclusive)", span.end.to_rfc3339());
    Ok(())
}
