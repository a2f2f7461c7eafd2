//! Core domain model for cour.
//!
//! This crate defines the broadcast-quarter ("cour") calendar, the anime
//! catalog model (Work, Episode, Watch), and the SQLite schema with the
//! quarter-aware queries built on top of it.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod calendar;
pub mod error;
pub mod model;
pub mod schema;

pub use calendar::{Quarter, QuarterSpan, Season};
pub use error::{CalendarError, Error, Result};
