//! # Scoutbook
//!
//! Offline scouting and match analytics for robotics competitions, usable
//! both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! scoutbook = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scoutbook::matches::MatchRecordStore;
//! use scoutbook::store::SqliteStore;
//! use scoutbook::types::{CompLevel, Match};
//!
//! let store = SqliteStore::new("./data/scoutbook.db").unwrap();
//! store.initialize().unwrap();
//!
//! let matches = MatchRecordStore::new(Arc::new(store));
//! matches.add(Match::scheduled(12, CompLevel::Qualification, [1, 2, 3], [4, 5, 6]))?;
//! matches.record_result(12, 80, 95)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

pub mod analytics;
pub mod backup;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod matches;
pub mod notes;
pub mod rules;
pub mod scouting;
pub mod store;
pub mod strategy;
pub mod teams;
pub mod types;
