//! liftlog-names: exercise name matching and deduplication.
//!
//! Names typed by different users and sessions drift ("Bench Press",
//! "bench press!", "Benchpress"). This crate decides which names are the same
//! exercise and what to do about it:
//!
//! - [`normalize()`]: canonical comparison key
//! - [`similarity()`]: edit-distance score in [0, 1] between keys
//! - [`autocorrect()`]: fixed dictionary of informal spellings
//! - [`build_clusters`]: greedy grouping of a record snapshot for review
//! - [`validate()`]: live feedback for a proposed new name
//! - [`plan_merge`] / [`plan_auto_merge`]: rename plans for the store
//!
//! Thresholds: warn at 0.7, group for review at 0.85, merge without
//! confirmation above 0.9. See [`DedupConfig`].
//!
//! Everything here is a pure function over caller-supplied snapshots; storage
//! and the atomic write of a merge plan belong to the caller.

pub mod autocorrect;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod merge;
pub mod normalize;
pub mod record;
pub mod similarity;
pub mod validate;

pub use autocorrect::*;
pub use cluster::*;
pub use config::*;
pub use engine::*;
pub use error::{ConfigError, NameError};
pub use merge::*;
pub use normalize::*;
pub use record::*;
pub use similarity::*;
pub use validate::*;
