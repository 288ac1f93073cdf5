//! # QuickClean
//!
//! A disk-space reclamation engine. QuickClean scans the local filesystem
//! for space that can be safely given back:
//!
//! - **Cache directories** — browser, system, application, and developer
//!   caches, classified by name
//! - **Developer tool caches** — a catalog of known package-manager and
//!   build-tool locations, cleanable in place
//! - **App leftovers** — support files, preferences, and logs whose owning
//!   application is no longer installed
//! - **Large files** — oversized files classified by extension
//! - **Duplicates** — byte-identical files found via a two-phase
//!   size-bucket + fingerprint algorithm
//!
//! Sizes are physical disk usage (allocated blocks), so sparse files are
//! reported at what they actually occupy. Deletion goes through an
//! idempotent trash/delete primitive that refuses protected paths.

pub mod cli;
pub mod common;
pub mod duplicates;
pub mod fsops;
pub mod scanner;
