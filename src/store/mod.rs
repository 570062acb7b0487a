//! The three-tier tag store and its file repository.
//!
//! This module provides:
//! - [`Tags`], the flat string-to-string tag mapping
//! - [`TagStore`], the in-memory holder of the config, remote, and system tiers
//! - [`FileRepository`], which loads and persists the tiers on disk

pub mod repository;
pub mod tags;

pub use repository::FileRepository;
pub use tags::{TagStore, Tags};
