// src/core/mod.rs
//! Core services: configuration, storage and file system helpers

pub mod config_manager;
pub mod database;
pub mod fs_ops;

pub use config_manager::AppConfig;
pub use database::{Database, JobRepository, PipelineEntry, SaveOutcome, SavedJob};
pub use fs_ops::FsOps;
