//! Job search over SerpApi's Google Jobs engines with a local SQLite
//! pipeline of saved roles, served as a web page, a JSON API and an
//! interactive terminal session.

pub mod board;
pub mod cli;
pub mod core;
pub mod job_search;
pub mod terminal;
pub mod test_utils;
pub mod web;

pub use crate::board::JobBoard;
pub use crate::core::{AppConfig, Database, SaveOutcome};
pub use crate::job_search::{JobDetail, JobSummary, Quota, SearchClient};
