// src/job_search/mod.rs
//! SerpApi Google Jobs client: job search, listing details and plan quota

pub mod client;
pub mod transport;
pub mod types;

pub use client::SearchClient;
pub use transport::{Endpoint, QueryParams, SearchTransport, SerpApiTransport};
pub use types::*;
