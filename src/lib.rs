//! epic-freebies - Epic Games Store free-games promotions extractor
//!
//! Fetches the store's free-games promotions feed and normalizes the
//! entries currently offered at zero price into simple records.

pub mod client;
pub mod config;
pub mod extract;
pub mod models;

pub use client::EpicClient;
pub use config::Config;
pub use models::{CatalogResponse, FreeGame};
