//! World cache loader.
//!
//! Copies the `world` city database into KeyDB as one flat JSON document per
//! city, then compares point-lookup latency between the two stores.
//!
//! Flow of a run (see [`pipeline::run`]):
//! - [`extract::PaginatedExtractor`] pages through `city`, join-fetching each
//!   city's country and languages
//! - [`denormalize::flatten`] turns each city into a [`world_core::types::CityCountry`]
//! - [`populate::populate`] writes the documents under their decimal ids
//! - [`benchmark::compare`] times the same lookups against both stores

pub mod benchmark;
pub mod codec;
pub mod config;
pub mod denormalize;
pub mod error;
pub mod extract;
pub mod keydb;
pub mod pipeline;
pub mod populate;
pub mod relational;
pub mod report;
pub mod synthetic;

pub use error::{LoaderError, Result, StoreKind};
