//! `wms-ai`
//!
//! **Responsibility:** boundary to the external assistant endpoint.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It must not depend on the inventory crates.
//! - It must not mutate warehouse state.
//! - It only stores endpoint settings and probes connectivity.

pub mod config;
pub mod connectivity;
pub mod result;

pub use config::{AiConfig, DEFAULT_ENDPOINT};
pub use connectivity::{check_connectivity, ConnectivityProbe};
pub use result::{AiError, ConnectivityReport};
