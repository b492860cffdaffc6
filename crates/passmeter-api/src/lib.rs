// passmeter-api: Async Rust client for the password scoring service

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{API_PREFIX, DEFAULT_ORIGIN, ScoringClient};
pub use error::Error;
pub use models::{PasswordAnalysis, PasswordStats, ScoreBucket, Tool};
pub use transport::{TlsMode, TransportConfig};
