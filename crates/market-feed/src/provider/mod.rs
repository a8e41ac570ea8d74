//! News and snapshot provider abstractions and implementations.
//!
//! This module contains:
//! - The `NewsProvider` and `SnapshotProvider` traits every adapter implements
//! - Shared HTTP and payload extraction helpers
//! - Concrete adapters (Tavily, AkShare, OpenBB, Eastmoney)
//! - The deterministic synthetic generator used as the last fallback tier
//!
//! # Architecture
//!
//! Adapters are thin: one HTTP request per call, then a pure
//! `normalize_*` function turns the raw `serde_json::Value` into the unified
//! schema. Adapters never swallow failures; they return a classified
//! [`FeedError`](crate::FeedError) and leave recovery to the registry.

mod extract;
mod http;
mod rows;
mod traits;

pub mod akshare;
pub mod eastmoney;
pub mod openbb;
pub mod synthetic;
pub mod tavily;

pub use traits::{NewsProvider, SnapshotProvider};
