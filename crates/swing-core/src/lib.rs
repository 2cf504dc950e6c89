//! Core types and traits for the swing screener.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PriceBar, PriceSeries)
//! - Indicator snapshots and trading styles
//! - Decisions, rule traces and trade plans
//! - Core traits for indicators and rules

pub mod types;
pub mod traits;
pub mod error;

pub use error::{SwingError, SwingResult};
pub use types::*;
pub use traits::*;
