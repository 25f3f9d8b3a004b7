//! Core types and utilities shared by the pwmangle rule interpreter and guess driver.

pub mod types;
pub mod config;
pub mod error;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
