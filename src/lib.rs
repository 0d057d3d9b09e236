#![doc = include_str!("../README.md")]

pub mod cli;
pub mod error;
pub mod fetch;
pub mod log;
pub mod runtime;
pub mod types;

pub use error::*;
pub use fetch::*;
pub use types::*;
