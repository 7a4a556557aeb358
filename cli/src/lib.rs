#![allow(clippy::result_large_err)]

pub mod actions;
pub mod cli;
pub mod error;

pub use error::{Error, Result};
