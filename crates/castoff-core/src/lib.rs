pub mod branch;
pub mod config;
pub mod error;
pub mod summary;
pub mod tracker;
pub mod workflow;

pub use error::{CastoffError, Result};
