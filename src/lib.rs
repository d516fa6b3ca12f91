pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod pipeline;
pub mod selector;
pub mod store;
pub mod table;

pub use error::{Error, Result};
