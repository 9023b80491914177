//! A personal finance tracker: income and expense transactions grouped into colored categories,
//! persisted as a two-entry JSON snapshot.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod snapshot;
pub mod store;
mod utils;


pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use snapshot::{FileStore, KeyValueStore, MemoryStore};
pub use store::FinanceStore;
