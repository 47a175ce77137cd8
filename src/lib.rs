pub mod config;
pub mod error;
pub mod queue;
pub mod rpc;
pub mod storage;

pub use error::{Error, Result};
