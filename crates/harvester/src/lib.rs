//! Game retrieval, storage and the stage pipeline around `chess-core`.

pub mod clients;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod retry;
pub mod source;
pub mod store;
