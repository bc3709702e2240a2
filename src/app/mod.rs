pub mod api;
pub mod cli;
pub mod commands;
mod context;
pub mod loader;

pub use context::AppContext;
