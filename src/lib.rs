// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod dataset;
pub mod heatmap;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod store;

#[cfg(feature = "tui")]
pub mod tui;
