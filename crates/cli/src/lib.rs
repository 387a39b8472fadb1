//! Command-line front end for the liquidity snapshot
//!
//! Argument parsing, layered settings and report rendering live here so the
//! binary stays a thin wrapper.

pub mod args;
pub mod render;
pub mod settings;

pub use args::{Args, OutputFormat};
pub use render::{format_usd, render_json, TextReport};
