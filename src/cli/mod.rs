//! CLI command handlers

pub mod commands;

pub use commands::{calculate, export, import, init, modules, watch, AdjustmentOverrides};
