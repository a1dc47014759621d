//! Scheduler CLI library.
//!
//! This crate provides the `scheduler` command: it loads a JSON schedule
//! file into a `MemoryStore` and reports range fitting, column
//! virtualization, bar layout and overlap checks from the timeline engine.

pub mod cli;
pub mod commands;
pub mod input;
