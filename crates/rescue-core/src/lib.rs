//! Core types and definitions for the rescue simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! cells and ids, components, commands, snapshot trees, events, errors and
//! constants. It has no dependency on any runtime or rendering framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
