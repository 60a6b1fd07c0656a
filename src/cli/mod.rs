//! CLI infrastructure for the gridchase toolkit
//!
//! This module provides the command-line interface for simulating search
//! agents, running belief-tracking sessions, comparing agents, and
//! exporting recorded data.

pub mod commands;
pub mod config;
pub mod output;
