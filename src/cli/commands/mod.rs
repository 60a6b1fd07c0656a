//! CLI command implementations.

pub mod compare;
pub mod export;
pub mod simulate;
pub mod track;
