//! CLI subcommand implementations for the pagetable binary.

pub mod extract_cmd;
pub mod output;
