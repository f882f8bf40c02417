//! CLI subcommands.

pub mod compare;
