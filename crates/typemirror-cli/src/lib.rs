//! Command-line browser for TypeDoc JSON documents.
//!
//! The binary is a thin wrapper: argument parsing lives in [`args`], each
//! subcommand in [`commands`], serializable views of mirrors in [`report`],
//! and text rendering in [`render`].

pub mod args;
pub mod commands;
pub mod render;
pub mod report;
pub mod tracing_config;
