//! Ombu CLI library.
//!
//! This crate provides the command-line tools for looking at encoded Ombu
//! values. The public modules are primarily exposed for testing purposes.

pub mod cli;
pub mod commands;
pub mod common;
