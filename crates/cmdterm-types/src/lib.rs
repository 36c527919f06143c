//! Foundation types for cmdterm.
//!
//! Shared by the interpreter crate and its hosts: the error taxonomy and the
//! TOML-backed terminal configuration.

pub mod config;
pub mod error;
