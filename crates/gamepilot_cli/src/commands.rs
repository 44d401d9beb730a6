//! Command modules for the gamepilot CLI.
//!
//! - `config_cmd`: inspect and edit layered configuration
//! - `doctor_cmd`: environment diagnostics run as an action script
//! - `extensions_cmd`: extension management placeholders
//! - `script_cmd`: automation scripts against a dry-run target

pub mod config_cmd;
pub mod doctor_cmd;
pub mod extensions_cmd;
pub mod script_cmd;
