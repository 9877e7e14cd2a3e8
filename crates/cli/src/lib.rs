//! Cart CLI library: configuration and commands behind the `cart` binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod config;

pub use commands::CommandError;
pub use config::{CartConfig, ConfigError};
