//! Core domain + dispatch logic for the GORBOY GUARD bot.
//!
//! This crate is intentionally framework-agnostic. Telegram transport and the
//! HTTP webhook live in adapter crates behind the `ReplyEmitter` port.

pub mod config;
pub mod content;
pub mod cooldown;
pub mod dispatch;
pub mod domain;
pub mod easter;
pub mod errors;
pub mod event;
pub mod formatting;
pub mod links;
pub mod logging;
pub mod messaging;
pub mod token;

pub use errors::{Error, Result};
