//! Common utilities and shared types for the reserializer crates.
//!
//! This crate provides the pieces every other crate in the workspace leans on:
//!
//! - **Configuration**: Serializer flags via [`Settings`]
//! - **Error handling**: Unified error types via [`ReserializerError`] and [`ReserializerResult`]
//!
//! # Example
//!
//! ```no_run
//! use reserializer_common::{ReserializerResult, Settings};
//!
//! fn example() -> ReserializerResult<()> {
//!     let settings = Settings::load()?;
//!     println!("masked links: {}", settings.discord.masked_links);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;

pub use config::{DiscordSettings, MinecraftSettings, Settings};
pub use error::{ReserializerError, ReserializerResult};
