//! Transcoding between Minecraft chat components and Discord markdown.
//!
//! - [`MinecraftSerializer`] parses Discord markdown and renders the AST into
//!   components through a chain of [`NodeRenderer`]s.
//! - [`DiscordSerializer`] flattens a component tree into formatting runs and
//!   writes them back out as markdown.
//! - [`DiscordEscapingRenderer`] rewrites markdown so that Discord shows it
//!   literally.
//!
//! The two directions share the markdown vocabulary but are not exact
//! inverses of each other.
//!
//! # Example
//!
//! ```
//! use reserializer_core::{DiscordSerializer, MinecraftSerializer};
//!
//! # fn main() -> Result<(), reserializer_common::ReserializerError> {
//! let component = MinecraftSerializer::default().serialize("**bold** text")?;
//! let markdown = DiscordSerializer::default().serialize(&component);
//! assert_eq!(markdown, "**bold**\u{200B} text");
//! # Ok(())
//! # }
//! ```

pub mod discord;
pub mod escaping;
pub mod minecraft;

pub use discord::{DiscordSerializer, DiscordSerializerOptions, TextRun};
pub use escaping::DiscordEscapingRenderer;
pub use minecraft::{
    DefaultMinecraftRenderer, MinecraftSerializer, MinecraftSerializerOptions, NodeRenderer,
    QUOTE_MARKER, RenderContext, SharedRenderer,
};
