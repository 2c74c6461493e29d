//! Rich-text chat components.
//!
//! A minimal model of in-game chat components: a tree of content nodes with
//! tri-state decorations, a colour, click and hover events, and children.
//! Components serialize to and from the chat JSON format.
//!
//! # Example
//!
//! ```
//! use reserializer_component::{Component, Decoration};
//!
//! let component = Component::text("Hello ")
//!     .append(Component::text("world").decorate(Decoration::Bold));
//! assert_eq!(component.plain_text(), "Hello world");
//! ```

mod component;
mod event;
mod format;

pub use component::{Component, ComponentContent, Score};
pub use event::{ClickEvent, HoverEvent};
pub use format::{Decoration, NamedColor, TriState};
