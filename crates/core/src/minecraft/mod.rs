//! Discord markdown to Minecraft components.

mod options;
mod renderer;

pub use options::MinecraftSerializerOptions;
pub use renderer::{
    DefaultMinecraftRenderer, NodeRenderer, QUOTE_MARKER, RenderContext, SharedRenderer,
};

use reserializer_common::ReserializerResult;
use reserializer_component::Component;
use reserializer_markdown::ParseState;

/// Serializer from Discord markdown to components.
#[derive(Debug, Clone, Default)]
pub struct MinecraftSerializer {
    options: MinecraftSerializerOptions,
}

impl MinecraftSerializer {
    /// Create a serializer using `options` by default.
    #[must_use]
    pub const fn new(options: MinecraftSerializerOptions) -> Self {
        Self { options }
    }

    /// The options used by [`MinecraftSerializer::serialize`].
    #[must_use]
    pub const fn options(&self) -> &MinecraftSerializerOptions {
        &self.options
    }

    /// Serialize markdown with this serializer's options.
    pub fn serialize(&self, markdown: &str) -> ReserializerResult<Component> {
        self.serialize_with(markdown, &self.options)
    }

    /// Serialize markdown with explicit options.
    pub fn serialize_with(
        &self,
        markdown: &str,
        options: &MinecraftSerializerOptions,
    ) -> ReserializerResult<Component> {
        let component =
            RenderContext::new(options).render_markdown(markdown, ParseState::default())?;

        tracing::trace!(
            input_len = markdown.len(),
            children = component.children().len(),
            "Serialized markdown to component"
        );
        Ok(component)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reserializer_component::{Decoration, NamedColor};

    use super::*;

    fn serialize(markdown: &str) -> Component {
        MinecraftSerializer::default().serialize(markdown).unwrap()
    }

    #[test]
    fn test_single_node_is_returned_directly() {
        assert_eq!(
            serialize("__underline__"),
            Component::text("underline").decorate(Decoration::Underlined)
        );
    }

    #[test]
    fn test_nested_styles() {
        assert_eq!(
            serialize("__underline **bold**__"),
            Component::text("underline ")
                .decorate(Decoration::Underlined)
                .append(Component::text("bold").decorate(Decoration::Bold))
        );
    }

    #[test]
    fn test_strikethrough_with_nested_styles() {
        assert_eq!(
            serialize("~~strikethrough __strikethrough underline__ **strikethrough bold**~~"),
            Component::text("strikethrough ")
                .decorate(Decoration::Strikethrough)
                .append(Component::text("strikethrough underline").decorate(Decoration::Underlined))
                .append(Component::text(" "))
                .append(Component::text("strikethrough bold").decorate(Decoration::Bold))
        );
    }

    #[test]
    fn test_several_nodes_are_wrapped() {
        assert_eq!(
            serialize("plain `code`"),
            Component::empty().with_children(vec![
                Component::text("plain "),
                Component::text("code").with_color(NamedColor::DarkGray),
            ])
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(serialize("").is_empty());
    }

    #[test]
    fn test_serialize_with_rules_override() {
        let options = MinecraftSerializerOptions::defaults().with_rules(
            reserializer_markdown::RuleSet::new(vec![reserializer_markdown::text_rule()]).unwrap(),
        );
        let component = MinecraftSerializer::default()
            .serialize_with("**x**", &options)
            .unwrap();
        assert_eq!(component, Component::text("**x**"));
    }
}
