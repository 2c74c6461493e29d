//! Node renderers for the markdown to component direction.
//!
//! Every AST node is rendered by the first registered [`NodeRenderer`] that
//! accepts it, falling back to [`DefaultMinecraftRenderer`]. The same chain is
//! consulted once more after the children have been appended.

use std::sync::Arc;

use reserializer_common::{ReserializerError, ReserializerResult};
use reserializer_component::{
    ClickEvent, Component, ComponentContent, Decoration, HoverEvent, NamedColor,
};
use reserializer_markdown::{Node, ParseState, Style, parse};

use super::options::MinecraftSerializerOptions;

/// Text of the marker written in front of every quoted line.
pub const QUOTE_MARKER: &str = "| ";

/// Trait for turning AST nodes into components.
///
/// Returning `Ok(None)` passes the node on to the next renderer in the chain.
pub trait NodeRenderer: Send + Sync {
    /// Unique name used to register and remove the renderer.
    fn name(&self) -> &str;

    /// Render `node` on top of the empty component `base`.
    ///
    /// Children of the node are appended by the caller afterwards.
    fn render(
        &self,
        base: &Component,
        node: &Node,
        context: &RenderContext<'_>,
    ) -> ReserializerResult<Option<Component>>;

    /// Post-process `component` once the node's children were appended.
    fn render_after_children(
        &self,
        _component: &Component,
        _node: &Node,
        _context: &RenderContext<'_>,
    ) -> ReserializerResult<Option<Component>> {
        Ok(None)
    }
}

/// Shared renderer handle stored in the options.
pub type SharedRenderer = Arc<dyn NodeRenderer>;

/// Access to the running serialization, handed to every renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    options: &'a MinecraftSerializerOptions,
    state: ParseState,
}

impl<'a> RenderContext<'a> {
    /// Create a context rendering with `options`.
    #[must_use]
    pub const fn new(options: &'a MinecraftSerializerOptions) -> Self {
        Self {
            options,
            state: ParseState { in_quote: false },
        }
    }

    /// The options of the running serialization.
    #[must_use]
    pub const fn options(&self) -> &'a MinecraftSerializerOptions {
        self.options
    }

    /// The parse state the rendered nodes were parsed under.
    #[must_use]
    pub const fn state(&self) -> ParseState {
        self.state
    }

    /// Render a node and its children.
    pub fn render(&self, node: &Node) -> ReserializerResult<Component> {
        let base = Component::empty();
        let mut component = self.render_node(&base, node)?;

        let mut children = node.children();
        if let [Node::Text { content }, rest @ ..] = children {
            if component.is_empty() {
                component = component.with_content(ComponentContent::Text {
                    text: content.clone(),
                });
                children = rest;
            }
        }
        for child in children {
            component.push(self.render(child)?);
        }

        self.render_after_children(component, node)
    }

    /// Parse `markdown` with the options' rules and render the result.
    ///
    /// The nodes are rendered under `state`, so nested raw content is parsed
    /// with it again. A single top-level component is returned as is; several are wrapped as
    /// the children of an empty component.
    pub fn render_markdown(
        &self,
        markdown: &str,
        state: ParseState,
    ) -> ReserializerResult<Component> {
        let nodes = parse(markdown, state, self.options.rules(), self.options.debug())?;
        let context = Self {
            options: self.options,
            state,
        };
        context.render_nodes(&nodes)
    }

    fn render_nodes(&self, nodes: &[Node]) -> ReserializerResult<Component> {
        let mut components = nodes
            .iter()
            .map(|node| self.render(node))
            .collect::<ReserializerResult<Vec<_>>>()?;

        if components.len() == 1 {
            if let Some(only) = components.pop() {
                return Ok(only);
            }
        }
        Ok(Component::empty().with_children(components))
    }

    fn render_node(&self, base: &Component, node: &Node) -> ReserializerResult<Component> {
        for renderer in self.options.renderers() {
            if let Some(component) = renderer.render(base, node, self)? {
                tracing::trace!(
                    renderer = renderer.name(),
                    node = node.type_name(),
                    "Node rendered by custom renderer"
                );
                return Ok(component);
            }
        }

        DefaultMinecraftRenderer
            .render(base, node, self)?
            .ok_or_else(|| {
                ReserializerError::Configuration(format!(
                    "default renderer declined a {} node",
                    node.type_name()
                ))
            })
    }

    fn render_after_children(
        &self,
        component: Component,
        node: &Node,
    ) -> ReserializerResult<Component> {
        for renderer in self.options.renderers() {
            if let Some(finished) = renderer.render_after_children(&component, node, self)? {
                return Ok(finished);
            }
        }

        Ok(DefaultMinecraftRenderer
            .render_after_children(&component, node, self)?
            .unwrap_or(component))
    }
}

/// The built-in renderer, always consulted last.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMinecraftRenderer;

impl DefaultMinecraftRenderer {
    /// Reserved renderer name.
    pub const NAME: &'static str = "default";
}

impl NodeRenderer for DefaultMinecraftRenderer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn render(
        &self,
        base: &Component,
        node: &Node,
        context: &RenderContext<'_>,
    ) -> ReserializerResult<Option<Component>> {
        match node {
            Node::Text { content } => Ok(Some(base.clone().with_content(
                ComponentContent::Text {
                    text: content.clone(),
                },
            ))),
            Node::Style { styles, .. } => {
                let mut component = base.clone();
                for style in styles {
                    component = apply_style(component, style, context)?;
                }
                Ok(Some(component))
            }
        }
    }

    fn render_after_children(
        &self,
        component: &Component,
        node: &Node,
        _context: &RenderContext<'_>,
    ) -> ReserializerResult<Option<Component>> {
        let is_quote = node
            .styles()
            .iter()
            .any(|style| matches!(style, Style::Quote { .. }));
        if !is_quote {
            return Ok(None);
        }

        let line_break = Component::text("\n").append(quote_marker());
        Ok(Some(component.replace_text("\n", &line_break)))
    }
}

fn apply_style(
    component: Component,
    style: &Style,
    context: &RenderContext<'_>,
) -> ReserializerResult<Component> {
    let component = match style {
        Style::Bold => component.decorate(Decoration::Bold),
        Style::Italic { .. } => component.decorate(Decoration::Italic),
        Style::Underline => component.decorate(Decoration::Underlined),
        Style::Strikethrough => component.decorate(Decoration::Strikethrough),
        Style::CodeInline | Style::CodeBlock { .. } => component.with_color(NamedColor::DarkGray),
        Style::Link { url } => component.append(
            Component::text(url.clone()).with_click_event(ClickEvent::open_url(url.clone())),
        ),
        Style::Spoiler { raw_content } => {
            let content = context.render_markdown(raw_content, context.state())?;
            let hidden = content
                .clone()
                .decorate(Decoration::Obfuscated)
                .with_color(NamedColor::DarkGray)
                .with_hover_event(HoverEvent::show_text(content));
            component.append(hidden)
        }
        Style::Quote { raw_content } => {
            let content = context.render_markdown(raw_content, ParseState::quoted())?;
            component.append(quote_marker()).append(content)
        }
        Style::Mention { kind, id } => component.append(Component::text(kind.markdown(id))),
        Style::Emoji { name, .. } => component.append(Component::text(format!(":{name}:"))),
    };
    Ok(component)
}

fn quote_marker() -> Component {
    Component::text(QUOTE_MARKER)
        .decorate(Decoration::Bold)
        .with_color(NamedColor::DarkGray)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reserializer_markdown::MentionKind;

    use super::*;

    fn render(node: &Node) -> Component {
        let options = MinecraftSerializerOptions::defaults();
        RenderContext::new(&options).render(node).unwrap()
    }

    #[test]
    fn test_first_text_child_is_folded() {
        let component = render(&Node::styled_text(Style::Bold, "bold"));
        assert_eq!(component, Component::text("bold").decorate(Decoration::Bold));
    }

    #[test]
    fn test_stacked_styles() {
        let node = Node::Style {
            styles: vec![Style::Bold, Style::Underline],
            children: vec![Node::text("x")],
        };
        let component = render(&node);
        assert_eq!(
            component,
            Component::text("x")
                .decorate(Decoration::Bold)
                .decorate(Decoration::Underlined)
        );
    }

    #[test]
    fn test_code_is_dark_gray() {
        let component = render(&Node::styled_text(Style::CodeInline, "**raw**"));
        assert_eq!(component.color(), Some(NamedColor::DarkGray));
        assert_eq!(component.text_content(), Some("**raw**"));
    }

    #[test]
    fn test_link_child_opens_url() {
        let component = render(&Node::styled(Style::Link {
            url: "https://example.com".into(),
        }));
        let link = &component.children()[0];
        assert_eq!(link.text_content(), Some("https://example.com"));
        assert_eq!(
            link.click_event().and_then(ClickEvent::url),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_mentions_and_emoji() {
        let role = render(&Node::styled(Style::Mention {
            kind: MentionKind::Role,
            id: "1".into(),
        }));
        assert_eq!(role.plain_text(), "<@&1>");

        let emoji = render(&Node::styled(Style::Emoji {
            id: "2".into(),
            name: "wave".into(),
        }));
        assert_eq!(emoji.plain_text(), ":wave:");
    }

    #[test]
    fn test_spoiler_is_obfuscated_with_hover() {
        let component = render(&Node::styled(Style::Spoiler {
            raw_content: "secret".into(),
        }));
        let hidden = &component.children()[0];
        assert_eq!(hidden.decoration(Decoration::Obfuscated), reserializer_component::TriState::True);
        assert_eq!(hidden.color(), Some(NamedColor::DarkGray));
        assert_eq!(
            hidden.hover_event(),
            Some(&HoverEvent::show_text(Component::text("secret")))
        );
    }

    #[test]
    fn test_quote_prefixes_every_line() {
        let component = render(&Node::styled(Style::Quote {
            raw_content: "one\ntwo\nthree".into(),
        }));
        assert_eq!(component.plain_text(), "| one\n| two\n| three");
    }

    #[test]
    fn test_spoiler_keeps_quote_state() {
        let options = MinecraftSerializerOptions::defaults();
        let context = RenderContext::new(&options);
        assert_eq!(context.state(), ParseState::default());

        let component = context
            .render_markdown("||> inner||", ParseState::quoted())
            .unwrap();
        let hidden = &component.children()[0];
        assert_eq!(hidden.plain_text(), "> inner");
        assert_eq!(
            hidden.hover_event(),
            Some(&HoverEvent::show_text(Component::text("> inner")))
        );
    }
}
