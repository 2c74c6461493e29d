//! Minecraft components to Discord markdown.
//!
//! Serialization runs in two phases. The component tree is first flattened
//! into [`TextRun`]s, merging neighbours that share their formatting. The
//! runs are then written out with their markdown delimiters, separated by a
//! zero width space so adjacent delimiters never fuse.

mod options;
mod run;

pub use options::{DiscordSerializerOptions, KeybindProvider, TranslationProvider};
pub use run::{RunAccumulator, TextRun};

use reserializer_component::{ClickEvent, Component, ComponentContent, Decoration, HoverEvent};
use reserializer_markdown::{ends_with_url, escape_outside_urls};
use url::Url;

/// Separator written after every run.
pub const RUN_SEPARATOR: char = '\u{200B}';

/// Serializer from components to Discord markdown.
#[derive(Debug, Clone, Default)]
pub struct DiscordSerializer {
    options: DiscordSerializerOptions,
}

impl DiscordSerializer {
    /// Create a serializer using `options` by default.
    #[must_use]
    pub const fn new(options: DiscordSerializerOptions) -> Self {
        Self { options }
    }

    /// The options used by [`DiscordSerializer::serialize`].
    #[must_use]
    pub const fn options(&self) -> &DiscordSerializerOptions {
        &self.options
    }

    /// Serialize a component with this serializer's options.
    #[must_use]
    pub fn serialize(&self, component: &Component) -> String {
        self.serialize_with(component, &self.options)
    }

    /// Serialize a component with explicit options.
    #[must_use]
    pub fn serialize_with(
        &self,
        component: &Component,
        options: &DiscordSerializerOptions,
    ) -> String {
        let runs = flatten(component, options);
        let markdown = render_runs(&runs, options);

        tracing::trace!(
            runs = runs.len(),
            output_len = markdown.len(),
            "Serialized component to markdown"
        );
        markdown
    }
}

/// Flatten a component tree into formatting runs.
#[must_use]
pub fn flatten(component: &Component, options: &DiscordSerializerOptions) -> Vec<TextRun> {
    let mut runs = RunAccumulator::new();
    collect_runs(component, &TextRun::default(), options, &mut runs);
    runs.finish()
}

fn collect_runs(
    component: &Component,
    inherited: &TextRun,
    options: &DiscordSerializerOptions,
    runs: &mut RunAccumulator,
) {
    let mut run = TextRun {
        content: resolve_content(component, options),
        bold: component.decoration(Decoration::Bold).resolve(inherited.bold),
        strikethrough: component
            .decoration(Decoration::Strikethrough)
            .resolve(inherited.strikethrough),
        underline: component
            .decoration(Decoration::Underlined)
            .resolve(inherited.underline),
        italic: component.decoration(Decoration::Italic).resolve(inherited.italic),
        open_url: inherited.open_url.clone(),
        url_hover_text: inherited.url_hover_text.clone(),
    };

    if options.masked_links() {
        if let Some(url) = component.click_event().and_then(ClickEvent::url) {
            if is_web_url(url) {
                run.open_url = Some(url.to_string());
                run.url_hover_text = component.hover_event().map(|hover| match hover {
                    HoverEvent::ShowText(text) => text.plain_text(),
                });
            }
        }
    }

    let style = run.style_only();
    runs.push(run);
    for child in component.children() {
        collect_runs(child, &style, options, runs);
    }
}

fn resolve_content(component: &Component, options: &DiscordSerializerOptions) -> String {
    match component.content() {
        ComponentContent::Text { text } => text.clone(),
        ComponentContent::Keybind { keybind } => options.resolve_keybind(keybind),
        ComponentContent::Translatable { translate, with } => {
            options.resolve_translation(translate, with)
        }
        ComponentContent::Score { score } => score.value.clone().unwrap_or_default(),
        ComponentContent::Selector { selector } => selector.clone(),
    }
}

fn is_web_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Write runs as markdown.
#[must_use]
pub fn render_runs(runs: &[TextRun], options: &DiscordSerializerOptions) -> String {
    let mut out = String::new();
    let mut previous_plain: Option<&str> = None;

    for run in runs {
        let text = match (&run.open_url, run.content.is_empty()) {
            (_, false) => run.content.as_str(),
            (Some(url), true) => url.as_str(),
            (None, true) => continue,
        };

        let mut delimiters = Vec::with_capacity(4);
        if run.bold {
            delimiters.push("**");
        }
        if run.strikethrough {
            delimiters.push("~~");
        }
        if run.italic {
            delimiters.push("_");
        }
        if run.underline {
            delimiters.push("__");
        }

        for delimiter in &delimiters {
            out.push_str(delimiter);
        }

        match &run.open_url {
            Some(url) => {
                let label = if options.escape_markdown() {
                    escape_outside_urls(text, false)
                } else {
                    text.to_string()
                };
                out.push('[');
                out.push_str(&label);
                out.push_str("](<");
                out.push_str(url);
                out.push('>');
                if let Some(hover) = &run.url_hover_text {
                    out.push_str(" \"");
                    out.push_str(&hover.replace('"', "\\\""));
                    out.push('"');
                }
                out.push(')');
                previous_plain = None;
            }
            None => {
                if options.escape_markdown() {
                    let continues_url = previous_plain.is_some_and(ends_with_url);
                    out.push_str(&escape_outside_urls(text, continues_url));
                } else {
                    out.push_str(text);
                }
                previous_plain = Some(text);
            }
        }

        for delimiter in delimiters.iter().rev() {
            out.push_str(delimiter);
        }
        out.push(RUN_SEPARATOR);
    }

    if out.ends_with(RUN_SEPARATOR) {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use reserializer_component::{Score, TriState};

    use super::*;

    fn serialize(component: &Component) -> String {
        DiscordSerializer::default().serialize(component)
    }

    fn masked() -> DiscordSerializerOptions {
        DiscordSerializerOptions::defaults().with_masked_links(true)
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(serialize(&Component::text("hello")), "hello");
        assert_eq!(serialize(&Component::empty()), "");
    }

    #[test]
    fn test_decorations_inherit() {
        let component = Component::text("A")
            .decorate(Decoration::Bold)
            .append(Component::text("B"));
        assert_eq!(serialize(&component), "**AB**");
    }

    #[test]
    fn test_explicit_false_overrides_parent() {
        let component = Component::text("A")
            .decorate(Decoration::Bold)
            .append(Component::text("B").with_decoration(
                Decoration::Bold,
                TriState::False,
            ));
        assert_eq!(serialize(&component), "**A**\u{200B}B");
    }

    #[test]
    fn test_delimiter_order() {
        let component = Component::text("x")
            .decorate(Decoration::Bold)
            .decorate(Decoration::Strikethrough)
            .decorate(Decoration::Italic)
            .decorate(Decoration::Underlined);
        assert_eq!(serialize(&component), "**~~___x___~~**");
    }

    #[test]
    fn test_content_kinds() {
        let component = Component::empty().with_children(vec![
            Component::keybind("key.jump"),
            Component::text(" "),
            Component::translatable("chat.type.text"),
            Component::text(" "),
            Component::score("player", "kills", Some("7".to_string())),
            Component::text(" "),
            Component::selector("@p"),
        ]);
        let options = DiscordSerializerOptions::defaults()
            .with_keybind_provider(|_| "Space".to_string())
            .with_translation_provider(|key, _| key.replace('.', " "));
        assert_eq!(
            DiscordSerializer::default().serialize_with(&component, &options),
            "Space chat type text 7 @p"
        );
    }

    #[test]
    fn test_unresolved_score_is_empty() {
        let component = Component::empty().with_content(ComponentContent::Score {
            score: Score {
                name: "p".into(),
                objective: "o".into(),
                value: None,
            },
        });
        assert_eq!(serialize(&component), "");
    }

    #[test]
    fn test_links_ignored_without_masking() {
        let component =
            Component::text("site").with_click_event(ClickEvent::open_url("https://example.com"));
        assert_eq!(serialize(&component), "site");
    }

    #[test]
    fn test_non_web_urls_are_not_masked() {
        let component =
            Component::text("file").with_click_event(ClickEvent::open_url("file:///etc/passwd"));
        let serializer = DiscordSerializer::new(masked());
        assert_eq!(serializer.serialize(&component), "file");
    }

    #[test]
    fn test_link_without_text_uses_url() {
        let component =
            Component::empty().with_click_event(ClickEvent::open_url("https://example.com"));
        let serializer = DiscordSerializer::new(masked());
        assert_eq!(
            serializer.serialize(&component),
            "[https://example.com](<https://example.com>)"
        );
    }

    #[test]
    fn test_hover_quotes_are_escaped() {
        let component = Component::text("a")
            .with_click_event(ClickEvent::open_url("https://example.com"))
            .with_hover_event(HoverEvent::show_text(Component::text("say \"hi\"")));
        let serializer = DiscordSerializer::new(masked());
        assert_eq!(
            serializer.serialize(&component),
            r#"[a](<https://example.com> "say \"hi\"")"#
        );
    }

    #[test]
    fn test_url_split_across_runs_is_not_escaped() {
        let component = Component::text("see https://example.com/a")
            .append(Component::text("_b c_").decorate(Decoration::Bold));
        assert_eq!(
            serialize(&component),
            "see https://example.com/a\u{200B}**_b c\\_**"
        );
    }

    #[test]
    fn test_no_escaping_when_disabled() {
        let options = DiscordSerializerOptions::defaults().with_escape_markdown(false);
        let output =
            DiscordSerializer::default().serialize_with(&Component::text("*raw*"), &options);
        assert_eq!(output, "*raw*");
    }
}
