//! Formatting runs collected while flattening a component tree.

/// A piece of text with the formatting it is shown with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextRun {
    /// Resolved text.
    pub content: String,
    /// Bold.
    pub bold: bool,
    /// Struck through.
    pub strikethrough: bool,
    /// Underlined.
    pub underline: bool,
    /// Italic.
    pub italic: bool,
    /// Masked link target.
    pub open_url: Option<String>,
    /// Hover text of the masked link.
    pub url_hover_text: Option<String>,
}

impl TextRun {
    /// Returns whether both runs render with the same delimiters and link.
    #[must_use]
    pub fn formatting_matches(&self, other: &Self) -> bool {
        self.bold == other.bold
            && self.strikethrough == other.strikethrough
            && self.underline == other.underline
            && self.italic == other.italic
            && self.open_url == other.open_url
            && self.url_hover_text == other.url_hover_text
    }

    /// A run with the same formatting and no content.
    #[must_use]
    pub fn style_only(&self) -> Self {
        Self {
            content: String::new(),
            bold: self.bold,
            strikethrough: self.strikethrough,
            underline: self.underline,
            italic: self.italic,
            open_url: self.open_url.clone(),
            url_hover_text: self.url_hover_text.clone(),
        }
    }
}

/// Collects runs, merging neighbours with equal formatting.
#[derive(Debug, Default)]
pub struct RunAccumulator {
    runs: Vec<TextRun>,
    current: Option<TextRun>,
}

impl RunAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a run.
    ///
    /// Empty content is dropped unless it carries a link. A pending empty
    /// link run is replaced by the next run for the same link.
    pub fn push(&mut self, run: TextRun) {
        if run.content.is_empty() && run.open_url.is_none() {
            return;
        }

        if let Some(current) = self.current.as_mut() {
            if current.formatting_matches(&run) {
                current.content.push_str(&run.content);
                return;
            }
        }

        if let Some(previous) = self.current.replace(run) {
            let superseded = previous.content.is_empty()
                && self
                    .current
                    .as_ref()
                    .is_some_and(|next| next.open_url == previous.open_url);
            if !superseded {
                self.runs.push(previous);
            }
        }
    }

    /// The collected runs, in order.
    #[must_use]
    pub fn finish(mut self) -> Vec<TextRun> {
        self.runs.extend(self.current.take());
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(content: &str) -> TextRun {
        TextRun {
            content: content.to_string(),
            bold: true,
            ..TextRun::default()
        }
    }

    fn link(content: &str, url: &str) -> TextRun {
        TextRun {
            content: content.to_string(),
            open_url: Some(url.to_string()),
            ..TextRun::default()
        }
    }

    #[test]
    fn test_equal_formatting_merges() {
        let mut runs = RunAccumulator::new();
        runs.push(bold("A"));
        runs.push(bold("B"));
        assert_eq!(runs.finish(), vec![bold("AB")]);
    }

    #[test]
    fn test_formatting_change_splits() {
        let mut runs = RunAccumulator::new();
        runs.push(bold("A"));
        runs.push(TextRun {
            content: "B".into(),
            ..TextRun::default()
        });
        runs.push(bold("C"));
        assert_eq!(runs.finish().len(), 3);
    }

    #[test]
    fn test_empty_content_is_dropped() {
        let mut runs = RunAccumulator::new();
        runs.push(bold(""));
        runs.push(TextRun::default());
        assert!(runs.finish().is_empty());
    }

    #[test]
    fn test_empty_link_run_is_superseded() {
        let mut runs = RunAccumulator::new();
        runs.push(link("", "https://example.com"));
        runs.push(TextRun {
            bold: true,
            ..link("site", "https://example.com")
        });
        let runs = runs.finish();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].content, "site");
    }

    #[test]
    fn test_lone_empty_link_run_is_kept() {
        let mut runs = RunAccumulator::new();
        runs.push(link("", "https://example.com"));
        assert_eq!(runs.finish(), vec![link("", "https://example.com")]);
    }

    #[test]
    fn test_style_only_keeps_link() {
        let run = TextRun {
            italic: true,
            ..link("x", "https://example.com")
        };
        let style = run.style_only();
        assert!(style.content.is_empty());
        assert!(style.formatting_matches(&run));
    }
}
