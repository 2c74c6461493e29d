//! Parse rules and the state threaded through them.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use regex::{Captures, Regex};
use reserializer_common::{ReserializerError, ReserializerResult};

use crate::node::Node;
use crate::style::Style;

/// State carried through a parse.
///
/// Passed by value into every rule and every recursive parse, so a nested
/// span can never change what its siblings see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ParseState {
    /// Inside the content of a quote; quotes do not nest.
    pub in_quote: bool,
}

impl ParseState {
    /// A state for parsing the content of a quote.
    #[must_use]
    pub const fn quoted() -> Self {
        Self { in_quote: true }
    }
}

/// Outcome of a successful rule match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseSpec {
    /// The node is complete.
    Terminal {
        /// The produced node.
        node: Node,
        /// State for the rest of the input.
        state: ParseState,
        /// Bytes the cursor advances.
        consumed: usize,
    },
    /// A style node whose children come from parsing `inner` again.
    NonTerminal {
        /// Styles of the produced node.
        styles: Vec<Style>,
        /// State for parsing `inner`.
        state: ParseState,
        /// Bytes the cursor advances.
        consumed: usize,
        /// Span to parse for the children, relative to the match start.
        inner: Range<usize>,
    },
}

impl ParseSpec {
    /// A finished node.
    #[must_use]
    pub const fn terminal(node: Node, state: ParseState, consumed: usize) -> Self {
        Self::Terminal {
            node,
            state,
            consumed,
        }
    }

    /// A style node whose children are parsed from `inner`.
    #[must_use]
    pub const fn non_terminal(
        styles: Vec<Style>,
        state: ParseState,
        consumed: usize,
        inner: Range<usize>,
    ) -> Self {
        Self::NonTerminal {
            styles,
            state,
            consumed,
            inner,
        }
    }

    /// Bytes the cursor advances.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        match self {
            Self::Terminal { consumed, .. } | Self::NonTerminal { consumed, .. } => *consumed,
        }
    }
}

/// Where in the input a rule is being tried.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'s> {
    source: &'s str,
    position: usize,
    end: usize,
    state: ParseState,
}

impl<'s> MatchContext<'s> {
    /// A context at `position` in `source`, limited to `..end`.
    #[must_use]
    pub const fn new(source: &'s str, position: usize, end: usize, state: ParseState) -> Self {
        Self {
            source,
            position,
            end,
            state,
        }
    }

    /// The input a rule may match against.
    #[must_use]
    pub fn remaining(&self) -> &'s str {
        &self.source[self.position..self.end]
    }

    /// The character before the cursor, looking past the current span.
    #[must_use]
    pub fn previous_char(&self) -> Option<char> {
        self.source[..self.position].chars().next_back()
    }

    /// Returns whether the cursor is at the start of a line.
    #[must_use]
    pub fn at_line_start(&self) -> bool {
        self.previous_char().is_none_or(|c| c == '\n')
    }

    /// Byte offset of the cursor in the source.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Current parse state.
    #[must_use]
    pub const fn state(&self) -> ParseState {
        self.state
    }
}

type ParseFn = dyn Fn(&Captures<'_>, ParseState) -> ParseSpec + Send + Sync;
type GuardFn = dyn Fn(&MatchContext<'_>) -> bool + Send + Sync;

/// A pattern paired with the node it produces.
///
/// Patterns are matched against the remaining input and only count when the
/// match starts at the cursor, so they should begin with `\A`.
#[derive(Clone)]
pub struct Rule {
    name: String,
    pattern: Regex,
    parse: Arc<ParseFn>,
    guard: Option<Arc<GuardFn>>,
    block: bool,
    catch_all: bool,
}

impl Rule {
    /// Create a rule from a compiled pattern.
    pub fn new<F>(name: impl Into<String>, pattern: Regex, parse: F) -> Self
    where
        F: Fn(&Captures<'_>, ParseState) -> ParseSpec + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            pattern,
            parse: Arc::new(parse),
            guard: None,
            block: false,
            catch_all: false,
        }
    }

    /// Create a rule from a pattern string, anchoring it at the cursor.
    pub fn from_pattern<F>(name: impl Into<String>, pattern: &str, parse: F) -> ReserializerResult<Self>
    where
        F: Fn(&Captures<'_>, ParseState) -> ParseSpec + Send + Sync + 'static,
    {
        let name = name.into();
        let pattern = Regex::new(&format!(r"\A(?:{pattern})")).map_err(|e| {
            ReserializerError::Configuration(format!("invalid pattern for rule `{name}`: {e}"))
        })?;
        Ok(Self::new(name, pattern, parse))
    }

    /// Only match at the start of a line.
    #[must_use]
    pub const fn block(mut self) -> Self {
        self.block = true;
        self
    }

    /// Only match when `guard` accepts the context.
    #[must_use]
    pub fn with_guard<G>(mut self, guard: G) -> Self
    where
        G: Fn(&MatchContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Declare that this rule matches any non-empty input.
    #[must_use]
    pub const fn catch_all(mut self) -> Self {
        self.catch_all = true;
        self
    }

    /// Rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the rule matches any non-empty input.
    #[must_use]
    pub const fn is_catch_all(&self) -> bool {
        self.catch_all
    }

    /// Returns whether the rule only matches at the start of a line.
    #[must_use]
    pub const fn is_block(&self) -> bool {
        self.block
    }

    /// Try the rule at the cursor.
    #[must_use]
    pub fn try_match<'s>(&self, context: &MatchContext<'s>) -> Option<Captures<'s>> {
        if self.block && !context.at_line_start() {
            return None;
        }
        if let Some(guard) = &self.guard {
            if !guard(context) {
                return None;
            }
        }
        let captures = self.pattern.captures(context.remaining())?;
        if captures.get(0)?.start() != 0 {
            return None;
        }
        Some(captures)
    }

    /// Build the result for a match produced by [`Rule::try_match`].
    #[must_use]
    pub fn parse(&self, captures: &Captures<'_>, state: ParseState) -> ParseSpec {
        (self.parse)(captures, state)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("block", &self.block)
            .field("catch_all", &self.catch_all)
            .finish_non_exhaustive()
    }
}

/// An ordered, validated list of rules.
///
/// Order is precedence: the first rule that matches at the cursor wins.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Arc<[Rule]>,
}

impl RuleSet {
    /// Validate and wrap a list of rules.
    ///
    /// At least one rule must be a catch-all, otherwise some input would leave
    /// the parser without a rule to apply.
    pub fn new(rules: Vec<Rule>) -> ReserializerResult<Self> {
        let Some(first_catch_all) = rules.iter().position(Rule::is_catch_all) else {
            return Err(ReserializerError::Configuration(
                "rule set has no catch-all text rule".to_string(),
            ));
        };

        for unreachable in &rules[first_catch_all + 1..] {
            tracing::warn!(
                rule = unreachable.name(),
                catch_all = rules[first_catch_all].name(),
                "Rule listed after a catch-all rule can never match"
            );
        }

        Ok(Self::from_trusted(rules))
    }

    /// Wrap rules known to contain a catch-all.
    pub(crate) fn from_trusted(rules: Vec<Rule>) -> Self {
        Self {
            rules: rules.into(),
        }
    }

    /// The rules, in precedence order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Iterate over the rules in precedence order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns whether the set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns a copy with `rule` inserted before the first catch-all rule.
    #[must_use]
    pub fn with_rule(&self, rule: Rule) -> Self {
        let mut rules = self.rules.to_vec();
        let index = rules
            .iter()
            .position(Rule::is_catch_all)
            .unwrap_or(rules.len());
        rules.insert(index, rule);
        Self::from_trusted(rules)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn literal_rule(name: &str, pattern: &str) -> Rule {
        Rule::from_pattern(name, pattern, |caps, state| {
            let text = caps.get(0).map_or("", |m| m.as_str());
            ParseSpec::terminal(Node::text(text), state, text.len())
        })
        .unwrap()
    }

    #[test]
    fn test_rule_set_requires_catch_all() {
        let result = RuleSet::new(vec![literal_rule("digits", r"\d+")]);
        assert!(matches!(result, Err(ReserializerError::Configuration(_))));

        let rules = RuleSet::new(vec![
            literal_rule("digits", r"\d+"),
            literal_rule("any", r"[\s\S]").catch_all(),
        ])
        .unwrap();
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_from_pattern_anchors() {
        let rule = literal_rule("digits", r"\d+");
        let context = MatchContext::new("ab12", 0, 4, ParseState::default());
        assert!(rule.try_match(&context).is_none());

        let context = MatchContext::new("ab12", 2, 4, ParseState::default());
        let captures = rule.try_match(&context).unwrap();
        assert_eq!(&captures[0], "12");
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        let result = Rule::from_pattern("broken", "(", |_, state| {
            ParseSpec::terminal(Node::text(""), state, 0)
        });
        assert!(matches!(result, Err(ReserializerError::Configuration(_))));
    }

    #[test]
    fn test_block_rule_needs_line_start() {
        let rule = literal_rule("gt", ">").block();
        let source = "a>\n>";
        assert!(rule
            .try_match(&MatchContext::new(source, 1, source.len(), ParseState::default()))
            .is_none());
        assert!(rule
            .try_match(&MatchContext::new(source, 3, source.len(), ParseState::default()))
            .is_some());
    }

    #[test]
    fn test_guard_sees_state() {
        let rule = literal_rule("x", "x").with_guard(|context| !context.state().in_quote);
        assert!(rule
            .try_match(&MatchContext::new("x", 0, 1, ParseState::quoted()))
            .is_none());
        assert!(rule
            .try_match(&MatchContext::new("x", 0, 1, ParseState::default()))
            .is_some());
    }

    #[test]
    fn test_remaining_is_limited_to_span() {
        let context = MatchContext::new("**bold** tail", 2, 6, ParseState::default());
        assert_eq!(context.remaining(), "bold");
        assert_eq!(context.previous_char(), Some('*'));
    }

    #[test]
    fn test_with_rule_inserts_before_catch_all() {
        let rules = RuleSet::new(vec![literal_rule("any", r"[\s\S]").catch_all()]).unwrap();
        let extended = rules.with_rule(literal_rule("digits", r"\d+"));
        let names: Vec<_> = extended.iter().map(Rule::name).collect();
        assert_eq!(names, vec!["digits", "any"]);
    }
}
