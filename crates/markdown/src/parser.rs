//! Markdown parser driving a [`RuleSet`].

use std::ops::Range;

use reserializer_common::{ReserializerError, ReserializerResult};

use crate::node::{Node, merge_text_nodes};
use crate::rule::{MatchContext, ParseSpec, ParseState, RuleSet};

/// Parse markdown into an AST.
///
/// At every position the rules are tried in order and the first match wins.
/// Non-terminal matches parse their inner span again with the same rules and
/// the state the rule returned. Adjacent text nodes are merged before
/// returning.
///
/// With `debug` set, every rule application is traced at debug level.
pub fn parse(
    input: &str,
    state: ParseState,
    rules: &RuleSet,
    debug: bool,
) -> ReserializerResult<Vec<Node>> {
    let nodes = parse_span(input, 0..input.len(), state, rules, debug)?;
    let nodes = merge_text_nodes(nodes);

    if debug {
        tracing::debug!(
            input_len = input.len(),
            nodes = nodes.len(),
            in_quote = state.in_quote,
            "Parsed markdown"
        );
    }

    Ok(nodes)
}

fn parse_span(
    source: &str,
    span: Range<usize>,
    mut state: ParseState,
    rules: &RuleSet,
    debug: bool,
) -> ReserializerResult<Vec<Node>> {
    let mut nodes = Vec::new();
    let mut position = span.start;

    while position < span.end {
        let context = MatchContext::new(source, position, span.end, state);
        let (rule, captures) = rules
            .iter()
            .find_map(|rule| rule.try_match(&context).map(|captures| (rule, captures)))
            .ok_or(ReserializerError::NoRuleMatched(position))?;

        let matched = captures.get(0).map_or(0, |m| m.end());
        let spec = rule.parse(&captures, state);
        let consumed = spec.consumed();

        if consumed == 0 {
            return Err(ReserializerError::ZeroLengthMatch {
                rule: rule.name().to_string(),
                offset: position,
            });
        }
        if consumed > matched || !source.is_char_boundary(position + consumed) {
            return Err(ReserializerError::Parse(format!(
                "rule `{}` consumed {consumed} bytes of a {matched} byte match at offset {position}",
                rule.name()
            )));
        }

        if debug {
            tracing::debug!(
                rule = rule.name(),
                offset = position,
                consumed,
                "Applied rule"
            );
        }

        match spec {
            ParseSpec::Terminal {
                node,
                state: next,
                ..
            } => {
                nodes.push(node);
                state = next;
            }
            ParseSpec::NonTerminal {
                styles,
                state: inner_state,
                inner,
                ..
            } => {
                if inner.start > inner.end
                    || inner.end > matched
                    || !source.is_char_boundary(position + inner.start)
                    || !source.is_char_boundary(position + inner.end)
                {
                    return Err(ReserializerError::Parse(format!(
                        "rule `{}` returned inner span {inner:?} outside its {matched} byte match",
                        rule.name()
                    )));
                }
                let inner = position + inner.start..position + inner.end;
                let children = parse_span(source, inner, inner_state, rules, debug)?;
                nodes.push(Node::Style { styles, children });
            }
        }

        position += consumed;
    }

    Ok(nodes)
}
