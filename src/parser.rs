//! Line parser: raw transcript lines -> flat argument records.
//!
//! Transcript bodies interleave stance-marked argument lines
//! (`1.2.1. Con: ...`) with bare continuation lines when an argument
//! wraps; continuations are joined onto the preceding argument before
//! any token extraction happens.

use regex::Regex;
use tracing::{debug, instrument};

use crate::arena::{Argument, Stance};
use crate::errors::{MinerError, MinerResult};

pub struct LineParser {
    position_regex: Regex,
    stance_regex: Regex,
    content_regex: Regex,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    pub fn new() -> Self {
        Self {
            position_regex: Regex::new(r"^(\d+\.)+").unwrap(),
            stance_regex: Regex::new(r"(Con|Pro):").unwrap(),
            content_regex: Regex::new(r"(Con|Pro):\s(.*)").unwrap(),
        }
    }

    /// Joins continuation lines (no stance marker) onto the most recent
    /// stance-marked line, space-separated.
    pub fn group_continuations(&self, lines: &[String]) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for line in lines {
            match groups.last_mut() {
                Some(group) if !self.stance_regex.is_match(line) => {
                    group.push(' ');
                    group.push_str(line);
                }
                _ => groups.push(line.clone()),
            }
        }
        groups
    }

    /// Parses transcript body lines into argument records, in document order.
    ///
    /// The thesis line (path `"1."`, no stance) is dropped; the tree builder
    /// inserts a synthetic root in its place. Any other line without a
    /// position path and stance marker poisons the whole transcript.
    #[instrument(level = "debug", skip(self, lines))]
    pub fn parse(&self, lines: &[String], subject: &str) -> MinerResult<Vec<Argument>> {
        let id_prefix = subject.replace(' ', "_");
        let mut records = Vec::new();
        let mut counter = 1usize;

        for group in self.group_continuations(lines) {
            let position = self
                .position_regex
                .find(&group)
                .ok_or_else(|| MinerError::MalformedLine(group.clone()))?;
            let path = position.as_str().to_string();

            let Some(caps) = self.content_regex.captures(&group) else {
                if path == "1." {
                    // thesis line, represented by the synthetic root
                    debug!(%path, "skipping stance-less thesis line");
                    continue;
                }
                return Err(MinerError::MalformedLine(group));
            };

            let stance = match &caps[1] {
                "Con" => Stance::Con,
                _ => Stance::Pro,
            };
            let text = caps[2].trim().to_string();
            let level = segment_count(&path) - 1;

            records.push(Argument {
                path,
                level,
                stance: Some(stance),
                text: Some(text),
                node_id: format!("{id_prefix}_{counter}"),
            });
            counter += 1;
        }

        Ok(records)
    }
}

/// Number of `digit.` groups in a position path (`"1.2.3."` -> 3).
pub fn segment_count(path: &str) -> usize {
    path.split('.').filter(|s| !s.is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_wrapped_argument_when_grouping_then_continuations_joined() {
        let parser = LineParser::new();
        let grouped = parser.group_continuations(&lines(&[
            "1.1. Pro: First part",
            "second part",
            "1.2. Con: Next argument",
        ]));
        assert_eq!(
            grouped,
            vec!["1.1. Pro: First part second part", "1.2. Con: Next argument"]
        );
    }

    #[test]
    fn given_body_lines_when_parsing_then_records_carry_path_stance_text() {
        let parser = LineParser::new();
        let records = parser
            .parse(
                &lines(&[
                    "1. Should cats rule?",
                    "1.1. Pro: Cats are wise",
                    "1.1.1. Con: Cats sleep all day",
                ]),
                "Should cats rule?",
            )
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, "1.1.");
        assert_eq!(records[0].level, 1);
        assert_eq!(records[0].stance, Some(Stance::Pro));
        assert_eq!(records[0].text.as_deref(), Some("Cats are wise"));
        assert_eq!(records[0].node_id, "Should_cats_rule?_1");
        assert_eq!(records[1].path, "1.1.1.");
        assert_eq!(records[1].level, 2);
        assert_eq!(records[1].stance, Some(Stance::Con));
        assert_eq!(records[1].node_id, "Should_cats_rule?_2");
    }

    #[test]
    fn given_line_without_position_path_when_parsing_then_malformed_line() {
        let parser = LineParser::new();
        let result = parser.parse(&lines(&["Pro: floating argument"]), "s");
        assert!(matches!(result, Err(MinerError::MalformedLine(_))));
    }

    #[test]
    fn given_deep_line_without_stance_when_parsing_then_malformed_line() {
        let parser = LineParser::new();
        let result = parser.parse(&lines(&["1.2. just some text"]), "s");
        assert!(matches!(result, Err(MinerError::MalformedLine(_))));
    }

    #[test]
    fn given_multiline_argument_when_parsing_then_text_is_joined() {
        let parser = LineParser::new();
        let records = parser
            .parse(
                &lines(&["1.1. Pro: Part one", "and part two", "spanning three lines"]),
                "s",
            )
            .unwrap();
        assert_eq!(
            records[0].text.as_deref(),
            Some("Part one and part two spanning three lines")
        );
    }

    #[test]
    fn given_level_derived_from_path_when_parsing_then_matches_segment_count() {
        let parser = LineParser::new();
        let records = parser
            .parse(&lines(&["1.3.2.4. Con: Deep claim"]), "s")
            .unwrap();
        assert_eq!(records[0].level, segment_count("1.3.2.4.") - 1);
        assert_eq!(records[0].level, 3);
    }
}
