//! Fragment rules: what to look for and what to insert.
//!
//! A rule matches
//!
//! ```text
//! <closing_tag><EOL><INDENT><closing_delimiter>
//! ```
//!
//! and rewrites the first occurrence to
//!
//! ```text
//! <closing_tag><EOL><INDENT><marker_indent><marker><EOL><INDENT><closing_delimiter>
//! ```
//!
//! `EOL` is whatever line ending the match used, so CRLF files stay CRLF.
//! `INDENT` is spaces and tabs only: a blank line between the tag and the
//! delimiter is not a match.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PatchError, PatchResult};

/// Closing element tag the fragment is expected to follow.
pub const DEFAULT_CLOSING_TAG: &str = "</button>";
/// Delimiter closing the `{cond && (...)}` expression around the fragment.
pub const DEFAULT_CLOSING_DELIMITER: &str = ")}";
/// The fragment-closing marker.
pub const DEFAULT_MARKER: &str = "</>";
/// Extra indentation of the marker relative to the delimiter line.
pub const DEFAULT_MARKER_INDENT: &str = "  ";

/// Serializable description of a fragment repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentRule {
    /// Closing element tag, matched literally (e.g. `</button>`).
    pub closing_tag: String,
    /// Closing delimiter on the following line, matched literally (e.g. `)}`).
    pub closing_delimiter: String,
    /// Text inserted on its own line (e.g. `</>`).
    pub marker: String,
    /// Spaces/tabs placed between the captured indentation and the marker.
    pub marker_indent: String,
}

impl Default for FragmentRule {
    fn default() -> Self {
        Self {
            closing_tag: DEFAULT_CLOSING_TAG.to_string(),
            closing_delimiter: DEFAULT_CLOSING_DELIMITER.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            marker_indent: DEFAULT_MARKER_INDENT.to_string(),
        }
    }
}

impl FragmentRule {
    pub fn with_closing_tag(mut self, tag: impl Into<String>) -> Self {
        self.closing_tag = tag.into();
        self
    }

    pub fn with_closing_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.closing_delimiter = delimiter.into();
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_marker_indent(mut self, indent: impl Into<String>) -> Self {
        self.marker_indent = indent.into();
        self
    }

    /// Regular expression source for this rule. Literal parts are escaped.
    pub fn pattern(&self) -> String {
        format!(
            r"(?P<tag>{})(?P<eol>\r?\n)(?P<indent>[ \t]+)(?P<delim>{})",
            regex::escape(&self.closing_tag),
            regex::escape(&self.closing_delimiter)
        )
    }

    /// Check the rule fields without compiling anything.
    pub fn validate(&self) -> PatchResult<()> {
        for (field, value) in [
            ("closing_tag", &self.closing_tag),
            ("closing_delimiter", &self.closing_delimiter),
            ("marker", &self.marker),
        ] {
            if value.is_empty() {
                return Err(PatchError::InvalidRule(format!("{field} must not be empty")));
            }
            if value.contains(|c: char| c == '\r' || c == '\n') {
                return Err(PatchError::InvalidRule(format!(
                    "{field} must not contain line breaks"
                )));
            }
        }
        if !self.marker_indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(PatchError::InvalidRule(
                "marker_indent may only contain spaces and tabs".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and compile the rule into a reusable matcher.
    pub fn compile(&self) -> PatchResult<CompiledRule> {
        self.validate()?;
        let regex = Regex::new(&self.pattern())?;
        tracing::debug!(pattern = %regex.as_str(), "compiled fragment rule");
        Ok(CompiledRule { rule: self.clone(), regex })
    }
}

/// Line ending captured from the matched occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    fn from_match(eol: &str) -> Self {
        if eol == "\r\n" {
            LineEnding::Crlf
        } else {
            LineEnding::Lf
        }
    }
}

/// Where (and what) a rule inserts into a particular text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insertion {
    /// Byte offset in the original text where the inserted line goes.
    pub offset: usize,
    /// 1-based line number of the inserted line in the patched text.
    pub line: usize,
    /// Indentation captured from the delimiter line.
    pub indent: String,
    pub line_ending: LineEnding,
    /// The inserted line, without its line ending.
    pub inserted: String,
}

/// Result of applying a rule to a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub content: String,
    /// `None` when the pattern was absent and `content` equals the input.
    pub insertion: Option<Insertion>,
}

impl PatchOutcome {
    pub fn applied(&self) -> bool {
        self.insertion.is_some()
    }
}

/// A validated rule with its compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: FragmentRule,
    regex: Regex,
}

impl CompiledRule {
    pub fn rule(&self) -> &FragmentRule {
        &self.rule
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Locate the first occurrence without modifying anything.
    pub fn find(&self, text: &str) -> Option<Insertion> {
        let caps = self.regex.captures(text)?;
        let indent = caps.name("indent")?;
        let eol = caps.name("eol").map(|m| m.as_str()).unwrap_or("\n");
        let offset = indent.start();

        Some(Insertion {
            offset,
            line: line_number_at(text, offset),
            indent: indent.as_str().to_string(),
            line_ending: LineEnding::from_match(eol),
            inserted: format!("{}{}{}", indent.as_str(), self.rule.marker_indent, self.rule.marker),
        })
    }

    /// Number of non-overlapping occurrences in `text`.
    pub fn count_matches(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Insert the marker at the first occurrence only.
    pub fn apply(&self, text: &str) -> PatchOutcome {
        let Some(insertion) = self.find(text) else {
            return PatchOutcome { content: text.to_string(), insertion: None };
        };

        let eol = insertion.line_ending.as_str();
        let mut content = String::with_capacity(text.len() + insertion.inserted.len() + eol.len());
        content.push_str(&text[..insertion.offset]);
        content.push_str(&insertion.inserted);
        content.push_str(eol);
        content.push_str(&text[insertion.offset..]);

        PatchOutcome { content, insertion: Some(insertion) }
    }
}

/// 1-based line number of the line containing byte `offset`.
fn line_number_at(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset].iter().filter(|b| **b == b'\n').count() + 1
}
