//! Line classification and reconstruction.
//!
//! The rewriter recognises lines that look like a logging call whose macro
//! wrapper went missing:
//!
//! ```text
//!     "done";                     ->  ic_cdk::println!("done");
//!
//!     "Processing {} of {}",      ->  ic_cdk::println!("Processing {} of {}",
//!         index,                  ->      index,
//!         total,                  ->      total);
//! ```
//!
//! It works purely on surface lexical cues. A *candidate-start* line begins
//! with indentation followed by a double quote and contains neither the macro
//! token nor any exclusion substring. The lines that follow it are consumed as
//! *continuations* while they end in `,` or in `);` (without starting with
//! `)`). Everything else is passed through untouched.

use std::borrow::Cow;

use aho_corasick::AhoCorasick;
use tracing::warn;

use crate::core::config::RewriteConfig;
use crate::core::errors::{MendError, Result};

/// How a single input line was treated by the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// First line of a rewritten block
    CandidateStart,
    /// Line consumed by the block above it
    Continuation,
    /// Passed through verbatim
    Unrelated,
}

/// A contiguous run of input lines and what the scan decided for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// One line emitted verbatim
    Unrelated(usize),
    /// Lines `start..end` rebuilt as one macro call; `start` is the candidate
    Block {
        /// Index of the candidate-start line
        start: usize,
        /// One past the last continuation line
        end: usize,
    },
    /// A block whose continuation run exceeded the configured limit; emitted verbatim
    Skipped {
        /// Index of the candidate-start line
        start: usize,
        /// One past the last continuation line
        end: usize,
    },
}

/// Result of rewriting one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Reconstructed text
    pub text: String,
    /// Number of blocks wrapped in the macro
    pub blocks: usize,
    /// Number of blocks left alone by the continuation guard
    pub skipped: usize,
}

/// Compiled classification rules.
#[derive(Debug, Clone)]
pub struct Rewriter {
    macro_name: String,
    blockers: AhoCorasick,
    max_continuation_lines: Option<usize>,
}

impl Rewriter {
    /// Build a rewriter from configuration.
    pub fn new(config: &RewriteConfig) -> Result<Self> {
        let macro_name = config.macro_name.trim().to_string();

        let mut patterns: Vec<&str> = Vec::with_capacity(config.exclusions.len() + 1);
        patterns.push(&macro_name);
        patterns.extend(config.exclusions.iter().map(String::as_str));

        let blockers = AhoCorasick::new(patterns).map_err(|err| {
            MendError::config_field(
                format!("Failed to compile exclusion matcher: {err}"),
                "rewrite.exclusions",
            )
        })?;

        Ok(Self {
            macro_name,
            blockers,
            max_continuation_lines: config.max_continuation_lines,
        })
    }

    /// Macro token this rewriter wraps blocks in.
    pub fn macro_name(&self) -> &str {
        &self.macro_name
    }

    /// Whether `line` opens a block that should be wrapped.
    pub fn is_candidate_start(&self, line: &str) -> bool {
        starts_with_indented_quote(line) && !self.blockers.is_match(line)
    }

    /// Forward scan deciding what happens to every line.
    pub fn plan(&self, lines: &[&str]) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            if !self.is_candidate_start(lines[i]) {
                segments.push(Segment::Unrelated(i));
                i += 1;
                continue;
            }

            let mut end = i + 1;
            while end < lines.len() && is_continuation(lines[end]) {
                end += 1;
            }

            let continuations = end - i - 1;
            match self.max_continuation_lines {
                Some(limit) if continuations > limit => {
                    warn!(
                        "Leaving block at line {} unchanged: {} continuation lines exceed the limit of {}",
                        i + 1,
                        continuations,
                        limit
                    );
                    segments.push(Segment::Skipped { start: i, end });
                }
                _ => segments.push(Segment::Block { start: i, end }),
            }
            i = end;
        }

        segments
    }

    /// Per-line view of [`Rewriter::plan`]. Lines of a skipped block count as unrelated.
    pub fn classify(&self, lines: &[&str]) -> Vec<LineKind> {
        let mut kinds = Vec::with_capacity(lines.len());
        for segment in self.plan(lines) {
            match segment {
                Segment::Unrelated(_) => kinds.push(LineKind::Unrelated),
                Segment::Block { start, end } => {
                    kinds.push(LineKind::CandidateStart);
                    kinds.extend((start + 1..end).map(|_| LineKind::Continuation));
                }
                Segment::Skipped { start, end } => {
                    kinds.extend((start..end).map(|_| LineKind::Unrelated));
                }
            }
        }
        kinds
    }

    /// Rewrite a whole text. Lines are split and re-joined on `\n` only.
    pub fn rewrite(&self, text: &str) -> Rewrite {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut output: Vec<Cow<'_, str>> = Vec::with_capacity(lines.len());
        let mut blocks = 0;
        let mut skipped = 0;

        for segment in self.plan(&lines) {
            match segment {
                Segment::Unrelated(index) => output.push(Cow::Borrowed(lines[index])),
                Segment::Block { start, end } => {
                    self.render_block(lines[start], &lines[start + 1..end], &mut output);
                    blocks += 1;
                }
                Segment::Skipped { start, end } => {
                    output.extend(lines[start..end].iter().map(|line| Cow::Borrowed(*line)));
                    skipped += 1;
                }
            }
        }

        Rewrite {
            text: output.join("\n"),
            blocks,
            skipped,
        }
    }

    fn render_block<'a>(&self, head: &str, continuations: &[&'a str], out: &mut Vec<Cow<'a, str>>) {
        let indent = leading_whitespace(head);
        let content = head.trim();

        match continuations.split_last() {
            None => {
                let content = content.strip_suffix(';').unwrap_or(content);
                out.push(Cow::Owned(format!("{indent}{}({content});", self.macro_name)));
            }
            Some((last, middle)) => {
                out.push(Cow::Owned(format!("{indent}{}({content}", self.macro_name)));
                out.extend(middle.iter().map(|line| Cow::Borrowed(*line)));
                if last.trim().ends_with(");") {
                    out.push(Cow::Borrowed(*last));
                } else {
                    let open = last.trim_end().trim_end_matches(',');
                    out.push(Cow::Owned(format!("{open});")));
                }
            }
        }
    }
}

/// Whether `line` extends a block: ends in `,`, or ends in `);` without starting with `)`.
pub fn is_continuation(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.ends_with(',') || (trimmed.ends_with(");") && !trimmed.starts_with(')'))
}

fn starts_with_indented_quote(line: &str) -> bool {
    let rest = line.trim_start();
    rest.len() < line.len() && rest.starts_with('"')
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

#[cfg(test)]
mod tests;
