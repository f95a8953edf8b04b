use crate::domain::model::{MarkdownSection, EXPECTED_CLUES};
use crate::domain::ports::{Reporter, RunEvent, Storage};
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static SECTION_START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s+(.+)").unwrap());

const CLUE_PREFIX: &str = "- ";

/// Parser for numbered markdown profile listings:
///
/// ```text
/// 1. Title
/// - Clue 1
/// - Clue 2
///
/// 2. Next Title
/// - Clue 1
/// ```
pub struct MarkdownParser<'a> {
    reporter: &'a dyn Reporter,
    expected_clues: usize,
}

impl<'a> MarkdownParser<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self {
            reporter,
            expected_clues: EXPECTED_CLUES,
        }
    }

    pub fn with_expected_clues(mut self, expected_clues: usize) -> Self {
        self.expected_clues = expected_clues;
        self
    }

    pub async fn parse_md_file<S: Storage>(
        &self,
        storage: &S,
        path: &Path,
    ) -> Result<Vec<MarkdownSection>> {
        let bytes = storage.read_file(path).await?;
        let content = String::from_utf8(bytes).map_err(|e| EtlError::InvalidEncoding {
            path: path.to_path_buf(),
            source: e.utf8_error(),
        })?;
        Ok(self.parse_str(&content))
    }

    pub fn parse_str(&self, content: &str) -> Vec<MarkdownSection> {
        split_chunks(content)
            .into_iter()
            .filter_map(|chunk| self.parse_chunk(&chunk))
            .collect()
    }

    fn parse_chunk(&self, chunk: &[&str]) -> Option<MarkdownSection> {
        let (first, rest) = chunk.split_first()?;

        let Some(caps) = TITLE_RE.captures(first.trim_start()) else {
            self.reporter.report(RunEvent::UnparsableTitle {
                line: first.trim().to_string(),
            });
            return None;
        };
        let title = caps[1].trim().to_string();

        let clues: Vec<String> = rest
            .iter()
            .filter_map(|line| line.strip_prefix(CLUE_PREFIX))
            .map(|clue| clue.trim().to_string())
            .collect();

        if clues.is_empty() {
            return None;
        }

        if clues.len() != self.expected_clues {
            self.reporter.report(RunEvent::ClueCountMismatch {
                title: title.clone(),
                found: clues.len(),
                expected: self.expected_clues,
            });
        }

        Some(MarkdownSection { title, clues })
    }
}

/// Splits content into chunks of lines, each numbered line opening a new one.
/// Leading and trailing blank lines are dropped from every chunk; chunks left
/// empty are discarded.
fn split_chunks(content: &str) -> Vec<Vec<&str>> {
    let mut chunks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if SECTION_START_RE.is_match(line) && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(line);
    }
    chunks.push(current);

    chunks
        .into_iter()
        .filter_map(|chunk| {
            let start = chunk.iter().position(|l| !l.trim().is_empty())?;
            let end = chunk.iter().rposition(|l| !l.trim().is_empty())?;
            Some(chunk[start..=end].to_vec())
        })
        .collect()
}
