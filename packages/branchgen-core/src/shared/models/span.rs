//! Source location types
//!
//! Front ends report byte offsets; everything downstream works in 1-based
//! physical lines. [`LineIndex`] does the conversion.

use serde::{Deserialize, Serialize};

/// Inclusive range of 1-based lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineSpan {
    pub start_line: u32,
    pub end_line: u32,
}

impl LineSpan {
    pub fn new(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// Single-line span
    pub fn line(line: u32) -> Self {
        Self::new(line, line)
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    pub fn contains(&self, other: &LineSpan) -> bool {
        self.start_line <= other.start_line && other.end_line <= self.end_line
    }

    pub fn line_count(&self) -> u32 {
        if self.end_line >= self.start_line {
            self.end_line - self.start_line + 1
        } else {
            0
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = u32> {
        self.start_line..=self.end_line
    }
}

/// Byte offset → line lookup for one source text
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of every '\n'
    newlines: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let newlines = source
            .bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(i, _)| i)
            .collect();
        Self {
            newlines,
            len: source.len(),
        }
    }

    /// 1-based line of a byte offset: newlines strictly before it, plus one
    pub fn line_of(&self, offset: usize) -> u32 {
        let offset = offset.min(self.len);
        let before = self.newlines.partition_point(|&nl| nl < offset);
        before as u32 + 1
    }

    /// Line span covering `start..end` (end exclusive)
    pub fn span_of(&self, start: usize, end: usize) -> LineSpan {
        let last = if end > start { end - 1 } else { start };
        LineSpan::new(self.line_of(start), self.line_of(last))
    }

    /// Number of physical lines (a trailing newline does not open a new line)
    pub fn line_count(&self) -> u32 {
        match self.newlines.last() {
            Some(&last) if last + 1 == self.len => self.newlines.len() as u32,
            _ => self.newlines.len() as u32 + 1,
        }
    }
}
