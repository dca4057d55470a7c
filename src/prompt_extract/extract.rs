//! # Region Extraction
//!
//! A log is scanned line by line with a two-state machine:
//!
//! ```text
//!            start marker                      start marker
//!   ┌──────┐ ───────────────▶ ┌────────────┐ ◀──────────────┐
//!   │ Idle │                  │ Collecting │ ───────────────┘
//!   └──────┘ ◀─────────────── └────────────┘   (flushes previous)
//!            end marker (flushes)    │ ▲
//!                                    └─┘ content line (cleaned, buffered)
//! ```
//!
//! A region is recorded only when it has an identifier and at least one content line, and
//! only when it is closed by an end marker or superseded by a new start marker. A start line
//! whose label is not followed by a token opens an anonymous region; whatever it collects is
//! discarded. What happens to a region still open at end of input is governed by
//! [`TrailingRegion`].

use crate::config::{MarkerConfig, TrailingRegion};
use crate::error::Result;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A recovered block of text keyed by the token found on its start line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub identifier: String,
    pub content: String,
}

impl Region {
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    Idle,
    Collecting {
        identifier: Option<String>,
        buffer: Vec<String>,
    },
}

/// How a single line is classified before it reaches the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'l> {
    Start(Option<&'l str>),
    End,
    Text(&'l str),
}

#[derive(Debug, Clone)]
pub struct RegionExtractor {
    markers: MarkerConfig,
    start_pattern: Regex,
    trailing: TrailingRegion,
}

impl RegionExtractor {
    pub fn new(markers: MarkerConfig, trailing: TrailingRegion) -> Result<Self> {
        // exactly one space between the label and the identifier
        let start_pattern =
            Regex::new(&format!(r"{} (\S+)", regex::escape(&markers.start_label)))?;
        Ok(Self {
            markers,
            start_pattern,
            trailing,
        })
    }

    pub fn classify<'l>(&self, line: &'l str) -> LineKind<'l> {
        if line.contains(self.markers.start_label.as_str()) {
            LineKind::Start(self.identifier(line))
        } else if line.contains(self.markers.end_marker.as_str()) {
            LineKind::End
        } else {
            LineKind::Text(line)
        }
    }

    /// Run of non-whitespace right after the start label and a single space, if any.
    pub fn identifier<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.start_pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn is_noise(&self, line: &str) -> bool {
        self.markers
            .noise
            .iter()
            .any(|marker| line.contains(marker.as_str()))
    }

    /// Returns the trimmed line when it is worth keeping as region content.
    pub fn clean<'l>(&self, line: &'l str) -> Option<&'l str> {
        if self.is_noise(line) {
            return None;
        }
        let cleaned = line.trim();
        if cleaned.is_empty() {
            return None;
        }
        if let Some(prefix) = self.markers.skip_prefix {
            if cleaned.starts_with(prefix) {
                return None;
            }
        }
        Some(cleaned)
    }

    pub fn scanner(&self) -> Scanner<'_> {
        Scanner {
            extractor: self,
            state: ScanState::Idle,
            regions: Vec::new(),
            line_no: 0,
        }
    }

    pub fn extract(&self, text: &str) -> Vec<Region> {
        let mut scanner = self.scanner();
        for line in log_lines(text) {
            scanner.feed(line);
        }
        scanner.finish()
    }

    /// Reads the whole file into memory and extracts it in one pass.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Region>> {
        let text = fs::read_to_string(path.as_ref())?;
        let regions = self.extract(&text);
        debug!(
            file = %path.as_ref().display(),
            regions = regions.len(),
            "extraction finished"
        );
        Ok(regions)
    }
}

/// Splits on `\n`, `\r\n` and a lone `\r`, so carriage-return progress output from the test
/// runner ends up on separate lines.
pub fn log_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(['\r', '\n']))
}

/// In-progress scan over one input. Feed lines in order, then call [`Scanner::finish`].
#[derive(Debug)]
pub struct Scanner<'e> {
    extractor: &'e RegionExtractor,
    state: ScanState,
    regions: Vec<Region>,
    line_no: usize,
}

impl Scanner<'_> {
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn feed(&mut self, line: &str) {
        self.line_no += 1;
        match self.extractor.classify(line) {
            LineKind::Start(identifier) => self.open(identifier),
            LineKind::End => self.close(),
            LineKind::Text(text) => self.collect(text),
        }
    }

    /// Start marker: flush whatever was open, then begin a fresh region.
    pub fn open(&mut self, identifier: Option<&str>) {
        if let ScanState::Collecting {
            identifier: previous,
            buffer,
        } = std::mem::take(&mut self.state)
        {
            self.flush(previous, buffer);
        }
        if identifier.is_none() {
            debug!(line = self.line_no, "start marker without identifier");
        }
        self.state = ScanState::Collecting {
            identifier: identifier.map(str::to_string),
            buffer: Vec::new(),
        };
    }

    /// End marker: flush the open region and go idle. Ignored while idle.
    pub fn close(&mut self) {
        if let ScanState::Collecting { identifier, buffer } = std::mem::take(&mut self.state) {
            self.flush(identifier, buffer);
        }
    }

    pub fn collect(&mut self, line: &str) {
        if let ScanState::Collecting { buffer, .. } = &mut self.state {
            if let Some(cleaned) = self.extractor.clean(line) {
                buffer.push(cleaned.to_string());
            }
        }
    }

    fn flush(&mut self, identifier: Option<String>, buffer: Vec<String>) {
        match identifier {
            Some(identifier) if !buffer.is_empty() => {
                debug!(line = self.line_no, %identifier, lines = buffer.len(), "region recorded");
                self.regions.push(Region::new(identifier, buffer.join("\n")));
            }
            Some(identifier) => {
                debug!(line = self.line_no, %identifier, "empty region dropped");
            }
            None => {
                debug!(
                    line = self.line_no,
                    lines = buffer.len(),
                    "anonymous region dropped"
                );
            }
        }
    }

    pub fn finish(mut self) -> Vec<Region> {
        if let ScanState::Collecting { identifier, buffer } = std::mem::take(&mut self.state) {
            match self.extractor.trailing {
                TrailingRegion::Flush => self.flush(identifier, buffer),
                TrailingRegion::Drop => {
                    debug!(
                        identifier = identifier.as_deref().unwrap_or("-"),
                        lines = buffer.len(),
                        "region still open at end of input, dropped"
                    );
                }
            }
        }
        self.regions
    }
}
