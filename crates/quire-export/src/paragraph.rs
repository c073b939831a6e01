//! Line segmentation for word-processor export
//!
//! `# `, `## ` and `### ` at the start of a line become headings 1-3 with
//! the marker stripped. Everything else, deeper headings included, is body
//! text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParagraphLevel {
    Body,
    Heading1,
    Heading2,
    Heading3,
}

impl ParagraphLevel {
    /// 0 for body text, 1-3 for headings
    pub fn as_u8(&self) -> u8 {
        match self {
            ParagraphLevel::Body => 0,
            ParagraphLevel::Heading1 => 1,
            ParagraphLevel::Heading2 => 2,
            ParagraphLevel::Heading3 => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub level: ParagraphLevel,
    pub text: String,
}

impl Paragraph {
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            level: ParagraphLevel::Body,
            text: text.into(),
        }
    }

    pub fn heading(level: ParagraphLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

const HEADING_MARKERS: [(&str, ParagraphLevel); 3] = [
    ("# ", ParagraphLevel::Heading1),
    ("## ", ParagraphLevel::Heading2),
    ("### ", ParagraphLevel::Heading3),
];

/// Split `text` into one paragraph per line
pub fn segment(text: &str) -> Vec<Paragraph> {
    text.split('\n').map(classify).collect()
}

fn classify(line: &str) -> Paragraph {
    for (marker, level) in HEADING_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return Paragraph::heading(level, rest);
        }
    }
    Paragraph::body(line)
}
