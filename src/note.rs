//! Shaping recognized text into a note
//!
//! Engine output is line oriented and often carries blank lines and stray
//! indentation. A note is the same text as one line of words plus a short
//! title taken from the first line.

use serde::Serialize;

/// Title used when no line survives cleanup
pub const UNTITLED: &str = "Untitled Note";

const TITLE_MAX_CHARS: usize = 60;

/// Results shorter than this (after trimming) are not worth keeping
const MIN_TEXT_CHARS: usize = 5;
/// A usable result contains at least one run of this many ASCII letters
const MIN_LETTER_RUN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub title: String,
    pub text: String,
}

impl Note {
    /// Build a note from raw engine output
    ///
    /// Lines are trimmed, empty ones dropped and the rest joined with single
    /// spaces. The first remaining line becomes the title, cut to 60
    /// characters with `...` appended when longer.
    pub fn from_text(raw: &str) -> Self {
        let lines: Vec<&str> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let title = match lines.first() {
            Some(first) if first.chars().count() > TITLE_MAX_CHARS => {
                let cut: String = first.chars().take(TITLE_MAX_CHARS).collect();
                format!("{}...", cut)
            }
            Some(first) => first.to_string(),
            None => UNTITLED.to_string(),
        };

        Self {
            title,
            text: lines.join(" "),
        }
    }
}

/// Whether a recognition result looks unusable
///
/// Too short, or no word-like run of letters anywhere: typical for noise or
/// for a page the thresholding wiped out.
pub fn is_weak(text: &str) -> bool {
    let text = text.trim();
    if text.chars().count() < MIN_TEXT_CHARS {
        return true;
    }

    let mut run = 0;
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            run += 1;
            if run >= MIN_LETTER_RUN {
                return false;
            }
        } else {
            run = 0;
        }
    }
    true
}
