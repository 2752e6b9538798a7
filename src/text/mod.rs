//! Plain-text extraction from markdown-ish documents
//!
//! Analyzers score prose, not markup. The scanner here classifies lines so
//! fenced code, headings, and HTML comments can be excluded before sentence
//! or word level analysis.

/// Classification of a single document line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Heading,
    /// Opening or closing ``` marker
    Fence,
    /// Inside a fenced block
    Code,
    HtmlComment,
    Bullet,
    Prose,
}

/// Stateful line classifier; tracks fence nesting across calls.
#[derive(Debug, Default)]
pub struct LineScanner {
    in_code: bool,
}

impl LineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, line: &str) -> LineKind {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            self.in_code = !self.in_code;
            return LineKind::Fence;
        }
        if self.in_code {
            return LineKind::Code;
        }
        if trimmed.is_empty() {
            return LineKind::Blank;
        }
        if trimmed.starts_with('#') {
            return LineKind::Heading;
        }
        if trimmed.starts_with("<!--") {
            return LineKind::HtmlComment;
        }
        if trimmed.starts_with("- ")
            || trimmed.starts_with("* ")
            || trimmed.starts_with("+ ")
            || is_ordered_item(trimmed)
        {
            return LineKind::Bullet;
        }
        LineKind::Prose
    }
}

fn is_ordered_item(trimmed: &str) -> bool {
    let digits = trimmed.bytes().take_while(|b| b.is_ascii_digit()).count();
    digits > 0 && trimmed[digits..].starts_with(". ")
}

/// Prose and bullet body text with markup lines removed, joined by newlines.
pub fn prose(text: &str) -> String {
    let mut scanner = LineScanner::new();
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        match scanner.classify(line) {
            LineKind::Prose => {
                out.push_str(line.trim());
                out.push('\n');
            }
            LineKind::Bullet => {
                let trimmed = line.trim();
                let body = trimmed
                    .trim_start_matches(['-', '*', '+'])
                    .trim_start_matches(|c: char| c.is_ascii_digit())
                    .trim_start_matches('.')
                    .trim_start();
                out.push_str(body);
                out.push('\n');
            }
            _ => {}
        }
    }
    out
}

/// Split prose into sentences on terminal punctuation.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if matches!(b, b'.' | b'!' | b'?') {
            let tail = &bytes[i + 1..];
            let boundary = tail.is_empty() || tail[0].is_ascii_whitespace();
            if boundary {
                let sentence = text[start..=i].trim();
                if sentence.chars().any(|c| c.is_alphabetic()) {
                    out.push(sentence);
                }
                start = i + 1;
            }
        }
    }
    let rest = text[start..].trim();
    if rest.chars().any(|c| c.is_alphabetic()) {
        out.push(rest);
    }
    out
}

/// Lowercased word tokens: alphabetic runs, apostrophes kept inside words.
pub fn words(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_alphabetic() || (c == '\'' && !current.is_empty()) {
            current.extend(c.to_lowercase());
        } else if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Word counts per sentence, in order.
pub fn sentence_lengths(text: &str) -> Vec<usize> {
    sentences(text).iter().map(|s| words(s).len()).collect()
}
