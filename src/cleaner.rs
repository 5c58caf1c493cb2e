//! Strips conversational framing from model output.
//!
//! The rules are heuristics: they can remove a legitimate last stanza that
//! mentions "hope", and they miss preambles worded in ways not listed here.

use lazy_static::lazy_static;
use regex::Regex;

/// A pattern and what to put in place of its match.
struct Rule {
    pattern: Regex,
    replacement: &'static str,
    /// Replace every match instead of only the first.
    all: bool,
}

impl Rule {
    fn once(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
            all: false,
        }
    }

    fn every(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
            all: true,
        }
    }

    fn apply(&self, text: &str) -> String {
        if self.all {
            self.pattern.replace_all(text, self.replacement).into_owned()
        } else {
            self.pattern.replace(text, self.replacement).into_owned()
        }
    }
}

lazy_static! {
    // Leading framing up to the first blank line; the blank line is kept.
    static ref INTRO_RULES: Vec<Rule> = vec![
        Rule::once(
            r"(?is)^(?:Here's|Here is|I've created|I have created|Certainly|Of course|Okay|Sure|Below is|This is) .+?\n\n",
            "\n\n",
        ),
        Rule::once(r"(?is)^.+?(?:poem|sonnet|haiku|verse|piece).+?\n\n", "\n\n"),
        Rule::once(r"(?is)^.+?(?:crafted|wrote|composed|created|present|offer).+?\n\n", "\n\n"),
        Rule::once(r"(?is)^.+?(?:requested|based on|inspired by|following your).+?\n\n", "\n\n"),
        // **Title** and # Title lines
        Rule::every(r"(?m)^\*\*.+?\*\*\s*\n+", ""),
        Rule::every(r"(?m)^#.+?\n+", ""),
    ];

    // Trailing commentary from a blank line to the end.
    static ref OUTRO_RULES: Vec<Rule> = vec![
        Rule::once(r"(?is)\n\n.+?(?:hope|trust|believe).+?$", ""),
        Rule::once(r"(?is)\n\n.+?(?:captures|embodies|reflects).+?$", ""),
        Rule::once(r"(?is)\n\n.+?(?:note|explanation|thoughts|ideas|variations|options).+?$", ""),
        Rule::once(r"(?is)\n\n\*\*.+?\*\*.*$", ""),
        Rule::once(r"(?s)\n\n---.*$", ""),
    ];
}

/// Removes preamble, titles, closing remarks and wrapping quotes.
///
/// Passes are repeated until the text stops changing, so the result is
/// stable under another call. Every rule only deletes text, which bounds
/// the number of passes.
pub fn clean_poem(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let next = clean_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let mut cleaned = text.trim().to_string();

    for rule in INTRO_RULES.iter() {
        cleaned = rule.apply(&cleaned);
    }

    // Outro rules key off blank lines; drop the one the intro rules left at the top
    cleaned = cleaned.trim().to_string();

    for rule in OUTRO_RULES.iter() {
        cleaned = rule.apply(&cleaned);
    }

    strip_wrapping_quotes(&cleaned).trim().to_string()
}

fn strip_wrapping_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
