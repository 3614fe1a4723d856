// Full-name extraction.

use log::debug;

use crate::models::{Confidence, Extraction};
use crate::processing::context::ExtractionContext;
use crate::processing::patterns::{
    AADHAAR_NUMBER, DATE, NAME_LABEL_LINE, NAME_LABEL_TEXT, NAME_NOISE_PREFIX, NAME_NOISE_SUFFIX,
    STRAY_LEADING_LETTER, STRAY_TRAILING_LETTER, TRAILING_DIGITS, WHITESPACE_RUN,
};
use crate::validation::name::{char_ratio, is_boilerplate, is_plausible_name};

/// Labels that precede a relative's name rather than the holder's.
const RELATIVE_MARKERS: &[&str] = &["father", "mother", "husband", "guardian"];

/// Collapse whitespace, drop trailing digits and boilerplate words picked up
/// by a greedy label capture (`Rahul Sharma DOB` -> `Rahul Sharma`).
pub fn clean_name_capture(capture: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(capture.trim(), " ");
    let without_digits = TRAILING_DIGITS.replace(collapsed.trim(), "");
    let mut words: Vec<&str> = without_digits.split_whitespace().collect();
    while words.last().map_or(false, |w| is_boilerplate(w)) {
        words.pop();
    }
    words.join(" ")
}

fn is_identifier_line(line: &str) -> bool {
    AADHAAR_NUMBER.is_match(line) || DATE.is_match(line)
}

/// Lines that sit above both the date of birth and the Aadhaar number.
fn candidate_lines<'c>(ctx: &'c ExtractionContext) -> &'c [String] {
    let len = ctx.lines.len();
    let bound = ctx
        .anchors
        .dob_line
        .unwrap_or(len)
        .min(ctx.anchors.aadhaar_line.unwrap_or(len));
    &ctx.lines[..bound]
}

fn from_label(lines: &[String]) -> Option<String> {
    lines.iter().find_map(|line| {
        let caps = NAME_LABEL_LINE.captures(line)?;
        let cleaned = clean_name_capture(&caps[1]);
        if cleaned.chars().count() >= 4 && cleaned.split_whitespace().count() >= 2 {
            Some(cleaned)
        } else {
            None
        }
    })
}

fn strip_noise(line: &str) -> String {
    let cleaned = NAME_NOISE_PREFIX.replace(line.trim(), "");
    let cleaned = NAME_NOISE_SUFFIX.replace(&cleaned, "");
    let cleaned = STRAY_LEADING_LETTER.replace(&cleaned, "");
    STRAY_TRAILING_LETTER.replace(&cleaned, "").to_string()
}

fn is_name_word(word: &str) -> bool {
    let len = word.chars().count();
    (2..=25).contains(&len)
        && word.chars().next().map_or(false, |c| c.is_ascii_uppercase())
        && !word.chars().all(|c| c.is_ascii_digit())
        && !is_boilerplate(word)
        && !matches!(word.to_uppercase().as_str(), "HE" | "HI" | "H" | "E")
}

fn name_words(line: &str) -> Vec<String> {
    strip_noise(line)
        .split_whitespace()
        .filter(|w| is_name_word(w))
        .map(str::to_string)
        .collect()
}

fn from_word_heuristic(lines: &[String]) -> Option<String> {
    lines.iter().find_map(|line| {
        let length = line.chars().count();
        if is_identifier_line(line) || !(4..=80).contains(&length) {
            return None;
        }
        let words = name_words(line);
        if !(2..=5).contains(&words.len()) {
            return None;
        }
        let candidate = words.join(" ");
        let candidate_len = candidate.chars().count();
        let letters = char_ratio(&candidate, |c| c.is_ascii_alphabetic());
        if (4..=50).contains(&candidate_len) && letters >= 0.7 {
            Some(candidate)
        } else {
            None
        }
    })
}

fn from_longest_line(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .filter(|line| !is_identifier_line(line))
        .map(|line| WHITESPACE_RUN.replace_all(line.trim(), " ").to_string())
        .filter(|line| {
            let length = line.chars().count();
            (5..=50).contains(&length)
                && line.split_whitespace().count() >= 2
                && char_ratio(line, |c| c.is_ascii_alphabetic() || c == ' ') > 0.8
                && !line.split_whitespace().all(is_boilerplate)
        })
        .fold(None, |best: Option<String>, line| match best {
            Some(b) if b.chars().count() >= line.chars().count() => Some(b),
            _ => Some(line),
        })
}

/// Aadhaar layout: the holder's name is printed above the date of birth and
/// the Aadhaar number. Tried as label, then word heuristic, then longest line.
pub fn extract_name_aadhaar(ctx: &ExtractionContext) -> Extraction {
    let lines = candidate_lines(ctx);
    debug!("Searching {} line(s) above the DOB/Aadhaar lines for a name", lines.len());

    let tiers: [(&str, fn(&[String]) -> Option<String>); 3] = [
        ("label", from_label),
        ("word heuristic", from_word_heuristic),
        ("longest line", from_longest_line),
    ];

    for (tier, finder) in tiers.iter() {
        if let Some(name) = finder(lines) {
            debug!("Name found via {}", tier);
            return Extraction::found(name, Confidence::High, ctx.source());
        }
    }
    Extraction::NotFound
}

/// True when the label at `position` shares its line with e.g. `Father's`.
fn preceded_by_relative_marker(text: &str, position: usize) -> bool {
    let line_start = text[..position].rfind('\n').map_or(0, |i| i + 1);
    let before = text[line_start..position].to_lowercase();
    RELATIVE_MARKERS.iter().any(|marker| before.contains(marker))
}

fn labelled_name(text: &str) -> Option<String> {
    NAME_LABEL_TEXT.captures_iter(text).find_map(|caps| {
        let label_start = caps.get(0)?.start();
        if preceded_by_relative_marker(text, label_start) {
            return None;
        }
        let candidate = clean_name_capture(&caps[1]);
        if is_plausible_name(&candidate) {
            Some(candidate)
        } else {
            None
        }
    })
}

/// Other documents: a `Name` label followed by two to four words.
pub fn extract_name_generic(ctx: &ExtractionContext) -> Extraction {
    let found = labelled_name(ctx.raw_text).or_else(|| labelled_name(&ctx.normalized_text()));
    match found {
        Some(name) => Extraction::found(name, Confidence::High, ctx.source()),
        None => Extraction::NotFound,
    }
}
