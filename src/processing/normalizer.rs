// OCR text cleanup shared by every field extractor.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Anything other than alphanumerics, whitespace and basic punctuation.
    static ref DISALLOWED: Regex = Regex::new(r"[^A-Za-z0-9\s,.:/\-]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Split raw OCR output into cleaned, non-empty lines. Line order is kept and
/// lines are never merged.
pub fn normalize_lines(raw_text: &str) -> Vec<String> {
    raw_text
        .lines()
        .map(normalize_line)
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn normalize_line(line: &str) -> String {
    let folded = fold_confusables(line);
    let stripped = DISALLOWED.replace_all(&folded, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}

/// Resolve look-alike characters (`|`, `0/O`, `1/I/l`) inside each
/// alphanumeric run. Runs dominated by digits fold to digits, runs dominated
/// by letters fold to letters, and runs that carry both unambiguous letters
/// and unambiguous digits (PAN-style codes) are left alone.
pub fn fold_confusables(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut run = String::new();

    for c in line.chars() {
        if c.is_ascii_alphanumeric() || c == '|' {
            run.push(c);
        } else {
            if !run.is_empty() {
                out.push_str(&fold_run(&run));
                run.clear();
            }
            out.push(c);
        }
    }
    if !run.is_empty() {
        out.push_str(&fold_run(&run));
    }
    out
}

fn is_ambiguous(c: char) -> bool {
    matches!(c, '0' | '1' | 'O' | 'o' | 'I' | 'l' | '|')
}

fn fold_run(run: &str) -> String {
    let strong_letters = run
        .chars()
        .filter(|c| c.is_ascii_alphabetic() && !is_ambiguous(*c))
        .count();
    let strong_digits = run.chars().filter(|c| c.is_ascii_digit() && !is_ambiguous(*c)).count();

    if strong_letters > 0 && strong_digits > 0 {
        return run.to_string();
    }

    let digits = run.chars().filter(|c| c.is_ascii_digit()).count();
    let letters = run.chars().filter(|c| c.is_ascii_alphabetic() || *c == '|').count();

    if strong_digits > 0 || digits > letters {
        run.chars()
            .map(|c| match c {
                'O' | 'o' => '0',
                'I' | 'l' | '|' => '1',
                _ => c,
            })
            .collect()
    } else {
        let lowercase = run.chars().filter(|c| c.is_ascii_lowercase() && *c != 'l').count();
        let uppercase = run.chars().filter(|c| c.is_ascii_uppercase()).count();
        let upper_run = lowercase == 0 && uppercase >= 2;
        run.chars()
            .map(|c| match c {
                '0' => 'O',
                '1' | '|' => 'I',
                'l' if upper_run => 'I',
                _ => c,
            })
            .collect()
    }
}
