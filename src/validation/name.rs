use lazy_static::lazy_static;
use regex::Regex;

/// Words printed on identity cards that are never part of a person's name.
pub const BOILERPLATE_WORDS: &[&str] = &[
    "GOVERNMENT", "GOVT", "INDIA", "REPUBLIC", "OF", "THE", "AADHAAR", "AADHAR", "PAN", "CARD",
    "NUMBER", "DATE", "BIRTH", "MALE", "FEMALE", "YEAR", "MONTH", "DAY", "UNIQUE",
    "IDENTIFICATION", "AUTHORITY", "INCOME", "TAX", "DEPARTMENT", "PERMANENT", "ACCOUNT",
    "ELECTION", "COMMISSION", "ELECTOR", "IDENTITY", "DRIVING", "LICENCE", "LICENSE", "PASSPORT",
    "ENROLMENT", "ENROLLMENT", "ADDRESS", "DOB", "GENDER", "SEX", "NAME", "FATHER", "MOTHER",
    "HUSBAND", "SIGNATURE", "ISSUE", "VID", "MOBILE", "NO",
];

lazy_static! {
    static ref TOO_SHORT_PAIR: Regex = Regex::new(r"^[A-Za-z]{1,2}\s[A-Za-z]{1,2}$").unwrap();
    static ref DATE_LIKE: Regex = Regex::new(r"\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}").unwrap();
    static ref NUMBER_LIKE: Regex = Regex::new(r"^[\d\s]+$").unwrap();
}

pub fn is_boilerplate(word: &str) -> bool {
    let upper = word.to_uppercase();
    BOILERPLATE_WORDS.iter().any(|w| *w == upper)
}

/// Fraction of characters in `text` that satisfy `pred`.
pub fn char_ratio(text: &str, pred: impl Fn(char) -> bool) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    text.chars().filter(|c| pred(*c)).count() as f64 / total as f64
}

/// Plausibility check for a labelled name capture.
pub fn is_plausible_name(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }

    let words: Vec<&str> = trimmed.split_whitespace().collect();
    let length = trimmed.chars().count();
    if words.len() < 2 || !(4..=50).contains(&length) {
        return false;
    }

    if TOO_SHORT_PAIR.is_match(trimmed)
        || DATE_LIKE.is_match(trimmed)
        || NUMBER_LIKE.is_match(trimmed)
        || words.iter().all(|w| is_boilerplate(w))
    {
        return false;
    }

    let non_alpha = char_ratio(trimmed, |c| !(c.is_ascii_alphabetic() || c.is_whitespace()));
    if non_alpha > 0.2 {
        return false;
    }

    let capitalized = words
        .iter()
        .filter(|w| {
            let len = w.chars().count();
            (2..=20).contains(&len) && w.chars().next().map_or(false, |c| c.is_ascii_uppercase())
        })
        .count();

    capitalized as f64 >= (words.len() as f64 * 0.7).ceil()
}
