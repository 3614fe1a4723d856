// Field extractors for identifiers, dates, gender, contact details and state.
//
// Every extractor is a pure function of the `ExtractionContext` and yields at
// most one value. Identifier scans try the raw OCR text first and fall back to
// the normalized lines, where look-alike characters have been folded.

use log::debug;

use crate::models::{Confidence, Extraction};
use crate::processing::address;
use crate::processing::context::ExtractionContext;
use crate::processing::patterns::{
    canonical_state, AADHAAR_NUMBER, DATE, DOB_LABEL, FATHER_LABEL, FEMALE_TOKEN, GENDER_LABEL,
    GENDER_STANDALONE, GENDER_WORD, MALE_TOKEN, MOBILE, MOTHER_LABEL, PAN_NUMBER, SIX_DIGITS,
    STATE_LABEL, STATE_NAMES,
};
use crate::processing::name::clean_name_capture;
use crate::validation::{
    format_aadhaar, is_plausible_name, is_valid_date_of_birth, is_valid_mobile, is_valid_pan,
    is_valid_pincode,
};

pub fn find_aadhaar(text: &str) -> Option<String> {
    AADHAAR_NUMBER
        .captures_iter(text)
        .find_map(|caps| format_aadhaar(&caps[1]))
}

pub fn find_pan(text: &str) -> Option<String> {
    PAN_NUMBER
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .find(|pan| is_valid_pan(pan))
}

/// Labelled dates win over bare ones; the first structurally valid one is kept.
pub fn find_date_of_birth(text: &str) -> Option<String> {
    DOB_LABEL
        .captures_iter(text)
        .chain(DATE.captures_iter(text))
        .map(|caps| caps[1].to_string())
        .find(|date| is_valid_date_of_birth(date))
}

pub fn find_pincode(text: &str) -> Option<String> {
    SIX_DIGITS
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .find(|pin| is_valid_pincode(pin))
}

pub fn find_mobile(text: &str) -> Option<String> {
    MOBILE
        .captures_iter(text)
        .map(|caps| caps[1].replace(' ', ""))
        .find(|number| is_valid_mobile(number))
}

/// Run `finder` over the raw text, then over the normalized lines.
fn scan(ctx: &ExtractionContext, finder: impl Fn(&str) -> Option<String>) -> Option<String> {
    finder(ctx.raw_text).or_else(|| finder(&ctx.normalized_text()))
}

pub fn extract_aadhaar_number(ctx: &ExtractionContext) -> Extraction {
    match scan(ctx, find_aadhaar) {
        Some(number) => Extraction::found(number, Confidence::High, ctx.source()),
        None => Extraction::NotFound,
    }
}

pub fn extract_pan_number(ctx: &ExtractionContext) -> Extraction {
    match scan(ctx, find_pan) {
        Some(pan) => Extraction::found(pan, Confidence::High, ctx.source()),
        None => Extraction::NotFound,
    }
}

pub fn extract_date_of_birth(ctx: &ExtractionContext) -> Extraction {
    match scan(ctx, find_date_of_birth) {
        Some(date) => Extraction::found(date, Confidence::High, ctx.source()),
        None => Extraction::NotFound,
    }
}

pub fn extract_pincode(ctx: &ExtractionContext) -> Extraction {
    match scan(ctx, find_pincode) {
        Some(pin) => Extraction::found(pin, Confidence::Medium, ctx.source()),
        None => Extraction::NotFound,
    }
}

pub fn extract_mobile_number(ctx: &ExtractionContext) -> Extraction {
    match scan(ctx, find_mobile) {
        Some(number) => Extraction::found(number, Confidence::Medium, ctx.source()),
        None => Extraction::NotFound,
    }
}

fn gender_from_token(line: &str) -> Option<&'static str> {
    // FEMALE contains MALE, so it has to be tried first.
    if FEMALE_TOKEN.is_match(line) {
        Some("Female")
    } else if MALE_TOKEN.is_match(line) {
        Some("Male")
    } else {
        None
    }
}

fn gender_from_label(text: &str) -> Option<&'static str> {
    let caps = GENDER_LABEL.captures(text)?;
    match caps[1].to_uppercase().as_str() {
        "FEMALE" | "F" => Some("Female"),
        "MALE" | "M" => Some("Male"),
        _ => None,
    }
}

fn gender_from_word(text: &str) -> Option<&'static str> {
    let caps = GENDER_WORD.captures(text)?;
    if caps[1].eq_ignore_ascii_case("female") {
        Some("Female")
    } else {
        Some("Male")
    }
}

fn gender_from_text(ctx: &ExtractionContext) -> Option<&'static str> {
    let normalized = ctx.normalized_text();
    gender_from_label(ctx.raw_text)
        .or_else(|| gender_from_word(ctx.raw_text))
        .or_else(|| gender_from_label(&normalized))
        .or_else(|| gender_from_word(&normalized))
}

/// Aadhaar cards print gender next to the date of birth, so the lines around
/// it are searched before the whole text.
pub fn extract_gender_aadhaar(ctx: &ExtractionContext) -> Extraction {
    if let Some(dob) = ctx.anchors.dob_line {
        let start = dob.saturating_sub(ctx.config.gender_window_before);
        let end = dob
            .saturating_add(ctx.config.gender_window_after)
            .min(ctx.lines.len().saturating_sub(1));

        for (offset, line) in ctx.lines[start..=end].iter().enumerate() {
            let found = gender_from_token(line)
                .or_else(|| gender_from_label(line))
                .or_else(|| {
                    GENDER_STANDALONE.captures(line.trim()).map(|caps| {
                        if caps[1].eq_ignore_ascii_case("f") {
                            "Female"
                        } else {
                            "Male"
                        }
                    })
                });
            if let Some(gender) = found {
                debug!("Gender found near DOB on line {}", start + offset);
                return Extraction::found(gender, Confidence::High, ctx.source());
            }
        }
    }

    match gender_from_text(ctx) {
        Some(gender) => Extraction::found(gender, Confidence::High, ctx.source()),
        None => Extraction::NotFound,
    }
}

pub fn extract_gender_generic(ctx: &ExtractionContext) -> Extraction {
    match gender_from_text(ctx) {
        Some(gender) => Extraction::found(gender, Confidence::High, ctx.source()),
        None => Extraction::NotFound,
    }
}

/// State is only looked for once an address has been found.
pub fn extract_state(ctx: &ExtractionContext) -> Extraction {
    let address = match address::extract_address(ctx) {
        Extraction::Found { value, .. } => value,
        Extraction::NotFound => return Extraction::NotFound,
    };

    let labelled = [address.as_str(), ctx.raw_text].iter().find_map(|text| {
        STATE_LABEL.captures(text).map(|caps| {
            let value = caps[1].to_string();
            canonical_state(&value).map(str::to_string).unwrap_or(value)
        })
    });

    let state = labelled.or_else(|| {
        [address.as_str(), ctx.raw_text].iter().find_map(|text| {
            STATE_NAMES
                .captures(text)
                .and_then(|caps| canonical_state(&caps[1]))
                .map(str::to_string)
        })
    });

    match state {
        Some(state) => Extraction::found(state, Confidence::Medium, ctx.source()),
        None => Extraction::NotFound,
    }
}

fn labelled_relative(ctx: &ExtractionContext, label: &regex::Regex) -> Option<String> {
    let normalized = ctx.normalized_text();
    [ctx.raw_text, normalized.as_str()].iter().find_map(|text| {
        label
            .captures_iter(text)
            .map(|caps| clean_name_capture(&caps[1]))
            .find(|candidate| is_plausible_name(candidate))
    })
}

pub fn extract_father_name(ctx: &ExtractionContext) -> Extraction {
    match labelled_relative(ctx, &FATHER_LABEL) {
        Some(name) => Extraction::found(name, Confidence::Medium, ctx.source()),
        None => Extraction::NotFound,
    }
}

pub fn extract_mother_name(ctx: &ExtractionContext) -> Extraction {
    match labelled_relative(ctx, &MOTHER_LABEL) {
        Some(name) => Extraction::found(name, Confidence::Medium, ctx.source()),
        None => Extraction::NotFound,
    }
}
