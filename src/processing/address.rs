// Address extraction.

use log::debug;

use crate::models::{Confidence, Extraction};
use crate::processing::context::ExtractionContext;
use crate::processing::patterns::{
    AADHAAR_NUMBER, ADDRESS_LABEL, COMMA_RUN, DATE, GENDER_ONLY_LINE, GENDER_WORD, NUMERIC_LINE,
    SHORT_PAIR_LINE, WHITESPACE_RUN,
};
use crate::processing::strategy::StrategyFamily;
use crate::validation::name::char_ratio;

const MIN_ADDRESS_LEN: usize = 10;

fn graded(address: String, ctx: &ExtractionContext) -> Extraction {
    let length = address.chars().count();
    if length < MIN_ADDRESS_LEN {
        return Extraction::NotFound;
    }
    let confidence = if length > 20 { Confidence::Medium } else { Confidence::Low };
    Extraction::found(address, confidence, ctx.source())
}

fn tidy(address: &str) -> String {
    let address = WHITESPACE_RUN.replace_all(address, " ");
    let address = COMMA_RUN.replace_all(&address, ",");
    address
        .trim()
        .trim_start_matches(',')
        .trim_end_matches(',')
        .trim()
        .to_string()
}

fn is_address_line(line: &str) -> bool {
    let length = line.chars().count();
    if !(10..=80).contains(&length) {
        return false;
    }
    if NUMERIC_LINE.is_match(line)
        || SHORT_PAIR_LINE.is_match(line)
        || AADHAAR_NUMBER.is_match(line)
        || DATE.is_match(line)
        || GENDER_ONLY_LINE.is_match(line)
        || GENDER_WORD.is_match(line)
    {
        return false;
    }
    let special = char_ratio(line, |c| {
        !(c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, ',' | '.' | '-'))
    });
    special < 0.3
}

/// Aadhaar layout: address lines run from just after the date of birth up to
/// (not including) the line carrying the pincode.
pub fn extract_address_aadhaar(ctx: &ExtractionContext) -> Extraction {
    let start = ctx.anchors.dob_line.map_or(0, |dob| dob + 1);
    let end = ctx.anchors.pincode_line.unwrap_or(ctx.lines.len());
    if start >= end {
        return Extraction::NotFound;
    }

    let kept: Vec<&str> = ctx.lines[start..end]
        .iter()
        .map(String::as_str)
        .filter(|line| is_address_line(line))
        .take(ctx.config.max_address_lines)
        .collect();
    debug!("Address assembled from {} of {} candidate line(s)", kept.len(), end - start);

    if kept.is_empty() {
        return Extraction::NotFound;
    }
    graded(tidy(&kept.join(", ")), ctx)
}

/// Other documents: whatever follows an `Address` label.
pub fn extract_address_generic(ctx: &ExtractionContext) -> Extraction {
    match ADDRESS_LABEL.captures(ctx.raw_text) {
        Some(caps) => graded(tidy(&caps[1]), ctx),
        None => Extraction::NotFound,
    }
}

/// Address extractor for the context's strategy family.
pub fn extract_address(ctx: &ExtractionContext) -> Extraction {
    match ctx.family() {
        StrategyFamily::AadhaarSpecialized => extract_address_aadhaar(ctx),
        StrategyFamily::Generic => extract_address_generic(ctx),
    }
}
