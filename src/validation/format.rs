//! Structural plausibility checks for identifier-like field values.
//!
//! These only look at shape and numeric ranges. A date such as `31/02/2000`
//! passes: day-per-month and leap-year rules are not enforced.

pub fn is_valid_aadhaar(digits: &str) -> bool {
    digits.len() == 12 && digits.chars().all(|c| c.is_ascii_digit())
}

/// Render twelve Aadhaar digits as `XXXX XXXX XXXX`.
pub fn format_aadhaar(candidate: &str) -> Option<String> {
    let digits: String = candidate.chars().filter(|c| !c.is_whitespace()).collect();
    if !is_valid_aadhaar(&digits) {
        return None;
    }
    Some(format!("{} {} {}", &digits[0..4], &digits[4..8], &digits[8..12]))
}

/// Five letters, four digits, one letter.
pub fn is_valid_pan(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    chars.len() == 10
        && chars[0..5].iter().all(|c| c.is_ascii_uppercase())
        && chars[5..9].iter().all(|c| c.is_ascii_digit())
        && chars[9].is_ascii_uppercase()
}

pub fn is_valid_pincode(value: &str) -> bool {
    if value.len() != 6 || !value.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    match value.parse::<u32>() {
        Ok(pin) => (100_000..=999_999).contains(&pin),
        Err(_) => false,
    }
}

/// Parse `D/M/Y` (separators `/`, `-` or `.`) into its numeric parts.
pub fn parse_date_parts(value: &str) -> Option<(u32, u32, u32)> {
    let parts: Vec<&str> = value.split(|c| c == '/' || c == '-' || c == '.').collect();
    if parts.len() != 3 {
        return None;
    }
    let day = parts[0].trim().parse::<u32>().ok()?;
    let month = parts[1].trim().parse::<u32>().ok()?;
    let year = parts[2].trim().parse::<u32>().ok()?;
    Some((day, month, year))
}

pub fn is_valid_date_of_birth(value: &str) -> bool {
    match parse_date_parts(value) {
        Some((day, month, year)) => {
            (1..=31).contains(&day) && (1..=12).contains(&month) && (1900..=2100).contains(&year)
        }
        None => false,
    }
}

/// Ten digits starting 6-9.
pub fn is_valid_mobile(value: &str) -> bool {
    value.len() == 10
        && value.chars().all(|c| c.is_ascii_digit())
        && matches!(value.chars().next(), Some('6'..='9'))
}
