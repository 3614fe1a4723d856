// Precompiled field patterns and closed vocabularies.

use lazy_static::lazy_static;
use regex::Regex;

/// Indian states and union territories, in canonical spelling.
pub const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

lazy_static! {
    pub static ref AADHAAR_NUMBER: Regex =
        Regex::new(concat!(
            r"(?i)(?:aadhaa?r(?:[ \t]*(?:no\.?|number))?[ \t]*:?[ \t]*)?",
            r"\b(\d{4}[ \t]?\d{4}[ \t]?\d{4})\b",
        ))
        .unwrap();
    pub static ref PAN_NUMBER: Regex =
        Regex::new(concat!(
            r"(?:(?i:pan)(?:[ \t]*(?i:no\.?|number))?[ \t]*:?[ \t]*)?",
            r"\b([A-Z]{5}[0-9]{4}[A-Z])\b",
        ))
        .unwrap();
    pub static ref DATE: Regex = Regex::new(r"\b(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4})\b").unwrap();
    pub static ref DOB_LABEL: Regex =
        Regex::new(concat!(
            r"(?i)(?:\bdob|\bd\.o\.b\.?|date[ \t]+of[ \t]+birth|\bbirth)[ \t]*[:\-]?[ \t]*",
            r"(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4})\b",
        ))
        .unwrap();
    pub static ref SIX_DIGITS: Regex = Regex::new(r"\b(\d{6})\b").unwrap();
    pub static ref MOBILE: Regex =
        Regex::new(r"(?:^|[^\d])(?:\+?91[ \-]?|0)?([6-9]\d{4}[ ]?\d{5})(?:$|[^\d])").unwrap();

    /// MALE / FEMALE with up to three stray letters on either side.
    pub static ref FEMALE_TOKEN: Regex = Regex::new(r"(?i)[a-z]{0,3}FEMALE[a-z]{0,3}").unwrap();
    pub static ref MALE_TOKEN: Regex = Regex::new(r"(?i)[a-z]{0,3}MALE[a-z]{0,3}").unwrap();
    pub static ref GENDER_LABEL: Regex =
        Regex::new(r"(?i)\b(?:gender|sex)[ \t]*[:/]?[ \t]*(female|male|f|m)\b").unwrap();
    pub static ref GENDER_WORD: Regex = Regex::new(r"(?i)\b(female|male)\b").unwrap();
    pub static ref GENDER_STANDALONE: Regex = Regex::new(r"(?i)^([mf])$").unwrap();

    pub static ref NAME_LABEL_LINE: Regex =
        Regex::new(r"(?i)\bname[\s:]+([a-z][a-z\s]{2,50})").unwrap();
    pub static ref NAME_LABEL_TEXT: Regex =
        Regex::new(concat!(
            r"(?i)\bname\b[ \t]*[:\-]?[ \t]*\r?\n?[ \t]*",
            r"([a-z]+(?:[ \t]+[a-z]+){1,3})",
        ))
        .unwrap();
    pub static ref FATHER_LABEL: Regex =
        Regex::new(concat!(
            r"(?i)(?:\bfather(?:'?s)?(?:[ \t]+name)?|\b[sdc][ \t]*/[ \t]*o\b)",
            r"[ \t]*[:\-,]?[ \t]*\r?\n?[ \t]*",
            r"([a-z]+(?:[ \t]+[a-z]+){1,3})",
        ))
        .unwrap();
    pub static ref MOTHER_LABEL: Regex =
        Regex::new(concat!(
            r"(?i)\bmother(?:'?s)?(?:[ \t]+name)?",
            r"[ \t]*[:\-,]?[ \t]*\r?\n?[ \t]*",
            r"([a-z]+(?:[ \t]+[a-z]+){1,3})",
        ))
        .unwrap();

    pub static ref NAME_NOISE_PREFIX: Regex =
        Regex::new(r"(?i)^(?:El|La|Le|The|A|An|H|E)\s+").unwrap();
    pub static ref NAME_NOISE_SUFFIX: Regex = Regex::new(r"(?i)\s+(?:HE|HI|H|E)$").unwrap();
    pub static ref STRAY_LEADING_LETTER: Regex = Regex::new(r"^[A-Z]\s+").unwrap();
    pub static ref STRAY_TRAILING_LETTER: Regex = Regex::new(r"\s+[A-Z]$").unwrap();
    pub static ref TRAILING_DIGITS: Regex = Regex::new(r"\d+$").unwrap();

    pub static ref ADDRESS_LABEL: Regex =
        Regex::new(r"(?i)address[\s:]*([A-Za-z0-9\s,.\-]{10,100})").unwrap();
    pub static ref STATE_LABEL: Regex =
        Regex::new(r"(?:State|STATE)[ \t]*:[ \t]*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*)").unwrap();
    pub static ref STATE_NAMES: Regex = {
        let alternation = INDIAN_STATES
            .iter()
            .map(|s| s.replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b({})\b", alternation)).unwrap()
    };

    pub static ref NUMERIC_LINE: Regex = Regex::new(r"^[\d\s]+$").unwrap();
    pub static ref SHORT_PAIR_LINE: Regex = Regex::new(r"^[A-Z]{1,2}\s[A-Z]{1,2}$").unwrap();
    pub static ref GENDER_ONLY_LINE: Regex = Regex::new(r"(?i)^(?:MALE|FEMALE|M|F)$").unwrap();
    pub static ref COMMA_RUN: Regex = Regex::new(r",\s*,").unwrap();
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Map any casing/spacing of a state name back to its canonical spelling.
pub fn canonical_state(matched: &str) -> Option<&'static str> {
    let wanted = matched.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    INDIAN_STATES.iter().copied().find(|s| s.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_lookup_is_case_and_space_insensitive() {
        let caps = STATE_NAMES.captures("Bengaluru, KARNATAKA 560001").unwrap();
        assert_eq!(canonical_state(&caps[1]), Some("Karnataka"));

        let caps = STATE_NAMES.captures("Lucknow uttar   pradesh").unwrap();
        assert_eq!(canonical_state(&caps[1]), Some("Uttar Pradesh"));
    }

    #[test]
    fn test_state_names_need_word_boundaries() {
        assert!(STATE_NAMES.captures("Goals and Assamese").is_none());
    }

    #[test]
    fn test_mobile_with_country_code() {
        let caps = MOBILE.captures("Mobile: +91 98765 43210").unwrap();
        assert_eq!(&caps[1], "98765 43210");
        let caps = MOBILE.captures("+919876543210").unwrap();
        assert_eq!(&caps[1], "9876543210");
    }

    #[test]
    fn test_mobile_ignores_aadhaar_runs() {
        assert!(MOBILE.captures("987654321012").is_none());
    }
}
