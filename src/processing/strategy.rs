use crate::models::{DocumentType, Extraction, FieldKey};
use crate::processing::address::{extract_address_aadhaar, extract_address_generic};
use crate::processing::context::ExtractionContext;
use crate::processing::extractors::*;
use crate::processing::name::{extract_name_aadhaar, extract_name_generic};

pub type ExtractorFn = fn(&ExtractionContext) -> Extraction;

/// Which set of heuristics a document type is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyFamily {
    AadhaarSpecialized,
    Generic,
}

impl StrategyFamily {
    pub fn for_document(document_type: DocumentType) -> Self {
        match document_type {
            DocumentType::Aadhaar => StrategyFamily::AadhaarSpecialized,
            DocumentType::Pan
            | DocumentType::VoterId
            | DocumentType::DrivingLicense
            | DocumentType::Passport
            | DocumentType::Other => StrategyFamily::Generic,
        }
    }

    pub fn extractors(&self) -> &'static [FieldStrategy] {
        match self {
            StrategyFamily::AadhaarSpecialized => AADHAAR_STRATEGIES,
            StrategyFamily::Generic => GENERIC_STRATEGIES,
        }
    }
}

#[derive(Clone, Copy)]
pub struct FieldStrategy {
    pub key: FieldKey,
    pub extract: ExtractorFn,
}

const fn field(key: FieldKey, extract: ExtractorFn) -> FieldStrategy {
    FieldStrategy { key, extract }
}

static AADHAAR_STRATEGIES: &[FieldStrategy] = &[
    field(FieldKey::AadhaarNumber, extract_aadhaar_number),
    field(FieldKey::DateOfBirth, extract_date_of_birth),
    field(FieldKey::FullName, extract_name_aadhaar),
    field(FieldKey::Gender, extract_gender_aadhaar),
    field(FieldKey::PanNumber, extract_pan_number),
    field(FieldKey::Pincode, extract_pincode),
    field(FieldKey::Address, extract_address_aadhaar),
    field(FieldKey::State, extract_state),
    field(FieldKey::FatherName, extract_father_name),
    field(FieldKey::MotherName, extract_mother_name),
    field(FieldKey::MobileNumber, extract_mobile_number),
];

static GENERIC_STRATEGIES: &[FieldStrategy] = &[
    field(FieldKey::AadhaarNumber, extract_aadhaar_number),
    field(FieldKey::DateOfBirth, extract_date_of_birth),
    field(FieldKey::FullName, extract_name_generic),
    field(FieldKey::Gender, extract_gender_generic),
    field(FieldKey::PanNumber, extract_pan_number),
    field(FieldKey::Pincode, extract_pincode),
    field(FieldKey::Address, extract_address_generic),
    field(FieldKey::State, extract_state),
    field(FieldKey::FatherName, extract_father_name),
    field(FieldKey::MotherName, extract_mother_name),
    field(FieldKey::MobileNumber, extract_mobile_number),
];
