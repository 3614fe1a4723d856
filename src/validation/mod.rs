pub mod format;
pub mod name;

pub use format::{
    format_aadhaar, is_valid_aadhaar, is_valid_date_of_birth, is_valid_mobile, is_valid_pan,
    is_valid_pincode,
};
pub use name::{is_boilerplate, is_plausible_name};
