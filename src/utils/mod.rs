pub mod address;
pub mod validation;

pub use address::to_checksum_address;
pub use validation::{
    normalize_body, normalize_hash_field, require_address_param, validate_and_checksum_url_param,
    validate_and_parse_request_body, BodyFields, ValidationError,
};
