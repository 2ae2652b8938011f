pub mod serialized_error;
pub use serialized_error::*;

pub mod serialized_value;
pub use serialized_value::*;

pub mod serialized_parser;
pub use serialized_parser::*;

/// Decode a legacy serialized payload and re-encode it as a JSON string.
pub fn serialized_to_json(payload: &[u8]) -> Result<String, crate::normalizer::TransformError> {
    let value = SerializedParser::parse(payload)?;
    let json = value.to_json()?;
    Ok(serde_json::to_string(&json)?)
}
