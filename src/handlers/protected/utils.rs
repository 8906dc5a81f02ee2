use uuid::Uuid;

use crate::error::ApiError;

/// Path identifiers are always UUIDs on the wire; anything else is a 400
/// before any lookup happens.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("malformatted id"))
}
