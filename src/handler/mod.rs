pub mod fallback_handler;
pub mod material_handler;
pub mod quote_handler;

use crate::util::error::HandlerError;
use std::collections::HashMap;

/// Item id from the `id` query parameter. PUT and DELETE without one are not supported.
pub(crate) fn require_id(params: &HashMap<String, String>) -> Result<&str, HandlerError> {
    params
        .get("id")
        .map(String::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(HandlerError::method_not_allowed)
}
