use crate::util::error::HandlerError;

pub async fn not_found_handler() -> HandlerError {
    HandlerError::not_found("Endpoint não encontrado. Use /produtos ou /orcamentos.")
}

pub async fn method_not_allowed_handler() -> HandlerError {
    HandlerError::method_not_allowed()
}
