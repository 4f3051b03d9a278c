//! Conversion between MongoDB `ObjectId`s and their wire representation.
//!
//! Every id leaving the API is rendered as a 24 character lowercase hex
//! string, and every id accepted from a client goes through [`decode`] so a
//! malformed value becomes a client error instead of a store error.

use bson::oid::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid identifier: {0}")]
pub struct InvalidIdentifier(pub String);

pub fn encode(id: &ObjectId) -> String {
    id.to_hex()
}

pub fn encode_opt(id: Option<&ObjectId>) -> Option<String> {
    id.map(encode)
}

pub fn decode(raw: &str) -> Result<ObjectId, InvalidIdentifier> {
    ObjectId::parse_str(raw).map_err(|_| InvalidIdentifier(raw.to_string()))
}
