//! Wire - Deterministic protobuf encoding of relay envelopes
//!
//! Every type the relay sees is a prost message. prost writes fields in tag
//! order, omits proto3 defaults and keeps repeated fields in insertion order,
//! so the same logical value always produces the same bytes. Signatures are
//! computed over those bytes.
//!
//! | Type | Fields |
//! |------|--------|
//! | `Entry` | 1 `kind` string, 2 `entry_data` bytes |
//! | `Payload` | 1 `timestamp` int64, 2 `entries` repeated Entry |
//! | `Message` | 1 `pub_key`, 2 `signature`, 3 `scheme` int32, 4 `serialized_payload` |
//! | `MessageSet` | 1 `messages` repeated Message |
//! | `PriceFilter` | 1 `public` bool, 2 `acceptance_price` uint64, 3 `notification_price` uint64 |
//! | `Filter` | oneof { 1 `price_filter` } |
//! | `Filters` | 1 `filters` repeated Filter |
//! | `FilterApplication` | same fields as `Message` |

mod filters;
mod messages;

pub use filters::{filter, Filter, FilterApplication, Filters, PriceFilter};
pub use messages::{Entry, Message, MessageSet, Payload, TEXT_UTF8};

use crate::error::EnvelopeError;

/// Serialize any wire type.
pub fn encode<M: prost::Message>(msg: &M) -> Vec<u8> {
    msg.encode_to_vec()
}

/// Deserialize a wire type, failing with [`EnvelopeError::Malformed`] on
/// truncated input, a wire-type mismatch or invalid UTF-8 in a string field.
pub fn decode<M: prost::Message + Default>(bytes: &[u8]) -> Result<M, EnvelopeError> {
    Ok(M::decode(bytes)?)
}
