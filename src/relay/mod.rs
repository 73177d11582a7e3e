//! Relay - Exchange signed envelopes with a remote relay
//!
//! The relay stores append-only messages per address and the filters an
//! address owner has applied. All bodies are the wire encoding from
//! [`crate::wire`].
//!
//! # Endpoints
//!
//! | Call | Request | Auth | Body |
//! |------|---------|------|------|
//! | `fetch_messages` | `GET /message/{address}?start=&end=` | token | → `MessageSet` |
//! | `publish_messages` | `PUT /message/{address}` | - | `MessageSet` → |
//! | `fetch_filters` | `GET /message/{address}` | - | → `Filters` |
//! | `apply_filter` | `PUT /message/{address}` | token | `FilterApplication` → |
//!
//! # Status mapping
//!
//! | Response | Result |
//! |----------|--------|
//! | 2xx | `Ok` |
//! | 204 / 404 on a fetch | `Ok(vec![])` |
//! | 401 / 403 | `RelayError::Unauthorized` |
//! | other | `RelayError::Rejected` |
//! | no response | `RelayError::Unreachable` |

pub mod client;

pub use client::RelayClient;
