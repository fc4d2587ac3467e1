//! Client facade for veilbin.
//!
//! [`SiteClient`] turns the wire protocol into five logical operations
//! for a caller holding a site identity and shared secret: `register`,
//! `store`, `retrieve`, `update`, `delete`. All encryption happens here;
//! the server only ever sees ciphertext and the secret's fingerprint.

pub mod api;
mod site;

pub use api::{ApiClient, ApiError, ApiRequest};
pub use site::{ClientError, DecryptedRecord, SiteClient};
