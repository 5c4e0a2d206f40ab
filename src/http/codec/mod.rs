//! Query API value codec.
//!
//! The wire carries every value as a tagged JSON object
//! `{"$type": ..., "_value": ...}`:
//!
//! - **Scalars** - string payloads (`Integer`, `Float`, temporals,
//!   `Duration`, `Point`, `Base64`), boolean for `Boolean`, null for
//!   `Null`
//! - **Collections** - `Map` and `List` of nested tagged values
//! - **Graph entities** - `Node`, `Relationship`, and `Path` as an
//!   alternating node/relationship sequence
//!
//! Decoding runs under an [`IntegerPolicy`] chosen at construction;
//! encoding accepts caller values and rejects graph entities.

pub mod decoder;
pub mod encoder;
pub mod integers;
pub mod scalars;
pub mod wire;

pub use decoder::ValueDecoder;
pub use encoder::{encode_parameters, encode_value};
pub use integers::IntegerPolicy;
pub use wire::{WireNode, WireRelationship, WireValue};
