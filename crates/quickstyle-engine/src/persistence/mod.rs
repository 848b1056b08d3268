//! Document persistence: a lossless, order-preserving JSON record.
//!
//! [`encode`] and [`decode`] convert between [`DocumentState`] and the
//! serde mirror in [`raw`]. For every reachable state,
//! `decode(encode(s))` has the same blocks, texts, types, depths, data and
//! styles as `s`.
//!
//! [`DocumentState`]: crate::editing::DocumentState

pub mod codec;
pub mod raw;

pub use codec::{DecodeError, decode, encode, from_json, to_json};
pub use raw::{RawBlock, RawDocument, RawEntityRange, RawInlineStyleRange};
