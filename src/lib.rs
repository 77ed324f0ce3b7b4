//! Encoding and decoding of DNS messages.
//!
//! This crate converts DNS messages between their wire format as described
//! in [RFC 1035] and a structured, owned representation. Decoding works on
//! untrusted data: every length is checked against the data available and
//! any problem results in an error saying where in the message things went
//! wrong. Composing a message produces its wire format octet by octet.
//!
//! All types live in the [base] module and are re-exported from there. The
//! two functions [`encode`] and [`decode`] at the crate root cover the
//! common case of dealing with complete messages:
//!
//! ```
//! use core::str::FromStr;
//! use dnswire::base::{Message, Name, Question, Rtype};
//!
//! let question = Question::new_in(Name::from_str("example.com").unwrap(), Rtype::AAAA);
//! let query = Message::query(4711, question);
//!
//! let wire = dnswire::encode(&query);
//! assert_eq!(dnswire::decode(&wire).unwrap(), query);
//! ```
//!
//! # Limitations
//!
//! Domain names are neither decoded nor encoded with name compression.
//! Decoding a name that contains a compression pointer fails with
//! [`ParseError::UnsupportedCompression`][base::ParseError]. Resolving
//! compressed names needs access to the whole message and has to happen
//! before messages get here.
//!
//! Record data is never interpreted. It is kept as an opaque octets sequence
//! of the length given in the record.
//!
//! # Logging
//!
//! The crate emits [tracing] events when decoding and composing messages:
//! trace level for each message and debug level when decoding fails. It
//! never installs a subscriber.
//!
//! # Reference of Feature Flags
//!
//! * `rand` (enabled by default): adds functions for creating random
//!   message IDs via the [rand](https://github.com/rust-random/rand) crate.
//! * `serde`: enables serialization and deserialization of all data types
//!   via [serde](https://serde.rs/). Domain names and the IANA parameters
//!   use their presentation format in human readable formats.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::vec::Vec;

pub mod base;

/// Returns the wire format of a message.
///
/// The header section is written exactly as it is kept in the message. The
/// counts are not recalculated from the sections.
#[must_use]
pub fn encode(message: &base::Message) -> Vec<u8> {
    message.to_vec()
}

/// Decodes a message from the beginning of `data`.
///
/// Octets left after the message are ignored. Use
/// [`Message::decode`][base::Message::decode] to learn how many octets were
/// consumed.
pub fn decode(data: &[u8]) -> Result<base::Message, base::DecodeError> {
    base::Message::decode(data).map(|(_, message)| message)
}
