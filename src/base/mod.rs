//! Basics.
//!
//! This module provides the types for working with DNS messages and their
//! parts as well as the means to convert them from and to their wire
//! format.
//!
//!
//! ## Parsing and Composing Messages
//!
//! In order to easily distinguish the process of creating and dissecting
//! wire-format messages from other forms of representation conversion, we
//! use the term *parsing* for extracting data from a wire-format
//! representation and *composing* for producing such a representation.
//!
//! Parsing happens on an [`octseq::parse::Parser`] that keeps track of the
//! position in the data. Each type has a `parse` function that takes its
//! value from the parser and leaves the parser right behind it. If parsing
//! fails, the parser stays where the problem was discovered. On top of
//! that, each type has a `decode` function that works on an octets slice
//! and returns the number of octets consumed together with the value or,
//! if things go wrong, a [`DecodeError`] which carries that number.
//!
//! Composing appends the wire format to an octets builder via a type’s
//! `compose` method. For a `Vec<u8>`, this can’t fail, so every type also
//! has a `to_vec` method returning its wire format. All values are checked
//! when they are created, so there is nothing left that could go wrong
//! while composing.
//!
//!
//! # Types for DNS Data
//!
//! The types are arranged in submodules. You will find detailed
//! explanations for all of them in their module. These are:
//!
//! * [header] for the header of DNS messages,
//! * [iana] for the various parameters registered with IANA,
//! * [name] for domain names,
//! * [question] for questions,
//! * [rdata] for opaque record data,
//! * [record] for DNS resource records, and
//! * [message] for complete messages.
//!
//! The [wire] module holds the traits and errors shared by all of them.

pub use self::header::{Flags, Header, HeaderCounts, HeaderSection};
pub use self::iana::{Class, Opcode, Rcode, Rtype};
pub use self::message::{LongSectionError, Message, MessageIter};
pub use self::name::{Label, LongLabelError, Name, NameError};
pub use self::question::Question;
pub use self::rdata::{LongRecordData, RecordData};
pub use self::record::{Record, Ttl};
pub use self::wire::{DecodeError, ParseError, Section};

mod dig_printer;
pub mod header;
pub mod iana;
pub mod message;
pub mod name;
pub mod question;
pub mod rdata;
pub mod record;
pub mod wire;
