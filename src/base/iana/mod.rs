//! IANA Definitions for DNS.
//!
//! This module contains types for the parameters defined in IANA registries
//! that appear in the fixed fields of messages, questions, and records.
//!
//! All types defined hereunder follow the same basic structure. They wrap
//! a raw integer and provide associated constants for the well-defined
//! values. Since we cannot restrict that integer to only the defined values,
//! we generally allow the full set of possible values.
//!
//! There are two methods `from_int()` and `to_int()` to convert from and
//! to raw integer values as well as implementations of the `From` trait
//! for these. `FromStr` and `Display` are implemented to convert from
//! the string codes to the values and back.
//!
//! Types also implement `parse()` for creation from wire format as well as
//! a `compose()` method for composing into wire format data.
//!
//! While each parameter type has a module of its own, they are all
//! re-exported here. This is mostly so we can have associated types like
//! `FromStrError` without having to resort to devilishly long names.

pub use self::class::Class;
pub use self::opcode::Opcode;
pub use self::rcode::Rcode;
pub use self::rtype::Rtype;

#[macro_use]
mod macros;

pub mod class;
pub mod opcode;
pub mod rcode;
pub mod rtype;
