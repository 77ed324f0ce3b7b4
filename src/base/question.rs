//! A single question in a DNS message.
//!
//! This module defines the type [`Question`] which represents an entry in
//! the question section of a DNS message.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::wire::{
    decode_slice, parse_repeated, DecodeError, Parse, ParseError,
};
use core::fmt;
use octseq::builder::{infallible, OctetsBuilder};
use octseq::parse::Parser;
use std::vec::Vec;

//------------ Question ------------------------------------------------------

/// A question in a DNS message.
///
/// In DNS, a question describes what is requested in a query. It consists
/// of three elements: a domain name, a record type, and a class. This type
/// represents such a question.
///
/// The same three elements also start each resource record, so a
/// [`Record`] keeps its owner, type, and class as a question.
///
/// [`Record`]: super::record::Record
#[derive(Clone, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Question {
    /// The domain name of the question.
    qname: Name,

    /// The record type of the question.
    qtype: Rtype,

    /// The class of the question.
    qclass: Class,
}

/// # Creation and Conversion
///
impl Question {
    /// The length of the type and class fields in wire format.
    const TYPE_CLASS_LEN: usize = 4;

    /// Creates a new question from its three components.
    #[must_use]
    pub fn new(qname: Name, qtype: Rtype, qclass: Class) -> Self {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    /// Creates a new question from a name and record type, assuming class IN.
    #[must_use]
    pub fn new_in(qname: Name, qtype: Rtype) -> Self {
        Question {
            qname,
            qtype,
            qclass: Class::IN,
        }
    }

    /// Converts the question into the qname.
    pub fn into_qname(self) -> Name {
        self.qname
    }
}

/// # Field Access
///
impl Question {
    /// Returns a reference to the domain name in the question,
    pub fn qname(&self) -> &Name {
        &self.qname
    }

    /// Returns the record type of the question.
    pub fn qtype(&self) -> Rtype {
        self.qtype
    }

    /// Returns the class of the question.
    pub fn qclass(&self) -> Class {
        self.qclass
    }
}

//--- From

impl From<(Name, Rtype, Class)> for Question {
    fn from((name, rtype, class): (Name, Rtype, Class)) -> Self {
        Question::new(name, rtype, class)
    }
}

impl From<(Name, Rtype)> for Question {
    fn from((name, rtype): (Name, Rtype)) -> Self {
        Question::new_in(name, rtype)
    }
}

/// # Parsing and Composing
///
impl Question {
    /// Takes a question from the beginning of a parser.
    ///
    /// Errors of the name are passed through unchanged. If less than four
    /// octets are left after the name, fails with
    /// [`ParseError::MissingTypeClass`] leaving the parser right after the
    /// name.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let qname = Name::parse(parser)?;
        if parser.remaining() < Self::TYPE_CLASS_LEN {
            return Err(ParseError::MissingTypeClass);
        }
        Ok(Question::new(
            qname,
            Rtype::parse(parser)?,
            Class::parse(parser)?,
        ))
    }

    /// Decodes a question from the beginning of `data`.
    ///
    /// On success, returns the number of octets consumed and the question.
    pub fn decode(data: &[u8]) -> Result<(usize, Self), DecodeError> {
        decode_slice(data, |parser| Ok(Self::parse(parser)?))
    }

    /// Decodes exactly `count` consecutive questions from `data`.
    ///
    /// Returns an empty vector without looking at `data` if `count` is
    /// zero. If the question with the 1-based index `i` is malformed, the
    /// error carries that index and the number of octets consumed by all
    /// questions up to and including the failed attempt.
    pub fn decode_many(
        count: u16,
        data: &[u8],
    ) -> Result<(usize, Vec<Self>), DecodeError> {
        decode_slice(data, |parser| parse_repeated(parser, count, "question"))
    }

    /// Returns the length of the question in wire format.
    pub fn compose_len(&self) -> usize {
        self.qname.compose_len() + Self::TYPE_CLASS_LEN
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.qname.compose(target)?;
        self.qtype.compose(target)?;
        self.qclass.compose(target)
    }

    /// Returns the wire format of the question.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.compose_len());
        infallible(self.compose(&mut res));
        res
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for Question {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        Self::parse(parser)
    }
}

//--- Display and Debug

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.qname, self.qtype, self.qclass)
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Question")
            .field("qname", &self.qname)
            .field("qtype", &self.qtype)
            .field("qclass", &self.qclass)
            .finish()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    fn question(name: &str, qtype: u16, qclass: u16) -> Question {
        Question::new(
            Name::from_str(name).unwrap(),
            Rtype::from_int(qtype),
            Class::from_int(qclass),
        )
    }

    #[test]
    fn wire_format() {
        let com = question("com", 1, 1);
        let wire = b"\x03com\x00\x00\x01\x00\x01";
        assert_eq!(com.to_vec(), wire);
        assert_eq!(com.compose_len(), 9);
        assert_eq!(Question::decode(wire), Ok((9, com)));

        let com = question("com", 1, 2);
        assert_eq!(com.to_vec(), b"\x03com\x00\x00\x01\x00\x02");
    }

    #[test]
    fn missing_type_class() {
        for len in 5..9 {
            let wire = &b"\x03com\x00\x00\x01\x00\x01"[..len];
            let err = Question::decode(wire).unwrap_err();
            assert_eq!(err.kind(), ParseError::MissingTypeClass);
            assert_eq!(err.consumed(), 5);
        }
    }

    #[test]
    fn name_errors_pass_through() {
        let err = Question::decode(b"").unwrap_err();
        assert_eq!(err.kind(), ParseError::EmptyInput);
        let err = Question::decode(b"\xC0\x0C\x00\x01\x00\x01").unwrap_err();
        assert_eq!(err.kind(), ParseError::UnsupportedCompression);
        assert_eq!(err.consumed(), 1);
    }

    #[test]
    fn decode_many() {
        let mut wire = question("com", 1, 2).to_vec();
        wire.extend_from_slice(&question("fr", 3, 4).to_vec());
        let (len, questions) = Question::decode_many(2, &wire).unwrap();
        assert_eq!(len, 17);
        assert_eq!(
            questions,
            [question("com", 1, 2), question("fr", 3, 4)]
        );

        assert_eq!(Question::decode_many(0, b""), Ok((0, Vec::new())));
        assert_eq!(Question::decode_many(1, &wire), Ok((9, questions[..1].to_vec())));
    }

    #[test]
    fn decode_many_reports_failing_index() {
        let mut wire = Vec::new();
        wire.extend_from_slice(&question("com", 1, 1).to_vec());
        wire.extend_from_slice(&question("fr", 1, 1).to_vec());
        wire.extend_from_slice(b"\x02nl\x00\x00\x01");
        let err = Question::decode_many(5, &wire).unwrap_err();
        assert_eq!(err.kind(), ParseError::MissingTypeClass);
        assert_eq!(err.index(), Some(3));
        assert_eq!(err.consumed(), 9 + 8 + 4);
        assert_eq!(
            err.to_string(),
            "question 3 of 5: missing type and class"
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            question("www.example.com", 28, 1).to_string(),
            "www.example.com.\tAAAA\tIN"
        );
    }
}
