//! Resource Records.
//!
//! This module defines the type [`Record`] representing a resource record
//! as it appears in the answer, authority, and additional sections of a
//! DNS message, as well as the [`Ttl`] type for its time-to-live.
//!
//! A resource record starts with the same three fields as a question: the
//! owner name, the record type, and the class. These are followed by the
//! TTL and the record data which is kept opaque.

use super::iana::{Class, Rtype};
use super::name::Name;
use super::question::Question;
use super::rdata::RecordData;
use super::wire::{
    decode_slice, parse_repeated, Compose, DecodeError, Parse, ParseError,
};
use core::fmt;
use core::time::Duration;
use octseq::builder::{infallible, OctetsBuilder};
use octseq::parse::Parser;
use std::vec::Vec;

//------------ Record --------------------------------------------------------

/// A DNS resource record.
///
/// All information available through the DNS is stored in resource records.
/// They have a three part key of a domain name, resource record type, and
/// class. Data is arranged in a tree which is navigated using the domain
/// name. Each node in the tree carries a label, starting with the root
/// label as the top-most node. The tree is traversed by stepping through the
/// name from right to left, finding a child node carring the label of each
/// step. The domain name resulting from this traversal is called the owner
/// name of the record.
///
/// The key part of the record is kept as a [`Question`]. In addition, each
/// record has a time-to-live, or TTL, that says how long the record may be
/// cached, and its data. The data is never interpreted and thus kept as
/// an opaque [`RecordData`] value.
///
/// In wire format, the length of the record data is transmitted right
/// before the data. It is not stored with the record but derived from the
/// data whenever the record is composed.
#[derive(Clone, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// The owner name, record type, and class.
    question: Question,

    /// The maximum caching time.
    ttl: Ttl,

    /// The record data.
    data: RecordData,
}

/// # Creation and Element Access
///
impl Record {
    /// The length of the TTL and data length fields.
    const TTL_RDLEN_LEN: usize = 6;

    /// Creates a new record from its parts.
    #[must_use]
    pub fn new(
        owner: Name,
        rtype: Rtype,
        class: Class,
        ttl: Ttl,
        data: RecordData,
    ) -> Self {
        Record::from_question(Question::new(owner, rtype, class), ttl, data)
    }

    /// Creates a new record from its key part, TTL, and data.
    #[must_use]
    pub fn from_question(question: Question, ttl: Ttl, data: RecordData) -> Self {
        Record {
            question,
            ttl,
            data,
        }
    }

    /// Returns the key part of the record.
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Returns a reference to the owner domain name.
    ///
    /// The owner of a record is the domain name that specifies the node in
    /// the DNS tree this record belongs to.
    pub fn owner(&self) -> &Name {
        self.question.qname()
    }

    /// Returns the record type.
    pub fn rtype(&self) -> Rtype {
        self.question.qtype()
    }

    /// Returns the record class.
    pub fn class(&self) -> Class {
        self.question.qclass()
    }

    /// Returns the record’s time-to-live.
    pub fn ttl(&self) -> Ttl {
        self.ttl
    }

    /// Sets the record’s time-to-live.
    pub fn set_ttl(&mut self, ttl: Ttl) {
        self.ttl = ttl
    }

    /// Return a reference to the record data.
    pub fn data(&self) -> &RecordData {
        &self.data
    }

    /// Trades the record for its key part and data.
    pub fn into_question_and_data(self) -> (Question, RecordData) {
        (self.question, self.data)
    }
}

/// # Parsing and Composing
///
impl Record {
    /// Takes a record from the beginning of a parser.
    ///
    /// Errors of the owner, type, and class are those of [`Question`]. If
    /// less than six octets are left after the class, fails with
    /// [`ParseError::MissingTtlOrLength`]. If the data is shorter than
    /// announced, fails with [`ParseError::TruncatedRData`].
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let question = Question::parse(parser)?;
        if parser.remaining() < Self::TTL_RDLEN_LEN {
            return Err(ParseError::MissingTtlOrLength);
        }
        let ttl = Ttl::parse(parser)?;
        let data = RecordData::parse(parser)?;
        Ok(Record::from_question(question, ttl, data))
    }

    /// Decodes a record from the beginning of `data`.
    ///
    /// On success, returns the number of octets consumed and the record.
    pub fn decode(data: &[u8]) -> Result<(usize, Self), DecodeError> {
        decode_slice(data, |parser| Ok(Self::parse(parser)?))
    }

    /// Decodes exactly `count` consecutive records from `data`.
    ///
    /// This behaves like [`Question::decode_many`].
    pub fn decode_many(
        count: u16,
        data: &[u8],
    ) -> Result<(usize, Vec<Self>), DecodeError> {
        decode_slice(data, |parser| parse_repeated(parser, count, "record"))
    }

    /// Returns the length of the record in wire format.
    pub fn compose_len(&self) -> usize {
        self.question.compose_len()
            + usize::from(Ttl::COMPOSE_LEN)
            + self.data.compose_len()
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.question.compose(target)?;
        self.ttl.compose(target)?;
        self.data.compose(target)
    }

    /// Returns the wire format of the record.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.compose_len());
        infallible(self.compose(&mut res));
        res
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for Record {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        Self::parse(parser)
    }
}

//--- Display and Debug

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.owner(),
            self.ttl.as_secs(),
            self.class(),
            self.rtype(),
            self.data
        )
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Record")
            .field("owner", self.owner())
            .field("rtype", &self.rtype())
            .field("class", &self.class())
            .field("ttl", &self.ttl)
            .field("data", &self.data)
            .finish()
    }
}

//------------ Ttl -----------------------------------------------------------

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_HOUR: u32 = 3600;
const SECS_PER_DAY: u32 = 86400;

/// The time a record may be cached, in seconds.
///
/// TTL values have a precision of one second and are transmitted as an
/// unsigned 32 bit integer. Values with the most significant bit set are
/// kept as they are even though [RFC 2181] suggests to treat them as zero.
///
/// [`Ttl::from_duration_lossy`] and [`Ttl::into_duration`] convert between
/// `Ttl` and [`Duration`].
///
/// [RFC 2181]: https://datatracker.ietf.org/doc/html/rfc2181#section-8
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ttl(u32);

impl Ttl {
    /// A time-to-live of one second.
    pub const SECOND: Ttl = Ttl::from_secs(1);

    /// A time-to-live of one minute.
    pub const MINUTE: Ttl = Ttl::from_mins(1);

    /// A time-to-live of one hour.
    pub const HOUR: Ttl = Ttl::from_hours(1);

    /// A time-to-live of one day.
    pub const DAY: Ttl = Ttl::from_days(1);

    /// A duration of zero time.
    pub const ZERO: Ttl = Ttl::from_secs(0);

    /// The maximum theoretical time to live.
    pub const MAX: Ttl = Ttl::from_secs(u32::MAX);

    pub const COMPOSE_LEN: u16 = 4;

    /// Creates a new `Ttl` from a number of seconds.
    #[must_use]
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Creates a new `Ttl` from a number of minutes.
    ///
    /// Saturates at [`Ttl::MAX`].
    #[must_use]
    pub const fn from_mins(minutes: u32) -> Self {
        Self(minutes.saturating_mul(SECS_PER_MINUTE))
    }

    /// Creates a new `Ttl` from a number of hours.
    ///
    /// Saturates at [`Ttl::MAX`].
    #[must_use]
    pub const fn from_hours(hours: u32) -> Self {
        Self(hours.saturating_mul(SECS_PER_HOUR))
    }

    /// Creates a new `Ttl` from a number of days.
    ///
    /// Saturates at [`Ttl::MAX`].
    #[must_use]
    pub const fn from_days(days: u16) -> Self {
        Self((days as u32).saturating_mul(SECS_PER_DAY))
    }

    /// Creates a new `Ttl` from a [`Duration`], dropping fractions of a
    /// second and saturating at [`Ttl::MAX`].
    ///
    /// ```
    /// use dnswire::base::Ttl;
    /// use std::time::Duration;
    ///
    /// assert_eq!(Ttl::from_duration_lossy(Duration::new(1, 6000)), Ttl::from_secs(1));
    /// assert_eq!(Ttl::from_duration_lossy(Duration::from_secs(1 << 40)), Ttl::MAX);
    /// ```
    #[must_use]
    pub const fn from_duration_lossy(duration: Duration) -> Self {
        if duration.as_secs() > u32::MAX as u64 {
            Ttl::MAX
        } else {
            Self(duration.as_secs() as u32)
        }
    }

    /// Returns the total time to live in seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u32 {
        self.0
    }

    /// Converts the `Ttl` into a [`Duration`].
    #[must_use]
    pub const fn into_duration(&self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }

    /// Returns true if this `Ttl` spans no time.
    ///
    /// This usually indicates a given record should not be cached.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.0.compose(target)
    }

    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        u32::parse(parser).map(Ttl::from_secs)
    }
}

//--- From

impl From<u32> for Ttl {
    fn from(secs: u32) -> Self {
        Ttl::from_secs(secs)
    }
}

impl From<Ttl> for Duration {
    fn from(ttl: Ttl) -> Self {
        ttl.into_duration()
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    fn record(name: &str, rtype: u16, class: u16, ttl: u32) -> Record {
        Record::new(
            Name::from_str(name).unwrap(),
            Rtype::from_int(rtype),
            Class::from_int(class),
            Ttl::from_secs(ttl),
            RecordData::from_slice(b"foo").unwrap(),
        )
    }

    #[test]
    fn wire_format() {
        let rec = record("com", 1, 1, 1);
        let wire = b"\x03com\x00\x00\x01\x00\x01\x00\x00\x00\x01\x00\x03foo";
        assert_eq!(rec.to_vec(), wire);
        assert_eq!(rec.compose_len(), wire.len());
        assert_eq!(Record::decode(wire), Ok((wire.len(), rec)));
    }

    #[test]
    fn accessors() {
        let rec = record("example.com", 15, 1, 3600);
        assert_eq!(rec.owner(), &Name::from_str("example.com").unwrap());
        assert_eq!(rec.rtype(), Rtype::MX);
        assert_eq!(rec.class(), Class::IN);
        assert_eq!(rec.ttl(), Ttl::HOUR);
        assert_eq!(rec.data().as_slice(), b"foo");
        assert_eq!(
            rec.to_string(),
            "example.com.\t3600\tIN\tMX\t\\# 3 66 6f 6f"
        );
    }

    #[test]
    fn decode_errors() {
        let wire = record("com", 1, 1, 1).to_vec();

        let err = Record::decode(&wire[..7]).unwrap_err();
        assert_eq!(err.kind(), ParseError::MissingTypeClass);
        assert_eq!(err.consumed(), 5);

        for len in 9..15 {
            let err = Record::decode(&wire[..len]).unwrap_err();
            assert_eq!(err.kind(), ParseError::MissingTtlOrLength);
            assert_eq!(err.consumed(), 9);
        }

        for len in 15..18 {
            let err = Record::decode(&wire[..len]).unwrap_err();
            assert_eq!(err.kind(), ParseError::TruncatedRData);
            assert_eq!(err.consumed(), 15);
        }
    }

    #[test]
    fn decode_many() {
        let mut wire = record("com", 1, 2, 1).to_vec();
        wire.extend_from_slice(&record("fr", 3, 4, 1).to_vec());
        let (len, records) = Record::decode_many(2, &wire).unwrap();
        assert_eq!(len, wire.len());
        assert_eq!(records, [record("com", 1, 2, 1), record("fr", 3, 4, 1)]);

        let err = Record::decode_many(3, &wire).unwrap_err();
        assert_eq!(err.kind(), ParseError::EmptyInput);
        assert_eq!(err.index(), Some(3));
        assert_eq!(err.consumed(), wire.len());
    }

    #[test]
    fn ttl() {
        assert_eq!(Ttl::from_mins(2).as_secs(), 120);
        assert_eq!(Ttl::from_days(1), Ttl::DAY);
        assert_eq!(Ttl::from_hours(u32::MAX), Ttl::MAX);
        assert!(Ttl::ZERO.is_zero());
        assert_eq!(
            Duration::from(Ttl::from_secs(255)),
            Duration::from_secs(255)
        );

        let mut buf = Vec::new();
        infallible(Ttl::from_secs(0x0102_0304).compose(&mut buf));
        assert_eq!(buf, [1, 2, 3, 4]);
        let mut parser = Parser::from_ref(&buf[..]);
        assert_eq!(Ttl::parse(&mut parser), Ok(Ttl::from_secs(0x0102_0304)));
    }
}
