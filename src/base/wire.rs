//! Creating and consuming data in wire format.
//!
//! Decoding is done through an [`octseq`] [`Parser`] over the octets of a
//! message. Every type that can appear in a message provides a `parse`
//! function that reads a value from the beginning of a parser and leaves
//! the parser positioned right behind the octets it consumed. This is true
//! for failures, too: when parsing fails, the parser position tells how
//! far into the data the parser got before giving up.
//!
//! Encoding happens by appending the wire format of a value to an octets
//! builder via the `compose` method of each type.

use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::{Parser, ShortInput};
use std::vec::Vec;

//------------ Compose -------------------------------------------------------

/// A type that can append its wire format to an octets builder.
pub trait Compose {
    /// The length of the wire format if it is the same for all values.
    const COMPOSE_LEN: u16 = 0;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError>;
}

impl<'a, T: Compose + ?Sized> Compose for &'a T {
    const COMPOSE_LEN: u16 = T::COMPOSE_LEN;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        (*self).compose(target)
    }
}

impl Compose for u8 {
    const COMPOSE_LEN: u16 = 1;

    fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        target.append_slice(&[*self])
    }
}

macro_rules! compose_to_be_bytes {
    ( $type:ident ) => {
        impl Compose for $type {
            const COMPOSE_LEN: u16 = ($type::BITS >> 3) as u16;

            fn compose<Target: OctetsBuilder + ?Sized>(
                &self,
                target: &mut Target,
            ) -> Result<(), Target::AppendError> {
                target.append_slice(&self.to_be_bytes())
            }
        }
    };
}

compose_to_be_bytes!(u16);
compose_to_be_bytes!(u32);

//------------ Parse ---------------------------------------------------------

/// A type that can extract a value from a parser.
///
/// The trait is a companion to [`Parser`]: it allows a type to use a parser
/// to create a value of itself. It is mostly used by generic code such as
/// [`parse_repeated`]; the types of this crate also provide an inherent
/// `parse` function with the same signature.
///
/// If parsing fails, the parser is left positioned behind the last octet
/// that was looked at while trying to parse the value.
pub trait Parse<'a, Octs: ?Sized>: Sized {
    /// Extracts a value from the beginning of `parser`.
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError>;
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for u8 {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        parser.parse_u8().map_err(Into::into)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for u16 {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        parser.parse_u16_be().map_err(Into::into)
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for u32 {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        parser.parse_u32_be().map_err(Into::into)
    }
}

//------------ parse_repeated ------------------------------------------------

/// Parses exactly `count` consecutive values of type `T`.
///
/// The `item` argument names a single value for diagnostics, e.g.,
/// `"question"`. If parsing the value with the 1-based index `i` fails,
/// the returned error carries that index and `count`. The parser is left
/// where the failing value gave up.
///
/// The `count` usually comes from a message header and thus cannot be
/// trusted. Since every value occupies at least one octet, the result is
/// never pre-allocated for more values than there are octets left.
pub fn parse_repeated<'a, T, Octs>(
    parser: &mut Parser<'a, Octs>,
    count: u16,
    item: &'static str,
) -> Result<Vec<T>, DecodeError>
where
    T: Parse<'a, Octs>,
    Octs: AsRef<[u8]> + ?Sized,
{
    let mut res =
        Vec::with_capacity(usize::from(count).min(parser.remaining()));
    for idx in 1..=count {
        match T::parse(parser) {
            Ok(value) => res.push(value),
            Err(err) => {
                return Err(DecodeError::from(err).at_index(item, idx, count))
            }
        }
    }
    Ok(res)
}

//------------ decode_slice --------------------------------------------------

/// Runs `op` on a parser over `data` and reports the consumed octets.
///
/// This is the bridge between parser based decoding and the slice based
/// `decode` functions of the various types. On success, returns the number
/// of octets consumed together with the value. On error, the number of
/// octets consumed until the failure is stored in the error.
pub fn decode_slice<'a, T, F>(
    data: &'a [u8],
    op: F,
) -> Result<(usize, T), DecodeError>
where
    F: FnOnce(&mut Parser<'a, [u8]>) -> Result<T, DecodeError>,
{
    let mut parser = Parser::from_ref(data);
    match op(&mut parser) {
        Ok(value) => Ok((parser.pos(), value)),
        Err(err) => Err(err.with_consumed(parser.pos())),
    }
}

//============ Error Types ===================================================

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
///
/// The variants describe what kind of malformed data was encountered. The
/// error does not say where in a message this happened. That information
/// is added by [`DecodeError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParseError {
    /// The data is shorter than a fixed size field requires.
    TruncatedInput,

    /// A domain name was to be parsed from empty data.
    EmptyInput,

    /// A label type other than a normal label was encountered.
    ///
    /// Both the top bits of the length octet of a normal label are zero.
    /// If either is set, the octet starts a compression pointer or an
    /// extended label, neither of which are supported.
    UnsupportedCompression,

    /// A label is shorter than its length octet says.
    TruncatedLabel,

    /// The data ended before the root label of a domain name.
    UnterminatedName,

    /// The type and class fields after a question’s name are missing.
    MissingTypeClass,

    /// The TTL and data length fields after a record’s class are missing.
    MissingTtlOrLength,

    /// The record data is shorter than the record’s data length says.
    TruncatedRData,
}

//--- From

impl From<ShortInput> for ParseError {
    fn from(_: ShortInput) -> Self {
        ParseError::TruncatedInput
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            ParseError::TruncatedInput => "unexpected end of input",
            ParseError::EmptyInput => "empty input",
            ParseError::UnsupportedCompression => {
                "compressed domain names are not supported"
            }
            ParseError::TruncatedLabel => "truncated label",
            ParseError::UnterminatedName => "missing root label",
            ParseError::MissingTypeClass => "missing type and class",
            ParseError::MissingTtlOrLength => "missing TTL and data length",
            ParseError::TruncatedRData => "truncated record data",
        })
    }
}

impl std::error::Error for ParseError {}

//------------ Section -------------------------------------------------------

/// The part of a message a decoding error occurred in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Section {
    Header,
    Question,
    Answer,
    Authority,
    Additional,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Section::Header => "header",
            Section::Question => "question section",
            Section::Answer => "answer section",
            Section::Authority => "authority section",
            Section::Additional => "additional section",
        })
    }
}

//------------ DecodeError ---------------------------------------------------

/// Decoding data failed.
///
/// In addition to the kind of failure, the error keeps the position of the
/// failure: the section of the message and the index of the question or
/// record within its section, if known, and the number of octets consumed
/// before decoding gave up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeError {
    kind: ParseError,
    section: Option<Section>,
    index: Option<ItemIndex>,
    consumed: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ItemIndex {
    item: &'static str,
    index: u16,
    count: u16,
}

impl DecodeError {
    /// Creates a new error of the given kind without any position.
    pub fn new(kind: ParseError) -> Self {
        DecodeError {
            kind,
            section: None,
            index: None,
            consumed: 0,
        }
    }

    /// Adds the section of the message the error occurred in.
    #[must_use]
    pub fn in_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    /// Adds the 1-based index of the failing item out of `count` items.
    #[must_use]
    pub fn at_index(
        mut self,
        item: &'static str,
        index: u16,
        count: u16,
    ) -> Self {
        self.index = Some(ItemIndex { item, index, count });
        self
    }

    /// Sets the number of octets consumed before the error occurred.
    #[must_use]
    pub fn with_consumed(mut self, consumed: usize) -> Self {
        self.consumed = consumed;
        self
    }

    /// Returns the kind of malformed data.
    pub fn kind(&self) -> ParseError {
        self.kind
    }

    /// Returns the section of the message the error occurred in.
    pub fn section(&self) -> Option<Section> {
        self.section
    }

    /// Returns the 1-based index of the question or record that failed.
    pub fn index(&self) -> Option<u16> {
        self.index.map(|idx| idx.index)
    }

    /// Returns the number of octets consumed until the error occurred.
    ///
    /// This includes the octets of the failing attempt up to the point
    /// where the problem was discovered.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

//--- From

impl From<ParseError> for DecodeError {
    fn from(kind: ParseError) -> Self {
        DecodeError::new(kind)
    }
}

impl From<ShortInput> for DecodeError {
    fn from(err: ShortInput) -> Self {
        ParseError::from(err).into()
    }
}

//--- Display and Error

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(section) = self.section {
            write!(f, "{}: ", section)?;
        }
        if let Some(idx) = self.index {
            write!(f, "{} {} of {}: ", idx.item, idx.index, idx.count)?;
        }
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use octseq::builder::infallible;

    #[test]
    fn compose_integers() {
        let mut buf = Vec::new();
        infallible(0x12u8.compose(&mut buf));
        infallible(0x3456u16.compose(&mut buf));
        infallible(0x789a_bcdeu32.compose(&mut buf));
        assert_eq!(buf, b"\x12\x34\x56\x78\x9a\xbc\xde");
        assert_eq!(u16::COMPOSE_LEN, 2);
        assert_eq!(u32::COMPOSE_LEN, 4);
    }

    #[test]
    fn parse_repeated_counts_and_fails_with_index() {
        let data = [0u8, 1, 0, 2, 0];
        let mut parser = Parser::from_ref(&data[..]);
        let res: Vec<u16> = parse_repeated(&mut parser, 2, "short").unwrap();
        assert_eq!(res, [1, 2]);

        let mut parser = Parser::from_ref(&data[..]);
        let err =
            parse_repeated::<u16, _>(&mut parser, 3, "short").unwrap_err();
        assert_eq!(err.kind(), ParseError::TruncatedInput);
        assert_eq!(err.index(), Some(3));
        assert_eq!(err.to_string(), "short 3 of 3: unexpected end of input");

        let mut parser = Parser::from_ref(&b""[..]);
        let res: Vec<u16> = parse_repeated(&mut parser, 0, "short").unwrap();
        assert!(res.is_empty());
    }

    #[test]
    fn decode_slice_reports_position() {
        let (len, value) =
            decode_slice(b"\x00\x07rest", |parser| Ok(u16::parse(parser)?))
                .unwrap();
        assert_eq!((len, value), (2, 7));

        let err = decode_slice(b"\x01\x02\x03", |parser| {
            u16::parse(parser)?;
            Ok(u16::parse(parser)?)
        })
        .unwrap_err();
        assert_eq!(err.consumed(), 2);
        assert_eq!(err.kind(), ParseError::TruncatedInput);
    }

    #[test]
    fn display_context() {
        let err = DecodeError::new(ParseError::TruncatedRData)
            .at_index("record", 2, 3)
            .in_section(Section::Answer);
        assert_eq!(
            err.to_string(),
            "answer section: record 2 of 3: truncated record data"
        );
        assert_eq!(err.section(), Some(Section::Answer));
    }
}
