//! Resource record data.
//!
//! Record data is kept as an opaque octets sequence. Its content is never
//! interpreted, no matter the record type. It is printed using the generic
//! format for unknown record data defined in [RFC 3597].
//!
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597

use super::wire::{Compose, ParseError};
use core::fmt;
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;
use std::vec::Vec;

//------------ RecordData ----------------------------------------------------

/// The data of a resource record.
///
/// Since the length of the data is transmitted as a 16 bit value in the
/// record, the data can be at most 65,535 octets long. This is checked
/// whenever a value is created, so composing the data will never fail.
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct RecordData(Vec<u8>);

impl RecordData {
    /// The maximum length of record data.
    pub const MAX_LEN: usize = 0xFFFF;

    /// Creates empty record data.
    #[must_use]
    pub fn empty() -> Self {
        RecordData(Vec::new())
    }

    /// Creates record data from an octets vector.
    ///
    /// Returns an error if the vector is longer than 65,535 octets.
    pub fn from_octets(data: Vec<u8>) -> Result<Self, LongRecordData> {
        if data.len() > Self::MAX_LEN {
            Err(LongRecordData(()))
        } else {
            Ok(RecordData(data))
        }
    }

    /// Creates record data from an octets slice.
    pub fn from_slice(data: &[u8]) -> Result<Self, LongRecordData> {
        if data.len() > Self::MAX_LEN {
            Err(LongRecordData(()))
        } else {
            Ok(RecordData(data.into()))
        }
    }

    /// Returns a reference to the data.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Converts the value into the underlying octets vector.
    pub fn into_octets(self) -> Vec<u8> {
        self.0
    }

    /// Returns the length of the data.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the data is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value of the RDLENGTH field for this data.
    pub fn rdlen(&self) -> u16 {
        // Checked at creation.
        self.0.len() as u16
    }
}

/// # Parsing and Composing
///
impl RecordData {
    /// Takes the data length field and the data from a parser.
    ///
    /// If the data is shorter than announced by the data length field, fails
    /// with [`ParseError::TruncatedRData`] leaving the parser right after
    /// the length field.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let rdlen = usize::from(parser.parse_u16_be()?);
        if parser.remaining() < rdlen {
            return Err(ParseError::TruncatedRData);
        }
        let mut data = std::vec![0; rdlen];
        parser.parse_buf(&mut data)?;
        Ok(RecordData(data))
    }

    /// Returns the length of the data length field and the data.
    pub fn compose_len(&self) -> usize {
        self.0.len() + usize::from(u16::COMPOSE_LEN)
    }

    /// Appends the data length field and the data to the target.
    ///
    /// The data length is always taken from the actual data.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.rdlen().compose(target)?;
        target.append_slice(&self.0)
    }
}

//--- TryFrom and From

impl TryFrom<Vec<u8>> for RecordData {
    type Error = LongRecordData;

    fn try_from(data: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_octets(data)
    }
}

impl<'a> TryFrom<&'a [u8]> for RecordData {
    type Error = LongRecordData;

    fn try_from(data: &'a [u8]) -> Result<Self, Self::Error> {
        Self::from_slice(data)
    }
}

impl From<RecordData> for Vec<u8> {
    fn from(data: RecordData) -> Self {
        data.into_octets()
    }
}

//--- AsRef

impl AsRef<[u8]> for RecordData {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- Display and Debug

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\\# {}", self.0.len())?;
        for ch in self.0.iter() {
            write!(f, " {:02x}", ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("RecordData(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//------------ LongRecordData ------------------------------------------------

/// The octets sequence to be used for record data is too long.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongRecordData(());

impl fmt::Display for LongRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("record data too long")
    }
}

impl std::error::Error for LongRecordData {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use octseq::builder::infallible;

    #[test]
    fn length_limit() {
        assert!(RecordData::from_octets(vec![0; 0xFFFF]).is_ok());
        assert_eq!(
            RecordData::from_octets(vec![0; 0x10000]),
            Err(LongRecordData(()))
        );
        assert!(RecordData::try_from(&[0u8; 0x10000][..]).is_err());
        assert_eq!(
            RecordData::from_slice(&[0xAB; 0xFFFF]).unwrap().rdlen(),
            0xFFFF
        );
    }

    #[test]
    fn compose_and_parse() {
        let data = RecordData::from_slice(b"foo").unwrap();
        let mut buf = Vec::new();
        infallible(data.compose(&mut buf));
        assert_eq!(buf, b"\x00\x03foo");
        assert_eq!(data.compose_len(), 5);

        let mut parser = Parser::from_ref(&buf[..]);
        assert_eq!(RecordData::parse(&mut parser), Ok(data));
        assert_eq!(parser.remaining(), 0);

        let mut parser = Parser::from_ref(&b"\x00\x00"[..]);
        assert_eq!(RecordData::parse(&mut parser), Ok(RecordData::empty()));
    }

    #[test]
    fn truncated() {
        let mut parser = Parser::from_ref(&b"\x00\x04foo"[..]);
        assert_eq!(
            RecordData::parse(&mut parser),
            Err(ParseError::TruncatedRData)
        );
        assert_eq!(parser.pos(), 2);
    }

    #[test]
    fn display() {
        let data = RecordData::from_slice(b"foo").unwrap();
        assert_eq!(data.to_string(), "\\# 3 66 6f 6f");
        assert_eq!(RecordData::empty().to_string(), "\\# 0");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ser_de() {
        let data = RecordData::from_slice(b"foo").unwrap();
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, "[102,111,111]");
        assert_eq!(serde_json::from_str::<RecordData>(&json).unwrap(), data);
    }
}
