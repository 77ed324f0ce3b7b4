//! Domain name labels.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use super::super::wire::ParseError;
use core::str::{Chars, FromStr};
use core::{cmp, fmt, hash};
use octseq::builder::OctetsBuilder;
use octseq::parse::Parser;

//------------ Label ---------------------------------------------------------

/// An owned domain name label.
///
/// This type holds the content of a single label of a domain name, without
/// its length octet. Only normal labels are supported: the two upper bits
/// of the length octet are reserved for other label types, most notably
/// compression pointers, which leaves 63 octets as the longest possible
/// label. The label is kept inline in an array of 64 octets, the first of
/// which holds the length.
///
/// [`Label`] differs from an octets slice in how it compares: as labels are
/// to be case-insensitive, all the comparison traits as well as `Hash` are
/// implemented ignoring ASCII-case.
#[derive(Clone, Copy)]
pub struct Label([u8; 64]);

/// # Creation
///
impl Label {
    /// Domain name labels have a maximum length of 63 octets.
    pub const MAX_LEN: usize = 63;

    /// Returns the empty label, also known as the root label.
    #[must_use]
    pub const fn root() -> Self {
        Label([0; 64])
    }

    /// Creates a label from an octets slice.
    ///
    /// Returns an error if the slice is longer than 63 octets.
    pub fn from_slice(slice: &[u8]) -> Result<Self, LongLabelError> {
        if slice.len() > Label::MAX_LEN {
            return Err(LongLabelError(()));
        }
        let mut res = [0; 64];
        res[0] = slice.len() as u8;
        res[1..=slice.len()].copy_from_slice(slice);
        Ok(Label(res))
    }

    /// Appends a single octet to the label.
    pub(super) fn push(&mut self, ch: u8) -> Result<(), LongLabelError> {
        let len = self.len();
        if len >= Label::MAX_LEN {
            return Err(LongLabelError(()));
        }
        self.0[len + 1] = ch;
        self.0[0] += 1;
        Ok(())
    }

    /// Creates a label from presentation format characters.
    ///
    /// Takes characters from `chars` until the end of the sequence or a
    /// non-escaped dot, which is consumed. Returns the label and whether a
    /// dot ended it.
    pub(super) fn scan(chars: &mut Chars) -> Result<(Self, bool), NameError> {
        let mut res = Label::root();
        while let Some(ch) = chars.next() {
            let ch = match ch {
                '.' => return Ok((res, true)),
                '\\' => parse_escape(chars)?,
                ' '..='~' => ch as u8,
                _ => return Err(NameError::IllegalCharacter),
            };
            res.push(ch)?;
        }
        Ok((res, false))
    }
}

/// # Properties
///
impl Label {
    /// Returns the length of the label.
    ///
    /// This length is that of the label’s content only. It will _not_ contain
    /// the initial label length octet present in the wire format.
    pub fn len(&self) -> usize {
        usize::from(self.0[0])
    }

    /// Returns whether this is the empty label.
    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// Returns whether the label is the root label.
    pub fn is_root(&self) -> bool {
        self.is_empty()
    }

    /// Returns the label’s content as an octets slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0[1..=self.len()]
    }

    /// Returns the label in wire format, that is, including the length.
    pub fn as_wire_slice(&self) -> &[u8] {
        &self.0[..=self.len()]
    }

    /// Returns the length of the composed version of the label.
    ///
    /// This length is one more than the length of the label as there is a
    /// leading length octet.
    pub fn compose_len(&self) -> u16 {
        u16::from(self.0[0]) + 1
    }
}

/// # Parsing and Composing
///
impl Label {
    /// Takes a label from the beginning of a parser.
    ///
    /// Fails with [`ParseError::UnsupportedCompression`] after taking only
    /// the length octet if either of its two upper bits is set. Fails with
    /// [`ParseError::TruncatedLabel`] after taking the length octet if
    /// less content is left than it announces.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        let head = parser.parse_u8()?;
        if head & 0xC0 != 0 {
            return Err(ParseError::UnsupportedCompression);
        }
        let len = usize::from(head);
        if parser.remaining() < len {
            return Err(ParseError::TruncatedLabel);
        }
        let mut res = [0; 64];
        res[0] = head;
        parser.parse_buf(&mut res[1..=len])?;
        Ok(Label(res))
    }

    /// Appends the wire format of the label to the target.
    pub fn compose<Builder: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Builder,
    ) -> Result<(), Builder::AppendError> {
        target.append_slice(self.as_wire_slice())
    }
}

//--- Default

impl Default for Label {
    fn default() -> Self {
        Label::root()
    }
}

//--- FromStr

impl FromStr for Label {
    type Err = NameError;

    /// Creates a label from its presentation format.
    ///
    /// Dots, backslashes, and any other character can be included by
    /// escaping them with a backslash. An octet value can be given as
    /// three decimal digits following a backslash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match Label::scan(&mut chars)? {
            (label, false) => Ok(label),
            (_, true) => Err(NameError::IllegalCharacter),
        }
    }
}

//--- AsRef

impl AsRef<[u8]> for Label {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

//--- PartialEq and Eq

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice().eq_ignore_ascii_case(other.as_slice())
    }
}

impl Eq for Label {}

//--- PartialOrd and Ord

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Label {
    /// Returns an ordering between `self` and `other`.
    ///
    /// The canonical sort order for labels is defined in section 6.1 of
    /// RFC 4034. In short, labels are ordered like octet strings except
    /// that the case of ASCII letters is ignored.
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.as_slice()
            .iter()
            .map(u8::to_ascii_lowercase)
            .cmp(other.as_slice().iter().map(u8::to_ascii_lowercase))
    }
}

//--- Hash

impl hash::Hash for Label {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        // Include the length so a name can hash over its labels.
        self.0[0].hash(state);
        for ch in self.as_slice() {
            ch.to_ascii_lowercase().hash(state)
        }
    }
}

//--- Display and Debug

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in self.as_slice() {
            if ch == b' ' || ch == b'.' || ch == b'\\' {
                write!(f, "\\{}", ch as char)?;
            } else if !(0x20..0x7F).contains(&ch) {
                write!(f, "\\{:03}", ch)?;
            } else {
                write!(f, "{}", (ch as char))?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Label(")?;
        fmt::Display::fmt(self, f)?;
        f.write_str(")")
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Label {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Label {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let s: std::string::String =
            serde::Deserialize::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//------------ parse_escape --------------------------------------------------

/// Parses the contents of an escape sequence from `chars`.
///
/// The backslash should already have been taken out of `chars`.
fn parse_escape(chars: &mut Chars) -> Result<u8, NameError> {
    let ch = chars.next().ok_or(NameError::BadEscape)?;
    match ch.to_digit(10) {
        Some(first) => {
            let mut value = first;
            for _ in 0..2 {
                let digit = chars
                    .next()
                    .and_then(|ch| ch.to_digit(10))
                    .ok_or(NameError::BadEscape)?;
                value = value * 10 + digit;
            }
            u8::try_from(value).map_err(|_| NameError::BadEscape)
        }
        None if ch.is_ascii() => Ok(ch as u8),
        None => Err(NameError::IllegalCharacter),
    }
}

//============ Error Types ===================================================

//------------ LongLabelError ------------------------------------------------

/// A label was longer than the allowed 63 octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongLabelError(());

//--- Display and Error

impl fmt::Display for LongLabelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("long label")
    }
}

impl std::error::Error for LongLabelError {}

//------------ NameError -----------------------------------------------------

/// A domain name could not be created.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NameError {
    /// A label other than the final root label was empty.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// An escape sequence was malformed.
    BadEscape,

    /// A character not allowed in presentation format was encountered.
    IllegalCharacter,
}

//--- From

impl From<LongLabelError> for NameError {
    fn from(_: LongLabelError) -> Self {
        NameError::LongLabel
    }
}

//--- Display and Error

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            NameError::EmptyLabel => "empty label",
            NameError::LongLabel => "long label",
            NameError::BadEscape => "illegal escape sequence",
            NameError::IllegalCharacter => "illegal character",
        })
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================
