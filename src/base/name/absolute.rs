//! Uncompressed, absolute domain names.
//!
//! This is a private module. Its public types are re-exported by the parent.

use super::super::wire::{decode_slice, DecodeError, ParseError};
use super::label::{Label, NameError};
use core::str::FromStr;
use core::{cmp, fmt, slice};
use octseq::builder::{infallible, OctetsBuilder};
use octseq::parse::Parser;
use std::vec::Vec;

//------------ Name ----------------------------------------------------------

/// An uncompressed, absolute domain name.
///
/// The name is kept as the sequence of its labels in the order they appear
/// in the wire format, that is, starting with the least significant label.
/// The final root label is implied and not part of that sequence. An empty
/// sequence thus represents the root name.
///
/// All labels of a name other than the implied root label are non-empty.
/// Each label is at most 63 octets long which is enforced by [`Label`].
/// The overall length of 255 octets that a name in a message is limited to
/// is not checked.
///
/// Two names are equal if they have the same number of labels and all
/// labels pairwise compare equal ignoring ASCII-case. They are ordered
/// following the canonical ordering defined in section 6.1 of [RFC 4034]
/// which compares the labels starting from the most significant one.
///
/// You can create a name from a sequence of labels via
/// [`from_labels`][Self::from_labels] or from its presentation format via
/// [`FromStr`]. A name parsed from presentation format is always considered
/// absolute, whether it ends in a dot or not:
///
/// ```
/// use core::str::FromStr;
/// use dnswire::base::Name;
///
/// let name = Name::from_str("www.example.com").unwrap();
/// assert_eq!(name.label_count(), 3);
/// assert_eq!(name.to_string(), "www.example.com.");
/// assert_eq!(name, Name::from_labels(["WWW", "Example", "com"]).unwrap());
/// ```
///
/// [RFC 4034]: https://tools.ietf.org/html/rfc4034
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct Name {
    labels: Vec<Label>,
}

/// # Creation
///
impl Name {
    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name { labels: Vec::new() }
    }

    /// Creates a name from a sequence of labels.
    ///
    /// The labels are given in wire order, starting with the least
    /// significant label and without the root label. Each item can be a
    /// [`Label`] or any octets sequence of at most 63 octets.
    ///
    /// Returns an error if any of the labels is empty or too long.
    pub fn from_labels<I, L>(labels: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        labels
            .into_iter()
            .map(|label| {
                let label = Label::from_slice(label.as_ref())?;
                if label.is_empty() {
                    Err(NameError::EmptyLabel)
                } else {
                    Ok(label)
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|labels| Name { labels })
    }
}

/// # Properties
///
impl Name {
    /// Returns the labels of the name without the root label.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Returns an iterator over the labels of the name.
    pub fn iter(&self) -> slice::Iter<'_, Label> {
        self.labels.iter()
    }

    /// Converts the name into its labels.
    pub fn into_labels(self) -> Vec<Label> {
        self.labels
    }

    /// Returns the number of labels without the root label.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether the name is the root name.
    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the length of the name in wire format.
    pub fn compose_len(&self) -> usize {
        self.labels
            .iter()
            .map(|label| usize::from(label.compose_len()))
            .sum::<usize>()
            + 1
    }

    /// Returns whether the name ends in `base`.
    ///
    /// Every name is a subdomain of itself and of the root.
    pub fn ends_with(&self, base: &Name) -> bool {
        self.labels.len() >= base.labels.len()
            && self
                .labels
                .iter()
                .rev()
                .zip(base.labels.iter().rev())
                .all(|(left, right)| left == right)
    }
}

/// # Parsing and Composing
///
impl Name {
    /// Takes an uncompressed name from the beginning of a parser.
    ///
    /// Fails with [`ParseError::EmptyInput`] if nothing is left at all
    /// and with [`ParseError::UnterminatedName`] if the input ends before
    /// the root label. Errors of the individual labels are described with
    /// [`Label::parse`].
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        if parser.remaining() == 0 {
            return Err(ParseError::EmptyInput);
        }
        let mut labels = Vec::new();
        loop {
            if parser.remaining() == 0 {
                return Err(ParseError::UnterminatedName);
            }
            let label = Label::parse(parser)?;
            if label.is_root() {
                return Ok(Name { labels });
            }
            labels.push(label);
        }
    }

    /// Decodes a name from the beginning of `data`.
    ///
    /// On success, returns the number of octets consumed and the name.
    pub fn decode(data: &[u8]) -> Result<(usize, Self), DecodeError> {
        decode_slice(data, |parser| Ok(Self::parse(parser)?))
    }

    /// Appends the uncompressed wire format of the name to the target.
    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        for label in &self.labels {
            label.compose(target)?;
        }
        Label::root().compose(target)
    }

    /// Returns the uncompressed wire format of the name.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.compose_len());
        infallible(self.compose(&mut res));
        res
    }
}

//--- FromStr

impl FromStr for Name {
    type Err = NameError;

    /// Parses a name from its presentation format.
    ///
    /// A single dot is the root name. Otherwise, labels are separated by
    /// dots and a final dot is optional. Escape sequences are the same as
    /// for [`Label`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "." {
            return Ok(Name::root());
        }
        let mut chars = s.chars();
        let mut labels = Vec::new();
        loop {
            let (label, more) = Label::scan(&mut chars)?;
            if label.is_empty() {
                if more || labels.is_empty() {
                    return Err(NameError::EmptyLabel);
                }
                break;
            }
            labels.push(label);
            if !more {
                break;
            }
        }
        Ok(Name { labels })
    }
}

//--- PartialOrd and Ord

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.labels.iter().rev().cmp(other.labels.iter().rev())
    }
}

//--- IntoIterator

impl<'a> IntoIterator for &'a Name {
    type Item = &'a Label;
    type IntoIter = slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for label in &self.labels {
            write!(f, "{}.", label)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

//--- Serialize and Deserialize

#[cfg(feature = "serde")]
impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let s: std::string::String =
            serde::Deserialize::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//============ Testing =======================================================
