//! The header of a DNS message.
//!
//! Each DNS message starts with a twelve octet long header section
//! containing some general information related to the message as well as
//! the number of entries in each of the four sections that follow the
//! header. Its content and format are defined in section 4.1.1 of
//! [RFC 1035].
//!
//! In order to reflect the fact that changing the section counts may
//! invalidate the rest of the message whereas the other elements of the
//! header section can safely be modified, the whole header has been split
//! into two separate types: [`Header`] contains the safely modifiable part
//! at the beginning and [`HeaderCounts`] contains the section counts. In
//! addition, the [`HeaderSection`] type wraps both of them into a single
//! type.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::iana::{Opcode, Rcode};
use super::wire::{decode_slice, Compose, DecodeError, Parse, ParseError};
use core::{fmt, str::FromStr};
use octseq::builder::{infallible, OctetsBuilder};
use octseq::parse::Parser;
use std::vec::Vec;

//------------ Flags word layout ---------------------------------------------
//
//                                 1  1  1  1  1  1
//   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
// |QR|   Opcode  |AA|TC|RD|RA|Z |AD|CD|   RCODE   |
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+

const QR_MASK: u16 = 0b1000_0000_0000_0000;
const OPCODE_MASK: u16 = 0b0111_1000_0000_0000;
const OPCODE_SHIFT: u32 = 11;
const AA_MASK: u16 = 0b0000_0100_0000_0000;
const TC_MASK: u16 = 0b0000_0010_0000_0000;
const RD_MASK: u16 = 0b0000_0001_0000_0000;
const RA_MASK: u16 = 0b0000_0000_1000_0000;
const Z_MASK: u16 = 0b0000_0000_0100_0000;
const AD_MASK: u16 = 0b0000_0000_0010_0000;
const CD_MASK: u16 = 0b0000_0000_0001_0000;
const RCODE_MASK: u16 = 0b0000_0000_0000_1111;

/// The mask for the four bit wide opcode and rcode values.
const NIBBLE: u8 = 0x0F;

//------------ Header --------------------------------------------------------

/// The first part of the header of a DNS message.
///
/// This type represents the information contained in the first four octets
/// of the header: the message ID, opcode, rcode, and the various flags. The
/// data is layed out like this:
///
/// ```text
///                                 1  1  1  1  1  1
///   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |                      ID                       |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// |QR|   Opcode  |AA|TC|RD|RA|Z |AD|CD|   RCODE   |
/// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/// ```
///
/// Methods are available for accessing each of these fields. For more
/// information on the fields, see these methods in the section
/// [Field Access] below.
///
/// The opcode and rcode occupy four bits each. Values handed to
/// [`set_opcode`][Self::set_opcode] and [`set_rcode`][Self::set_rcode]
/// are cut down to their lower four bits, so a header always holds exactly
/// what its wire format can express.
///
/// The basic structure and most of the fields are defined in [RFC 1035],
/// except for the AD and CD flags, which are defined in [RFC 4035].
///
/// [Field Access]: #field-access
/// [RFC 1035]: https://tools.ietf.org/html/rfc1035
/// [RFC 4035]: https://tools.ietf.org/html/rfc4035
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    id: u16,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "deserialize_opcode")
    )]
    opcode: Opcode,
    flags: Flags,
    z: bool,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "deserialize_rcode")
    )]
    rcode: Rcode,
}

/// # Creation and Conversion
///
impl Header {
    /// The length of the header in wire format.
    pub const COMPOSE_LEN: u16 = 4;

    /// Creates a new header.
    ///
    /// The new header has all fields as either zero or false. Thus, the
    /// opcode will be [`Opcode::QUERY`] and the response code will be
    /// [`Rcode::NOERROR`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a header from the message ID and the flags word.
    fn from_words(id: u16, word: u16) -> Self {
        Header {
            id,
            opcode: Opcode::from_int(((word & OPCODE_MASK) >> OPCODE_SHIFT) as u8),
            flags: Flags {
                qr: word & QR_MASK != 0,
                aa: word & AA_MASK != 0,
                tc: word & TC_MASK != 0,
                rd: word & RD_MASK != 0,
                ra: word & RA_MASK != 0,
                ad: word & AD_MASK != 0,
                cd: word & CD_MASK != 0,
            },
            z: word & Z_MASK != 0,
            rcode: Rcode::from_int((word & RCODE_MASK) as u8),
        }
    }

    /// Returns the second sixteen bits of the header in host byte order.
    ///
    /// These bits contain the opcode, rcode, and all the flags.
    #[must_use]
    pub fn flags_word(&self) -> u16 {
        let mut word = (u16::from(self.opcode.to_int()) << OPCODE_SHIFT)
            & OPCODE_MASK
            | u16::from(self.rcode.to_int()) & RCODE_MASK;
        for (set, mask) in [
            (self.flags.qr, QR_MASK),
            (self.flags.aa, AA_MASK),
            (self.flags.tc, TC_MASK),
            (self.flags.rd, RD_MASK),
            (self.flags.ra, RA_MASK),
            (self.z, Z_MASK),
            (self.flags.ad, AD_MASK),
            (self.flags.cd, CD_MASK),
        ] {
            if set {
                word |= mask
            }
        }
        word
    }
}

/// # Field Access
///
impl Header {
    /// Returns the value of the ID field.
    ///
    /// The ID field is an identifier chosen by whoever created a query
    /// and is copied into a response by a server. It allows matching
    /// incoming responses to their queries.
    pub fn id(self) -> u16 {
        self.id
    }

    /// Sets the value of the ID field.
    pub fn set_id(&mut self, value: u16) {
        self.id = value
    }

    /// Sets the value of the ID field to a randomly chosen number.
    #[cfg(feature = "rand")]
    pub fn set_random_id(&mut self) {
        self.set_id(::rand::random())
    }

    /// Returns whether the [QR](Flags::qr) bit is set.
    pub fn qr(self) -> bool {
        self.flags.qr
    }

    /// Sets the value of the [QR](Flags::qr) bit.
    pub fn set_qr(&mut self, set: bool) {
        self.flags.qr = set
    }

    /// Returns the value of the Opcode field.
    ///
    /// This field specifies the kind of query a message contains. Normal
    /// queries have the value [`Opcode::QUERY`] which is also the default
    /// value when creating a new header.
    pub fn opcode(self) -> Opcode {
        self.opcode
    }

    /// Sets the value of the opcode field.
    ///
    /// Only the lower four bits of `opcode` are kept.
    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.opcode = Opcode::from_int(opcode.to_int() & NIBBLE)
    }

    /// Returns all flags contained in the header.
    ///
    /// This is a virtual field composed of all the flag bits that are present
    /// in the header. The returned [`Flags`] type can be useful when you're
    /// working with all flags, rather than a single one, which can be easily
    /// obtained from the header directly.
    pub fn flags(self) -> Flags {
        self.flags
    }

    /// Sets all flag bits.
    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags
    }

    /// Returns whether the [AA](Flags::aa) bit is set.
    pub fn aa(self) -> bool {
        self.flags.aa
    }

    /// Sets the value of the [AA](Flags::aa) bit.
    pub fn set_aa(&mut self, set: bool) {
        self.flags.aa = set
    }

    /// Returns whether the [TC](Flags::tc) bit is set.
    pub fn tc(self) -> bool {
        self.flags.tc
    }

    /// Sets the value of the [TC](Flags::tc) bit.
    pub fn set_tc(&mut self, set: bool) {
        self.flags.tc = set
    }

    /// Returns whether the [RD](Flags::rd) bit is set.
    pub fn rd(self) -> bool {
        self.flags.rd
    }

    /// Sets the value of the [RD](Flags::rd) bit.
    pub fn set_rd(&mut self, set: bool) {
        self.flags.rd = set
    }

    /// Returns whether the [RA](Flags::ra) bit is set.
    pub fn ra(self) -> bool {
        self.flags.ra
    }

    /// Sets the value of the [RA](Flags::ra) bit.
    pub fn set_ra(&mut self, set: bool) {
        self.flags.ra = set
    }

    /// Returns whether the reserved bit is set.
    ///
    /// This bit must be `false` in all queries and responses. It is kept
    /// as received nonetheless.
    pub fn z(self) -> bool {
        self.z
    }

    /// Sets the value of the reserved bit.
    pub fn set_z(&mut self, set: bool) {
        self.z = set
    }

    /// Returns whether the [AD](Flags::ad) bit is set.
    pub fn ad(self) -> bool {
        self.flags.ad
    }

    /// Sets the value of the [AD](Flags::ad) bit.
    pub fn set_ad(&mut self, set: bool) {
        self.flags.ad = set
    }

    /// Returns whether the [CD](Flags::cd) bit is set.
    pub fn cd(self) -> bool {
        self.flags.cd
    }

    /// Sets the value of the [CD](Flags::cd) bit.
    pub fn set_cd(&mut self, set: bool) {
        self.flags.cd = set
    }

    /// Returns the value of the RCODE field.
    ///
    /// The *response code* is used in a response to indicate what happened
    /// when processing the query. See the [`Rcode`] type for information on
    /// possible values and their meaning.
    pub fn rcode(self) -> Rcode {
        self.rcode
    }

    /// Sets the value of the RCODE field.
    ///
    /// Only the lower four bits of `rcode` are kept.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.rcode = Rcode::from_int(rcode.to_int() & NIBBLE)
    }
}

/// # Parsing and Composing
///
impl Header {
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        parser.check_len(usize::from(Self::COMPOSE_LEN))?;
        Ok(Self::from_words(parser.parse_u16_be()?, parser.parse_u16_be()?))
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.id.compose(target)?;
        self.flags_word().compose(target)
    }
}

//--- Deserialize

#[cfg(feature = "serde")]
fn deserialize_opcode<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Opcode, D::Error> {
    <Opcode as serde::Deserialize>::deserialize(deserializer)
        .map(|opcode| Opcode::from_int(opcode.to_int() & NIBBLE))
}

#[cfg(feature = "serde")]
fn deserialize_rcode<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Rcode, D::Error> {
    <Rcode as serde::Deserialize>::deserialize(deserializer)
        .map(|rcode| Rcode::from_int(rcode.to_int() & NIBBLE))
}

//------------ Flags ---------------------------------------------------------

/// The flags contained in the DNS message header.
///
/// This is a utility type that makes it easier to work with flags. It
/// contains all the single bit flags of the [`Header`] except for the
/// reserved Z bit.
///
/// This type has a text notation and can be created from it as well. Each
/// flags that is set is represented by a two-letter token, which is the
/// uppercase version of the flag name. If multiple flags are set, the tokens
/// are separated by space.
///
/// ```
/// use core::str::FromStr;
/// use dnswire::base::header::Flags;
///
/// let flags = Flags::from_str("QR AA").unwrap();
/// assert!(flags.qr && flags.aa);
/// assert_eq!(format!("{}", flags), "QR AA");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// The `QR` bit specifies whether a message is a query (`false`) or a
    /// response (`true`). In other words, this bit is actually stating whether
    /// the message is *not* a query. So, perhaps it might be good to read ‘QR’
    /// as ‘query response.’
    pub qr: bool,

    /// Using the `AA` bit, a name server generating a response states whether
    /// it is authoritative for the requested domain name, i.e., whether this
    /// response is an *authoritative answer.* The field has no meaning in a
    /// query.
    pub aa: bool,

    /// The *truncation* (`TC`) bit is set if there was more data available
    /// than would fit into the message. This is typically used when
    /// employing datagram transports such as UDP to signal that the answer
    /// didn’t fit into a response and the query should be tried again using
    /// a stream transport such as TCP.
    pub tc: bool,

    /// The *recursion desired* (`RD`) bit may be set in a query to ask the name
    /// server to try and recursively gather a response if it doesn’t have the
    /// data available locally. The bit’s value is copied into the response.
    pub rd: bool,

    /// In a response, the *recursion available* (`RA`) bit denotes whether the
    /// responding name server supports recursion. It has no meaning in a query.
    pub ra: bool,

    /// The *authentic data* (`AD`) bit is used by security-aware recursive name
    /// servers to indicate that it considers all RRsets in its response are
    /// authentic, i.e., have successfully passed DNSSEC validation.
    pub ad: bool,

    /// The *checking disabled* (`CD`) bit is used by a security-aware resolver
    /// to indicate that it does not want upstream name servers to perform
    /// verification but rather would like to verify everything itself.
    pub cd: bool,
}

impl Flags {
    /// Creates new flags.
    ///
    /// All flags will be unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

//--- Display & FromStr

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut sep = "";
        for (set, token) in [
            (self.qr, "QR"),
            (self.aa, "AA"),
            (self.tc, "TC"),
            (self.rd, "RD"),
            (self.ra, "RA"),
            (self.ad, "AD"),
            (self.cd, "CD"),
        ] {
            if set {
                write!(f, "{}{}", sep, token)?;
                sep = " ";
            }
        }
        Ok(())
    }
}

impl FromStr for Flags {
    type Err = FlagsFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::new();
        for token in s.split(' ') {
            match token.to_ascii_uppercase().as_str() {
                "QR" => flags.qr = true,
                "AA" => flags.aa = true,
                "TC" => flags.tc = true,
                "RD" => flags.rd = true,
                "RA" => flags.ra = true,
                "AD" => flags.ad = true,
                "CD" => flags.cd = true,
                "" => {}
                _ => return Err(FlagsFromStrError),
            }
        }
        Ok(flags)
    }
}

//------------ HeaderCounts --------------------------------------------------

/// The section count part of the header section of a DNS message.
///
/// This part consists of four 16 bit counters for the number of entries in
/// the four sections of a DNS message.
///
/// When decoding, the counts are trusted: exactly that many entries are
/// decoded for each section. When encoding, they are written as they are.
/// Keeping them in line with the actual sections is up to whoever builds
/// the message.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderCounts {
    qdcount: u16,
    ancount: u16,
    nscount: u16,
    arcount: u16,
}

impl HeaderCounts {
    /// The length of the section counts in wire format.
    pub const COMPOSE_LEN: u16 = 8;

    /// Creates a new value with all counters set to zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new value from the four counters.
    #[must_use]
    pub fn from_counts(
        qdcount: u16,
        ancount: u16,
        nscount: u16,
        arcount: u16,
    ) -> Self {
        HeaderCounts {
            qdcount,
            ancount,
            nscount,
            arcount,
        }
    }
}

/// # Field Access
///
impl HeaderCounts {
    /// Returns the value of the QDCOUNT field.
    ///
    /// This field contains the number of questions in the first
    /// section of the message, normally the question section.
    pub fn qdcount(self) -> u16 {
        self.qdcount
    }

    /// Sets the value of the QDCOUNT field.
    pub fn set_qdcount(&mut self, value: u16) {
        self.qdcount = value
    }

    /// Returns the value of the ANCOUNT field.
    ///
    /// This field contains the number of resource records in the second
    /// section of the message, normally the answer section.
    pub fn ancount(self) -> u16 {
        self.ancount
    }

    /// Sets the value of the ANCOUNT field.
    pub fn set_ancount(&mut self, value: u16) {
        self.ancount = value
    }

    /// Returns the value of the NSCOUNT field.
    ///
    /// This field contains the number of resource records in the third
    /// section of the message, normally the authority section.
    pub fn nscount(self) -> u16 {
        self.nscount
    }

    /// Sets the value of the NSCOUNT field.
    pub fn set_nscount(&mut self, value: u16) {
        self.nscount = value
    }

    /// Returns the value of the ARCOUNT field.
    ///
    /// This field contains the number of resource records in the fourth
    /// section of the message, normally the additional section.
    pub fn arcount(self) -> u16 {
        self.arcount
    }

    /// Sets the value of the ARCOUNT field.
    pub fn set_arcount(&mut self, value: u16) {
        self.arcount = value
    }
}

/// # Parsing and Composing
///
impl HeaderCounts {
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        parser.check_len(usize::from(Self::COMPOSE_LEN))?;
        Ok(HeaderCounts {
            qdcount: parser.parse_u16_be()?,
            ancount: parser.parse_u16_be()?,
            nscount: parser.parse_u16_be()?,
            arcount: parser.parse_u16_be()?,
        })
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.qdcount.compose(target)?;
        self.ancount.compose(target)?;
        self.nscount.compose(target)?;
        self.arcount.compose(target)
    }
}

//------------ HeaderSection -------------------------------------------------

/// The complete header section of a DNS message.
///
/// Consists of a [`Header`] and a [`HeaderCounts`]. In wire format, this
/// is always exactly twelve octets long.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeaderSection {
    header: Header,
    counts: HeaderCounts,
}

/// # Creation and Conversion
///
impl HeaderSection {
    /// The length of the header section in wire format.
    pub const COMPOSE_LEN: u16 = Header::COMPOSE_LEN + HeaderCounts::COMPOSE_LEN;

    /// Creates a new header section from its two parts.
    #[must_use]
    pub fn new(header: Header, counts: HeaderCounts) -> Self {
        HeaderSection { header, counts }
    }

    /// Returns the header part of the header section.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Returns a mutable reference to the header part.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Returns the counts part of the header section.
    pub fn counts(&self) -> HeaderCounts {
        self.counts
    }

    /// Returns a mutable reference to the counts part.
    pub fn counts_mut(&mut self) -> &mut HeaderCounts {
        &mut self.counts
    }
}

/// # Parsing and Composing
///
impl HeaderSection {
    /// Parses a header section.
    ///
    /// Fails with [`ParseError::TruncatedInput`] without consuming
    /// anything if less than twelve octets are left.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, ParseError> {
        parser.check_len(usize::from(Self::COMPOSE_LEN))?;
        Ok(HeaderSection {
            header: Header::parse(parser)?,
            counts: HeaderCounts::parse(parser)?,
        })
    }

    /// Decodes a header section from the beginning of `data`.
    ///
    /// On success, returns the number of octets consumed, which is always
    /// twelve, and the header section.
    pub fn decode(data: &[u8]) -> Result<(usize, Self), DecodeError> {
        decode_slice(data, |parser| Ok(Self::parse(parser)?))
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.header.compose(target)?;
        self.counts.compose(target)
    }

    /// Returns the wire format of the header section.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(usize::from(Self::COMPOSE_LEN));
        infallible(self.compose(&mut res));
        res
    }
}

impl<'a, Octs: AsRef<[u8]> + ?Sized> Parse<'a, Octs> for HeaderSection {
    fn parse(parser: &mut Parser<'a, Octs>) -> Result<Self, ParseError> {
        Self::parse(parser)
    }
}

//============ Error Types ===================================================

//------------ FlagsFromStrError ---------------------------------------------

/// An error happened when converting string to flags.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FlagsFromStrError;

impl fmt::Display for FlagsFromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal flags token")
    }
}

impl std::error::Error for FlagsFromStrError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn all_set() -> HeaderSection {
        let mut header = Header::new();
        header.set_id(1);
        header.set_opcode(Opcode::from_int(0b1111));
        header.set_flags(Flags {
            qr: true,
            aa: true,
            tc: true,
            rd: true,
            ra: true,
            ad: true,
            cd: true,
        });
        header.set_z(true);
        header.set_rcode(Rcode::from_int(0b1111));
        HeaderSection::new(header, HeaderCounts::from_counts(1, 2, 3, 4))
    }

    #[test]
    fn all_bits_set() {
        let wire = [0, 1, 0xFF, 0xFF, 0, 1, 0, 2, 0, 3, 0, 4];
        let section = all_set();
        assert_eq!(section.to_vec(), wire);
        assert_eq!(HeaderSection::decode(&wire), Ok((12, section)));
    }

    #[test]
    fn all_zero() {
        let wire = [0u8; 12];
        assert_eq!(HeaderSection::default().to_vec(), wire);
        let (len, section) = HeaderSection::decode(&wire).unwrap();
        assert_eq!(len, 12);
        assert_eq!(section, HeaderSection::default());
        assert_eq!(section.header().opcode(), Opcode::QUERY);
        assert_eq!(section.header().rcode(), Rcode::NOERROR);
    }

    #[test]
    fn decode_ignores_trailing_data() {
        let mut wire = all_set().to_vec();
        wire.extend_from_slice(b"\x03com\0");
        assert_eq!(HeaderSection::decode(&wire), Ok((12, all_set())));
    }

    #[test]
    fn truncated() {
        let wire = all_set().to_vec();
        for len in 0..12 {
            let err = HeaderSection::decode(&wire[..len]).unwrap_err();
            assert_eq!(err.kind(), ParseError::TruncatedInput);
            assert_eq!(err.consumed(), 0);
        }
    }

    #[rstest]
    #[case::qr(0x8000, |h: &mut Header| h.set_qr(true))]
    #[case::aa(0x0400, |h: &mut Header| h.set_aa(true))]
    #[case::tc(0x0200, |h: &mut Header| h.set_tc(true))]
    #[case::rd(0x0100, |h: &mut Header| h.set_rd(true))]
    #[case::ra(0x0080, |h: &mut Header| h.set_ra(true))]
    #[case::z(0x0040, |h: &mut Header| h.set_z(true))]
    #[case::ad(0x0020, |h: &mut Header| h.set_ad(true))]
    #[case::cd(0x0010, |h: &mut Header| h.set_cd(true))]
    #[case::opcode(0x2800, |h: &mut Header| h.set_opcode(Opcode::UPDATE))]
    #[case::rcode(0x0003, |h: &mut Header| h.set_rcode(Rcode::NXDOMAIN))]
    fn single_field(#[case] word: u16, #[case] set: fn(&mut Header)) {
        let mut header = Header::new();
        set(&mut header);
        assert_eq!(header.flags_word(), word);

        let mut wire = vec![0xBE, 0xEF];
        wire.extend_from_slice(&word.to_be_bytes());
        let mut parser = Parser::from_ref(&wire[..]);
        let parsed = Header::parse(&mut parser).unwrap();
        assert_eq!(parsed.id(), 0xBEEF);
        assert_eq!(parsed.flags_word(), word);
        header.set_id(0xBEEF);
        assert_eq!(parsed, header);
    }

    #[test]
    fn wide_opcode_and_rcode_are_masked() {
        let mut header = Header::new();
        header.set_opcode(Opcode::from_int(0x15));
        header.set_rcode(Rcode::from_int(0xF3));
        assert_eq!(header.opcode(), Opcode::from_int(0x05));
        assert_eq!(header.rcode(), Rcode::from_int(0x03));
        assert_eq!(header.flags_word(), 0x2803);
    }

    #[test]
    #[cfg(feature = "rand")]
    fn random_id_keeps_flags() {
        let mut header = Header::new();
        header.set_rd(true);
        header.set_random_id();
        assert!(header.rd());
        assert_eq!(header.flags_word(), RD_MASK);
    }

    #[test]
    fn counts() {
        let mut counts = HeaderCounts::new();
        counts.set_qdcount(1);
        counts.set_ancount(0x1234);
        counts.set_nscount(3);
        counts.set_arcount(0xFFFF);
        let mut buf = Vec::new();
        infallible(counts.compose(&mut buf));
        assert_eq!(buf, [0, 1, 0x12, 0x34, 0, 3, 0xFF, 0xFF]);
        let mut parser = Parser::from_ref(&buf[..]);
        assert_eq!(HeaderCounts::parse(&mut parser), Ok(counts));
    }

    #[test]
    fn flags_from_str() {
        let f1 = Flags::from_str("").unwrap();
        assert_eq!(Flags::new(), f1);
        let f2 = Flags::from_str("QR AA").unwrap();
        assert!(f2.qr && f2.aa);
        let f3 = Flags::from_str("rd RA cd").unwrap();
        assert!(f3.rd && f3.ra && f3.cd && !f3.qr);
        assert_eq!(f3.to_string(), "RD RA CD");
        assert!(Flags::from_str("XY").is_err());
    }

    #[cfg(feature = "serde")]
    fn section_tokens(
        opcode: serde_test::Token,
        rcode: serde_test::Token,
    ) -> Vec<serde_test::Token> {
        use serde_test::Token;

        vec![
            Token::Struct { name: "HeaderSection", len: 2 },
            Token::Str("header"),
            Token::Struct { name: "Header", len: 5 },
            Token::Str("id"),
            Token::U16(0xBEEF),
            Token::Str("opcode"),
            opcode,
            Token::Str("flags"),
            Token::Struct { name: "Flags", len: 7 },
            Token::Str("qr"),
            Token::Bool(true),
            Token::Str("aa"),
            Token::Bool(false),
            Token::Str("tc"),
            Token::Bool(true),
            Token::Str("rd"),
            Token::Bool(true),
            Token::Str("ra"),
            Token::Bool(false),
            Token::Str("ad"),
            Token::Bool(true),
            Token::Str("cd"),
            Token::Bool(false),
            Token::StructEnd,
            Token::Str("z"),
            Token::Bool(true),
            Token::Str("rcode"),
            rcode,
            Token::StructEnd,
            Token::Str("counts"),
            Token::Struct { name: "HeaderCounts", len: 4 },
            Token::Str("qdcount"),
            Token::U16(1),
            Token::Str("ancount"),
            Token::U16(2),
            Token::Str("nscount"),
            Token::U16(3),
            Token::Str("arcount"),
            Token::U16(4),
            Token::StructEnd,
            Token::StructEnd,
        ]
    }

    #[cfg(feature = "serde")]
    fn update_section() -> HeaderSection {
        let mut header = Header::new();
        header.set_id(0xBEEF);
        header.set_opcode(Opcode::UPDATE);
        header.set_flags(Flags::from_str("QR TC RD AD").unwrap());
        header.set_z(true);
        header.set_rcode(Rcode::NXRRSET);
        HeaderSection::new(header, HeaderCounts::from_counts(1, 2, 3, 4))
    }

    #[test]
    #[cfg(feature = "serde")]
    fn ser_de() {
        use serde_test::{assert_tokens, Configure, Token};

        let section = update_section();
        assert_tokens(
            &section.compact(),
            &section_tokens(Token::U8(5), Token::U8(8)),
        );
        assert_tokens(
            &section.readable(),
            &section_tokens(Token::Str("UPDATE"), Token::Str("NXRRSET")),
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn deserialize_masks_opcode_and_rcode() {
        use serde_test::{assert_de_tokens, Configure, Token};

        let section = update_section();
        assert_de_tokens(
            &section.compact(),
            &section_tokens(Token::U8(21), Token::U8(200)),
        );
        assert_de_tokens(
            &section.readable(),
            &section_tokens(Token::Str("21"), Token::Str("200")),
        );
    }

    #[test]
    #[cfg(feature = "serde")]
    fn deserialized_header_round_trips() {
        let json = r#"{
            "header": {
                "id": 48879,
                "opcode": "21",
                "flags": {
                    "qr": true, "aa": false, "tc": true, "rd": true,
                    "ra": false, "ad": true, "cd": false
                },
                "z": true,
                "rcode": "200"
            },
            "counts": {
                "qdcount": 1, "ancount": 2, "nscount": 3, "arcount": 4
            }
        }"#;
        let section: HeaderSection = serde_json::from_str(json).unwrap();
        assert_eq!(section.header().opcode(), Opcode::UPDATE);
        assert_eq!(section.header().rcode(), Rcode::NXRRSET);
        assert_eq!(section, update_section());
        assert_eq!(HeaderSection::decode(&section.to_vec()), Ok((12, section)));
        assert_eq!(
            serde_json::from_str::<HeaderSection>(
                &serde_json::to_string(&section).unwrap()
            )
            .unwrap(),
            section
        );
    }
}
