//! A complete DNS message.
//!
//! This module defines the type [`Message`] which holds a DNS message with
//! all its parts decoded: the header section followed by the question,
//! answer, authority, and additional sections.
//!
//! A message is decoded in one go. Either all of it is decoded or decoding
//! fails with a [`DecodeError`] that says in which section and at which
//! question or record things went wrong. There is never a partially
//! decoded message.
//!
//! The section counts of the header are kept as they are, both when
//! decoding and when composing. [`Message::from_sections`] creates a
//! message with counts derived from the sections and
//! [`Message::counts_match`] checks whether they agree.

use super::dig_printer::DigPrinter;
use super::header::{Header, HeaderCounts, HeaderSection};
use super::question::Question;
use super::record::Record;
use super::wire::{decode_slice, parse_repeated, DecodeError, Section};
use core::fmt;
use octseq::builder::{infallible, OctetsBuilder};
use octseq::parse::Parser;
use std::vec::Vec;
use tracing::{debug, trace};

//------------ Message -------------------------------------------------------

/// A DNS message.
///
/// The message consists of the twelve octet header section and four
/// sections: the question section holds [`Question`]s while the answer,
/// authority, and additional sections hold [`Record`]s.
///
/// The counts in the header section are not updated when the sections
/// change. Composing a message always writes the header as it is followed
/// by the entries of all the sections.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    header: HeaderSection,
    question: Vec<Question>,
    answer: Vec<Record>,
    authority: Vec<Record>,
    additional: Vec<Record>,
}

/// # Creation
///
impl Message {
    /// Creates a message from all its parts.
    ///
    /// The section counts of `header` are taken as given even if they
    /// disagree with the actual number of entries.
    #[must_use]
    pub fn from_parts(
        header: HeaderSection,
        question: Vec<Question>,
        answer: Vec<Record>,
        authority: Vec<Record>,
        additional: Vec<Record>,
    ) -> Self {
        Message {
            header,
            question,
            answer,
            authority,
            additional,
        }
    }

    /// Creates a message from a header and the four sections.
    ///
    /// The section counts are set to the number of entries in each
    /// section. Fails if any section has more than 65,535 entries.
    pub fn from_sections(
        header: Header,
        question: Vec<Question>,
        answer: Vec<Record>,
        authority: Vec<Record>,
        additional: Vec<Record>,
    ) -> Result<Self, LongSectionError> {
        let mut res = Message::from_parts(
            HeaderSection::new(header, HeaderCounts::new()),
            question,
            answer,
            authority,
            additional,
        );
        res.update_counts()?;
        Ok(res)
    }

    /// Creates a standard query for a single question.
    ///
    /// The query has the given message ID, the opcode QUERY and the RD bit
    /// set. Its question count is one and all other counts are zero.
    #[must_use]
    pub fn query(id: u16, question: Question) -> Self {
        let mut header = Header::new();
        header.set_id(id);
        header.set_rd(true);
        Message::from_parts(
            HeaderSection::new(header, HeaderCounts::from_counts(1, 0, 0, 0)),
            std::vec![question],
            Vec::new(),
            Vec::new(),
            Vec::new(),
        )
    }

    /// Creates a standard query with a random message ID.
    ///
    /// Apart from the ID, this is the same as [`Message::query`].
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn random_query(question: Question) -> Self {
        Message::query(::rand::random(), question)
    }
}

/// # Header Section
///
impl Message {
    /// Returns the message header.
    pub fn header(&self) -> Header {
        self.header.header()
    }

    /// Returns a mutable reference to the message header.
    pub fn header_mut(&mut self) -> &mut Header {
        self.header.header_mut()
    }

    /// Returns the header counts of the message.
    pub fn header_counts(&self) -> HeaderCounts {
        self.header.counts()
    }

    /// Returns a mutable reference to the header counts.
    pub fn header_counts_mut(&mut self) -> &mut HeaderCounts {
        self.header.counts_mut()
    }

    /// Returns the entire header section.
    pub fn header_section(&self) -> HeaderSection {
        self.header
    }

    /// Returns whether the header counts agree with the sections.
    pub fn counts_match(&self) -> bool {
        let counts = self.header.counts();
        usize::from(counts.qdcount()) == self.question.len()
            && usize::from(counts.ancount()) == self.answer.len()
            && usize::from(counts.nscount()) == self.authority.len()
            && usize::from(counts.arcount()) == self.additional.len()
    }

    /// Sets the header counts to the number of entries in each section.
    ///
    /// If any of the sections is too long, the counts are left unchanged.
    pub fn update_counts(&mut self) -> Result<(), LongSectionError> {
        let counts = HeaderCounts::from_counts(
            section_count(self.question.len(), Section::Question)?,
            section_count(self.answer.len(), Section::Answer)?,
            section_count(self.authority.len(), Section::Authority)?,
            section_count(self.additional.len(), Section::Additional)?,
        );
        *self.header.counts_mut() = counts;
        Ok(())
    }
}

fn section_count(
    len: usize,
    section: Section,
) -> Result<u16, LongSectionError> {
    u16::try_from(len).map_err(|_| LongSectionError { section })
}

/// # Sections
///
/// The mutable accessors leave the header counts untouched. Use
/// [`update_counts`][Message::update_counts] to bring them in line again.
impl Message {
    /// Returns the question section.
    pub fn question(&self) -> &[Question] {
        &self.question
    }

    /// Returns a mutable reference to the question section.
    pub fn question_mut(&mut self) -> &mut Vec<Question> {
        &mut self.question
    }

    /// Returns the answer section.
    pub fn answer(&self) -> &[Record] {
        &self.answer
    }

    /// Returns a mutable reference to the answer section.
    pub fn answer_mut(&mut self) -> &mut Vec<Record> {
        &mut self.answer
    }

    /// Returns the authority section.
    pub fn authority(&self) -> &[Record] {
        &self.authority
    }

    /// Returns a mutable reference to the authority section.
    pub fn authority_mut(&mut self) -> &mut Vec<Record> {
        &mut self.authority
    }

    /// Returns the additional section.
    pub fn additional(&self) -> &[Record] {
        &self.additional
    }

    /// Returns a mutable reference to the additional section.
    pub fn additional_mut(&mut self) -> &mut Vec<Record> {
        &mut self.additional
    }

    /// Returns the first question, if there is one.
    pub fn first_question(&self) -> Option<&Question> {
        self.question.first()
    }

    /// Returns the records of one of the three record sections.
    ///
    /// Returns `None` for [`Section::Header`] and [`Section::Question`].
    pub fn records(&self, section: Section) -> Option<&[Record]> {
        match section {
            Section::Answer => Some(&self.answer),
            Section::Authority => Some(&self.authority),
            Section::Additional => Some(&self.additional),
            Section::Header | Section::Question => None,
        }
    }

    /// Returns an iterator over the records of all record sections.
    ///
    /// Each record is returned together with the section it was found in.
    pub fn iter(&self) -> MessageIter<'_> {
        MessageIter {
            message: self,
            section: Section::Answer,
            pos: 0,
        }
    }

    /// Returns the record sections as a tuple.
    pub fn into_sections(
        self,
    ) -> (Vec<Question>, Vec<Record>, Vec<Record>, Vec<Record>) {
        (self.question, self.answer, self.authority, self.additional)
    }
}

/// # Parsing and Composing
///
impl Message {
    /// Takes a message from the beginning of a parser.
    ///
    /// The sections are parsed in order using the counts from the header.
    /// Any error is annotated with the section it occurred in.
    pub fn parse<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
    ) -> Result<Self, DecodeError> {
        let header = HeaderSection::parse(parser)
            .map_err(|err| DecodeError::from(err).in_section(Section::Header))?;
        let counts = header.counts();
        trace!(
            "Decoding message id {} with counts {}/{}/{}/{}",
            header.header().id(),
            counts.qdcount(),
            counts.ancount(),
            counts.nscount(),
            counts.arcount()
        );
        let question = parse_repeated(parser, counts.qdcount(), "question")
            .map_err(|err| err.in_section(Section::Question))?;
        let answer =
            Self::parse_records(parser, counts.ancount(), Section::Answer)?;
        let authority =
            Self::parse_records(parser, counts.nscount(), Section::Authority)?;
        let additional =
            Self::parse_records(parser, counts.arcount(), Section::Additional)?;
        Ok(Message {
            header,
            question,
            answer,
            authority,
            additional,
        })
    }

    fn parse_records<Octs: AsRef<[u8]> + ?Sized>(
        parser: &mut Parser<'_, Octs>,
        count: u16,
        section: Section,
    ) -> Result<Vec<Record>, DecodeError> {
        parse_repeated(parser, count, "record")
            .map_err(|err| err.in_section(section))
    }

    /// Decodes a message from the beginning of `data`.
    ///
    /// On success, returns the number of octets consumed and the message.
    /// Octets following the last record of the additional section are not
    /// looked at.
    pub fn decode(data: &[u8]) -> Result<(usize, Self), DecodeError> {
        decode_slice(data, |parser| Self::parse(parser)).map_err(|err| {
            debug!(
                "Failed to decode message after {} of {} octets: {}",
                err.consumed(),
                data.len(),
                err
            );
            err
        })
    }

    /// Returns the length of the message in wire format.
    pub fn compose_len(&self) -> usize {
        usize::from(HeaderSection::COMPOSE_LEN)
            + self.question.iter().map(Question::compose_len).sum::<usize>()
            + self.iter().map(|(_, record)| record.compose_len()).sum::<usize>()
    }

    pub fn compose<Target: OctetsBuilder + ?Sized>(
        &self,
        target: &mut Target,
    ) -> Result<(), Target::AppendError> {
        self.header.compose(target)?;
        for question in &self.question {
            question.compose(target)?;
        }
        for (_, record) in self.iter() {
            record.compose(target)?;
        }
        Ok(())
    }

    /// Returns the wire format of the message.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.compose_len());
        infallible(self.compose(&mut res));
        trace!(
            "Composed message id {} into {} octets",
            self.header().id(),
            res.len()
        );
        res
    }
}

/// # Printing
///
impl Message {
    /// Returns a value that displays the message like dig does.
    ///
    /// ```
    /// use core::str::FromStr;
    /// use dnswire::base::{Message, Name, Question, Rtype};
    ///
    /// let question = Question::new_in(Name::from_str("example.com").unwrap(), Rtype::A);
    /// let output = Message::query(7, question).display_dig_style().to_string();
    /// assert!(output.starts_with(";; ->>HEADER<<- opcode: QUERY, rcode: NOERROR, id: 7\n"));
    /// ```
    pub fn display_dig_style(&self) -> impl fmt::Display + '_ {
        DigPrinter { msg: self }
    }
}

//--- IntoIterator

impl<'a> IntoIterator for &'a Message {
    type Item = (Section, &'a Record);
    type IntoIter = MessageIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//------------ MessageIter ---------------------------------------------------

/// An iterator over the records in the record sections of a message.
///
/// Records are returned in message order with the section they belong to.
#[derive(Clone, Debug)]
pub struct MessageIter<'a> {
    message: &'a Message,
    section: Section,
    pos: usize,
}

impl<'a> Iterator for MessageIter<'a> {
    type Item = (Section, &'a Record);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let records = self.message.records(self.section)?;
            if let Some(record) = records.get(self.pos) {
                self.pos += 1;
                return Some((self.section, record));
            }
            self.section = match self.section {
                Section::Answer => Section::Authority,
                Section::Authority => Section::Additional,
                _ => Section::Header,
            };
            self.pos = 0;
        }
    }
}

//============ Error Types ===================================================

//------------ LongSectionError ----------------------------------------------

/// A section has more entries than its header count can express.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongSectionError {
    section: Section,
}

impl LongSectionError {
    /// Returns the section that is too long.
    pub fn section(&self) -> Section {
        self.section
    }
}

impl fmt::Display for LongSectionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "too many entries in {}", self.section)
    }
}

impl std::error::Error for LongSectionError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::{Class, Opcode, Rcode, Rtype};
    use crate::base::name::Name;
    use crate::base::rdata::RecordData;
    use crate::base::record::Ttl;
    use crate::base::wire::ParseError;
    use core::str::FromStr;

    fn question(name: &str, qtype: u16, qclass: u16) -> Question {
        Question::new(
            Name::from_str(name).unwrap(),
            Rtype::from_int(qtype),
            Class::from_int(qclass),
        )
    }

    fn record(name: &str, rtype: u16, class: u16, ttl: u32) -> Record {
        Record::from_question(
            question(name, rtype, class),
            Ttl::from_secs(ttl),
            RecordData::from_slice(b"foo").unwrap(),
        )
    }

    fn short_message() -> Message {
        let mut header = Header::new();
        header.set_id(1);
        header.set_opcode(Opcode::from_int(0b1111));
        header.set_flags("QR AA TC RD RA AD CD".parse().unwrap());
        header.set_z(true);
        header.set_rcode(Rcode::from_int(0b1111));
        Message::from_sections(
            header,
            vec![question("com", 1, 2), question("fr", 3, 4)],
            vec![record("com", 1, 2, 1), record("fr", 3, 4, 1)],
            vec![record("ar", 1, 1, 255)],
            Vec::new(),
        )
        .unwrap()
    }

    const SHORT_MESSAGE: &[u8] = b"\
        \x00\x01\xff\xff\x00\x02\x00\x02\x00\x01\x00\x00\
        \x03com\x00\x00\x01\x00\x02\
        \x02fr\x00\x00\x03\x00\x04\
        \x03com\x00\x00\x01\x00\x02\x00\x00\x00\x01\x00\x03foo\
        \x02fr\x00\x00\x03\x00\x04\x00\x00\x00\x01\x00\x03foo\
        \x02ar\x00\x00\x01\x00\x01\x00\x00\x00\xff\x00\x03foo";

    #[test]
    fn compose() {
        let msg = short_message();
        assert_eq!(msg.to_vec(), SHORT_MESSAGE);
        assert_eq!(msg.compose_len(), SHORT_MESSAGE.len());
        assert_eq!(SHORT_MESSAGE.len(), 81);
    }

    #[test]
    fn decode() {
        assert_eq!(
            Message::decode(SHORT_MESSAGE),
            Ok((SHORT_MESSAGE.len(), short_message()))
        );
    }

    #[test]
    fn decode_ignores_trailing_octets() {
        let mut wire = SHORT_MESSAGE.to_vec();
        wire.extend_from_slice(b"junk");
        let (len, msg) = Message::decode(&wire).unwrap();
        assert_eq!(len, SHORT_MESSAGE.len());
        assert_eq!(msg, short_message());
    }

    #[test]
    fn decode_errors_carry_section() {
        let err = Message::decode(&SHORT_MESSAGE[..11]).unwrap_err();
        assert_eq!(err.kind(), ParseError::TruncatedInput);
        assert_eq!(err.section(), Some(Section::Header));
        assert_eq!(err.consumed(), 0);

        // Cut into the second question.
        let err = Message::decode(&SHORT_MESSAGE[..27]).unwrap_err();
        assert_eq!(err.kind(), ParseError::MissingTypeClass);
        assert_eq!(err.section(), Some(Section::Question));
        assert_eq!(err.index(), Some(2));
        assert_eq!(err.consumed(), 25);

        // Cut into the record data of the authority record.
        let err =
            Message::decode(&SHORT_MESSAGE[..SHORT_MESSAGE.len() - 1])
                .unwrap_err();
        assert_eq!(err.kind(), ParseError::TruncatedRData);
        assert_eq!(err.section(), Some(Section::Authority));
        assert_eq!(err.index(), Some(1));
        assert_eq!(err.consumed(), SHORT_MESSAGE.len() - 3);
        assert_eq!(
            err.to_string(),
            "authority section: record 1 of 1: truncated record data"
        );
    }

    #[test]
    fn counts_are_trusted() {
        let mut msg = short_message();
        msg.header_counts_mut().set_nscount(0);
        assert!(!msg.counts_match());

        let wire = msg.to_vec();
        let mut expected = SHORT_MESSAGE.to_vec();
        expected[9] = 0;
        assert_eq!(wire, expected);

        // The authority record now is left over after the message.
        let (len, decoded) = Message::decode(&wire).unwrap();
        assert_eq!(len, wire.len() - 17);
        assert!(decoded.authority().is_empty());
        assert!(decoded.counts_match());
    }

    #[test]
    fn update_counts() {
        let mut msg = short_message();
        msg.additional_mut().push(record("nl", 1, 1, 10));
        assert!(!msg.counts_match());
        msg.update_counts().unwrap();
        assert!(msg.counts_match());
        assert_eq!(msg.header_counts().arcount(), 1);
    }

    #[test]
    fn query() {
        let msg = Message::query(0x1234, question("example.com", 1, 1));
        assert!(msg.counts_match());
        assert!(msg.header().rd());
        assert!(!msg.header().qr());
        assert_eq!(msg.header().opcode(), Opcode::QUERY);
        assert_eq!(
            msg.first_question(),
            Some(&question("example.com", 1, 1))
        );
        assert_eq!(
            &msg.to_vec()[..12],
            b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00"
        );
    }

    #[test]
    #[cfg(feature = "rand")]
    fn random_query() {
        let msg = Message::random_query(question("example.com", 1, 1));
        assert!(msg.counts_match());
        assert!(msg.header().rd());
    }

    #[test]
    fn iter() {
        let msg = short_message();
        let sections: Vec<_> = msg
            .iter()
            .map(|(section, record)| (section, record.owner().to_string()))
            .collect();
        assert_eq!(
            sections,
            [
                (Section::Answer, String::from("com.")),
                (Section::Answer, String::from("fr.")),
                (Section::Authority, String::from("ar.")),
            ]
        );
        assert_eq!(Message::default().iter().count(), 0);
    }

    #[test]
    fn empty_message() {
        let msg = Message::default();
        assert_eq!(msg.to_vec(), [0u8; 12]);
        assert_eq!(Message::decode(&[0u8; 12]), Ok((12, msg)));
    }
}
