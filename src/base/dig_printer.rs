use core::fmt;

use super::record::Record;
use super::Message;

/// Internal type for printing a message in dig style
///
/// This is only exposed to users of this library as `impl fmt::Display`.
pub(super) struct DigPrinter<'a> {
    pub msg: &'a Message,
}

impl<'a> fmt::Display for DigPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = self.msg;

        // Header
        let header = msg.header();
        let counts = msg.header_counts();

        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {}, rcode: {}, id: {}",
            header.opcode(),
            header.rcode(),
            header.id()
        )?;
        write!(f, ";; flags: {}", header.flags().to_string().to_lowercase())?;
        writeln!(
            f,
            "; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            counts.qdcount(),
            counts.ancount(),
            counts.nscount(),
            counts.arcount()
        )?;

        // Question
        if !msg.question().is_empty() {
            writeln!(f, "\n;; QUESTION SECTION:")?;
            for item in msg.question() {
                writeln!(f, ";{}", item)?;
            }
        }

        write_section(f, "ANSWER", msg.answer())?;
        write_section(f, "AUTHORITY", msg.authority())?;
        write_section(f, "ADDITIONAL", msg.additional())
    }
}

fn write_section(
    f: &mut impl fmt::Write,
    name: &str,
    records: &[Record],
) -> Result<(), fmt::Error> {
    if records.is_empty() {
        return Ok(());
    }
    writeln!(f, "\n;; {} SECTION:", name)?;
    for item in records {
        writeln!(f, "{}", item)?;
    }
    Ok(())
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use crate::base::iana::{Class, Rtype};
    use crate::base::name::Name;
    use crate::base::question::Question;
    use crate::base::rdata::RecordData;
    use crate::base::record::{Record, Ttl};
    use crate::base::Message;
    use core::str::FromStr;

    #[test]
    fn query() {
        let question = Question::new_in(
            Name::from_str("example.com").unwrap(),
            Rtype::AAAA,
        );
        let msg = Message::query(4711, question);
        assert_eq!(
            msg.display_dig_style().to_string(),
            ";; ->>HEADER<<- opcode: QUERY, rcode: NOERROR, id: 4711\n\
             ;; flags: rd; QUERY: 1, ANSWER: 0, AUTHORITY: 0, ADDITIONAL: 0\n\
             \n\
             ;; QUESTION SECTION:\n\
             ;example.com.\tAAAA\tIN\n"
        );
    }

    #[test]
    fn response() {
        let name = Name::from_str("example.com").unwrap();
        let mut msg = Message::query(1, Question::new_in(name.clone(), Rtype::A));
        msg.header_mut().set_qr(true);
        msg.header_mut().set_ra(true);
        msg.answer_mut().push(Record::new(
            name,
            Rtype::A,
            Class::IN,
            Ttl::HOUR,
            RecordData::from_slice(&[192, 0, 2, 1]).unwrap(),
        ));
        msg.update_counts().unwrap();
        assert_eq!(
            msg.display_dig_style().to_string(),
            ";; ->>HEADER<<- opcode: QUERY, rcode: NOERROR, id: 1\n\
             ;; flags: qr rd ra; QUERY: 1, ANSWER: 1, AUTHORITY: 0, ADDITIONAL: 0\n\
             \n\
             ;; QUESTION SECTION:\n\
             ;example.com.\tA\tIN\n\
             \n\
             ;; ANSWER SECTION:\n\
             example.com.\t3600\tIN\tA\t\\# 4 c0 00 02 01\n"
        );
    }
}
