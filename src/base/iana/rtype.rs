//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource records has a 16 bit type value indicating what kind of
    /// information is represented by the record. Normal query includes the
    /// type of record information is requested for. A few aditional types,
    /// called query types, are defined as well and can only be used in
    /// questions.
    ///
    /// The record data itself is never interpreted by this crate, so the
    /// type only serves to identify records and to print them. Only the
    /// commonly seen values are given names here. The complete list can
    /// be found in the [IANA registry].
    ///
    /// In order to avoid confusion over capitalization, the mnemonics are
    /// treated as constants rather than variant names.
    ///
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// A null resource record.
    ///
    /// (Experimental.)
    (NULL => 10, "NULL")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Host information.
    (HINFO => 13, "HINFO")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// IPv6 address.
    ///
    /// See RFC 3596.
    (AAAA => 28, "AAAA")

    /// Server selection.
    ///
    /// See RFC 2782.
    (SRV => 33, "SRV")

    /// Delegation name.
    ///
    /// See RFC 6672.
    (DNAME => 39, "DNAME")

    /// OPT pseudo-record.
    ///
    /// See RFC 6891.
    (OPT => 41, "OPT")

    /// Delegation signer.
    ///
    /// See RFC 4034.
    (DS => 43, "DS")

    /// RRSIG.
    ///
    /// See RFC 4034.
    (RRSIG => 46, "RRSIG")

    /// NSEC.
    ///
    /// See RFC 4034.
    (NSEC => 47, "NSEC")

    /// DNSKEY.
    ///
    /// See RFC 4034.
    (DNSKEY => 48, "DNSKEY")

    /// Service binding.
    ///
    /// See RFC 9460.
    (SVCB => 64, "SVCB")

    /// HTTPS service binding.
    ///
    /// See RFC 9460.
    (HTTPS => 65, "HTTPS")

    /// Certification authority authorization.
    ///
    /// See RFC 8659.
    (CAA => 257, "CAA")

    /// Incremental transfer.
    (IXFR => 251, "IXFR")

    /// Transfer of entire zone.
    (AXFR => 252, "AXFR")

    /// A request for all records the server/cache has available.
    (ANY => 255, "ANY")
}

int_enum_str_with_prefix!(Rtype, "TYPE", u16, "unknown record type");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn from_str_and_display() {
        assert_eq!(Rtype::from_str("aaaa"), Ok(Rtype::AAAA));
        assert_eq!(Rtype::from_str("TYPE1"), Ok(Rtype::A));
        assert_eq!(Rtype::from_str("type65280"), Ok(Rtype::from_int(65280)));
        assert!(Rtype::from_str("TYPE65536").is_err());
        assert_eq!(Rtype::from_int(65280).to_string(), "TYPE65280");
        assert_eq!(Rtype::MX.to_string(), "MX");
    }

    #[test]
    fn wire_format() {
        use octseq::builder::infallible;
        use octseq::parse::Parser;

        let mut buf = std::vec::Vec::new();
        infallible(Rtype::CAA.compose(&mut buf));
        assert_eq!(buf, b"\x01\x01");
        assert_eq!(Rtype::COMPOSE_LEN, 2);

        let mut parser = Parser::from_ref(&buf[..]);
        assert_eq!(Rtype::parse(&mut parser), Ok(Rtype::CAA));
        assert_eq!(parser.remaining(), 0);
    }
}
