//! DNS OpCodes.

//------------ Opcode --------------------------------------------------------

int_enum! {
    /// DNS OpCodes.
    ///
    /// The opcode specifies the kind of query to be performed. It occupies
    /// four bits of the message header. While the type can hold any eight
    /// bit value, only the lower four bits are kept by a message header.
    ///
    /// The opcode and its initial set of values are defined in [RFC 1035].
    /// Additional values have been defined over time. All currently assigned
    /// values can be found in the [IANA registry].
    ///
    /// [RFC 1035]: https://tools.ietf.org/html/rfc1035
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-5
    =>
    Opcode, u8;

    /// A standard query (0).
    ///
    /// This query requests all records matching the name, class, and record
    /// type given in the query’s question section.
    (QUERY => 0, "QUERY")

    /// An inverse query (IQUERY) (1, obsolete).
    ///
    /// This value was defined in [RFC 1035] and obsoleted by [RFC 3425].
    ///
    /// [RFC 1035]: https://tools.ietf.org/html/rfc1035
    /// [RFC 3425]: https://tools.ietf.org/html/rfc3425
    (IQUERY => 1, "IQUERY")

    /// A server status request (2).
    (STATUS => 2, "STATUS")

    /// A NOTIFY query (4).
    ///
    /// NOTIFY queries allow primary servers to inform secondary servers when
    /// a zone has changed. Defined in [RFC 1996].
    ///
    /// [RFC 1996]: https://tools.ietf.org/html/rfc1996
    (NOTIFY => 4, "NOTIFY")

    /// An UPDATE query (5).
    ///
    /// The UPDATE query can be used to alter zone content managed by an
    /// authoritative server. Defined in [RFC 2136].
    ///
    /// [RFC 2136]: https://tools.ietf.org/html/rfc2136
    (UPDATE => 5, "UPDATE")

    /// DNS Stateful operations (DSO) (6).
    ///
    /// Defined in [RFC 8490].
    ///
    /// [RFC 8490]: https://tools.ietf.org/html/rfc8490
    (DSO => 6, "DSO")
}

int_enum_str_with_decimal!(Opcode, u8, "unknown opcode");

impl Default for Opcode {
    fn default() -> Self {
        Opcode::QUERY
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn mnemonics() {
        assert_eq!(Opcode::from_str("query"), Ok(Opcode::QUERY));
        assert_eq!(Opcode::from_str("5"), Ok(Opcode::UPDATE));
        assert_eq!(Opcode::from_str("12"), Ok(Opcode::from_int(12)));
        assert!(Opcode::from_str("QUERYX").is_err());
        assert_eq!(Opcode::NOTIFY.to_string(), "NOTIFY");
        assert_eq!(Opcode::from_int(9).to_string(), "9");
        assert_eq!(format!("{:?}", Opcode::DSO), "Opcode::DSO");
        assert_eq!(format!("{:?}", Opcode::from_int(9)), "Opcode(9)");
    }
}
