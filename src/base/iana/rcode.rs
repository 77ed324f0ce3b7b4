//! DNS response codes.
//!
//! The original DNS specification in [RFC 1035] specified four bits of the
//! message header as response code. The type [`Rcode`] defined herein
//! represents these codes. Extended response codes carried in OPT records
//! are not covered.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

//------------ Rcode ---------------------------------------------------------

int_enum! {
    /// DNS Response Codes.
    ///
    /// The response code of a response indicates what happend on the server
    /// when trying to answer the query. The code is a 4 bit value and part
    /// of the header of a DNS message. As with [`Opcode`], values wider
    /// than four bits can be represented but are cut down to their lower
    /// four bits when placed into a header.
    ///
    /// [`Opcode`]: super::Opcode
    =>
    Rcode, u8;

    /// No error condition (0).
    (NOERROR => 0, "NOERROR")

    /// Format error (1).
    ///
    /// The name server was unable to interpret the query.
    (FORMERR => 1, "FORMERR")

    /// Server failure (2).
    ///
    /// The name server was unable to process this query due to a problem
    /// with the name server.
    (SERVFAIL => 2, "SERVFAIL")

    /// Name error (3).
    ///
    /// The domain name given in the query does not exist at the name server.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// Not implemented (4).
    ///
    /// The name server does not support the requested kind of query.
    (NOTIMP => 4, "NOTIMP")

    /// Query refused (5).
    ///
    /// The name server refused to perform the operation requested by the
    /// query for policy reasons.
    (REFUSED => 5, "REFUSED")

    /// Name exists when it should not (6).
    (YXDOMAIN => 6, "YXDOMAIN")

    /// RR set exists when it should not (7).
    (YXRRSET => 7, "YXRRSET")

    /// RR set that should exist does not (8).
    (NXRRSET => 8, "NXRRSET")

    /// Server not authoritative for zone or client not authorized (9).
    (NOTAUTH => 9, "NOTAUTH")

    /// Name not contained in zone (10).
    (NOTZONE => 10, "NOTZONE")
}

int_enum_str_with_decimal!(Rcode, u8, "unknown rcode");

impl Default for Rcode {
    fn default() -> Self {
        Rcode::NOERROR
    }
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn mnemonics() {
        assert_eq!(Rcode::from_str("nxdomain"), Ok(Rcode::NXDOMAIN));
        assert_eq!(Rcode::from_str("2"), Ok(Rcode::SERVFAIL));
        assert_eq!(Rcode::REFUSED.to_string(), "REFUSED");
        assert_eq!(Rcode::from_int(15).to_string(), "15");
        assert_eq!(Rcode::default(), Rcode::NOERROR);
    }
}
