//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for different
    /// network types. That is, each class has its own separate record tree
    /// starting at the root. However, in practice, only the IN class is really
    /// relevant.
    ///
    /// In addition, there are query classes or QCLASSes that are used in
    /// questions or UPDATE queries, namely NONE and ANY (or *).
    ///
    /// Classes are represented by a 16 bit value. The type wraps these values.
    ///
    /// See [RFC 1034] for the introduction of classes and
    /// the [DNS CLASSes IANA registry] for an overview of assigned values.
    ///
    /// [RFC 1034]: https://tools.ietf.org/html/rfc1034
    /// [DNS CLASSes IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
    =>
    Class, u16;

    /// Internet (IN).
    ///
    /// This class is defined in RFC 1035 and really the only one relevant
    /// at all.
    (IN => 1, "IN")

    /// Chaosnet (CH).
    ///
    /// A network protocol developed at MIT in the 1970s. Reused by BIND for
    /// built-in server information zones.
    (CH => 3, "CH")

    /// Hesiod (HS).
    ///
    /// A system information protocol part of MIT's Project Athena.
    (HS => 4, "HS")

    /// Query class None.
    ///
    /// Defined in RFC 2136, this class is used in UPDATE queries to
    /// require that an RRset does not exist prior to the update.
    (NONE => 0xFE, "NONE")

    /// Query class * (ANY).
    ///
    /// This class can be used in a query to indicate that records for the
    /// given name from any class are requested.
    (ANY => 0xFF, "*")
}

int_enum_str_with_prefix!(Class, "CLASS", u16, "unknown class");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn from_str_and_display() {
        assert_eq!(Class::from_str("in"), Ok(Class::IN));
        assert_eq!(Class::from_str("*"), Ok(Class::ANY));
        assert_eq!(Class::from_str("CLASS3"), Ok(Class::CH));
        assert_eq!(Class::from_str("class512"), Ok(Class::from_int(512)));
        assert!(Class::from_str("CLASS").is_err());
        assert!(Class::from_str("IN2").is_err());
        assert_eq!(Class::from_int(512).to_string(), "CLASS512");
        assert_eq!(Class::HS.to_string(), "HS");
    }
}
