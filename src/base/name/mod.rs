//! Domain names.
//!
//! Domain names are a sequence of *labels* which are in turn a sequence of
//! up to 63 octets. While they are limited to a subset of ASCII by
//! convention, all octet values are allowed. In their wire-format
//! representation labels are prefixed with an octet containing the the number
//! of octets in the label. The labels in a domain name are nominally arranged
//! backwards. That is, the ‘most significant’ label is the last one. In an
//! *absolute* domain name, this last label is an empty label, called the
//! *root label* and indicating the root of the domain name tree. Only
//! absolute names can appear inside DNS messages.
//!
//! This module provides [`Label`], an owned label, and [`Name`], a
//! self-contained absolute domain name. The root label is implied by
//! [`Name`] and never stored with the other labels.
//!
//! In order to save space in DNS messages, a name can end in a pointer to
//! another name stored elsewhere in the message. Such *compressed* names
//! are not supported. Parsing a name stops with an error at the first
//! pointer it encounters. Names are always composed uncompressed.

pub use self::absolute::Name;
pub use self::label::{Label, LongLabelError, NameError};

mod absolute;
mod label;
