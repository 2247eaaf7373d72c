//! Certificate Serial Number
//!
//! Defined in RFC 5280 Section 4.1.2.2
//!
//! ```asn1
//! CertificateSerialNumber ::= INTEGER
//! ```
//!
//! Conforming CAs issue positive serials of at most 20 octets, but
//! negative and zero serials exist in the wild and are kept as read.

use std::fmt;

use serde::Serialize;
use sigil::decoder::{DecodableFrom, Decoder};
use sigil::encoder::{EncodableTo, Encoder};
use sigil_asn1::{Element, Integer};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CertificateSerialNumber {
    inner: Integer,
}

impl CertificateSerialNumber {
    pub fn as_integer(&self) -> &Integer {
        &self.inner
    }

    /// Lowercase hex octets joined by colons, OpenSSL style (`04:d2`).
    pub fn format_hex(&self) -> String {
        self.inner
            .to_signed_bytes_be()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl From<Integer> for CertificateSerialNumber {
    fn from(inner: Integer) -> Self {
        Self { inner }
    }
}

impl fmt::Display for CertificateSerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// Decimal string, so large serials survive JSON.
impl Serialize for CertificateSerialNumber {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.inner)
    }
}

impl DecodableFrom<Element> for CertificateSerialNumber {}

impl Decoder<Element, CertificateSerialNumber> for Element {
    type Error = Error;

    fn decode(&self) -> Result<CertificateSerialNumber> {
        match self {
            Element::Integer(i) => Ok(CertificateSerialNumber { inner: i.clone() }),
            _ => Err(Error::InvalidSerialNumber(format!(
                "expected INTEGER, got {}",
                self
            ))),
        }
    }
}

impl EncodableTo<CertificateSerialNumber> for Element {}

impl Encoder<CertificateSerialNumber, Element> for CertificateSerialNumber {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        Ok(Element::Integer(self.inner.clone()))
    }
}
