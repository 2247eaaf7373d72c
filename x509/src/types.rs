//! Version and Validity
//!
//! ```asn1
//! Version  ::=  INTEGER  {  v1(0), v2(1), v3(2)  }
//!
//! Validity ::= SEQUENCE {
//!     notBefore      Time,
//!     notAfter       Time
//! }
//!
//! Time ::= CHOICE {
//!     utcTime        UTCTime,
//!     generalTime    GeneralizedTime
//! }
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil_asn1::Element;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Version {
    #[default]
    V1 = 0,
    V2 = 1,
    V3 = 2,
}

impl Version {
    /// 1, 2 or 3, as certificates are usually described.
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.number())
    }
}

impl DecodableFrom<Element> for Version {}

impl Decoder<Element, Version> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Version> {
        let Element::Integer(i) = self else {
            return Err(Error::InvalidVersion(
                "expected INTEGER for Version".to_string(),
            ));
        };
        match i.to_i64() {
            Some(0) => Ok(Version::V1),
            Some(1) => Ok(Version::V2),
            Some(2) => Ok(Version::V3),
            _ => Err(Error::InvalidVersion(format!("unknown version value: {}", i))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validity {
    not_before: NaiveDateTime,
    not_after: NaiveDateTime,
}

impl Validity {
    pub fn new(not_before: NaiveDateTime, not_after: NaiveDateTime) -> Self {
        Self {
            not_before,
            not_after,
        }
    }

    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before.and_utc()
    }

    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after.and_utc()
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.not_before() <= at && at <= self.not_after()
    }
}

fn time(element: &Element, field: &str) -> Result<NaiveDateTime> {
    match element {
        Element::UTCTime(t) | Element::GeneralizedTime(t) => Ok(*t),
        other => Err(Error::InvalidValidity(format!(
            "expected UTCTime or GeneralizedTime for {}, got {}",
            field, other
        ))),
    }
}

impl DecodableFrom<Element> for Validity {}

impl Decoder<Element, Validity> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Validity> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidValidity("expected SEQUENCE".to_string()));
        };
        let [not_before, not_after] = elements.as_slice() else {
            return Err(Error::InvalidValidity(format!(
                "expected 2 elements, got {}",
                elements.len()
            )));
        };
        Ok(Validity::new(
            time(not_before, "notBefore")?,
            time(not_after, "notAfter")?,
        ))
    }
}
