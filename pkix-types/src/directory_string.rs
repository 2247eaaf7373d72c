//! DirectoryString (RFC 5280 Section 4.1.2.4)

use std::fmt;
use std::ops::Deref;

use serde::{Serialize, Serializer};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil::encoder::{EncodableTo, Encoder};
use sigil_asn1::Element;

use crate::error::{Error, Result};

/// ```asn1
/// DirectoryString ::= CHOICE {
///   teletexString     TeletexString (SIZE (1..MAX)),
///   printableString   PrintableString (SIZE (1..MAX)),
///   universalString   UniversalString (SIZE (1..MAX)),
///   utf8String        UTF8String (SIZE (1..MAX)),
///   bmpString         BMPString (SIZE (1..MAX))
/// }
/// ```
///
/// IA5String is accepted as well since `emailAddress` and
/// `domainComponent` attributes use it. UniversalString is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryString {
    inner: String,
}

impl DirectoryString {
    pub fn new(value: String) -> Self {
        Self { inner: value }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl Deref for DirectoryString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<&str> for DirectoryString {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl From<DirectoryString> for String {
    fn from(ds: DirectoryString) -> Self {
        ds.inner
    }
}

impl fmt::Display for DirectoryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for DirectoryString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.inner)
    }
}

impl DecodableFrom<Element> for DirectoryString {}

impl Decoder<Element, DirectoryString> for Element {
    type Error = Error;

    fn decode(&self) -> Result<DirectoryString> {
        self.as_str()
            .map(|s| DirectoryString::new(s.to_string()))
            .ok_or_else(|| {
                Error::InvalidDirectoryString(format!("expected a string type, got {}", self))
            })
    }
}

impl EncodableTo<DirectoryString> for Element {}

impl Encoder<DirectoryString, Element> for DirectoryString {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        if is_printable_string(&self.inner) {
            Ok(Element::PrintableString(self.inner.clone()))
        } else {
            Ok(Element::UTF8String(self.inner.clone()))
        }
    }
}

/// A-Z, a-z, 0-9, space, and ' ( ) + , - . / : = ?
fn is_printable_string(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                ' ' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | '=' | '?'
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::printable(Element::PrintableString("ZZ".to_string()), "ZZ")]
    #[case::utf8(Element::UTF8String("Exumbran Council".to_string()), "Exumbran Council")]
    #[case::teletex(Element::T61String("Zürich".to_string()), "Zürich")]
    #[case::bmp(Element::BMPString("Kopuncezis Krais".to_string()), "Kopuncezis Krais")]
    #[case::ia5(Element::IA5String("press@excouncil.zz".to_string()), "press@excouncil.zz")]
    fn test_decode(#[case] input: Element, #[case] expected: &str) {
        let ds: DirectoryString = input.decode().unwrap();
        assert_eq!(expected, ds.as_str());
    }

    #[test]
    fn test_decode_non_string() {
        let result: Result<DirectoryString> = Element::Null.decode();
        assert!(matches!(result, Err(Error::InvalidDirectoryString(_))));
    }

    #[rstest]
    #[case("221B Baker Street", Element::PrintableString("221B Baker Street".to_string()))]
    #[case("a@b", Element::UTF8String("a@b".to_string()))]
    fn test_encode_picks_narrowest_type(#[case] input: &str, #[case] expected: Element) {
        let ds = DirectoryString::from(input);
        assert_eq!(expected, ds.encode().unwrap());
    }
}
