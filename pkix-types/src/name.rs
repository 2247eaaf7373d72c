//! Name and related types
//!
//! Defined in RFC 5280 Section 4.1.2.4
//!
//! ```asn1
//! Name ::= CHOICE { -- only one possibility for now --
//!     rdnSequence  RDNSequence
//! }
//!
//! RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
//!
//! RelativeDistinguishedName ::= SET OF AttributeTypeAndValue
//!
//! AttributeTypeAndValue ::= SEQUENCE {
//!     type     AttributeType,
//!     value    AttributeValue
//! }
//!
//! AttributeType ::= OBJECT IDENTIFIER
//! AttributeValue ::= ANY -- DEFINED BY AttributeType
//! ```

use std::fmt;

use serde::{Serialize, ser::SerializeStruct};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil::encoder::{EncodableTo, Encoder};
use sigil_asn1::{Element, ObjectIdentifier};

use crate::OidName;
use crate::directory_string::DirectoryString;
use crate::error::{Error, Result};

/// X.509 Name: a sequence of RDNs in encoding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    rdn_sequence: Vec<RelativeDistinguishedName>,
}

impl Name {
    pub fn new(rdn_sequence: Vec<RelativeDistinguishedName>) -> Self {
        Self { rdn_sequence }
    }

    pub fn rdn_sequence(&self) -> &[RelativeDistinguishedName] {
        &self.rdn_sequence
    }

    /// All attributes, RDN by RDN, in encoding order.
    pub fn attributes(&self) -> impl Iterator<Item = &AttributeTypeAndValue> {
        self.rdn_sequence.iter().flat_map(|rdn| rdn.attributes.iter())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .rdn_sequence
            .iter()
            .map(|rdn| {
                rdn.attributes
                    .iter()
                    .map(|attr| {
                        let key = attr
                            .oid_name()
                            .map(str::to_string)
                            .unwrap_or_else(|| attr.attribute_type.to_string());
                        format!("{}={}", key, attr.attribute_value)
                    })
                    .collect::<Vec<_>>()
                    .join("+")
            })
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", formatted)
    }
}

impl DecodableFrom<Element> for Name {}

impl Decoder<Element, Name> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Name> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidName("expected SEQUENCE".to_string()));
        };
        let rdn_sequence = elements
            .iter()
            .map(|elem| elem.decode())
            .collect::<Result<Vec<RelativeDistinguishedName>>>()?;
        log::trace!("decoded name with {} RDNs", rdn_sequence.len());
        Ok(Name { rdn_sequence })
    }
}

impl EncodableTo<Name> for Element {}

impl Encoder<Name, Element> for Name {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let rdns = self
            .rdn_sequence
            .iter()
            .map(|rdn| rdn.encode())
            .collect::<Result<Vec<Element>>>()?;
        Ok(Element::Sequence(rdns))
    }
}

/// One RDN. Usually a single attribute; multi-valued RDNs keep every value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDistinguishedName {
    pub attributes: Vec<AttributeTypeAndValue>,
}

impl RelativeDistinguishedName {
    pub fn new(attributes: Vec<AttributeTypeAndValue>) -> Self {
        Self { attributes }
    }
}

impl DecodableFrom<Element> for RelativeDistinguishedName {}

impl Decoder<Element, RelativeDistinguishedName> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RelativeDistinguishedName> {
        let Element::Set(elements) = self else {
            return Err(Error::InvalidName(
                "expected SET for RelativeDistinguishedName".to_string(),
            ));
        };
        let attributes = elements
            .iter()
            .map(|elem| elem.decode())
            .collect::<Result<Vec<AttributeTypeAndValue>>>()?;
        Ok(RelativeDistinguishedName { attributes })
    }
}

impl EncodableTo<RelativeDistinguishedName> for Element {}

impl Encoder<RelativeDistinguishedName, Element> for RelativeDistinguishedName {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let attributes = self
            .attributes
            .iter()
            .map(|attr| attr.encode())
            .collect::<Result<Vec<Element>>>()?;
        Ok(Element::Set(attributes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypeAndValue {
    pub attribute_type: ObjectIdentifier,
    pub attribute_value: DirectoryString,
}

impl AttributeTypeAndValue {
    pub const OID_COMMON_NAME: &'static str = "2.5.4.3";
    pub const OID_SURNAME: &'static str = "2.5.4.4";
    pub const OID_SERIAL_NUMBER: &'static str = "2.5.4.5";
    pub const OID_COUNTRY_NAME: &'static str = "2.5.4.6";
    pub const OID_LOCALITY_NAME: &'static str = "2.5.4.7";
    pub const OID_STATE_OR_PROVINCE_NAME: &'static str = "2.5.4.8";
    pub const OID_STREET_ADDRESS: &'static str = "2.5.4.9";
    pub const OID_ORGANIZATION_NAME: &'static str = "2.5.4.10";
    pub const OID_ORGANIZATIONAL_UNIT_NAME: &'static str = "2.5.4.11";
    pub const OID_TITLE: &'static str = "2.5.4.12";
    pub const OID_POSTAL_CODE: &'static str = "2.5.4.17";
    pub const OID_GIVEN_NAME: &'static str = "2.5.4.42";
    pub const OID_DOMAIN_COMPONENT: &'static str = "0.9.2342.19200300.100.1.25";
    pub const OID_EMAIL_ADDRESS: &'static str = "1.2.840.113549.1.9.1";

    pub fn new(attribute_type: ObjectIdentifier, attribute_value: impl Into<DirectoryString>) -> Self {
        Self {
            attribute_type,
            attribute_value: attribute_value.into(),
        }
    }

    pub fn value_str(&self) -> &str {
        self.attribute_value.as_str()
    }
}

impl OidName for AttributeTypeAndValue {
    fn oid_name(&self) -> Option<&'static str> {
        match self.attribute_type.to_string().as_str() {
            Self::OID_COMMON_NAME => Some("CN"),
            Self::OID_SURNAME => Some("SN"),
            Self::OID_SERIAL_NUMBER => Some("serialNumber"),
            Self::OID_COUNTRY_NAME => Some("C"),
            Self::OID_LOCALITY_NAME => Some("L"),
            Self::OID_STATE_OR_PROVINCE_NAME => Some("ST"),
            Self::OID_STREET_ADDRESS => Some("street"),
            Self::OID_ORGANIZATION_NAME => Some("O"),
            Self::OID_ORGANIZATIONAL_UNIT_NAME => Some("OU"),
            Self::OID_TITLE => Some("title"),
            Self::OID_POSTAL_CODE => Some("postalCode"),
            Self::OID_GIVEN_NAME => Some("GN"),
            Self::OID_DOMAIN_COMPONENT => Some("DC"),
            Self::OID_EMAIL_ADDRESS => Some("emailAddress"),
            _ => None,
        }
    }
}

/// `{"type": "<dotted oid>", "value": "<text>"}`
impl Serialize for AttributeTypeAndValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AttributeTypeAndValue", 2)?;
        state.serialize_field("type", &self.attribute_type)?;
        state.serialize_field("value", self.attribute_value.as_str())?;
        state.end()
    }
}

impl DecodableFrom<Element> for AttributeTypeAndValue {}

impl Decoder<Element, AttributeTypeAndValue> for Element {
    type Error = Error;

    fn decode(&self) -> Result<AttributeTypeAndValue> {
        let Element::Sequence(seq) = self else {
            return Err(Error::InvalidName(
                "expected SEQUENCE for AttributeTypeAndValue".to_string(),
            ));
        };
        match seq.as_slice() {
            [Element::ObjectIdentifier(oid), value] => Ok(AttributeTypeAndValue {
                attribute_type: oid.clone(),
                attribute_value: value.decode()?,
            }),
            [_, _] => Err(Error::InvalidName(
                "expected OBJECT IDENTIFIER for attribute type".to_string(),
            )),
            _ => Err(Error::InvalidName(format!(
                "expected 2 elements in AttributeTypeAndValue, got {}",
                seq.len()
            ))),
        }
    }
}

impl EncodableTo<AttributeTypeAndValue> for Element {}

impl Encoder<AttributeTypeAndValue, Element> for AttributeTypeAndValue {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        Ok(Element::Sequence(vec![
            Element::ObjectIdentifier(self.attribute_type.clone()),
            self.attribute_value.encode()?,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use rstest::rstest;

    fn atv(oid: &str, value: &str) -> AttributeTypeAndValue {
        AttributeTypeAndValue::new(ObjectIdentifier::from_str(oid).unwrap(), value)
    }

    #[test]
    fn test_name_display() {
        let name = Name::new(vec![
            RelativeDistinguishedName::new(vec![atv("2.5.4.6", "ZZ")]),
            RelativeDistinguishedName::new(vec![atv("2.5.4.10", "Exumbran Convention")]),
            RelativeDistinguishedName::new(vec![
                atv("2.5.4.11", "Exumbran Council"),
                atv("2.5.4.11", "Exumbran Janitorial Service"),
            ]),
            RelativeDistinguishedName::new(vec![atv("2.5.4.3", "excouncil.zz")]),
        ]);

        assert_eq!(
            name.to_string(),
            "C=ZZ, O=Exumbran Convention, OU=Exumbran Council+OU=Exumbran Janitorial Service, CN=excouncil.zz"
        );
        assert_eq!(name.attributes().count(), 5);
    }

    #[rstest]
    #[case("2.5.4.3", Some("CN"))]
    #[case("2.5.4.9", Some("street"))]
    #[case("2.5.4.17", Some("postalCode"))]
    #[case("1.2.3.4", None)]
    fn test_oid_name(#[case] oid: &str, #[case] expected: Option<&str>) {
        assert_eq!(atv(oid, "value").oid_name(), expected);
    }

    #[test]
    fn test_name_encode_decode() {
        let name = Name::new(vec![RelativeDistinguishedName::new(vec![atv(
            "2.5.4.3",
            "excouncil.zz",
        )])]);
        let encoded = name.encode().unwrap();
        let decoded: Name = encoded.decode().unwrap();
        assert_eq!(decoded, name);
    }

    #[rstest]
    #[case::not_a_sequence(Element::Null)]
    #[case::rdn_not_a_set(Element::Sequence(vec![Element::Sequence(vec![])]))]
    #[case::missing_value(Element::Sequence(vec![Element::Set(vec![Element::Sequence(vec![
        Element::ObjectIdentifier(ObjectIdentifier::from_str("2.5.4.3").unwrap()),
    ])])]))]
    fn test_name_decode_invalid(#[case] input: Element) {
        let result: Result<Name> = input.decode();
        assert!(matches!(result, Err(Error::InvalidName(_))));
    }

    #[test]
    fn test_attribute_serialize() {
        let json = serde_json::to_string(&atv("2.5.4.6", "ZZ")).unwrap();
        assert_eq!(json, r#"{"type":"2.5.4.6","value":"ZZ"}"#);
    }
}
