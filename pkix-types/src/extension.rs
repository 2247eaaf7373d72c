//! PKIX Extension type
//!
//! RFC 5280 Section 4.1.2.9
//!
//! ```asn1
//! Extension  ::=  SEQUENCE  {
//!     extnID      OBJECT IDENTIFIER,
//!     critical    BOOLEAN DEFAULT FALSE,
//!     extnValue   OCTET STRING
//!                 -- contains the DER encoding of an ASN.1 value
//!                 -- corresponding to the extension type identified
//!                 -- by extnID
//! }
//! ```

use sigil::decoder::{DecodableFrom, Decoder};
use sigil::encoder::{EncodableTo, Encoder};
use sigil_asn1::{ASN1Object, Element, ObjectIdentifier, OctetString};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    id: ObjectIdentifier,
    critical: bool,
    value: OctetString,
}

impl Extension {
    pub fn new(id: ObjectIdentifier, critical: bool, value: OctetString) -> Self {
        Self {
            id,
            critical,
            value,
        }
    }

    pub fn oid(&self) -> &ObjectIdentifier {
        &self.id
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    /// Raw `extnValue` octets.
    pub fn value(&self) -> &OctetString {
        &self.value
    }

    /// The single ASN.1 value encoded inside `extnValue`.
    pub fn value_element(&self) -> Result<Element> {
        let mut elements = ASN1Object::try_from(&self.value)?.into_elements();
        if elements.len() != 1 {
            return Err(Error::InvalidExtension(format!(
                "extnValue of {} holds {} elements",
                self.id,
                elements.len()
            )));
        }
        Ok(elements.remove(0))
    }
}

impl DecodableFrom<Element> for Extension {}

impl Decoder<Element, Extension> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Extension> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidExtension(
                "expected SEQUENCE for Extension".to_string(),
            ));
        };
        match elements.as_slice() {
            [Element::ObjectIdentifier(id), Element::OctetString(value)] => {
                Ok(Extension::new(id.clone(), false, value.clone()))
            }
            [
                Element::ObjectIdentifier(id),
                Element::Boolean(critical),
                Element::OctetString(value),
            ] => Ok(Extension::new(id.clone(), *critical, value.clone())),
            [_, _] | [_, _, _] => Err(Error::InvalidExtension(
                "expected extnID, optional critical flag and extnValue".to_string(),
            )),
            _ => Err(Error::InvalidExtension(format!(
                "expected 2 or 3 elements in Extension sequence, got {}",
                elements.len()
            ))),
        }
    }
}

impl EncodableTo<Extension> for Element {}

impl Encoder<Extension, Element> for Extension {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let mut elements = vec![Element::ObjectIdentifier(self.id.clone())];
        // DEFAULT FALSE is omitted in DER
        if self.critical {
            elements.push(Element::Boolean(true));
        }
        elements.push(Element::OctetString(self.value.clone()));
        Ok(Element::Sequence(elements))
    }
}
