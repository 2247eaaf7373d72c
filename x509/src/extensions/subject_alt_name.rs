//! Subject Alternative Name
//!
//! RFC 5280 Section 4.2.1.6
//!
//! ```asn1
//! id-ce-subjectAltName OBJECT IDENTIFIER ::=  { id-ce 17 }
//!
//! SubjectAltName ::= GeneralNames
//!
//! GeneralNames ::= SEQUENCE SIZE (1..MAX) OF GeneralName
//! ```

use sigil::decoder::{DecodableFrom, Decoder};
use sigil_asn1::Element;
use sigil_pkix_types::Extension;

use super::general_name::GeneralName;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAltName {
    names: Vec<GeneralName>,
}

impl SubjectAltName {
    pub const OID: &'static str = "2.5.29.17";

    pub fn new(names: Vec<GeneralName>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[GeneralName] {
        &self.names
    }

    /// DNS names, emails, IP addresses and URIs in encoding order. Other
    /// kinds are skipped.
    pub fn alt_names(&self) -> Vec<String> {
        self.names.iter().filter_map(GeneralName::as_alt_name).collect()
    }
}

impl DecodableFrom<Element> for SubjectAltName {}

impl Decoder<Element, SubjectAltName> for Element {
    type Error = Error;

    fn decode(&self) -> Result<SubjectAltName> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidSubjectAltName(
                "expected SEQUENCE of GeneralName".to_string(),
            ));
        };
        let names = elements
            .iter()
            .map(|e| -> Result<GeneralName> { e.decode() })
            .collect::<Result<Vec<_>>>()?;
        Ok(SubjectAltName::new(names))
    }
}

impl DecodableFrom<Extension> for SubjectAltName {}

impl Decoder<Extension, SubjectAltName> for Extension {
    type Error = Error;

    fn decode(&self) -> Result<SubjectAltName> {
        if *self.oid() != SubjectAltName::OID {
            return Err(Error::InvalidSubjectAltName(format!(
                "extension {} is not subjectAltName",
                self.oid()
            )));
        }
        self.value_element()?.decode()
    }
}
