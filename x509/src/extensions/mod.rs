//! Certificate extensions
//!
//! RFC 5280 Section 4.1.2.9
//!
//! ```asn1
//! Extensions  ::=  SEQUENCE SIZE (1..MAX) OF Extension
//! ```
//!
//! Every extension is kept in raw form; only subjectAltName is interpreted.

use sigil::decoder::{DecodableFrom, Decoder};
use sigil_asn1::Element;
use sigil_pkix_types::Extension;

use crate::error::{Error, Result};

pub mod general_name;
pub mod subject_alt_name;

pub use general_name::{EdiPartyName, GeneralName, OtherName};
pub use subject_alt_name::SubjectAltName;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extensions {
    extensions: Vec<Extension>,
}

impl Extensions {
    pub fn new(extensions: Vec<Extension>) -> Self {
        Self { extensions }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.iter()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn get(&self, oid: &str) -> Option<&Extension> {
        self.extensions.iter().find(|ext| *ext.oid() == oid)
    }

    /// `Ok(None)` when the certificate has no subjectAltName extension.
    pub fn subject_alt_name(&self) -> Result<Option<SubjectAltName>> {
        self.get(SubjectAltName::OID)
            .map(|ext| -> Result<SubjectAltName> { ext.decode() })
            .transpose()
    }
}

impl DecodableFrom<Element> for Extensions {}

impl Decoder<Element, Extensions> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Extensions> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidTbsCertificate(
                "expected SEQUENCE for extensions".to_string(),
            ));
        };
        let mut extensions: Vec<Extension> = Vec::with_capacity(elements.len());
        for element in elements {
            let ext: Extension = element.decode()?;
            // At most one instance of a given extension per certificate.
            if extensions.iter().any(|e| e.oid() == ext.oid()) {
                return Err(Error::InvalidTbsCertificate(format!(
                    "duplicate extension {}",
                    ext.oid()
                )));
            }
            log::trace!(
                "extension {} critical={}",
                ext.oid(),
                ext.is_critical()
            );
            extensions.push(ext);
        }
        Ok(Extensions::new(extensions))
    }
}
