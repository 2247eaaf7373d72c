//! Subject Public Key Info
//!
//! RFC 5280 Section 4.1.2.7
//!
//! ```asn1
//! SubjectPublicKeyInfo  ::=  SEQUENCE  {
//!     algorithm            AlgorithmIdentifier,
//!     subjectPublicKey     BIT STRING
//! }
//! ```
//!
//! Carried by certificates and by `PUBLIC KEY` PEM blocks.

use sigil::decoder::{DecodableFrom, Decoder};
use sigil::encoder::{EncodableTo, Encoder};
use sigil_asn1::{BitString, Element};

use crate::OidName;
use crate::algorithm::AlgorithmIdentifier;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    algorithm: AlgorithmIdentifier,
    subject_public_key: BitString,
}

impl SubjectPublicKeyInfo {
    pub fn new(algorithm: AlgorithmIdentifier, subject_public_key: BitString) -> Self {
        Self {
            algorithm,
            subject_public_key,
        }
    }

    pub fn algorithm(&self) -> &AlgorithmIdentifier {
        &self.algorithm
    }

    pub fn subject_public_key(&self) -> &BitString {
        &self.subject_public_key
    }

    /// Key bytes; every supported algorithm uses whole octets.
    pub fn key_bytes(&self) -> Result<&[u8]> {
        if self.subject_public_key.unused_bits() != 0 {
            return Err(Error::InvalidSubjectPublicKeyInfo(format!(
                "subjectPublicKey has {} unused bits",
                self.subject_public_key.unused_bits()
            )));
        }
        Ok(self.subject_public_key.as_bytes())
    }
}

impl DecodableFrom<Element> for SubjectPublicKeyInfo {}

impl Decoder<Element, SubjectPublicKeyInfo> for Element {
    type Error = Error;

    fn decode(&self) -> Result<SubjectPublicKeyInfo> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidSubjectPublicKeyInfo(
                "expected SEQUENCE".to_string(),
            ));
        };
        let [algorithm, public_key] = elements.as_slice() else {
            return Err(Error::InvalidSubjectPublicKeyInfo(format!(
                "expected 2 elements in sequence, got {}",
                elements.len()
            )));
        };
        let Element::BitString(subject_public_key) = public_key else {
            return Err(Error::InvalidSubjectPublicKeyInfo(
                "expected BIT STRING for subject public key".to_string(),
            ));
        };
        Ok(SubjectPublicKeyInfo {
            algorithm: algorithm.decode()?,
            subject_public_key: subject_public_key.clone(),
        })
    }
}

impl EncodableTo<SubjectPublicKeyInfo> for Element {}

impl Encoder<SubjectPublicKeyInfo, Element> for SubjectPublicKeyInfo {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        Ok(Element::Sequence(vec![
            self.algorithm.encode()?,
            Element::BitString(self.subject_public_key.clone()),
        ]))
    }
}

impl OidName for SubjectPublicKeyInfo {
    fn oid_name(&self) -> Option<&'static str> {
        self.algorithm.oid_name()
    }
}
