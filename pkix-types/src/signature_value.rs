//! DSA and ECDSA signature value
//!
//! RFC 3279 Sections 2.2.2 and 2.2.3
//!
//! ```asn1
//! Dss-Sig-Value  ::=  SEQUENCE  {
//!     r       INTEGER,
//!     s       INTEGER
//! }
//! ```

use num_bigint::BigUint;
use sigil_asn1::{ASN1Object, Element, Integer};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DssSigValue {
    pub r: BigUint,
    pub s: BigUint,
}

impl DssSigValue {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// Parses a DER `Dss-Sig-Value`. Trailing data is rejected.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let obj = ASN1Object::try_from(bytes)?;
        let [Element::Sequence(elements)] = obj.elements() else {
            return Err(Error::InvalidSignatureValue(
                "expected a single SEQUENCE".to_string(),
            ));
        };
        let [Element::Integer(r), Element::Integer(s)] = elements.as_slice() else {
            return Err(Error::InvalidSignatureValue(
                "expected SEQUENCE of two INTEGERs".to_string(),
            ));
        };
        let (Some(r), Some(s)) = (r.to_biguint(), s.to_biguint()) else {
            return Err(Error::InvalidSignatureValue(
                "negative signature component".to_string(),
            ));
        };
        Ok(Self { r, s })
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        let element = Element::Sequence(vec![
            Element::Integer(Integer::from(self.r.clone())),
            Element::Integer(Integer::from(self.s.clone())),
        ]);
        Ok(element.to_der()?)
    }
}
