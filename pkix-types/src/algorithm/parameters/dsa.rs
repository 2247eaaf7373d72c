//! DSA Parameters
//!
//! Defined in [RFC 3279 Section 2.3.2](https://datatracker.ietf.org/doc/html/rfc3279#section-2.3.2)

use num_bigint::BigUint;
use sigil_asn1::{Element, Integer};

use super::{AlgorithmParameter, RawAlgorithmParameter};
use crate::error::{Error, Result};

/// ```asn1
/// Dss-Parms ::= SEQUENCE {
///     p   INTEGER,
///     q   INTEGER,
///     g   INTEGER
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaParameters {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
}

impl DsaParameters {
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Self {
        Self { p, q, g }
    }

    /// Reads `p`, `q` and `g` from three INTEGER elements. Also used for the
    /// OpenSSL `DSA PRIVATE KEY` layout where they sit inline.
    pub fn from_elements(p: &Element, q: &Element, g: &Element) -> Result<Self> {
        Ok(Self {
            p: unsigned(p, "p")?,
            q: unsigned(q, "q")?,
            g: unsigned(g, "g")?,
        })
    }

    pub fn to_element(&self) -> Element {
        Element::Sequence(vec![
            Element::Integer(Integer::from(self.p.clone())),
            Element::Integer(Integer::from(self.q.clone())),
            Element::Integer(Integer::from(self.g.clone())),
        ])
    }
}

fn unsigned(element: &Element, field: &str) -> Result<BigUint> {
    let Element::Integer(i) = element else {
        return Err(Error::InvalidDsaParameters(format!(
            "expected INTEGER for {}",
            field
        )));
    };
    i.to_biguint()
        .ok_or_else(|| Error::InvalidDsaParameters(format!("{} is negative", field)))
}

impl AlgorithmParameter for DsaParameters {
    const NAME: &'static str = "Dss-Parms";

    fn parse(raw: &RawAlgorithmParameter) -> Result<Self> {
        let Element::Sequence(elements) = raw.element() else {
            return Err(Error::InvalidDsaParameters(
                "Dss-Parms must be a SEQUENCE".to_string(),
            ));
        };
        let [p, q, g] = elements.as_slice() else {
            return Err(Error::InvalidDsaParameters(format!(
                "expected 3 elements, got {}",
                elements.len()
            )));
        };
        Self::from_elements(p, q, g)
    }
}
