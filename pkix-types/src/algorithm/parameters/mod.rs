//! Algorithm parameters
//!
//! - [RFC 3279](https://datatracker.ietf.org/doc/html/rfc3279) - DSA
//! - [RFC 5480](https://datatracker.ietf.org/doc/html/rfc5480) - Elliptic Curve Cryptography

use sigil_asn1::Element;

use crate::error::Result;

pub mod dsa;
pub mod ec;

pub use dsa::DsaParameters;
pub use ec::{EcParameters, NamedCurve};

/// Parameters with a schema, read from the raw element of an
/// [`AlgorithmIdentifier`](super::AlgorithmIdentifier).
pub trait AlgorithmParameter: Sized {
    const NAME: &'static str;

    fn parse(raw: &RawAlgorithmParameter) -> Result<Self>;
}

/// Parameters as they appeared on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAlgorithmParameter {
    element: Element,
}

impl RawAlgorithmParameter {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}
