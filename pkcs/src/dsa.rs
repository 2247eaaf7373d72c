//! DSA keys
//!
//! Public keys arrive inside a SubjectPublicKeyInfo ([RFC 3279 Section 2.3.2](https://datatracker.ietf.org/doc/html/rfc3279#section-2.3.2)):
//! the `Dss-Parms` are the algorithm parameters and the subject public key
//! bit string wraps `DSAPublicKey ::= INTEGER -- y`.
//!
//! Private keys use the OpenSSL `DSA PRIVATE KEY` layout:
//!
//! ```asn1
//! DSAPrivateKey ::= SEQUENCE {
//!     version  INTEGER,  -- 0
//!     p        INTEGER,
//!     q        INTEGER,
//!     g        INTEGER,
//!     y        INTEGER,  -- public
//!     x        INTEGER   -- private
//! }
//! ```

use num_bigint::BigUint;
use serde::{Serialize, ser::SerializeStruct};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil_asn1::Element;
use sigil_pkix_types::DsaParameters;

use crate::error::{Error, Result};
use crate::{single_element, unsigned, version};

const DSA_PUBLIC_KEY: &str = "DSAPublicKey";
const DSA_PRIVATE_KEY: &str = "DSAPrivateKey";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaPublicKey {
    parameters: DsaParameters,
    y: BigUint,
}

impl DsaPublicKey {
    pub fn new(parameters: DsaParameters, y: BigUint) -> Self {
        Self { parameters, y }
    }

    /// Reads `y` from the subject public key bytes of an SPKI.
    pub fn from_key_bytes(parameters: DsaParameters, key_bytes: &[u8]) -> Result<Self> {
        let element = single_element(DSA_PUBLIC_KEY, key_bytes)?;
        let y = unsigned(&element, DSA_PUBLIC_KEY, "y")?;
        Ok(Self::new(parameters, y))
    }

    pub fn parameters(&self) -> &DsaParameters {
        &self.parameters
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }
}

impl Serialize for DsaPublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DsaPublicKey", 4)?;
        state.serialize_field("p", &self.parameters.p.to_str_radix(10))?;
        state.serialize_field("q", &self.parameters.q.to_str_radix(10))?;
        state.serialize_field("g", &self.parameters.g.to_str_radix(10))?;
        state.serialize_field("y", &self.y.to_str_radix(10))?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaPrivateKey {
    public_key: DsaPublicKey,
    x: BigUint,
}

impl DsaPrivateKey {
    pub fn new(public_key: DsaPublicKey, x: BigUint) -> Self {
        Self { public_key, x }
    }

    /// PKCS#8 carries `x` alone as an INTEGER; `y = g^x mod p` is recomputed.
    pub fn from_parameters(parameters: DsaParameters, x: BigUint) -> Self {
        let y = parameters.g.modpow(&x, &parameters.p);
        Self::new(DsaPublicKey::new(parameters, y), x)
    }

    pub fn public_key(&self) -> &DsaPublicKey {
        &self.public_key
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }
}

impl DecodableFrom<Element> for DsaPrivateKey {}

impl Decoder<Element, DsaPrivateKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<DsaPrivateKey> {
        let Element::Sequence(elements) = self else {
            return Err(Error::invalid(DSA_PRIVATE_KEY, "expected SEQUENCE"));
        };
        let [ver, p, q, g, y, x] = elements.as_slice() else {
            return Err(Error::invalid(
                DSA_PRIVATE_KEY,
                format!("expected 6 elements, got {}", elements.len()),
            ));
        };
        let ver = version(ver, DSA_PRIVATE_KEY)?;
        if ver != 0 {
            return Err(Error::invalid(
                DSA_PRIVATE_KEY,
                format!("unknown version {}", ver),
            ));
        }
        let parameters = DsaParameters::from_elements(p, q, g)?;
        let y = unsigned(y, DSA_PRIVATE_KEY, "y")?;
        let x = unsigned(x, DSA_PRIVATE_KEY, "x")?;
        Ok(DsaPrivateKey::new(DsaPublicKey::new(parameters, y), x))
    }
}
