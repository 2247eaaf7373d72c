//! PKCS#1 RSA keys
//!
//! [RFC 8017 Appendix A.1](https://datatracker.ietf.org/doc/html/rfc8017#appendix-A.1)
//!
//! ```asn1
//! RSAPublicKey ::= SEQUENCE {
//!     modulus           INTEGER,  -- n
//!     publicExponent    INTEGER   -- e
//! }
//!
//! RSAPrivateKey ::= SEQUENCE {
//!     version           Version,
//!     modulus           INTEGER,  -- n
//!     publicExponent    INTEGER,  -- e
//!     privateExponent   INTEGER,  -- d
//!     prime1            INTEGER,  -- p
//!     prime2            INTEGER,  -- q
//!     exponent1         INTEGER,  -- d mod (p-1)
//!     exponent2         INTEGER,  -- d mod (q-1)
//!     coefficient       INTEGER,  -- (inverse of q) mod p
//!     otherPrimeInfos   OtherPrimeInfos OPTIONAL
//! }
//!
//! Version ::= INTEGER { two-prime(0), multi(1) }
//!
//! OtherPrimeInfo ::= SEQUENCE {
//!     prime             INTEGER,  -- ri
//!     exponent          INTEGER,  -- di
//!     coefficient       INTEGER   -- ti
//! }
//! ```
//!
//! The CRT values are recomputed by the signing backend, so only `n`, `e`,
//! `d` and the primes are kept.

use num_bigint::BigUint;
use serde::{Serialize, ser::SerializeStruct};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil_asn1::Element;

use crate::error::{Error, Result};
use crate::{unsigned, version};

const RSA_PUBLIC_KEY: &str = "RSAPublicKey";
const RSA_PRIVATE_KEY: &str = "RSAPrivateKey";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    modulus: BigUint,
    exponent: u64,
}

impl RsaPublicKey {
    pub fn new(modulus: BigUint, exponent: u64) -> Self {
        Self { modulus, exponent }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Big-endian modulus without leading zeros.
    pub fn modulus_bytes(&self) -> Vec<u8> {
        self.modulus.to_bytes_be()
    }

    pub fn exponent(&self) -> u64 {
        self.exponent
    }

    pub fn key_size(&self) -> u64 {
        self.modulus.bits()
    }
}

impl Serialize for RsaPublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("RsaPublicKey", 2)?;
        state.serialize_field("n", &self.modulus.to_str_radix(10))?;
        state.serialize_field("e", &self.exponent)?;
        state.end()
    }
}

impl DecodableFrom<Element> for RsaPublicKey {}

impl Decoder<Element, RsaPublicKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RsaPublicKey> {
        let Element::Sequence(elements) = self else {
            return Err(Error::invalid(RSA_PUBLIC_KEY, "expected SEQUENCE"));
        };
        let [n, e] = elements.as_slice() else {
            return Err(Error::invalid(
                RSA_PUBLIC_KEY,
                format!("expected 2 elements, got {}", elements.len()),
            ));
        };
        public_key(n, e, RSA_PUBLIC_KEY)
    }
}

fn public_key(n: &Element, e: &Element, structure: &'static str) -> Result<RsaPublicKey> {
    let modulus = unsigned(n, structure, "modulus")?;
    let Element::Integer(e) = e else {
        return Err(Error::invalid(structure, "expected INTEGER for publicExponent"));
    };
    let exponent = e
        .to_u64()
        .ok_or_else(|| Error::invalid(structure, "publicExponent does not fit in 64 bits"))?;
    Ok(RsaPublicKey::new(modulus, exponent))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    public_key: RsaPublicKey,
    private_exponent: BigUint,
    primes: Vec<BigUint>,
}

impl RsaPrivateKey {
    pub fn new(public_key: RsaPublicKey, private_exponent: BigUint, primes: Vec<BigUint>) -> Self {
        Self {
            public_key,
            private_exponent,
            primes,
        }
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    pub fn private_exponent(&self) -> &BigUint {
        &self.private_exponent
    }

    /// `p`, `q`, then any `otherPrimeInfos` primes in order.
    pub fn primes(&self) -> &[BigUint] {
        &self.primes
    }
}

impl DecodableFrom<Element> for RsaPrivateKey {}

impl Decoder<Element, RsaPrivateKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RsaPrivateKey> {
        let Element::Sequence(elements) = self else {
            return Err(Error::invalid(RSA_PRIVATE_KEY, "expected SEQUENCE"));
        };
        let (ver, n, e, d, p, q, others) = match elements.as_slice() {
            [ver, n, e, d, p, q, _dp, _dq, _qinv] => (ver, n, e, d, p, q, None),
            [ver, n, e, d, p, q, _dp, _dq, _qinv, others] => (ver, n, e, d, p, q, Some(others)),
            _ => {
                return Err(Error::invalid(
                    RSA_PRIVATE_KEY,
                    format!("expected 9 or 10 elements, got {}", elements.len()),
                ));
            }
        };

        match (version(ver, RSA_PRIVATE_KEY)?, others) {
            (0, None) | (1, Some(_)) => {}
            (0, Some(_)) => {
                return Err(Error::invalid(
                    RSA_PRIVATE_KEY,
                    "otherPrimeInfos present in a two-prime key",
                ));
            }
            (1, None) => {
                return Err(Error::invalid(
                    RSA_PRIVATE_KEY,
                    "multi-prime key without otherPrimeInfos",
                ));
            }
            (v, _) => {
                return Err(Error::invalid(
                    RSA_PRIVATE_KEY,
                    format!("unknown version {}", v),
                ));
            }
        }

        let mut primes = vec![
            unsigned(p, RSA_PRIVATE_KEY, "prime1")?,
            unsigned(q, RSA_PRIVATE_KEY, "prime2")?,
        ];
        if let Some(others) = others {
            primes.extend(other_primes(others)?);
        }

        Ok(RsaPrivateKey {
            public_key: public_key(n, e, RSA_PRIVATE_KEY)?,
            private_exponent: unsigned(d, RSA_PRIVATE_KEY, "privateExponent")?,
            primes,
        })
    }
}

fn other_primes(element: &Element) -> Result<Vec<BigUint>> {
    let Element::Sequence(infos) = element else {
        return Err(Error::invalid(
            RSA_PRIVATE_KEY,
            "expected SEQUENCE for otherPrimeInfos",
        ));
    };
    infos
        .iter()
        .map(|info| match info {
            Element::Sequence(fields) => match fields.as_slice() {
                [prime, _, _] => unsigned(prime, RSA_PRIVATE_KEY, "OtherPrimeInfo.prime"),
                _ => Err(Error::invalid(
                    RSA_PRIVATE_KEY,
                    "OtherPrimeInfo must have 3 elements",
                )),
            },
            _ => Err(Error::invalid(
                RSA_PRIVATE_KEY,
                "expected SEQUENCE for OtherPrimeInfo",
            )),
        })
        .collect()
}
