//! Elliptic curve keys
//!
//! Points use the SEC1 octet string form (`04 || X || Y`); private keys the
//! SEC1 structure of [RFC 5915](https://datatracker.ietf.org/doc/html/rfc5915):
//!
//! ```asn1
//! ECPrivateKey ::= SEQUENCE {
//!     version        INTEGER { ecPrivkeyVer1(1) } (ecPrivkeyVer1),
//!     privateKey     OCTET STRING,
//!     parameters [0] ECParameters {{ NamedCurve }} OPTIONAL,
//!     publicKey  [1] BIT STRING OPTIONAL
//! }
//! ```
//!
//! Only P-256, P-384 and P-521 are accepted; the public point must be
//! present since it is not recomputed here.

use num_bigint::BigUint;
use serde::{Serialize, ser::SerializeStruct};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil_asn1::{Element, ObjectIdentifier};
use sigil_pkix_types::{EcParameters, NamedCurve, OidName};

use crate::error::{Error, Result};
use crate::version;

const EC_POINT: &str = "ECPoint";
const EC_PRIVATE_KEY: &str = "ECPrivateKey";

const UNCOMPRESSED: u8 = 0x04;

/// Resolves a curve OID, rejecting curves that cannot be used for signing.
pub fn supported_curve(oid: &ObjectIdentifier) -> Result<NamedCurve> {
    let curve = NamedCurve::try_from(oid).map_err(|_| Error::UnsupportedCurve(oid.to_string()))?;
    match curve {
        NamedCurve::Secp256r1 | NamedCurve::Secp384r1 | NamedCurve::Secp521r1 => Ok(curve),
        other => Err(Error::UnsupportedCurve(
            other.oid_name().unwrap_or(other.oid_str()).to_string(),
        )),
    }
}

fn curve_from_parameters(parameters: &EcParameters) -> Result<NamedCurve> {
    match parameters {
        EcParameters::NamedCurve(oid) => supported_curve(oid),
        EcParameters::ImplicitCurve | EcParameters::SpecifiedCurve(_) => Err(
            Error::UnsupportedCurve("curves must be named by OID".to_string()),
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdsaPublicKey {
    curve: NamedCurve,
    x: BigUint,
    y: BigUint,
}

impl EcdsaPublicKey {
    pub fn new(curve: NamedCurve, x: BigUint, y: BigUint) -> Self {
        Self { curve, x, y }
    }

    /// Reads an uncompressed SEC1 point.
    pub fn from_point(curve: NamedCurve, point: &[u8]) -> Result<Self> {
        let size = curve.field_size();
        let Some((&UNCOMPRESSED, coordinates)) = point.split_first() else {
            return Err(Error::invalid(
                EC_POINT,
                "only the uncompressed point form is supported",
            ));
        };
        if coordinates.len() != 2 * size {
            return Err(Error::invalid(
                EC_POINT,
                format!(
                    "expected {} coordinate bytes for {:?}, got {}",
                    2 * size,
                    curve,
                    coordinates.len()
                ),
            ));
        }
        let (x, y) = coordinates.split_at(size);
        Ok(Self::new(
            curve,
            BigUint::from_bytes_be(x),
            BigUint::from_bytes_be(y),
        ))
    }

    pub fn curve(&self) -> NamedCurve {
        self.curve
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// `04 || X || Y`, each coordinate left-padded to the field size.
    pub fn to_uncompressed_point(&self) -> Vec<u8> {
        let size = self.curve.field_size();
        let mut point = Vec::with_capacity(1 + 2 * size);
        point.push(UNCOMPRESSED);
        point.extend(left_pad(&self.x.to_bytes_be(), size));
        point.extend(left_pad(&self.y.to_bytes_be(), size));
        point
    }
}

impl Serialize for EcdsaPublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EcdsaPublicKey", 3)?;
        state.serialize_field("curve", &self.curve)?;
        state.serialize_field("x", &self.x.to_str_radix(10))?;
        state.serialize_field("y", &self.y.to_str_radix(10))?;
        state.end()
    }
}

pub(crate) fn left_pad(bytes: &[u8], size: usize) -> Vec<u8> {
    if bytes.len() >= size {
        return bytes.to_vec();
    }
    let mut padded = vec![0u8; size - bytes.len()];
    padded.extend_from_slice(bytes);
    padded
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdsaPrivateKey {
    public_key: EcdsaPublicKey,
    d: BigUint,
}

impl EcdsaPrivateKey {
    pub fn new(public_key: EcdsaPublicKey, d: BigUint) -> Self {
        Self { public_key, d }
    }

    /// Reads a SEC1 `ECPrivateKey`. `curve` comes from the enclosing
    /// PKCS#8 algorithm identifier when there is one; otherwise the
    /// `[0]` parameters must name it.
    pub fn from_sec1(element: &Element, curve: Option<NamedCurve>) -> Result<Self> {
        let Element::Sequence(elements) = element else {
            return Err(Error::invalid(EC_PRIVATE_KEY, "expected SEQUENCE"));
        };
        let [ver, private_key, optional @ ..] = elements.as_slice() else {
            return Err(Error::invalid(
                EC_PRIVATE_KEY,
                format!("expected at least 2 elements, got {}", elements.len()),
            ));
        };
        let ver = version(ver, EC_PRIVATE_KEY)?;
        if ver != 1 {
            return Err(Error::invalid(
                EC_PRIVATE_KEY,
                format!("unknown version {}", ver),
            ));
        }
        let Element::OctetString(private_key) = private_key else {
            return Err(Error::invalid(
                EC_PRIVATE_KEY,
                "expected OCTET STRING for privateKey",
            ));
        };

        let mut named = None;
        let mut point = None;
        for field in optional {
            match field {
                Element::ContextSpecific {
                    slot: 0, element, ..
                } => named = Some(curve_from_parameters(&EcParameters::try_from(element.as_ref())?)?),
                Element::ContextSpecific {
                    slot: 1, element, ..
                } => match element.as_ref() {
                    Element::BitString(bits) if bits.unused_bits() == 0 => {
                        point = Some(bits.as_bytes().to_vec())
                    }
                    _ => {
                        return Err(Error::invalid(
                            EC_PRIVATE_KEY,
                            "expected BIT STRING for publicKey",
                        ));
                    }
                },
                other => {
                    return Err(Error::invalid(
                        EC_PRIVATE_KEY,
                        format!("unexpected element {}", other),
                    ));
                }
            }
        }

        let curve = match (curve, named) {
            (Some(outer), Some(inner)) if outer != inner => {
                return Err(Error::invalid(
                    EC_PRIVATE_KEY,
                    format!("curve {:?} conflicts with {:?}", inner, outer),
                ));
            }
            (Some(curve), _) | (None, Some(curve)) => curve,
            (None, None) => {
                return Err(Error::invalid(EC_PRIVATE_KEY, "no curve parameters"));
            }
        };
        let Some(point) = point else {
            return Err(Error::invalid(EC_PRIVATE_KEY, "public key is missing"));
        };

        let d = private_key.as_bytes();
        if d.len() > curve.field_size() {
            return Err(Error::invalid(
                EC_PRIVATE_KEY,
                format!("private key is longer than the {:?} field", curve),
            ));
        }
        Ok(Self::new(
            EcdsaPublicKey::from_point(curve, &point)?,
            BigUint::from_bytes_be(d),
        ))
    }

    pub fn public_key(&self) -> &EcdsaPublicKey {
        &self.public_key
    }

    pub fn curve(&self) -> NamedCurve {
        self.public_key.curve
    }

    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Scalar left-padded to the field size, as signing backends expect.
    pub fn d_bytes(&self) -> Vec<u8> {
        left_pad(&self.d.to_bytes_be(), self.curve().field_size())
    }
}

impl DecodableFrom<Element> for EcdsaPrivateKey {}

impl Decoder<Element, EcdsaPrivateKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<EcdsaPrivateKey> {
        EcdsaPrivateKey::from_sec1(self, None)
    }
}
