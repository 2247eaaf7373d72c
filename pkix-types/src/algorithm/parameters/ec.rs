//! Elliptic Curve Parameters
//!
//! Defined in [RFC 5480 Section 2.1.1](https://datatracker.ietf.org/doc/html/rfc5480#section-2.1.1)

use std::str::FromStr;

use serde::{Serialize, Serializer};
use sigil_asn1::{Element, ObjectIdentifier};

use super::{AlgorithmParameter, RawAlgorithmParameter};
use crate::OidName;
use crate::error::{Error, Result};

/// Named curves recognised by OID. Signing support is decided by the callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedCurve {
    /// P-192, prime192v1
    Secp192r1,
    /// P-224
    Secp224r1,
    /// P-256, prime256v1
    Secp256r1,
    /// P-384
    Secp384r1,
    /// P-521
    Secp521r1,
    Secp256k1,
}

impl NamedCurve {
    pub const OID_SECP192R1: &'static str = "1.2.840.10045.3.1.1";
    pub const OID_SECP224R1: &'static str = "1.3.132.0.33";
    pub const OID_SECP256R1: &'static str = "1.2.840.10045.3.1.7";
    pub const OID_SECP384R1: &'static str = "1.3.132.0.34";
    pub const OID_SECP521R1: &'static str = "1.3.132.0.35";
    pub const OID_SECP256K1: &'static str = "1.3.132.0.10";

    pub const fn oid_str(&self) -> &'static str {
        match self {
            Self::Secp192r1 => Self::OID_SECP192R1,
            Self::Secp224r1 => Self::OID_SECP224R1,
            Self::Secp256r1 => Self::OID_SECP256R1,
            Self::Secp384r1 => Self::OID_SECP384R1,
            Self::Secp521r1 => Self::OID_SECP521R1,
            Self::Secp256k1 => Self::OID_SECP256K1,
        }
    }

    pub fn oid(&self) -> Result<ObjectIdentifier> {
        Ok(ObjectIdentifier::from_str(self.oid_str())?)
    }

    /// Size in bytes of a field element, which is also the width of each
    /// coordinate in an uncompressed point.
    pub const fn field_size(&self) -> usize {
        match self {
            Self::Secp192r1 => 24,
            Self::Secp224r1 => 28,
            Self::Secp256r1 | Self::Secp256k1 => 32,
            Self::Secp384r1 => 48,
            Self::Secp521r1 => 66,
        }
    }

    /// NIST name, e.g. `P-256`.
    pub const fn nist_name(&self) -> Option<&'static str> {
        match self {
            Self::Secp192r1 => Some("P-192"),
            Self::Secp224r1 => Some("P-224"),
            Self::Secp256r1 => Some("P-256"),
            Self::Secp384r1 => Some("P-384"),
            Self::Secp521r1 => Some("P-521"),
            Self::Secp256k1 => None,
        }
    }
}

impl OidName for NamedCurve {
    fn oid_name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Secp192r1 => "secp192r1",
            Self::Secp224r1 => "secp224r1",
            Self::Secp256r1 => "secp256r1",
            Self::Secp384r1 => "secp384r1",
            Self::Secp521r1 => "secp521r1",
            Self::Secp256k1 => "secp256k1",
        };
        Some(name)
    }
}

impl TryFrom<&ObjectIdentifier> for NamedCurve {
    type Error = Error;

    fn try_from(oid: &ObjectIdentifier) -> Result<Self> {
        let oid_str = oid.to_string();
        match oid_str.as_str() {
            Self::OID_SECP192R1 => Ok(Self::Secp192r1),
            Self::OID_SECP224R1 => Ok(Self::Secp224r1),
            Self::OID_SECP256R1 => Ok(Self::Secp256r1),
            Self::OID_SECP384R1 => Ok(Self::Secp384r1),
            Self::OID_SECP521R1 => Ok(Self::Secp521r1),
            Self::OID_SECP256K1 => Ok(Self::Secp256k1),
            _ => {
                log::debug!("unrecognized named curve {}", oid_str);
                Err(Error::UnknownCurve(oid_str))
            }
        }
    }
}

/// Serialized by its NIST name where it has one (`"P-521"`).
impl Serialize for NamedCurve {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let name = self.nist_name().or(self.oid_name()).unwrap_or(self.oid_str());
        serializer.serialize_str(name)
    }
}

/// ```asn1
/// ECParameters ::= CHOICE {
///     namedCurve      OBJECT IDENTIFIER,
///     implicitCurve   NULL,
///     specifiedCurve  SpecifiedECDomain
/// }
/// ```
///
/// RFC 5480 restricts certificates to `namedCurve`; the other two forms are
/// kept so that they can be reported rather than misparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcParameters {
    NamedCurve(ObjectIdentifier),
    ImplicitCurve,
    SpecifiedCurve(Element),
}

impl EcParameters {
    pub fn named_curve(&self) -> Result<NamedCurve> {
        match self {
            EcParameters::NamedCurve(oid) => NamedCurve::try_from(oid),
            EcParameters::ImplicitCurve => Err(Error::InvalidEcParameters(
                "implicitCurve is not supported".to_string(),
            )),
            EcParameters::SpecifiedCurve(_) => Err(Error::InvalidEcParameters(
                "specifiedCurve is not supported".to_string(),
            )),
        }
    }
}

impl TryFrom<&Element> for EcParameters {
    type Error = Error;

    fn try_from(element: &Element) -> Result<Self> {
        match element {
            Element::ObjectIdentifier(oid) => Ok(EcParameters::NamedCurve(oid.clone())),
            Element::Null => Ok(EcParameters::ImplicitCurve),
            Element::Sequence(_) => Ok(EcParameters::SpecifiedCurve(element.clone())),
            other => Err(Error::InvalidEcParameters(format!(
                "unexpected element {}",
                other
            ))),
        }
    }
}

impl AlgorithmParameter for EcParameters {
    const NAME: &'static str = "ECParameters";

    fn parse(raw: &RawAlgorithmParameter) -> Result<Self> {
        EcParameters::try_from(raw.element())
    }
}
