//! AlgorithmIdentifier type
//!
//! Defined in [RFC 5280 Section 4.1.1.2](https://datatracker.ietf.org/doc/html/rfc5280#section-4.1.1.2)

use serde::{Serialize, ser::SerializeStruct};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil::encoder::{EncodableTo, Encoder};
use sigil_asn1::{Element, ObjectIdentifier};

use crate::OidName;
use crate::error::{Error, Result};

pub mod parameters;

pub use parameters::{AlgorithmParameter, RawAlgorithmParameter};

/// `None` in [`AlgorithmIdentifier::parameters`] means the field was omitted;
/// `Null` is the explicit `05 00` RSA uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmParameters {
    Null,
    Other(RawAlgorithmParameter),
}

/// ```asn1
/// AlgorithmIdentifier ::= SEQUENCE {
///     algorithm   OBJECT IDENTIFIER,
///     parameters  ANY DEFINED BY algorithm OPTIONAL
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifier,
    pub parameters: Option<AlgorithmParameters>,
}

impl AlgorithmIdentifier {
    // public key algorithms (RFC 3279, RFC 5480, RFC 8410)
    pub const OID_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.1";
    pub const OID_ID_DSA: &'static str = "1.2.840.10040.4.1";
    pub const OID_EC_PUBLIC_KEY: &'static str = "1.2.840.10045.2.1";
    pub const OID_ED25519: &'static str = "1.3.101.112";

    // signature algorithms (RFC 3279, RFC 4055, RFC 5758)
    pub const OID_MD2_WITH_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.2";
    pub const OID_MD5_WITH_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.4";
    pub const OID_SHA1_WITH_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.5";
    pub const OID_RSASSA_PSS: &'static str = "1.2.840.113549.1.1.10";
    pub const OID_SHA256_WITH_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.11";
    pub const OID_SHA384_WITH_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.12";
    pub const OID_SHA512_WITH_RSA_ENCRYPTION: &'static str = "1.2.840.113549.1.1.13";
    pub const OID_DSA_WITH_SHA1: &'static str = "1.2.840.10040.4.3";
    pub const OID_DSA_WITH_SHA256: &'static str = "2.16.840.1.101.3.4.3.2";
    pub const OID_ECDSA_WITH_SHA1: &'static str = "1.2.840.10045.4.1";
    pub const OID_ECDSA_WITH_SHA256: &'static str = "1.2.840.10045.4.3.2";
    pub const OID_ECDSA_WITH_SHA384: &'static str = "1.2.840.10045.4.3.3";
    pub const OID_ECDSA_WITH_SHA512: &'static str = "1.2.840.10045.4.3.4";

    // hash algorithms, found inside RSASSA-PSS-params
    pub const OID_SHA1: &'static str = "1.3.14.3.2.26";
    pub const OID_SHA256: &'static str = "2.16.840.1.101.3.4.2.1";
    pub const OID_SHA384: &'static str = "2.16.840.1.101.3.4.2.2";
    pub const OID_SHA512: &'static str = "2.16.840.1.101.3.4.2.3";

    // PKCS#5 v2 envelope of ENCRYPTED PRIVATE KEY blocks
    pub const OID_PBES2: &'static str = "1.2.840.113549.1.5.13";

    pub fn new(algorithm: ObjectIdentifier) -> Self {
        Self {
            algorithm,
            parameters: None,
        }
    }

    pub fn new_with_params(algorithm: ObjectIdentifier, parameters: AlgorithmParameters) -> Self {
        Self {
            algorithm,
            parameters: Some(parameters),
        }
    }

    pub fn algorithm(&self) -> &ObjectIdentifier {
        &self.algorithm
    }

    pub fn is(&self, oid: &str) -> bool {
        self.algorithm == oid
    }

    /// Typed view of the parameters; `Ok(None)` when they were omitted.
    pub fn parameter<P: AlgorithmParameter>(&self) -> Result<Option<P>> {
        match &self.parameters {
            None => Ok(None),
            Some(AlgorithmParameters::Null) => Err(Error::NullParameter(P::NAME)),
            Some(AlgorithmParameters::Other(raw)) => Ok(Some(P::parse(raw)?)),
        }
    }
}

impl OidName for AlgorithmIdentifier {
    fn oid_name(&self) -> Option<&'static str> {
        match self.algorithm.to_string().as_str() {
            Self::OID_RSA_ENCRYPTION => Some("rsaEncryption"),
            Self::OID_ID_DSA => Some("id-dsa"),
            Self::OID_EC_PUBLIC_KEY => Some("ecPublicKey"),
            Self::OID_ED25519 => Some("Ed25519"),
            Self::OID_MD2_WITH_RSA_ENCRYPTION => Some("md2WithRSAEncryption"),
            Self::OID_MD5_WITH_RSA_ENCRYPTION => Some("md5WithRSAEncryption"),
            Self::OID_SHA1_WITH_RSA_ENCRYPTION => Some("sha1WithRSAEncryption"),
            Self::OID_RSASSA_PSS => Some("RSASSA-PSS"),
            Self::OID_SHA256_WITH_RSA_ENCRYPTION => Some("sha256WithRSAEncryption"),
            Self::OID_SHA384_WITH_RSA_ENCRYPTION => Some("sha384WithRSAEncryption"),
            Self::OID_SHA512_WITH_RSA_ENCRYPTION => Some("sha512WithRSAEncryption"),
            Self::OID_DSA_WITH_SHA1 => Some("dsa-with-sha1"),
            Self::OID_DSA_WITH_SHA256 => Some("dsa-with-sha256"),
            Self::OID_ECDSA_WITH_SHA1 => Some("ecdsa-with-SHA1"),
            Self::OID_ECDSA_WITH_SHA256 => Some("ecdsa-with-SHA256"),
            Self::OID_ECDSA_WITH_SHA384 => Some("ecdsa-with-SHA384"),
            Self::OID_ECDSA_WITH_SHA512 => Some("ecdsa-with-SHA512"),
            Self::OID_PBES2 => Some("id-PBES2"),
            _ => None,
        }
    }
}

impl Serialize for AlgorithmIdentifier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AlgorithmIdentifier", 2)?;
        state.serialize_field("algorithm", &self.algorithm)?;
        state.serialize_field("name", &self.oid_name())?;
        state.end()
    }
}

impl DecodableFrom<Element> for AlgorithmIdentifier {}

impl Decoder<Element, AlgorithmIdentifier> for Element {
    type Error = Error;

    fn decode(&self) -> Result<AlgorithmIdentifier> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidAlgorithmIdentifier(
                "expected SEQUENCE".to_string(),
            ));
        };
        match elements.as_slice() {
            [Element::ObjectIdentifier(oid)] => Ok(AlgorithmIdentifier::new(oid.clone())),
            [Element::ObjectIdentifier(oid), Element::Null] => Ok(
                AlgorithmIdentifier::new_with_params(oid.clone(), AlgorithmParameters::Null),
            ),
            [Element::ObjectIdentifier(oid), params] => {
                log::trace!("keeping raw parameters for algorithm {}", oid);
                Ok(AlgorithmIdentifier::new_with_params(
                    oid.clone(),
                    AlgorithmParameters::Other(RawAlgorithmParameter::new(params.clone())),
                ))
            }
            [_] | [_, _] => Err(Error::InvalidAlgorithmIdentifier(
                "expected OBJECT IDENTIFIER for algorithm".to_string(),
            )),
            _ => Err(Error::InvalidAlgorithmIdentifier(format!(
                "expected 1 or 2 elements, got {}",
                elements.len()
            ))),
        }
    }
}

impl EncodableTo<AlgorithmIdentifier> for Element {}

impl Encoder<AlgorithmIdentifier, Element> for AlgorithmIdentifier {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let mut elements = vec![Element::ObjectIdentifier(self.algorithm.clone())];
        match &self.parameters {
            None => {}
            Some(AlgorithmParameters::Null) => elements.push(Element::Null),
            Some(AlgorithmParameters::Other(raw)) => elements.push(raw.element().clone()),
        }
        Ok(Element::Sequence(elements))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;
    use crate::algorithm::parameters::NamedCurve;

    fn oid(s: &str) -> ObjectIdentifier {
        ObjectIdentifier::from_str(s).unwrap()
    }

    #[rstest]
    #[case::rsa(
        Element::Sequence(vec![Element::ObjectIdentifier(oid("1.2.840.113549.1.1.1")), Element::Null]),
        AlgorithmIdentifier::new_with_params(oid("1.2.840.113549.1.1.1"), AlgorithmParameters::Null)
    )]
    #[case::ed25519(
        Element::Sequence(vec![Element::ObjectIdentifier(oid("1.3.101.112"))]),
        AlgorithmIdentifier::new(oid("1.3.101.112"))
    )]
    #[case::ec(
        Element::Sequence(vec![
            Element::ObjectIdentifier(oid("1.2.840.10045.2.1")),
            Element::ObjectIdentifier(oid("1.3.132.0.35")),
        ]),
        AlgorithmIdentifier::new_with_params(
            oid("1.2.840.10045.2.1"),
            AlgorithmParameters::Other(RawAlgorithmParameter::new(Element::ObjectIdentifier(oid("1.3.132.0.35")))),
        )
    )]
    fn test_decode_encode(#[case] input: Element, #[case] expected: AlgorithmIdentifier) {
        let decoded: AlgorithmIdentifier = input.decode().unwrap();
        assert_eq!(expected, decoded);
        assert_eq!(input, decoded.encode().unwrap());
    }

    #[rstest]
    #[case::empty(Element::Sequence(vec![]))]
    #[case::not_oid(Element::Sequence(vec![Element::Null]))]
    #[case::not_sequence(Element::Null)]
    fn test_decode_invalid(#[case] input: Element) {
        let result: Result<AlgorithmIdentifier> = input.decode();
        assert!(matches!(result, Err(Error::InvalidAlgorithmIdentifier(_))));
    }

    #[test]
    fn test_typed_parameter() {
        let alg = AlgorithmIdentifier::new_with_params(
            oid(AlgorithmIdentifier::OID_EC_PUBLIC_KEY),
            AlgorithmParameters::Other(RawAlgorithmParameter::new(Element::ObjectIdentifier(
                oid(NamedCurve::OID_SECP384R1),
            ))),
        );
        let params: Option<crate::EcParameters> = alg.parameter().unwrap();
        assert_eq!(
            params.and_then(|p| p.named_curve().ok()),
            Some(NamedCurve::Secp384r1)
        );

        let rsa = AlgorithmIdentifier::new_with_params(
            oid(AlgorithmIdentifier::OID_RSA_ENCRYPTION),
            AlgorithmParameters::Null,
        );
        let result: Result<Option<crate::DsaParameters>> = rsa.parameter();
        assert!(matches!(result, Err(Error::NullParameter(_))));
    }
}
