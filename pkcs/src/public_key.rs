//! Public key union.
//!
//! A [`PublicKey`] is built from a SubjectPublicKeyInfo (certificates and
//! `PUBLIC KEY` blocks) or from a PKCS#1 `RSA PUBLIC KEY` block. The
//! algorithm OID selects the variant:
//!
//! | OID                        | variant            |
//! |----------------------------|--------------------|
//! | `1.2.840.113549.1.1.1`     | [`PublicKey::Rsa`]   |
//! | `1.2.840.10040.4.1`        | [`PublicKey::Dsa`]   |
//! | `1.2.840.10045.2.1`        | [`PublicKey::Ecdsa`] |
//!
//! Anything else is [`Error::UnsupportedAlgorithm`].

use serde::{Serialize, ser::SerializeStruct};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil_asn1::Element;
use sigil_pem::{Label, Pem};
use sigil_pkix_types::{
    AlgorithmIdentifier, DsaParameters, EcParameters, OidName, SubjectPublicKeyInfo,
};

use crate::dsa::DsaPublicKey;
use crate::error::{Error, Result};
use crate::pkcs1::RsaPublicKey;
use crate::sec1::{EcdsaPublicKey, supported_curve};
use crate::single_element;

const SPKI: &str = "SubjectPublicKeyInfo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    Dsa(DsaPublicKey),
    Ecdsa(EcdsaPublicKey),
}

impl PublicKey {
    /// `"RSA"`, `"DSA"` or `"ECDSA"`.
    pub fn algorithm(&self) -> &'static str {
        match self {
            PublicKey::Rsa(_) => "RSA",
            PublicKey::Dsa(_) => "DSA",
            PublicKey::Ecdsa(_) => "ECDSA",
        }
    }

    /// Parses DER-encoded SubjectPublicKeyInfo.
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        single_element(SPKI, bytes)?.decode()
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PublicKey", 2)?;
        state.serialize_field("algorithm", self.algorithm())?;
        match self {
            PublicKey::Rsa(key) => state.serialize_field("key", key)?,
            PublicKey::Dsa(key) => state.serialize_field("key", key)?,
            PublicKey::Ecdsa(key) => state.serialize_field("key", key)?,
        }
        state.end()
    }
}

impl From<RsaPublicKey> for PublicKey {
    fn from(key: RsaPublicKey) -> Self {
        PublicKey::Rsa(key)
    }
}

impl From<DsaPublicKey> for PublicKey {
    fn from(key: DsaPublicKey) -> Self {
        PublicKey::Dsa(key)
    }
}

impl From<EcdsaPublicKey> for PublicKey {
    fn from(key: EcdsaPublicKey) -> Self {
        PublicKey::Ecdsa(key)
    }
}

impl DecodableFrom<SubjectPublicKeyInfo> for PublicKey {}

impl Decoder<SubjectPublicKeyInfo, PublicKey> for SubjectPublicKeyInfo {
    type Error = Error;

    fn decode(&self) -> Result<PublicKey> {
        let alg = self.algorithm();
        let key_bytes = self.key_bytes()?;
        log::debug!(
            "public key algorithm {}",
            alg.oid_name().unwrap_or("unknown")
        );

        if alg.is(AlgorithmIdentifier::OID_RSA_ENCRYPTION) {
            let key: RsaPublicKey = single_element(SPKI, key_bytes)?.decode()?;
            Ok(PublicKey::Rsa(key))
        } else if alg.is(AlgorithmIdentifier::OID_ID_DSA) {
            let parameters = alg
                .parameter::<DsaParameters>()?
                .ok_or_else(|| Error::invalid(SPKI, "DSA key without Dss-Parms"))?;
            Ok(PublicKey::Dsa(DsaPublicKey::from_key_bytes(
                parameters, key_bytes,
            )?))
        } else if alg.is(AlgorithmIdentifier::OID_EC_PUBLIC_KEY) {
            let curve = match alg.parameter::<EcParameters>()? {
                Some(EcParameters::NamedCurve(oid)) => supported_curve(&oid)?,
                Some(_) => {
                    return Err(Error::UnsupportedCurve(
                        "curves must be named by OID".to_string(),
                    ));
                }
                None => return Err(Error::invalid(SPKI, "EC key without ECParameters")),
            };
            Ok(PublicKey::Ecdsa(EcdsaPublicKey::from_point(curve, key_bytes)?))
        } else {
            Err(Error::UnsupportedAlgorithm(alg.algorithm().to_string()))
        }
    }
}

impl DecodableFrom<Element> for PublicKey {}

impl Decoder<Element, PublicKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<PublicKey> {
        let spki: SubjectPublicKeyInfo = self.decode()?;
        spki.decode()
    }
}

impl DecodableFrom<Pem> for PublicKey {}

impl Decoder<Pem, PublicKey> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<PublicKey> {
        let der: Vec<u8> = self.decode()?;
        match self.label() {
            Label::PublicKey => PublicKey::from_der(&der),
            Label::RSAPublicKey => {
                let key: RsaPublicKey = single_element(SPKI, &der)?.decode()?;
                Ok(PublicKey::Rsa(key))
            }
            other => Err(Error::UnexpectedLabel(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigUint;
    use rstest::rstest;
    use sigil_asn1::{BitString, Integer, ObjectIdentifier};
    use sigil_pkix_types::{AlgorithmParameters, NamedCurve, algorithm::RawAlgorithmParameter};

    use super::*;

    fn oid(s: &str) -> ObjectIdentifier {
        ObjectIdentifier::from_str(s).unwrap()
    }

    fn spki(algorithm: AlgorithmIdentifier, key: Vec<u8>) -> SubjectPublicKeyInfo {
        SubjectPublicKeyInfo::new(algorithm, BitString::new(0, key))
    }

    fn rsa_key_bytes() -> Vec<u8> {
        Element::Sequence(vec![
            Element::Integer(Integer::from(3233)),
            Element::Integer(Integer::from(65537)),
        ])
        .to_der()
        .unwrap()
    }

    #[test]
    fn test_rsa_spki() {
        let info = spki(
            AlgorithmIdentifier::new_with_params(
                oid(AlgorithmIdentifier::OID_RSA_ENCRYPTION),
                AlgorithmParameters::Null,
            ),
            rsa_key_bytes(),
        );
        let key: PublicKey = info.decode().unwrap();
        assert_eq!(key.algorithm(), "RSA");
        assert_eq!(
            key,
            PublicKey::Rsa(RsaPublicKey::new(BigUint::from(3233u32), 65537))
        );
    }

    #[test]
    fn test_ec_spki() {
        let mut point = vec![0x04];
        point.extend([0u8; 31]);
        point.push(1);
        point.extend([0u8; 31]);
        point.push(2);
        let info = spki(
            AlgorithmIdentifier::new_with_params(
                oid(AlgorithmIdentifier::OID_EC_PUBLIC_KEY),
                AlgorithmParameters::Other(RawAlgorithmParameter::new(Element::ObjectIdentifier(
                    oid(NamedCurve::OID_SECP256R1),
                ))),
            ),
            point,
        );
        let PublicKey::Ecdsa(key) = info.decode().unwrap() else {
            panic!("expected an ECDSA key");
        };
        assert_eq!(key.curve(), NamedCurve::Secp256r1);
        assert_eq!(key.y(), &BigUint::from(2u32));
    }

    #[rstest]
    #[case::ed25519(AlgorithmIdentifier::new(oid(AlgorithmIdentifier::OID_ED25519)))]
    #[case::rsa_pss(AlgorithmIdentifier::new(oid(AlgorithmIdentifier::OID_RSASSA_PSS)))]
    fn test_unsupported_algorithm(#[case] algorithm: AlgorithmIdentifier) {
        let result: Result<PublicKey> = spki(algorithm, vec![0u8; 32]).decode();
        assert!(matches!(result, Err(Error::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_secp256k1_is_unsupported() {
        let info = spki(
            AlgorithmIdentifier::new_with_params(
                oid(AlgorithmIdentifier::OID_EC_PUBLIC_KEY),
                AlgorithmParameters::Other(RawAlgorithmParameter::new(Element::ObjectIdentifier(
                    oid(NamedCurve::OID_SECP256K1),
                ))),
            ),
            vec![0x04; 65],
        );
        let result: Result<PublicKey> = info.decode();
        assert!(matches!(result, Err(Error::UnsupportedCurve(_))));
    }

    #[test]
    fn test_rsa_public_key_pem() {
        let pem = Pem::from_bytes(Label::RSAPublicKey, &rsa_key_bytes());
        let key: PublicKey = pem.decode().unwrap();
        assert_eq!(key.algorithm(), "RSA");

        let pem = Pem::from_bytes(Label::Certificate, &rsa_key_bytes());
        let result: Result<PublicKey> = pem.decode();
        assert!(matches!(result, Err(Error::UnexpectedLabel(Label::Certificate))));
    }

    #[test]
    fn test_serialize() {
        let key = PublicKey::Rsa(RsaPublicKey::new(BigUint::from(3233u32), 65537));
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            serde_json::json!({"algorithm": "RSA", "key": {"n": "3233", "e": 65537}})
        );
    }
}
