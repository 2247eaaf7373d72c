//! PKCS#8 private keys
//!
//! [RFC 5958](https://datatracker.ietf.org/doc/html/rfc5958)
//!
//! ```asn1
//! OneAsymmetricKey ::= SEQUENCE {
//!     version                   Version,
//!     privateKeyAlgorithm       PrivateKeyAlgorithmIdentifier,
//!     privateKey                PrivateKey,
//!     attributes            [0] Attributes OPTIONAL,
//!     ...,
//!     [[2: publicKey        [1] PublicKey OPTIONAL ]],
//!     ...
//! }
//!
//! PrivateKey ::= OCTET STRING
//! ```
//!
//! Only the unencrypted form is read. `ENCRYPTED PRIVATE KEY` blocks
//! (PBES2) are rejected by [`crate::PrivateKey::from_pem`].

use sigil::decoder::{DecodableFrom, Decoder};
use sigil_asn1::{Element, OctetString};
use sigil_pkix_types::{AlgorithmIdentifier, DsaParameters, EcParameters, OidName};

use crate::dsa::DsaPrivateKey;
use crate::error::{Error, Result};
use crate::pkcs1::RsaPrivateKey;
use crate::private_key::PrivateKey;
use crate::sec1::{EcdsaPrivateKey, supported_curve};
use crate::{single_element, unsigned, version};

const PRIVATE_KEY_INFO: &str = "PrivateKeyInfo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKeyInfo {
    algorithm: AlgorithmIdentifier,
    private_key: OctetString,
}

impl PrivateKeyInfo {
    pub fn new(algorithm: AlgorithmIdentifier, private_key: OctetString) -> Self {
        Self {
            algorithm,
            private_key,
        }
    }

    pub fn algorithm(&self) -> &AlgorithmIdentifier {
        &self.algorithm
    }

    /// Algorithm-specific key encoding carried in `privateKey`.
    pub fn private_key(&self) -> &OctetString {
        &self.private_key
    }

    /// Dispatches on the algorithm OID and parses the inner key.
    pub fn to_private_key(&self) -> Result<PrivateKey> {
        let inner = single_element(PRIVATE_KEY_INFO, self.private_key.as_bytes())?;
        let alg = &self.algorithm;
        log::debug!(
            "PKCS#8 private key algorithm {}",
            alg.oid_name().unwrap_or("unknown")
        );

        if alg.is(AlgorithmIdentifier::OID_RSA_ENCRYPTION) {
            let key: RsaPrivateKey = inner.decode()?;
            Ok(PrivateKey::Rsa(key))
        } else if alg.is(AlgorithmIdentifier::OID_ID_DSA) {
            let parameters = alg.parameter::<DsaParameters>()?.ok_or_else(|| {
                Error::invalid(PRIVATE_KEY_INFO, "DSA key without Dss-Parms")
            })?;
            let x = unsigned(&inner, PRIVATE_KEY_INFO, "x")?;
            Ok(PrivateKey::Dsa(DsaPrivateKey::from_parameters(parameters, x)))
        } else if alg.is(AlgorithmIdentifier::OID_EC_PUBLIC_KEY) {
            let parameters: Option<EcParameters> = alg.parameter()?;
            let curve = match parameters {
                Some(EcParameters::NamedCurve(oid)) => Some(supported_curve(&oid)?),
                Some(_) => {
                    return Err(Error::UnsupportedCurve(
                        "curves must be named by OID".to_string(),
                    ));
                }
                None => None,
            };
            Ok(PrivateKey::Ecdsa(EcdsaPrivateKey::from_sec1(&inner, curve)?))
        } else {
            Err(Error::UnsupportedAlgorithm(alg.algorithm().to_string()))
        }
    }
}

impl DecodableFrom<Element> for PrivateKeyInfo {}

impl Decoder<Element, PrivateKeyInfo> for Element {
    type Error = Error;

    fn decode(&self) -> Result<PrivateKeyInfo> {
        let Element::Sequence(elements) = self else {
            return Err(Error::invalid(PRIVATE_KEY_INFO, "expected SEQUENCE"));
        };
        let [ver, algorithm, private_key, _optional @ ..] = elements.as_slice() else {
            return Err(Error::invalid(
                PRIVATE_KEY_INFO,
                format!("expected at least 3 elements, got {}", elements.len()),
            ));
        };
        let ver = version(ver, PRIVATE_KEY_INFO)?;
        if !(0..=1).contains(&ver) {
            return Err(Error::invalid(
                PRIVATE_KEY_INFO,
                format!("unknown version {}", ver),
            ));
        }
        let Element::OctetString(private_key) = private_key else {
            return Err(Error::invalid(
                PRIVATE_KEY_INFO,
                "expected OCTET STRING for privateKey",
            ));
        };
        Ok(PrivateKeyInfo::new(algorithm.decode()?, private_key.clone()))
    }
}
