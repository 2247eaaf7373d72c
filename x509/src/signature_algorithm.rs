//! Certificate signature algorithm labels
//!
//! Labels follow the `<HASH>-<KEY>` form (`SHA256-RSA`, `ECDSA-SHA384`,
//! `SHA256-RSAPSS`). RSASSA-PSS has a single OID, so its hash comes from
//! the parameters:
//!
//! ```asn1
//! RSASSA-PSS-params  ::=  SEQUENCE  {
//!     hashAlgorithm      [0] HashAlgorithm DEFAULT sha1Identifier,
//!     maskGenAlgorithm   [1] MaskGenAlgorithm DEFAULT mgf1SHA1Identifier,
//!     saltLength         [2] INTEGER DEFAULT 20,
//!     trailerField       [3] INTEGER DEFAULT 1
//! }
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use sigil::decoder::Decoder;
use sigil_asn1::{Element, ObjectIdentifier};
use sigil_pkix_types::algorithm::{AlgorithmParameter, RawAlgorithmParameter};
use sigil_pkix_types::{AlgorithmIdentifier, Error as PkixError};

const OID_MGF1: &str = "1.2.840.113549.1.1.8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    Md2WithRsa,
    Md5WithRsa,
    Sha1WithRsa,
    Sha256WithRsa,
    Sha384WithRsa,
    Sha512WithRsa,
    Sha256WithRsaPss,
    Sha384WithRsaPss,
    Sha512WithRsaPss,
    DsaWithSha1,
    DsaWithSha256,
    EcdsaWithSha1,
    EcdsaWithSha256,
    EcdsaWithSha384,
    EcdsaWithSha512,
    PureEd25519,
    /// Displayed as the dotted OID.
    Unknown(ObjectIdentifier),
}

impl SignatureAlgorithm {
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SignatureAlgorithm::Md2WithRsa => "MD2-RSA",
            SignatureAlgorithm::Md5WithRsa => "MD5-RSA",
            SignatureAlgorithm::Sha1WithRsa => "SHA1-RSA",
            SignatureAlgorithm::Sha256WithRsa => "SHA256-RSA",
            SignatureAlgorithm::Sha384WithRsa => "SHA384-RSA",
            SignatureAlgorithm::Sha512WithRsa => "SHA512-RSA",
            SignatureAlgorithm::Sha256WithRsaPss => "SHA256-RSAPSS",
            SignatureAlgorithm::Sha384WithRsaPss => "SHA384-RSAPSS",
            SignatureAlgorithm::Sha512WithRsaPss => "SHA512-RSAPSS",
            SignatureAlgorithm::DsaWithSha1 => "DSA-SHA1",
            SignatureAlgorithm::DsaWithSha256 => "DSA-SHA256",
            SignatureAlgorithm::EcdsaWithSha1 => "ECDSA-SHA1",
            SignatureAlgorithm::EcdsaWithSha256 => "ECDSA-SHA256",
            SignatureAlgorithm::EcdsaWithSha384 => "ECDSA-SHA384",
            SignatureAlgorithm::EcdsaWithSha512 => "ECDSA-SHA512",
            SignatureAlgorithm::PureEd25519 => "Ed25519",
            SignatureAlgorithm::Unknown(oid) => return write!(f, "{}", oid),
        };
        write!(f, "{}", label)
    }
}

impl Serialize for SignatureAlgorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<&AlgorithmIdentifier> for SignatureAlgorithm {
    fn from(alg: &AlgorithmIdentifier) -> Self {
        let oid = alg.algorithm();
        match oid.to_string().as_str() {
            AlgorithmIdentifier::OID_MD2_WITH_RSA_ENCRYPTION => SignatureAlgorithm::Md2WithRsa,
            AlgorithmIdentifier::OID_MD5_WITH_RSA_ENCRYPTION => SignatureAlgorithm::Md5WithRsa,
            AlgorithmIdentifier::OID_SHA1_WITH_RSA_ENCRYPTION => SignatureAlgorithm::Sha1WithRsa,
            AlgorithmIdentifier::OID_SHA256_WITH_RSA_ENCRYPTION => {
                SignatureAlgorithm::Sha256WithRsa
            }
            AlgorithmIdentifier::OID_SHA384_WITH_RSA_ENCRYPTION => {
                SignatureAlgorithm::Sha384WithRsa
            }
            AlgorithmIdentifier::OID_SHA512_WITH_RSA_ENCRYPTION => {
                SignatureAlgorithm::Sha512WithRsa
            }
            AlgorithmIdentifier::OID_RSASSA_PSS => pss(alg),
            AlgorithmIdentifier::OID_DSA_WITH_SHA1 => SignatureAlgorithm::DsaWithSha1,
            AlgorithmIdentifier::OID_DSA_WITH_SHA256 => SignatureAlgorithm::DsaWithSha256,
            AlgorithmIdentifier::OID_ECDSA_WITH_SHA1 => SignatureAlgorithm::EcdsaWithSha1,
            AlgorithmIdentifier::OID_ECDSA_WITH_SHA256 => SignatureAlgorithm::EcdsaWithSha256,
            AlgorithmIdentifier::OID_ECDSA_WITH_SHA384 => SignatureAlgorithm::EcdsaWithSha384,
            AlgorithmIdentifier::OID_ECDSA_WITH_SHA512 => SignatureAlgorithm::EcdsaWithSha512,
            AlgorithmIdentifier::OID_ED25519 => SignatureAlgorithm::PureEd25519,
            _ => SignatureAlgorithm::Unknown(oid.clone()),
        }
    }
}

/// SHA-256/384/512 with MGF1 over the same hash and a salt as long as the
/// digest. Any other combination has no label.
fn pss(alg: &AlgorithmIdentifier) -> SignatureAlgorithm {
    let unknown = || SignatureAlgorithm::Unknown(alg.algorithm().clone());
    let params = match alg.parameter::<RsaPssParameters>() {
        Ok(Some(params)) => params,
        Ok(None) => return unknown(),
        Err(e) => {
            log::debug!("unreadable RSASSA-PSS parameters: {}", e);
            return unknown();
        }
    };
    let (label, salt_length) = match params.hash.to_string().as_str() {
        AlgorithmIdentifier::OID_SHA256 => (SignatureAlgorithm::Sha256WithRsaPss, 32),
        AlgorithmIdentifier::OID_SHA384 => (SignatureAlgorithm::Sha384WithRsaPss, 48),
        AlgorithmIdentifier::OID_SHA512 => (SignatureAlgorithm::Sha512WithRsaPss, 64),
        _ => return unknown(),
    };
    if params.mgf_hash != params.hash || params.salt_length != salt_length || params.trailer != 1 {
        return unknown();
    }
    label
}

/// The fields of RSASSA-PSS-params that pick a label, defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPssParameters {
    pub hash: ObjectIdentifier,
    pub mgf_hash: ObjectIdentifier,
    pub salt_length: u64,
    pub trailer: u64,
}

fn sha1() -> Result<ObjectIdentifier, PkixError> {
    Ok(AlgorithmIdentifier::OID_SHA1.parse::<ObjectIdentifier>()?)
}

fn invalid(msg: &str) -> PkixError {
    PkixError::InvalidAlgorithmIdentifier(format!("RSASSA-PSS-params: {}", msg))
}

fn hash_oid(element: &Element) -> Result<ObjectIdentifier, PkixError> {
    let alg: AlgorithmIdentifier = element.decode()?;
    Ok(alg.algorithm().clone())
}

fn integer(element: &Element, field: &str) -> Result<u64, PkixError> {
    match element {
        Element::Integer(i) => i.to_u64().ok_or_else(|| invalid(field)),
        _ => Err(invalid(field)),
    }
}

impl AlgorithmParameter for RsaPssParameters {
    const NAME: &'static str = "RSASSA-PSS-params";

    fn parse(raw: &RawAlgorithmParameter) -> Result<Self, PkixError> {
        let Element::Sequence(fields) = raw.element() else {
            return Err(invalid("expected SEQUENCE"));
        };
        let mut params = RsaPssParameters {
            hash: sha1()?,
            mgf_hash: sha1()?,
            salt_length: 20,
            trailer: 1,
        };
        for field in fields {
            let Element::ContextSpecific {
                slot,
                constructed: true,
                element,
            } = field
            else {
                return Err(invalid("expected explicitly tagged field"));
            };
            match slot {
                0 => params.hash = hash_oid(element)?,
                1 => {
                    // MaskGenAlgorithm ::= AlgorithmIdentifier { mgf1, HashAlgorithm }
                    let Element::Sequence(mgf) = element.as_ref() else {
                        return Err(invalid("maskGenAlgorithm"));
                    };
                    let [Element::ObjectIdentifier(mgf_oid), hash] = mgf.as_slice() else {
                        return Err(invalid("maskGenAlgorithm"));
                    };
                    if *mgf_oid != OID_MGF1 {
                        return Err(invalid("maskGenAlgorithm is not MGF1"));
                    }
                    params.mgf_hash = hash_oid(hash)?;
                }
                2 => params.salt_length = integer(element, "saltLength")?,
                3 => params.trailer = integer(element, "trailerField")?,
                _ => return Err(invalid("unknown field")),
            }
        }
        Ok(params)
    }
}
