//! Signature engine
//!
//! Signs and verifies precomputed digests. RSA signatures use PKCS#1 v1.5
//! or PSS padding; DSA and ECDSA signatures are DER encoded:
//!
//! ```asn1
//! Dss-Sig-Value  ::=  SEQUENCE  {
//!     r       INTEGER,
//!     s       INTEGER
//! }
//! ```
//!
//! A well formed signature that does not match is `Ok(false)`. Only input
//! that cannot be checked at all, such as a DSA signature that is not a
//! DER `(r, s)` pair, is an error.

use md5::Md5;
use num_bigint::BigUint;
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier, RandomizedPrehashSigner};
use rand::rngs::OsRng;
use rsa::{Pkcs1v15Sign, Pss};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};
use sigil_pkcs::{
    DsaPrivateKey, DsaPublicKey, EcdsaPrivateKey, EcdsaPublicKey, PrivateKey, PublicKey,
    RsaPrivateKey, RsaPublicKey,
};
use sigil_pkix_types::{DssSigValue, NamedCurve};

use crate::digest::DigestAlgorithm;
use crate::error::{Error, Result};
use crate::options::{PaddingScheme, SigningOptions};

pub fn sign_digest(
    key: &PrivateKey,
    algorithm: DigestAlgorithm,
    digest: &[u8],
    options: &SigningOptions,
) -> Result<Vec<u8>> {
    options.check_for(key.algorithm())?;
    log::debug!(
        "signing {} digest with {} key",
        algorithm,
        key.algorithm()
    );
    match key {
        PrivateKey::Rsa(key) => sign_rsa(key, algorithm, digest, options),
        PrivateKey::Dsa(key) => sign_dsa(key, digest),
        PrivateKey::Ecdsa(key) => sign_ecdsa(key, digest),
    }
}

pub fn verify_digest(
    key: &PublicKey,
    algorithm: DigestAlgorithm,
    digest: &[u8],
    signature: &[u8],
    options: &SigningOptions,
) -> Result<bool> {
    options.check_for(key.algorithm())?;
    log::debug!(
        "verifying {} digest with {} key",
        algorithm,
        key.algorithm()
    );
    let valid = match key {
        PublicKey::Rsa(key) => verify_rsa(key, algorithm, digest, signature, options)?,
        PublicKey::Dsa(key) => verify_dsa(key, digest, signature)?,
        PublicKey::Ecdsa(key) => verify_ecdsa(key, digest, signature)?,
    };
    if !valid {
        log::debug!("{} signature does not match", key.algorithm());
    }
    Ok(valid)
}

enum RsaScheme {
    Pkcs1v15(Pkcs1v15Sign),
    Pss(Pss),
}

impl RsaScheme {
    fn new(algorithm: DigestAlgorithm, options: &SigningOptions) -> Self {
        match options.padding {
            PaddingScheme::Pkcs1v15 => RsaScheme::Pkcs1v15(pkcs1v15(algorithm)),
            PaddingScheme::Pss => {
                let salt_len = match options.salt_length {
                    0 => algorithm.output_size(),
                    n => n,
                };
                RsaScheme::Pss(pss(algorithm, salt_len))
            }
        }
    }
}

fn pkcs1v15(algorithm: DigestAlgorithm) -> Pkcs1v15Sign {
    match algorithm {
        DigestAlgorithm::Md5 => Pkcs1v15Sign::new::<Md5>(),
        DigestAlgorithm::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
        DigestAlgorithm::Sha224 => Pkcs1v15Sign::new::<Sha224>(),
        DigestAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        DigestAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        DigestAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        DigestAlgorithm::Sha512_224 => Pkcs1v15Sign::new::<Sha512_224>(),
        DigestAlgorithm::Sha512_256 => Pkcs1v15Sign::new::<Sha512_256>(),
    }
}

fn pss(algorithm: DigestAlgorithm, salt_len: usize) -> Pss {
    match algorithm {
        DigestAlgorithm::Md5 => Pss::new_with_salt::<Md5>(salt_len),
        DigestAlgorithm::Sha1 => Pss::new_with_salt::<Sha1>(salt_len),
        DigestAlgorithm::Sha224 => Pss::new_with_salt::<Sha224>(salt_len),
        DigestAlgorithm::Sha256 => Pss::new_with_salt::<Sha256>(salt_len),
        DigestAlgorithm::Sha384 => Pss::new_with_salt::<Sha384>(salt_len),
        DigestAlgorithm::Sha512 => Pss::new_with_salt::<Sha512>(salt_len),
        DigestAlgorithm::Sha512_224 => Pss::new_with_salt::<Sha512_224>(salt_len),
        DigestAlgorithm::Sha512_256 => Pss::new_with_salt::<Sha512_256>(salt_len),
    }
}

/// Converts between the two bignum crates through big-endian bytes.
fn rsa_uint(n: &BigUint) -> rsa::BigUint {
    rsa::BigUint::from_bytes_be(&n.to_bytes_be())
}

fn dsa_uint(n: &BigUint) -> dsa::BigUint {
    dsa::BigUint::from_bytes_be(&n.to_bytes_be())
}

fn rsa_public_key(key: &RsaPublicKey) -> Result<rsa::RsaPublicKey> {
    rsa::RsaPublicKey::new(rsa_uint(key.modulus()), rsa::BigUint::from(key.exponent()))
        .map_err(|e| Error::InvalidKey(format!("RSA public key: {}", e)))
}

fn rsa_private_key(key: &RsaPrivateKey) -> Result<rsa::RsaPrivateKey> {
    let public = key.public_key();
    rsa::RsaPrivateKey::from_components(
        rsa_uint(public.modulus()),
        rsa::BigUint::from(public.exponent()),
        rsa_uint(key.private_exponent()),
        key.primes().iter().map(rsa_uint).collect(),
    )
    .map_err(|e| Error::InvalidKey(format!("RSA private key: {}", e)))
}

fn sign_rsa(
    key: &RsaPrivateKey,
    algorithm: DigestAlgorithm,
    digest: &[u8],
    options: &SigningOptions,
) -> Result<Vec<u8>> {
    let key = rsa_private_key(key)?;
    let signed = match RsaScheme::new(algorithm, options) {
        RsaScheme::Pkcs1v15(scheme) => key.sign_with_rng(&mut OsRng, scheme, digest),
        RsaScheme::Pss(scheme) => key.sign_with_rng(&mut OsRng, scheme, digest),
    };
    signed.map_err(|e| Error::SigningFailed(format!("RSA {}: {}", options.padding, e)))
}

fn verify_rsa(
    key: &RsaPublicKey,
    algorithm: DigestAlgorithm,
    digest: &[u8],
    signature: &[u8],
    options: &SigningOptions,
) -> Result<bool> {
    let key = rsa_public_key(key)?;
    let verified = match RsaScheme::new(algorithm, options) {
        RsaScheme::Pkcs1v15(scheme) => key.verify(scheme, digest, signature),
        RsaScheme::Pss(scheme) => key.verify(scheme, digest, signature),
    };
    match verified {
        Ok(()) => Ok(true),
        Err(e) => {
            log::trace!("RSA verification failed: {}", e);
            Ok(false)
        }
    }
}

fn dsa_verifying_key(key: &DsaPublicKey) -> Result<dsa::VerifyingKey> {
    let params = key.parameters();
    let components = dsa::Components::from_components(
        dsa_uint(&params.p),
        dsa_uint(&params.q),
        dsa_uint(&params.g),
    )
    .map_err(|e| Error::InvalidKey(format!("DSA parameters: {}", e)))?;
    dsa::VerifyingKey::from_components(components, dsa_uint(key.y()))
        .map_err(|e| Error::InvalidKey(format!("DSA public key: {}", e)))
}

/// Nonces are derived per RFC 6979, so no two messages share one.
fn sign_dsa(key: &DsaPrivateKey, digest: &[u8]) -> Result<Vec<u8>> {
    let verifying_key = dsa_verifying_key(key.public_key())?;
    let signing_key = dsa::SigningKey::from_components(verifying_key, dsa_uint(key.x()))
        .map_err(|e| Error::InvalidKey(format!("DSA private key: {}", e)))?;
    let signature: dsa::Signature = signing_key
        .sign_prehash(digest)
        .map_err(|e| Error::SigningFailed(format!("DSA: {}", e)))?;
    let value = DssSigValue::new(
        BigUint::from_bytes_be(&signature.r().to_bytes_be()),
        BigUint::from_bytes_be(&signature.s().to_bytes_be()),
    );
    encode_dss(&value)
}

fn verify_dsa(key: &DsaPublicKey, digest: &[u8], signature: &[u8]) -> Result<bool> {
    let verifying_key = dsa_verifying_key(key)?;
    let value = decode_dss(signature)?;
    let Ok(signature) = dsa::Signature::from_components(dsa_uint(&value.r), dsa_uint(&value.s))
    else {
        log::trace!("DSA signature component out of range");
        return Ok(false);
    };
    Ok(verifying_key.verify_prehash(digest, &signature).is_ok())
}

fn encode_dss(value: &DssSigValue) -> Result<Vec<u8>> {
    value
        .to_der()
        .map_err(|e| Error::SigningFailed(format!("encoding (r, s): {}", e)))
}

fn decode_dss(signature: &[u8]) -> Result<DssSigValue> {
    DssSigValue::from_der(signature).map_err(|e| Error::MalformedSignatureEncoding(e.to_string()))
}

/// Left-pads digests shorter than the field so their integer value is kept.
/// Longer digests are truncated by the signer itself.
fn field_prehash(digest: &[u8], field_size: usize) -> Vec<u8> {
    if digest.len() >= field_size {
        return digest.to_vec();
    }
    let mut prehash = vec![0u8; field_size - digest.len()];
    prehash.extend_from_slice(digest);
    prehash
}

/// Splits a fixed-width `r || s` signature into its DER form.
fn fixed_to_dss(bytes: &[u8]) -> DssSigValue {
    let (r, s) = bytes.split_at(bytes.len() / 2);
    DssSigValue::new(BigUint::from_bytes_be(r), BigUint::from_bytes_be(s))
}

/// Joins `(r, s)` into the fixed-width `r || s` form. `None` when either
/// component is wider than the field, which no valid signature is.
fn dss_to_fixed(value: &DssSigValue, field_size: usize) -> Option<Vec<u8>> {
    let r = value.r.to_bytes_be();
    let s = value.s.to_bytes_be();
    if r.len() > field_size || s.len() > field_size {
        return None;
    }
    let mut bytes = vec![0u8; 2 * field_size];
    bytes[field_size - r.len()..field_size].copy_from_slice(&r);
    bytes[2 * field_size - s.len()..].copy_from_slice(&s);
    Some(bytes)
}

fn unsupported_curve(curve: NamedCurve) -> Error {
    Error::UnsupportedAlgorithm(format!("ECDSA over {:?}", curve))
}

fn sign_ecdsa(key: &EcdsaPrivateKey, digest: &[u8]) -> Result<Vec<u8>> {
    let curve = key.curve();
    let prehash = field_prehash(digest, curve.field_size());
    let d = key.d_bytes();
    let invalid = |e: p256::ecdsa::Error| Error::InvalidKey(format!("ECDSA private key: {}", e));
    let failed = |e: p256::ecdsa::Error| Error::SigningFailed(format!("ECDSA: {}", e));

    let fixed = match curve {
        NamedCurve::Secp256r1 => {
            let signing_key = p256::ecdsa::SigningKey::from_slice(&d).map_err(invalid)?;
            let signature: p256::ecdsa::Signature = signing_key
                .sign_prehash_with_rng(&mut OsRng, &prehash)
                .map_err(failed)?;
            signature.to_bytes().to_vec()
        }
        NamedCurve::Secp384r1 => {
            let signing_key = p384::ecdsa::SigningKey::from_slice(&d).map_err(invalid)?;
            let signature: p384::ecdsa::Signature = signing_key
                .sign_prehash_with_rng(&mut OsRng, &prehash)
                .map_err(failed)?;
            signature.to_bytes().to_vec()
        }
        NamedCurve::Secp521r1 => {
            let signing_key = p521::ecdsa::SigningKey::from_slice(&d).map_err(invalid)?;
            let signature: p521::ecdsa::Signature =
                signing_key.sign_prehash(&prehash).map_err(failed)?;
            signature.to_bytes().to_vec()
        }
        other => return Err(unsupported_curve(other)),
    };
    encode_dss(&fixed_to_dss(&fixed))
}

fn verify_ecdsa(key: &EcdsaPublicKey, digest: &[u8], signature: &[u8]) -> Result<bool> {
    let curve = key.curve();
    let value = decode_dss(signature)?;
    let prehash = field_prehash(digest, curve.field_size());
    let point = key.to_uncompressed_point();
    let invalid = |e: p256::ecdsa::Error| Error::InvalidKey(format!("ECDSA public key: {}", e));

    let Some(fixed) = dss_to_fixed(&value, curve.field_size()) else {
        log::trace!("ECDSA signature component wider than the field");
        return Ok(false);
    };

    let verified = match curve {
        NamedCurve::Secp256r1 => {
            let verifying_key = p256::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(invalid)?;
            p256::ecdsa::Signature::from_slice(&fixed)
                .and_then(|sig| verifying_key.verify_prehash(&prehash, &sig))
        }
        NamedCurve::Secp384r1 => {
            let verifying_key = p384::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(invalid)?;
            p384::ecdsa::Signature::from_slice(&fixed)
                .and_then(|sig| verifying_key.verify_prehash(&prehash, &sig))
        }
        NamedCurve::Secp521r1 => {
            let verifying_key = p521::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(invalid)?;
            p521::ecdsa::Signature::from_slice(&fixed)
                .and_then(|sig| verifying_key.verify_prehash(&prehash, &sig))
        }
        other => return Err(unsupported_curve(other)),
    };
    Ok(verified.is_ok())
}
