//! # sigil-crypto
//!
//! The operations a host exposes to scripts: certificate and key parsing,
//! one-shot signing and verification, and incremental signers.
//!
//! | operation                          | input decoding            |
//! |------------------------------------|---------------------------|
//! | [`sign`], [`verify`]               | plaintext auto-detected   |
//! | [`sign_string`], [`verify_string`] | plaintext taken verbatim  |
//! | [`Signer::update`]                 | caller-chosen [`Encoding`]|
//!
//! Signatures handed to a verifier are always auto-detected. Signatures
//! produced are encoded with the caller's [`Encoding`].
//!
//! ```no_run
//! use sigil_crypto::{Encoding, SigningOptions};
//!
//! # let private_pem = "";
//! # let public_pem = "";
//! let private_key = sigil_crypto::parse_private_key(private_pem, None).unwrap();
//! let public_key = sigil_crypto::parse_public_key(public_pem).unwrap();
//! let options = SigningOptions::from_pairs([("type", "pss")]).unwrap();
//!
//! let signature = sigil_crypto::sign_string(
//!     &private_key, "sha256", "hello", Encoding::Hex, &options,
//! ).unwrap();
//! let valid = sigil_crypto::verify_string(
//!     &public_key, "sha256", "hello", signature, &options,
//! ).unwrap();
//! assert!(valid);
//! ```

pub mod codec;
pub mod digest;
pub mod error;
pub mod incremental;
pub mod options;
pub mod signature;

use sigil::decoder::Decoder;
use sigil_pem::Pem;

pub use codec::{BinaryValue, Encoded, Encoding, Payload};
pub use digest::DigestAlgorithm;
pub use error::{Error, ErrorKind, Result};
pub use incremental::{Signer, Verifier};
pub use options::{PaddingScheme, SigningOptions};
pub use sigil_pkcs::{PrivateKey, PublicKey};
pub use sigil_pkix_types::DistinguishedName;
pub use sigil_x509::Certificate;

/// Parses the first PEM block of `pem` as a certificate.
pub fn parse(pem: &str) -> Result<Certificate> {
    let cert: Certificate = pem.parse()?;
    log::debug!(
        "parsed {} certificate with {} key",
        cert.signature_algorithm(),
        cert.public_key().algorithm()
    );
    Ok(cert)
}

/// The subject name of the certificate in `pem`.
pub fn get_subject(pem: &str) -> Result<DistinguishedName> {
    Ok(parse(pem)?.subject())
}

/// The issuer name of the certificate in `pem`.
pub fn get_issuer(pem: &str) -> Result<DistinguishedName> {
    Ok(parse(pem)?.issuer())
}

/// DNS, email, IP and URI subject alternative names, in encoding order.
pub fn get_alt_names(pem: &str) -> Result<Vec<String>> {
    Ok(parse(pem)?.alt_names())
}

/// Accepts `PUBLIC KEY` and `RSA PUBLIC KEY` blocks.
pub fn parse_public_key(pem: &str) -> Result<PublicKey> {
    let pem: Pem = pem.parse()?;
    let key: PublicKey = pem.decode()?;
    log::debug!("parsed {} public key", key.algorithm());
    Ok(key)
}

/// Accepts every private key label. `password` is required for blocks
/// with `Proc-Type: 4,ENCRYPTED` headers and ignored otherwise.
pub fn parse_private_key(pem: &str, password: Option<&str>) -> Result<PrivateKey> {
    let pem: Pem = pem.parse()?;
    let key = PrivateKey::from_pem(&pem, password)?;
    log::debug!("parsed {} private key", key.algorithm());
    Ok(key)
}

/// Signs `plaintext`, whose encoding is auto-detected.
pub fn sign(
    key: &PrivateKey,
    digest: &str,
    plaintext: impl Into<Payload>,
    encoding: Encoding,
    options: &SigningOptions,
) -> Result<Encoded> {
    let algorithm: DigestAlgorithm = digest.parse()?;
    let plaintext = codec::decode(plaintext, Encoding::Auto)?;
    sign_plaintext(key, algorithm, plaintext.bytes(), encoding, options)
}

/// Signs the UTF-8 bytes of `plaintext` as they are.
pub fn sign_string(
    key: &PrivateKey,
    digest: &str,
    plaintext: &str,
    encoding: Encoding,
    options: &SigningOptions,
) -> Result<Encoded> {
    let algorithm: DigestAlgorithm = digest.parse()?;
    sign_plaintext(key, algorithm, plaintext.as_bytes(), encoding, options)
}

fn sign_plaintext(
    key: &PrivateKey,
    algorithm: DigestAlgorithm,
    plaintext: &[u8],
    encoding: Encoding,
    options: &SigningOptions,
) -> Result<Encoded> {
    let digest = algorithm.digest(plaintext);
    let signature = signature::sign_digest(key, algorithm, &digest, options)?;
    codec::encode(&signature, encoding)
}

/// Verifies `signature` over `plaintext`; both encodings are auto-detected.
pub fn verify(
    key: &PublicKey,
    digest: &str,
    plaintext: impl Into<Payload>,
    signature: impl Into<Payload>,
    options: &SigningOptions,
) -> Result<bool> {
    let algorithm: DigestAlgorithm = digest.parse()?;
    let plaintext = codec::decode(plaintext, Encoding::Auto)?;
    verify_plaintext(key, algorithm, plaintext.bytes(), signature.into(), options)
}

/// Verifies `signature` over the UTF-8 bytes of `plaintext`.
pub fn verify_string(
    key: &PublicKey,
    digest: &str,
    plaintext: &str,
    signature: impl Into<Payload>,
    options: &SigningOptions,
) -> Result<bool> {
    let algorithm: DigestAlgorithm = digest.parse()?;
    verify_plaintext(key, algorithm, plaintext.as_bytes(), signature.into(), options)
}

fn verify_plaintext(
    key: &PublicKey,
    algorithm: DigestAlgorithm,
    plaintext: &[u8],
    signature: Payload,
    options: &SigningOptions,
) -> Result<bool> {
    let signature = codec::decode(signature, Encoding::Auto)?;
    let digest = algorithm.digest(plaintext);
    signature::verify_digest(key, algorithm, &digest, signature.bytes(), options)
}

/// Starts an incremental signer for the named digest.
pub fn create_sign(digest: &str, options: SigningOptions) -> Result<Signer> {
    Ok(Signer::new(digest.parse()?, options))
}

/// Starts an incremental verifier for the named digest.
pub fn create_verify(digest: &str, options: SigningOptions) -> Result<Verifier> {
    Ok(Verifier::new(digest.parse()?, options))
}
