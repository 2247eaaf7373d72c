//! Incremental signer and verifier
//!
//! Both accumulate plaintext across [`Signer::update`] calls and hash it
//! when finalized. Finalizing reads the buffer without clearing it, so
//! a later update extends the same plaintext and a later finalize signs
//! or verifies the longer message.
//!
//! A context is not synchronized; share it across threads only behind
//! the caller's own lock.

use sigil_pkcs::{PrivateKey, PublicKey};

use crate::codec::{self, Encoded, Encoding, Payload};
use crate::digest::DigestAlgorithm;
use crate::error::Result;
use crate::options::SigningOptions;
use crate::signature::{sign_digest, verify_digest};

#[derive(Debug, Clone)]
struct Context {
    algorithm: DigestAlgorithm,
    options: SigningOptions,
    plaintext: Vec<u8>,
}

impl Context {
    fn new(algorithm: DigestAlgorithm, options: SigningOptions) -> Self {
        Self {
            algorithm,
            options,
            plaintext: Vec::new(),
        }
    }

    fn update(&mut self, input: Payload, encoding: Encoding) -> Result<()> {
        let value = codec::decode(input, encoding)?;
        self.plaintext.extend_from_slice(value.bytes());
        log::trace!("buffered {} bytes", self.plaintext.len());
        Ok(())
    }

    fn digest(&self) -> Vec<u8> {
        self.algorithm.digest(&self.plaintext)
    }
}

#[derive(Debug, Clone)]
pub struct Signer {
    context: Context,
}

impl Signer {
    pub fn new(algorithm: DigestAlgorithm, options: SigningOptions) -> Self {
        Self {
            context: Context::new(algorithm, options),
        }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.context.algorithm
    }

    /// Appends `input`, decoded with `encoding`.
    pub fn update(&mut self, input: impl Into<Payload>, encoding: Encoding) -> Result<()> {
        self.context.update(input.into(), encoding)
    }

    /// Signs everything buffered so far and encodes the signature.
    pub fn sign(&self, key: &PrivateKey, encoding: Encoding) -> Result<Encoded> {
        let signature = sign_digest(
            key,
            self.context.algorithm,
            &self.context.digest(),
            &self.context.options,
        )?;
        codec::encode(&signature, encoding)
    }
}

#[derive(Debug, Clone)]
pub struct Verifier {
    context: Context,
}

impl Verifier {
    pub fn new(algorithm: DigestAlgorithm, options: SigningOptions) -> Self {
        Self {
            context: Context::new(algorithm, options),
        }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.context.algorithm
    }

    pub fn update(&mut self, input: impl Into<Payload>, encoding: Encoding) -> Result<()> {
        self.context.update(input.into(), encoding)
    }

    /// Checks `signature`, auto-detecting its encoding, against everything
    /// buffered so far.
    pub fn verify(&self, key: &PublicKey, signature: impl Into<Payload>) -> Result<bool> {
        let signature = codec::decode(signature, Encoding::Auto)?;
        verify_digest(
            key,
            self.context.algorithm,
            &self.context.digest(),
            signature.bytes(),
            &self.context.options,
        )
    }
}
