//! Private key union.
//!
//! [`PrivateKey::from_pem`] accepts every private key label and handles the
//! legacy `Proc-Type: 4,ENCRYPTED` headers. Key material never reaches the
//! log.

use sigil::decoder::{DecodableFrom, Decoder};
use sigil_pem::{Label, Pem};

use crate::dsa::DsaPrivateKey;
use crate::error::{Error, Result};
use crate::legacy;
use crate::pkcs1::RsaPrivateKey;
use crate::pkcs8::PrivateKeyInfo;
use crate::public_key::PublicKey;
use crate::sec1::EcdsaPrivateKey;
use crate::single_element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateKey {
    Rsa(RsaPrivateKey),
    Dsa(DsaPrivateKey),
    Ecdsa(EcdsaPrivateKey),
}

impl PrivateKey {
    /// `"RSA"`, `"DSA"` or `"ECDSA"`, matching [`PublicKey::algorithm`].
    pub fn algorithm(&self) -> &'static str {
        match self {
            PrivateKey::Rsa(_) => "RSA",
            PrivateKey::Dsa(_) => "DSA",
            PrivateKey::Ecdsa(_) => "ECDSA",
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Rsa(key) => PublicKey::Rsa(key.public_key().clone()),
            PrivateKey::Dsa(key) => PublicKey::Dsa(key.public_key().clone()),
            PrivateKey::Ecdsa(key) => PublicKey::Ecdsa(key.public_key().clone()),
        }
    }

    /// Parses the DER body of a PEM block with the given label.
    pub fn from_der(label: Label, der: &[u8]) -> Result<Self> {
        let element = single_element("private key", der)?;
        match label {
            Label::RSAPrivateKey => Ok(PrivateKey::Rsa(element.decode()?)),
            Label::DSAPrivateKey => Ok(PrivateKey::Dsa(element.decode()?)),
            Label::ECPrivateKey => Ok(PrivateKey::Ecdsa(element.decode()?)),
            Label::PrivateKey => {
                let info: PrivateKeyInfo = element.decode()?;
                info.to_private_key()
            }
            other => Err(Error::UnexpectedLabel(other)),
        }
    }

    /// Parses a private key block, decrypting it first when its headers
    /// say it is encrypted. `password` is ignored for clear blocks.
    pub fn from_pem(pem: &Pem, password: Option<&str>) -> Result<Self> {
        let label = pem.label();
        match label {
            Label::EncryptedPrivateKey => {
                return Err(Error::UnsupportedCipher(
                    "PKCS#8 encrypted private keys".to_string(),
                ));
            }
            Label::RSAPrivateKey
            | Label::DSAPrivateKey
            | Label::ECPrivateKey
            | Label::PrivateKey => {}
            other => return Err(Error::UnexpectedLabel(other)),
        }

        if !pem.is_encrypted() {
            let der: Vec<u8> = pem.decode()?;
            return Self::from_der(label, &der);
        }

        let password = password.ok_or(Error::PasswordRequired)?;
        let der = legacy::decrypt(pem, password)?;
        // A wrong password that still yields valid padding shows up here.
        Self::from_der(label, &der).map_err(|e| match e {
            Error::Der(_)
            | Error::Asn1(_)
            | Error::PkixTypes(_)
            | Error::EmptyAsn1Object
            | Error::InvalidStructure { .. } => {
                log::debug!("decrypted {} block does not parse: {}", label, e);
                Error::Decryption("wrong password or corrupt key".to_string())
            }
            other => other,
        })
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(key: RsaPrivateKey) -> Self {
        PrivateKey::Rsa(key)
    }
}

impl From<DsaPrivateKey> for PrivateKey {
    fn from(key: DsaPrivateKey) -> Self {
        PrivateKey::Dsa(key)
    }
}

impl From<EcdsaPrivateKey> for PrivateKey {
    fn from(key: EcdsaPrivateKey) -> Self {
        PrivateKey::Ecdsa(key)
    }
}

impl DecodableFrom<Pem> for PrivateKey {}

/// Clear blocks only; encrypted ones fail with [`Error::PasswordRequired`].
impl Decoder<Pem, PrivateKey> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<PrivateKey> {
        PrivateKey::from_pem(self, None)
    }
}
