use sigil_pem::Label;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("PEM error: {0}")]
    Pem(#[from] sigil_pem::error::Error),

    #[error("DER error: {0}")]
    Der(#[from] sigil_der::error::Error),

    #[error("ASN.1 error: {0}")]
    Asn1(#[from] sigil_asn1::error::Error),

    #[error("PKIX types error: {0}")]
    PkixTypes(#[from] sigil_pkix_types::Error),

    #[error("unexpected PEM label: {0}")]
    UnexpectedLabel(Label),

    #[error("empty ASN1Object")]
    EmptyAsn1Object,

    /// A structure did not have the expected shape. `structure` is the
    /// ASN.1 type name, e.g. `RSAPrivateKey`.
    #[error("{structure}: {msg}")]
    InvalidStructure {
        structure: &'static str,
        msg: String,
    },

    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),

    #[error("encrypted private key requires a password")]
    PasswordRequired,

    #[error("unsupported cipher: {0}")]
    UnsupportedCipher(String),

    #[error("invalid DEK-Info header: {0}")]
    InvalidDekInfo(String),

    /// Wrong password or corrupt ciphertext.
    #[error("decryption failed: {0}")]
    Decryption(String),
}

impl Error {
    pub(crate) fn invalid(structure: &'static str, msg: impl Into<String>) -> Self {
        Error::InvalidStructure {
            structure,
            msg: msg.into(),
        }
    }
}
