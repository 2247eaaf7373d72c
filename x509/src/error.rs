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

    /// The embedded subjectPublicKeyInfo could not be turned into a key.
    #[error("subject public key: {0}")]
    Key(#[from] sigil_pkcs::Error),

    #[error("unexpected PEM label: {0}")]
    UnexpectedLabel(Label),

    #[error("invalid certificate: {0}")]
    InvalidCertificate(String),
    #[error("invalid TBS certificate: {0}")]
    InvalidTbsCertificate(String),
    #[error("invalid version: {0}")]
    InvalidVersion(String),
    #[error("invalid validity: {0}")]
    InvalidValidity(String),
    #[error("invalid GeneralName: {0}")]
    InvalidGeneralName(String),
    #[error("invalid SubjectAltName: {0}")]
    InvalidSubjectAltName(String),
}
