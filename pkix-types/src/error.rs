//! Error types for PKIX types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("DirectoryString: {0}")]
    InvalidDirectoryString(String),

    /// Name, RelativeDistinguishedName or AttributeTypeAndValue
    #[error("Name: {0}")]
    InvalidName(String),

    #[error("AlgorithmIdentifier: {0}")]
    InvalidAlgorithmIdentifier(String),
    #[error("AlgorithmIdentifier: NULL parameters cannot be read as {0}")]
    NullParameter(&'static str),
    #[error("Dss-Parms: {0}")]
    InvalidDsaParameters(String),
    #[error("ECParameters: {0}")]
    InvalidEcParameters(String),
    #[error("unknown named curve: {0}")]
    UnknownCurve(String),

    #[error("SubjectPublicKeyInfo: {0}")]
    InvalidSubjectPublicKeyInfo(String),

    #[error("CertificateSerialNumber: {0}")]
    InvalidSerialNumber(String),

    #[error("Extension: {0}")]
    InvalidExtension(String),

    #[error("Dss-Sig-Value: {0}")]
    InvalidSignatureValue(String),

    #[error("ASN.1 error: {0}")]
    ASN1Error(#[from] sigil_asn1::error::Error),
}
