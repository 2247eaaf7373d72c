use base64::DecodeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a PEM block.
///
/// Boundaries follow RFC 7468; the optional header section between the
/// pre-encapsulation boundary and the base64 body follows RFC 1421.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// No `-----BEGIN <label>-----` line was found.
    #[error("missing a pre encapsulation boundary")]
    MissingPreEncapsulationBoundary,

    #[error("missing a post encapsulation boundary")]
    MissingPostEncapsulationBoundary,

    #[error("missing PEM data")]
    MissingData,

    #[error("invalid label: {0}")]
    InvalidLabel(String),

    /// BEGIN and END name different labels.
    #[error("label doesn't match")]
    LabelMissMatch,

    #[error("invalid encapsulation boundary")]
    InvalidEncapsulationBoundary,

    /// A header line without the `Name: value` shape.
    #[error("invalid encapsulated header: {0}")]
    InvalidHeader(String),

    #[error("invalid base64line")]
    InvalidBase64Line,

    #[error("invalid base64finl")]
    InvalidBase64Finl,

    #[error("base64 decode: {0}")]
    Base64Decode(DecodeError),
}
