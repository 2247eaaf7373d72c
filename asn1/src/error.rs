//! Error types for ASN.1 element decoding and encoding.

use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid boolean")]
    InvalidBoolean,

    #[error("INTEGER: {0}")]
    InvalidInteger(String),

    #[error("OBJECT IDENTIFIER: {0}")]
    InvalidObjectIdentifier(String),
    #[error("parse int error: {0}")]
    ParseInt(#[from] ParseIntError),

    #[error("BIT STRING: {0}")]
    InvalidBitString(String),

    /// A character string whose bytes do not fit its declared type.
    #[error("{kind}: {msg}")]
    InvalidString { kind: &'static str, msg: String },

    #[error("UTCTime: {0}")]
    InvalidUtcTime(String),
    #[error("GeneralizedTime: {0}")]
    InvalidGeneralizedTime(String),

    #[error("invalid context-specific value: {slot}, {msg}")]
    InvalidContextSpecific { slot: u8, msg: String },

    #[error("invalid element: {0}")]
    InvalidElement(String),

    #[error("invalid DER encoding: {0}")]
    Der(#[from] sigil_der::error::Error),
}
