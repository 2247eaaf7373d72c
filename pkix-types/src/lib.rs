//! PKIX (RFC 5280) types shared by the certificate and key crates.
//!
//! - [`Name`] and its flattened [`DistinguishedName`] view
//! - [`AlgorithmIdentifier`] with typed DSA and EC parameters
//! - [`SubjectPublicKeyInfo`]
//! - [`Extension`] and [`CertificateSerialNumber`]
//! - [`DssSigValue`], the `(r, s)` pair produced by DSA and ECDSA

pub mod algorithm;
pub mod directory_string;
pub mod distinguished_name;
pub mod error;
pub mod extension;
pub mod name;
pub mod oid_name;
pub mod serial_number;
pub mod signature_value;
pub mod subject_public_key_info;

pub use algorithm::parameters::{DsaParameters, EcParameters, NamedCurve};
pub use algorithm::{AlgorithmIdentifier, AlgorithmParameters};
pub use directory_string::DirectoryString;
pub use distinguished_name::DistinguishedName;
pub use error::{Error, Result};
pub use extension::Extension;
pub use name::{AttributeTypeAndValue, Name, RelativeDistinguishedName};
pub use oid_name::OidName;
pub use serial_number::CertificateSerialNumber;
pub use signature_value::DssSigValue;
pub use subject_public_key_info::SubjectPublicKeyInfo;
