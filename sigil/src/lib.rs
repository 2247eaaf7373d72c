//! # sigil
//!
//! Conversion traits shared by every layer of the sigil certificate and
//! signature toolkit.
//!
//! Parsing walks down a fixed ladder of representations:
//! ```text
//! PEM text → Pem → Der → ASN1Object → Element → Certificate / PublicKey / PrivateKey
//! ```
//! Each rung is a [`decoder::Decoder`] implementation. Producing bytes
//! (DER signatures, re-encoded structures) walks the ladder back up through
//! [`encoder::Encoder`].
//!
//! ```ignore
//! use sigil::decoder::Decoder;
//! use sigil_asn1::ASN1Object;
//! use sigil_der::Der;
//!
//! let bytes = vec![0x30, 0x03, 0x02, 0x01, 0x07];
//! let der: Der = bytes.decode()?;
//! let asn1: ASN1Object = der.decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
