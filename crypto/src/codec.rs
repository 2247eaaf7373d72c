//! Binary codec
//!
//! Converts between raw bytes and their textual forms. A [`Payload`] is
//! what a caller hands in: either bytes that are already decoded or text
//! in some encoding. With [`Encoding::Auto`] the decoder tries, in order,
//! raw bytes, hex and base64; the first that succeeds wins.
//!
//! ```
//! use sigil_crypto::codec::{self, Encoding};
//!
//! // valid as both hex and base64; hex is tried first
//! let value = codec::decode("deadbeef", Encoding::Auto).unwrap();
//! assert_eq!(value.bytes(), &[0xde, 0xad, 0xbe, 0xef]);
//! assert_eq!(value.encoding(), Encoding::Hex);
//! ```

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Detect on decode, raw bytes on encode.
    #[default]
    Auto,
    Binary,
    Hex,
    Base64,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Auto => "",
            Encoding::Binary => "binary",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The empty string selects [`Encoding::Auto`].
impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(Encoding::Auto),
            "binary" => Ok(Encoding::Binary),
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            other => Err(Error::UnsupportedEncoding(other.to_string())),
        }
    }
}

/// Caller-supplied input: bytes that need no decoding, or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Bytes(Vec<u8>),
    Text(String),
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Payload {
    fn from(bytes: &[u8; N]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Encoded> for Payload {
    fn from(encoded: Encoded) -> Self {
        match encoded {
            Encoded::Bytes(bytes) => Payload::Bytes(bytes),
            Encoded::Text(text) => Payload::Text(text),
        }
    }
}

/// Decoded bytes together with the encoding they were presented in. For
/// auto-detected input this is the encoding that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryValue {
    bytes: Vec<u8>,
    encoding: Encoding,
}

impl BinaryValue {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Output of [`encode`]: raw bytes for `Auto`/`Binary`, text otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Bytes(Vec<u8>),
    Text(String),
}

impl Encoded {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Encoded::Bytes(bytes) => bytes,
            Encoded::Text(text) => text.as_bytes(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Encoded::Bytes(_) => None,
            Encoded::Text(text) => Some(text),
        }
    }
}

pub fn decode(value: impl Into<Payload>, encoding: Encoding) -> Result<BinaryValue> {
    let payload = value.into();
    match encoding {
        Encoding::Auto => detect(payload),
        known => {
            let bytes = decode_as(&payload, known)?;
            Ok(BinaryValue {
                bytes,
                encoding: known,
            })
        }
    }
}

pub fn encode(bytes: &[u8], encoding: Encoding) -> Result<Encoded> {
    match encoding {
        Encoding::Auto | Encoding::Binary => Ok(Encoded::Bytes(bytes.to_vec())),
        Encoding::Hex => Ok(Encoded::Text(hex::encode(bytes))),
        Encoding::Base64 => Ok(Encoded::Text(STANDARD.encode(bytes))),
    }
}

fn detect(payload: Payload) -> Result<BinaryValue> {
    for encoding in [Encoding::Binary, Encoding::Hex, Encoding::Base64] {
        if let Ok(bytes) = decode_as(&payload, encoding) {
            log::trace!("auto-detected {} input", encoding);
            return Ok(BinaryValue { bytes, encoding });
        }
    }
    Err(Error::UnrecognizedEncoding(
        "input is neither bytes, hex nor base64".to_string(),
    ))
}

fn decode_as(payload: &Payload, encoding: Encoding) -> Result<Vec<u8>> {
    match (encoding, payload) {
        (Encoding::Binary, Payload::Bytes(bytes)) => Ok(bytes.clone()),
        (Encoding::Binary, Payload::Text(_)) => Err(Error::UnrecognizedEncoding(
            "not a byte array".to_string(),
        )),
        (Encoding::Hex, Payload::Text(text)) => hex::decode(text)
            .map_err(|e| Error::UnrecognizedEncoding(format!("invalid hex: {}", e))),
        (Encoding::Base64, Payload::Text(text)) => STANDARD
            .decode(text)
            .map_err(|e| Error::UnrecognizedEncoding(format!("invalid base64: {}", e))),
        (Encoding::Hex | Encoding::Base64, Payload::Bytes(_)) => Err(Error::UnrecognizedEncoding(
            format!("not a {} string", encoding),
        )),
        (Encoding::Auto, _) => Err(Error::UnsupportedEncoding(
            "auto-detection is not a concrete encoding".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::ErrorKind;

    #[rstest]
    #[case("", Encoding::Auto)]
    #[case("binary", Encoding::Binary)]
    #[case("hex", Encoding::Hex)]
    #[case("base64", Encoding::Base64)]
    fn test_encoding_from_str(#[case] input: &str, #[case] expected: Encoding) {
        let encoding: Encoding = input.parse().unwrap();
        assert_eq!(encoding, expected);
        assert_eq!(encoding.to_string(), input);
    }

    #[rstest]
    #[case("utf8")]
    #[case("HEX")]
    #[case("base32")]
    fn test_unsupported_encoding(#[case] input: &str) {
        let err = input.parse::<Encoding>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedEncoding);
    }

    #[rstest]
    #[case(Encoding::Binary, vec![])]
    #[case(Encoding::Binary, vec![0x00, 0xff, 0x10])]
    #[case(Encoding::Hex, vec![])]
    #[case(Encoding::Hex, vec![0xde, 0xad, 0xbe, 0xef])]
    #[case(Encoding::Base64, vec![])]
    #[case(Encoding::Base64, b"hello world".to_vec())]
    fn test_round_trip(#[case] encoding: Encoding, #[case] bytes: Vec<u8>) {
        let encoded = encode(&bytes, encoding).unwrap();
        let decoded = decode(encoded, encoding).unwrap();
        assert_eq!(decoded.bytes(), bytes.as_slice());
        assert_eq!(decoded.encoding(), encoding);
    }

    #[test]
    fn test_encode_text_forms() {
        let bytes = [0xde, 0xad, 0xbe, 0xef];
        assert_eq!(encode(&bytes, Encoding::Hex).unwrap().as_text(), Some("deadbeef"));
        assert_eq!(encode(&bytes, Encoding::Base64).unwrap().as_text(), Some("3q2+7w=="));
        assert_eq!(
            encode(&bytes, Encoding::Auto).unwrap(),
            Encoded::Bytes(bytes.to_vec())
        );
    }

    #[rstest]
    #[case::bytes(Payload::from(&[1u8, 2, 3]), vec![1, 2, 3], Encoding::Binary)]
    #[case::hex_before_base64(Payload::from("deadbeef"), vec![0xde, 0xad, 0xbe, 0xef], Encoding::Hex)]
    #[case::uppercase_hex(Payload::from("DEADBEEF"), vec![0xde, 0xad, 0xbe, 0xef], Encoding::Hex)]
    #[case::base64(Payload::from("aGVsbG8="), b"hello".to_vec(), Encoding::Base64)]
    #[case::empty_text(Payload::from(""), vec![], Encoding::Hex)]
    fn test_auto_detect(
        #[case] input: Payload,
        #[case] expected: Vec<u8>,
        #[case] encoding: Encoding,
    ) {
        let value = decode(input, Encoding::Auto).unwrap();
        assert_eq!(value.bytes(), expected.as_slice());
        assert_eq!(value.encoding(), encoding);
    }

    #[test]
    fn test_auto_detect_matches_explicit_hex() {
        let auto = decode("deadbeef", Encoding::Auto).unwrap();
        let hex = decode("deadbeef", Encoding::Hex).unwrap();
        assert_eq!(auto.bytes(), hex.bytes());
    }

    #[test]
    fn test_unrecognized() {
        let err = decode("not hex, not base64!", Encoding::Auto).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedEncoding);
    }

    #[rstest]
    #[case::text_as_binary(Payload::from("abc"), Encoding::Binary)]
    #[case::bytes_as_hex(Payload::from(&[0xabu8]), Encoding::Hex)]
    #[case::bad_hex(Payload::from("abc"), Encoding::Hex)]
    #[case::bad_base64(Payload::from("a"), Encoding::Base64)]
    fn test_known_encoding_mismatch(#[case] input: Payload, #[case] encoding: Encoding) {
        let err = decode(input, encoding).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedEncoding);
    }
}
