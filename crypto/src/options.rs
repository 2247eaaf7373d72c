//! Signing options
//!
//! The string-keyed form recognises two keys, both optional:
//!
//! | key          | values                        |
//! |--------------|-------------------------------|
//! | `type`       | `""`, `"pkcs1v15"` or `"pss"` |
//! | `saltLength` | non-negative integer          |
//!
//! Both only apply to RSA keys. A salt length of 0 means "as long as the
//! digest".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PaddingScheme {
    #[default]
    Pkcs1v15,
    Pss,
}

impl fmt::Display for PaddingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingScheme::Pkcs1v15 => write!(f, "pkcs1v15"),
            PaddingScheme::Pss => write!(f, "pss"),
        }
    }
}

impl FromStr for PaddingScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "pkcs1v15" => Ok(PaddingScheme::Pkcs1v15),
            "pss" => Ok(PaddingScheme::Pss),
            other => Err(Error::UnsupportedPaddingScheme(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for PaddingScheme {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SigningOptions {
    #[serde(rename = "type", default)]
    pub padding: PaddingScheme,
    #[serde(rename = "saltLength", default, deserialize_with = "salt_length")]
    pub salt_length: usize,
}

impl SigningOptions {
    pub fn pss(salt_length: usize) -> Self {
        Self {
            padding: PaddingScheme::Pss,
            salt_length,
        }
    }

    /// Builds options from `(key, value)` string pairs. Unknown keys are
    /// rejected rather than ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = SigningOptions::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "type" => options.padding = value.parse()?,
                "saltLength" => options.salt_length = parse_salt_length(value)?,
                other => {
                    return Err(Error::InvalidOptions(format!("unknown option: {}", other)));
                }
            }
        }
        Ok(options)
    }

    /// Rejects options that do not apply to the given key algorithm.
    pub(crate) fn check_for(&self, key_algorithm: &str) -> Result<()> {
        match key_algorithm {
            "RSA" => {
                if self.padding == PaddingScheme::Pkcs1v15 && self.salt_length != 0 {
                    return Err(Error::InvalidOptions(
                        "saltLength requires type pss".to_string(),
                    ));
                }
                Ok(())
            }
            _ if *self == SigningOptions::default() => Ok(()),
            other => Err(Error::InvalidOptions(format!(
                "{} keys take no signing options",
                other
            ))),
        }
    }
}

fn parse_salt_length(value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| Error::InvalidOptions(format!("saltLength is not an integer: {}", value)))
}

fn salt_length<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(usize),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => parse_salt_length(&s).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::ErrorKind;

    #[rstest]
    #[case(vec![], SigningOptions::default())]
    #[case(vec![("type", "")], SigningOptions::default())]
    #[case(vec![("type", "pkcs1v15")], SigningOptions::default())]
    #[case(vec![("type", "pss")], SigningOptions::pss(0))]
    #[case(vec![("type", "pss"), ("saltLength", "32")], SigningOptions::pss(32))]
    fn test_from_pairs(#[case] pairs: Vec<(&str, &str)>, #[case] expected: SigningOptions) {
        assert_eq!(SigningOptions::from_pairs(pairs).unwrap(), expected);
    }

    #[rstest]
    #[case(vec![("type", "oaep")], ErrorKind::UnsupportedPaddingScheme)]
    #[case(vec![("type", "PSS")], ErrorKind::UnsupportedPaddingScheme)]
    #[case(vec![("saltLength", "abc")], ErrorKind::InvalidOptions)]
    #[case(vec![("saltLength", "-1")], ErrorKind::InvalidOptions)]
    #[case(vec![("hash", "sha256")], ErrorKind::InvalidOptions)]
    fn test_from_pairs_invalid(#[case] pairs: Vec<(&str, &str)>, #[case] expected: ErrorKind) {
        let err = SigningOptions::from_pairs(pairs).unwrap_err();
        assert_eq!(err.kind(), expected);
    }

    #[rstest]
    #[case(r#"{}"#, SigningOptions::default())]
    #[case(r#"{"type": "pss", "saltLength": 32}"#, SigningOptions::pss(32))]
    #[case(r#"{"type": "pss", "saltLength": "20"}"#, SigningOptions::pss(20))]
    fn test_deserialize(#[case] input: &str, #[case] expected: SigningOptions) {
        let options: SigningOptions = serde_json::from_str(input).unwrap();
        assert_eq!(options, expected);
    }

    #[rstest]
    #[case(r#"{"type": "oaep"}"#)]
    #[case(r#"{"saltLength": "twenty"}"#)]
    #[case(r#"{"saltlength": 20}"#)]
    fn test_deserialize_invalid(#[case] input: &str) {
        assert!(serde_json::from_str::<SigningOptions>(input).is_err());
    }

    #[test]
    fn test_check_for() {
        assert!(SigningOptions::pss(32).check_for("RSA").is_ok());
        assert!(SigningOptions::default().check_for("ECDSA").is_ok());

        let options = SigningOptions {
            padding: PaddingScheme::Pkcs1v15,
            salt_length: 16,
        };
        let err = options.check_for("RSA").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOptions);

        let err = SigningOptions::pss(0).check_for("DSA").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOptions);
    }
}
