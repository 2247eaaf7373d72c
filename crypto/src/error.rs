use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported binary encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("unrecognized binary encoding: {0}")]
    UnrecognizedEncoding(String),

    #[error("could not decode PEM: {0}")]
    PemDecode(#[source] sigil_pem::error::Error),

    #[error("could not parse certificate: {0}")]
    CertificateParse(#[source] sigil_x509::Error),

    #[error("could not parse key: {0}")]
    KeyParse(#[source] sigil_pkcs::Error),

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("could not decrypt private key: {0}")]
    Decryption(String),

    #[error("encrypted private key requires a password")]
    PasswordRequired,

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("unsupported padding scheme: {0}")]
    UnsupportedPaddingScheme(String),

    #[error("unsupported digest: {0}")]
    UnsupportedDigest(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("malformed signature encoding: {0}")]
    MalformedSignatureEncoding(String),

    #[error("invalid signing options: {0}")]
    InvalidOptions(String),
}

/// Fieldless mirror of [`Error`] for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedEncoding,
    UnrecognizedEncoding,
    PemDecode,
    CertificateParse,
    KeyParse,
    UnsupportedAlgorithm,
    Decryption,
    PasswordRequired,
    InvalidKey,
    UnsupportedPaddingScheme,
    UnsupportedDigest,
    SigningFailed,
    MalformedSignatureEncoding,
    InvalidOptions,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedEncoding(_) => ErrorKind::UnsupportedEncoding,
            Error::UnrecognizedEncoding(_) => ErrorKind::UnrecognizedEncoding,
            Error::PemDecode(_) => ErrorKind::PemDecode,
            Error::CertificateParse(_) => ErrorKind::CertificateParse,
            Error::KeyParse(_) => ErrorKind::KeyParse,
            Error::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Error::Decryption(_) => ErrorKind::Decryption,
            Error::PasswordRequired => ErrorKind::PasswordRequired,
            Error::InvalidKey(_) => ErrorKind::InvalidKey,
            Error::UnsupportedPaddingScheme(_) => ErrorKind::UnsupportedPaddingScheme,
            Error::UnsupportedDigest(_) => ErrorKind::UnsupportedDigest,
            Error::SigningFailed(_) => ErrorKind::SigningFailed,
            Error::MalformedSignatureEncoding(_) => ErrorKind::MalformedSignatureEncoding,
            Error::InvalidOptions(_) => ErrorKind::InvalidOptions,
        }
    }
}

impl From<sigil_pem::error::Error> for Error {
    fn from(err: sigil_pem::error::Error) -> Self {
        Error::PemDecode(err)
    }
}

/// Sorts key errors into the parse, algorithm and decryption stages.
impl From<sigil_pkcs::Error> for Error {
    fn from(err: sigil_pkcs::Error) -> Self {
        use sigil_pkcs::Error as Pkcs;

        match err {
            Pkcs::Pem(e) => Error::PemDecode(e),
            Pkcs::UnsupportedAlgorithm(alg) => Error::UnsupportedAlgorithm(alg),
            Pkcs::UnsupportedCurve(curve) => {
                Error::UnsupportedAlgorithm(format!("curve {}", curve))
            }
            Pkcs::PasswordRequired => Error::PasswordRequired,
            e @ (Pkcs::UnsupportedCipher(_) | Pkcs::InvalidDekInfo(_)) => {
                Error::Decryption(e.to_string())
            }
            Pkcs::Decryption(msg) => Error::Decryption(msg),
            other => Error::KeyParse(other),
        }
    }
}

/// A PEM failure means no certificate block could be read at all; every
/// later failure is a certificate parse error unless the embedded key uses
/// an algorithm outside the supported set.
impl From<sigil_x509::Error> for Error {
    fn from(err: sigil_x509::Error) -> Self {
        use sigil_pkcs::Error as Pkcs;
        use sigil_x509::Error as X509;

        match err {
            X509::Pem(e) => Error::PemDecode(e),
            X509::Key(Pkcs::UnsupportedAlgorithm(alg)) => Error::UnsupportedAlgorithm(alg),
            X509::Key(Pkcs::UnsupportedCurve(curve)) => {
                Error::UnsupportedAlgorithm(format!("curve {}", curve))
            }
            other => Error::CertificateParse(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(sigil_pkcs::Error::PasswordRequired, ErrorKind::PasswordRequired)]
    #[case(sigil_pkcs::Error::UnsupportedAlgorithm("1.3.101.112".to_string()), ErrorKind::UnsupportedAlgorithm)]
    #[case(sigil_pkcs::Error::UnsupportedCurve("secp256k1".to_string()), ErrorKind::UnsupportedAlgorithm)]
    #[case(sigil_pkcs::Error::UnsupportedCipher("RC2-CBC".to_string()), ErrorKind::Decryption)]
    #[case(sigil_pkcs::Error::InvalidDekInfo("no IV".to_string()), ErrorKind::Decryption)]
    #[case(sigil_pkcs::Error::Decryption("bad padding".to_string()), ErrorKind::Decryption)]
    #[case(sigil_pkcs::Error::EmptyAsn1Object, ErrorKind::KeyParse)]
    fn test_key_error_kind(#[case] err: sigil_pkcs::Error, #[case] expected: ErrorKind) {
        assert_eq!(Error::from(err).kind(), expected);
    }

    #[test]
    fn test_certificate_error_kind() {
        let err = sigil_x509::Error::InvalidCertificate("truncated".to_string());
        assert_eq!(Error::from(err).kind(), ErrorKind::CertificateParse);

        let err = sigil_x509::Error::Key(sigil_pkcs::Error::UnsupportedAlgorithm(
            "1.3.101.112".to_string(),
        ));
        assert_eq!(Error::from(err).kind(), ErrorKind::UnsupportedAlgorithm);
    }

    #[test]
    fn test_message_names_stage() {
        let err = Error::from(sigil_pkcs::Error::EmptyAsn1Object);
        assert_eq!(err.to_string(), "could not parse key: empty ASN1Object");
    }
}
