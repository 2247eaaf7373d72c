//! # sigil-x509
//!
//! X.509 v1-v3 certificates ([RFC 5280](https://datatracker.ietf.org/doc/html/rfc5280)).
//!
//! A [`Certificate`] is parsed in one pass: names, validity, the embedded
//! public key and the subjectAltName extension are all decoded up front,
//! so a value that exists is fully readable. The SHA-1 fingerprint is
//! taken over the exact DER bytes that were parsed.
//!
//! ```no_run
//! use sigil::decoder::Decoder;
//! use sigil_pem::Pem;
//! use sigil_x509::Certificate;
//!
//! let pem: Pem = "-----BEGIN CERTIFICATE-----...".parse().unwrap();
//! let cert: Certificate = pem.decode().unwrap();
//! println!("{:?}", cert.subject().common_name());
//! println!("{}", cert.signature_algorithm());
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, ser::SerializeStruct};
use sha1::{Digest, Sha1};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil_asn1::{ASN1Object, BitString, Element};
use sigil_pem::{Label, Pem};
use sigil_pkcs::PublicKey;
use sigil_pkix_types::{
    AlgorithmIdentifier, CertificateSerialNumber, DistinguishedName, Name, SubjectPublicKeyInfo,
};

pub mod error;
pub mod extensions;
pub mod signature_algorithm;
pub mod types;

pub use error::{Error, Result};
pub use extensions::{Extensions, GeneralName, SubjectAltName};
pub use signature_algorithm::SignatureAlgorithm;
pub use types::{Validity, Version};

/// SHA-1 of the certificate DER.
pub type Fingerprint = [u8; 20];

/// ```asn1
/// TBSCertificate  ::=  SEQUENCE  {
///      version         [0]  EXPLICIT Version DEFAULT v1,
///      serialNumber         CertificateSerialNumber,
///      signature            AlgorithmIdentifier,
///      issuer               Name,
///      validity             Validity,
///      subject              Name,
///      subjectPublicKeyInfo SubjectPublicKeyInfo,
///      issuerUniqueID  [1]  IMPLICIT UniqueIdentifier OPTIONAL,
///                           -- If present, version MUST be v2 or v3
///      subjectUniqueID [2]  IMPLICIT UniqueIdentifier OPTIONAL,
///                           -- If present, version MUST be v2 or v3
///      extensions      [3]  EXPLICIT Extensions OPTIONAL
///                           -- If present, version MUST be v3
/// }
///
/// UniqueIdentifier  ::=  BIT STRING
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TBSCertificate {
    version: Version,
    serial_number: CertificateSerialNumber,
    signature: AlgorithmIdentifier,
    issuer: Name,
    validity: Validity,
    subject: Name,
    subject_public_key_info: SubjectPublicKeyInfo,
    issuer_unique_id: Option<BitString>,
    subject_unique_id: Option<BitString>,
    extensions: Extensions,
}

impl TBSCertificate {
    pub fn version(&self) -> Version {
        self.version
    }

    pub fn serial_number(&self) -> &CertificateSerialNumber {
        &self.serial_number
    }

    pub fn signature(&self) -> &AlgorithmIdentifier {
        &self.signature
    }

    pub fn issuer(&self) -> &Name {
        &self.issuer
    }

    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    pub fn subject(&self) -> &Name {
        &self.subject
    }

    pub fn subject_public_key_info(&self) -> &SubjectPublicKeyInfo {
        &self.subject_public_key_info
    }

    pub fn issuer_unique_id(&self) -> Option<&BitString> {
        self.issuer_unique_id.as_ref()
    }

    pub fn subject_unique_id(&self) -> Option<&BitString> {
        self.subject_unique_id.as_ref()
    }

    /// Empty for v1 and v2 certificates.
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}

fn unique_id(constructed: bool, element: &Element) -> Result<BitString> {
    match (constructed, element) {
        (false, Element::OctetString(raw)) => Ok(BitString::try_from(raw.as_bytes())?),
        _ => Err(Error::InvalidTbsCertificate(
            "UniqueIdentifier must be a primitive BIT STRING".to_string(),
        )),
    }
}

impl DecodableFrom<Element> for TBSCertificate {}

impl Decoder<Element, TBSCertificate> for Element {
    type Error = Error;

    fn decode(&self) -> Result<TBSCertificate> {
        let Element::Sequence(elements) = self else {
            return Err(Error::InvalidTbsCertificate(
                "expected SEQUENCE".to_string(),
            ));
        };

        let (version, rest) = match elements.as_slice() {
            [
                Element::ContextSpecific {
                    slot: 0,
                    constructed: true,
                    element,
                },
                rest @ ..,
            ] => {
                let version: Version = element.decode()?;
                (version, rest)
            }
            rest => (Version::V1, rest),
        };

        let [
            serial_number,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            optional @ ..,
        ] = rest
        else {
            return Err(Error::InvalidTbsCertificate(format!(
                "expected at least 6 fields after version, got {}",
                rest.len()
            )));
        };

        let mut issuer_unique_id = None;
        let mut subject_unique_id = None;
        let mut extensions = Extensions::default();
        let mut last_slot = 0;
        for field in optional {
            let Element::ContextSpecific {
                slot,
                constructed,
                element,
            } = field
            else {
                return Err(Error::InvalidTbsCertificate(format!(
                    "unexpected trailing field {}",
                    field
                )));
            };
            if *slot <= last_slot {
                return Err(Error::InvalidTbsCertificate(format!(
                    "field [{}] out of order",
                    slot
                )));
            }
            last_slot = *slot;
            match *slot {
                1 | 2 if version == Version::V1 => {
                    return Err(Error::InvalidTbsCertificate(
                        "unique identifiers need version 2 or 3".to_string(),
                    ));
                }
                1 => issuer_unique_id = Some(unique_id(*constructed, element)?),
                2 => subject_unique_id = Some(unique_id(*constructed, element)?),
                3 if version != Version::V3 => {
                    return Err(Error::InvalidTbsCertificate(
                        "extensions need version 3".to_string(),
                    ));
                }
                3 => extensions = element.decode()?,
                n => {
                    return Err(Error::InvalidTbsCertificate(format!(
                        "unknown field [{}]",
                        n
                    )));
                }
            }
        }

        let serial_number: CertificateSerialNumber = serial_number.decode()?;
        let signature: AlgorithmIdentifier = signature.decode()?;
        let issuer: Name = issuer.decode()?;
        let validity: Validity = validity.decode()?;
        let subject: Name = subject.decode()?;
        let subject_public_key_info: SubjectPublicKeyInfo = subject_public_key_info.decode()?;

        Ok(TBSCertificate {
            version,
            serial_number,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            issuer_unique_id,
            subject_unique_id,
            extensions,
        })
    }
}

/// ```asn1
/// Certificate  ::=  SEQUENCE  {
///     tbsCertificate       TBSCertificate,
///     signatureAlgorithm   AlgorithmIdentifier,
///     signatureValue       BIT STRING
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    tbs_certificate: TBSCertificate,
    signature_algorithm: AlgorithmIdentifier,
    signature_value: BitString,
    public_key: PublicKey,
    subject_alt_name: Option<SubjectAltName>,
    fingerprint: Fingerprint,
}

impl Certificate {
    /// Parses a DER certificate. Trailing bytes after the certificate are
    /// rejected.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let mut elements = ASN1Object::try_from(der)?.into_elements();
        if elements.len() != 1 {
            return Err(Error::InvalidCertificate(format!(
                "expected a single top-level element, got {}",
                elements.len()
            )));
        }
        let Element::Sequence(fields) = elements.remove(0) else {
            return Err(Error::InvalidCertificate("expected SEQUENCE".to_string()));
        };
        let [tbs, signature_algorithm, Element::BitString(signature_value)] = fields.as_slice()
        else {
            return Err(Error::InvalidCertificate(
                "expected tbsCertificate, signatureAlgorithm and signatureValue".to_string(),
            ));
        };

        let tbs_certificate: TBSCertificate = tbs.decode()?;
        let signature_algorithm: AlgorithmIdentifier = signature_algorithm.decode()?;
        if tbs_certificate.signature != signature_algorithm {
            return Err(Error::InvalidCertificate(
                "inner and outer signature algorithms differ".to_string(),
            ));
        }

        let public_key: PublicKey = tbs_certificate.subject_public_key_info.decode()?;
        let subject_alt_name = tbs_certificate.extensions.subject_alt_name()?;

        let mut fingerprint = [0u8; 20];
        fingerprint.copy_from_slice(&Sha1::digest(der));

        log::debug!(
            "parsed v{} certificate, serial {}, {} key, {} extension(s)",
            tbs_certificate.version.number(),
            tbs_certificate.serial_number.format_hex(),
            public_key.algorithm(),
            tbs_certificate.extensions.len()
        );

        Ok(Certificate {
            tbs_certificate,
            signature_algorithm,
            signature_value: signature_value.clone(),
            public_key,
            subject_alt_name,
            fingerprint,
        })
    }

    pub fn tbs_certificate(&self) -> &TBSCertificate {
        &self.tbs_certificate
    }

    pub fn version(&self) -> Version {
        self.tbs_certificate.version
    }

    pub fn serial_number(&self) -> &CertificateSerialNumber {
        &self.tbs_certificate.serial_number
    }

    pub fn subject(&self) -> DistinguishedName {
        DistinguishedName::from(&self.tbs_certificate.subject)
    }

    pub fn issuer(&self) -> DistinguishedName {
        DistinguishedName::from(&self.tbs_certificate.issuer)
    }

    pub fn not_before(&self) -> DateTime<Utc> {
        self.tbs_certificate.validity.not_before()
    }

    pub fn not_after(&self) -> DateTime<Utc> {
        self.tbs_certificate.validity.not_after()
    }

    pub fn subject_alt_name(&self) -> Option<&SubjectAltName> {
        self.subject_alt_name.as_ref()
    }

    /// DNS names, emails, IP addresses and URIs from subjectAltName, in
    /// encoding order. Empty when the extension is absent.
    pub fn alt_names(&self) -> Vec<String> {
        self.subject_alt_name
            .as_ref()
            .map(SubjectAltName::alt_names)
            .unwrap_or_default()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::from(&self.signature_algorithm)
    }

    pub fn signature_algorithm_identifier(&self) -> &AlgorithmIdentifier {
        &self.signature_algorithm
    }

    pub fn signature_value(&self) -> &BitString {
        &self.signature_value
    }

    pub fn extensions(&self) -> &Extensions {
        &self.tbs_certificate.extensions
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }
}

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The flattened view: names, RFC 3339 times, alt names, the fingerprint
/// as a byte array and the public key.
impl Serialize for Certificate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Certificate", 10)?;
        state.serialize_field("version", &self.version())?;
        state.serialize_field("serialNumber", self.serial_number())?;
        state.serialize_field("subject", &self.subject())?;
        state.serialize_field("issuer", &self.issuer())?;
        state.serialize_field("notBefore", &rfc3339(self.not_before()))?;
        state.serialize_field("notAfter", &rfc3339(self.not_after()))?;
        state.serialize_field("altNames", &self.alt_names())?;
        state.serialize_field("signatureAlgorithm", &self.signature_algorithm())?;
        state.serialize_field("fingerprint", &self.fingerprint)?;
        state.serialize_field("publicKey", &self.public_key)?;
        state.end()
    }
}

impl DecodableFrom<Pem> for Certificate {}

impl Decoder<Pem, Certificate> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<Certificate> {
        if self.label() != Label::Certificate {
            return Err(Error::UnexpectedLabel(self.label()));
        }
        let der: Vec<u8> = self.decode()?;
        Certificate::from_der(&der)
    }
}

impl std::str::FromStr for Certificate {
    type Err = Error;

    /// Reads the first PEM block of `s`, which must be a certificate.
    fn from_str(s: &str) -> Result<Self> {
        let pem: Pem = s.parse()?;
        pem.decode()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDate;
    use num_bigint::BigUint;
    use rstest::rstest;
    use sigil::encoder::Encoder;
    use sigil_asn1::{Integer, ObjectIdentifier, OctetString};
    use sigil_pkix_types::{
        AlgorithmParameters, AttributeTypeAndValue, Extension, RelativeDistinguishedName,
    };

    use super::*;

    fn oid(s: &str) -> ObjectIdentifier {
        ObjectIdentifier::from_str(s).unwrap()
    }

    fn explicit(slot: u8, element: Element) -> Element {
        Element::ContextSpecific {
            slot,
            constructed: true,
            element: Box::new(element),
        }
    }

    fn sha256_rsa() -> AlgorithmIdentifier {
        AlgorithmIdentifier::new_with_params(
            oid(AlgorithmIdentifier::OID_SHA256_WITH_RSA_ENCRYPTION),
            AlgorithmParameters::Null,
        )
    }

    fn name(cn: &str) -> Element {
        Name::new(vec![RelativeDistinguishedName::new(vec![
            AttributeTypeAndValue::new(oid(AttributeTypeAndValue::OID_COMMON_NAME), cn),
        ])])
        .encode()
        .unwrap()
    }

    fn validity() -> Element {
        let at = |y| {
            NaiveDate::from_ymd_opt(y, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        Element::Sequence(vec![Element::UTCTime(at(2019)), Element::UTCTime(at(2020))])
    }

    fn rsa_spki() -> Element {
        let key = Element::Sequence(vec![
            Element::Integer(Integer::from(3233)),
            Element::Integer(Integer::from(65537)),
        ])
        .to_der()
        .unwrap();
        SubjectPublicKeyInfo::new(
            AlgorithmIdentifier::new_with_params(
                oid(AlgorithmIdentifier::OID_RSA_ENCRYPTION),
                AlgorithmParameters::Null,
            ),
            BitString::new(0, key),
        )
        .encode()
        .unwrap()
    }

    fn san_extension() -> Element {
        let names = Element::Sequence(vec![
            Element::ContextSpecific {
                slot: 2,
                constructed: false,
                element: Box::new(Element::OctetString(OctetString::from(b"a.zz".as_slice()))),
            },
            Element::ContextSpecific {
                slot: 7,
                constructed: false,
                element: Box::new(Element::OctetString(OctetString::from(vec![192, 0, 2, 1]))),
            },
        ]);
        Extension::new(
            oid(SubjectAltName::OID),
            false,
            OctetString::from(names.to_der().unwrap()),
        )
        .encode()
        .unwrap()
    }

    fn tbs(version: Option<i64>, trailing: Vec<Element>) -> Element {
        let mut fields = Vec::new();
        if let Some(v) = version {
            fields.push(explicit(0, Element::Integer(Integer::from(v))));
        }
        fields.extend([
            Element::Integer(Integer::from(1234)),
            sha256_rsa().encode().unwrap(),
            name("issuer.zz"),
            validity(),
            name("subject.zz"),
            rsa_spki(),
        ]);
        fields.extend(trailing);
        Element::Sequence(fields)
    }

    fn certificate_der(tbs: Element, outer: AlgorithmIdentifier) -> Vec<u8> {
        Element::Sequence(vec![
            tbs,
            outer.encode().unwrap(),
            Element::BitString(BitString::new(0, vec![0xde, 0xad])),
        ])
        .to_der()
        .unwrap()
    }

    #[test]
    fn test_from_der_v3() {
        let der = certificate_der(
            tbs(Some(2), vec![explicit(3, Element::Sequence(vec![san_extension()]))]),
            sha256_rsa(),
        );
        let cert = Certificate::from_der(&der).unwrap();

        assert_eq!(cert.version(), Version::V3);
        assert_eq!(cert.serial_number().format_hex(), "04:d2");
        assert_eq!(cert.subject().common_name(), Some("subject.zz"));
        assert_eq!(cert.issuer().common_name(), Some("issuer.zz"));
        assert_eq!(rfc3339(cert.not_before()), "2019-01-01T00:00:00Z");
        assert_eq!(rfc3339(cert.not_after()), "2020-01-01T00:00:00Z");
        assert_eq!(cert.alt_names(), vec!["a.zz", "192.0.2.1"]);
        assert_eq!(cert.signature_algorithm().label(), "SHA256-RSA");
        assert_eq!(cert.extensions().len(), 1);

        let PublicKey::Rsa(key) = cert.public_key() else {
            panic!("expected an RSA key");
        };
        assert_eq!(key.modulus(), &BigUint::from(3233u32));
        assert_eq!(key.exponent(), 65537);

        let expected = Sha1::digest(&der);
        assert_eq!(cert.fingerprint().as_slice(), expected.as_slice());
    }

    #[test]
    fn test_from_der_v1_defaults() {
        let cert = Certificate::from_der(&certificate_der(tbs(None, vec![]), sha256_rsa())).unwrap();
        assert_eq!(cert.version(), Version::V1);
        assert!(cert.alt_names().is_empty());
        assert!(cert.extensions().is_empty());
    }

    #[test]
    fn test_unique_ids() {
        let der = certificate_der(
            tbs(
                Some(1),
                vec![
                    Element::ContextSpecific {
                        slot: 1,
                        constructed: false,
                        element: Box::new(Element::OctetString(OctetString::from(vec![0x00, 0xab]))),
                    },
                ],
            ),
            sha256_rsa(),
        );
        let cert = Certificate::from_der(&der).unwrap();
        let issuer_id = cert.tbs_certificate().issuer_unique_id().unwrap();
        assert_eq!(issuer_id.as_bytes(), &[0xab]);
        assert!(cert.tbs_certificate().subject_unique_id().is_none());
    }

    #[rstest]
    #[case::extensions_in_v1(tbs(None, vec![explicit(3, Element::Sequence(vec![san_extension()]))]))]
    #[case::extensions_in_v2(tbs(Some(1), vec![explicit(3, Element::Sequence(vec![san_extension()]))]))]
    #[case::trailing_garbage(tbs(Some(2), vec![Element::Null]))]
    #[case::missing_subject_key(Element::Sequence(vec![Element::Integer(Integer::from(1))]))]
    fn test_invalid_tbs(#[case] tbs: Element) {
        let result = Certificate::from_der(&certificate_der(tbs, sha256_rsa()));
        assert!(matches!(result, Err(Error::InvalidTbsCertificate(_))));
    }

    #[test]
    fn test_signature_algorithm_mismatch() {
        let outer = AlgorithmIdentifier::new(oid(AlgorithmIdentifier::OID_ECDSA_WITH_SHA256));
        let result = Certificate::from_der(&certificate_der(tbs(Some(2), vec![]), outer));
        assert!(matches!(result, Err(Error::InvalidCertificate(_))));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut der = certificate_der(tbs(Some(2), vec![]), sha256_rsa());
        der.extend([0x05, 0x00]);
        assert!(matches!(
            Certificate::from_der(&der),
            Err(Error::InvalidCertificate(_))
        ));
    }

    #[test]
    fn test_unsupported_key_algorithm() {
        let spki = SubjectPublicKeyInfo::new(
            AlgorithmIdentifier::new(oid(AlgorithmIdentifier::OID_ED25519)),
            BitString::new(0, vec![0u8; 32]),
        )
        .encode()
        .unwrap();
        let Element::Sequence(mut fields) = tbs(Some(2), vec![]) else {
            unreachable!();
        };
        fields[6] = spki;
        let result = Certificate::from_der(&certificate_der(Element::Sequence(fields), sha256_rsa()));
        assert!(matches!(
            result,
            Err(Error::Key(sigil_pkcs::Error::UnsupportedAlgorithm(_)))
        ));
    }

    #[test]
    fn test_pem_label() {
        let der = certificate_der(tbs(Some(2), vec![]), sha256_rsa());
        let cert: Certificate = Pem::from_bytes(Label::Certificate, &der).decode().unwrap();
        assert_eq!(cert.version(), Version::V3);

        let result: Result<Certificate> = Pem::from_bytes(Label::PublicKey, &der).decode();
        assert!(matches!(result, Err(Error::UnexpectedLabel(Label::PublicKey))));
    }

    #[test]
    fn test_serialize() {
        let der = certificate_der(
            tbs(Some(2), vec![explicit(3, Element::Sequence(vec![san_extension()]))]),
            sha256_rsa(),
        );
        let cert = Certificate::from_der(&der).unwrap();
        let json = serde_json::to_value(&cert).unwrap();
        assert_eq!(json["version"], 3);
        assert_eq!(json["serialNumber"], "1234");
        assert_eq!(json["subject"]["commonName"], "subject.zz");
        assert_eq!(json["notBefore"], "2019-01-01T00:00:00Z");
        assert_eq!(json["altNames"], serde_json::json!(["a.zz", "192.0.2.1"]));
        assert_eq!(json["signatureAlgorithm"], "SHA256-RSA");
        assert_eq!(json["fingerprint"].as_array().unwrap().len(), 20);
        assert_eq!(json["publicKey"]["algorithm"], "RSA");
    }
}
