use std::path::PathBuf;

use rstest::rstest;
use sigil_crypto::{ErrorKind, PrivateKey, PublicKey};
use sigil_pkix_types::NamedCurve;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

const RSA_MODULUS: &str = concat!(
    "dff9ea47b4241c3e548db1763502af2da7599bd8675620d82a5c547db766d928",
    "ff8126cbaf62d193976afa0c7bec872d50504cfd948d0d244c2fb63a6499720d",
    "8d600c6d7e4a4477580f346b5075bea3e6781a2c8bf5debcd2ed7b535b62a0da",
    "e5f4801f188b7d19b86cb41795882f8ca8339f2341960733868abce1695c095b",
    "488546c38369b8bfc6b182bf4606259ffff46dee808a00c929574357a57604fd",
    "d11fb1010174400e1113d906754b18aeec818673f5e2cbde1171c5d78af163a9",
    "444df32474458f963cf54bc81ecf8d8b88237db8ffae1a069438fd7cf99ef975",
    "037e7c591b60d100cf98e9a65107fd9ba5601d481cac186846e5c96bc8a9dc23",
);

const FINGERPRINT: [u8; 20] = [
    85, 119, 3, 199, 150, 144, 202, 145, 178, 46, 205, 132, 37, 235, 251, 208, 139, 161, 143, 14,
];

#[test]
fn test_rsa_certificate_subject() {
    let cert = sigil_crypto::parse(&fixture("rsaCertificate.pem")).unwrap();

    for name in [cert.subject(), cert.issuer()] {
        assert_eq!(name.common_name(), Some("excouncil.zz"));
        assert_eq!(name.country(), Some("ZZ"));
        assert_eq!(name.state_or_province_name(), Some("Kopuncezis Krais"));
        assert_eq!(name.locality_name(), Some("Ashtinok"));
        assert_eq!(name.street_address(), Some("221B Baker Street"));
        assert_eq!(name.postal_code(), Some("99999"));
        assert_eq!(name.organization_name(), Some("Exumbran Convention"));
        assert_eq!(
            name.organizational_unit_name(),
            vec!["Exumbran Council", "Exumbran Janitorial Service"]
        );

        let oids: Vec<String> = name
            .names()
            .iter()
            .map(|attr| attr.attribute_type.to_string())
            .collect();
        assert_eq!(
            oids,
            vec![
                "2.5.4.6", "2.5.4.8", "2.5.4.7", "2.5.4.9", "2.5.4.17", "2.5.4.10", "2.5.4.11",
                "2.5.4.11", "2.5.4.3",
            ]
        );
    }
}

#[test]
fn test_rsa_certificate_fields() {
    let cert = sigil_crypto::parse(&fixture("rsaCertificate.pem")).unwrap();

    assert_eq!(cert.signature_algorithm().to_string(), "SHA256-RSA");
    assert_eq!(cert.version().number(), 3);
    assert_eq!(cert.serial_number().to_string(), "1234");
    assert_eq!(cert.fingerprint(), &FINGERPRINT);
    assert_eq!(
        cert.alt_names(),
        vec![
            "council.exumbran.zz",
            "about.excouncil.zz",
            "inquiries@excouncil.zz",
            "press@excouncil.zz",
            "192.0.2.0",
            "192.0.2.25",
            "http://press.excouncil.zz",
            "http://learning.excouncil.zz/index.html",
        ]
    );

    let json = serde_json::to_value(&cert).unwrap();
    assert_eq!(json["notBefore"], "2019-01-01T00:00:00Z");
    assert_eq!(json["notAfter"], "2020-01-01T00:00:00Z");
    assert_eq!(json["signatureAlgorithm"], "SHA256-RSA");
    assert_eq!(json["subject"]["names"].as_array().unwrap().len(), 9);
    assert_eq!(json["publicKey"]["algorithm"], "RSA");
}

#[test]
fn test_rsa_certificate_public_key() {
    let cert = sigil_crypto::parse(&fixture("rsaCertificate.pem")).unwrap();
    assert_eq!(cert.public_key().algorithm(), "RSA");

    let PublicKey::Rsa(key) = cert.public_key() else {
        panic!("expected an RSA key");
    };
    assert_eq!(key.exponent(), 65537);
    let modulus = key.modulus_bytes();
    assert_eq!(modulus.len(), 256);
    assert_eq!(hex::encode(&modulus), RSA_MODULUS);
}

#[test]
fn test_dsa_certificate() {
    let cert = sigil_crypto::parse(&fixture("dsaCertificate.pem")).unwrap();
    assert_eq!(cert.signature_algorithm().to_string(), "DSA-SHA256");

    let subject = cert.subject();
    assert_eq!(subject.common_name(), Some("excouncil.zz"));
    assert_eq!(subject.street_address(), None);
    assert_eq!(subject.postal_code(), None);

    let PublicKey::Dsa(key) = cert.public_key() else {
        panic!("expected a DSA key");
    };
    assert_eq!(key.parameters().p.bits(), 2048);
    assert_eq!(key.parameters().q.bits(), 256);
    assert!(key.y().bits() > 0);
}

#[test]
fn test_ecdsa_certificate() {
    let cert = sigil_crypto::parse(&fixture("ecdsaCertificate.pem")).unwrap();
    assert_eq!(cert.signature_algorithm().to_string(), "ECDSA-SHA256");
    assert_eq!(cert.alt_names().len(), 8);

    let PublicKey::Ecdsa(key) = cert.public_key() else {
        panic!("expected an ECDSA key");
    };
    assert_eq!(key.curve(), NamedCurve::Secp256r1);
    assert!(key.x().bits() > 0 && key.y().bits() > 0);
}

#[test]
fn test_projections_match_parse() {
    let pem = fixture("rsaCertificate.pem");
    let cert = sigil_crypto::parse(&pem).unwrap();
    assert_eq!(sigil_crypto::get_subject(&pem).unwrap(), cert.subject());
    assert_eq!(sigil_crypto::get_issuer(&pem).unwrap(), cert.issuer());
    assert_eq!(sigil_crypto::get_alt_names(&pem).unwrap(), cert.alt_names());
}

#[rstest]
#[case("rsaPublicKey.pem", "RSA")]
#[case("dsaPublicKey.pem", "DSA")]
#[case("ecdsaPublicKey.pem", "ECDSA")]
fn test_parse_public_key(#[case] name: &str, #[case] algorithm: &str) {
    let key = sigil_crypto::parse_public_key(&fixture(name)).unwrap();
    assert_eq!(key.algorithm(), algorithm);
}

#[test]
fn test_ecdsa_public_key_curve() {
    let key = sigil_crypto::parse_public_key(&fixture("ecdsaPublicKey.pem")).unwrap();
    let PublicKey::Ecdsa(key) = key else {
        panic!("expected an ECDSA key");
    };
    assert_eq!(key.curve(), NamedCurve::Secp521r1);

    let json = serde_json::to_value(PublicKey::Ecdsa(key)).unwrap();
    assert_eq!(json["key"]["curve"], "P-521");
}

#[rstest]
#[case("rsaPrivateKeyClear.pem", "rsaPublicKey.pem")]
#[case("dsaPrivateKey.pem", "dsaPublicKey.pem")]
#[case("ecdsaPrivateKey.pem", "ecdsaPublicKey.pem")]
#[case("ecdsaP256PrivateKey.pem", "ecdsaP256PublicKey.pem")]
#[case("ecdsaP384PrivateKey.pem", "ecdsaP384PublicKey.pem")]
fn test_private_key_matches_public_key(#[case] private: &str, #[case] public: &str) {
    let private_key = sigil_crypto::parse_private_key(&fixture(private), None).unwrap();
    let public_key = sigil_crypto::parse_public_key(&fixture(public)).unwrap();
    assert_eq!(private_key.public_key(), public_key);
}

#[test]
fn test_encrypted_private_key() {
    let clear = sigil_crypto::parse_private_key(&fixture("rsaPrivateKeyClear.pem"), None).unwrap();
    let encrypted = fixture("rsaPrivateKeyEncrypted.pem");

    let decrypted = sigil_crypto::parse_private_key(&encrypted, Some("1234")).unwrap();
    assert!(matches!(decrypted, PrivateKey::Rsa(_)));
    assert_eq!(decrypted, clear);

    let err = sigil_crypto::parse_private_key(&encrypted, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PasswordRequired);

    let err = sigil_crypto::parse_private_key(&encrypted, Some("4321")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decryption);
}

#[rstest]
#[case("ecdsaP256PublicKey.pem", NamedCurve::Secp256r1)]
#[case("ecdsaP384PublicKey.pem", NamedCurve::Secp384r1)]
#[case("ecdsaPublicKey.pem", NamedCurve::Secp521r1)]
fn test_public_key_curve(#[case] name: &str, #[case] curve: NamedCurve) {
    let PublicKey::Ecdsa(key) = sigil_crypto::parse_public_key(&fixture(name)).unwrap() else {
        panic!("expected an ECDSA key");
    };
    assert_eq!(key.curve(), curve);
}

#[rstest]
#[case::rsa_aes_128("rsaPrivateKeyAes128.pem", "rsaPrivateKeyClear.pem")]
#[case::ec_aes_256("ecdsaP256PrivateKeyEncrypted.pem", "ecdsaP256PrivateKey.pem")]
fn test_aes_encrypted_private_key(#[case] encrypted: &str, #[case] clear: &str) {
    let clear = sigil_crypto::parse_private_key(&fixture(clear), None).unwrap();
    let encrypted = fixture(encrypted);

    let decrypted = sigil_crypto::parse_private_key(&encrypted, Some("1234")).unwrap();
    assert_eq!(decrypted, clear);

    let err = sigil_crypto::parse_private_key(&encrypted, Some("bad")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decryption);

    let err = sigil_crypto::parse_private_key(&encrypted, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PasswordRequired);
}

#[test]
fn test_bad_pem() {
    let input = "bad-certificate";
    let kinds = [
        sigil_crypto::parse(input).map(|_| ()).unwrap_err().kind(),
        sigil_crypto::get_subject(input).map(|_| ()).unwrap_err().kind(),
        sigil_crypto::get_issuer(input).map(|_| ()).unwrap_err().kind(),
        sigil_crypto::get_alt_names(input).map(|_| ()).unwrap_err().kind(),
        sigil_crypto::parse_public_key(input).map(|_| ()).unwrap_err().kind(),
        sigil_crypto::parse_private_key(input, None).map(|_| ()).unwrap_err().kind(),
    ];
    assert!(kinds.iter().all(|kind| *kind == ErrorKind::PemDecode));
}

#[rstest]
#[case::key_as_certificate("rsaPublicKey.pem")]
#[case::private_key_as_certificate("rsaPrivateKeyClear.pem")]
fn test_wrong_label_for_certificate(#[case] name: &str) {
    let err = sigil_crypto::parse(&fixture(name)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CertificateParse);
}

#[test]
fn test_certificate_as_public_key() {
    let err = sigil_crypto::parse_public_key(&fixture("rsaCertificate.pem")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyParse);
}
