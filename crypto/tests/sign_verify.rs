use std::path::PathBuf;

use rstest::rstest;
use sigil_crypto::{Encoding, ErrorKind, PrivateKey, PublicKey, SigningOptions};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

fn key_pair(name: &str) -> (PrivateKey, PublicKey) {
    let private_key = sigil_crypto::parse_private_key(&fixture(name), None).unwrap();
    let public_key = private_key.public_key();
    (private_key, public_key)
}

const MESSAGE: &str = "They know, get out now!";

#[rstest]
#[case::rsa_pkcs1v15_sha256("rsaPrivateKeyClear.pem", "sha256", vec![])]
#[case::rsa_pkcs1v15_md5("rsaPrivateKeyClear.pem", "md5", vec![])]
#[case::rsa_pkcs1v15_sha1("rsaPrivateKeyClear.pem", "sha1", vec![("type", "pkcs1v15")])]
#[case::rsa_pkcs1v15_sha512("rsaPrivateKeyClear.pem", "sha512", vec![])]
#[case::rsa_pss_default_salt("rsaPrivateKeyClear.pem", "sha256", vec![("type", "pss")])]
#[case::rsa_pss_salt("rsaPrivateKeyClear.pem", "sha384", vec![("type", "pss"), ("saltLength", "20")])]
#[case::dsa_sha256("dsaPrivateKey.pem", "sha256", vec![])]
#[case::dsa_sha1("dsaPrivateKey.pem", "sha1", vec![])]
#[case::dsa_sha512("dsaPrivateKey.pem", "sha512", vec![])]
#[case::ecdsa_sha256("ecdsaPrivateKey.pem", "sha256", vec![])]
#[case::ecdsa_sha1("ecdsaPrivateKey.pem", "sha1", vec![])]
#[case::ecdsa_sha512("ecdsaPrivateKey.pem", "sha512", vec![])]
#[case::ecdsa_p256_sha256("ecdsaP256PrivateKey.pem", "sha256", vec![])]
#[case::ecdsa_p256_sha384("ecdsaP256PrivateKey.pem", "sha384", vec![])]
#[case::ecdsa_p256_sha1("ecdsaP256PrivateKey.pem", "sha1", vec![])]
#[case::ecdsa_p384_sha384("ecdsaP384PrivateKey.pem", "sha384", vec![])]
#[case::ecdsa_p384_sha256("ecdsaP384PrivateKey.pem", "sha256", vec![])]
#[case::ecdsa_p384_sha512("ecdsaP384PrivateKey.pem", "sha512", vec![])]
fn test_sign_then_verify(
    #[case] key: &str,
    #[case] digest: &str,
    #[case] options: Vec<(&str, &str)>,
) {
    let (private_key, public_key) = key_pair(key);
    let options = SigningOptions::from_pairs(options).unwrap();

    let signature =
        sigil_crypto::sign_string(&private_key, digest, MESSAGE, Encoding::Hex, &options).unwrap();
    assert!(
        sigil_crypto::verify_string(&public_key, digest, MESSAGE, signature.clone(), &options)
            .unwrap()
    );

    let mut altered = MESSAGE.as_bytes().to_vec();
    altered[0] ^= 0x01;
    assert!(
        !sigil_crypto::verify(&public_key, digest, altered, signature, &options).unwrap()
    );
}

#[rstest]
#[case(Encoding::Auto)]
#[case(Encoding::Binary)]
#[case(Encoding::Hex)]
#[case(Encoding::Base64)]
fn test_signature_output_encoding(#[case] encoding: Encoding) {
    let (private_key, public_key) = key_pair("ecdsaPrivateKey.pem");
    let options = SigningOptions::default();

    let signature =
        sigil_crypto::sign(&private_key, "sha256", b"payload", encoding, &options).unwrap();
    match encoding {
        Encoding::Auto | Encoding::Binary => assert!(signature.as_text().is_none()),
        Encoding::Hex | Encoding::Base64 => assert!(signature.as_text().is_some()),
    }
    assert!(sigil_crypto::verify(&public_key, "sha256", b"payload", signature, &options).unwrap());
}

#[test]
fn test_plaintext_auto_detect() {
    let (private_key, public_key) = key_pair("rsaPrivateKeyClear.pem");
    let options = SigningOptions::default();

    // "deadbeef" is signed as the four bytes it spells in hex
    let signature =
        sigil_crypto::sign(&private_key, "sha256", "deadbeef", Encoding::Auto, &options).unwrap();
    let bytes = [0xdeu8, 0xad, 0xbe, 0xef];
    assert!(
        sigil_crypto::verify(&public_key, "sha256", &bytes, signature.clone(), &options).unwrap()
    );
    assert!(
        !sigil_crypto::verify_string(&public_key, "sha256", "deadbeef", signature, &options)
            .unwrap()
    );
}

#[test]
fn test_padding_mismatch_is_false() {
    let (private_key, public_key) = key_pair("rsaPrivateKeyClear.pem");
    let pss = SigningOptions::pss(0);

    let signature =
        sigil_crypto::sign_string(&private_key, "sha256", MESSAGE, Encoding::Auto, &pss).unwrap();
    let valid = sigil_crypto::verify_string(
        &public_key,
        "sha256",
        MESSAGE,
        signature,
        &SigningOptions::default(),
    )
    .unwrap();
    assert!(!valid);
}

#[test]
fn test_digest_mismatch_is_false() {
    let (private_key, public_key) = key_pair("dsaPrivateKey.pem");
    let options = SigningOptions::default();

    let signature =
        sigil_crypto::sign_string(&private_key, "sha256", MESSAGE, Encoding::Auto, &options)
            .unwrap();
    assert!(
        !sigil_crypto::verify_string(&public_key, "sha384", MESSAGE, signature, &options).unwrap()
    );
}

#[test]
fn test_corrupt_rsa_signature_is_false() {
    let (_, public_key) = key_pair("rsaPrivateKeyClear.pem");
    let valid = sigil_crypto::verify_string(
        &public_key,
        "sha256",
        MESSAGE,
        "deadbeef",
        &SigningOptions::default(),
    )
    .unwrap();
    assert!(!valid);
}

#[rstest]
#[case("dsaPrivateKey.pem")]
#[case("ecdsaPrivateKey.pem")]
fn test_malformed_dss_signature(#[case] key: &str) {
    let (_, public_key) = key_pair(key);
    let err = sigil_crypto::verify_string(
        &public_key,
        "sha256",
        MESSAGE,
        "deadbeef",
        &SigningOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedSignatureEncoding);
}

#[test]
fn test_unsupported_digest() {
    let (private_key, public_key) = key_pair("rsaPrivateKeyClear.pem");
    let options = SigningOptions::default();

    let err = sigil_crypto::sign_string(&private_key, "sha3", MESSAGE, Encoding::Auto, &options)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedDigest);

    // the digest name is checked before the signature is decoded
    let err = sigil_crypto::verify_string(&public_key, "sha3", MESSAGE, "!!", &options)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedDigest);

    let err = sigil_crypto::create_sign("whirlpool", options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedDigest);
}

#[rstest]
#[case("dsaPrivateKey.pem")]
#[case("ecdsaPrivateKey.pem")]
fn test_padding_options_rejected_for_dss(#[case] key: &str) {
    let (private_key, _) = key_pair(key);
    let err = sigil_crypto::sign_string(
        &private_key,
        "sha256",
        MESSAGE,
        Encoding::Auto,
        &SigningOptions::pss(0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOptions);
}

#[test]
fn test_unrecognized_plaintext() {
    let (private_key, _) = key_pair("rsaPrivateKeyClear.pem");
    let err = sigil_crypto::sign(
        &private_key,
        "sha256",
        "not an encoding!",
        Encoding::Auto,
        &SigningOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrecognizedEncoding);
}

#[test]
fn test_pss_salt_too_long() {
    let (private_key, _) = key_pair("rsaPrivateKeyClear.pem");
    let err = sigil_crypto::sign_string(
        &private_key,
        "sha512",
        MESSAGE,
        Encoding::Auto,
        &SigningOptions::pss(1024),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SigningFailed);
}

#[test]
fn test_pss_default_salt_is_digest_length() {
    let (private_key, public_key) = key_pair("rsaPrivateKeyClear.pem");

    // a 1024-bit modulus has room for a 64-byte salt only next to a shorter digest
    let err = sigil_crypto::sign_string(
        &private_key,
        "sha512",
        MESSAGE,
        Encoding::Auto,
        &SigningOptions::pss(0),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SigningFailed);

    let options = SigningOptions::pss(32);
    let signature =
        sigil_crypto::sign_string(&private_key, "sha512", MESSAGE, Encoding::Auto, &options)
            .unwrap();
    assert!(
        sigil_crypto::verify_string(&public_key, "sha512", MESSAGE, signature.clone(), &options)
            .unwrap()
    );
    assert!(
        !sigil_crypto::verify_string(
            &public_key,
            "sha512",
            MESSAGE,
            signature,
            &SigningOptions::pss(0),
        )
        .unwrap()
    );
}

#[rstest]
#[case::rsa("rsaPrivateKeyClear.pem", SigningOptions::default())]
#[case::rsa_pss("rsaPrivateKeyClear.pem", SigningOptions::pss(32))]
#[case::dsa("dsaPrivateKey.pem", SigningOptions::default())]
#[case::ecdsa("ecdsaPrivateKey.pem", SigningOptions::default())]
#[case::ecdsa_p256("ecdsaP256PrivateKey.pem", SigningOptions::default())]
#[case::ecdsa_p384("ecdsaP384PrivateKey.pem", SigningOptions::default())]
fn test_incremental_equivalence(#[case] key: &str, #[case] options: SigningOptions) {
    let (private_key, public_key) = key_pair(key);

    let mut whole = sigil_crypto::create_sign("sha256", options).unwrap();
    whole.update(MESSAGE.as_bytes(), Encoding::Binary).unwrap();
    let whole = whole.sign(&private_key, Encoding::Base64).unwrap();

    let mut chunked = sigil_crypto::create_sign("sha256", options).unwrap();
    for chunk in MESSAGE.as_bytes().chunks(5) {
        chunked.update(chunk, Encoding::Binary).unwrap();
    }
    let chunked = chunked.sign(&private_key, Encoding::Base64).unwrap();

    for signature in [whole, chunked] {
        assert!(
            sigil_crypto::verify_string(&public_key, "sha256", MESSAGE, signature.clone(), &options)
                .unwrap()
        );

        let mut verifier = sigil_crypto::create_verify("sha256", options).unwrap();
        let (head, tail) = MESSAGE.split_at(10);
        verifier.update(head.as_bytes(), Encoding::Binary).unwrap();
        verifier.update(hex::encode(tail), Encoding::Hex).unwrap();
        assert!(verifier.verify(&public_key, signature).unwrap());
    }
}

#[test]
fn test_incremental_finalize_is_repeatable() {
    let (private_key, public_key) = key_pair("ecdsaPrivateKey.pem");
    let options = SigningOptions::default();

    let mut signer = sigil_crypto::create_sign("sha384", options).unwrap();
    signer.update("They know, ".as_bytes(), Encoding::Binary).unwrap();
    let first = signer.sign(&private_key, Encoding::Auto).unwrap();
    signer.update("get out now!".as_bytes(), Encoding::Binary).unwrap();
    let second = signer.sign(&private_key, Encoding::Auto).unwrap();

    assert!(
        sigil_crypto::verify_string(&public_key, "sha384", "They know, ", first, &options).unwrap()
    );
    assert!(
        sigil_crypto::verify_string(&public_key, "sha384", MESSAGE, second.clone(), &options)
            .unwrap()
    );

    let mut verifier = sigil_crypto::create_verify("sha384", options).unwrap();
    verifier.update(MESSAGE.as_bytes(), Encoding::Binary).unwrap();
    assert!(verifier.verify(&public_key, second.clone()).unwrap());
    assert!(verifier.verify(&public_key, second.clone()).unwrap());
    verifier.update("!".as_bytes(), Encoding::Binary).unwrap();
    assert!(!verifier.verify(&public_key, second).unwrap());
}
