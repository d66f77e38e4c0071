use fastcrypto::{dispatch, ErrorKind};
use serde_json::{json, Value};

fn result_str(value: &Value) -> &str {
    value
        .get("result")
        .and_then(Value::as_str)
        .expect("result string")
}

#[test]
fn scrypt_matches_rfc_vector() {
    let params = json!({
        "password": "password",
        "salt": "NaCl",
        "n": 1024,
        "r": 8,
        "p": 16,
        "size": 64,
    });
    let out = dispatch("scrypt", &params).expect("scrypt");
    let expected = fastcrypto_encoding::hex::decode(
        "fdbabe1c9d3472007856e7190d01e9fe7c6ad7cbc8237830e77376634b373162\
         2eaf30d92e22a3886ff109279d9830dac727afb94a83ee6d8360cbdfa2cc0640",
    )
    .unwrap();
    assert_eq!(
        result_str(&out),
        fastcrypto_encoding::b64::encode(&expected)
    );
}

#[test]
fn scrypt_is_deterministic() {
    let params = json!({
        "password": "determinism",
        "salt": "check",
        "n": 1024,
        "r": 4,
        "p": 1,
        "size": 32,
    });
    let first = dispatch("scrypt", &params).expect("scrypt");
    let second = dispatch("scrypt", &params).expect("scrypt");
    assert_eq!(first, second);
}

#[test]
fn scrypt_rejects_bad_cost() {
    let params = json!({
        "password": "p",
        "salt": "s",
        "n": 1000,
        "r": 8,
        "p": 1,
        "size": 32,
    });
    let err = dispatch("scrypt", &params).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParameter);
}

#[test]
fn pbkdf2_accepts_base64_and_hex() {
    // PBKDF2-HMAC-SHA512("password", "salt", 1, 64); the password arrives
    // base64-coded, the salt in both encodings.
    let expected = "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252\
                    c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce";
    let expected = fastcrypto_encoding::hex::decode(expected).unwrap();
    let expected = fastcrypto_encoding::b64::encode(&expected);

    let base64_salt = json!({
        "password": "cGFzc3dvcmQ=",
        "salt": "c2FsdA==",
        "iterations": 1,
        "size": 64,
    });
    let out = dispatch("pbkdf2Sha512", &base64_salt).expect("pbkdf2");
    assert_eq!(result_str(&out), expected);

    let hex_salt = json!({
        "password": "cGFzc3dvcmQ=",
        "salt": "73616c74",
        "iterations": 1,
        "size": 64,
    });
    let out = dispatch("pbkdf2Sha512", &hex_salt).expect("pbkdf2");
    assert_eq!(result_str(&out), expected);
}

#[test]
fn pbkdf2_rejects_zero_iterations() {
    let params = json!({
        "password": "cGFzc3dvcmQ=",
        "salt": "c2FsdA==",
        "iterations": 0,
        "size": 64,
    });
    let err = dispatch("pbkdf2Sha512", &params).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParameter);
}

#[test]
fn pubkey_create_fixture() {
    let params = json!({
        "private_key_hex": "0d5a06c12ed605cdcd809b88f3299efda6bcb46f3c844d7003d7c9926adfa010",
        "compressed": true,
    });
    let out = dispatch("secp256k1EcPubkeyCreate", &params).expect("derive");
    assert_eq!(
        result_str(&out),
        "0360d95711e2135138641efd5cc09155ceba79c3f00f7babc98a070e17ad12d51c"
    );
}

#[test]
fn pubkey_create_uncompressed() {
    let params = json!({
        "private_key_hex": "0000000000000000000000000000000000000000000000000000000000000001",
        "compressed": false,
    });
    let out = dispatch("secp256k1EcPubkeyCreate", &params).expect("derive");
    let result = result_str(&out);
    assert_eq!(result.len(), 130);
    assert!(result.starts_with("04"));
}

#[test]
fn privkey_tweak_add_fixture() {
    let params = json!({
        "private_key_hex": "0d5a06c12ed605cdcd809b88f3299efda6bcb46f3c844d7003d7c9926adfa010",
        "tweak_hex": "a0f24d30c336181342c875be8e1df4c29e25278282f7add9142c71c76c316c8a",
    });
    let out = dispatch("secp256k1EcPrivkeyTweakAdd", &params).expect("tweak");
    assert_eq!(
        result_str(&out),
        "ae4c53f1f20c1de110491147814793c044e1dbf1bf7bfb4918043b59d7110c9a"
    );
}

#[test]
fn pubkey_tweak_add_fixture() {
    let params = json!({
        "public_key_hex": "0215a94b717775b487330c47db0324df661f66759af7435e54567f99371cda79e8",
        "tweak_hex": "ce547fb348b6d058c8c6190b781f98811cd77db75943fe681732ff8cafb4bb8d",
        "compressed": true,
    });
    let out = dispatch("secp256k1EcPubkeyTweakAdd", &params).expect("tweak");
    assert_eq!(
        result_str(&out),
        "02e9b81c787fbc927e155e4d92689ef67b271cf15465b84989d79447533cd83d40"
    );
}

#[test]
fn zero_private_key_is_invalid_scalar() {
    let params = json!({
        "private_key_hex": "0000000000000000000000000000000000000000000000000000000000000000",
        "compressed": true,
    });
    let err = dispatch("secp256k1EcPubkeyCreate", &params).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidScalar);
}

#[test]
fn tweak_to_zero_is_invalid_result() {
    let params = json!({
        "private_key_hex": "0000000000000000000000000000000000000000000000000000000000000001",
        "tweak_hex": "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140",
    });
    let err = dispatch("secp256k1EcPrivkeyTweakAdd", &params).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidResult);
}

#[test]
fn garbage_public_key_is_invalid_parameter() {
    let params = json!({
        "public_key_hex": "00000000000000000000000000000000000000000000000000000000000000000000",
        "tweak_hex": "0000000000000000000000000000000000000000000000000000000000000001",
        "compressed": true,
    });
    let err = dispatch("secp256k1EcPubkeyTweakAdd", &params).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParameter);
}

#[test]
fn missing_parameter_names_the_field() {
    let err = dispatch("scrypt", &json!({ "salt": "s" })).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParameter);
    assert!(err.message.contains("password"), "message: {}", err.message);
}

#[test]
fn unknown_method_is_unsupported() {
    let err = dispatch("generate_key_image", &json!({})).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedMethod);
    assert!(err.message.contains("generate_key_image"));
}

#[test]
fn error_json_shape() {
    let err = dispatch("nope", &json!({})).unwrap_err();
    let value = err.to_json();
    assert_eq!(
        value.get("error").and_then(|e| e.get("kind")),
        Some(&json!("UnsupportedMethod"))
    );
    assert!(value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .is_some());
}
