//! Tests for TLS acceptor loading

use fake_jenkins::server::tls::load_acceptor;
use std::path::PathBuf;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("fake-jenkins-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_missing_certificate_file() {
    let key = temp_file("missing-cert.key", "");
    let err = load_acceptor(&PathBuf::from("/nonexistent/server.crt"), &key)
        .err()
        .unwrap();

    assert!(err.to_string().contains("Failed to read certificate"));
}

#[test]
fn test_missing_key_file() {
    let cert = temp_file("missing-key.crt", "");
    let err = load_acceptor(&cert, &PathBuf::from("/nonexistent/server.key"))
        .err()
        .unwrap();

    assert!(err.to_string().contains("Failed to read key"));
}

#[test]
fn test_certificate_file_without_certificates() {
    let cert = temp_file("empty.crt", "not a pem file\n");
    let key = temp_file("empty.key", "");

    let err = load_acceptor(&cert, &key).err().unwrap();
    assert!(err.to_string().contains("No certificate found"));
}

#[test]
fn test_key_file_without_private_key() {
    // Structurally valid PEM framing is enough to get past certificate parsing
    let cert = temp_file(
        "framed.crt",
        "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n",
    );
    let key = temp_file("nokey.key", "nothing here\n");

    let err = load_acceptor(&cert, &key).err().unwrap();
    assert!(err.to_string().contains("No private key found"));
}
