//! Self-signed TLS identity provisioning.
//!
//! Secure-mode startup materializes a fresh ECDSA P-256 key pair and a
//! self-signed X.509 certificate as two PEM files under the configured
//! certificate directory, then hands both paths to the server for loading.
//! The pair is regenerated on every secure startup, overwriting whatever is
//! already at the target paths; there is no renewal or reuse of existing
//! material.
//!
//! Any failure here is fatal to startup: the server must not come up in
//! secure mode with a partial or missing identity, and it never falls back
//! to plain HTTP.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rcgen::{
    CertificateParams, DistinguishedName, DnType, ExtendedKeyUsagePurpose, IsCa, KeyPair,
    KeyUsagePurpose, PKCS_ECDSA_P256_SHA256,
};
use time::{Duration, OffsetDateTime};

/// Certificate file name under the certificate directory
pub const CERT_FILE: &str = "cert.pem";

/// Private key file name under the certificate directory
pub const KEY_FILE: &str = "key.pem";

/// Certificate validity in days, starting at generation time
const VALIDITY_DAYS: i64 = 365;

/// Placeholder subject organization for the self-signed certificate
const SUBJECT_ORG: &str = "Vestibule";

/// Paths to the provisioned certificate and private key, ready for the
/// TLS acceptor to load.
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Provisioning error. Both variants abort secure-mode startup.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Failed to write certificate material: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to generate certificate: {0}")]
    Crypto(#[from] rcgen::Error),
}

/// Generate a self-signed server certificate into `cert_dir`.
///
/// Creates the directory if missing, then writes `cert.pem` and `key.pem`,
/// the key readable by the owner only. Key material is generated before any
/// filesystem work, so a directory that cannot be created leaves no partial
/// artifacts behind.
pub fn provision(cert_dir: &Path) -> Result<ServerIdentity, ProvisionError> {
    let key_pair = KeyPair::generate_for(&PKCS_ECDSA_P256_SHA256)?;

    let not_before = OffsetDateTime::now_utc();
    let not_after = not_before + Duration::days(VALIDITY_DAYS);

    // rcgen fills in a random serial when none is set.
    let mut params = CertificateParams::new(Vec::<String>::new())?;
    let mut dn = DistinguishedName::new();
    dn.push(DnType::OrganizationName, SUBJECT_ORG);
    params.distinguished_name = dn;
    params.not_before = not_before;
    params.not_after = not_after;
    params.key_usages = vec![
        KeyUsagePurpose::DigitalSignature,
        KeyUsagePurpose::KeyEncipherment,
    ];
    params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];
    params.is_ca = IsCa::ExplicitNoCa;

    let cert = params.self_signed(&key_pair)?;

    fs::create_dir_all(cert_dir)?;

    let cert_path = cert_dir.join(CERT_FILE);
    let key_path = cert_dir.join(KEY_FILE);

    fs::write(&cert_path, cert.pem())?;
    write_private_key(&key_path, &key_pair.serialize_pem())?;

    Ok(ServerIdentity {
        cert_path,
        key_path,
    })
}

/// Write the private key PEM with owner-only permissions.
#[cfg(unix)]
fn write_private_key(path: &Path, pem: &str) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(pem.as_bytes())
}

#[cfg(not(unix))]
fn write_private_key(path: &Path, pem: &str) -> std::io::Result<()> {
    fs::write(path, pem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use x509_parser::prelude::*;

    fn parse_cert(pem_bytes: &[u8]) -> x509_parser::pem::Pem {
        let (_, pem) = x509_parser::pem::parse_x509_pem(pem_bytes)
            .expect("certificate file should be valid PEM");
        pem
    }

    #[test]
    fn provision_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let identity = provision(dir.path()).expect("provisioning should succeed");

        assert_eq!(identity.cert_path, dir.path().join(CERT_FILE));
        assert_eq!(identity.key_path, dir.path().join(KEY_FILE));
        assert!(identity.cert_path.is_file());
        assert!(identity.key_path.is_file());
    }

    #[test]
    fn provision_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state").join("certs");
        let identity = provision(&nested).expect("provisioning should succeed");
        assert!(identity.cert_path.is_file());
        assert!(identity.key_path.is_file());
    }

    #[test]
    fn certificate_is_valid_for_exactly_365_days() {
        let dir = tempfile::tempdir().unwrap();
        let identity = provision(dir.path()).unwrap();

        let pem_bytes = fs::read(&identity.cert_path).unwrap();
        let pem = parse_cert(&pem_bytes);
        let cert = pem.parse_x509().expect("file should parse as X.509");

        let validity = cert.validity();
        let span = validity.not_after.timestamp() - validity.not_before.timestamp();
        assert_eq!(span, VALIDITY_DAYS * 86400);
    }

    #[test]
    fn certificate_public_key_matches_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let identity = provision(dir.path()).unwrap();

        let pem_bytes = fs::read(&identity.cert_path).unwrap();
        let pem = parse_cert(&pem_bytes);
        let cert = pem.parse_x509().unwrap();

        let key_pem = fs::read_to_string(&identity.key_path).unwrap();
        let key_pair = KeyPair::from_pem(&key_pem).expect("key file should parse");

        // Raw SEC1 point from the certificate SPKI vs the key pair's public key
        let cert_key = cert.public_key().subject_public_key.as_ref();
        assert_eq!(cert_key, key_pair.public_key_raw());
    }

    #[test]
    fn certificate_has_server_usage_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let identity = provision(dir.path()).unwrap();

        let pem_bytes = fs::read(&identity.cert_path).unwrap();
        let pem = parse_cert(&pem_bytes);
        let cert = pem.parse_x509().unwrap();

        let key_usage = cert
            .key_usage()
            .expect("key usage should parse")
            .expect("key usage should be present");
        assert!(key_usage.value.digital_signature());
        assert!(key_usage.value.key_encipherment());

        let eku = cert
            .extended_key_usage()
            .expect("extended key usage should parse")
            .expect("extended key usage should be present");
        assert!(eku.value.server_auth);

        let constraints = cert
            .basic_constraints()
            .expect("basic constraints should parse")
            .expect("basic constraints should be present");
        assert!(!constraints.value.ca);
    }

    #[test]
    fn certificate_is_self_signed() {
        let dir = tempfile::tempdir().unwrap();
        let identity = provision(dir.path()).unwrap();

        let pem_bytes = fs::read(&identity.cert_path).unwrap();
        let pem = parse_cert(&pem_bytes);
        let cert = pem.parse_x509().unwrap();

        assert_eq!(cert.issuer(), cert.subject());
        cert.verify_signature(None)
            .expect("certificate should verify against its own key");
    }

    #[cfg(unix)]
    #[test]
    fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let identity = provision(dir.path()).unwrap();

        let mode = fs::metadata(&identity.key_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn provision_overwrites_existing_material() {
        let dir = tempfile::tempdir().unwrap();
        let first = provision(dir.path()).unwrap();
        let first_cert = fs::read(&first.cert_path).unwrap();

        let second = provision(dir.path()).unwrap();
        let second_cert = fs::read(&second.cert_path).unwrap();

        // Fresh key pair each run, so the certificates must differ
        assert_ne!(first_cert, second_cert);
    }

    #[test]
    fn uncreatable_directory_fails_without_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let target = blocker.join("certs");
        let err = provision(&target).expect_err("provisioning should fail");
        assert!(matches!(err, ProvisionError::Io(_)));
        assert!(!target.exists());
    }
}
