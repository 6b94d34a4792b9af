pub mod extensions;
pub mod params;

use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use x509_cert::spki::AlgorithmIdentifierOwned;

use crate::error::Result;
use crate::issuer::{Issuer, SelfIssuer};
use crate::key::KeyPair;
use crate::pem_utils;
use extensions::KeyUsage;
use params::{
    CertificationRequestInfo, DistinguishedName, ExtendedKeyUsageOption, GeneratorConfig, Validity,
};

/// Number of random bytes in a generated serial number.
pub const SERIAL_NUMBER_LEN: usize = 16;

/// sha256WithRSAEncryption, with the explicit NULL parameters RFC 4055 requires.
pub fn signature_algorithm() -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid: const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION,
        parameters: Some(der::AnyRef::NULL.into()),
    }
}

/// Draws a fresh serial number from `rng`.
///
/// The leading byte has its top bit cleared and its next bit set, so the
/// value is a positive INTEGER with a minimal DER encoding and is never zero.
pub fn random_serial<R: CryptoRngCore>(rng: &mut R) -> Vec<u8> {
    let mut serial = vec![0u8; SERIAL_NUMBER_LEN];
    rng.fill_bytes(&mut serial);
    serial[0] = (serial[0] & 0x7f) | 0x40;
    serial
}

/// Builds a self-signed TLS server certificate for `key` and returns it as DER.
///
/// Subject and issuer are both `O=<org name>`. The certificate is valid from
/// `now` for the configured validity and is marked for TLS server
/// authentication only.
pub fn build_self_signed<R: CryptoRngCore>(
    rng: &mut R,
    key: &KeyPair,
    config: &GeneratorConfig,
    now: OffsetDateTime,
) -> Result<Vec<u8>> {
    let subject = DistinguishedName::new(config.org_name());

    let cert_info = CertificationRequestInfo::builder()
        .subject(subject.clone())
        .subject_public_key(key.as_spki()?)
        .key_usages(KeyUsage::tls_server().0)
        .usages(vec![ExtendedKeyUsageOption::ServerAuth])
        .build();

    let validity = Validity::starting_at(now, config.validity())?;

    SelfIssuer::new(subject, key).issue(rng, &cert_info, validity)
}

/// A generated certificate together with its private key.
///
/// Produced once per generation call and never modified afterwards; the
/// fields are only reachable through accessors. Serializes to the JSON shape
/// `{org_name, certificate, private_key, not_before, not_after}` with RFC 3339
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    org_name: String,
    #[serde(rename = "certificate")]
    cert_pem: String,
    #[serde(rename = "private_key")]
    private_key_pem: String,
    #[serde(with = "time::serde::rfc3339")]
    not_before: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    not_after: OffsetDateTime,
}

impl Certificate {
    pub(crate) fn new(
        org_name: String,
        cert_pem: String,
        private_key_pem: String,
        validity: Validity,
    ) -> Self {
        Self {
            org_name,
            cert_pem,
            private_key_pem,
            not_before: validity.not_before,
            not_after: validity.not_after,
        }
    }

    pub fn org_name(&self) -> &str {
        &self.org_name
    }

    /// The certificate as a `CERTIFICATE` PEM block.
    pub fn cert_pem(&self) -> &str {
        &self.cert_pem
    }

    /// The private key as an `RSA PRIVATE KEY` (PKCS#1) PEM block.
    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }

    pub fn not_before(&self) -> OffsetDateTime {
        self.not_before
    }

    pub fn not_after(&self) -> OffsetDateTime {
        self.not_after
    }

    /// Decodes [`Certificate::cert_pem`] back to DER.
    pub fn cert_der(&self) -> Result<Vec<u8>> {
        let (_, der) = pem_utils::from_pem(&self.cert_pem)?;
        Ok(der)
    }

    /// Big-endian bytes of the certificate's serial number.
    pub fn serial_number(&self) -> Result<Vec<u8>> {
        use der::Decode;
        let cert = x509_cert::Certificate::from_der(&self.cert_der()?)
            .map_err(|e| crate::error::CertGenError::Decoding(e.to_string()))?;
        Ok(cert.tbs_certificate.serial_number.as_bytes().to_vec())
    }
}
