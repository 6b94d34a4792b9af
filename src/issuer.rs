use der::Encode;
use rand_core::CryptoRngCore;
use x509_cert::certificate::CertificateInner;

use crate::cert::extensions::{BasicConstraints, ExtendedKeyUsage, KeyUsage};
use crate::cert::params::{CertificationRequestInfo, DistinguishedName, ExtensionParam, Validity};
use crate::cert::{random_serial, signature_algorithm};
use crate::error::{CertGenError, Result};
use crate::key::KeyPair;
use crate::tbs_certificate::TbsCertificate;

/// Represents an entity capable of issuing certificates.
///
/// This trait provides methods to retrieve issuer details and issue certificates.
pub trait Issuer {
    /// Returns the distinguished name of the issuer.
    fn issuer_name(&self) -> &DistinguishedName;

    /// Returns the signing key of the issuer.
    fn signing_key(&self) -> &KeyPair;

    /// Issues a certificate for `cert_request` and returns it DER encoded.
    ///
    /// Serial number and signature blinding both draw from `rng`. On error
    /// nothing is returned; there is no partially built certificate.
    fn issue<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        cert_request: &CertificationRequestInfo,
        validity: Validity,
    ) -> Result<Vec<u8>> {
        // Never a CA.
        let basic_constraints = BasicConstraints {
            is_ca: false,
            max_path_length: None,
        };

        let mut extensions: Vec<ExtensionParam> =
            vec![ExtensionParam::from_extension(&basic_constraints, true)?];

        if !cert_request.key_usages.is_empty() {
            let key_usage = KeyUsage(cert_request.key_usages);
            extensions.push(ExtensionParam::from_extension(&key_usage, true)?);
        }

        if !cert_request.usages.is_empty() {
            let extended_key_usage = ExtendedKeyUsage {
                usage: cert_request.usages.clone(),
            };
            extensions.push(ExtensionParam::from_extension(&extended_key_usage, false)?);
        }

        let combined_extensions = cert_request
            .extensions
            .iter()
            .cloned()
            .chain(extensions)
            .collect();

        let serial_number = random_serial(rng);
        tracing::debug!(
            serial = %hex(&serial_number),
            not_before = %validity.not_before,
            not_after = %validity.not_after,
            "issuing certificate"
        );

        let tbs_cert = TbsCertificate {
            serial_number,
            signature_algorithm: signature_algorithm(),
            issuer: self.issuer_name().clone(),
            validity,
            subject: cert_request.subject.clone(),
            subject_public_key: cert_request.subject_public_key.clone(),
            extensions: combined_extensions,
        };

        let tbs_cert_inner = tbs_cert.to_tbs_certificate_inner()?;
        let signature = self.signing_key().sign_data(rng, &tbs_cert_inner.to_der()?)?;

        let cert_inner = CertificateInner {
            tbs_certificate: tbs_cert_inner,
            signature_algorithm: signature_algorithm(),
            signature: der::asn1::BitString::from_bytes(&signature)?,
        };

        cert_inner
            .to_der()
            .map_err(|e| CertGenError::CertificateSigning(e.to_string()))
    }
}

/// Issuer for self-signed certificates: the issuer name is the subject and
/// the signing key is the subject's own key.
pub struct SelfIssuer<'a> {
    name: DistinguishedName,
    key: &'a KeyPair,
}

impl<'a> SelfIssuer<'a> {
    pub fn new(name: DistinguishedName, key: &'a KeyPair) -> Self {
        Self { name, key }
    }
}

impl Issuer for SelfIssuer<'_> {
    fn issuer_name(&self) -> &DistinguishedName {
        &self.name
    }

    fn signing_key(&self) -> &KeyPair {
        self.key
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
