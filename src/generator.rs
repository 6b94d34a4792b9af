use rand_core::{CryptoRngCore, OsRng};
use time::OffsetDateTime;

use crate::cert::params::{GeneratorConfig, Validity};
use crate::cert::{Certificate, build_self_signed};
use crate::error::Result;
use crate::key::KeyPair;
use crate::pem_utils::{self, PemLabel};

/// Generates self-signed TLS certificates.
///
/// A `Generator` only holds its configuration, so a single instance can be
/// shared across threads. Every call creates its own key and serial number.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a self-signed TLS certificate with a newly created private
    /// key, valid from now, drawing all randomness from the OS.
    pub fn new_tls(&self) -> Result<Certificate> {
        self.new_tls_with_rng(&mut OsRng, OffsetDateTime::now_utc())
    }

    /// Generates a certificate valid from `now` using the caller's CSPRNG.
    ///
    /// Key generation, certificate building and PEM encoding run in that
    /// order; the first failure is returned and nothing else is produced.
    /// `now` is truncated to whole seconds.
    pub fn new_tls_with_rng<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        now: OffsetDateTime,
    ) -> Result<Certificate> {
        // X.509 times carry whole seconds; the record must match the certificate.
        let now = now.replace_nanosecond(0).unwrap_or(now);

        let key = KeyPair::generate_rsa(rng, self.config.key_size())?;
        let cert_der = build_self_signed(rng, &key, &self.config, now)?;

        let cert_pem = pem_utils::to_pem(PemLabel::Certificate.as_str(), &cert_der)?;
        let private_key_pem = key.to_pkcs1_pem()?;

        let validity = Validity::starting_at(now, self.config.validity())?;
        tracing::info!(
            org = self.config.org_name(),
            bits = self.config.key_size(),
            not_after = %validity.not_after,
            "generated self-signed certificate"
        );

        Ok(Certificate::new(
            self.config.org_name().to_string(),
            cert_pem,
            private_key_pem,
            validity,
        ))
    }
}
