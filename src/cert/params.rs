use bon::{Builder, bon};
use const_oid::ObjectIdentifier;
use der::Tag;
use der::asn1::SetOfVec;
use time::{Duration, OffsetDateTime};
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::name::{RdnSequence, RelativeDistinguishedName};
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use super::extensions::{FlagSet, KeyUsages, ToAndFromX509Extension};
pub use crate::cert::extensions::ExtendedKeyUsageOption;
use crate::error::{CertGenError, Result};

/// Organization name used when none (or an empty one) is configured.
pub const DEFAULT_ORG_NAME: &str = "org";

/// Key size in bits used when none is configured.
pub const DEFAULT_KEY_SIZE: usize = 2048;

/// Number of days a certificate is valid for when no positive validity is configured.
pub const DEFAULT_CERT_VALIDITY_IN_DAYS: i64 = 1;

/// Settings for a certificate generation run.
///
/// Built once through [`GeneratorConfig::builder`] and read-only afterwards.
/// The builder substitutes defaults for anything left unset and also for
/// values that would produce a broken certificate: an empty organization or
/// a validity that is zero or negative.
///
/// ```
/// use certgen::cert::params::GeneratorConfig;
///
/// let config = GeneratorConfig::builder()
///     .org_name("acme-corp")
///     .validity(time::Duration::days(30))
///     .build();
/// assert_eq!(config.org_name(), "acme-corp");
/// assert_eq!(config.key_size(), 2048);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    org_name: String,
    key_size: usize,
    validity: Duration,
}

#[bon]
impl GeneratorConfig {
    #[builder]
    pub fn new(
        #[builder(into, default = DEFAULT_ORG_NAME.to_string())] org_name: String,
        #[builder(default = DEFAULT_KEY_SIZE)] key_size: usize,
        validity: Option<Duration>,
    ) -> Self {
        let org_name = if org_name.is_empty() {
            DEFAULT_ORG_NAME.to_string()
        } else {
            org_name
        };
        let validity = match validity {
            Some(v) if v.is_positive() => v,
            _ => default_validity(),
        };
        Self {
            org_name,
            key_size,
            validity,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GeneratorConfig {
    pub fn org_name(&self) -> &str {
        &self.org_name
    }

    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Always strictly positive.
    pub fn validity(&self) -> Duration {
        self.validity
    }
}

fn default_validity() -> Duration {
    Duration::days(DEFAULT_CERT_VALIDITY_IN_DAYS)
}

/// Converts a day count into a validity span.
///
/// Zero or negative counts mean "use the default". Counts too large to be
/// expressed as a span are rejected.
pub fn days_to_duration(days: i64) -> Result<Duration> {
    if days <= 0 {
        return Ok(default_validity());
    }
    days.checked_mul(SECONDS_PER_DAY)
        .map(Duration::seconds)
        .ok_or_else(|| {
            CertGenError::CertificateSigning(format!("validity of {days} days is out of range"))
        })
}

const SECONDS_PER_DAY: i64 = 86_400;

/// Distinguished name of a generated certificate.
///
/// Only the organization (O) attribute is emitted; there is no common name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistinguishedName {
    pub organization: String,
}

impl DistinguishedName {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
        }
    }

    /// Converts the distinguished name to an X.509-compatible format.
    ///
    /// The organization is encoded as a UTF8String so any name survives
    /// unescaped.
    pub fn as_x509_name(&self) -> Result<x509_cert::name::DistinguishedName> {
        let value = der::Any::new(Tag::Utf8String, self.organization.as_bytes())?;
        let attr = AttributeTypeAndValue {
            oid: const_oid::db::rfc4519::O,
            value,
        };
        let rdn = RelativeDistinguishedName(SetOfVec::try_from(vec![attr])?);
        Ok(RdnSequence(vec![rdn]))
    }

    /// Reads the organization back out of an X.509 name.
    ///
    /// Returns `None` when the name carries no organization attribute.
    pub fn from_x509_name(x509dn: &x509_cert::name::DistinguishedName) -> Option<Self> {
        x509dn
            .0
            .iter()
            .flat_map(|rdn| rdn.0.iter())
            .find(|attr| attr.oid == const_oid::db::rfc4519::O)
            .and_then(|attr| attr.value.decode_as::<String>().ok())
            .map(Self::new)
    }
}

/// Certificate validity period.
///
/// This struct represents the `notBefore` and `notAfter` fields in a certificate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

impl Validity {
    /// A window opening at `not_before` and lasting `duration`.
    ///
    /// Fails when the window would end past the last representable date.
    pub fn starting_at(not_before: OffsetDateTime, duration: Duration) -> Result<Self> {
        let not_after = not_before.checked_add(duration).ok_or_else(|| {
            CertGenError::CertificateSigning(format!(
                "validity of {duration} starting at {not_before} ends out of range"
            ))
        })?;
        Ok(Self {
            not_before,
            not_after,
        })
    }
}

/// Everything the issuer needs to know about the certificate being requested.
#[derive(Clone, Debug, Builder)]
pub struct CertificationRequestInfo {
    pub subject: DistinguishedName,
    pub subject_public_key: SubjectPublicKeyInfoOwned,
    #[builder(default)]
    pub key_usages: FlagSet<KeyUsages>,
    #[builder(default)]
    pub usages: Vec<ExtendedKeyUsageOption>,
    /// Caller-supplied extensions, emitted ahead of the standard ones.
    #[builder(default)]
    pub extensions: Vec<ExtensionParam>,
}

/// Represents an X.509 extension.
///
/// This struct contains the OID, criticality, and value of an extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionParam {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    /// DER-encoded extension value
    pub value: Vec<u8>,
}

impl ExtensionParam {
    /// Creates an `ExtensionParam` from a specific extension.
    pub fn from_extension<E: ToAndFromX509Extension>(extension: &E, critical: bool) -> Result<Self> {
        Ok(Self {
            oid: E::OID,
            critical,
            value: extension.to_x509_extension_value()?,
        })
    }
}
