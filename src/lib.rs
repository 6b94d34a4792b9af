//! # certgen - Self-Signed TLS Certificates in Pure Rust
//!
//! certgen issues self-signed X.509 certificates for local and development
//! use. It generates an RSA key pair, self-signs a TLS server certificate
//! with it and hands back both as PEM, built entirely with RustCrypto
//! libraries and no OpenSSL or ring dependencies.
//!
//! ## What Gets Generated
//!
//! - **Key**: RSA, 2048 bits by default, exported as PKCS#1 (`RSA PRIVATE KEY`)
//! - **Subject and issuer**: `O=<organization>`, identical since the certificate is self-signed
//! - **Serial number**: 16 random bytes from the supplied CSPRNG
//! - **Validity**: from the moment of generation for a configurable span (1 day by default)
//! - **Extensions**: key usage (digital signature, key encipherment), extended
//!   key usage (TLS server authentication), basic constraints (not a CA)
//! - **Signature**: sha256WithRSAEncryption
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use certgen::{Generator, GeneratorConfig};
//!
//! # fn main() -> Result<(), certgen::error::CertGenError> {
//! let config = GeneratorConfig::builder()
//!     .org_name("acme-corp")
//!     .key_size(2048)
//!     .validity(time::Duration::days(7))
//!     .build();
//!
//! let cert = Generator::new(config).new_tls()?;
//! println!("{}", cert.cert_pem());
//! println!("{}", cert.private_key_pem());
//! # Ok(())
//! # }
//! ```
//!
//! ### Bringing Your Own Randomness
//!
//! All randomness (key material, serial number, signature blinding) comes
//! from the RNG handed to [`Generator::new_tls_with_rng`], which makes runs
//! reproducible in tests:
//!
//! ```rust,no_run
//! use certgen::{Generator, GeneratorConfig};
//! use rand_core::OsRng;
//!
//! # fn main() -> Result<(), certgen::error::CertGenError> {
//! let generator = Generator::new(GeneratorConfig::default());
//! let cert = generator.new_tls_with_rng(&mut OsRng, time::OffsetDateTime::now_utc())?;
//! assert!(cert.not_after() > cert.not_before());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is reported through [`error::CertGenError`], whose variant
//! names the stage that failed:
//!
//! ```rust
//! use certgen::{Generator, GeneratorConfig, error::CertGenError};
//!
//! let generator = Generator::new(GeneratorConfig::builder().key_size(0).build());
//! match generator.new_tls() {
//!     Ok(_) => unreachable!("a zero-bit key cannot be generated"),
//!     Err(CertGenError::KeyGeneration(msg)) => println!("bad key size: {}", msg),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`generator`]: one-call generation of a [`Certificate`] record
//! - [`key`]: RSA key generation, signing and PKCS#1 export
//! - [`cert`]: configuration, certificate building and the output record
//! - [`issuer`]: the self-signing issuer
//! - [`tbs_certificate`]: low-level "to be signed" certificate structure
//! - [`pem_utils`]: PEM wrapping and unwrapping
//! - [`encoder`]: text and JSON output, optionally written to disk
//! - [`error`]: error types

pub mod cert;
pub mod encoder;
pub mod error;
pub mod generator;
pub mod issuer;
pub mod key;
pub mod pem_utils;
pub mod tbs_certificate;

pub use cert::Certificate;
pub use cert::params::GeneratorConfig;
pub use generator::Generator;
