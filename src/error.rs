//! use certgen::error::CertGenError;

use thiserror::Error;

/// Represents errors that can occur while generating or emitting a certificate.
///
/// Each variant names the stage that failed, so a caller can tell a bad key
/// size apart from a signing or output failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CertGenError {
    /// The RSA primitive refused to produce a key pair.
    #[error("Key generation error: {0}")]
    KeyGeneration(String),

    /// Assembling or self-signing the certificate failed.
    #[error("Certificate signing error: {0}")]
    CertificateSigning(String),

    /// Wrapping DER bytes into PEM failed.
    #[error("Failed to serialize to PEM: {0}")]
    Serialization(String),

    /// Error during PEM or DER decoding.
    #[error("Failed to decode data: {0}")]
    Decoding(String),

    /// Error while encoding a certificate for output.
    #[error("Failed to encode output: {0}")]
    Encoding(String),

    /// Error while writing an output artifact.
    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, CertGenError>;

impl From<rsa::Error> for CertGenError {
    fn from(err: rsa::Error) -> Self {
        CertGenError::KeyGeneration(err.to_string())
    }
}

impl From<der::Error> for CertGenError {
    /// Converts a `der::Error` into a `CertGenError`.
    ///
    /// DER encoding only happens while building the certificate, so it is
    /// reported against that stage.
    fn from(err: der::Error) -> Self {
        CertGenError::CertificateSigning(err.to_string())
    }
}

impl From<x509_cert::spki::Error> for CertGenError {
    fn from(err: x509_cert::spki::Error) -> Self {
        CertGenError::CertificateSigning(err.to_string())
    }
}

impl From<pem::PemError> for CertGenError {
    fn from(err: pem::PemError) -> Self {
        CertGenError::Decoding(err.to_string())
    }
}

impl From<std::io::Error> for CertGenError {
    fn from(err: std::io::Error) -> Self {
        CertGenError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CertGenError {
    fn from(err: serde_json::Error) -> Self {
        CertGenError::Encoding(err.to_string())
    }
}
