use crate::error::{CertGenError, Result};

/// PEM block labels emitted by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PemLabel {
    Certificate,
    RsaPrivateKey,
}

impl PemLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PemLabel::Certificate => "CERTIFICATE",
            PemLabel::RsaPrivateKey => "RSA PRIVATE KEY",
        }
    }
}

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
///
/// The body is wrapped at 64 columns with LF line endings, so the same bytes
/// always yield the same text.
pub fn to_pem(label: &str, der: &[u8]) -> Result<String> {
    validate_label(label)?;
    let pem = pem::Pem::new(label, der);
    let config = pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF);
    Ok(pem::encode_config(&pem, config))
}

/// Convert a PEM‑encoded string to its label and DER‑encoded bytes.
pub fn from_pem(pem_str: &str) -> Result<(String, Vec<u8>)> {
    let pem = pem::parse(pem_str)?;
    Ok((pem.tag().to_string(), pem.contents().to_vec()))
}

// Hyphens would run into the BEGIN/END markers.
fn validate_label(label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(CertGenError::Serialization("empty PEM label".to_string()));
    }
    if let Some(c) = label
        .chars()
        .find(|c| !(c.is_ascii_graphic() || *c == ' ') || *c == '-')
    {
        return Err(CertGenError::Serialization(format!(
            "invalid character {c:?} in PEM label {label:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pem_layout() {
        let der = vec![0xAB; 100];
        let pem = to_pem("CERTIFICATE", &der).unwrap();
        let lines: Vec<&str> = pem.lines().collect();
        assert_eq!(lines.first(), Some(&"-----BEGIN CERTIFICATE-----"));
        assert_eq!(lines.last(), Some(&"-----END CERTIFICATE-----"));
        assert!(pem.ends_with("-----END CERTIFICATE-----\n"));
        assert!(!pem.contains('\r'));
        for line in &lines[1..lines.len() - 1] {
            assert!(line.len() <= 64, "line too long: {line}");
        }
    }

    #[test]
    fn test_to_pem_is_deterministic() {
        let der = (0u8..=255).collect::<Vec<_>>();
        assert_eq!(
            to_pem("RSA PRIVATE KEY", &der).unwrap(),
            to_pem("RSA PRIVATE KEY", &der).unwrap()
        );
    }

    #[test]
    fn test_empty_input_is_still_well_formed() {
        let pem = to_pem("CERTIFICATE", &[]).unwrap();
        assert_eq!(pem, "-----BEGIN CERTIFICATE-----\n-----END CERTIFICATE-----\n");
    }

    #[test]
    fn test_from_pem_recovers_label_and_bytes() {
        let der = vec![1, 2, 3, 4, 5, 6, 7];
        let (label, decoded) = from_pem(&to_pem("RSA PRIVATE KEY", &der).unwrap()).unwrap();
        assert_eq!(label, "RSA PRIVATE KEY");
        assert_eq!(decoded, der);
    }

    #[test]
    fn test_rejects_bad_labels() {
        for label in ["", "BAD-LABEL", "TAB\tLABEL"] {
            let err = to_pem(label, &[0]).unwrap_err();
            assert!(matches!(err, CertGenError::Serialization(_)), "{label:?}");
        }
    }

    #[test]
    fn test_from_pem_rejects_garbage() {
        assert!(matches!(
            from_pem("not a pem block"),
            Err(CertGenError::Decoding(_))
        ));
    }
}
