use certgen::{Certificate, Generator, GeneratorConfig};

/// Smallest size the tests use; keeps RSA key generation fast.
pub const TEST_KEY_SIZE: usize = 1024;

pub fn generate(org_name: &str) -> Certificate {
    let config = GeneratorConfig::builder()
        .org_name(org_name)
        .key_size(TEST_KEY_SIZE)
        .build();
    Generator::new(config)
        .new_tls()
        .expect("Failed to generate certificate")
}
