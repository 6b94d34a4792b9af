use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use certgen::cert::params::{
    DEFAULT_CERT_VALIDITY_IN_DAYS, DEFAULT_KEY_SIZE, DEFAULT_ORG_NAME, days_to_duration,
};
use certgen::encoder::{DEFAULT_OUTPUT_DIR, Encoder, EncoderOptions, Format};
use certgen::{Generator, GeneratorConfig};

/// Generate a self-signed TLS certificate and its private key.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Organization name for the certificate
    #[arg(short = 'o', long = "org", default_value = DEFAULT_ORG_NAME)]
    org_name: String,

    /// Number of bits in the generated key
    #[arg(short = 'b', long = "bits", default_value_t = DEFAULT_KEY_SIZE)]
    key_size: usize,

    /// Number of days the generated certificate will be valid for
    #[arg(
        short = 'e',
        long = "expires",
        default_value_t = DEFAULT_CERT_VALIDITY_IN_DAYS,
        allow_negative_numbers = true
    )]
    validity_in_days: i64,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: Format,

    /// Shorthand flag for changing the output format to JSON
    #[arg(short = 'j', long)]
    json: bool,

    /// Write output to disk
    #[arg(short = 'w', long = "write")]
    write_to_disk: bool,

    /// Directory where files will be written when using -w
    #[arg(short = 'd', long = "dir", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout only ever carries PEM or JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    let validity =
        days_to_duration(args.validity_in_days).context("invalid certificate validity")?;
    let config = GeneratorConfig::builder()
        .org_name(args.org_name)
        .key_size(args.key_size)
        .validity(validity)
        .build();

    let cert = Generator::new(config)
        .new_tls()
        .context("failed to generate TLS certificate")?;

    let format = if args.json { Format::Json } else { args.format };
    let encoder = Encoder::new(EncoderOptions {
        format,
        write_to_disk: args.write_to_disk,
        output_dir: args.output_dir,
    });

    let stdout = std::io::stdout();
    let result = encoder
        .encode(&cert, &mut stdout.lock())
        .context("failed to generate output")?;

    for artifact in &result.artifacts {
        eprintln!("{} written", artifact.display());
    }

    Ok(())
}
