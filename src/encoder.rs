//! Output stage: turns a [`Certificate`] into text or JSON, on stdout or on disk.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use time::format_description::FormatItem;
use time::macros::format_description;

use crate::cert::Certificate;
use crate::error::{CertGenError, Result};

/// Directory files are written to when no other is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "./";

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour][minute][second]");

/// Output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Two PEM blocks: certificate, then private key.
    #[default]
    Text,
    /// The whole [`Certificate`] record as one JSON object.
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = CertGenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(CertGenError::Encoding(format!(
                "unknown output format {other:?} (expected text or json)"
            ))),
        }
    }
}

/// Configures an [`Encoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderOptions {
    pub format: Format,
    /// Write artifacts to `output_dir` instead of the output stream.
    pub write_to_disk: bool,
    pub output_dir: PathBuf,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            format: Format::default(),
            write_to_disk: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Outcome of a successful [`Encoder::encode`] call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodeResult {
    pub success: bool,
    /// Files written, in the order they were created. Empty when writing to
    /// the output stream.
    pub artifacts: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct Encoder {
    opts: EncoderOptions,
}

impl Encoder {
    pub fn new(opts: EncoderOptions) -> Self {
        Self { opts }
    }

    /// Encodes `cert` according to the configured format.
    ///
    /// `out` receives the encoded output unless the encoder writes to disk,
    /// in which case `out` is left untouched.
    pub fn encode<W: Write>(&self, cert: &Certificate, out: &mut W) -> Result<EncodeResult> {
        match self.opts.format {
            Format::Text => self.encode_text(cert, out),
            Format::Json => self.encode_json(cert, out),
        }
    }

    fn encode_text<W: Write>(&self, cert: &Certificate, out: &mut W) -> Result<EncodeResult> {
        if !self.opts.write_to_disk {
            writeln!(out, "{}", cert.cert_pem())?;
            writeln!(out)?;
            writeln!(out, "{}", cert.private_key_pem())?;
            return Ok(EncodeResult {
                success: true,
                artifacts: Vec::new(),
            });
        }

        let prefix = file_name_prefix(cert, &self.opts.output_dir)?;

        let crt_path = with_extension(&prefix, "crt");
        write_artifact(&crt_path, cert.cert_pem().as_bytes())
            .map_err(|e| CertGenError::Io(format!("failed to write certificate to file: {e}")))?;

        let key_path = with_extension(&prefix, "key");
        write_artifact(&key_path, cert.private_key_pem().as_bytes())
            .map_err(|e| CertGenError::Io(format!("failed to write private key to file: {e}")))?;

        Ok(EncodeResult {
            success: true,
            artifacts: vec![crt_path, key_path],
        })
    }

    fn encode_json<W: Write>(&self, cert: &Certificate, out: &mut W) -> Result<EncodeResult> {
        let mut json = serde_json::to_vec(cert)
            .map_err(|e| CertGenError::Encoding(format!("failed to generate JSON output: {e}")))?;
        json.push(b'\n');

        if !self.opts.write_to_disk {
            out.write_all(&json)?;
            return Ok(EncodeResult {
                success: true,
                artifacts: Vec::new(),
            });
        }

        let json_path = with_extension(&file_name_prefix(cert, &self.opts.output_dir)?, "json");
        write_artifact(&json_path, &json)?;

        Ok(EncodeResult {
            success: true,
            artifacts: vec![json_path],
        })
    }
}

/// `<dir>/<org>-<not before>`, e.g. `./acme-2024-03-01T101500`.
///
/// Path separators in the organization name are replaced so every artifact
/// lands directly inside `dir`.
fn file_name_prefix(cert: &Certificate, dir: &Path) -> Result<PathBuf> {
    let timestamp = cert
        .not_before()
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| CertGenError::Encoding(e.to_string()))?;
    let org: String = cert
        .org_name()
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    Ok(dir.join(format!("{org}-{timestamp}")))
}

// Organization names may contain dots, so `Path::set_extension` is not safe here.
fn with_extension(prefix: &Path, ext: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Writes `contents` verbatim, replacing any existing file. On Unix the file
/// is readable by its owner only.
fn write_artifact(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = open_file(path)?;
    file.write_all(contents)?;
    file.flush()?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "artifact written");
    Ok(())
}

fn open_file(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}
