//! pwseal: password-seal files into authenticated, compressed blobs
//!
//! Commands:
//!   seal <input> <output>     - encrypt a file, print the blob's SHA-512
//!   open <input> [<output>]   - decrypt a blob to a file (or stdout)
//!   inspect <input>           - show a blob's frame header, no password needed
//!   config show               - display current configuration

mod document;
mod password;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::{ExposeSecret, SecretString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use pwseal_codec::Checksum;
use pwseal_core::config::{warn_missing, FilesConfig, LogConfig, PwsealConfig};
use pwseal_crypto::Frame;

use crate::document::Document;

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "pwseal",
    version,
    about = "Password-sealed, integrity-checked file blobs",
    long_about = "pwseal: compress and encrypt a file under a password (Argon2i + AES-256-GCM)"
)]
struct Cli {
    /// Path to config.toml
    #[arg(
        long,
        short = 'c',
        env = "PWSEAL_CONFIG",
        default_value = "~/.config/pwseal/config.toml"
    )]
    config: PathBuf,

    /// Read the password from this environment variable instead of prompting
    #[arg(long, global = true, value_name = "VAR")]
    password_env: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a file into a sealed blob
    Seal {
        /// File to seal
        input: PathBuf,
        /// Where to write the blob
        output: PathBuf,
        /// Replace an existing output file
        #[arg(long, short = 'f')]
        force: bool,
        /// Decrypt the fresh blob and compare before writing it
        #[arg(long)]
        verify: bool,
    },

    /// Decrypt a sealed blob
    Open {
        /// Sealed blob
        input: PathBuf,
        /// Destination file (default: stdout)
        output: Option<PathBuf>,
        /// Replace an existing output file
        #[arg(long, short = 'f')]
        force: bool,
        /// Expected SHA-512 of the blob (hex), checked before decrypting
        #[arg(long, value_name = "HEX")]
        checksum: Option<String>,
    },

    /// Show the frame header of a sealed blob
    Inspect {
        /// Sealed blob
        input: PathBuf,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = expand_tilde(&cli.config);
    let loaded = PwsealConfig::read(&config_path)?;
    let missing = loaded.is_none();
    let config = loaded.unwrap_or_default();

    init_logging(&config.log);
    if missing {
        warn_missing(&config_path);
    }

    let password_env = cli.password_env.as_deref();
    match cli.command {
        Commands::Seal {
            input,
            output,
            force,
            verify,
        } => cmd_seal(&config, password_env, &input, &output, force, verify),
        Commands::Open {
            input,
            output,
            force,
            checksum,
        } => cmd_open(
            &config,
            password_env,
            &input,
            output.as_deref(),
            force,
            checksum.as_deref(),
        ),
        Commands::Inspect { input } => cmd_inspect(&input),
        Commands::Config {
            action: ConfigAction::Show,
        } => cmd_config_show(&config, &config_path),
    }
}

fn init_logging(log: &LogConfig) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    // stdout carries checksums and plaintext; logs go to stderr
    if log.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Expand `~` in path to the user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if let Some(rest) = s.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_default();
        PathBuf::from(home).join(rest)
    } else {
        path.to_path_buf()
    }
}

fn make_spinner(prefix: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{prefix:.bold} {spinner} {msg}")
            .context("building spinner style")?,
    );
    pb.set_prefix(prefix.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

/// Write `data` to `path` with the configured permissions.
fn write_output(path: &Path, data: &[u8], files: &FilesConfig, force: bool) -> Result<()> {
    if path.exists() && !(force || files.overwrite) {
        bail!(
            "output exists: {} (use --force to replace it)",
            path.display()
        );
    }

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(files.mode);
    }

    let mut file = options
        .open(path)
        .with_context(|| format!("creating output: {}", path.display()))?;
    file.write_all(data)
        .with_context(|| format!("writing output: {}", path.display()))?;

    // mode() only applies to newly created files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(files.mode))
            .with_context(|| format!("setting permissions: {}", path.display()))?;
    }
    Ok(())
}

fn secret_bytes(password: &SecretString) -> &[u8] {
    password.expose_secret().as_bytes()
}

// ── `pwseal seal` ─────────────────────────────────────────────────────────────

fn cmd_seal(
    config: &PwsealConfig,
    password_env: Option<&str>,
    input: &Path,
    output: &Path,
    force: bool,
    verify: bool,
) -> Result<()> {
    if output.exists() && !(force || config.files.overwrite) {
        bail!(
            "output exists: {} (use --force to replace it)",
            output.display()
        );
    }

    let document = Document::read(input)?;
    let password = password::read_password(password_env, true)?;

    let spinner = make_spinner("seal")?;
    spinner.set_message("deriving key and encrypting");
    let sealed = pwseal_crypto::encrypt_with_checksum(secret_bytes(&password), &document)
        .with_context(|| format!("sealing {}", input.display()))?;

    if verify {
        spinner.set_message("verifying");
        let reopened: Document = pwseal_crypto::decrypt(&sealed.blob, secret_bytes(&password))
            .context("verifying sealed blob")?;
        if reopened != document {
            bail!("verification failed: sealed blob does not reproduce the input");
        }
    }
    spinner.finish_and_clear();

    write_output(output, &sealed.blob, &config.files, force)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        plaintext = document.contents.len(),
        blob = sealed.blob.len(),
        "sealed"
    );

    if config.output.print_checksum {
        println!("{}", sealed.checksum);
    }
    Ok(())
}

// ── `pwseal open` ─────────────────────────────────────────────────────────────

fn cmd_open(
    config: &PwsealConfig,
    password_env: Option<&str>,
    input: &Path,
    output: Option<&Path>,
    force: bool,
    checksum: Option<&str>,
) -> Result<()> {
    let blob =
        std::fs::read(input).with_context(|| format!("reading blob: {}", input.display()))?;

    if let Some(expected) = checksum {
        let expected = Checksum::from_hex(expected)?;
        if !expected.verify(&blob) {
            bail!(
                "checksum mismatch for {}: expected {expected}, got {}",
                input.display(),
                Checksum::of(&blob)
            );
        }
    }

    // Reject structurally broken blobs before asking for a password
    Frame::parse(&blob).with_context(|| format!("parsing blob: {}", input.display()))?;

    let password = password::read_password(password_env, false)?;

    let spinner = make_spinner("open")?;
    spinner.set_message("deriving key and decrypting");
    let result: pwseal_core::SealResult<Document> =
        pwseal_crypto::decrypt(&blob, secret_bytes(&password));
    spinner.finish_and_clear();
    let document = result.with_context(|| format!("opening {}", input.display()))?;

    info!(
        input = %input.display(),
        file_name = document.file_name.as_deref().unwrap_or("-"),
        plaintext = document.contents.len(),
        "opened"
    );

    match output {
        Some(path) => write_output(path, &document.contents, &config.files, force),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&document.contents)
                .and_then(|()| stdout.flush())
                .context("writing plaintext to stdout")
        }
    }
}

// ── `pwseal inspect` ──────────────────────────────────────────────────────────

fn cmd_inspect(input: &Path) -> Result<()> {
    let blob =
        std::fs::read(input).with_context(|| format!("reading blob: {}", input.display()))?;
    let frame =
        Frame::parse(&blob).with_context(|| format!("parsing blob: {}", input.display()))?;

    println!("file:       {}", input.display());
    println!("size:       {} bytes", blob.len());
    println!("version:    {}", frame.version());
    println!("salt:       {}", hex::encode(frame.salt()));
    println!("nonce:      {}", hex::encode(frame.nonce()));
    println!(
        "ciphertext: {} bytes (incl. {}-byte tag)",
        frame.ciphertext().len(),
        pwseal_core::format::TAG_SIZE
    );
    println!("sha512:     {}", Checksum::of(&blob));
    Ok(())
}

// ── `pwseal config show` ──────────────────────────────────────────────────────

fn cmd_config_show(config: &PwsealConfig, config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("# Configuration from: {}", config_path.display());
    } else {
        println!(
            "# Configuration: defaults (no file at {})",
            config_path.display()
        );
    }
    println!();
    let rendered = toml::to_string_pretty(config).context("serializing config to TOML")?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_uses_home() {
        let home = std::env::var("HOME").unwrap_or_default();
        assert_eq!(
            expand_tilde(Path::new("~/.config/pwseal/config.toml")),
            PathBuf::from(home).join(".config/pwseal/config.toml")
        );
        assert_eq!(
            expand_tilde(Path::new("/etc/pwseal.toml")),
            PathBuf::from("/etc/pwseal.toml")
        );
    }

    #[test]
    fn write_output_refuses_overwrite_without_force() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.bin");
        let files = FilesConfig::default();

        write_output(&path, b"first", &files, false).unwrap();
        assert!(write_output(&path, b"second", &files, false).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        write_output(&path, b"second", &files, true).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[cfg(unix)]
    #[test]
    fn write_output_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("blob");
        let files = FilesConfig {
            mode: 0o640,
            overwrite: false,
        };
        write_output(&path, b"x", &files, false).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn cli_parses_global_password_env() {
        let cli = Cli::try_parse_from([
            "pwseal",
            "open",
            "blob.pws",
            "--password-env",
            "PW",
            "--checksum",
            "abcd",
        ])
        .unwrap();
        assert_eq!(cli.password_env.as_deref(), Some("PW"));
        assert!(matches!(
            cli.command,
            Commands::Open { output: None, checksum: Some(_), .. }
        ));
    }
}
