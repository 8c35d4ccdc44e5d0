//! keycrypt: keyed hashing and envelope encryption from the command line
//!
//! Commands:
//!   hash <data>                 - HMAC digest (hex) under the shared secret
//!   check <data> <hash>         - compare data against a digest (exit 1 on mismatch)
//!   hash-filename <name>        - pseudo-unique hashed name keeping the extension
//!   hash-size <algo>            - digest length in bytes
//!   algos                       - list supported algorithms
//!   encrypt [<text>]            - seal text/stdin/file into a hex or base64 envelope
//!   decrypt [<envelope>]        - open a hex or base64 envelope
//!   config show                 - display the active configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use keycrypt_core::config::{KeycryptConfig, TextEncoding};
use keycrypt_crypto::{hash_size, Crypto, HashAlgo};

// ── CLI structure ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "keycrypt",
    version,
    about = "Keyed hashing and authenticated encryption",
    long_about = "keycrypt: HMAC digests and AES-256-GCM envelopes driven by one shared secret"
)]
struct Cli {
    /// Path to keycrypt.toml configuration file
    #[arg(long, short = 'c', env = "KEYCRYPT_CONFIG", default_value = "keycrypt.toml")]
    config: PathBuf,

    /// Shared secret (overrides the config's secret_key_env and secret_key_file)
    #[arg(long, short = 'k', env = "KEYCRYPT_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides config
    #[arg(long, env = "KEYCRYPT_LOG")]
    log: Option<String>,

    /// Log format; overrides config
    #[arg(long, env = "KEYCRYPT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the HMAC digest of DATA as lowercase hex
    Hash {
        data: String,
        /// Hash algorithm (default: config crypto.default_algo)
        #[arg(long, short = 'a')]
        algo: Option<HashAlgo>,
    },

    /// Check DATA against a previously computed digest
    Check {
        data: String,
        hash: String,
        #[arg(long, short = 'a')]
        algo: Option<HashAlgo>,
    },

    /// Derive a pseudo-unique hashed filename that keeps the extension
    #[command(name = "hash-filename")]
    HashFilename {
        filename: String,
        #[arg(long, short = 'a')]
        algo: Option<HashAlgo>,
    },

    /// Print the digest size in bytes of ALGO
    #[command(name = "hash-size")]
    HashSize { algo: String },

    /// List supported hash algorithms and their digest sizes
    Algos,

    /// Encrypt TEXT (or --input, or stdin) into a text envelope
    Encrypt {
        text: Option<String>,
        /// Read plaintext from this file
        #[arg(long, short = 'i', conflicts_with = "text")]
        input: Option<PathBuf>,
        /// Envelope text encoding (default: config crypto.encoding)
        #[arg(long, short = 'e')]
        encoding: Option<Encoding>,
    },

    /// Decrypt a text envelope (argument, --input, or stdin)
    Decrypt {
        envelope: Option<String>,
        #[arg(long, short = 'i', conflicts_with = "envelope")]
        input: Option<PathBuf>,
        /// Write plaintext to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        #[arg(long, short = 'e')]
        encoding: Option<Encoding>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the active configuration (merged defaults + config file)
    Show,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Encoding {
    Base64,
    Hex,
}

#[derive(Clone, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

impl From<Encoding> for TextEncoding {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Base64 => TextEncoding::Base64,
            Encoding::Hex => TextEncoding::Hex,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = KeycryptConfig::load(&cli.config)
        .with_context(|| format!("loading config: {}", cli.config.display()))?;

    let level = cli.log.clone().unwrap_or_else(|| config.log.level.clone());
    let format = cli.log_format.clone().unwrap_or(match config.log.format.as_str() {
        "json" => LogFormat::Json,
        _ => LogFormat::Text,
    });
    init_logging(&level, &format);

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config.display(),
        "keycrypt starting"
    );

    let default_algo = config.crypto.default_algo;
    match cli.command {
        Commands::Hash { data, algo } => {
            let crypto = build_crypto(&config, cli.key.as_deref())?;
            println!("{}", crypto.hash(&data, algo.unwrap_or(default_algo))?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { data, hash, algo } => {
            let crypto = build_crypto(&config, cli.key.as_deref())?;
            Ok(exit_code(cmd_check(&crypto, &data, &hash, algo.unwrap_or(default_algo))?))
        }
        Commands::HashFilename { filename, algo } => {
            let crypto = build_crypto(&config, cli.key.as_deref())?;
            println!("{}", crypto.hash_filename(&filename, algo.unwrap_or(default_algo))?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::HashSize { algo } => Ok(exit_code(cmd_hash_size(&algo))),
        Commands::Algos => {
            cmd_algos();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Encrypt { text, input, encoding } => {
            let crypto = build_crypto(&config, cli.key.as_deref())?;
            let encoding = encoding.map(Into::into).unwrap_or(config.crypto.encoding);
            cmd_encrypt(&crypto, text, input.as_deref(), encoding)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Decrypt { envelope, input, output, encoding } => {
            let crypto = build_crypto(&config, cli.key.as_deref())?;
            let encoding = encoding.map(Into::into).unwrap_or(config.crypto.encoding);
            cmd_decrypt(&crypto, envelope, input.as_deref(), output.as_deref(), encoding)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { action: ConfigAction::Show } => {
            cmd_config_show(&config, &cli.config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(level: &str, format: &LogFormat) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so command output on stdout stays pipeable.
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn build_crypto(config: &KeycryptConfig, key: Option<&str>) -> Result<Crypto> {
    let secret = config
        .crypto
        .resolve_secret(key)
        .context("resolving secret key")?;
    Ok(Crypto::from_secret(secret))
}

// ── Input helpers ─────────────────────────────────────────────────────────────

/// Argument text, else file contents, else all of stdin.
fn read_input(inline: Option<String>, path: Option<&Path>) -> Result<Vec<u8>> {
    if let Some(text) = inline {
        return Ok(text.into_bytes());
    }
    if let Some(path) = path {
        return std::fs::read(path).with_context(|| format!("reading {}", path.display()));
    }
    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .context("reading stdin")?;
    Ok(buf)
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Prints `ok` or `mismatch`; returns whether the digest matched.
fn cmd_check(crypto: &Crypto, data: &str, hash: &str, algo: HashAlgo) -> Result<bool> {
    let matched = crypto.check(data, hash, algo)?;
    println!("{}", if matched { "ok" } else { "mismatch" });
    Ok(matched)
}

/// Prints the size, or `-1` for an unknown algorithm.
fn cmd_hash_size(name: &str) -> bool {
    match hash_size(name) {
        Some(size) => {
            println!("{size}");
            true
        }
        None => {
            eprintln!("unknown hash algorithm: {name}");
            println!("-1");
            false
        }
    }
}

fn cmd_algos() {
    for algo in HashAlgo::ALL {
        println!("{:<12} {:>3} bytes", algo.name(), algo.size());
    }
}

fn cmd_encrypt(
    crypto: &Crypto,
    text: Option<String>,
    input: Option<&Path>,
    encoding: TextEncoding,
) -> Result<()> {
    let plaintext = read_input(text, input)?;
    let envelope = match encoding {
        TextEncoding::Base64 => crypto.encrypt_base64(&plaintext)?,
        TextEncoding::Hex => crypto.encrypt_hex(&plaintext)?,
    };
    println!("{envelope}");
    Ok(())
}

fn cmd_decrypt(
    crypto: &Crypto,
    envelope: Option<String>,
    input: Option<&Path>,
    output: Option<&Path>,
    encoding: TextEncoding,
) -> Result<()> {
    let raw = read_input(envelope, input)?;
    let text = String::from_utf8(raw).context("envelope is not valid UTF-8 text")?;
    let text = text.trim();

    let plaintext = match encoding {
        TextEncoding::Base64 => crypto.decrypt_base64(text)?,
        TextEncoding::Hex => crypto.decrypt_hex(text)?,
    };

    match output {
        Some(path) => std::fs::write(path, &plaintext)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&plaintext).context("writing stdout")?;
            stdout.flush().context("flushing stdout")?;
        }
    }
    Ok(())
}

fn cmd_config_show(config: &KeycryptConfig, path: &Path) -> Result<()> {
    println!("# config: {}", path.display());
    let rendered = toml::to_string_pretty(config).context("serializing config")?;
    print!("{rendered}");
    Ok(())
}
