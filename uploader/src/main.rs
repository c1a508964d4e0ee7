//! BPC Upload CLI - Run the upload simulator over local files
//!
//! # Commands
//!
//! ```bash
//! bpc-upload upload laudo.pdf                      # Simulate one upload
//! bpc-upload upload a.pdf b.png --multiple         # Several files at once
//! bpc-upload upload rg.jpg --associate 1 --document-type id
//! bpc-upload policy                                # Show the effective policy
//! bpc-upload documents --associate 1               # List demo documents
//! ```
//!
//! Policy defaults can be overridden with `BPC_UPLOAD_MAX_SIZE_MB`,
//! `BPC_UPLOAD_ALLOWED_TYPES` and `BPC_UPLOAD_ALLOW_MULTIPLE` (a `.env` file
//! is loaded if present). Flags win over the environment.

use bpc_uploader::{
    CandidateFile, DocumentError, DocumentRegistry, DocumentType, Notification,
    NotificationLevel, Progress, SessionOutcome, UploadError, UploadPolicy, Uploader,
    UploaderConfig,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "bpc-upload")]
#[command(about = "Simulate document uploads for Observatório BPC", long_about = None)]
struct Cli {
    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate files and run a simulated upload session
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Accept several files in one submission
        #[arg(short, long)]
        multiple: bool,

        /// Per-file ceiling in MB
        #[arg(long)]
        max_size_mb: Option<u64>,

        /// Allowed MIME type (repeatable, replaces the allow-list)
        #[arg(long = "allow-type")]
        allow_types: Vec<String>,

        /// Seed for reproducible progress
        #[arg(long)]
        seed: Option<u64>,

        /// Attach accepted files to this associate (demo registry)
        #[arg(short, long, requires = "document_type")]
        associate: Option<String>,

        /// Document type slug: id, bpc, medical, income, address, other
        #[arg(short = 't', long)]
        document_type: Option<String>,

        /// Description stored with attached documents
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Print the effective upload policy as JSON
    Policy,

    /// List the demo associates and their documents
    Documents {
        /// Only this associate
        #[arg(short, long)]
        associate: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("⚠️  Logger unavailable: {}", e);
    }

    let result = match cli.command {
        Commands::Upload {
            files,
            multiple,
            max_size_mb,
            allow_types,
            seed,
            associate,
            document_type,
            description,
        } => {
            let options = UploadOptions {
                multiple,
                max_size_mb,
                allow_types,
                seed,
                associate,
                document_type,
                description,
            };
            cmd_upload(&files, options).await
        }

        Commands::Policy => cmd_policy(),

        Commands::Documents { associate } => cmd_documents(associate.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

struct UploadOptions {
    multiple: bool,
    max_size_mb: Option<u64>,
    allow_types: Vec<String>,
    seed: Option<u64>,
    associate: Option<String>,
    document_type: Option<String>,
    description: String,
}

/// Environment config with command-line overrides applied.
fn effective_config(
    multiple: bool,
    max_size_mb: Option<u64>,
    allow_types: &[String],
) -> CliResult<UploaderConfig> {
    let mut config = UploaderConfig::from_env()?;
    apply_overrides(&mut config.policy, multiple, max_size_mb, allow_types)?;
    Ok(config)
}

fn apply_overrides(
    policy: &mut UploadPolicy,
    multiple: bool,
    max_size_mb: Option<u64>,
    allow_types: &[String],
) -> CliResult<()> {
    if multiple {
        policy.allow_multiple = true;
    }
    if let Some(mb) = max_size_mb {
        policy.max_size_bytes = mb
            .checked_mul(bpc_uploader::config::MIB)
            .ok_or_else(|| format!("--max-size-mb {} is too large", mb))?;
    }
    if !allow_types.is_empty() {
        policy.allowed_mime_types = allow_types.iter().map(|t| t.to_ascii_lowercase()).collect();
    }
    Ok(())
}

/// Build a candidate from file metadata; the MIME type comes from the extension.
fn candidate_from_path(path: &Path) -> CliResult<CandidateFile<PathBuf>> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(format!("{} is not a file", path.display()).into());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Ok(CandidateFile::with_handle(
        name,
        mime.essence_str(),
        metadata.len(),
        path.to_path_buf(),
    ))
}

fn print_notification(notification: Notification) {
    let icon = match notification.level {
        NotificationLevel::Success => "✅",
        NotificationLevel::Error => "❌",
    };
    eprintln!("{} {}: {}", icon, notification.title, notification.description);
}

async fn cmd_upload(paths: &[PathBuf], options: UploadOptions) -> CliResult<()> {
    let config = effective_config(options.multiple, options.max_size_mb, &options.allow_types)?;

    // Resolve the document type before uploading anything
    let document_type = options
        .document_type
        .as_deref()
        .map(str::parse::<DocumentType>)
        .transpose()?;

    // Same for the associate: fail before the session, not after it
    let mut registry = DocumentRegistry::with_sample_data();
    if let Some(id) = options.associate.as_deref() {
        if registry.associate(id).is_none() {
            return Err(DocumentError::UnknownAssociate(id.to_string()).into());
        }
    }

    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        candidates.push(candidate_from_path(path)?);
    }

    eprintln!("📤 Uploading {} file(s)", candidates.len());
    eprintln!("   Accepted: {}", config.policy.size_hint());

    let mut uploader = Uploader::from_config(config, print_notification);
    if let Some(seed) = options.seed {
        uploader = uploader.with_seed(seed);
    }

    let session = match uploader.submit(candidates) {
        Ok(session) => session,
        Err(UploadError::EmptySubmission { rejected }) => {
            return Err(format!("no file accepted ({} rejected)", rejected.len()).into());
        }
        Err(e) => return Err(e.into()),
    };

    // Ctrl-C cancels the session instead of killing the process
    let handle = session.handle();
    let watcher = tokio::spawn({
        let handle = handle.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                handle.cancel();
            }
        }
    });

    let bar = ProgressBar::new(100).with_style(
        ProgressStyle::with_template("{spinner} [{bar:40.cyan/blue}] {pos:>3}% {msg}")?
            .progress_chars("=> "),
    );
    bar.set_message(format!("session {}", handle.id()));

    let delivered = RefCell::new(Vec::new());
    let outcome = session
        .run(
            tokio::time::sleep,
            |progress| match progress {
                Progress::Running(p) => bar.set_position(u64::from(p)),
                Progress::Idle => bar.finish_and_clear(),
            },
            |files| *delivered.borrow_mut() = files,
        )
        .await;
    watcher.abort();

    let delivered = delivered.into_inner();
    match outcome {
        SessionOutcome::Cancelled { at } => {
            bar.abandon_with_message("cancelled");
            return Err(format!("upload cancelled at {}%", at).into());
        }
        SessionOutcome::Completed { accepted } => {
            eprintln!("\n📦 Delivered {} file(s):", accepted);
            for file in &delivered {
                eprintln!(
                    "   {} ({}, {})",
                    file.handle().display(),
                    file.mime_type(),
                    bpc_uploader::format_size(file.size_bytes())
                );
            }
        }
    }

    if let Some(associate) = options.associate.as_deref() {
        let today = chrono::Local::now().date_naive();
        for file in &delivered {
            registry.attach(
                Some(associate),
                document_type,
                &options.description,
                file,
                today,
            )?;
        }
        print_documents(&registry, Some(associate))?;
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_policy() -> CliResult<()> {
    let config = effective_config(false, None, &[])?;
    println!("{}", serde_json::to_string_pretty(&config.policy)?);
    Ok(())
}

fn cmd_documents(associate: Option<&str>) -> CliResult<()> {
    let registry = DocumentRegistry::with_sample_data();
    print_documents(&registry, associate)
}

fn print_documents(registry: &DocumentRegistry, only: Option<&str>) -> CliResult<()> {
    let associates: Vec<_> = match only {
        Some(id) => vec![registry
            .associate(id)
            .ok_or_else(|| DocumentError::UnknownAssociate(id.to_string()))?],
        None => registry.associates().iter().collect(),
    };

    for associate in associates {
        println!("\n👤 {} - CPF: {}", associate.name, associate.document_id);
        let documents = registry.documents_for(&associate.id);
        if documents.is_empty() {
            println!("   Nenhum documento encontrado.");
        }
        for doc in documents {
            println!(
                "   [{}] {} · {} · {} · {}",
                doc.id,
                doc.file_name,
                doc.document_type.label(),
                doc.file_size,
                doc.upload_date
            );
        }
    }
    Ok(())
}
