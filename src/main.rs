//! Agencylink CLI - Export submissions, import acknowledgments
//!
//! # Main Commands
//!
//! ```bash
//! agencylink serve --store registrations.json     # Start HTTP server (port 3000)
//! agencylink export works --store registrations.json
//! agencylink import ack.json --store registrations.json
//! ```
//!
//! The store argument points at a JSON snapshot of the registration record
//! set; `import` writes applied transitions back to it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use agencylink::{
    export_jingles, export_members, export_works, parse_acknowledgment_file, reconcile_works,
    ExportFile, MemoryStore, RegistrationStore,
};

#[derive(Parser)]
#[command(name = "agencylink")]
#[command(about = "Export registration submissions and import agency acknowledgments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Registration snapshot file (empty store if omitted)
        #[arg(short, long)]
        store: Option<PathBuf>,
    },

    /// Export eligible registrations as a submission file
    Export {
        /// Which entity kind to export
        kind: ExportKind,

        /// Registration snapshot file
        #[arg(short, long)]
        store: PathBuf,

        /// Output path (default: the generated filename in the current dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import an agency acknowledgment file against the store
    Import {
        /// Acknowledgment JSON file
        file: PathBuf,

        /// Registration snapshot file; applied transitions are written back
        #[arg(short, long)]
        store: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportKind {
    Works,
    Jingles,
    Members,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port, store } => cmd_serve(port, store.as_deref()).await,
        Commands::Export {
            kind,
            store,
            output,
        } => cmd_export(kind, &store, output.as_deref()),
        Commands::Import { file, store } => cmd_import(&file, &store),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: u16, store_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let store = match store_path {
        Some(path) => {
            eprintln!("📂 Loading store: {}", path.display());
            MemoryStore::open(path)?
        }
        None => {
            eprintln!("📂 No store file given, starting empty");
            MemoryStore::new()
        }
    };

    let store: Arc<dyn RegistrationStore> = Arc::new(store);
    agencylink::server::start_server(store, port).await
}

fn cmd_export(
    kind: ExportKind,
    store_path: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::open(store_path)?;

    let file = match kind {
        ExportKind::Works => export_works(&store)?,
        ExportKind::Jingles => export_jingles(&store)?,
        ExportKind::Members => export_members(&store)?,
    };

    write_export(&file, output)?;
    Ok(())
}

fn write_export(file: &ExportFile, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = match output {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(&file.file_name),
    };
    std::fs::write(&path, &file.contents)?;
    eprintln!("💾 Submission file written to: {}", path.display());
    Ok(())
}

fn cmd_import(file: &Path, store_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📥 Importing acknowledgments: {}", file.display());

    let store = MemoryStore::open(store_path)?;
    let bytes = std::fs::read(file)?;
    let ack_file = parse_acknowledgment_file(&bytes)?;
    let report = reconcile_works(&store, &ack_file)?;

    for event in &report.events {
        eprintln!("   ⚠️  {}", event);
    }
    eprintln!(
        "\n📊 Results: {} applied, {} skipped",
        report.stats.success, report.stats.failure
    );

    Ok(())
}
