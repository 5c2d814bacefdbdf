//! File Hub CLI
//!
//! Command-line front-end for the File Hub service:
//! - Upload files
//! - Search and page through the listing
//! - Delete and download files
//! - Follow deduplication statistics

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use filehub::config::generate_default_config;
use filehub::{
    format_bytes, format_timestamp, logging, mime_label, select_path, Config, DeleteOutcome,
    FileHub, FileHubClient, FileRecord, FilterForm, Paginated, StatsSummary, StorageStats,
    UploadForm, UploadError,
};

#[derive(Parser)]
#[command(name = "filehub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Upload, search and manage files on a File Hub server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config and FILEHUB_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/filehub/config.toml or ./filehub.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a file
    Upload {
        /// Path of the file to upload
        path: Option<PathBuf>,
    },

    /// List files, optionally filtered
    List {
        /// Filename contains (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// MIME type filter, repeatable (e.g. -t application/pdf -t image/png)
        #[arg(short = 't', long = "type")]
        file_types: Vec<String>,
        /// Minimum size in KB
        #[arg(long)]
        min_kb: Option<String>,
        /// Maximum size in KB
        #[arg(long)]
        max_kb: Option<String>,
        /// Uploaded on or after (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Uploaded on or before (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
    },

    /// Show one file
    Show {
        id: Uuid,
    },

    /// Delete a file
    Delete {
        id: Uuid,
    },

    /// Download a file
    Download {
        id: Uuid,
        /// Destination file or directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Show deduplication statistics
    Stats {
        /// Keep refreshing on the configured poll interval
        #[arg(short, long)]
        watch: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    logging::init(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Wrote default config to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    tracing::debug!(api = %config.api.base_url, "Using File Hub API");
    let client = FileHubClient::new(&config.api)?;
    let mut hub = FileHub::new(client);
    let json = cli.format == "json";

    match cli.command {
        Commands::Upload { path } => {
            let mut form = UploadForm::new();
            if let Some(path) = path {
                let selected = select_path(&path)
                    .with_context(|| format!("Cannot read {}", path.display()))?;
                form.select(Some(selected));
            }

            match hub.submit_upload(&mut form).await {
                Err(UploadError::NoFileSelected) | Err(UploadError::InProgress) => {
                    bail!("{}", form.error().unwrap_or("Please select a file to upload"));
                }
                Ok(None) => {
                    bail!("Upload failed: {}", form.error().unwrap_or("unknown error"));
                }
                Ok(Some(notice)) => {
                    println!("{}", notice.message);
                }
            }
        }

        Commands::List {
            search,
            file_types,
            min_kb,
            max_kb,
            from,
            to,
            page,
        } => {
            let mut form = FilterForm::new();
            form.set_search(search.unwrap_or_default());
            for mime in &file_types {
                form.toggle_file_type(mime);
            }
            form.set_min_size_kb(min_kb.unwrap_or_default());
            form.set_max_size_kb(max_kb.unwrap_or_default());
            form.set_start_date(from.unwrap_or_default());
            form.set_end_date(to.unwrap_or_default());

            let filters = form.validate()?;
            let result = hub.list(&filters, page).await.map_err(user_error)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_listing(&result, page.max(1), config.ui.page_size);
            }
        }

        Commands::Show { id } => {
            let record = hub.get_file(id).await.map_err(|e| lookup_error(e, id))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_record(&record);
            }
        }

        Commands::Delete { id } => match hub.delete(id).await.map_err(|e| lookup_error(e, id))? {
            DeleteOutcome::Removed => println!("Deleted {}", id),
            DeleteOutcome::ReferenceReleased { message } => println!("{}", message),
        },

        Commands::Download { id, output } => {
            let record = hub.get_file(id).await.map_err(|e| lookup_error(e, id))?;
            let path = hub.download_to(&record, &output).await.map_err(user_error)?;
            println!(
                "Saved {} ({}) to {}",
                record.original_filename,
                format_bytes(record.size),
                path.display()
            );
        }

        Commands::Stats { watch } => {
            let stats = hub.stats().await.map_err(user_error)?;
            print_stats(&stats, json)?;

            if watch {
                let mut ticker = tokio::time::interval(config.ui.stats_poll_interval());
                ticker.tick().await;

                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            match hub.refresh_stats().await {
                                Ok(stats) => print_stats(&stats, json)?,
                                Err(e) => eprintln!("Failed to refresh statistics: {}", e.user_message()),
                            }
                        }
                        _ = tokio::signal::ctrl_c() => break,
                    }
                }
            }
        }

        // Written before connecting
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn user_error(err: filehub::ClientError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}

fn lookup_error(err: filehub::ClientError, id: Uuid) -> anyhow::Error {
    if err.is_not_found() {
        anyhow::anyhow!("No file with id {}", id)
    } else {
        user_error(err)
    }
}

fn print_listing(page: &Paginated<FileRecord>, current: u32, page_size: u32) {
    if page.is_empty() {
        println!("No files found.");
        return;
    }

    println!(
        "{:<36}  {:<32} {:<6} {:>10}  {:<16} {}",
        "ID", "Name", "Type", "Size", "Uploaded", ""
    );
    println!("{}", "-".repeat(112));

    for file in &page.results {
        println!(
            "{:<36}  {:<32} {:<6} {:>10}  {:<16} {}",
            file.id,
            truncate(&file.original_filename, 32),
            mime_label(&file.file_type),
            format_bytes(file.size),
            format_timestamp(&file.uploaded_at),
            if file.is_duplicate { "duplicate" } else { "" }
        );
    }

    println!();
    println!(
        "Page {} of {} ({} files)",
        current,
        page.total_pages(page_size),
        page.count
    );
}

fn print_record(file: &FileRecord) {
    println!("ID:        {}", file.id);
    println!("Name:      {}", file.original_filename);
    println!("Type:      {}", file.file_type);
    println!("Size:      {} ({} bytes)", format_bytes(file.size), file.size);
    println!("Uploaded:  {}", format_timestamp(&file.uploaded_at));
    println!("Hash:      {}", file.file_hash.as_deref().unwrap_or("-"));
    println!("Duplicate: {}", if file.is_duplicate { "yes" } else { "no" });
    if file.is_duplicate {
        println!("Saved:     {}", format_bytes(file.storage_saved));
    }
}

fn print_stats(stats: &StorageStats, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(stats)?);
        return Ok(());
    }

    for card in StatsSummary::from(stats).cards() {
        match card.hint {
            Some(hint) => println!("{:<15} {:>12}  ({})", card.label, card.value, hint),
            None => println!("{:<15} {:>12}", card.label, card.value),
        }
    }
    println!();
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}
