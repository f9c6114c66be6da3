mod aggregator;
mod classifier;
mod config;
mod deletion;
mod error;
mod human;
mod render;
mod report;
mod scanner;
mod types;

use chrono::Local;
use clap::Parser;
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::classifier::Classifier;
use crate::config::AuditConfig;
use crate::deletion::PromptConfirm;
use crate::error::{AuditError, Result};
use crate::types::Category;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Audit and clean video editor working storage (proxies, optimized media, render cache, stills, backups)",
    long_about = None
)]
struct Args {
    /// Root folder to scan (e.g. a projects or media drive)
    root: String,

    /// Base path (extension replaced) for the JSON + CSV reports
    #[arg(long, value_name = "BASE")]
    report: Option<PathBuf>,

    /// How many of the largest files to list
    #[arg(long, default_value_t = 30)]
    top: usize,

    /// Only print category sizes and exit
    #[arg(long)]
    categories_only: bool,

    /// Delete every file in a category (proxy, optimized, render_cache, stills, backups)
    #[arg(long, value_name = "CATEGORY", value_parser = parse_deletable_category)]
    delete_category: Option<Category>,

    /// Delete files by extension (e.g. .dvcc)
    #[arg(long, value_name = "EXT")]
    delete_ext: Option<String>,

    /// Only delete files last modified more than N days ago
    #[arg(long, value_name = "DAYS")]
    min_age_days: Option<u32>,

    /// TOML file overriding category folder names and large extensions
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn parse_deletable_category(s: &str) -> std::result::Result<Category, String> {
    match s.parse::<Category>()? {
        Category::Other => Err("'other' cannot be deleted as a category".to_string()),
        category => Ok(category),
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\'))
        && let Some(mut path) = dirs::home_dir()
    {
        let rest = rest.trim_start_matches(['/', '\\']);
        if !rest.is_empty() {
            path.push(rest);
        }
        return path;
    }
    PathBuf::from(raw)
}

fn stdin_confirm() -> PromptConfirm<io::StdinLock<'static>, io::Stdout> {
    PromptConfirm::new(io::stdin().lock(), io::stdout())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AuditError::RootNotFound(root)) => {
            eprintln!("Root path does not exist: {}", root.display());
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let root = expand_home(&args.root);

    // Missing root is reported before any other failure
    let mut entries = scanner::scan(&root)?;

    let config = match &args.config {
        Some(path) => AuditConfig::load(path)?,
        None => AuditConfig::default(),
    };
    let classifier = Classifier::new(&config);

    let snapshot = aggregator::aggregate(&mut entries, &classifier, args.top, &root);
    let generated_at = Local::now();
    log::info!(
        "Scanned {} files under {} ({} entries skipped)",
        snapshot.total_files,
        root.display(),
        entries.skipped()
    );

    render::print_summary(&snapshot, &report::iso_seconds(generated_at));
    render::print_categories(&snapshot);

    if args.categories_only {
        return Ok(());
    }

    render::print_details(&snapshot, &config);

    if let Some(base) = &args.report {
        let report = report::Report::from_snapshot(&snapshot, generated_at);
        let (json_path, csv_path) = report::write_report(base, &report)?;
        println!("\nWrote report: {}", json_path.display());
        println!("Wrote CSV:    {}", csv_path.display());
    }

    if let Some(category) = args.delete_category {
        let bucket = snapshot.bucket(category);
        if bucket.is_empty() {
            println!("No files found for category '{category}'.");
        } else {
            println!(
                "\n{}",
                format!("Preparing deletion for category: {category}").cyan()
            );
            let mut confirm = stdin_confirm();
            let result = deletion::delete_category(
                category.as_str(),
                bucket,
                args.min_age_days,
                &mut confirm,
            );
            log::info!(
                "Category {category}: {:?}, {} deleted, {} bytes freed",
                result.outcome,
                result.deleted,
                result.bytes_freed
            );
        }
    }

    if let Some(ext) = &args.delete_ext {
        println!(
            "\n{}",
            format!("Preparing deletion for extension: {ext}").cyan()
        );
        let mut confirm = stdin_confirm();
        let result = deletion::delete_by_extension(&root, ext, args.min_age_days, &mut confirm)?;
        log::info!(
            "Extension {ext}: {:?}, {} deleted, {} bytes freed",
            result.outcome,
            result.deleted,
            result.bytes_freed
        );
    }

    Ok(())
}
