//! Catalog validation CLI tool
//!
//! Validates a coursegate catalog file and reports any errors.

use anyhow::Context;
use clap::Parser;
use coursegate_config::{Catalog, ConfigError, CURRENT_CATALOG_VERSION};
use coursegate_util::{Clock, SystemClock, default_catalog_path};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// validate-catalog - check a coursegate catalog file
#[derive(Parser, Debug)]
#[command(name = "validate-catalog")]
#[command(about = "Validates a coursegate catalog file", long_about = None)]
struct Args {
    /// Catalog file path (default: ~/.config/coursegate/catalog.toml)
    #[arg(default_value_os_t = default_catalog_path())]
    catalog: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::from_env());

    match load(&args.catalog, clock.clone()) {
        Ok(catalog) => {
            print_summary(&catalog, clock.as_ref());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Catalog validation failed");
            eprintln!();
            match e.downcast_ref::<ConfigError>() {
                Some(ConfigError::ValidationFailed { errors }) => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                Some(ConfigError::UnsupportedVersion(ver)) => {
                    eprintln!(
                        "Unsupported catalog version: {} (expected {})",
                        ver, CURRENT_CATALOG_VERSION
                    );
                }
                _ => eprintln!("{:#}", e),
            }
            ExitCode::from(1)
        }
    }
}

fn load(path: &Path, clock: Arc<dyn Clock>) -> anyhow::Result<Catalog> {
    anyhow::ensure!(path.exists(), "Catalog file not found: {}", path.display());
    coursegate_config::load_catalog(path, clock)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))
}

fn print_summary(catalog: &Catalog, clock: &dyn Clock) {
    let now = clock.now();
    let dates = &catalog.dates;

    println!("✓ Catalog is valid");
    println!();
    println!("Summary:");
    println!("  Catalog version: {}", CURRENT_CATALOG_VERSION);
    println!("  Courses: {}", catalog.courses.len());

    for course in &catalog.courses {
        let window = course.window();
        let start = window
            .start()
            .map(|s| dates.format(&s))
            .unwrap_or_else(|| "-".into());
        let end = window
            .end()
            .map(|e| dates.format(&e))
            .unwrap_or_else(|| "open".into());

        println!();
        println!("  - {} [{} .. {}]", course.name(), start, end);
        println!("    Lessons: {}", course.lesson_titles().join(", "));
        println!("    Homework: {}", course.homework_titles().join(", "));
        if !course.prep_material_titles().is_empty() {
            println!("    Prep material: {}", course.prep_material_titles().join(", "));
        }

        let active = course
            .enrolments()
            .values()
            .filter(|e| e.is_active(now))
            .count();
        println!(
            "    Enrolments: {} ({} active now)",
            course.enrolments().len(),
            active
        );
    }
}
