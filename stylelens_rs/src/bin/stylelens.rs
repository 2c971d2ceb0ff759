//! `stylelens` command-line host.
//!
//! Discovers documents under a project root, runs the analysis and prints
//! either a human summary or JSON. `plan` prints a refactor plan without
//! applying it.

use std::any::Any;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use console::style;
use tracing::{debug, info};

use stylelens::fs_utils::{Workspace, discover};
use stylelens::{
    AnalysisConfig, DuplicateGroup, FileId, Report, Severity, StylelensConfig, UsageKind,
    UtilityVocabulary, analyze, plan_inline_style_extraction, plan_refactor,
    select_target_stylesheet,
};

#[derive(Parser, Debug)]
#[command(name = "stylelens")]
#[command(about = "Find duplicated and undefined styling in JSX, Vue and Svelte projects")]
#[command(version)]
struct Args {
    /// Project root to scan
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Utility vocabulary JSON (overrides `.stylelens/config.toml`)
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze the project and print a summary
    Analyze {
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a refactor plan for one duplicate group
    Plan {
        /// Normalized key of the group (e.g. "btn primary")
        #[arg(long)]
        key: String,

        /// Name of the class to extract
        #[arg(long)]
        name: String,

        /// Plan an inline-style group instead of a class group
        #[arg(long)]
        inline: bool,

        /// Stylesheet receiving the new rule, relative to the root
        #[arg(long)]
        target: Option<String>,
    },
}

/// Panic payload raised by `println!` once stdout's reader has gone away.
fn is_broken_pipe(payload: &(dyn Any + Send)) -> bool {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str));
    message.is_some_and(|m| m.contains("Broken pipe"))
}

/// `stylelens analyze | head` should end quietly, not with a panic report.
fn exit_quietly_on_broken_pipe() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if is_broken_pipe(info.payload()) {
            std::process::exit(0);
        }
        previous(info);
    }));
}

/// Analysis settings plus the extra ignore globs from the config file.
fn load_config(args: &Args) -> Result<(AnalysisConfig, Vec<String>)> {
    let file_config = StylelensConfig::load(&args.root);

    let vocabulary_path = args
        .vocabulary
        .clone()
        .or_else(|| file_config.vocabulary.as_ref().map(|p| args.root.join(p)));
    let vocabulary = match vocabulary_path {
        Some(path) => UtilityVocabulary::load(&path)
            .with_context(|| format!("Failed to load vocabulary {}", path.display()))?,
        None => UtilityVocabulary::default(),
    };
    debug!(classes = vocabulary.len(), "utility vocabulary loaded");

    let config = file_config.analysis_config(vocabulary);
    Ok((config, file_config.ignore))
}

fn scan(root: &Path, config: &AnalysisConfig, ignore: &[String]) -> Result<(Workspace, Report)> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }
    let workspace = discover(root, ignore);
    info!(
        components = workspace.components.len(),
        stylesheets = workspace.stylesheets.len(),
        "scanning {}",
        root.display()
    );
    let report = analyze(&workspace.components, &workspace.stylesheets, config);
    Ok((workspace, report))
}

fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Critical => style(severity.label()).red().bold().to_string(),
        Severity::Warning => style(severity.label()).yellow().to_string(),
        Severity::Normal => style(severity.label()).dim().to_string(),
    }
}

fn print_groups(title: &str, groups: &[DuplicateGroup]) {
    if groups.is_empty() {
        return;
    }
    println!("{}", style(title).bold());
    for group in groups {
        println!(
            "  {:>3}x  [{}]  {}",
            group.count,
            severity_label(group.severity),
            group.key
        );
        for occurrence in &group.occurrences {
            println!(
                "         {}:{}:{}",
                occurrence.source_file,
                occurrence.location.start_line + 1,
                occurrence.location.start_col + 1
            );
        }
    }
    println!();
}

fn print_summary(report: &Report) {
    print_groups("Duplicate class combinations", &report.duplicates);
    print_groups("Duplicate inline styles", &report.inline_style_duplicates);

    if !report.undefined_classes.is_empty() {
        println!("{}", style("Undefined classes").bold());
        for record in &report.undefined_classes {
            println!(
                "  {}  {}:{}",
                style(&record.class_name).cyan(),
                record.source_file,
                record.location.start_line + 1
            );
        }
        println!();
    }

    if !report.class_heat.hot.is_empty() {
        println!("{}", style("Most used classes").bold());
        for entry in &report.class_heat.hot {
            println!("  {:>4}  {}", entry.occurrence_count, entry.class_name);
        }
        println!();
    }

    if !report.recommendations.is_empty() {
        println!("{}", style("Recommended extractions").bold());
        for group in &report.recommendations {
            println!("  {}", group.key);
        }
        println!();
    }

    for skipped in &report.skipped_documents {
        eprintln!(
            "{} {}: {}",
            style("skipped").yellow(),
            skipped.file,
            skipped.reason
        );
    }

    let summary = &report.duplicate_summary;
    if report.is_clean() {
        println!("{}", style("No styling problems found.").green());
    } else {
        println!(
            "{} duplicate groups ({} critical, {} warning, {} normal), {} undefined classes",
            summary.total(),
            summary.critical,
            summary.warning,
            summary.normal,
            report.undefined_classes.len()
        );
    }
}

fn run_analyze(args: &Args, json: bool) -> Result<()> {
    let (config, ignore) = load_config(args)?;
    let (_, report) = scan(&args.root, &config, &ignore)?;
    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{out}");
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn run_plan(args: &Args, key: &str, name: &str, inline: bool, target: Option<&str>) -> Result<()> {
    let (config, ignore) = load_config(args)?;
    let (workspace, report) = scan(&args.root, &config, &ignore)?;

    let kind = if inline {
        UsageKind::InlineStyle
    } else {
        UsageKind::Class
    };
    let group = report
        .group(kind, key)
        .ok_or_else(|| anyhow!("no duplicate group with key '{key}'"))?;

    let target = match target {
        Some(path) => FileId::from(path),
        None => select_target_stylesheet(&workspace.stylesheet_ids())
            .ok_or_else(|| anyhow!("no stylesheet available to receive the new rule"))?,
    };

    let plan = if inline {
        plan_inline_style_extraction(group, name, &target)?
    } else {
        plan_refactor(group, name, &target)?
    };

    let out = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
    println!("{out}");
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    match &args.command {
        Command::Analyze { json } => run_analyze(args, *json),
        Command::Plan {
            key,
            name,
            inline,
            target,
        } => run_plan(args, key, name, *inline, target.as_deref()),
    }
}

fn main() -> ExitCode {
    exit_quietly_on_broken_pipe();

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
