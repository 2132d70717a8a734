use std::fmt::{self, Write as _};
use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use docdiff_core::{ComparisonReport, DiffConfig, DiffEngine, DiffStats, LineChange};
use docdiff_extract::{compare_documents, Document, ExtractorRegistry};
use docdiff_server::{DocdiffServer, ServerConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => Some(
            ServerConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
        ),
        None => None,
    };
    let mut diff = file_config
        .as_ref()
        .map(|c| c.diff.clone())
        .unwrap_or_default();
    apply_overrides(&mut diff, &cli);

    match cli.command {
        Command::Lines(args) => cmd_lines(diff, args, cli.format),
        Command::Text(args) => cmd_text(diff, args, cli.format),
        Command::Similarity(args) => cmd_similarity(diff, args, cli.format),
        Command::Serve(args) => {
            let config = ServerConfig {
                diff,
                ..file_config.unwrap_or_default()
            };
            cmd_serve(config, args)
        }
    }
}

fn apply_overrides(diff: &mut DiffConfig, cli: &Cli) {
    if let Some(max_gap) = cli.max_gap {
        diff.max_gap = max_gap;
    }
    if let Some(threshold) = cli.threshold {
        diff.modification_similarity_threshold = threshold;
    }
}

fn cmd_lines(diff: DiffConfig, args: PairArgs, format: OutputFormat) -> anyhow::Result<()> {
    let doc1 = load_document(&args.file1)?;
    let doc2 = load_document(&args.file2)?;
    let report = compare_documents(
        &DiffEngine::new(diff),
        &ExtractorRegistry::with_defaults(),
        &doc1,
        &doc2,
    );
    emit(&report, format, render_lines)
}

fn cmd_text(diff: DiffConfig, args: PairArgs, format: OutputFormat) -> anyhow::Result<()> {
    let text1 = read_text(&args.file1)?;
    let text2 = read_text(&args.file2)?;
    let report = DiffEngine::new(diff).compare_text(&text1, &text2);
    emit(&report, format, render_ranges)
}

fn cmd_similarity(diff: DiffConfig, args: SimilarityArgs, format: OutputFormat) -> anyhow::Result<()> {
    let score = DiffEngine::new(diff).try_similarity(&args.a, &args.b)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&score)?),
        OutputFormat::Text => {
            let verdict = if score.similar {
                "similar".green()
            } else {
                "different".yellow()
            };
            println!("Similarity: {} ({})", format!("{:.4}", score.ratio).bold(), verdict);
        }
    }
    Ok(())
}

fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind address {bind}"))?;
    }
    println!("docdiff server on {}", config.bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(DocdiffServer::new(config).serve())?;
    Ok(())
}

fn load_document(path: &Path) -> anyhow::Result<Document> {
    Document::from_path(path).with_context(|| format!("reading {}", path.display()))
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

type Render = fn(&mut String, &ComparisonReport) -> fmt::Result;

/// Print a report, then fail if the comparison did not succeed.
fn emit(report: &ComparisonReport, format: OutputFormat, render: Render) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text if report.success => {
            let mut out = String::new();
            render(&mut out, report)?;
            print!("{out}");
        }
        OutputFormat::Text => {}
    }
    if !report.success {
        anyhow::bail!(report
            .error
            .clone()
            .unwrap_or_else(|| "comparison failed".into()));
    }
    Ok(())
}

fn render_lines(out: &mut String, report: &ComparisonReport) -> fmt::Result {
    for change in report.line_changes() {
        let n = change.line_number();
        match change {
            LineChange::Unchanged { content, .. } => {
                writeln!(out, "  {n:>4}  {}", content.dimmed())?
            }
            LineChange::Addition { content, .. } => {
                writeln!(out, "{} {n:>4}  {}", "+".green().bold(), content.green())?
            }
            LineChange::Deletion { content, .. } => {
                writeln!(out, "{} {n:>4}  {}", "-".red().bold(), content.red())?
            }
            LineChange::Modification { content, .. } => writeln!(
                out,
                "{} {n:>4}  {} → {}",
                "~".yellow().bold(),
                content.old.red(),
                content.new.green()
            )?,
        }
    }
    write_summary(out, report.stats.as_ref())
}

fn render_ranges(out: &mut String, report: &ComparisonReport) -> fmt::Result {
    for range in report.diff_ranges() {
        writeln!(
            out,
            "{:<12} [{}..{}] {:?} → [{}..{}] {:?}",
            range.kind.to_string().yellow(),
            range.file1.start,
            range.file1.end,
            range.file1.text,
            range.file2.start,
            range.file2.end,
            range.file2.text,
        )?;
    }
    write_summary(out, report.stats.as_ref())
}

fn write_summary(out: &mut String, stats: Option<&DiffStats>) -> fmt::Result {
    let Some(stats) = stats else { return Ok(()) };
    if stats.is_identical() {
        return writeln!(out, "{} No differences.", "✓".green().bold());
    }
    write!(
        out,
        "{} additions, {} deletions, {} modifications",
        stats.additions.to_string().green(),
        stats.deletions.to_string().red(),
        stats.modifications.to_string().yellow()
    )?;
    if let Some(unchanged) = stats.unchanged {
        write!(out, ", {unchanged} unchanged")?;
    }
    writeln!(out)
}
