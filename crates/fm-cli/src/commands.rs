use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use fm_diff::{DiffEngine, DiffReport, ReportKind, Status};
use fm_rank::QualityTable;
use fm_scan::{sort_results, Facts, ReconConfig, Reconciler, Record, ScanInput};
use fm_types::MERGED_SOURCE;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    let config_path = cli.config;
    match cli.command {
        Command::Merge(args) => cmd_merge(args, config_path.as_deref(), format),
        Command::Diff(args) => cmd_diff(args, config_path.as_deref(), format),
        Command::Reconcile(args) => cmd_reconcile(args, config_path.as_deref(), format),
        Command::Select(args) => cmd_select(args, config_path.as_deref(), format),
        Command::Rank(args) => cmd_rank(args, config_path.as_deref(), format),
        Command::Config(args) => cmd_config(args, config_path.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ReconConfig> {
    match path {
        Some(path) => ReconConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(ReconConfig::default()),
    }
}

fn read_input(path: &Path) -> anyhow::Result<ScanInput> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    ScanInput::from_json(&text).with_context(|| format!("parsing {}", path.display()))
}

fn reconciler_for(config: ReconConfig, input: &ScanInput) -> anyhow::Result<Reconciler> {
    let reconciler = Reconciler::new(config)?;
    Ok(reconciler.with_external(input.external_priorities.clone()))
}

fn cmd_merge(args: MergeArgs, config: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let input = read_input(&args.facts)?;
    let reconciler = reconciler_for(config, &input)?;
    let mut merged = reconciler.merge_device(&input.facts)?;
    if args.sort {
        sort_results(&mut merged, reconciler.config());
    }

    let tables: BTreeMap<&str, &[Record]> = merged
        .iter()
        .filter(|(component, _)| args.component.as_deref().map_or(true, |c| c == component.as_str()))
        .filter_map(|(component, by_source)| {
            by_source
                .get(MERGED_SOURCE)
                .and_then(Facts::as_table)
                .map(|rows| (component.as_str(), rows))
        })
        .collect();

    if let Some(component) = &args.component {
        if tables.is_empty() {
            anyhow::bail!("{component} is not a record table present in {}", args.facts.display());
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tables)?),
        OutputFormat::Text => {
            for (component, rows) in &tables {
                println!("{} ({} records)", component.bold(), rows.len());
                for row in *rows {
                    println!("  {}", render_record(row));
                }
            }
        }
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs, config: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(config)?;
    config.validate()?;
    let input = read_input(&args.facts)?;
    let mut engine = DiffEngine::new(config);
    if let Some(source) = args.against {
        engine = engine.with_proposed_source(source);
    }
    print_reports(&engine.diff(&input.facts), format)
}

fn cmd_reconcile(args: ReconcileArgs, config: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let input = read_input(&args.facts)?;
    let outcome = Reconciler::new(config)?.reconcile_input(&input)?;
    let mut reports = outcome.diff;
    if args.changed_only {
        reports.retain(|_, report| !report.is_equal);
    }
    print_reports(&reports, format)
}

fn cmd_select(args: SelectArgs, config: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let input = read_input(&args.facts)?;
    let reconciler = reconciler_for(config, &input)?;
    let selected = reconciler.select(&input.facts, args.management || input.is_management);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&selected)?),
        OutputFormat::Text => {
            for (component, facts) in &selected {
                println!("{}: {}", component.bold(), render_facts(facts));
            }
        }
    }
    Ok(())
}

fn cmd_rank(args: RankArgs, config: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let table = QualityTable::from_config(&config);
    let ranked = table.rank_sources(args.sources.as_slice(), &args.component);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ranked)?),
        OutputFormat::Text => {
            println!("Merge order for {} (lowest trust first):", args.component.bold());
            for (position, source) in ranked.iter().enumerate() {
                let quality = source.quality.to_string();
                let quality = if table.explicit_quality(&source.source, &args.component).is_some() {
                    quality.cyan()
                } else {
                    format!("{quality} (default)").dimmed()
                };
                println!("  {}. {} {}", position + 1, source.source.yellow(), quality);
            }
        }
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let config = if args.defaults {
        ReconConfig::default()
    } else {
        load_config(config)?
    };
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn print_reports(reports: &BTreeMap<String, DiffReport>, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", fm_diff::reports_to_json(reports)?);
        return Ok(());
    }
    if reports.is_empty() {
        println!("Nothing to report.");
        return Ok(());
    }
    for (component, report) in reports {
        print_report(component, report);
    }
    let changed = reports.values().filter(|r| !r.is_equal).count();
    if changed == 0 {
        println!("{} All {} components match the baseline.", "✓".green().bold(), reports.len());
    } else {
        println!("{} {} of {} components differ.", "✗".red().bold(), changed, reports.len());
    }
    Ok(())
}

fn print_report(component: &str, report: &DiffReport) {
    let mark = if report.is_equal { "=".green() } else { "≠".red() };
    print!("{} {} [{}]", mark, component.bold(), report.kind.label().dimmed());
    if report.meta.no_value.iter().any(|c| c == component) {
        print!(" {}", "(no value)".dimmed());
    }
    println!();

    if report.kind != ReportKind::Dicts {
        return;
    }
    for entry in report.entries() {
        let line = format!("{:>1} {}", entry.status.symbol(), render_record(&entry.items));
        let line = match entry.status {
            Status::Added => line.green(),
            Status::Removed => line.red(),
            Status::Changed => line.yellow(),
            Status::Unchanged => line.normal(),
        };
        println!("    {line}");
        if entry.status != Status::Changed {
            continue;
        }
        if let Some(fields) = &entry.dict_diff {
            for (field, diff) in fields.iter().filter(|(_, d)| d.status != Status::Unchanged) {
                println!(
                    "        {} {}: {} → {}",
                    diff.status.symbol(),
                    field,
                    diff.left_value.red(),
                    diff.right_value.green()
                );
            }
        }
    }
    println!(
        "    {} added, {} removed, {} changed",
        report.meta.add_items_count, report.meta.remove_items_count, report.meta.change_items_count
    );
}

fn render_record(record: &Record) -> String {
    record
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(field, value)| format!("{field}={}", value.trimmed()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_facts(facts: &Facts) -> String {
    match facts {
        Facts::Scalar(value) => value.trimmed(),
        Facts::List(values) => values
            .iter()
            .map(|v| v.trimmed())
            .collect::<Vec<_>>()
            .join(", "),
        Facts::Table(rows) => format!("{} records", rows.len()),
    }
}
