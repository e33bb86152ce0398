use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "factmerge",
    about = "Merge device facts from several probes and diff them against the stored baseline",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file replacing the built-in configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge every record-table component and print the result
    Merge(MergeArgs),
    /// Diff facts that already carry a "merged" source
    Diff(DiffArgs),
    /// Merge, then diff against the baseline
    Reconcile(ReconcileArgs),
    /// Pick each component's value from its most trusted source
    Select(SelectArgs),
    /// Show sources in merge order with their quality
    Rank(RankArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct MergeArgs {
    /// JSON file with the device's facts
    pub facts: PathBuf,
    /// Only print this component
    #[arg(short, long)]
    pub component: Option<String>,
    /// Sort record tables by their unique fields
    #[arg(long)]
    pub sort: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    pub facts: PathBuf,
    /// Compare record tables against this source instead of "merged"
    #[arg(long)]
    pub against: Option<String>,
}

#[derive(Args)]
pub struct ReconcileArgs {
    pub facts: PathBuf,
    /// Only print components that differ
    #[arg(long)]
    pub changed_only: bool,
}

#[derive(Args)]
pub struct SelectArgs {
    pub facts: PathBuf,
    /// The scan came through a management address
    #[arg(long)]
    pub management: bool,
}

#[derive(Args)]
pub struct RankArgs {
    pub component: String,
    #[arg(required = true)]
    pub sources: Vec<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the built-in defaults even when --config is given
    #[arg(long)]
    pub defaults: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let cli = Cli::try_parse_from(["factmerge", "config"]).unwrap();
        assert!(!cli.verbose);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.config.is_none());
        if let Command::Config(args) = cli.command {
            assert!(!args.defaults);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "factmerge", "reconcile", "facts.json", "-v", "--format", "json", "--config", "recon.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("recon.toml")));
    }

    #[test]
    fn parse_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["factmerge", "--format", "yaml", "config"]).is_err());
    }

    #[test]
    fn parse_merge() {
        let cli = Cli::try_parse_from(["factmerge", "merge", "facts.json"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.facts, PathBuf::from("facts.json"));
            assert!(args.component.is_none());
            assert!(!args.sort);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge_component_sorted() {
        let cli = Cli::try_parse_from(["factmerge", "merge", "facts.json", "-c", "memory", "--sort"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.component, Some("memory".into()));
            assert!(args.sort);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge_requires_facts() {
        assert!(Cli::try_parse_from(["factmerge", "merge"]).is_err());
    }

    #[test]
    fn parse_diff_against() {
        let cli = Cli::try_parse_from(["factmerge", "diff", "facts.json", "--against", "puppet"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.against, Some("puppet".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_reconcile_changed_only() {
        let cli = Cli::try_parse_from(["factmerge", "reconcile", "facts.json", "--changed-only"]).unwrap();
        if let Command::Reconcile(args) = cli.command {
            assert!(args.changed_only);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_select_management() {
        let cli = Cli::try_parse_from(["factmerge", "select", "facts.json", "--management"]).unwrap();
        if let Command::Select(args) = cli.command {
            assert!(args.management);
            assert_eq!(args.facts, PathBuf::from("facts.json"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_rank() {
        let cli = Cli::try_parse_from(["factmerge", "rank", "memory", "ssh_linux", "puppet"]).unwrap();
        if let Command::Rank(args) = cli.command {
            assert_eq!(args.component, "memory");
            assert_eq!(args.sources, vec!["ssh_linux", "puppet"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_rank_requires_a_source() {
        assert!(Cli::try_parse_from(["factmerge", "rank", "memory"]).is_err());
    }

    #[test]
    fn parse_config_defaults() {
        let cli = Cli::try_parse_from(["factmerge", "config", "--defaults"]).unwrap();
        if let Command::Config(args) = cli.command {
            assert!(args.defaults);
        } else { panic!("wrong command"); }
    }
}
