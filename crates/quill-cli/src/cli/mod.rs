use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `quill` binary.
#[derive(Debug, Parser)]
#[command(name = "quill", version, about = "Quill - content marketing dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (no notifications, errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;
    use quill_core::entities::PerformanceRange;
    use quill_core::enums::{AbMetric, ProjectStatus};

    use super::subcommands::{
        AbTestCommands, AnalyticsCommands, AuthCommands, ModeCommands, ProjectCommands,
    };
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["quill", "auth", "status", "--format", "table", "-q"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["quill", "--format", "xml", "auth", "status"]).is_err());
    }

    #[test]
    fn ab_test_record_parses_metric() {
        let cli = Cli::try_parse_from([
            "quill",
            "ab-test",
            "record",
            "ab-1",
            "--variant",
            "ab-1-v2",
            "--metric",
            "conversion",
        ])
        .expect("cli should parse");

        let Commands::AbTest {
            action: AbTestCommands::Record(args),
        } = cli.command
        else {
            panic!("expected ab-test record");
        };
        assert_eq!(args.id, "ab-1");
        assert_eq!(args.variant, "ab-1-v2");
        assert_eq!(args.metric, AbMetric::Conversion);
    }

    #[test]
    fn project_list_accepts_status_filter() {
        let cli = Cli::try_parse_from(["quill", "project", "list", "--status", "published"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Project {
                action: ProjectCommands::List {
                    status: Some(ProjectStatus::Published)
                }
            }
        ));
    }

    #[test]
    fn analytics_range_defaults_to_thirty_days() {
        let cli = Cli::try_parse_from(["quill", "analytics", "performance"])
            .expect("cli should parse");
        let Commands::Analytics {
            action: AnalyticsCommands::Performance { range },
        } = cli.command
        else {
            panic!("expected analytics performance");
        };
        assert_eq!(range, PerformanceRange::default());

        assert!(Cli::try_parse_from(["quill", "analytics", "overview", "--range", "0"]).is_err());
    }

    #[test]
    fn mode_set_takes_a_backend_name() {
        let cli = Cli::try_parse_from(["quill", "mode", "set", "mock"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Mode {
                action: ModeCommands::Set { .. }
            }
        ));
        assert!(Cli::try_parse_from(["quill", "mode", "set", "staging"]).is_err());
    }
}
