use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `parkit` binary.
#[derive(Debug, Parser)]
#[command(name = "parkit", version, about = "parkit - parking facility ticketing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database path (defaults to `database.path` from config)
    #[arg(long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use park_core::enums::VehicleCategory;
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["parkit", "--format", "json", "--verbose", "shell"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Shell));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["parkit", "shell", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn enter_parses_category_case_insensitively() {
        let cli = Cli::try_parse_from(["parkit", "enter", "--plate", "ABCDEF", "--category", "BIKE"])
            .expect("cli should parse");

        let Commands::Enter(args) = cli.command else {
            panic!("expected enter");
        };
        assert_eq!(args.plate, "ABCDEF");
        assert_eq!(args.category, VehicleCategory::Bike);
    }

    #[test]
    fn enter_rejects_unknown_category() {
        let parsed = Cli::try_parse_from(["parkit", "enter", "--plate", "X", "--category", "truck"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn history_limit_defaults() {
        let cli = Cli::try_parse_from(["parkit", "history", "--plate", "ABCDEF"])
            .expect("cli should parse");

        let Commands::History(args) = cli.command else {
            panic!("expected history");
        };
        assert_eq!(args.limit, 20);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["parkit", "--format", "xml", "shell"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["parkit", "--db", "/tmp/demo.db", "spots"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/demo.db"));
        assert_eq!(flags.format, OutputFormat::Table);
    }
}
