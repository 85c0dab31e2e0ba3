//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Caselink CLI - Explore the forensic case-link graph.
#[derive(Debug, Parser)]
#[command(name = "caselink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CASELINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List links, filtered and paginated
    Links(LinksArgs),

    /// Count and average strength per link type
    Summary,

    /// Show the neighborhood of a case or person
    Graph(GraphArgs),

    /// Show the icon and color for a node kind
    Resolve(ResolveArgs),

    /// Import a JSON record set into the local database
    Import(ImportArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the links command.
#[derive(Debug, Clone, Default, Parser)]
pub struct LinksArgs {
    /// Link type (DNA_MATCH, ID_NUMBER, EVIDENCE)
    #[arg(short = 't', long = "type")]
    pub link_type: Option<String>,

    /// Minimum strength (0.0-1.0)
    #[arg(short = 's', long)]
    pub min_strength: Option<f64>,

    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Links per page (config default when omitted)
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for the graph command.
#[derive(Debug, Clone, Parser)]
pub struct GraphArgs {
    /// Focal entity kind
    #[arg(value_enum)]
    pub kind: FocalArg,

    /// Focal entity ID
    pub id: u64,

    /// Expansion depth
    #[arg(short, long, default_value = "1")]
    pub depth: usize,
}

/// Arguments for the resolve command.
#[derive(Debug, Clone, Parser)]
pub struct ResolveArgs {
    /// Node kind (case, linked_case, person, dna, ...)
    pub kind: String,

    /// Person role (Suspect, Arrested, Reference)
    #[arg(short, long)]
    pub role: Option<String>,

    /// Color override
    #[arg(long)]
    pub color: Option<String>,
}

/// Arguments for the import command.
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// JSON file holding cases, persons, involvements, evidence and links
    pub file: PathBuf,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Local SQLite database
        #[arg(long, conflicts_with = "url", required_unless_present = "url")]
        database: Option<PathBuf>,
        /// Remote provider URL
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Focal entity kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FocalArg {
    /// A case
    Case,
    /// A person
    Person,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<FocalArg> for caselink_query::FocalKind {
    fn from(kind: FocalArg) -> Self {
        match kind {
            FocalArg::Case => caselink_query::FocalKind::Case,
            FocalArg::Person => caselink_query::FocalKind::Person,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_repl() {
        let cli = Cli::parse_from(["caselink"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_links_command() {
        let cli = Cli::parse_from([
            "caselink",
            "links",
            "--type",
            "DNA_MATCH",
            "--min-strength",
            "0.7",
            "--page",
            "2",
        ]);
        match cli.command {
            Some(Command::Links(args)) => {
                assert_eq!(args.link_type.as_deref(), Some("DNA_MATCH"));
                assert_eq!(args.min_strength, Some(0.7));
                assert_eq!(args.page, 2);
                assert_eq!(args.page_size, None);
            }
            _ => panic!("Expected Links command"),
        }
    }

    #[test]
    fn test_graph_command() {
        let cli = Cli::parse_from(["caselink", "--format", "json", "graph", "person", "42", "-d", "2"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Some(Command::Graph(args)) => {
                assert_eq!(args.kind, FocalArg::Person);
                assert_eq!(args.id, 42);
                assert_eq!(args.depth, 2);
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_profile_set_requires_source() {
        assert!(Cli::try_parse_from(["caselink", "profile", "set", "lab"]).is_err());
        assert!(Cli::try_parse_from([
            "caselink", "profile", "set", "lab", "--database", "a.db", "--url", "http://x"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["caselink", "profile", "set", "lab", "--url", "http://x"]).is_ok());
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
