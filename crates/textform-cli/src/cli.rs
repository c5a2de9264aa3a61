//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use textform_schema::FieldType;

/// Textform CLI - Extract typed fields from free text via an LLM.
#[derive(Debug, Parser)]
#[command(name = "textform")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

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
    /// Quiet format (TSV / names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze text against the stored schema
    Analyze(AnalyzeArgs),

    /// View and edit the field schema
    Schema(SchemaArgs),

    /// Manage the stored API credential
    Key(KeyArgs),

    /// Check an email against the allow-list
    Access(AccessArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// File containing the text to analyze
    pub file: Option<PathBuf>,

    /// Read the text from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Print the result as tab-separated values only
    #[arg(long)]
    pub tsv: bool,
}

/// Arguments for the schema command.
#[derive(Debug, Parser)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub action: SchemaAction,
}

/// Schema editing operations.
#[derive(Debug, Subcommand)]
pub enum SchemaAction {
    /// Show the current schema
    Show,

    /// Append a blank field
    Add,

    /// Remove the field at a position
    Remove {
        /// Zero-based field position
        index: usize,
    },

    /// Move a field to a new position
    Move {
        /// Current position
        from: usize,
        /// Target position
        to: usize,
    },

    /// Rename the field at a position
    Rename {
        /// Zero-based field position
        index: usize,
        /// New field name (identifier syntax, unique)
        name: String,
    },

    /// Change the declared type of a field
    Retype {
        /// Zero-based field position
        index: usize,
        /// New field type
        #[arg(value_enum)]
        field_type: FieldTypeArg,
    },

    /// Set or clear a field's description
    Describe {
        /// Zero-based field position
        index: usize,
        /// Description text; omit to clear
        description: Option<String>,
    },

    /// Replace the schema from a JSON file
    Import {
        /// Path to a JSON array of field descriptors
        file: PathBuf,
    },

    /// Export the schema as indented JSON
    Export {
        /// Output path; prints to stdout when omitted
        file: Option<PathBuf>,
    },
}

/// Field type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FieldTypeArg {
    /// Free text
    String,
    /// Numeric value
    Number,
    /// ISO date (YYYY-MM-DD)
    Date,
    /// Boolean value
    Boolean,
}

impl From<FieldTypeArg> for FieldType {
    fn from(arg: FieldTypeArg) -> Self {
        match arg {
            FieldTypeArg::String => FieldType::String,
            FieldTypeArg::Number => FieldType::Number,
            FieldTypeArg::Date => FieldType::Date,
            FieldTypeArg::Boolean => FieldType::Boolean,
        }
    }
}

/// Arguments for the key command.
#[derive(Debug, Parser)]
pub struct KeyArgs {
    #[command(subcommand)]
    pub action: KeyAction,
}

/// Credential operations.
#[derive(Debug, Subcommand)]
pub enum KeyAction {
    /// Store an API credential
    Set {
        /// The credential token
        token: String,
    },

    /// Show whether a credential is stored
    Show,

    /// Remove the stored credential
    Remove,
}

/// Arguments for the access command.
#[derive(Debug, Parser)]
pub struct AccessArgs {
    /// Email address to check
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_schema_move() {
        let cli = Cli::parse_from(["textform", "schema", "move", "0", "2"]);
        match cli.command {
            Some(Command::Schema(args)) => match args.action {
                SchemaAction::Move { from, to } => {
                    assert_eq!(from, 0);
                    assert_eq!(to, 2);
                }
                other => panic!("unexpected action: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_analyze_tsv() {
        let cli = Cli::parse_from(["textform", "analyze", "input.txt", "--tsv"]);
        match cli.command {
            Some(Command::Analyze(args)) => {
                assert_eq!(args.file.unwrap().to_str(), Some("input.txt"));
                assert!(args.tsv);
                assert!(!args.stdin);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_field_type_arg_conversion() {
        assert_eq!(FieldType::from(FieldTypeArg::Date), FieldType::Date);
        assert_eq!(FieldType::from(FieldTypeArg::Boolean), FieldType::Boolean);
    }
}
