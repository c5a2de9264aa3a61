//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL holds the latest extraction result and doubles as the result
//! editor: `set` rewrites individual fields, `tsv` serializes them for the
//! clipboard. The session blocks on each `analyze` call, so a second
//! extraction cannot start while one is outstanding.

use crate::cli::{FieldTypeArg, KeyAction, SchemaAction};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use textform_schema::{ExtractionResult, FieldValue, Schema};
use textform_store::SchemaStore;

/// Run the interactive REPL.
pub async fn run_repl(config: &Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Textform REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let mut editor = DefaultEditor::with_config(editor_config(config.settings.history_size)?)
        .map_err(|e| {
            CliError::Io(std::io::Error::other(format!(
                "Failed to initialize editor: {}",
                e
            )))
        })?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let store = SchemaStore::default_location()?;
    let mut schema = store.load()?;
    let mut result: Option<ExtractionResult> = None;

    loop {
        let prompt = if result.is_some() {
            "textform [result]> "
        } else {
            "textform> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) =
                            execute_repl_command(cmd, &mut schema, &store, &mut result, config, formatter)
                                .await
                        {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
enum ReplCommand {
    Exit,
    Help,
    Analyze { source: String },
    Set { field: String, value: Option<String> },
    Show,
    Tsv,
    Schema(SchemaAction),
    Key(KeyAction),
    Access { email: String },
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "analyze" => {
            let source = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: analyze <file|->".to_string()))?;
            Ok(ReplCommand::Analyze {
                source: source.to_string(),
            })
        }
        "set" => {
            let field = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: set <field> [value]".to_string()))?;
            let value = if parts.len() > 2 {
                Some(parts[2..].join(" "))
            } else {
                None
            };
            Ok(ReplCommand::Set {
                field: field.to_string(),
                value,
            })
        }
        "show" => Ok(ReplCommand::Show),
        "tsv" | "copy" => Ok(ReplCommand::Tsv),
        "schema" => parse_schema_command(&parts[1..]),
        "key" => parse_key_command(&parts[1..]),
        "access" => {
            let email = parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: access <email>".to_string()))?;
            Ok(ReplCommand::Access {
                email: email.to_string(),
            })
        }
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Parse a `schema ...` REPL command.
fn parse_schema_command(parts: &[&str]) -> Result<ReplCommand> {
    let usage = || {
        CliError::InvalidInput(
            "Usage: schema <show|add|remove|move|rename|retype|describe|import|export> ..."
                .to_string(),
        )
    };

    let action = match parts.first().copied().unwrap_or("show") {
        "show" => SchemaAction::Show,
        "add" => SchemaAction::Add,
        "remove" => SchemaAction::Remove {
            index: parse_index(parts.get(1))?,
        },
        "move" => SchemaAction::Move {
            from: parse_index(parts.get(1))?,
            to: parse_index(parts.get(2))?,
        },
        "rename" => SchemaAction::Rename {
            index: parse_index(parts.get(1))?,
            name: parts
                .get(2)
                .ok_or_else(|| CliError::InvalidInput("Usage: schema rename <index> <name>".to_string()))?
                .to_string(),
        },
        "retype" => SchemaAction::Retype {
            index: parse_index(parts.get(1))?,
            field_type: parse_field_type(parts.get(2))?,
        },
        "describe" => SchemaAction::Describe {
            index: parse_index(parts.get(1))?,
            description: if parts.len() > 2 {
                Some(parts[2..].join(" "))
            } else {
                None
            },
        },
        "import" => SchemaAction::Import {
            file: PathBuf::from(
                parts
                    .get(1)
                    .ok_or_else(|| CliError::InvalidInput("Usage: schema import <file>".to_string()))?,
            ),
        },
        "export" => SchemaAction::Export {
            file: parts.get(1).map(PathBuf::from),
        },
        _ => return Err(usage()),
    };

    Ok(ReplCommand::Schema(action))
}

/// Parse a `key ...` REPL command.
fn parse_key_command(parts: &[&str]) -> Result<ReplCommand> {
    let action = match parts.first().copied() {
        Some("set") => KeyAction::Set {
            token: parts
                .get(1)
                .ok_or_else(|| CliError::InvalidInput("Usage: key set <token>".to_string()))?
                .to_string(),
        },
        Some("show") | None => KeyAction::Show,
        Some("remove") => KeyAction::Remove,
        Some(other) => {
            return Err(CliError::InvalidInput(format!(
                "Unknown key action: {}",
                other
            )))
        }
    };

    Ok(ReplCommand::Key(action))
}

fn parse_index(part: Option<&&str>) -> Result<usize> {
    part.ok_or_else(|| CliError::InvalidInput("Missing field position".to_string()))?
        .parse()
        .map_err(|_| CliError::InvalidInput("Field position must be a number".to_string()))
}

fn parse_field_type(part: Option<&&str>) -> Result<FieldTypeArg> {
    match part.copied() {
        Some("string") => Ok(FieldTypeArg::String),
        Some("number") => Ok(FieldTypeArg::Number),
        Some("date") => Ok(FieldTypeArg::Date),
        Some("boolean") => Ok(FieldTypeArg::Boolean),
        _ => Err(CliError::InvalidInput(
            "Field type must be one of: string, number, date, boolean".to_string(),
        )),
    }
}

/// Execute a REPL command against the session state.
async fn execute_repl_command(
    cmd: ReplCommand,
    schema: &mut Schema,
    store: &SchemaStore,
    result: &mut Option<ExtractionResult>,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Analyze { source } => {
            let text = if source == "-" {
                commands::analyze::read_input(None, true)?
            } else {
                commands::analyze::read_input(Some(source.as_ref()), false)?
            };

            println!("{}", formatter.info("Analyzing..."));
            let new_result = commands::analyze::run_analysis(&text, schema, config).await?;
            println!("{}", formatter.format_result(&new_result, schema)?);
            *result = Some(new_result);
        }
        ReplCommand::Set { field, value } => {
            if !schema.fields().iter().any(|f| f.name == field) {
                return Err(CliError::InvalidInput(format!(
                    "No field named '{}' in the schema",
                    field
                )));
            }
            let new_value = match value {
                Some(text) => FieldValue::Text(text),
                None => FieldValue::Null,
            };
            let updated = result
                .as_ref()
                .ok_or(CliError::NoResult)?
                .with_field(field, new_value);
            *result = Some(updated);
            println!("{}", formatter.success("Field updated"));
        }
        ReplCommand::Show => {
            let current = result.as_ref().ok_or(CliError::NoResult)?;
            println!("{}", formatter.format_result(current, schema)?);
        }
        ReplCommand::Tsv => {
            let current = result.as_ref().ok_or(CliError::NoResult)?;
            println!("{}", current.to_tsv(schema));
        }
        ReplCommand::Schema(action) => {
            commands::schema::apply_schema_action(action, schema, store, formatter)?;
        }
        ReplCommand::Key(action) => {
            commands::execute_key(crate::cli::KeyArgs { action }, formatter)?;
        }
        ReplCommand::Access { email } => {
            commands::execute_access(crate::cli::AccessArgs { email }, config, formatter)?;
        }
        ReplCommand::Exit | ReplCommand::Help => unreachable!(),
    }

    Ok(())
}

/// Print REPL help.
fn print_help(formatter: &Formatter) {
    println!("REPL commands:");
    println!("  analyze <file|->             Extract fields from a file or stdin");
    println!("  set <field> [value]          Overwrite a result field (no value sets null)");
    println!("  show                         Show the current result");
    println!("  tsv                          Print result values as tab-separated text");
    println!("  schema show                  Show the schema");
    println!("  schema add                   Append a blank field");
    println!("  schema remove <i>            Remove the field at position i");
    println!("  schema move <from> <to>      Reorder fields");
    println!("  schema rename <i> <name>     Rename a field");
    println!("  schema retype <i> <type>     Change a field's type");
    println!("  schema describe <i> [text]   Set or clear a field's description");
    println!("  schema import <file>         Replace the schema from a JSON file");
    println!("  schema export [file]         Export the schema as JSON");
    println!("  key set <token> | show | remove");
    println!("  access <email>               Check the allow-list");
    println!("  help                         Show this help");
    println!("  exit                         Quit");
    println!();
    println!(
        "{}",
        formatter.info("Pipe 'tsv' output to your clipboard tool to paste into a spreadsheet")
    );
}

/// Build the line-editor configuration, applying the configured history size.
fn editor_config(history_size: usize) -> Result<rustyline::Config> {
    rustyline::Config::builder()
        .max_history_size(history_size)
        .map_err(|e| {
            CliError::Io(std::io::Error::other(format!(
                "Invalid history size: {}",
                e
            )))
        })
        .map(|builder| builder.build())
}

/// Get the REPL history file path.
fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".textform").join("history"))
}
