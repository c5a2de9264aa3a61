//! Schema command implementation.

use crate::cli::{SchemaAction, SchemaArgs};
use crate::error::Result;
use crate::output::Formatter;
use std::fs;
use textform_schema::Schema;
use textform_store::SchemaStore;

/// Execute the schema command.
pub fn execute_schema(args: SchemaArgs, formatter: &Formatter) -> Result<()> {
    let store = SchemaStore::default_location()?;
    let mut schema = store.load()?;
    apply_schema_action(args.action, &mut schema, &store, formatter)
}

/// Apply one schema action, persisting after every mutation.
///
/// Shared by the subcommand and the REPL (which keeps the schema in its
/// session).
pub fn apply_schema_action(
    action: SchemaAction,
    schema: &mut Schema,
    store: &SchemaStore,
    formatter: &Formatter,
) -> Result<()> {
    match action {
        SchemaAction::Show => {
            println!("{}", formatter.format_schema(schema)?);
            warn_violations(schema, formatter);
        }
        SchemaAction::Add => {
            schema.add_field();
            store.save(schema)?;
            println!(
                "{}",
                formatter.success(&format!("Added blank field at position {}", schema.len() - 1))
            );
        }
        SchemaAction::Remove { index } => {
            let removed = schema.remove_field(index)?;
            store.save(schema)?;
            println!("{}", formatter.success(&format!("Removed field '{}'", removed.name)));
        }
        SchemaAction::Move { from, to } => {
            schema.move_field(from, to)?;
            store.save(schema)?;
            println!(
                "{}",
                formatter.success(&format!("Moved field from position {} to {}", from, to))
            );
        }
        SchemaAction::Rename { index, name } => {
            schema.rename_field(index, &name)?;
            store.save(schema)?;
            println!(
                "{}",
                formatter.success(&format!("Renamed field {} to '{}'", index, name))
            );
        }
        SchemaAction::Retype { index, field_type } => {
            schema.set_field_type(index, field_type.into())?;
            store.save(schema)?;
            println!("{}", formatter.success(&format!("Changed type of field {}", index)));
        }
        SchemaAction::Describe { index, description } => {
            schema.set_field_description(index, description)?;
            store.save(schema)?;
            println!("{}", formatter.success(&format!("Updated description of field {}", index)));
        }
        SchemaAction::Import { file } => {
            let json = fs::read_to_string(&file)?;
            *schema = Schema::from_json(&json)?;
            store.save(schema)?;
            println!(
                "{}",
                formatter.success(&format!("Imported {} field(s)", schema.len()))
            );
            warn_violations(schema, formatter);
        }
        SchemaAction::Export { file } => {
            let json = schema.to_json_pretty();
            match file {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!(
                        "{}",
                        formatter.success(&format!("Exported schema to {}", path.display()))
                    );
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}

/// Print per-field name violations. Editing an invalid schema is allowed;
/// starting an extraction with one is not.
pub fn warn_violations(schema: &Schema, formatter: &Formatter) {
    for (index, error) in schema.validate() {
        eprintln!("{}", formatter.warning(&format!("field {}: {}", index, error)));
    }
}
