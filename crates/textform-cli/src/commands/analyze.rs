//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use textform_extractor::Extractor;
use textform_llm::OpenAiProvider;
use textform_schema::traits::CredentialSource;
use textform_schema::{ExtractionResult, Schema};
use textform_store::{CredentialStore, SchemaStore};

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let text = read_input(args.file.as_deref(), args.stdin)?;

    let store = SchemaStore::default_location()?;
    let schema = store.load()?;

    let result = run_analysis(&text, &schema, config).await?;

    if args.tsv {
        println!("{}", result.to_tsv(&schema));
    } else {
        println!("{}", formatter.format_result(&result, &schema)?);
    }

    Ok(())
}

/// Run one extraction. Shared by the subcommand and the REPL.
///
/// A valid schema is a precondition: name violations that are merely warned
/// about during editing block extraction here.
pub async fn run_analysis(
    text: &str,
    schema: &Schema,
    config: &Config,
) -> Result<ExtractionResult> {
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput("No text to analyze".to_string()));
    }
    if schema.is_empty() {
        return Err(CliError::InvalidInput(
            "Schema has no fields; add some with 'schema add'".to_string(),
        ));
    }
    if let Some((index, error)) = schema.validate().into_iter().next() {
        return Err(CliError::InvalidInput(format!(
            "schema field {} is invalid: {}",
            index, error
        )));
    }

    let credentials = CredentialStore::default_location()?;
    let api_key = CredentialSource::get(&credentials)?.unwrap_or_default();
    let provider = OpenAiProvider::with_endpoint(&config.api.endpoint, api_key, &config.api.model);
    let extractor = Extractor::new(provider, credentials);

    Ok(extractor.analyze(text, schema).await?)
}

/// Read the text to analyze from a file or stdin.
pub fn read_input(file: Option<&Path>, stdin: bool) -> Result<String> {
    if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = file {
        Ok(fs::read_to_string(path)?)
    } else {
        Err(CliError::InvalidInput(
            "Must specify either FILE or --stdin".to_string(),
        ))
    }
}
