//! Key command implementation.

use crate::cli::{KeyAction, KeyArgs};
use crate::error::Result;
use crate::output::Formatter;
use textform_store::CredentialStore;

/// Execute the key command.
pub fn execute_key(args: KeyArgs, formatter: &Formatter) -> Result<()> {
    let store = CredentialStore::default_location()?;

    match args.action {
        KeyAction::Set { token } => {
            store.set(&token)?;
            println!("{}", formatter.success("Credential stored"));
        }
        KeyAction::Show => match store.get()? {
            Some(token) => {
                println!(
                    "{}",
                    formatter.info(&format!("Credential stored ({})", mask(&token)))
                );
            }
            None => println!("{}", formatter.warning("No credential stored")),
        },
        KeyAction::Remove => {
            store.remove()?;
            println!("{}", formatter.success("Credential removed"));
        }
    }

    Ok(())
}

/// Mask a token down to its first and last four characters.
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "…".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_long_token() {
        assert_eq!(mask("sk-abcdefghijklmnop"), "sk-a…mnop");
    }

    #[test]
    fn test_mask_short_token_reveals_nothing() {
        assert_eq!(mask("short"), "…");
    }
}
