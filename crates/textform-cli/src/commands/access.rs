//! Access command implementation.

use crate::cli::AccessArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use textform_access::AccessPolicy;

/// Execute the access command: check an email against the configured
/// allow-list, as the session gate would after an identity callback.
pub fn execute_access(args: AccessArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let policy = AccessPolicy::new(config.allowed_emails.iter().cloned());

    if policy.is_empty() {
        eprintln!(
            "{}",
            formatter.warning("Allow-list is empty; every session is denied")
        );
    }

    if policy.is_allowed(&args.email) {
        println!("{}", formatter.success(&format!("{} is allowed", args.email)));
    } else {
        println!("{}", formatter.error(&format!("{} is denied", args.email)));
    }

    Ok(())
}
