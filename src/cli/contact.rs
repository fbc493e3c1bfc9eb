//! `folio contact`: check contact form input.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{print_json, CliError, CliResult};
use crate::contact::{validate_fields, ContactError};

/// Validate contact form fields the way the page does
#[derive(Debug, Clone, Args)]
pub struct ContactArgs {
    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Message body
    #[arg(long)]
    pub message: Option<String>,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct ContactOutput {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ContactError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alert: Option<String>,
}

impl ContactArgs {
    /// Execute the contact command
    pub fn execute(&self) -> CliResult<()> {
        if self.email.is_none() && self.message.is_none() {
            return Err(CliError::validation(
                "At least one field must be specified: --email or --message",
            ));
        }

        let result = validate_fields(self.email.as_deref(), self.message.as_deref());
        let output = ContactOutput {
            valid: result.is_ok(),
            alert: result.as_ref().err().map(ContactError::alert_message),
            error: result.clone().err(),
        };

        if self.json {
            print_json(&output)?;
        } else if result.is_ok() {
            println!("✓ Contact form is valid");
        }

        match result {
            Ok(()) => Ok(()),
            Err(e) => Err(CliError::validation(e.alert_message())),
        }
    }
}
