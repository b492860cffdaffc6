//! Shared helpers for command handlers.

use std::io::{self, BufRead, IsTerminal};

use secrecy::SecretString;

use crate::cli::PasswordArgs;
use crate::error::CliError;

/// Resolve the password from the argument, stdin, or a hidden prompt.
pub fn read_password(args: PasswordArgs) -> Result<SecretString, CliError> {
    let raw = if let Some(pw) = args.password {
        pw
    } else if args.stdin || !io::stdin().is_terminal() {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        line.trim_end_matches(['\r', '\n']).to_owned()
    } else {
        rpassword::prompt_password("Password: ")?
    };

    if raw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(SecretString::from(raw))
}
