use std::net::SocketAddr;

use crate::cli::errors::{CliError, CliResult};
use crate::config::is_valid_field;

/// Validates a field name given on the command line
pub fn validate_field(field: &Option<String>) -> CliResult<()> {
    match field {
        Some(field) if !is_valid_field(field) => Err(CliError::validation(
            "field",
            "Field must be a word of letters, digits, '_' or '.'",
        )),
        _ => Ok(()),
    }
}

/// Validates a bind address given on the command line
pub fn validate_addr(addr: &Option<String>) -> CliResult<()> {
    match addr {
        Some(addr) if addr.parse::<SocketAddr>().is_err() => Err(CliError::validation(
            "addr",
            "Address must look like 127.0.0.1:8080",
        )),
        _ => Ok(()),
    }
}
