//! Identity inspection commands.
//!
//! `hash` and `normalize` expose the identity pipeline for debugging
//! scraper output: when a feed row unexpectedly dedupes (or fails to),
//! these show exactly what the hasher saw.

use crate::identity::{IdentityHasher, normalize};
use crate::{Error, Result};
use std::io::{self, Write};

/// Prints the identity token for a name/address pair.
///
/// With `as_json`, emits the token together with both normalized inputs so
/// a collision can be diagnosed in one call.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for a blank name or address, or an error
/// if output cannot be written.
pub fn cmd_hash(name: &str, address: &str, as_json: bool) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("name must not be blank".to_string()));
    }
    if address.trim().is_empty() {
        return Err(Error::InvalidInput("address must not be blank".to_string()));
    }

    let token = IdentityHasher::hash(name, address);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if as_json {
        let encoded = serde_json::to_string_pretty(&serde_json::json!({
            "token": token.as_str(),
            "normalized_name": normalize(name),
            "normalized_address": normalize(address),
        }))
        .map_err(|e| Error::Serialization {
            operation: "encode_hash_output".to_string(),
            cause: e.to_string(),
        })?;
        writeln!(handle, "{encoded}").map_err(write_failed)?;
    } else {
        writeln!(handle, "{token}").map_err(write_failed)?;
    }

    Ok(())
}

/// Prints the normalized form of a free-text identifier.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn cmd_normalize(raw: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", normalize(raw)).map_err(write_failed)?;
    Ok(())
}

fn write_failed(e: io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_stdout".to_string(),
        cause: e.to_string(),
    }
}
