//! Binds raw JSON data into the value tree templates read from.

use log::debug;

use crate::error::Result;
use crate::value::{self, Value};

/// Parses the data buffer into a [`Value`].
///
/// # Arguments
/// * `data` - Raw JSON bytes, or `None` when no data was supplied
///
/// # Returns
/// * `Value::Nil` for absent data, the parsed tree otherwise
///
/// # Errors
/// * `Error::DataParseError` if the buffer is not valid JSON. A present but
///   empty buffer is not valid JSON.
pub fn bind(data: Option<&[u8]>) -> Result<Value> {
    let Some(data) = data else {
        debug!("No data supplied, binding null");
        return Ok(Value::Nil);
    };
    let parsed: serde_json::Value = serde_json::from_slice(data)?;
    let value = value::from_json(parsed);
    debug!("Bound {} byte(s) of data as {}", data.len(), value::kind(&value));
    Ok(value)
}
