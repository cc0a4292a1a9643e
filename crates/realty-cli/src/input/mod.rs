pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Payload from `--input <file>` if given, else from piped stdin. `None`
/// means the caller should fall back to its flags.
pub fn load_payload<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}
