use crate::config::types::RawInput;
use crate::ConfigError;
use std::path::Path;

/// Loads raw crawl input from a file
///
/// Files ending in `.json` are read as JSON; anything else is read as TOML. Both use
/// the same camelCase keys. The result is not validated yet; pass it to
/// [`crate::config::normalize`].
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use trailhead::config::{load_input, normalize};
///
/// let raw = load_input(Path::new("input.json")).unwrap();
/// let options = normalize(&raw).unwrap();
/// println!("Max depth: {}", options.max_depth);
/// ```
pub fn load_input(path: &Path) -> Result<RawInput, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        parse_json_input(&content)
    } else {
        parse_toml_input(&content)
    }
}

/// Parses raw input from a JSON document
pub fn parse_json_input(content: &str) -> Result<RawInput, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Parses raw input from a TOML document
pub fn parse_toml_input(content: &str) -> Result<RawInput, ConfigError> {
    Ok(toml::from_str(content)?)
}
