//! `.env` text parsing

use openapi_client::models::EnvVariable;

/// Parse `.env` content into key/value pairs.
///
/// Blank lines and `#` comments are skipped, lines without a `KEY=` prefix are
/// ignored, and one leading and one trailing quote (`"` or `'`) are stripped
/// from the value. A repeated key keeps its first position and its last value.
pub fn parse_env_file(content: &str) -> Vec<EnvVariable> {
    let mut vars: Vec<EnvVariable> = Vec::new();

    for line in content.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(eq) = trimmed.find('=') else {
            continue;
        };
        if eq == 0 {
            continue;
        }

        let key = trimmed[..eq].trim();
        if key.is_empty() {
            continue;
        }
        let value = strip_quotes(trimmed[eq + 1..].trim());

        match vars.iter_mut().find(|v| v.key == key) {
            Some(existing) => existing.value = value.to_string(),
            None => vars.push(EnvVariable::new(key, value)),
        }
    }

    vars
}

fn strip_quotes(value: &str) -> &str {
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('\''))
        .unwrap_or(value);
    value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value)
}
