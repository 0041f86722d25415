//! Environment variable editing with a dirty check against the saved set

use openapi_client::models::EnvVariable;

use crate::errors::ConsoleError;

/// Normalize a key the way the dashboard does: trimmed, upper-cased,
/// whitespace replaced with `_`
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .to_uppercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Editable copy of a project's environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvEditor {
    saved: Vec<EnvVariable>,
    current: Vec<EnvVariable>,
}

impl EnvEditor {
    pub fn new(saved: Vec<EnvVariable>) -> Self {
        Self {
            current: saved.clone(),
            saved,
        }
    }

    pub fn entries(&self) -> &[EnvVariable] {
        &self.current
    }

    /// Add a variable (prepended) or overwrite an existing one in place
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConsoleError> {
        let key = normalize_key(key);
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return Err(ConsoleError::ValidationError(
                "Both key and value are required".to_string(),
            ));
        }

        match self.current.iter_mut().find(|v| v.key == key) {
            Some(existing) => existing.value = value.to_string(),
            None => self.current.insert(0, EnvVariable::new(key, value)),
        }
        Ok(())
    }

    /// Remove a variable by its exact key, falling back to the normalized
    /// form; returns whether it existed
    pub fn remove(&mut self, key: &str) -> bool {
        let key = if self.current.iter().any(|v| v.key == key) {
            key.to_string()
        } else {
            normalize_key(key)
        };
        let before = self.current.len();
        self.current.retain(|v| v.key != key);
        self.current.len() != before
    }

    /// Merge parsed `.env` entries, returning how many were applied.
    ///
    /// Keys and values are taken as written. Existing keys are overwritten in
    /// place and new keys are appended in file order.
    pub fn import(&mut self, vars: Vec<EnvVariable>) -> usize {
        let applied = vars.len();
        for var in vars {
            match self.current.iter_mut().find(|v| v.key == var.key) {
                Some(existing) => existing.value = var.value,
                None => self.current.push(var),
            }
        }
        applied
    }

    /// Whether the current set differs by value from the saved one
    pub fn is_dirty(&self) -> bool {
        self.current != self.saved
    }

    pub fn into_entries(self) -> Vec<EnvVariable> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::parser::parse_env_file;

    fn editor() -> EnvEditor {
        EnvEditor::new(vec![
            EnvVariable::new("API_KEY", "abc"),
            EnvVariable::new("PORT", "3000"),
        ])
    }

    #[test]
    fn test_set_normalizes_and_prepends() {
        let mut env = editor();
        env.set(" node env ", " production ").unwrap();
        assert_eq!(env.entries()[0], EnvVariable::new("NODE_ENV", "production"));
        assert!(env.is_dirty());
    }

    #[test]
    fn test_set_existing_updates_in_place() {
        let mut env = editor();
        env.set("port", "8080").unwrap();
        assert_eq!(env.entries()[1], EnvVariable::new("PORT", "8080"));
    }

    #[test]
    fn test_restoring_value_clears_dirty_flag() {
        let mut env = editor();
        env.set("PORT", "8080").unwrap();
        assert!(env.is_dirty());
        env.set("PORT", "3000").unwrap();
        assert!(!env.is_dirty());
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let mut env = editor();
        assert!(matches!(
            env.set("X", "   "),
            Err(ConsoleError::ValidationError(_))
        ));
        assert!(!env.is_dirty());
    }

    #[test]
    fn test_remove_exact_or_normalized_key() {
        let mut env = EnvEditor::new(vec![
            EnvVariable::new("next_public_api", "http://x"),
            EnvVariable::new("PORT", "3000"),
        ]);
        assert!(env.remove("next_public_api"));
        assert!(env.remove("port"));
        assert!(!env.remove("port"));
        assert!(env.entries().is_empty());
        assert!(env.is_dirty());
    }

    #[test]
    fn test_import_keeps_file_as_written() {
        let mut env = editor();
        let parsed = parse_env_file("next_public_api=http://x\nEMPTY=\nPORT=8080\n");
        assert_eq!(parsed.len(), 3);

        assert_eq!(env.import(parsed), 3);
        assert_eq!(
            env.entries(),
            &[
                EnvVariable::new("API_KEY", "abc"),
                EnvVariable::new("PORT", "8080"),
                EnvVariable::new("next_public_api", "http://x"),
                EnvVariable::new("EMPTY", ""),
            ]
        );
        assert!(env.is_dirty());
    }

    #[test]
    fn test_import_into_empty_set_keeps_order() {
        let mut env = EnvEditor::new(Vec::new());
        env.import(parse_env_file("B=2\nA=1\n"));
        assert_eq!(
            env.into_entries(),
            vec![EnvVariable::new("B", "2"), EnvVariable::new("A", "1")]
        );
    }
}
