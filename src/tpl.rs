use std::collections::HashMap;

/// Template processor for resolving $VARIABLE format variables
pub struct Tpl {
    variables: HashMap<String, String>,
}

impl Tpl {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Register a variable with its value
    pub fn register<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    /// Parse a string and resolve all $VARIABLE references
    pub fn parse(&self, input: &str) -> String {
        // Longest keys first so $NAME never clobbers a $NAMESPACE-style key
        let mut keys: Vec<&String> = self.variables.keys().collect();
        keys.sort_by_key(|k| std::cmp::Reverse(k.len()));

        let mut result = input.to_string();
        for key in keys {
            result = result.replace(&format!("${}", key), &self.variables[key]);
        }

        result
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self::new()
    }
}
