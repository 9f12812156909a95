use crate::error::Error;
use crate::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Read the plugin version from `define('<CONSTANT>', '<version>')` in `file`
pub fn read_version(file: &Path, constant: &str) -> Result<String> {
    let content = fs::read_to_string(file)?;
    find_version(&content, constant)?.ok_or_else(|| Error::VersionNotFound {
        constant: constant.to_string(),
        file: file.to_path_buf(),
    })
}

/// Search `content` for the version constant; `None` when it is not defined
pub fn find_version(content: &str, constant: &str) -> Result<Option<String>> {
    let pattern = format!(
        r#"define\(\s*(?:'{name}'|"{name}")\s*,\s*(?:'([^']+)'|"([^"]+)")\s*\)"#,
        name = regex::escape(constant)
    );
    let re = Regex::new(&pattern)?;

    Ok(re.captures(content).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }))
}
