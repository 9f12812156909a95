//! Fixed-format console report printed as the build progresses.

use crate::archive::ArchiveSummary;

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// `Schema-Genie-AI` -> `Schema Genie AI - Build`
pub fn title(folder_name: &str) -> String {
    format!("{} - Build", folder_name.replace(['-', '_'], " "))
}

pub fn banner(folder_name: &str) {
    println!("{}", rule());
    println!("  {}", title(folder_name));
    println!("{}", rule());
}

pub fn version(version: &str) {
    println!("\n  Plugin version: v{}", version);
}

pub fn cleaning() {
    println!("\n  Cleaning old builds...");
}

pub fn creating() {
    println!("\n  Creating archive...");
}

pub fn summary(summary: &ArchiveSummary) {
    println!("\n  [OK] Created: {}", summary.name);
    if let Some(location) = summary.path.parent() {
        println!("       Location: {}", location.display());
    }
    println!("       Files:   {}", summary.file_count);
    println!("       Size:    {}", format_kb(summary.size_kb()));
    println!("{}", rule());
}

pub fn format_kb(kb: f64) -> String {
    format!("{:.1} KB", kb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        assert_eq!(title("Schema-Genie-AI"), "Schema Genie AI - Build");
    }

    #[test]
    fn test_format_kb() {
        assert_eq!(format_kb(0.0), "0.0 KB");
        assert_eq!(format_kb(1536.0 / 1024.0), "1.5 KB");
        assert_eq!(format_kb(12.349), "12.3 KB");
    }
}
