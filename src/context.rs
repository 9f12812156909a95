use crate::args::Args;
use crate::error::Error;
use crate::filter::Excludes;
use crate::format::Format;
use crate::result::Result;
use std::path::{Path, PathBuf};

/// Context passed throughout the application containing the resolved configuration
#[derive(Debug, Clone)]
pub struct Context {
    /// Enable verbose output (show every archived entry)
    pub verbose: bool,

    /// Plugin folder being packaged
    pub source_dir: PathBuf,

    /// Directory receiving the archive
    pub output_dir: PathBuf,

    /// Name of the plugin folder; prefixes every archive entry
    pub folder_name: String,

    /// File holding the version constant
    pub main_file: PathBuf,

    /// Version constant name
    pub constant: String,

    pub excludes: Excludes,

    pub format: Format,

    /// Archive base name template
    pub filename: String,
}

impl Context {
    pub fn from_args(args: Args) -> Result<Self> {
        let source_dir = match args.path {
            Some(path) => path,
            None => std::env::current_dir()?,
        };
        // Absolute path so the folder name and parent are always known
        let mut source_dir = std::path::absolute(&source_dir)?;
        if source_dir.file_name().is_none() {
            // Trailing `..` leaves no folder name until resolved
            source_dir = source_dir.canonicalize()?;
        }
        if !source_dir.is_dir() {
            return Err(Error::InvalidPath(format!(
                "{} is not a directory",
                source_dir.display()
            )));
        }

        let folder_name = folder_name(&source_dir)?;

        let output_dir = match args.output {
            Some(output) => std::path::absolute(output)?,
            None => source_dir
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| {
                    Error::InvalidPath(format!(
                        "{} has no parent directory",
                        source_dir.display()
                    ))
                })?,
        };

        let main_file = source_dir.join(
            args.main_file
                .unwrap_or_else(|| PathBuf::from(default_main_file(&folder_name))),
        );
        let constant = args
            .constant
            .unwrap_or_else(|| default_constant(&folder_name));

        Ok(Self {
            verbose: args.verbose,
            excludes: Excludes::with_defaults(&args.exclude),
            format: args.format.parse()?,
            filename: args.filename,
            source_dir,
            output_dir,
            folder_name,
            main_file,
            constant,
        })
    }
}

fn folder_name(dir: &Path) -> Result<String> {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| Error::InvalidPath(format!("{} has no folder name", dir.display())))
}

/// `Schema-Genie-AI` -> `schema-genie-ai.php`
pub fn default_main_file(folder_name: &str) -> String {
    format!("{}.php", folder_name.to_lowercase())
}

/// `Schema-Genie-AI` -> `SCHEMA_GENIE_AI_VERSION`
pub fn default_constant(folder_name: &str) -> String {
    let stem: String = folder_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    format!("{}_VERSION", stem)
}
