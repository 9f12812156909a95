use crate::context::Context;
use crate::error::Error;
use crate::format::Format;
use crate::result::Result;
use crate::tpl::Tpl;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A file on disk and the name it gets inside the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub name_in_archive: String,
}

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    /// Archive file name, e.g. `Schema-Genie-AI 1.2.3.zip`
    pub name: String,
    pub path: PathBuf,
    pub file_count: usize,
    /// Size of the finished archive in bytes
    pub size: u64,
}

impl ArchiveSummary {
    pub fn size_kb(&self) -> f64 {
        self.size as f64 / 1024.0
    }
}

/// Archive file name for `version`, resolved from the context's filename template
pub fn archive_name(ctx: &Context, version: &str) -> String {
    let mut tpl = Tpl::new();
    tpl.register("NAME", &ctx.folder_name);
    tpl.register("VERSION", version);
    format!("{}.{}", tpl.parse(&ctx.filename), ctx.format.extension())
}

/// Walk the plugin folder and list every file that belongs in the archive.
///
/// Excluded directories are pruned before descent, so nothing below them is
/// ever read. `skip` names a file that must not be packed even if it lies
/// inside the folder (the archive being written).
pub fn collect_entries(ctx: &Context, skip: Option<&Path>) -> Result<Vec<ArchiveEntry>> {
    let root = &ctx.source_dir;
    let mut entries = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match entry.path().strip_prefix(root) {
            Ok(relative) => ctx.excludes.is_included(relative),
            Err(_) => false,
        });

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        // Symlinks to files are followed, symlinked directories are not walked
        if !path.is_file() || skip.is_some_and(|s| s == path) {
            continue;
        }

        let relative = path.strip_prefix(root).map_err(|_| {
            Error::InvalidPath(format!("{} is outside {}", path.display(), root.display()))
        })?;
        if !ctx.excludes.is_included(relative) {
            continue;
        }

        entries.push(ArchiveEntry {
            path: path.to_path_buf(),
            name_in_archive: name_in_archive(&ctx.folder_name, relative),
        });
    }

    Ok(entries)
}

/// `<folder-name>/<relative path>` with `/` separators on every platform
fn name_in_archive(folder_name: &str, relative: &Path) -> String {
    let mut name = folder_name.to_string();
    for component in relative.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

/// Build the versioned archive in the output directory
pub fn create(ctx: &Context, version: &str) -> Result<ArchiveSummary> {
    fs::create_dir_all(&ctx.output_dir)?;

    let name = archive_name(ctx, version);
    let path = ctx.output_dir.join(&name);

    let entries = collect_entries(ctx, Some(&path))?;

    match ctx.format {
        Format::Zip => create_zip_file(ctx, &entries, &path)?,
        Format::TarGz => create_tar_gz_file(ctx, &entries, &path)?,
    }

    let size = fs::metadata(&path)?.len();

    Ok(ArchiveSummary {
        name,
        path,
        file_count: entries.len(),
        size,
    })
}

fn create_zip_file(ctx: &Context, entries: &[ArchiveEntry], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for entry in entries {
        if ctx.verbose {
            println!("  + {}", entry.name_in_archive);
        }
        zip.start_file(entry.name_in_archive.as_str(), options)?;
        let mut f = File::open(&entry.path)?;
        io::copy(&mut f, &mut zip)?;
    }

    zip.finish()?;
    Ok(())
}

fn create_tar_gz_file(ctx: &Context, entries: &[ArchiveEntry], output_path: &Path) -> Result<()> {
    let tar_gz = File::create(output_path)?;
    let enc = GzEncoder::new(tar_gz, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for entry in entries {
        if ctx.verbose {
            println!("  + {}", entry.name_in_archive);
        }
        tar.append_path_with_name(&entry.path, &entry.name_in_archive)?;
    }

    tar.into_inner()?.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Excludes;
    use std::io::Read;

    fn plugin_tree() -> (tempfile::TempDir, Context) {
        let root = tempfile::tempdir().unwrap();
        let plugin = root.path().join("Schema-Genie-AI");

        fs::create_dir_all(plugin.join("includes")).unwrap();
        fs::create_dir_all(plugin.join(".git/objects")).unwrap();
        fs::create_dir_all(plugin.join("assets/node_modules/lib")).unwrap();
        fs::write(
            plugin.join("schema-genie-ai.php"),
            "define('SCHEMA_GENIE_AI_VERSION', '1.2.3');",
        )
        .unwrap();
        fs::write(plugin.join("readme.md"), "# readme").unwrap();
        fs::write(plugin.join("includes/class-ai-client.php"), "<?php").unwrap();
        fs::write(plugin.join("includes/.DS_Store"), "junk").unwrap();
        fs::write(plugin.join(".git/config"), "[core]").unwrap();
        fs::write(plugin.join(".git/objects/ab"), "blob").unwrap();
        fs::write(plugin.join("assets/app.js"), "console.log(1)").unwrap();
        fs::write(plugin.join("assets/node_modules/lib/index.js"), "x").unwrap();

        let ctx = Context {
            verbose: false,
            source_dir: plugin.clone(),
            output_dir: root.path().to_path_buf(),
            folder_name: "Schema-Genie-AI".to_string(),
            main_file: plugin.join("schema-genie-ai.php"),
            constant: "SCHEMA_GENIE_AI_VERSION".to_string(),
            excludes: Excludes::with_defaults(&[]),
            format: Format::Zip,
            filename: "$NAME $VERSION".to_string(),
        };
        (root, ctx)
    }

    fn entry_names(entries: &[ArchiveEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name_in_archive.as_str()).collect()
    }

    #[test]
    fn test_archive_name() {
        let (_root, mut ctx) = plugin_tree();
        assert_eq!(archive_name(&ctx, "1.2.3"), "Schema-Genie-AI 1.2.3.zip");

        ctx.format = Format::TarGz;
        ctx.filename = "$NAME-v$VERSION".to_string();
        assert_eq!(archive_name(&ctx, "1.2.3"), "Schema-Genie-AI-v1.2.3.tar.gz");
    }

    #[test]
    fn test_collect_skips_excluded_subtrees() {
        let (_root, ctx) = plugin_tree();
        let entries = collect_entries(&ctx, None).unwrap();

        assert_eq!(
            entry_names(&entries),
            vec![
                "Schema-Genie-AI/assets/app.js",
                "Schema-Genie-AI/includes/class-ai-client.php",
                "Schema-Genie-AI/readme.md",
                "Schema-Genie-AI/schema-genie-ai.php",
            ]
        );
    }

    #[test]
    fn test_empty_tree_gives_empty_archive() {
        let root = tempfile::tempdir().unwrap();
        let plugin = root.path().join("Empty");
        fs::create_dir_all(plugin.join(".git")).unwrap();
        fs::write(plugin.join(".git/HEAD"), "ref").unwrap();

        let (_unused, mut ctx) = plugin_tree();
        ctx.source_dir = plugin;
        ctx.output_dir = root.path().to_path_buf();
        ctx.folder_name = "Empty".to_string();

        let summary = create(&ctx, "0.1").unwrap();
        assert_eq!(summary.file_count, 0);

        let archive = zip::ZipArchive::new(File::open(&summary.path).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_create_zip() {
        let (_root, ctx) = plugin_tree();
        let summary = create(&ctx, "1.2.3").unwrap();

        assert_eq!(summary.name, "Schema-Genie-AI 1.2.3.zip");
        assert_eq!(summary.file_count, 4);
        assert_eq!(summary.size, fs::metadata(&summary.path).unwrap().len());

        let mut archive = zip::ZipArchive::new(File::open(&summary.path).unwrap()).unwrap();
        assert_eq!(archive.len(), 4);

        let mut readme = archive.by_name("Schema-Genie-AI/readme.md").unwrap();
        assert_eq!(readme.compression(), zip::CompressionMethod::Deflated);
        let mut content = String::new();
        readme.read_to_string(&mut content).unwrap();
        assert_eq!(content, "# readme");
    }

    #[test]
    fn test_existing_archive_is_overwritten() {
        let (_root, ctx) = plugin_tree();
        let target = ctx.output_dir.join("Schema-Genie-AI 1.2.3.zip");
        fs::write(&target, "not a zip").unwrap();

        let summary = create(&ctx, "1.2.3").unwrap();
        let archive = zip::ZipArchive::new(File::open(&summary.path).unwrap()).unwrap();
        assert_eq!(archive.len(), 4);
    }

    #[test]
    fn test_output_inside_plugin_folder_is_not_packed() {
        let (_root, mut ctx) = plugin_tree();
        ctx.output_dir = ctx.source_dir.clone();

        let first = create(&ctx, "1.2.3").unwrap();
        assert_eq!(first.file_count, 4);

        // The archive from the first run is now a file in the tree
        let second = create(&ctx, "1.2.4").unwrap();
        assert_eq!(second.file_count, 5);
        let archive = zip::ZipArchive::new(File::open(&second.path).unwrap()).unwrap();
        assert!(archive.index_for_name("Schema-Genie-AI/Schema-Genie-AI 1.2.4.zip").is_none());
    }

    #[test]
    fn test_create_tar_gz() {
        let (_root, mut ctx) = plugin_tree();
        ctx.format = Format::TarGz;
        let summary = create(&ctx, "1.2.3").unwrap();

        assert_eq!(summary.name, "Schema-Genie-AI 1.2.3.tar.gz");
        assert_eq!(summary.file_count, 4);

        let decoder = flate2::read::GzDecoder::new(File::open(&summary.path).unwrap());
        let mut archive = tar::Archive::new(decoder);
        let mut names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "Schema-Genie-AI/assets/app.js",
                "Schema-Genie-AI/includes/class-ai-client.php",
                "Schema-Genie-AI/readme.md",
                "Schema-Genie-AI/schema-genie-ai.php",
            ]
        );
    }
}
