use crate::context::Context;
use crate::result::Result;
use crate::tpl::Tpl;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

/// Glob matching any archive the filename template produces, whatever the version.
///
/// Literal text and the folder name are escaped; each `$VERSION`, along with
/// any whitespace before it, becomes `*`. The default template gives
/// `<folder-name>*.<ext>`.
pub fn stale_pattern(ctx: &Context) -> String {
    let mut tpl = Tpl::new();
    tpl.register("NAME", &ctx.folder_name);

    let parts: Vec<&str> = ctx.filename.split("$VERSION").collect();
    let last = parts.len() - 1;
    let name = parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let part = if i < last { part.trim_end() } else { part };
            Pattern::escape(&tpl.parse(part))
        })
        .collect::<Vec<_>>()
        .join("*");
    format!("{}.{}", name, ctx.format.extension())
}

/// Archives left over from earlier builds in the output directory
pub fn find_stale(ctx: &Context) -> Result<Vec<PathBuf>> {
    // Only the file name carries a wildcard
    let dir = Pattern::escape(&ctx.output_dir.to_string_lossy());
    let pattern = Path::new(&dir).join(stale_pattern(ctx));

    let mut stale = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        let path = entry?;
        if path.is_file() {
            stale.push(path);
        }
    }
    stale.sort();
    Ok(stale)
}

/// Delete every stale archive, returning the removed file names
pub fn remove_stale(ctx: &Context) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    for path in find_stale(ctx)? {
        fs::remove_file(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("  [DEL] {}", name);
        removed.push(name);
    }

    if removed.is_empty() {
        println!("  No old archives found.");
    }

    Ok(removed)
}
