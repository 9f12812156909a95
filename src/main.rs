mod archive;
mod args;
mod clean;
mod context;
mod error;
mod filter;
mod format;
mod report;
mod result;
mod tpl;
mod version;

use args::Args;
use context::Context;
use error::Error;

fn main() {
    if let Err(e) = run() {
        match e {
            // Part of the build report, so it goes to stdout with it
            Error::VersionNotFound { .. } => println!("[ERROR] {}", e),
            _ => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    let ctx = Context::from_args(Args::parse())?;

    report::banner(&ctx.folder_name);

    if ctx.verbose {
        println!("  Source:    {}", ctx.source_dir.display());
        println!("  Main file: {}", ctx.main_file.display());
        println!("  Excluding {} names", ctx.excludes.len());
    }

    let version = version::read_version(&ctx.main_file, &ctx.constant)?;
    report::version(&version);

    report::cleaning();
    clean::remove_stale(&ctx)?;

    report::creating();
    let summary = create_archive(&ctx, &version)?;

    report::summary(&summary);
    Ok(())
}

fn create_archive(ctx: &Context, version: &str) -> result::Result<archive::ArchiveSummary> {
    // Per-entry lines would tear through the spinner
    if ctx.verbose {
        return archive::create(ctx, version);
    }

    let spinner = cliclack::spinner();
    spinner.start(format!("Writing {} archive...", ctx.format));
    match archive::create(ctx, version) {
        Ok(summary) => {
            spinner.stop(format!("Packed {} files", summary.file_count));
            Ok(summary)
        }
        Err(e) => {
            spinner.error("Failed to create archive");
            Err(e)
        }
    }
}
