use crate::commands::open_editor;
use crate::host::{DirectoryDownloads, HeadlessSurface, SnapshotRasterizer, TerminalPrompt};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use flyer_editor::ExportFormat;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format (png, pdf)
    pub format: ExportFormat,

    /// Pre-rendered image of the flyer used as the capture
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub async fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let (config, editor) = open_editor(cwd)?;
    let downloads = DirectoryDownloads::new(config.get_output_dir(cwd, args.out));
    let rasterizer = SnapshotRasterizer::new(&args.snapshot);
    let surface = HeadlessSurface::default();
    let prompt = TerminalPrompt::new(false);

    println!(
        "{}",
        format!("📄 Exporting flyer as {}...", args.format.to_string().to_uppercase())
            .bright_blue()
            .bold()
    );
    editor
        .export(args.format, &surface, &rasterizer, &downloads, &prompt)
        .await?;

    for path in downloads.written() {
        println!("{} Wrote {}", "✓".green(), path.display());
    }

    Ok(())
}
