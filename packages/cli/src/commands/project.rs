use crate::commands::open_editor;
use crate::host::{DirectoryDownloads, PathPicker, TerminalPrompt};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Project file previously written by `save`
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

pub fn save(args: SaveArgs, cwd: &str) -> Result<()> {
    let (config, editor) = open_editor(cwd)?;
    let downloads = DirectoryDownloads::new(config.get_output_dir(cwd, args.out));

    editor.save_project(&downloads)?;
    for path in downloads.written() {
        println!("{} Saved {}", "✓".green(), path.display());
    }

    Ok(())
}

pub async fn load(args: LoadArgs, cwd: &str) -> Result<()> {
    let (_, mut editor) = open_editor(cwd)?;
    let prompt = TerminalPrompt::new(false);

    editor
        .load_project_from(&PathPicker::new(&args.file), &prompt)
        .await?;
    println!("{} Loaded {}", "✓".green(), args.file.display());

    Ok(())
}

pub fn reset(args: ResetArgs, cwd: &str) -> Result<()> {
    let (_, mut editor) = open_editor(cwd)?;
    let prompt = TerminalPrompt::new(args.yes);

    if editor.reset(&prompt)? {
        println!("{} Flyer reset to its default content", "✓".green());
    } else {
        println!("{}", "Reset cancelled".yellow());
    }

    Ok(())
}
