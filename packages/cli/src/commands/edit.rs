use crate::commands::open_editor;
use crate::host::PathPicker;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use flyer_document::FieldPath;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Field path, e.g. header.titleLine1 or about.benefits.2
    pub path: String,

    /// New text
    pub value: String,
}

#[derive(Debug, Args)]
pub struct ImageArgs {
    /// Image field path, e.g. gallery.image1
    pub path: String,

    /// Local image file to embed
    pub file: PathBuf,
}

/// Edit a text field the way a user would: focus, type, leave the field
pub fn set(args: SetArgs, cwd: &str) -> Result<()> {
    let (_, mut editor) = open_editor(cwd)?;
    let path = FieldPath::parse(&args.path)?;

    editor.focus(&path)?;
    editor.input(&path, &args.value)?;
    if editor.blur(&path)? {
        println!("{} Updated {}", "✓".green(), path.to_string().bright_white());
    } else {
        println!("{} {} unchanged", "•".dimmed(), path);
    }

    Ok(())
}

pub async fn image(args: ImageArgs, cwd: &str) -> Result<()> {
    let (_, mut editor) = open_editor(cwd)?;
    let path = FieldPath::parse(&args.path)?;

    editor.replace_image(&path, &PathPicker::new(&args.file)).await?;
    println!(
        "{} Embedded {} into {}",
        "✓".green(),
        args.file.display(),
        path.to_string().bright_white()
    );

    Ok(())
}
