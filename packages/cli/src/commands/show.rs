use crate::commands::open_editor;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use flyer_document::image_ref;
use flyer_editor::Binding;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print the document as JSON instead of one line per field
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let (_, editor) = open_editor(cwd)?;

    if args.json {
        println!("{}", editor.document().to_json_pretty()?);
        return Ok(());
    }

    for binding in editor.view().iter() {
        let kind = match binding {
            Binding::Text(text) if text.is_multiline() => "paragraph",
            Binding::Text(_) => "text",
            Binding::Image(_) => "image",
        };
        println!(
            "{} {} {}",
            binding.path().to_string().bright_white(),
            format!("({})", kind).dimmed(),
            summarize(binding.display())
        );
    }

    Ok(())
}

/// Embedded images are shown by type and size rather than in full
fn summarize(value: &str) -> String {
    match image_ref::parse_data_url(value) {
        Some((mime, bytes)) => format!("<embedded {}, {} bytes>", mime, bytes.len()),
        None => value.replace('\n', "\u{23CE}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        assert_eq!(summarize("Ennéagramme"), "Ennéagramme");
        assert_eq!(summarize("un\ndeux"), "un\u{23CE}deux");
        assert_eq!(
            summarize(&image_ref::to_data_url("image/png", &[0; 16])),
            "<embedded image/png, 16 bytes>"
        );
    }
}
