mod commands;
mod config;
mod host;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    export, image, load, reset, save, set, show, ExportArgs, ImageArgs, LoadArgs, ResetArgs, SaveArgs, SetArgs,
    ShowArgs,
};
use tracing_subscriber::EnvFilter;

/// Flyer CLI - edit, save and export the flyer from a terminal
#[derive(Parser, Debug)]
#[command(name = "flyer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every editable field
    Show(ShowArgs),

    /// Commit a new value for a text field
    Set(SetArgs),

    /// Embed a local image into an image field
    Image(ImageArgs),

    /// Write the project file
    Save(SaveArgs),

    /// Replace the flyer from a project file
    Load(LoadArgs),

    /// Restore the default flyer
    Reset(ResetArgs),

    /// Export the flyer as PNG or PDF
    Export(ExportArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Show(args) => show(args, &cwd),
        Command::Set(args) => set(args, &cwd),
        Command::Image(args) => image(args, &cwd).await,
        Command::Save(args) => save(args, &cwd),
        Command::Load(args) => load(args, &cwd).await,
        Command::Reset(args) => reset(args, &cwd),
        Command::Export(args) => export(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
