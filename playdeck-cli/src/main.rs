//! playdeck: build and document Xcode playgrounds.
//!
//! # Usage
//!
//! ```text
//! playdeck compile [<project>] [--cached] [--jobs <n>]
//! playdeck clean [<project>]
//! playdeck markdown [<project>] --output <dir> [--templates <dir>] [--dry-run]
//! playdeck jekyll [<project>] --output <dir> [--main-page <file>] [--templates <dir>] [--dry-run]
//! playdeck page <Contents.swift> [--target compile|markdown|jekyll] [--ast]
//! playdeck version
//! ```

mod commands;
mod console;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    clean::CleanArgs, compile::CompileArgs, jekyll::JekyllArgs, markdown::MarkdownArgs,
    page::PageArgs, version::VersionArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "playdeck",
    version,
    about = "Compile Xcode playgrounds and render them as documentation",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build every playground page of a project against its workspace.
    Compile(CompileArgs),

    /// Remove the build directory (derived data and compiled pages).
    Clean(CleanArgs),

    /// Render every playground page as Markdown.
    Markdown(MarkdownArgs),

    /// Render every playground page into a Jekyll docs tree.
    Jekyll(JekyllArgs),

    /// Render a single page source to stdout.
    Page(PageArgs),

    /// Print the playdeck version.
    Version(VersionArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Compile(args) => args.run(),
        Commands::Clean(args) => args.run(),
        Commands::Markdown(args) => args.run(),
        Commands::Jekyll(args) => args.run(),
        Commands::Page(args) => args.run(),
        Commands::Version(args) => args.run(),
    }
}
