use clap::{Parser, Subcommand};
use marginalia::build::{self, BuildPaths};
use marginalia::markdown::MarkdownOptions;
use marginalia::{config, load};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marginalia")]
#[command(about = "Static site generator for essay-style blogs")]
#[command(long_about = "\
Static site generator for essay-style blogs

Posts are JSON manifests referencing Markdown fragments; the build renders
them into a deployable directory of plain HTML, an RSS feed, and a sitemap.

Content structure:

  content/
  ├── site.json                    # Site config (optional)
  ├── about.md                     # About page (optional)
  └── posts/
      ├── field-notes/             # Folder post
      │   ├── post.json            # Manifest: slug, title, date, sections
      │   ├── intro.md             # Referenced by a markdown section
      │   └── appendix.md
      └── old-essay.json           # Legacy flat post (sections inline)

A folder post with several sections becomes a series: a landing page with a
chapter table of contents plus one page per chapter, linked prev/next, at
posts/<slug>/<chapter-slug>/. Chapter slugs derive from section titles, so
reordering chapters does not break their permalinks.

Drafts (\"draft\": true) are skipped entirely. Posts are ordered newest
first by their ISO-8601 date.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    content: PathBuf,

    /// Static asset directory (copied verbatim to the output)
    #[arg(long, default_value = "static", global = true)]
    static_dir: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full build (the default when no command is given)
    Build,
    /// Validate content without writing output
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let paths = BuildPaths {
                content: cli.content,
                static_dir: cli.static_dir,
                output: cli.output,
            };
            let summary = build::build(&paths)?;
            println!(
                "==> Built {} posts ({} pages)",
                summary.posts, summary.pages
            );
            println!("{}", paths.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.content.display());
            config::load_config(&cli.content)?;
            let posts =
                load::load_posts(&cli.content.join("posts"), &MarkdownOptions::default())?;
            println!("==> Content is valid ({} posts)", posts.len());
        }
    }

    Ok(())
}
