use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod build;
mod config;
mod site;

#[derive(Parser)]
#[command(name = "mdsite", version, about = "Render a tree of markdown pages into a static site")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site: copy static assets and render every content page
    Build {
        /// Path to the site config file
        #[arg(long, default_value = config::CONFIG_FILE)]
        config: String,

        /// Content directory (overrides config)
        #[arg(long)]
        content: Option<String>,

        /// Static asset directory (overrides config)
        #[arg(long)]
        static_dir: Option<String>,

        /// HTML template with {{ Title }} and {{ Content }} placeholders (overrides config)
        #[arg(long)]
        template: Option<String>,

        /// Output directory (overrides config)
        #[arg(long)]
        out: Option<String>,

        /// Remove the output directory before building
        #[arg(long)]
        clean: bool,

        /// Show detailed output including unchanged files
        #[arg(long)]
        verbose: bool,

        /// Watch for changes and rebuild automatically
        #[arg(long)]
        watch: bool,
    },

    /// Render a single markdown file to stdout
    Render {
        /// Path to the .md file
        file: String,

        /// Render a full page through this template instead of a bare fragment
        #[arg(long)]
        template: Option<String>,
    },
}

fn main() -> Result<()> {
    // Diagnostic logs go to stderr (run with `RUST_LOG=debug`).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            content,
            static_dir,
            template,
            out,
            clean,
            verbose,
            watch,
        } => {
            let overrides = build::PathOverrides {
                content,
                static_dir,
                template,
                out,
            };
            let paths = build::resolve_paths(&config, &overrides)?;
            let opts = site::BuildOpts {
                clean,
                verbose,
                quiet: cli.quiet,
            };
            build::handle_build(&paths, &opts)?;
            if watch {
                build::watch_and_rebuild(&paths, &opts)?;
            }
        }
        Commands::Render { file, template } => {
            handle_render(&file, template.as_deref())?;
        }
    }

    Ok(())
}

fn handle_render(file: &str, template: Option<&str>) -> Result<()> {
    let markdown =
        std::fs::read_to_string(file).with_context(|| format!("Failed to read '{}'", file))?;

    let output = match template {
        Some(template_path) => {
            let template = std::fs::read_to_string(template_path)
                .with_context(|| format!("Failed to read '{}'", template_path))?;
            mdsite_parse::render_page(&markdown, &template)
        }
        None => mdsite_parse::markdown_to_html(&markdown),
    }
    .with_context(|| format!("Failed to render '{}'", file))?;

    println!("{output}");
    Ok(())
}
