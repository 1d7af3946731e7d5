use clap::{Parser, Subcommand};
use simple_blog::{config, layout, output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "simple-blog")]
#[command(about = "Static site generator for markdown blogs")]
#[command(long_about = "\
Static site generator for markdown blogs

Each markdown file in the source directory becomes a page; the most recent
pages are listed on the homepage and on numbered listing pages after it.

Layout:

  blog.toml                        # Config (optional, see gen-config)
  known.json                       # Checksum store, written by build
  layouts/                         # content.html, page.html, head.html,
                                   # header.html, preview.html, pagination.html
  pages/
  ├── hello-world.md               # → website/pages/hello-world/index.html
  └── older-post.md
  website/
  ├── index.html                   # Listing page 1
  ├── pages/<slug>/index.html
  └── pagination/<n>/index.html    # Listing pages 2..n

Every page starts with YAML front-matter:

  ---
  timestamp: 1700000000
  title: Hello, world
  description: Optional
  author: Optional
  ---

Pages whose source bytes are unchanged since the last build are not
re-rendered. Use 'build --force' after editing layouts.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Markdown source directory (overrides paths.source)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (overrides paths.output)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Layouts directory (overrides paths.layouts)
    #[arg(long, global = true)]
    layouts: Option<PathBuf>,

    /// Checksum store file (overrides paths.known_file)
    #[arg(long, global = true)]
    known_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render changed pages, rewrite listings, prune deleted pages
    Build {
        /// Re-render every page, ignoring the checksum store
        #[arg(long)]
        force: bool,
    },
    /// Validate every source's front-matter without writing anything
    Check,
    /// Print a stock blog.toml with all options documented
    GenConfig,
    /// Write the built-in layouts into a directory (existing files are kept)
    GenLayouts {
        /// Target directory (defaults to paths.layouts)
        dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Load the config file and apply CLI overrides on top.
    fn site_config(&self) -> Result<config::SiteConfig, config::ConfigError> {
        let mut site = config::load_config(&self.config)?;
        if let Some(source) = &self.source {
            site.paths.source = source.clone();
        }
        if let Some(output) = &self.output {
            site.paths.output = output.clone();
        }
        if let Some(layouts) = &self.layouts {
            site.paths.layouts = layouts.clone();
        }
        if let Some(known_file) = &self.known_file {
            site.paths.known_file = known_file.clone();
        }
        site.validate()?;
        Ok(site)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Build { force } => {
            let mut site = cli.site_config()?;
            site.build.force_rebuild |= *force;
            println!("==> Building {} → {}", site.paths.source.display(), site.paths.output.display());
            let summary = pipeline::build(&site)?;
            output::print_build_output(&summary, &site);
            println!("==> Build complete: {}", site.paths.output.display());
        }
        Command::Check => {
            let site = cli.site_config()?;
            println!("==> Checking {}", site.paths.source.display());
            let collection = pipeline::check(&site)?;
            output::print_check_output(&collection, &site.paths.source);
            if collection.skipped.is_empty() {
                println!("==> All pages are valid");
            } else {
                return Err(format!("{} page(s) would be skipped", collection.skipped.len()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenLayouts { dir } => {
            let target = match dir {
                Some(dir) => dir.clone(),
                None => cli.site_config()?.paths.layouts,
            };
            let written = layout::write_builtin(&target)?;
            for path in &written {
                println!("Wrote {}", path.display());
            }
            println!("==> {} layout(s) written to {}", written.len(), target.display());
        }
    }

    Ok(())
}
