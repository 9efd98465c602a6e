use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use md_autodoc::{Autodoc, Config, links};

#[derive(Parser)]
#[command(name = "md-autodoc", version, about = "Extract command syntax from markdown docs")]
struct Cli {
    /// Config file (defaults to ./autodoc.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the command declarations found in a markdown file
    Api(ApiArgs),

    /// List the markdown links of a file
    Links(LinksArgs),
}

#[derive(clap::Args)]
struct ApiArgs {
    /// Markdown file to scan
    file: PathBuf,

    /// Repository name (defaults to the file's parent directory name)
    #[arg(short, long)]
    repo: Option<String>,

    /// Grammar to detect commands with (cli, javascript)
    #[arg(short, long)]
    language: Option<String>,

    /// Base directory for generated paths
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Fill each record's content with the markdown under its heading
    #[arg(long)]
    content: bool,

    /// Print the catalog as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct LinksArgs {
    /// Markdown file to scan
    file: PathBuf,

    /// Keep only links into this GitHub owner's repository
    #[arg(long)]
    owner: Option<String>,

    /// Keep only links into this GitHub repository
    #[arg(short, long)]
    repo: Option<String>,

    /// Print every link, unfiltered
    #[arg(long)]
    all: bool,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.unwrap_or(Path::new(Config::FILE_NAME));
    let config = Config::load_from_path(path)
        .with_context(|| format!("loading config from {}", path.display()))?;
    Ok(config.unwrap_or_default())
}

fn read_markdown(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read '{}'", path.display()))
}

fn default_repo_name(file: &Path) -> Option<String> {
    let dir = file.canonicalize().ok()?.parent()?.file_name()?.to_str()?.to_string();
    Some(dir)
}

fn run_api(args: ApiArgs, mut config: Config) -> Result<()> {
    if let Some(repo) = args.repo {
        config.repo_name = repo;
    } else if config.repo_name.is_empty() {
        config.repo_name = default_repo_name(&args.file).unwrap_or_default();
    }
    if let Some(language) = args.language {
        config.language = language;
    }
    if let Some(out) = args.out {
        config.output_root = out;
    }
    config.capture_content |= args.content;

    let autodoc = Autodoc::from_config(&config)?;
    let markdown = read_markdown(&args.file)?;
    let report = autodoc
        .process(&markdown)
        .with_context(|| format!("processing '{}'", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.catalog)?);
    } else {
        for record in &report.catalog {
            let path = record.path.as_deref().unwrap_or(Path::new(""));
            println!("{}\t{}", path.display(), record.formatted);
        }
    }
    for (suffix, count) in &report.tally {
        let dir = if suffix.is_empty() { "/" } else { suffix.as_str() };
        eprintln!("{count:>4}  {}{dir}", config.repo_name);
    }
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

fn run_links(args: LinksArgs, config: Config) -> Result<()> {
    let autodoc = Autodoc::from_config(&config)?;
    let markdown = read_markdown(&args.file)?;
    let urls = links::urls_from_blocks(&autodoc.parse(&markdown));
    let urls = if args.all {
        urls
    } else {
        let owner = args.owner.or(config.repo_owner);
        let repo = args
            .repo
            .or_else(|| (!config.repo_name.is_empty()).then_some(config.repo_name));
        links::filter_urls_by_github_repo(&urls, owner.as_deref(), repo.as_deref())
    };
    for url in urls {
        println!("{url}");
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Command::Api(args) => run_api(args, config),
        Command::Links(args) => run_links(args, config),
    });

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
