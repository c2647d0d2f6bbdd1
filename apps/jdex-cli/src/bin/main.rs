use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jdex_core::catalog::{Catalog, Library, Target};
use jdex_core::config::Config;
use jdex_core::io::{export_file, import_file, load_dir};
use jdex_core::quick_add::{self, QuickAdd};
use jdex_core::traits::HierarchySearch;
use jdex_core::types::Hierarchy;
use jdex_search::{highlight, Bm25Search, CorpusOptions};

#[derive(Debug, Parser)]
#[command(name = "jdex", about = "Find where things go in your filing system")]
struct Cli {
    /// Read systems from this JSON file instead of the configured directory
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank areas, categories and items against a query
    Search {
        query: String,
        /// Maximum number of results (defaults to search.limit)
        #[arg(long)]
        limit: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// System to search (defaults to the first one loaded)
        #[arg(long)]
        system: Option<String>,
    },
    /// Print the hierarchy
    Tree {
        #[arg(long)]
        system: Option<String>,
    },
    /// Check a JSON file against the import schema
    Validate { path: PathBuf },
    /// Quick-add `Name [NN]` or `#tag` under an area or category; rewrites --file
    Add {
        #[arg(long)]
        area: String,
        #[arg(long)]
        category: Option<String>,
        line: String,
        #[arg(long)]
        system: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let filter = if let Ok(env) = std::env::var("JDEX_LOG") {
        EnvFilter::new(env)
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            _ => EnvFilter::new("debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("loading configuration")?;
    let settings = config.settings()?;

    match cli.command {
        Command::Search { query, limit, json, system } => {
            let library = load_library(&config, cli.file.as_deref())?;
            let hierarchy = pick(&library, system.as_deref())?;
            let options = CorpusOptions { ancestor_text: settings.search.ancestor_text };
            let engine = Bm25Search::new(options);
            let mut results = engine.search(hierarchy, &query);
            results.truncate(limit.unwrap_or(settings.search.limit));
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                return Ok(());
            }
            if results.is_empty() {
                println!("No matches for \"{}\" in {}", query, hierarchy.name);
            }
            for (i, r) in results.iter().enumerate() {
                let name: String = highlight(r.name(), &r.matched_terms)
                    .iter()
                    .map(|s| if s.matched { format!("[{}]", s.text) } else { s.text.to_string() })
                    .collect();
                println!("{:>2}. {:>7.3}  {:<18} {}", i + 1, r.score, r.path(), name);
            }
        }
        Command::Tree { system } => {
            let library = load_library(&config, cli.file.as_deref())?;
            print_tree(pick(&library, system.as_deref())?);
        }
        Command::Validate { path } => {
            let systems = import_file(&path)
                .with_context(|| format!("{} is not a valid system file", path.display()))?;
            for s in &systems {
                println!("ok: {} ({} areas)", s.name, s.areas.len());
            }
        }
        Command::Add { area, category, line, system } => {
            let Some(path) = cli.file else {
                bail!("add needs --file so the change can be written back")
            };
            let systems = import_file(&path)?;
            if systems.len() != 1 {
                bail!(
                    "{} holds {} systems; add only edits single-system files",
                    path.display(),
                    systems.len()
                );
            }
            let mut library = Library::new();
            library.load_system(systems.into_iter().next().unwrap_or_default());
            let mut catalog = Catalog::new(pick(&library, system.as_deref())?.clone())?;
            let target = match category.as_deref() {
                Some(category) => Target::Category { area: &area, category },
                None => Target::Area(&area),
            };
            match quick_add::apply(&mut catalog, target, &line)? {
                QuickAdd::Item(item) => println!("added item {} {}", item.id, item.name),
                QuickAdd::Category(c) => println!("added category {} {}", c.id, c.name),
                QuickAdd::Tag(tag) => println!("tagged #{}", tag),
            }
            export_file(catalog.hierarchy(), &path)?;
        }
    }
    Ok(())
}

fn load_library(config: &Config, file: Option<&Path>) -> anyhow::Result<Library> {
    let systems = match file {
        Some(path) => import_file(path)?,
        None => {
            let dir = config.systems_dir(&std::env::current_dir()?)?;
            load_dir(&dir).with_context(|| format!("loading systems from {}", dir.display()))?
        }
    };
    let mut library = Library::new();
    for system in systems {
        library.load_system(system);
    }
    if library.is_empty() {
        bail!("no systems loaded");
    }
    Ok(library)
}

fn pick<'l>(library: &'l Library, name: Option<&str>) -> anyhow::Result<&'l Hierarchy> {
    match name {
        Some(name) => library
            .systems()
            .iter()
            .find(|s| s.name == name)
            .with_context(|| format!("no system named {name}")),
        None => library.active().context("no systems loaded"),
    }
}

fn print_tree(system: &Hierarchy) {
    println!("{}", system.name);
    for area in &system.areas {
        println!("  {} {}{}", area.id, area.name, tag_suffix(&area.tags));
        for category in &area.categories {
            println!("    {} {}{}", category.id, category.name, tag_suffix(&category.tags));
            for item in category.items() {
                println!("      {} {}", item.id, item.name);
            }
        }
    }
}

fn tag_suffix(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!("  #{}", tags.join(" #"))
    }
}
