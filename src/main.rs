// folio - portfolio content from the terminal
//
// This is the main entry point. Parses CLI args and dispatches to handlers.
// Plays the part of the site's rendering layer.

use anyhow::Context;
use folio_lib::{
    content::{BlogPost, SectionBody},
    core::{run_search, SectionParser},
    Catalog, Config,
};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let json = take_flag(&mut args, "--json");

    let Some(command) = args.first().cloned() else {
        print_usage();
        return Ok(());
    };
    let rest = &args[1..];

    match command.as_str() {
        "projects" => handle_projects(),
        "sections" => handle_sections(rest, json),
        "posts" => handle_posts(),
        "post" => handle_post(rest),
        "search" => handle_search(rest, json).await,
        "version" | "-v" | "--version" => {
            println!("folio v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    }
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|arg| arg != flag);
    args.len() != before
}

fn load_catalog(config: &Config) -> anyhow::Result<Catalog> {
    match &config.content.path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("loading content from {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

fn load() -> anyhow::Result<(Config, Catalog)> {
    let config = Config::load_default();
    let catalog = load_catalog(&config)?;
    Ok((config, catalog))
}

fn handle_projects() -> anyhow::Result<()> {
    let (_, catalog) = load()?;

    println!("\nProjects:");
    println!("{}", "=".repeat(60));
    for project in catalog.projects() {
        let star = if project.featured { "*" } else { " " };
        println!("{} {} ({})", star, project.name, project.year);
        println!("    {}", project.slug);
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

fn handle_sections(args: &[String], json: bool) -> anyhow::Result<()> {
    let Some(slug) = args.first() else {
        eprintln!("Error: No project slug provided");
        return Ok(());
    };

    let (_, catalog) = load()?;
    let project = match catalog.project(slug) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(());
        }
    };

    let description = project.long_description.as_deref();
    let sections = SectionParser::parse_opt(description);

    if json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    println!("\n{}", project.name);
    println!("{}", "=".repeat(60));
    if let Some(preamble) = description.and_then(SectionParser::preamble) {
        println!("{}\n", preamble);
    }

    for (i, section) in sections.iter().enumerate() {
        println!("## {}", section.title);
        match section.body() {
            SectionBody::Bullets(items) => {
                for item in items {
                    println!("  • {}", item);
                }
            }
            SectionBody::Paragraph(text) => println!("{}", text),
        }

        if i + 1 != sections.len() {
            println!("{}", "-".repeat(60));
        }
    }

    Ok(())
}

fn handle_posts() -> anyhow::Result<()> {
    let (_, catalog) = load()?;

    println!("\nPosts (newest first):");
    println!("{}", "=".repeat(60));
    for post in catalog.posts_newest_first() {
        print_post_line(post);
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

fn handle_post(args: &[String]) -> anyhow::Result<()> {
    let Some(slug) = args.first() else {
        eprintln!("Error: No post slug provided");
        return Ok(());
    };

    let (_, catalog) = load()?;
    let post = match catalog.post(slug) {
        Ok(post) => post,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Ok(());
        }
    };

    println!("\n{}", post.title);
    println!("{} · {}", post.date, post.read_time);
    if !post.tags.is_empty() {
        println!("Tags: {}", post.tags.join(", "));
    }
    println!("\n{}", post.excerpt);
    if let Some(body) = post.body() {
        println!("\n{}", body);
    }

    let related = catalog.related_posts(&post.slug);
    if !related.is_empty() {
        println!("\nMore Articles:");
        for other in related {
            print_post_line(other);
        }
    }

    Ok(())
}

async fn handle_search(args: &[String], json: bool) -> anyhow::Result<()> {
    if args.is_empty() {
        eprintln!("Error: No search query provided");
        return Ok(());
    }

    let query = args.join(" ");
    if query.trim().is_empty() {
        println!("Nothing to search for.");
        return Ok(());
    }

    let (config, catalog) = load()?;
    let search = run_search(catalog.post_corpus(), config.debounce_window(), &query).await;

    let results = search.results();

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if let Some(message) = search.no_results_message() {
        println!("{}", message);
    } else {
        println!("\nFound {} post(s) matching '{}':", results.len(), search.debounced_query());
        println!("{}", "=".repeat(60));
        for post in &results {
            print_post_line(post);
        }
        println!("{}", "=".repeat(60));
    }

    Ok(())
}

fn print_post_line(post: &BlogPost) {
    println!("{:>9}  {} ({})", post.date, post.title, post.read_time);
    println!("           {}", post.slug);
}

fn print_usage() {
    println!(
        r#"folio v{} - portfolio content from the terminal

USAGE:
    folio <COMMAND> [OPTIONS]

COMMANDS:
    projects               List projects (* = featured)
    sections <slug>        Show a project's description sections
    posts                  List posts, newest first
    post <slug>            Show a post and related posts
    search <query>         Search posts by title, excerpt or tag
    version                Show version
    help                   Show this help

OPTIONS:
    --json                 JSON output for sections and search

CONFIG:
    ~/.folio/config.json   {{ "search": {{ "debounce_ms": 160 }}, "content": {{ "path": "..." }} }}
    FOLIO_CONTENT          Path to a content JSON file (overrides config)
    RUST_LOG               Log filter, e.g. RUST_LOG=folio_lib=debug
"#,
        env!("CARGO_PKG_VERSION")
    );
}
