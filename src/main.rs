//! # Pressroom CLI Application
//!
//! This module implements the command-line interface for the pressroom
//! pipeline, providing access to its enrichment capabilities through a set
//! of subcommands.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - Subcommands for different pipeline operations:
//!   - `run`: Execute the full five-phase enrichment workflow
//!   - `score`: Score a local HTML file offline
//!   - `links`: Suggest external authority links for a topic
//!
//! The `run` subcommand talks to a content-generation API over HTTP, or to
//! in-memory mocks with `--dry-run` for trying the pipeline end to end
//! without credentials.

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pressroom::clients::mock::{MockImageClient, MockJobClient, MockSiteRepository, item};
use pressroom::clients::{ApiClient, GeneratedArticle};
use pressroom::interlink::{
    AuthorityTable, DraftContent, ExternalLinkOptions, find_external_links,
};
use pressroom::scoring::{AnalyzeRequest, analyze};
use pressroom::workflow::{Orchestrator, WorkflowConfig, WorkflowState};

#[derive(Parser)]
#[command(author, version, about = "A Rust pipeline for generating, enriching, and interlinking long-form content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full enrichment workflow for a topic
    Run(RunArgs),

    /// Score a local HTML file
    Score(ScoreArgs),

    /// Suggest external authority links for a topic
    Links(LinksArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Topic to write about
    #[arg(required = true)]
    topic: String,

    /// Target keywords (comma-separated, first is primary)
    #[arg(short, long)]
    keywords: Option<String>,

    /// Intended audience
    #[arg(long, default_value = "general readers")]
    audience: String,

    /// Writing tone
    #[arg(long, default_value = "professional")]
    tone: String,

    /// Requested article length in words
    #[arg(short, long, default_value = "800")]
    word_count: u32,

    /// Generate a featured image and thumbnail
    #[arg(long)]
    featured_image: bool,

    /// Synthesize schema.org structured data
    #[arg(long)]
    structured_data: bool,

    /// Crawl a site for interlinking (requires --site-id and --site-url)
    #[arg(long)]
    crawl: bool,

    /// Site identifier at the content repository
    #[arg(long)]
    site_id: Option<String>,

    /// Public base URL of the site
    #[arg(long)]
    site_url: Option<String>,

    /// Base URL of the generation API
    #[arg(long, env = "PRESSROOM_API_URL")]
    api_url: Option<String>,

    /// API token for the generation API
    #[arg(long, env = "PRESSROOM_API_TOKEN")]
    api_token: Option<String>,

    /// Run against in-memory mocks instead of a live API
    #[arg(long)]
    dry_run: bool,

    /// Print the full final state as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// HTML file to score
    #[arg(required = true)]
    file: PathBuf,

    /// Page title
    #[arg(short, long)]
    title: Option<String>,

    /// Keywords the content should cover (comma-separated)
    #[arg(short, long)]
    keywords: Option<String>,

    /// Primary keyword the content targets
    #[arg(long)]
    target_keyword: Option<String>,
}

#[derive(Args, Debug)]
struct LinksArgs {
    /// Topics to find links for (comma-separated)
    #[arg(required = true)]
    topics: String,

    /// Maximum links to suggest
    #[arg(short, long, default_value = "5")]
    max_links: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Run(args)) => {
            run_command(args).await?;
        }
        Some(Commands::Score(args)) => {
            score_command(args).await?;
        }
        Some(Commands::Links(args)) => {
            links_command(args)?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["--help"]);
        }
    }

    Ok(())
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

async fn run_command(args: RunArgs) -> anyhow::Result<()> {
    let mut builder = WorkflowConfig::builder()
        .topic(&args.topic)
        .keywords(split_list(args.keywords.clone()))
        .target_audience(&args.audience)
        .tone(&args.tone)
        .word_count(args.word_count)
        .generate_featured_image(args.featured_image)
        .generate_structured_data(args.structured_data)
        .crawl_website(args.crawl);
    if let (Some(site_id), Some(site_url)) = (&args.site_id, &args.site_url) {
        builder = builder.site_credentials(site_id, site_url);
    } else if args.crawl && !args.dry_run {
        return Err(anyhow!("--crawl requires --site-id and --site-url"));
    }
    let config = builder.build();

    println!("Running enrichment workflow for \"{}\"...", args.topic);
    let state = if args.dry_run {
        dry_run(&config).await
    } else {
        let api_url = args.api_url.ok_or_else(|| {
            anyhow!("--api-url (or PRESSROOM_API_URL) is required without --dry-run")
        })?;
        let api = ApiClient::new(api_url, args.api_token)?;
        let orchestrator = Orchestrator::new(api.clone(), api.clone(), api);
        orchestrator.execute(&config).await
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_summary(&state);
    }
    Ok(())
}

/// Execute the workflow against in-memory mocks
async fn dry_run(config: &WorkflowConfig) -> WorkflowState {
    let article = GeneratedArticle {
        content: format!(
            "<h1>{topic}</h1>\
             <p>{topic} matters to more readers every year. This draft walks \
             through the essentials and shows where to start.</p>\
             <h2>Getting started</h2>\
             <p>Begin with the basics and build up a routine. Small consistent \
             steps beat occasional big pushes.</p>\
             <h2>Going further</h2>\
             <p>Once the basics feel natural, compare tools and approaches to \
             find what fits your situation best.</p>",
            topic = config.topic
        ),
        title: config.topic.clone(),
        excerpt: Some(format!("An introduction to {}.", config.topic)),
        word_count: config.word_count as usize,
        seo: None,
    };
    let site = MockSiteRepository::new().with_collection(
        "posts",
        "Posts",
        vec![item(
            "sample",
            "sample-post",
            "A Sample Post",
            "<p>Sample content for dry runs.</p>",
        )],
    );
    let orchestrator = Orchestrator::new(
        MockJobClient::completes_with(article, 1),
        MockImageClient::returning_images(),
        site,
    );
    orchestrator.execute(config).await
}

fn print_summary(state: &WorkflowState) {
    println!(
        "Run {} finished in phase {:?} ({}%)",
        state.id, state.phase, state.progress
    );
    if let Some(error) = &state.error {
        println!("Error: {}", error);
        return;
    }
    if let Some(content) = &state.content {
        println!("Title: {}", content.title);
        println!("Words: {}", content.word_count);
    }
    if let Some(enhancement) = &state.enhancement {
        println!("Slug: {}", enhancement.slug);
        println!("SEO title: {}", enhancement.seo_title);
        println!("Meta description: {}", enhancement.meta_description);
        println!(
            "Scores: readability {}, seo {}, quality {}",
            enhancement.analysis.readability_score,
            enhancement.analysis.seo_score,
            enhancement.analysis.quality_score
        );
    }
    if let Some(interlinking) = &state.interlinking {
        println!(
            "Links applied: {} ({:?})",
            interlinking.applied_links.len(),
            interlinking.status
        );
    }
    if let Some(readiness) = &state.readiness {
        println!(
            "Readiness: {} (content score {})",
            if readiness.is_ready { "ready" } else { "not ready" },
            readiness.content_score
        );
        for issue in &readiness.issues {
            println!("  issue: {}", issue);
        }
        for warning in &readiness.warnings {
            println!("  warning: {}", warning);
        }
    }
}

async fn score_command(args: ScoreArgs) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(&args.file).await?;
    let request = AnalyzeRequest {
        title: args.title,
        meta_description: None,
        keywords: split_list(args.keywords),
        target_keyword: args.target_keyword,
        has_featured_image: false,
    };
    let result = analyze(&content, &request).map_err(|e| anyhow!(e.to_string()))?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn links_command(args: LinksArgs) -> anyhow::Result<()> {
    let topics = split_list(Some(args.topics));
    if topics.is_empty() {
        return Err(anyhow!("at least one topic is required"));
    }
    let draft = DraftContent {
        content: String::new(),
        title: topics.join(", "),
        keywords: topics.clone(),
        topics,
    };
    let analysis = find_external_links(
        &draft,
        &AuthorityTable::default(),
        &ExternalLinkOptions {
            max_links: args.max_links,
        },
    );

    println!("Matched categories: {:?}", analysis.categories);
    for opportunity in &analysis.opportunities {
        println!(
            "{:.2}/{:.2}  {}  ({})",
            opportunity.relevance_score,
            opportunity.authority_score.unwrap_or(0.0),
            opportunity.url,
            opportunity.reason
        );
    }
    Ok(())
}
