// ABOUTME: Main entry point for the bespoke-deck program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use bespoke_deck::projector::BULLET_CURRENT_CLASS;
use bespoke_deck::{
    compose_deck, Asset, ComposeOptions, Deck, DeckConfig, DeckPlugin, Document, ManualBullets,
    Navigation, Selector,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a finished deck page from a slide fragment
    Compose(ComposeArgs),

    /// Print per-slide bullet counts and focus markers
    Outline(OutlineArgs),

    /// Drive a deck through a sequence of presses and print each state
    Walk(WalkArgs),
}

#[derive(Args)]
struct ComposeArgs {
    /// Path to the slide fragment file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output HTML file
    #[arg(short, long)]
    output: PathBuf,

    /// CSS files to include (local paths or URLs)
    #[arg(long, value_delimiter = ',')]
    css: Option<Vec<String>>,

    /// JavaScript files to include (local paths or URLs)
    #[arg(long, value_delimiter = ',')]
    js: Option<Vec<String>>,

    /// Mode for CSS/JS: 'embed' to embed content or 'link' to reference
    #[arg(long, default_value = "embed")]
    mode: String,

    /// Deck page title
    #[arg(long, default_value = "Presentation")]
    title: String,

    /// Bullet selector override
    #[arg(long)]
    selector: Option<String>,
}

#[derive(Args)]
struct OutlineArgs {
    /// Path to the slide fragment file
    #[arg(short, long)]
    input: PathBuf,

    /// Bullet selector override
    #[arg(long)]
    selector: Option<String>,
}

#[derive(Args)]
struct WalkArgs {
    /// Path to the slide fragment file
    #[arg(short, long)]
    input: PathBuf,

    /// Comma-separated presses: next, prev, or slide:N
    #[arg(short, long, value_delimiter = ',')]
    presses: Vec<String>,

    /// Bullet selector override
    #[arg(long)]
    selector: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Compose(args)) => run_compose(args),
        Some(Commands::Outline(args)) => run_outline(args),
        Some(Commands::Walk(args)) => run_walk(args),
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn config_with_selector(selector: &Option<String>) -> DeckConfig {
    let mut config = DeckConfig::from_env();
    if let Some(selector) = selector {
        config.bullet_selector = selector.clone();
    }
    config
}

fn run_compose(args: &ComposeArgs) -> anyhow::Result<()> {
    println!("Executing compose command...");

    let config = config_with_selector(&args.selector);
    let options = ComposeOptions {
        title: args.title.clone(),
        embed_assets: args.mode != "link",
        css: collect_assets(&args.css, &config.default_css),
        js: collect_assets(&args.js, &config.default_js),
    };

    let page = compose_deck(&args.input, &options, &config)?;
    bespoke_deck::write_deck_to_file(&page, &args.output)?;

    println!("Deck composed successfully: {:?}", args.output);
    Ok(())
}

fn collect_assets(specs: &Option<Vec<String>>, default: &str) -> Vec<Asset> {
    match specs {
        Some(specs) => specs.iter().map(|spec| Asset::new(spec)).collect(),
        None => vec![Asset::new(default)],
    }
}

fn run_outline(args: &OutlineArgs) -> anyhow::Result<()> {
    let config = config_with_selector(&args.selector);
    let fragment = fs::read_to_string(&args.input)?;
    let doc = Document::parse_fragment(&fragment)?;
    let slides = doc.top_level("section");
    let selector = Selector::parse(&config.bullet_selector)?;
    let registry = bespoke_deck::BulletRegistry::build(&doc, &slides, &selector);

    println!("Deck: {} slides", slides.len());
    for (s, _) in slides.iter().enumerate() {
        let mut line = format!("  slide {}: {} bullets", s, registry.bullet_count(s));
        let focused: Vec<String> = registry
            .bullets(s)
            .iter()
            .enumerate()
            .filter_map(|(b, &id)| doc.data(id, "focus").map(|m| format!("{}={}", b, m)))
            .collect();
        if !focused.is_empty() {
            line.push_str(&format!(" (focus: {})", focused.join(", ")));
        }
        println!("{}", line);
    }
    Ok(())
}

fn run_walk(args: &WalkArgs) -> anyhow::Result<()> {
    let config = config_with_selector(&args.selector);
    let fragment = fs::read_to_string(&args.input)?;
    let selector = Selector::parse(&config.bullet_selector)?;

    let bullets = ManualBullets::new(&config)?;
    let mut deck = Deck::from_fragment(&fragment, vec![Box::new(bullets) as Box<dyn DeckPlugin>])?;

    // A parallel registry over the same markup, for reporting which
    // bullet the walk landed on.
    let registry = {
        let doc = deck.document();
        bespoke_deck::BulletRegistry::build(doc, deck.slides(), &selector)
    };

    for press in &args.presses {
        let nav = match press.trim() {
            "next" => deck.next(),
            "prev" => deck.prev(),
            other => match other.strip_prefix("slide:") {
                Some(index) => {
                    let index: usize = index
                        .parse()
                        .map_err(|_| anyhow::anyhow!("Bad press '{}': slide:N expects a number", other))?;
                    deck.jump(index)?;
                    Navigation::NotConsumed
                }
                None => anyhow::bail!("Unknown press '{}' (expected next, prev, or slide:N)", other),
            },
        };

        let slide = deck.current_slide();
        let current = registry
            .bullets(slide)
            .iter()
            .position(|&id| deck.document().has_class(id, BULLET_CURRENT_CLASS));
        let bullet = current.map_or_else(|| "-".to_string(), |b| b.to_string());
        println!(
            "{:<8} -> slide {}, bullet {} ({})",
            press.trim(),
            slide,
            bullet,
            if nav.is_consumed() { "consumed" } else { "not consumed" }
        );
    }
    Ok(())
}
