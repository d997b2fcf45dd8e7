//! Aqariy CLI
//!
//! Usage:
//!   aqariy --area 120 --age 5 --rooms 4 --city ramallah     # Estimate
//!   aqariy --area 120 --city ramallah --listed-price 400000  # Estimate + judgment
//!   aqariy --serve                                           # HTTP API server
//!   aqariy --area 120 --json                                 # JSON output

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use aqariy::config::EngineConfig;
use aqariy::core::presentation::{failure_notice, format_factor, format_price, judgment_message};
use aqariy::core::{parse_listed_price, run_server, ValuationFacade};
use aqariy::logging::init_logging;
use aqariy::types::{Judgment, JudgmentCategory, Locale, RawInput, Valuation};
use aqariy::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "aqariy",
    version = VERSION,
    about = "Aqariy - Estimate property value and judge a listed price",
    long_about = "Aqariy normalizes a property form, estimates a market value and,\n\
                  given a listed price, classifies it against that estimate.\n\n\
                  Estimates come from a remote scoring service when one is configured\n\
                  (--scoring-url or scoring.base_url) and fall back to a local\n\
                  rule-based baseline otherwise.\n\n\
                  Judgments:\n  \
                  OVERPRICED               - 25% or more above the estimate\n  \
                  FAIR_PRICE               - within -10% .. +25%\n  \
                  FAIR_LOW                 - within -25% .. -10%\n  \
                  GOOD_DEAL                - within -40% .. -25%\n  \
                  SUSPICIOUSLY_UNDERPRICED - more than 40% below"
)]
struct Args {
    /// Building area in square meters
    #[arg(long, default_value = "")]
    area: String,

    /// Building age in years
    #[arg(long, default_value = "")]
    age: String,

    /// Number of rooms
    #[arg(long, default_value = "")]
    rooms: String,

    /// Number of bathrooms
    #[arg(long, default_value = "")]
    bathrooms: String,

    /// Floor: a number, or B (basement), P (parlor), GF (ground)
    #[arg(long, default_value = "")]
    floor: String,

    /// Roof unit (overrides numeric floors above 2)
    #[arg(long)]
    roof: bool,

    /// Payment method: cash, mortgage or installments
    #[arg(long, default_value = "cash")]
    payment: String,

    /// City tag (jerusalem, ramallah, bethlehem, nablus, hebron, jenin, tulkarem)
    #[arg(long, default_value = "")]
    city: String,

    #[arg(long)]
    furnished: bool,

    #[arg(long)]
    parking: bool,

    #[arg(long)]
    garden: bool,

    #[arg(long)]
    elevator: bool,

    /// Listed price to judge against the estimate
    #[arg(short, long)]
    listed_price: Option<String>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (overrides server.addr)
    #[arg(long)]
    addr: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Presentation locale: en or ar
    #[arg(long)]
    lang: Option<Locale>,

    /// Config file (default: ./aqariy.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scoring service base URL
    #[arg(long, env = "AQARIY_SCORING_URL")]
    scoring_url: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn raw_input(&self) -> RawInput {
        RawInput {
            building_area: self.area.clone(),
            building_age: self.age.clone(),
            rooms: self.rooms.clone(),
            bathrooms: self.bathrooms.clone(),
            floor: self.floor.clone(),
            roof: self.roof,
            payment_method: self.payment.clone(),
            city: self.city.clone(),
            furnished: self.furnished,
            parking: self.parking,
            garden: self.garden,
            elevator: Some(self.elevator),
        }
    }
}

#[derive(Serialize)]
struct CliOutput<'a> {
    valuation: &'a Valuation,
    formatted_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    judgment: Option<&'a Judgment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    init_logging(&config.logging);

    let facade = match ValuationFacade::from_config(&config) {
        Ok(facade) => facade,
        Err(e) => {
            eprintln!("Scoring client error: {}", e);
            std::process::exit(2);
        }
    };
    let locale = args.lang.unwrap_or(config.locale);

    if args.serve {
        run_serve(&config.server.addr, facade, locale).await;
    } else {
        run_single(&facade, &args, locale).await;
    }
}

/// Config file and environment, then CLI flags on top
fn load_config(args: &Args) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from(path)?,
        None => EngineConfig::load()?,
    };
    if let Some(url) = &args.scoring_url {
        config.scoring.base_url = Some(url.clone());
    }
    if let Some(addr) = &args.addr {
        config.server.addr = addr.clone();
    }
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    config.validate()?;
    Ok(config)
}

/// Estimate once, and judge when a listed price was given
async fn run_single(facade: &ValuationFacade, args: &Args, locale: Locale) {
    let raw = args.raw_input();
    let valuation = facade.estimate_for(&raw).await;

    let judgment = match &args.listed_price {
        Some(text) => {
            let result = match parse_listed_price(text) {
                Ok(price) => facade.judge_estimate(&raw, price, &valuation).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(judgment) => Some(judgment),
                Err(e) => {
                    eprintln!("{}", failure_notice(&e, locale).red());
                    std::process::exit(1);
                }
            }
        }
        None => None,
    };

    if args.json {
        let output = CliOutput {
            valuation: &valuation,
            formatted_price: format_price(valuation.estimate, locale),
            judgment: judgment.as_ref(),
            message: judgment.as_ref().map(|j| judgment_message(j.category, locale)),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return;
    }

    print_valuation(&valuation, locale);
    if let Some(judgment) = &judgment {
        print_judgment(judgment, locale, args.no_color);
    }
}

fn print_valuation(valuation: &Valuation, locale: Locale) {
    println!(
        "{} {} {}",
        "Estimated value:".bold(),
        format_price(valuation.estimate, locale).bold().cyan(),
        format!("({})", valuation.source).dimmed()
    );

    if !valuation.low_confidence.is_empty() {
        let fields: Vec<String> = valuation.low_confidence.iter().map(|f| f.to_string()).collect();
        println!("{} {}", "  Defaulted fields:".yellow(), fields.join(", ").yellow());
    }

    if !valuation.factors.is_empty() {
        println!("{}", "  Factors:".bold());
        for factor in &valuation.factors {
            println!("    {}", format_factor(factor, locale));
        }
    }
}

fn print_judgment(judgment: &Judgment, locale: Locale, no_color: bool) {
    if no_color {
        println!("{}", judgment.to_parseable_string());
        println!("{}", judgment_message(judgment.category, locale));
        return;
    }
    println!(
        "{}{} {:+.1}%{}",
        judgment.category.color_code(),
        judgment.category,
        judgment.deviation * 100.0,
        JudgmentCategory::color_reset()
    );
    println!(
        "{}  {}{}",
        judgment.category.color_code(),
        judgment_message(judgment.category, locale),
        JudgmentCategory::color_reset()
    );
}

/// Run HTTP API server
async fn run_serve(addr: &str, facade: ValuationFacade, locale: Locale) {
    println!();
    println!("{}", "Aqariy valuation API".bold());
    println!("Version: {}", VERSION);
    match facade.backend_description() {
        Some(backend) => println!("Scoring backend: {}", backend),
        None => println!("Scoring backend: {}", "none (baseline only)".dimmed()),
    }
    println!();

    if let Err(e) = run_server(addr, facade, locale).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
