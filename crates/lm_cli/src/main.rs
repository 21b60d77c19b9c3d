use std::io::Read;
use std::net::SocketAddr;

use anyhow::Context;
use clap::{ArgAction, Parser};
use lm_inference::{create_generator, StudyGenerator};
use lm_news::SummarizeRequest;
use lm_web::AppState;
use tracing::{info, warn};

mod config;
mod logging;

use config::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Flashcards, quizzes and ticker news sentiment from language models", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    settings: Settings,
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "LM_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
    /// Generate flashcards from notes ("-" reads stdin)
    Flashcards { notes: String },
    /// Generate a multiple-choice quiz from text ("-" reads stdin)
    Quiz { text: String },
    /// Score and summarize recent news for a ticker
    Summarize {
        ticker: String,
        /// Oldest article date, e.g. 2024-05-01
        #[arg(long)]
        from: Option<String>,
        /// Newest article date
        #[arg(long)]
        to: Option<String>,
    },
}

fn read_input(arg: String) -> anyhow::Result<String> {
    if arg != "-" {
        return Ok(arg);
    }
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(logging::level_for(cli.verbose, cli.quiet));

    let settings = cli.settings;
    let inference = settings.inference_config();

    match cli.command {
        Commands::Serve { bind } => {
            let generator = create_generator(&inference)?;
            info!("🧠 Text generator ready (using {})", generator.name());

            let news = match settings.news_pipeline() {
                Ok(pipeline) => {
                    info!("📰 News pipeline ready: {:?}", pipeline);
                    Some(pipeline)
                }
                Err(e) => {
                    warn!("⚠️ News summaries disabled: {}", e);
                    None
                }
            };

            let state = AppState::new(StudyGenerator::new(generator), news);
            lm_web::serve(state, bind).await?;
        }
        Commands::Flashcards { notes } => {
            let study = StudyGenerator::new(create_generator(&inference)?);
            let notes = read_input(notes)?;
            print_json(&study.flashcards(Some(&notes)).await?)?;
        }
        Commands::Quiz { text } => {
            let study = StudyGenerator::new(create_generator(&inference)?);
            let text = read_input(text)?;
            print_json(&study.quiz(Some(&text)).await?)?;
        }
        Commands::Summarize { ticker, from, to } => {
            let pipeline = settings.news_pipeline()?;
            let request = SummarizeRequest {
                ticker: Some(ticker),
                from,
                to,
            };
            print_json(&pipeline.run(request).await?)?;
        }
    }

    Ok(())
}
