use std::time::Duration;

use clap::Parser;
use llmhub::core::HttpClientConfig;
use llmhub::ui::{ChatApp, Command, SubmitOutcome, parse_command, render};
use llmhub::{Completions, GroqClient, GroqConfig, TextGenerator, provider};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "llmhub", version, about = "Chat with hosted LLMs from the terminal")]
struct Args {
    /// Model to start with (see /models)
    #[arg(short, long, default_value = provider::default_model())]
    model: String,

    /// Override the API base URL
    #[arg(long, env = "GROQ_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (reqwest default when omitted)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut http_config = HttpClientConfig::default();
    if let Some(secs) = args.timeout_secs {
        http_config = http_config.with_timeout(Duration::from_secs(secs));
    }

    let mut config = GroqConfig::from_env()?.with_http_config(http_config);
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }

    let client = Completions::new(GroqClient::new(config)?);
    let app = ChatApp::new(client).with_model(&args.model)?;

    run(app).await
}

async fn run<G: TextGenerator>(mut app: ChatApp<G>) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render::render_banner(app.model()));
    println!("Type /help for commands.\n");

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match command {
            Command::Prompt(prompt) => {
                if !prompt.trim().is_empty() {
                    println!("Generating response using {}...", app.model());
                }
                match app.submit(&prompt).await {
                    SubmitOutcome::Generated => {
                        println!("{}\n", render::SUCCESS_NOTICE);
                        println!("{}", render::render_history(app.session()));
                    }
                    SubmitOutcome::Failed => eprintln!("{}", render::FAILURE_NOTICE),
                    SubmitOutcome::MissingInput => eprintln!("{}", render::MISSING_INPUT_NOTICE),
                }
            }
            Command::Model(None) => println!("Model: {}", app.model()),
            Command::Model(Some(model)) => match app.select_model(&model) {
                Ok(()) => println!("Model: {}", app.model()),
                Err(e) => eprintln!("{e}"),
            },
            Command::Models => println!("{}", render::render_models(app.model())),
            Command::History => println!("{}", render::render_history(app.session())),
            Command::Expand { number, side } => match app.toggle_expanded(number, side) {
                Ok(_) => println!("{}", render::render_history(app.session())),
                Err(e) => eprintln!("{e}"),
            },
            Command::Export => {
                if app.session().is_empty() {
                    println!("Nothing to export yet.");
                } else if app.toggle_export() {
                    println!("{}", render::render_export(app.session()));
                } else {
                    println!("Export hidden.");
                }
            }
            Command::Clear => {
                app.clear();
                println!("Conversation history cleared.");
            }
            Command::Help => println!("{}", render::HELP_TEXT),
            Command::Quit => break,
        }
    }

    Ok(())
}
