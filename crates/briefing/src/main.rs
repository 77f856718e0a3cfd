use anyhow::Result;
use briefing_feed::config::{Config, QuoteStrategy};
use briefing_feed::digest;
use briefing_feed::schema::news::google_news::{self, GoogleNews};
use briefing_feed::schema::quote;
use briefing_feed::telegram::Telegram;
use clap::Parser;
use cli::{Cli, Commands::*, StrategyArg, TraceLevel};
use dotenv::dotenv;
use reqwest::Client as HttpClient;
use tracing::{info, subscriber, trace, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;

static USER_AGENT: &str = concat!("briefing/", env!("CARGO_PKG_VERSION"));

fn preprocess(trace_level: Level) {
    dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.trace {
        TraceLevel::DEBUG => Level::DEBUG,
        TraceLevel::INFO => Level::INFO,
        TraceLevel::WARN => Level::WARN,
        TraceLevel::ERROR => Level::ERROR,
    };

    preprocess(log_level);
    trace!("Command line input recorded: {cli:#?}");

    // cli framework:
    // "> briefing <COMMAND>"
    match &cli.command {
        // "> briefing send [--quotes <strategy>]"
        // build today's digest and deliver it to Telegram
        Send { quotes } => {
            let config = Config::from_env(strategy(*quotes))?;
            let http_client = build_client()?;

            let message = build_digest(&http_client, &config).await;

            let bot = Telegram::new(&config.telegram_token, &config.telegram_chat_id);
            bot.send(&http_client, &message).await?;
            info!("Send success");
        }

        // "> briefing preview [--quotes <strategy>]"
        // same digest, printed to stdout instead of delivered
        Preview { quotes } => {
            let config = Config::from_env(strategy(*quotes))?;
            let http_client = build_client()?;

            let message = build_digest(&http_client, &config).await;
            println!("{message}");
        }
    }

    Ok(())
}

fn strategy(arg: StrategyArg) -> QuoteStrategy {
    match arg {
        StrategyArg::PrimaryThenFallback => QuoteStrategy::PrimaryThenFallback,
        StrategyArg::FallbackOnly => QuoteStrategy::FallbackOnly,
    }
}

fn build_client() -> Result<HttpClient> {
    let client = reqwest::ClientBuilder::new()
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Run the fetch stages and assemble the message. Feed failures degrade to
/// N/A lines or the no-headlines line; nothing here fails the run.
async fn build_digest(http_client: &HttpClient, config: &Config) -> String {
    info!("Collecting quotes for {} symbols", config.symbols.len());
    let quotes = quote::collect(http_client, config).await;

    info!("Fetching headlines");
    let headlines = match GoogleNews::headlines(
        http_client,
        google_news::DEFAULT_QUERY,
        google_news::DEFAULT_CAP,
    )
    .await
    {
        Ok(headlines) => headlines,
        Err(e) => {
            warn!("News fetch error: {e}");
            vec![]
        }
    };

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    digest::render(&today, &config.symbols, &quotes, &headlines)
}
