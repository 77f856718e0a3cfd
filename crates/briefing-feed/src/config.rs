use anyhow::{anyhow, Result};
use dotenv::var;

/// Symbols reported when `MARKET_SYMBOLS` is not set.
pub static DEFAULT_SYMBOLS: &str = "^GSPC,^IXIC,^DJI,GC=F,CL=F,USDJPY=X,EURUSD=X";

/// How quotes are acquired. One pipeline, with the old per-script fallback
/// behaviours folded into a single switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuoteStrategy {
    /// Finnhub per symbol first, the batched Yahoo Finance request for whatever
    /// is left. Requires `FINNHUB_TOKEN`; without it the first pass is skipped.
    PrimaryThenFallback,

    /// Straight to the batched Yahoo Finance request.
    FallbackOnly,
}

/// Run configuration, read from the environment exactly once and passed by
/// parameter from there on.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub symbols: Vec<String>,
    pub finnhub_token: Option<String>,
    pub strategy: QuoteStrategy,
}

impl Config {
    /// Missing required variables fail the run before any network call is made.
    pub fn from_env(strategy: QuoteStrategy) -> Result<Self> {
        let telegram_token =
            var("TELEGRAM_TOKEN").map_err(|_| anyhow!("TELEGRAM_TOKEN is not set"))?;
        let telegram_chat_id =
            var("TELEGRAM_CHAT_ID").map_err(|_| anyhow!("TELEGRAM_CHAT_ID is not set"))?;
        let symbols = parse_symbols(
            &var("MARKET_SYMBOLS").unwrap_or_else(|_| DEFAULT_SYMBOLS.to_string()),
        );
        let finnhub_token = var("FINNHUB_TOKEN").ok().filter(|token| !token.is_empty());

        Ok(Self {
            telegram_token,
            telegram_chat_id,
            symbols,
            finnhub_token,
            strategy,
        })
    }
}

/// Comma-separated symbol list; blanks dropped, duplicates kept as given.
pub fn parse_symbols(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_split_on_commas() {
        assert_eq!(
            parse_symbols("^GSPC,^IXIC,GC=F"),
            vec!["^GSPC", "^IXIC", "GC=F"]
        );
    }

    #[test]
    fn symbols_keep_duplicates_and_drop_blanks() {
        assert_eq!(
            parse_symbols(" AAPL , ,AAPL,,MSFT "),
            vec!["AAPL", "AAPL", "MSFT"]
        );
    }

    #[test]
    fn default_symbol_list_parses_to_seven() {
        assert_eq!(parse_symbols(DEFAULT_SYMBOLS).len(), 7);
    }
}
