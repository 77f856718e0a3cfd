pub mod finnhub;
pub mod yahoo_finance;

use crate::config::{Config, QuoteStrategy};
use reqwest::Client as HttpClient;
use std::collections::HashMap;
use tokio_stream::{self as stream, StreamExt};
use tracing::{debug, error, trace, warn};

/// One symbol's state for the day. `None` fields mean the provider returned no
/// data for them; a quote without a price renders as N/A downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
}

/// Resolve every configured symbol to a [`Quote`]: Finnhub per symbol when the
/// strategy and token allow it, then one batched Yahoo Finance request for
/// whatever is left. Feed failures degrade to missing entries, never abort.
pub async fn collect(http_client: &HttpClient, config: &Config) -> HashMap<String, Quote> {
    let mut quotes: HashMap<String, Quote> = HashMap::new();

    if config.strategy == QuoteStrategy::PrimaryThenFallback {
        match &config.finnhub_token {
            Some(token) => primary_pass(token, config, &mut quotes).await,
            None => debug!("FINNHUB_TOKEN not set; skipping the primary pass"),
        }
    }

    let leftovers = unresolved(&config.symbols, &quotes);
    if !leftovers.is_empty() {
        debug!("{} symbols left for Yahoo Finance", leftovers.len());
        match yahoo_finance::YahooFinance::quotes(http_client, &leftovers).await {
            Ok(batch) => merge_fallback(&mut quotes, batch),
            Err(e) => error!("Yahoo Finance batch fetch failed: {e}"),
        }
    }

    quotes
}

async fn primary_pass(token: &str, config: &Config, quotes: &mut HashMap<String, Quote>) {
    let finnhub_client = match finnhub::Finnhub::build_client(token) {
        Ok(client) => client,
        Err(e) => {
            error!("Finnhub client build failed: {e}");
            return;
        }
    };

    let mut stream = stream::iter(&config.symbols);
    while let Some(symbol) = stream.next().await {
        match finnhub::Finnhub::quote(&finnhub_client, symbol).await {
            Ok(Some(quote)) => {
                trace!("[{symbol}] resolved by Finnhub");
                quotes.insert(symbol.clone(), quote);
            }
            Ok(None) => warn!("[{symbol}] Finnhub returned no usable price"),
            Err(e) => warn!("[{symbol}] Finnhub fetch failed: {e}"),
        }
    }
}

/// Symbols still without a quote, in request order, each listed once.
pub fn unresolved(requested: &[String], resolved: &HashMap<String, Quote>) -> Vec<String> {
    let mut leftovers: Vec<String> = Vec::new();
    for symbol in requested {
        if !resolved.contains_key(symbol) && !leftovers.contains(symbol) {
            leftovers.push(symbol.clone());
        }
    }
    leftovers
}

/// Fold fallback records in without touching symbols the primary pass resolved.
pub fn merge_fallback(quotes: &mut HashMap<String, Quote>, batch: Vec<Quote>) {
    for quote in batch {
        quotes.entry(quote.symbol.clone()).or_insert(quote);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, price: f64) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            price: Some(price),
            change: None,
            change_pct: None,
        }
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn everything_unresolved_when_nothing_resolved() {
        let requested = symbols(&["^GSPC", "^IXIC", "GC=F"]);
        assert_eq!(unresolved(&requested, &HashMap::new()), requested);
    }

    #[test]
    fn resolved_symbols_are_excluded_from_the_fallback_set() {
        let requested = symbols(&["AAA", "BBB"]);
        let mut resolved = HashMap::new();
        resolved.insert("AAA".to_string(), quote("AAA", 1.0));
        assert_eq!(unresolved(&requested, &resolved), vec!["BBB"]);
    }

    #[test]
    fn duplicate_requests_are_listed_once() {
        let requested = symbols(&["AAA", "BBB", "AAA"]);
        assert_eq!(unresolved(&requested, &HashMap::new()), vec!["AAA", "BBB"]);
    }

    #[test]
    fn fallback_never_overwrites_a_primary_quote() {
        let mut quotes = HashMap::new();
        quotes.insert("AAA".to_string(), quote("AAA", 1.0));
        merge_fallback(&mut quotes, vec![quote("AAA", 9.0), quote("BBB", 10.0)]);
        assert_eq!(quotes["AAA"].price, Some(1.0));
        assert_eq!(quotes["BBB"].price, Some(10.0));
    }
}
