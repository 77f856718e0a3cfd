use super::Quote;
use crate::api::Http;
use anyhow::Result;
use async_trait::async_trait;
use lazy_static::lazy_static;
use reqwest::header::HeaderValue;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::collections::BTreeMap as Map;
use std::time::Duration;
use tracing::trace;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Quotes from Finnhub, per symbol
// API Documentation: https://finnhub.io/docs/api/quote
//
////////////////////////////////////////////////////////////////////////////////////////////////////

const TIMEOUT: Duration = Duration::from_secs(8);

lazy_static! {
    /// Canonical symbol -> Finnhub symbol.
    ///
    /// This is currently maintained manually. Symbols not listed here are passed
    /// through unchanged.
    pub static ref SYMBOL_MAP: Map<&'static str, &'static str> = Map::from([
        ("^GSPC", "US:SPX"),
        ("^IXIC", "US:NDX"),
        ("^DJI", "US:DJI"),
        ("GC=F", "OANDA:XAU_USD"),
        ("CL=F", "OANDA:WTICO_USD"),
        ("USDJPY=X", "OANDA:USD_JPY"),
        ("EURUSD=X", "OANDA:EUR_USD"),
    ]);
}

pub fn map_symbol(symbol: &str) -> &str {
    SYMBOL_MAP.get(symbol).copied().unwrap_or(symbol)
}

fn url(symbol: &str) -> String {
    format!("https://finnhub.io/api/v1/quote?symbol={symbol}")
}

pub struct Finnhub;

impl Finnhub {
    /// Client with the API key preloaded as a default header, keeping request
    /// URLs free of credentials.
    pub fn build_client(token: &str) -> Result<HttpClient> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("X-Finnhub-Token", HeaderValue::from_str(token)?);
        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()?;
        Ok(client)
    }

    /// One symbol per request; `Ok(None)` when Finnhub has no usable price for it.
    pub async fn quote(client: &HttpClient, symbol: &str) -> Result<Option<Quote>> {
        let mapped = map_symbol(symbol);
        trace!("[{symbol}] requesting Finnhub as {mapped}");
        let reply = Self::fetch(client, &url(mapped)).await?;
        Ok(reply.into_quote(symbol))
    }
}

#[async_trait]
impl Http<QuoteReply> for Finnhub {
    async fn fetch(client: &HttpClient, url: &String) -> Result<QuoteReply> {
        Self::fetch_de::<QuoteReply>(client, url, TIMEOUT).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize, Debug)]
pub struct QuoteReply {
    /// Current price; `0` when the symbol is unknown to Finnhub.
    pub c: Option<f64>,
    /// Absolute change on the day.
    pub d: Option<f64>,
    /// Percentage change on the day.
    pub dp: Option<f64>,
}

impl QuoteReply {
    /// A reply only counts as resolved when it carries a real current price.
    pub fn into_quote(self, symbol: &str) -> Option<Quote> {
        match self.c {
            Some(price) if price != 0.0 => Some(Quote {
                symbol: symbol.to_string(),
                price: Some(price),
                change: self.d,
                change_pct: self.dp,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_symbols_translate() {
        assert_eq!(map_symbol("^GSPC"), "US:SPX");
        assert_eq!(map_symbol("USDJPY=X"), "OANDA:USD_JPY");
    }

    #[test]
    fn unmapped_symbols_pass_through_unchanged() {
        assert_eq!(map_symbol("AAPL"), "AAPL");
    }

    #[test]
    fn full_reply_becomes_a_quote() {
        let reply: QuoteReply =
            serde_json::from_str(r#"{"c":261.74,"d":3.36,"dp":1.3,"h":263.31,"l":260.68,"o":261.07,"pc":258.38,"t":1582641000}"#)
                .unwrap();
        let quote = reply.into_quote("AAPL").unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, Some(261.74));
        assert_eq!(quote.change, Some(3.36));
        assert_eq!(quote.change_pct, Some(1.3));
    }

    #[test]
    fn zero_price_means_unknown_symbol() {
        let reply: QuoteReply =
            serde_json::from_str(r#"{"c":0,"d":null,"dp":null,"h":0,"l":0,"o":0,"pc":0,"t":0}"#)
                .unwrap();
        assert!(reply.into_quote("NOPE").is_none());
    }

    #[test]
    fn missing_price_field_means_unresolved() {
        let reply: QuoteReply = serde_json::from_str(r#"{"error":"wrong symbol"}"#).unwrap();
        assert!(reply.into_quote("NOPE").is_none());
    }
}
