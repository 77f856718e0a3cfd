use super::Quote;
use crate::api::Http;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Quotes from Yahoo Finance, batched
//
////////////////////////////////////////////////////////////////////////////////////////////////////

const TIMEOUT: Duration = Duration::from_secs(20);

fn url(symbols: &[String]) -> String {
    format!(
        "https://query1.finance.yahoo.com/v7/finance/quote?symbols={}",
        symbols.join(",")
    )
}

pub struct YahooFinance;

impl YahooFinance {
    /// One request for the whole symbol list; Yahoo keys each record by symbol.
    pub async fn quotes(client: &HttpClient, symbols: &[String]) -> Result<Vec<Quote>> {
        let batch = Self::fetch(client, &url(symbols)).await?;
        Ok(batch.into_quotes())
    }
}

#[async_trait]
impl Http<QuoteBatch> for YahooFinance {
    async fn fetch(client: &HttpClient, url: &String) -> Result<QuoteBatch> {
        Self::fetch_de::<QuoteBatch>(client, url, TIMEOUT).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize, Debug)]
pub struct QuoteBatch {
    #[serde(rename = "quoteResponse")]
    pub quote_response: QuoteResponse,
}

#[derive(Deserialize, Debug)]
pub struct QuoteResponse {
    pub result: Option<Vec<QuoteRecord>>,
}

#[derive(Deserialize, Debug)]
pub struct QuoteRecord {
    pub symbol: String,
    #[serde(rename = "regularMarketPrice")]
    pub regular_market_price: Option<f64>,
    #[serde(rename = "regularMarketChange")]
    pub regular_market_change: Option<f64>,
    #[serde(rename = "regularMarketChangePercent")]
    pub regular_market_change_percent: Option<f64>,
}

impl QuoteBatch {
    pub fn into_quotes(self) -> Vec<Quote> {
        match self.quote_response.result {
            Some(records) => records
                .into_iter()
                .map(|record| Quote {
                    symbol: record.symbol,
                    price: record.regular_market_price,
                    change: record.regular_market_change,
                    change_pct: record.regular_market_change_percent,
                })
                .collect(),

            None => {
                warn!("Yahoo Finance reply contained no \"quoteResponse.result\" array; filling with an empty set instead");
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_reply_becomes_quotes_in_document_order() {
        let batch: QuoteBatch = serde_json::from_str(
            r#"{"quoteResponse":{"result":[
                {"symbol":"^GSPC","regularMarketPrice":5648.4,"regularMarketChange":56.44,"regularMarketChangePercent":1.01},
                {"symbol":"GC=F","regularMarketPrice":2535.3,"regularMarketChange":-12.1,"regularMarketChangePercent":-0.48}
            ],"error":null}}"#,
        )
        .unwrap();

        let quotes = batch.into_quotes();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].symbol, "^GSPC");
        assert_eq!(quotes[0].price, Some(5648.4));
        assert_eq!(quotes[1].change_pct, Some(-0.48));
    }

    #[test]
    fn records_with_missing_fields_keep_what_they_have() {
        let batch: QuoteBatch = serde_json::from_str(
            r#"{"quoteResponse":{"result":[{"symbol":"CL=F","regularMarketPrice":73.55}],"error":null}}"#,
        )
        .unwrap();

        let quotes = batch.into_quotes();
        assert_eq!(quotes[0].price, Some(73.55));
        assert_eq!(quotes[0].change, None);
        assert_eq!(quotes[0].change_pct, None);
    }

    #[test]
    fn missing_result_array_yields_no_quotes() {
        let batch: QuoteBatch =
            serde_json::from_str(r#"{"quoteResponse":{"result":null,"error":null}}"#).unwrap();
        assert!(batch.into_quotes().is_empty());
    }

    #[test]
    fn url_joins_symbols_with_commas() {
        let symbols = vec!["^GSPC".to_string(), "GC=F".to_string()];
        assert_eq!(
            url(&symbols),
            "https://query1.finance.yahoo.com/v7/finance/quote?symbols=^GSPC,GC=F"
        );
    }
}
