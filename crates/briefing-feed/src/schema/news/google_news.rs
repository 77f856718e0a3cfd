use anyhow::Result;
use reqwest::Client as HttpClient;
use rss::Channel;
use std::time::Duration;
use tracing::trace;

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Headlines from the Google News RSS search feed
//
////////////////////////////////////////////////////////////////////////////////////////////////////

const TIMEOUT: Duration = Duration::from_secs(10);

pub static DEFAULT_QUERY: &str = "market OR markets OR finance";
pub const DEFAULT_CAP: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Headline {
    pub title: String,
    pub link: Option<String>,
}

pub struct GoogleNews;

impl GoogleNews {
    /// First `cap` items of the search feed, in feed order. The query goes out
    /// through `.query()` so it is URL-encoded on the way.
    pub async fn headlines(
        client: &HttpClient,
        query: &str,
        cap: usize,
    ) -> Result<Vec<Headline>> {
        let body = client
            .get("https://news.google.com/rss/search")
            .query(&[("q", query), ("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")])
            .timeout(TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let headlines = parse(&body, cap)?;
        trace!("{} headlines parsed from Google News", headlines.len());
        Ok(headlines)
    }
}

/// Feed bytes -> headlines; kept apart from the request so the markup handling
/// can be exercised without a network.
pub fn parse(bytes: &[u8], cap: usize) -> Result<Vec<Headline>> {
    let channel = Channel::read_from(bytes)?;
    Ok(channel
        .items()
        .iter()
        .take(cap)
        .map(|item| Headline {
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().map(String::from),
        })
        .collect())
}
