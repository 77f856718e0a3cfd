use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::fmt::Debug;
use std::time::Duration;
use tracing::error;

/// Fetch framework.
///
/// Every quote feed implements [`Http`]: the procedure for fetching data type `T`
/// from its HTTP endpoint. The Telegram sink lives apart in [`crate::telegram`],
/// since delivery has no fetch half.
#[async_trait]
pub trait Http<T>
where
    T: Debug + Send + Sync,
{
    /// How the data type `T` is fetched from some HTTP endpoint.
    async fn fetch(http_client: &HttpClient, url: &String) -> Result<T>;

    /// Pre-defined `fetch()` for when `serde::Deserialize` is defined to handle the
    /// transformations under the hood. Each feed carries its own request deadline.
    async fn fetch_de<D>(http_client: &HttpClient, url: &String, timeout: Duration) -> Result<D>
    where
        D: serde::de::DeserializeOwned,
    {
        let response = http_client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                error!("failed fetching response from {url}");
                e
            })?
            .error_for_status()
            .map_err(|e| {
                error!("bad status from {url}");
                e
            })?;

        let de: D = response.json().await.map_err(|e| {
            error!("failed deserializing from {url}");
            e
        })?;

        Ok(de)
    }
}
