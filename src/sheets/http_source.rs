use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::SheetSource;
use crate::config::SheetsConfig;
use crate::models::SheetValues;

/// Live spreadsheet values endpoint:
/// `{api_url}/{spreadsheet_id}/values/{sheet_name}?key={api_key}`.
pub struct HttpSheet {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpSheet {
    pub fn new(cfg: &SheetsConfig) -> Result<Self> {
        let spreadsheet_id = cfg
            .spreadsheet_id
            .as_deref()
            .ok_or_else(|| anyhow!("SHEETS_SPREADSHEET_ID not set"))?;
        let api_key = cfg
            .api_key
            .clone()
            .ok_or_else(|| anyhow!("SHEETS_API_KEY not set"))?;

        let client = Client::builder()
            .timeout(cfg.timeout)
            .build()
            .context("building spreadsheet HTTP client")?;

        Ok(Self {
            client,
            url: values_url(&cfg.api_url, spreadsheet_id, &cfg.sheet_name),
            api_key,
        })
    }
}

fn values_url(base: &str, spreadsheet_id: &str, sheet_name: &str) -> String {
    format!(
        "{}/{}/values/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(spreadsheet_id),
        urlencoding::encode(sheet_name),
    )
}

#[async_trait]
impl SheetSource for HttpSheet {
    async fn fetch_values(&self) -> Result<SheetValues> {
        tracing::debug!(url = %format!("{}?key=<redacted>", self.url), "fetching spreadsheet");

        let res = self
            .client
            .get(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .context("spreadsheet request failed")?
            .error_for_status()
            .context("spreadsheet endpoint returned an error")?;

        res.json::<SheetValues>()
            .await
            .context("spreadsheet payload is not a values table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetsMode;
    use std::time::Duration;

    fn cfg(id: Option<&str>, key: Option<&str>) -> SheetsConfig {
        SheetsConfig {
            mode: SheetsMode::Http,
            api_url: "https://sheets.example.com/v4/spreadsheets/".into(),
            spreadsheet_id: id.map(Into::into),
            sheet_name: "Books 2024".into(),
            api_key: key.map(Into::into),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn url_follows_values_endpoint_template() {
        assert_eq!(
            values_url("https://x/v4/spreadsheets/", "abc", "Books 2024"),
            "https://x/v4/spreadsheets/abc/values/Books%202024"
        );
    }

    #[test]
    fn requires_id_and_key() {
        assert!(HttpSheet::new(&cfg(None, Some("k"))).is_err());
        assert!(HttpSheet::new(&cfg(Some("id"), None)).is_err());
        let sheet = HttpSheet::new(&cfg(Some("id"), Some("k"))).unwrap();
        assert_eq!(sheet.url, "https://sheets.example.com/v4/spreadsheets/id/values/Books%202024");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let mut c = cfg(Some("id"), Some("k"));
        c.api_url = "http://127.0.0.1:9".into();
        let sheet = HttpSheet::new(&c).unwrap();
        assert!(sheet.fetch_values().await.is_err());
    }
}
