use std::fmt;
use std::str::FromStr;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("quote request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("quote service reported an error: {0}")]
    Api(String),
    #[error("malformed quote payload: {0}")]
    Malformed(&'static str),
}

/// Time range accepted by the quote service's `period` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day1,
    Day5,
    Month1,
    Month3,
    Month6,
    Year1,
    Year2,
    Year5,
    Ytd,
    Max,
}

impl Period {
    pub const ALL: [Period; 10] = [
        Period::Day1,
        Period::Day5,
        Period::Month1,
        Period::Month3,
        Period::Month6,
        Period::Year1,
        Period::Year2,
        Period::Year5,
        Period::Ytd,
        Period::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day1 => "1d",
            Period::Day5 => "5d",
            Period::Month1 => "1mo",
            Period::Month3 => "3mo",
            Period::Month6 => "6mo",
            Period::Year1 => "1y",
            Period::Year2 => "2y",
            Period::Year5 => "5y",
            Period::Ytd => "ytd",
            Period::Max => "max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("unknown period label: {0}")]
pub struct ParsePeriodError(String);

impl FromStr for Period {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_lowercase();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == label)
            .ok_or_else(|| ParsePeriodError(s.to_string()))
    }
}

#[derive(Clone)]
pub struct PriceClient {
    client: Client,
    base_api: String,
}

impl PriceClient {
    pub fn new(base_api: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_api: base_api.into(),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let base_api = std::env::var("STOCK_API_BASE_URL")?;
        Ok(Self::new(base_api))
    }

    /// Fetches the price history for one symbol, newest row last.
    pub async fn fetch_history(
        &self,
        symbol: &str,
        period: Option<Period>,
    ) -> Result<StockHistory, PriceError> {
        let url = format!(
            "{}/api/stock/{}",
            self.base_api.trim_end_matches('/'),
            symbol
        );

        let mut request = self.client.get(url);
        if let Some(period) = period {
            request = request.query(&[("period", period.as_str())]);
        }

        let response: StockDataResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.into_result()
    }

    /// Looks up stocks matching a free-text query.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, PriceError> {
        let url = format!("{}/api/search", self.base_api.trim_end_matches('/'));

        let response: SearchResponse = self
            .client
            .get(url)
            .query(&[("q", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success {
            return Err(PriceError::Api(
                response.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        response
            .results
            .ok_or(PriceError::Malformed("missing results field"))
    }
}

//
// Match the quote service JSON. Rows carry the column labels of the
// upstream market feed; an absent `success` or `data` field is treated
// as a failed fetch rather than papered over.
//
#[derive(Debug, Deserialize)]
struct StockDataResponse {
    success: bool,
    data: Option<Vec<Candle>>,
    info: Option<CompanyInfo>,
    error: Option<String>,
}

impl StockDataResponse {
    fn into_result(self) -> Result<StockHistory, PriceError> {
        if !self.success {
            return Err(PriceError::Api(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let candles = self.data.ok_or(PriceError::Malformed("missing data field"))?;
        Ok(StockHistory {
            candles,
            info: self.info,
        })
    }
}

#[derive(Debug, Clone)]
pub struct StockHistory {
    pub candles: Vec<Candle>,
    pub info: Option<CompanyInfo>,
}

impl StockHistory {
    pub fn latest_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close)
    }

    pub fn latest_change(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close - c.open)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Candle {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Open")]
    pub open: f64,

    #[serde(rename = "High")]
    pub high: f64,

    #[serde(rename = "Low")]
    pub low: f64,

    #[serde(rename = "Close")]
    pub close: f64,

    #[serde(rename = "Volume")]
    pub volume: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CompanyInfo {
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,

    #[serde(rename = "longName")]
    pub long_name: Option<String>,

    pub sector: Option<String>,

    #[serde(rename = "exchangeName")]
    pub exchange: Option<String>,

    #[serde(rename = "regularMarketPrice")]
    pub market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    success: bool,
    results: Option<Vec<SearchResult>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchResult {
    pub symbol: String,
    pub name: String,
    pub exchange: Option<String>,
    pub sector: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_labels_parse_back() {
        assert_eq!("1mo".parse::<Period>().unwrap(), Period::Month1);
        assert_eq!(" YTD ".parse::<Period>().unwrap(), Period::Ytd);
        assert_eq!(Period::Year1.as_str(), "1y");
        assert!("2w".parse::<Period>().is_err());
    }

    #[test]
    fn failure_flag_becomes_an_api_error() {
        let response: StockDataResponse =
            serde_json::from_str(r#"{"success": false, "error": "no such symbol"}"#).unwrap();

        match response.into_result() {
            Err(PriceError::Api(msg)) => assert_eq!(msg, "no such symbol"),
            other => panic!("expected an api error, got {other:?}"),
        }
    }

    #[test]
    fn missing_data_field_fails_closed() {
        let response: StockDataResponse =
            serde_json::from_str(r#"{"success": true}"#).unwrap();

        assert!(matches!(
            response.into_result(),
            Err(PriceError::Malformed(_))
        ));
    }

    #[test]
    fn missing_success_field_does_not_decode() {
        assert!(serde_json::from_str::<StockDataResponse>(r#"{"data": []}"#).is_err());
    }
}
