use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    pub index: String,
    pub value: f64,
    pub change: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub change: f64,
    pub percent_change: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
}

pub trait MarketDataSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    fn market_indices(&self) -> Result<Vec<IndexQuote>>;

    /// `None` when the ticker is not covered.
    fn stock_quote(&self, ticker: &str) -> Result<Option<StockQuote>>;
}

/// Fixed sample quotes until a broker feed is wired in.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData;

impl MarketDataSource for StaticMarketData {
    fn source_name(&self) -> &'static str {
        "static_sample"
    }

    fn market_indices(&self) -> Result<Vec<IndexQuote>> {
        let rows = [
            ("Nifty 50", 22500.50, 50.25, 0.22),
            ("Sensex", 74500.20, 120.30, 0.16),
            ("Nifty Bank", 48000.75, 80.15, 0.17),
            ("Nifty Next 50", 52000.10, -30.50, -0.06),
        ];
        Ok(rows
            .into_iter()
            .map(|(index, value, change, change_pct)| IndexQuote {
                index: index.to_string(),
                value,
                change,
                change_pct,
            })
            .collect())
    }

    fn stock_quote(&self, ticker: &str) -> Result<Option<StockQuote>> {
        if ticker.trim() != "SBIN.NS" {
            return Ok(None);
        }
        Ok(Some(StockQuote {
            symbol: "SBIN.NS".to_string(),
            name: "State Bank of India".to_string(),
            current_price: 800.50,
            change: 5.20,
            percent_change: 0.65,
            open: 795.00,
            high: 802.00,
            low: 790.00,
        }))
    }
}
