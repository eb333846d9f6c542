use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavQuote {
    pub scheme_name: String,
    pub nav: f64,
    pub date: NaiveDate,
}

pub trait NavSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    fn latest_navs(&self, as_of_date: NaiveDate) -> Result<Vec<NavQuote>>;
}

/// Sample NAVs for a handful of SBI schemes, stamped with the requested date.
#[derive(Debug, Clone, Default)]
pub struct StaticNavFeed;

impl NavSource for StaticNavFeed {
    fn source_name(&self) -> &'static str {
        "static_sample"
    }

    fn latest_navs(&self, as_of_date: NaiveDate) -> Result<Vec<NavQuote>> {
        let rows = [
            ("SBI Bluechip Fund - Regular Plan - Growth", 75.50),
            ("SBI Equity Hybrid Fund - Regular Plan - Growth", 250.25),
            ("SBI Small Cap Fund - Regular Plan - Growth", 160.80),
            ("SBI Long Term Equity Fund - Regular Plan - Growth", 300.10),
            ("SBI Balanced Advantage Fund - Regular Plan - Growth", 155.75),
        ];
        Ok(rows
            .into_iter()
            .map(|(scheme_name, nav)| NavQuote {
                scheme_name: scheme_name.to_string(),
                nav,
                date: as_of_date,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_requested_date() {
        let as_of = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let navs = StaticNavFeed.latest_navs(as_of).unwrap();
        assert_eq!(navs.len(), 5);
        assert!(navs.iter().all(|n| n.date == as_of));
        assert!(navs[0].scheme_name.starts_with("SBI Bluechip Fund"));
    }
}
