//! Stand-ins for the market data, NAV and commentary sources the presentation layer
//! shows next to a recommendation. The engine never reads from these.

pub mod market;
pub mod nav;
pub mod notes;

pub use market::{IndexQuote, MarketDataSource, StaticMarketData, StockQuote};
pub use nav::{NavQuote, NavSource, StaticNavFeed};
pub use notes::manager_notes;
