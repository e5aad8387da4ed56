//! Market insight feeds: the fixture trend report and the news search proxy.

pub mod news;
pub mod trends;

pub use news::{NewsArticle, NewsClient, NewsSearchResponse};
pub use trends::{trend_report, TrendReport, DEFAULT_QUERY};
