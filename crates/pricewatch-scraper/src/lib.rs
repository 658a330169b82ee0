pub mod dom;
pub mod error;
pub mod fetch;
pub mod heuristic;
pub mod price;
pub mod registry;
pub mod sites;
pub mod structured;
pub mod tracker;

pub use error::ScraperError;
pub use fetch::{DelayRange, FetchPolicy, FetchedPage, Fetcher, RequestHeaders, RequestProfile};
pub use heuristic::{ExtractionStrategy, GenericStrategy, Page, PartialProduct};
pub use price::normalize_price;
pub use registry::{FailurePolicy, SiteProfile, SiteRegistry};
pub use sites::{SiteRules, StockRule};
pub use tracker::ProductTracker;
