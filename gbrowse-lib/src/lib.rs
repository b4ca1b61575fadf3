//! Generic tabular data browser
//!
//! A stateful engine that takes column descriptors and rows and produces a
//! sorted, filtered, paginated, quick-jump navigable view. View state (order,
//! search terms, offset, page size) is persisted per instance through a
//! [`state::StateProvider`] so it survives across requests.
//!
//! Rows come either from memory ([`GenericBrowser::add_row`]) or from an
//! external query ([`GenericBrowser::query_order_limit`]); both paths share
//! the same order and filter descriptions.

pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod order;
pub mod page;
pub mod payload;
pub mod query;
pub mod request;
pub mod state;

mod browser;

pub use browser::*;
pub use config::BrowserConfig;
pub use payload::AssembledPayload;
pub use request::BrowserRequest;
