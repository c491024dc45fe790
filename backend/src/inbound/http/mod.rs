//! HTTP inbound adapter serving the HTML pages.

pub mod error;
pub mod forms;
pub mod pages;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::PageResult;
pub use state::HttpState;
pub use views::{HtmlViewRenderer, View, ViewName, ViewRenderer};
