//! Browser configuration

use serde::Deserialize;
use serde::Serialize;

/// Tunables shared by every browser instance of a host.
///
/// # Example
///
/// ```
/// use gbrowse_lib::BrowserConfig;
///
/// let config = BrowserConfig::default()
///     .with_default_page_size(10)
///     .with_order_history(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Page sizes a user may pick.
    ///
    /// Default: 5, 10, 15, 20, 25, 50, 100
    pub allowed_page_sizes: Vec<usize>,

    /// Page size used when none is stored or the stored one is not allowed.
    ///
    /// Default: 5
    pub default_page_size: usize,

    /// Page count above which the page picker turns into a range input.
    ///
    /// Default: 25
    pub page_picker_threshold: usize,

    /// Whether an empty result reports "No records found".
    ///
    /// Default: true
    pub show_no_records_message: bool,

    /// Split the keyword on whitespace and require every word to match.
    ///
    /// Default: false
    pub split_keywords: bool,

    /// Expose the full order stack as text in the payload.
    ///
    /// Default: false
    pub order_history: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            allowed_page_sizes: vec![5, 10, 15, 20, 25, 50, 100],
            default_page_size: 5,
            page_picker_threshold: 25,
            show_no_records_message: true,
            split_keywords: false,
            order_history: false,
        }
    }
}

impl BrowserConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the allowed page sizes.
    pub fn with_allowed_page_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.allowed_page_sizes = sizes.into();
        self
    }

    /// Sets the fallback page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the page picker threshold.
    pub fn with_page_picker_threshold(mut self, threshold: usize) -> Self {
        self.page_picker_threshold = threshold;
        self
    }

    /// Enables or disables the "No records found" summary.
    pub fn with_no_records_message(mut self, show: bool) -> Self {
        self.show_no_records_message = show;
        self
    }

    /// Enables or disables split keyword matching.
    pub fn with_split_keywords(mut self, split: bool) -> Self {
        self.split_keywords = split;
        self
    }

    /// Enables or disables the order history text.
    pub fn with_order_history(mut self, enabled: bool) -> Self {
        self.order_history = enabled;
        self
    }

    /// Returns `true` if `size` is one of the allowed page sizes.
    pub fn is_allowed_page_size(&self, size: usize) -> bool {
        self.allowed_page_sizes.contains(&size)
    }

    /// Returns `size` if allowed, otherwise the fallback page size.
    pub fn sanitize_page_size(&self, size: usize) -> usize {
        if self.is_allowed_page_size(size) {
            size
        } else {
            log::warn!(
                "page size {} not allowed, falling back to {}",
                size,
                self.fallback_page_size()
            );
            self.fallback_page_size()
        }
    }

    /// The fallback page size, never zero.
    pub fn fallback_page_size(&self) -> usize {
        self.default_page_size.max(1)
    }
}
