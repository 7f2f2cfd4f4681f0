//! Grid configuration

use std::collections::BTreeMap;
use std::time::Duration;

use crate::model::ColumnKey;

/// Tunables of the grid engine.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use usergrid_lib::grid::GridConfig;
///
/// let config = GridConfig::default()
///     .with_debounce(Duration::from_millis(150))
///     .with_default_page_size(20)
///     .with_endpoint_filters(true);
///
/// assert_eq!(config.default_page_size, 20);
/// ```
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Quiescence window for filter text.
    ///
    /// Default: 300 ms
    pub debounce: Duration,

    /// Page sizes the operator can choose from.
    ///
    /// Default: 5, 10, 20, 50
    pub page_sizes: Vec<usize>,

    /// Page size at startup. Must be one of `page_sizes`.
    ///
    /// Default: 10
    pub default_page_size: usize,

    /// Narrowest a column can be dragged, in pixels.
    ///
    /// Default: 50
    pub min_column_width: u32,

    /// Column widths before any drag or persisted snapshot.
    pub default_widths: BTreeMap<ColumnKey, u32>,

    /// Send active filters to the endpoint's filter route instead of
    /// filtering the whole collection locally.
    ///
    /// Default: off
    pub endpoint_filters: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            page_sizes: vec![5, 10, 20, 50],
            default_page_size: 10,
            min_column_width: 50,
            default_widths: ColumnKey::ALL
                .into_iter()
                .map(|key| (key, default_width(key)))
                .collect(),
            endpoint_filters: false,
        }
    }
}

fn default_width(key: ColumnKey) -> u32 {
    match key {
        ColumnKey::FullName => 240,
        ColumnKey::Age => 80,
        ColumnKey::Gender => 100,
        ColumnKey::Phone => 160,
        ColumnKey::Email => 220,
        ColumnKey::Country => 140,
        ColumnKey::City => 140,
    }
}

impl GridConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Sets the page sizes offered to the operator.
    pub fn with_page_sizes(mut self, sizes: impl IntoIterator<Item = usize>) -> Self {
        self.page_sizes = sizes.into_iter().filter(|size| *size > 0).collect();
        self
    }

    /// Sets the startup page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the minimum column width.
    pub fn with_min_column_width(mut self, width: u32) -> Self {
        self.min_column_width = width;
        self
    }

    /// Overrides the default width of one column.
    pub fn with_default_width(mut self, key: ColumnKey, width: u32) -> Self {
        self.default_widths.insert(key, width);
        self
    }

    /// Enables or disables the endpoint's filter route.
    pub fn with_endpoint_filters(mut self, enabled: bool) -> Self {
        self.endpoint_filters = enabled;
        self
    }

    /// Returns `true` if `size` is one of the configured page sizes.
    pub fn allows_page_size(&self, size: usize) -> bool {
        self.page_sizes.contains(&size)
    }

    /// The startup page size, or the first configured size if the default is not allowed.
    pub(crate) fn initial_page_size(&self) -> usize {
        if self.allows_page_size(self.default_page_size) {
            self.default_page_size
        } else {
            self.page_sizes.first().copied().unwrap_or(10)
        }
    }
}
