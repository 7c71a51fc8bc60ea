use std::sync::Arc;

use crate::specifier::{Charset, CharsetOracle, WellKnownCharsets};

/// Default maximum amount of elements a list grammar accepts.
pub const DEFAULT_MAX_LIST_ITEMS: usize = 1024;

/// Process-wide default [`DecodeConfig`], used by all `FromStr` impls
/// and by [`HeaderDecode::decode`](crate::HeaderDecode::decode).
pub static DEFAULT_DECODE_CONFIG: DecodeConfig = DecodeConfig::new();

/// Configuration that tunes how header values are decoded.
///
/// The defaults are strict: empty list elements are rejected and
/// charset names are resolved against [`WellKnownCharsets`].
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    charset_oracle: Option<Arc<dyn CharsetOracle>>,
    max_list_items: usize,
    lenient_empty_elements: bool,
}

impl DecodeConfig {
    /// Create a new [`DecodeConfig`] with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            charset_oracle: None,
            max_list_items: DEFAULT_MAX_LIST_ITEMS,
            lenient_empty_elements: false,
        }
    }

    /// Reference to the process-wide default config.
    #[must_use]
    pub fn global() -> &'static Self {
        &DEFAULT_DECODE_CONFIG
    }

    /// Use a custom [`CharsetOracle`] to resolve charset names.
    #[must_use]
    pub fn with_charset_oracle(mut self, oracle: impl CharsetOracle + 'static) -> Self {
        self.charset_oracle = Some(Arc::new(oracle));
        self
    }

    /// Use a custom [`CharsetOracle`] to resolve charset names.
    pub fn set_charset_oracle(&mut self, oracle: impl CharsetOracle + 'static) -> &mut Self {
        self.charset_oracle = Some(Arc::new(oracle));
        self
    }

    /// Set the maximum amount of elements a list grammar accepts.
    #[must_use]
    pub fn with_max_list_items(mut self, max: usize) -> Self {
        self.max_list_items = max;
        self
    }

    /// Set the maximum amount of elements a list grammar accepts.
    pub fn set_max_list_items(&mut self, max: usize) -> &mut Self {
        self.max_list_items = max;
        self
    }

    /// Skip empty list elements (`a,,b`) instead of failing on them.
    #[must_use]
    pub fn with_lenient_empty_elements(mut self, lenient: bool) -> Self {
        self.lenient_empty_elements = lenient;
        self
    }

    /// Skip empty list elements (`a,,b`) instead of failing on them.
    pub fn set_lenient_empty_elements(&mut self, lenient: bool) -> &mut Self {
        self.lenient_empty_elements = lenient;
        self
    }

    #[must_use]
    pub fn max_list_items(&self) -> usize {
        self.max_list_items
    }

    #[must_use]
    pub fn lenient_empty_elements(&self) -> bool {
        self.lenient_empty_elements
    }

    /// Resolve a charset name through the configured oracle,
    /// falling back to [`WellKnownCharsets`].
    #[must_use]
    pub fn resolve_charset(&self, name: &str) -> Option<Charset> {
        match &self.charset_oracle {
            Some(oracle) => oracle.resolve(name),
            None => WellKnownCharsets.resolve(name),
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}
