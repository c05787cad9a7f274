use std::fmt;
use std::sync::Arc;

use anyhow::Result;

/// Custom removal rule. Receives the comment text without delimiters and
/// returns whether the comment should be removed.
///
/// The predicate is expected to be pure. An `Err` aborts filtering and is
/// returned to the caller unchanged.
pub type RemovePredicate = Arc<dyn Fn(&str) -> Result<bool> + Send + Sync>;

/// Retention rules for one filtering pass.
#[derive(Clone, Default)]
pub struct Options {
    /// Extra removal rule, consulted before the built-in classification.
    pub remove: Option<RemovePredicate>,
    /// Remove important (`/*!...*/`) comments too.
    pub remove_all: bool,
    /// Remove every important comment except the first one in document order.
    pub remove_all_but_first: bool,
}

impl Options {
    pub fn remove_all() -> Self {
        Self {
            remove_all: true,
            ..Self::default()
        }
    }

    pub fn remove_all_but_first() -> Self {
        Self {
            remove_all_but_first: true,
            ..Self::default()
        }
    }

    /// Add an infallible removal predicate.
    pub fn with_remove<F>(self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.with_fallible_remove(move |text| Ok(predicate(text)))
    }

    /// Add a removal predicate that may fail.
    pub fn with_fallible_remove<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> Result<bool> + Send + Sync + 'static,
    {
        self.remove = Some(Arc::new(predicate));
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("remove", &self.remove.as_ref().map(|_| "<predicate>"))
            .field("remove_all", &self.remove_all)
            .field("remove_all_but_first", &self.remove_all_but_first)
            .finish()
    }
}
