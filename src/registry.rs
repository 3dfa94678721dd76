//! Custom keyword registry.
//!
//! This module provides the [`KeywordRegistry`] that stores custom keyword
//! handlers for one schema loader. There is no process-wide registry: two
//! loaders with different keywords never see each other's handlers.
//!
//! # Registration policy
//!
//! - Names must be non-empty.
//! - Names from the base vocabulary (`properties`, `type`, ...) are reserved.
//! - Registering a name twice is rejected; the first handler stays in effect.
//! - Once a loader has started compiling, its registry is sealed and further
//!   registration is rejected.
//!
//! Handlers are kept in registration order, which is also the order the
//! compiler checks declarations in at each schema node.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::keyword::CustomKeyword;
use crate::schema::vocabulary::is_base_keyword;

/// Type alias for the handler storage map.
type KeywordMap = IndexMap<String, Arc<dyn CustomKeyword>>;

/// A thread-safe store of custom keyword handlers keyed by keyword name.
///
/// # Example
///
/// ```rust
/// use addendum::{KeywordRegistry, RangeKeyword};
///
/// let registry = KeywordRegistry::new();
/// registry.register(RangeKeyword::new()).unwrap();
///
/// // Duplicate registration fails
/// assert!(registry.register(RangeKeyword::new()).is_err());
/// assert!(registry.get("range").is_some());
/// ```
pub struct KeywordRegistry {
    keywords: RwLock<KeywordMap>,
    sealed: AtomicBool,
}

impl KeywordRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            keywords: RwLock::new(IndexMap::new()),
            sealed: AtomicBool::new(false),
        }
    }

    /// Registers a handler under its own keyword name.
    ///
    /// # Errors
    ///
    /// - `RegistryError::EmptyKeyword` if the handler's name is empty.
    /// - `RegistryError::ReservedKeyword` if the name is a base keyword.
    /// - `RegistryError::DuplicateKeyword` if the name is already registered.
    /// - `RegistryError::Sealed` if compilation has already started.
    pub fn register<K>(&self, handler: K) -> Result<(), RegistryError>
    where
        K: CustomKeyword + 'static,
    {
        self.register_shared(Arc::new(handler))
    }

    /// Registers a handler that is already shared, e.g. with another loader.
    pub fn register_shared(&self, handler: Arc<dyn CustomKeyword>) -> Result<(), RegistryError> {
        let name = handler.keyword().to_string();

        if name.is_empty() {
            return Err(RegistryError::EmptyKeyword);
        }
        if is_base_keyword(&name) {
            return Err(RegistryError::ReservedKeyword(name));
        }

        let mut keywords = self.keywords.write();

        // Checked under the write lock so registration cannot race sealing.
        if self.sealed.load(Ordering::Acquire) {
            return Err(RegistryError::Sealed(name));
        }
        if keywords.contains_key(&name) {
            return Err(RegistryError::DuplicateKeyword(name));
        }

        tracing::debug!(keyword = %name, "registered custom keyword");
        keywords.insert(name, handler);
        Ok(())
    }

    /// Retrieves a handler by keyword name.
    pub fn get(&self, keyword: &str) -> Option<Arc<dyn CustomKeyword>> {
        self.keywords.read().get(keyword).cloned()
    }

    /// Returns true if a handler is registered for `keyword`.
    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.read().contains_key(keyword)
    }

    /// Registered keyword names, in registration order.
    pub fn keywords(&self) -> Vec<String> {
        self.keywords.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.keywords.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.read().is_empty()
    }

    /// Returns true once compilation has started with this registry.
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Stops accepting registrations and returns the handlers in
    /// registration order.
    pub(crate) fn seal(&self) -> Vec<Arc<dyn CustomKeyword>> {
        let keywords = self.keywords.write();
        self.sealed.store(true, Ordering::Release);
        keywords.values().cloned().collect()
    }
}

impl Default for KeywordRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when registering custom keywords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The handler reported an empty keyword name.
    #[error("custom keyword name must not be empty")]
    EmptyKeyword,

    /// The name belongs to the base vocabulary.
    #[error("keyword '{0}' is part of the base vocabulary")]
    ReservedKeyword(String),

    /// A handler with the same name is already registered.
    #[error("keyword '{0}' already registered")]
    DuplicateKeyword(String),

    /// Compilation has already started on this registry.
    #[error("cannot register keyword '{0}' after schema compilation has started")]
    Sealed(String),
}
