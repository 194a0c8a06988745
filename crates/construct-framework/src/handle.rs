//! # Handles
//!
//! A handle is the only thing a caller gets back from the factory. It names a
//! registered resource and remembers which scope issued it, so wiring calls
//! can reject handles that were minted by a different scope.

use crate::error::ConstructError;
use crate::resource::{Construct, ResourceType};
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of a [`Scope`](crate::Scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u64);

impl ScopeId {
    pub(crate) fn next() -> Self {
        static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scope_{}", self.0)
    }
}

/// An untyped reference to a registered resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    scope: ScopeId,
    name: String,
    kind: ResourceType,
}

impl ResourceHandle {
    pub(crate) fn new(scope: ScopeId, name: impl Into<String>, kind: ResourceType) -> Self {
        Self {
            scope,
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ResourceType {
        self.kind
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }
}

/// A reference to a registered resource of kind `K`.
///
/// Wiring routines take typed handles, so a queue can't be passed where a
/// topic is expected. Convert from a [`ResourceHandle`] with `TryFrom`.
pub struct Handle<K> {
    inner: ResourceHandle,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Construct> Handle<K> {
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn untyped(&self) -> &ResourceHandle {
        &self.inner
    }
}

impl<K> Clone for Handle<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K> std::fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .field("scope", &self.inner.scope)
            .finish()
    }
}

impl<K> PartialEq for Handle<K> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K> Eq for Handle<K> {}

impl<K: Construct> TryFrom<ResourceHandle> for Handle<K> {
    type Error = ConstructError;

    fn try_from(handle: ResourceHandle) -> Result<Self, Self::Error> {
        if handle.kind != K::TYPE {
            return Err(ConstructError::KindMismatch {
                name: handle.name,
                expected: K::TYPE,
                found: handle.kind,
            });
        }
        Ok(Self {
            inner: handle,
            _kind: PhantomData,
        })
    }
}

impl<K> From<Handle<K>> for ResourceHandle {
    fn from(handle: Handle<K>) -> Self {
        handle.inner
    }
}
