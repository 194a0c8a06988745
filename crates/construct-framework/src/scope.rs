//! # Scope
//!
//! This module defines the `Scope`, the registry that owns every resource
//! declared for one stack. It plays the part a global construct tree would
//! play elsewhere, except it is an ordinary value passed explicitly to every
//! factory and wiring call.

use crate::declaration::ResourceSpec;
use crate::error::ConstructError;
use crate::handle::{Handle, ResourceHandle, ScopeId};
use crate::manifest::Manifest;
use crate::options::{from_options, merge, to_options, Options};
use crate::resource::{Construct, ResourceType};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// The registry of declared resources for one stack.
///
/// # Architecture Note
/// The scope owns the resources in declaration order (`resources`) plus a
/// name index. Nothing is ever removed: a resource is declared once, wired
/// while the assembly routine runs, and then frozen when the scope is
/// consumed by [`Scope::synthesize`].
///
/// ## Operations
///
/// * **Create** ([`Scope::create_resource`], [`Scope::create`]):
///     1. Rejects an empty name or one already registered.
///     2. Builds the kind's default option map for that name.
///     3. Overlays the caller's overrides key by key.
///     4. Decodes the merged map into the kind's typed record and validates it.
///     5. Resolves any references the record makes to other resources.
///     6. Appends the [`ResourceSpec`] and returns a handle.
///
/// * **Read** ([`Scope::get`], [`Scope::spec`], [`Scope::props`]):
///   Looks a resource up by name or handle.
///
/// * **Synthesize** ([`Scope::synthesize`]):
///   Consumes the scope and returns the immutable [`Manifest`].
///
/// ```rust
/// use construct_framework::{Scope, Queue, QueueOverrides, Duration};
///
/// let mut scope = Scope::new("Demo");
/// let queue = scope.create::<Queue>("Jobs", QueueOverrides::default()).unwrap();
///
/// let props = scope.props(&queue).unwrap();
/// assert_eq!(props.queue_name, "Jobs");
/// assert_eq!(props.visibility_timeout, Duration::seconds(300));
/// ```
#[derive(Debug)]
pub struct Scope {
    id: ScopeId,
    name: String,
    resources: Vec<ResourceSpec>,
    index: HashMap<String, usize>,
}

impl Scope {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = ScopeId::next();
        debug!(scope = %name, %id, "Scope opened");
        Self {
            id,
            name,
            resources: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ResourceSpec> {
        self.index.get(name).map(|&i| &self.resources[i])
    }

    /// All resources in declaration order.
    pub fn resources(&self) -> impl Iterator<Item = &ResourceSpec> {
        self.resources.iter()
    }

    /// Declares a resource of `kind` named `name`, applying `overrides` over
    /// the kind's defaults.
    pub fn create_resource(
        &mut self,
        kind: ResourceType,
        name: &str,
        overrides: Options,
    ) -> Result<ResourceHandle, ConstructError> {
        debug!(scope = %self.name, %kind, name, ?overrides, "Create");

        if name.is_empty() {
            warn!(scope = %self.name, %kind, "Empty logical name");
            return Err(ConstructError::EmptyName);
        }
        if self.index.contains_key(name) {
            warn!(scope = %self.name, %kind, name, "Name conflict");
            return Err(ConstructError::NameConflict {
                scope: self.name.clone(),
                name: name.to_string(),
            });
        }

        let options = merge(kind.default_options(name)?, overrides);
        let references = kind.check(name, &options).inspect_err(|e| {
            warn!(scope = %self.name, %kind, name, error = %e, "Invalid options");
        })?;
        for reference in references {
            let Some(target) = self.get(&reference.name) else {
                warn!(scope = %self.name, %kind, name, reference = %reference.name, "Unknown reference");
                return Err(ConstructError::UnknownResource {
                    scope: self.name.clone(),
                    name: reference.name,
                });
            };
            if target.kind != reference.kind {
                warn!(
                    scope = %self.name,
                    %kind,
                    name,
                    reference = %reference.name,
                    expected = %reference.kind,
                    found = %target.kind,
                    "Reference kind mismatch"
                );
                return Err(ConstructError::KindMismatch {
                    name: reference.name,
                    expected: reference.kind,
                    found: target.kind,
                });
            }
        }

        self.index.insert(name.to_string(), self.resources.len());
        self.resources.push(ResourceSpec {
            logical_name: name.to_string(),
            kind,
            options,
            parent: self.name.clone(),
            wiring: Vec::new(),
        });
        info!(scope = %self.name, %kind, name, size = self.resources.len(), "Registered");

        Ok(ResourceHandle::new(self.id, name, kind))
    }

    /// Typed form of [`Scope::create_resource`].
    pub fn create<K: Construct>(
        &mut self,
        name: &str,
        overrides: K::Overrides,
    ) -> Result<Handle<K>, ConstructError> {
        let overrides = to_options(&overrides)?;
        let handle = self.create_resource(K::TYPE, name, overrides)?;
        Handle::try_from(handle)
    }

    /// The stored declaration behind `handle`.
    pub fn spec<K: Construct>(&self, handle: &Handle<K>) -> Result<&ResourceSpec, ConstructError> {
        let i = self.resolve(handle.untyped())?;
        Ok(&self.resources[i])
    }

    /// Decodes the merged options behind `handle` into the typed record.
    pub fn props<K: Construct>(&self, handle: &Handle<K>) -> Result<K, ConstructError> {
        let spec = self.spec(handle)?;
        from_options(&spec.logical_name, &spec.options)
    }

    /// Freezes the scope into the manifest handed to the provisioning engine.
    pub fn synthesize(self) -> Manifest {
        info!(scope = %self.name, size = self.resources.len(), "Synthesized");
        Manifest {
            stack: self.name,
            resources: self.resources,
        }
    }

    pub(crate) fn resolve(&self, handle: &ResourceHandle) -> Result<usize, ConstructError> {
        if handle.scope() != self.id {
            warn!(scope = %self.name, name = handle.name(), "Foreign handle");
            return Err(ConstructError::ForeignHandle {
                name: handle.name().to_string(),
                scope: handle.scope().to_string(),
            });
        }
        let i = *self
            .index
            .get(handle.name())
            .ok_or_else(|| ConstructError::UnknownResource {
                scope: self.name.clone(),
                name: handle.name().to_string(),
            })?;
        let found = self.resources[i].kind;
        if found != handle.kind() {
            return Err(ConstructError::KindMismatch {
                name: handle.name().to_string(),
                expected: handle.kind(),
                found,
            });
        }
        Ok(i)
    }

    pub(crate) fn spec_mut(&mut self, handle: &ResourceHandle) -> Result<&mut ResourceSpec, ConstructError> {
        let i = self.resolve(handle)?;
        Ok(&mut self.resources[i])
    }
}
