//! # Construct Framework
//!
//! This crate provides the building blocks for declaring cloud infrastructure as
//! plain Rust values. It implements one pattern: a **named resource factory with
//! overridable defaults**, plus the wiring calls that connect the resources it
//! produces.
//!
//! Nothing here talks to a cloud provider. The output is a [`Manifest`], a
//! deterministic description of every declared resource, which an external
//! provisioning engine turns into real infrastructure.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Kind Layer** ([`Construct`]) - the default record and partial overrides for each resource kind
//! 2. **Registry Layer** ([`Scope`]) - name uniqueness, merging, validation, wiring
//! 3. **Output Layer** ([`Manifest`]) - the frozen result of an assembly run
//!
//! ## Core Abstractions
//!
//! ### [`Construct`] - What a resource looks like
//!
//! Each kind ([`Queue`], [`Topic`], [`Function`], [`Network`], [`SecurityGroup`],
//! [`RestGateway`], [`HttpGateway`]) is a serde record whose field names are the
//! option keys. `defaults(name)` fills in the fixed template, and the
//! associated `Overrides` type lists the keys a caller may set.
//!
//! ### [`Scope`] - Where resources live
//!
//! ```rust
//! use construct_framework::{EventSourceOptions, Function, FunctionOverrides, Queue, Scope, Topic};
//!
//! let mut scope = Scope::new("Demo");
//!
//! // 1. Declare
//! let topic = scope.create::<Topic>("Events", Default::default()).unwrap();
//! let queue = scope.create::<Queue>("Work", Default::default()).unwrap();
//! let worker = scope
//!     .create::<Function>("Worker", FunctionOverrides::handler("lambdas/worker.ts", "handler"))
//!     .unwrap();
//!
//! // 2. Wire
//! scope.subscribe(&topic, &queue).unwrap();
//! scope.grant_consume_messages(&queue, &worker).unwrap();
//! scope.add_event_source(&worker, &queue, EventSourceOptions::default()).unwrap();
//!
//! // 3. Freeze
//! let manifest = scope.synthesize();
//! assert_eq!(manifest.resources.len(), 3);
//! assert_eq!(manifest.get("Events").unwrap().subscriptions(), ["Work"]);
//! ```
//!
//! ### Untyped factory
//!
//! [`Scope::create_resource`] takes a [`ResourceType`] and a raw [`Options`]
//! map instead. The typed [`Scope::create`] is a thin layer over it, so both
//! paths share the same merge and validation.
//!
//! ## Merge Semantics
//!
//! Defaults and overrides are merged shallowly, last write wins: a key in the
//! overrides replaces the default value entirely, even when that value is a
//! list or an object. See [`options::merge`].
//!
//! ## Errors
//!
//! Every failure is a [`ConstructError`] raised at declaration time: empty or
//! duplicate names, option values of the wrong shape, and references to
//! resources the scope does not own.
//!
//! ## Testing
//!
//! Unit tests live next to each module; `tests/` runs a full
//! declare, wire and synthesize cycle through the public API.

pub mod constructs;
pub mod declaration;
pub mod duration;
pub mod error;
pub mod handle;
pub mod manifest;
pub mod options;
pub mod resource;
pub mod scope;
pub mod tracing;
pub mod wiring;

// Re-export core types for convenience
pub use constructs::*;
pub use declaration::ResourceSpec;
pub use duration::Duration;
pub use error::ConstructError;
pub use handle::{Handle, ResourceHandle, ScopeId};
pub use manifest::Manifest;
pub use options::Options;
pub use resource::{Construct, Reference, ResourceType};
pub use scope::Scope;
pub use wiring::{EventSourceOptions, HttpMethod, Wiring};
