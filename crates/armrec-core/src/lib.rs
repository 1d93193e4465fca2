//! Core types for the armrec reconciliation engine: resource descriptors,
//! the kind registry, and the invocation/result envelopes shared between the
//! binder, the engine, and the host.

pub mod descriptor;
pub mod envelope;
pub mod registry;

pub use descriptor::{
    ApiCall, FieldSpec, FieldType, ListCall, ResourceDescriptor, UpdateStyle,
};
pub use envelope::{FailureInfo, Identity, Invocation, Outcome, Params, Presence};
pub use registry::{Registry, RegistryError};
