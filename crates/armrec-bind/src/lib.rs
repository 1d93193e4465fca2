//! Input binding for the armrec engine.
//!
//! Validates the host's raw option map against a resource descriptor and
//! produces the frozen [`DesiredState`] consumed by the differ and mutator.
//! All binding failures are typed [`BindError`]s and happen before any
//! network call.

pub mod binder;
pub mod desired;
pub mod error;

pub use binder::{bind, bind_facts_identity};
pub use desired::DesiredState;
pub use error::BindError;
