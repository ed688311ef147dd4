#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Typed uncertain and decision inputs plus design-space enumeration for
//! simulation-based exploratory analysis. Define real, integer, categorical,
//! and boolean parameters with validated bounds and distribution-derived
//! support, assemble policies and scenarios with unique sequential ids, and
//! enumerate every (model structure, policy, scenario) combination — or an
//! element-wise "zip" of selected axes — as uniquely identified cases for an
//! external execution layer.
//!
//! # Getting Started
//!
//! Enumerate a small design space:
//!
//! ```
//! use designspace::prelude::*;
//!
//! let ids = DesignIds::new();
//! let scenarios = vec![
//!     ids.scenario("low", [("demand", 10.0)]),
//!     ids.scenario("high", [("demand", 90.0)]),
//! ];
//! let policies = vec![ids.policy("base", [("rate", 0.1)])];
//! let models = vec!["flood_model".to_string()];
//!
//! let cases: Vec<Case> = experiment_generator(&scenarios, &models, &policies, None)
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(cases.len(), 2);
//! assert_eq!(cases[1].name(), "flood_model base 1");
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Parameter`](parameter::Parameter) | Define one uncertain or decision input — real, integer, categorical, or boolean — with bounds, resolution, and a distribution handle. |
//! | [`Distribution`](distribution::Distribution) | Inverse-CDF adapter through which external probability machinery is consumed. |
//! | [`DesignIds`](point::DesignIds) | Session context owning the policy and scenario id sequences. |
//! | [`Policy`](point::Policy) / [`Scenario`](point::Scenario) | One concrete assignment of values to levers / uncertainties, with a unique sequential id. |
//! | [`Case`](generator::Case) | One enumerated (model structure, policy, scenario) point with its ordinal id. |
//! | [`Experiment`](point::Experiment) | Scenario, policy, constants, and replication values flattened into one mapping. |
//!
//! # Enumeration Semantics
//!
//! [`experiment_generator`](generator::experiment_generator) walks the full
//! cross product by default — models outermost, then policies, then
//! scenarios — in a deterministic order downstream replay depends on. A
//! `zip_over` directive pairs two or all three axes element-wise instead.
//! The returned [`Cases`](generator::Cases) stream is single-pass: consuming
//! it exhausts it.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on public value-carrying types | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod distribution;
mod error;
pub mod generator;
pub mod parameter;
pub mod point;
pub mod table;
pub mod value;

pub use error::{Error, Result};
pub use generator::{experiment_generator, Axis, Case, Cases};
pub use parameter::{Parameter, ParameterKind};
pub use point::{DesignIds, Experiment, Policy, Replication, Scenario};
pub use value::{Category, Constant, Value};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use designspace::prelude::*;
/// ```
pub mod prelude {
    pub use crate::distribution::{
        dists_equal, support_from_dist, DiscreteUniform, Distribution, Uniform,
    };
    pub use crate::error::{Error, Result};
    pub use crate::generator::{experiment_generator, Axis, Case, Cases};
    pub use crate::parameter::{Parameter, ParameterKind};
    pub use crate::point::{DesignIds, Experiment, IdSource, Policy, Replication, Scenario};
    pub use crate::table::{
        read_parameters, read_parameters_from_path, write_parameters, write_parameters_to_path,
    };
    pub use crate::value::{Category, Constant, Value};
}
