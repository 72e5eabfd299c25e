//! Per-core registries.
//!
//! Each registry owns one domain of a core's state:
//! - [`Model`]: proxies by name
//! - [`View`]: observer lists by notification name, mediators by name
//! - [`Controller`]: command factories by notification name
//!
//! [`InstanceMap`] is the per-key table the core manager keeps for each kind.

mod controller;
mod instance_map;
mod model;
mod view;

pub use controller::Controller;
pub use instance_map::{DashMapExt, InstanceMap};
pub use model::Model;
pub use view::View;
