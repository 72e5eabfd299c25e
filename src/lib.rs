//! multicore-mvc - Multicore Model-View-Controller framework.
//!
//! An application is split into cores, each addressed by a string key and
//! made of a [`Model`] (proxies), a [`View`] (observers and mediators), a
//! [`Controller`] (notification-bound commands) and a [`Facade`] over all
//! three. A [`Multicore`] owns the cores of one application; cores never
//! see each other's state.
//!
//! ```
//! use multicore_mvc::{Multicore, SimpleCommand};
//!
//! let manager = Multicore::new();
//! let facade = manager.facade("app");
//! facade.register_command(
//!     "startup",
//!     SimpleCommand::factory(|_, note| {
//!         assert_eq!(note.name(), "startup");
//!         Ok(())
//!     }),
//! );
//! facade.send_notification("startup", None, None).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod multicore;
pub mod patterns;
pub mod registry;
pub mod telemetry;

pub use config::{Config, ConfigError, InterestTracking, RegistryConfig, TelemetryConfig};
pub use error::{HandlerError, HandlerResult, NotifierError};
pub use multicore::Multicore;
pub use patterns::command::{Command, CommandFactory, MacroCommand, SimpleCommand};
pub use patterns::facade::Facade;
pub use patterns::mediator::{MEDIATOR_NAME, Mediator, MediatorBase};
pub use patterns::notification::{Notification, Payload};
pub use patterns::notifier::{Notifier, Notify};
pub use patterns::observer::{ContextId, Observer};
pub use patterns::proxy::{PROXY_NAME, Proxy, ProxyBase};
pub use registry::{Controller, Model, View};
