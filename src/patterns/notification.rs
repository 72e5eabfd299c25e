//! The notification value object.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque, shareable payload carried by notifications, proxies and mediators.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// An immutable `{name, body, type}` message broadcast to observers.
///
/// Notifications follow publish/subscribe: any observer registered for
/// [`Notification::name`] receives it, regardless of who sent it.
#[derive(Clone)]
pub struct Notification {
    name: String,
    body: Option<Payload>,
    kind: Option<String>,
}

impl Notification {
    /// Create a notification with no body and no type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: None,
            kind: None,
        }
    }

    /// Attach a body.
    pub fn with_body<T: Any + Send + Sync>(mut self, body: T) -> Self {
        self.body = Some(Arc::new(body));
        self
    }

    /// Attach an already-shared body.
    pub fn with_payload(mut self, body: Option<Payload>) -> Self {
        self.body = body;
        self
    }

    /// Attach a type discriminator.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> Option<&Payload> {
        self.body.as_ref()
    }

    /// Borrow the body as `T`, if there is one and it has that type.
    pub fn body_as<T: Any>(&self) -> Option<&T> {
        self.body.as_deref().and_then(|b| b.downcast_ref::<T>())
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("name", &self.name)
            .field("has_body", &self.body.is_some())
            .field("kind", &self.kind)
            .finish()
    }
}

/// Three-line rendering; only textual bodies are shown, anything else is `nil`.
impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .body_as::<String>()
            .map(String::as_str)
            .or_else(|| self.body_as::<&'static str>().copied())
            .unwrap_or("nil");
        write!(
            f,
            "Notification name: {}\nBody: {}\nType: {}",
            self.name,
            body,
            self.kind.as_deref().unwrap_or("")
        )
    }
}
