//! API Context
//!
//! Everything the pages share: the HTTP gateway, the toast queue and the
//! confetti store. Provided once by [`crate::App`] through Leptos context.

use std::sync::Arc;

use course_client::{ClientConfig, HttpGateway};
use course_core::{
    ConfettiStore, NavigationError, Navigator, Notification, NotificationSink, Services,
    ToastQueue,
};
use leptos::prelude::*;

#[derive(Clone)]
pub struct Api {
    pub gateway: Arc<HttpGateway>,
    pub toasts: RwSignal<ToastQueue>,
    pub confetti: ConfettiStore,
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

impl Api {
    /// Talks to the origin the app was served from
    pub fn new() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost:3000".into());
        let config = ClientConfig::new(origin).unwrap_or_default();

        Self {
            gateway: Arc::new(HttpGateway::new(config)),
            toasts: RwSignal::new(ToastQueue::new()),
            confetti: ConfettiStore::new(),
        }
    }

    /// Sink that queues toasts for the [`crate::components::Toaster`]
    pub fn notifier(&self) -> Arc<dyn NotificationSink> {
        let toasts = self.toasts;
        Arc::new(move |notification: Notification| {
            toasts.update(move |queue| queue.push(notification));
        })
    }

    /// Collaborators for the field controllers of one page
    pub fn services(&self, refresh: impl Fn() + Send + Sync + 'static) -> Services {
        Services {
            gateway: self.gateway.clone(),
            notifier: self.notifier(),
            refresh: Arc::new(refresh),
        }
    }
}

/// `window.location.assign`
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn assign(&self, url: &str) -> Result<(), NavigationError> {
        let window = web_sys::window().ok_or_else(|| NavigationError("no window".into()))?;
        window
            .location()
            .assign(url)
            .map_err(|e| NavigationError(format!("{e:?}")))
    }
}
