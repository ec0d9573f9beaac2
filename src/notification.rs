//! User-facing alerts.
//!
//! Failures the user needs to see (an open request without a file, an image
//! that cannot be decoded) are reported through a [`Notifier`]. Desktop
//! sessions get freedesktop notifications over D-Bus; every alert is also logged.

use std::collections::HashMap;
use std::sync::Mutex;
use zbus::{Connection, proxy};

const APP_NAME: &str = "Paintpad";
const APP_ICON: &str = "applications-graphics";

/// D-Bus interface for freedesktop Notifications.
#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
trait Notifications {
    /// Send a notification.
    ///
    /// # Arguments
    /// * `app_name` - Application name
    /// * `replaces_id` - ID of notification to replace (0 for new)
    /// * `app_icon` - Icon name or path
    /// * `summary` - Notification title
    /// * `body` - Notification body text
    /// * `actions` - List of action identifiers and labels
    /// * `hints` - Additional metadata
    /// * `expire_timeout` - Timeout in milliseconds (-1 for default)
    ///
    /// # Returns
    /// Notification ID
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: Vec<&str>,
        hints: HashMap<&str, zbus::zvariant::Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Sink for user-facing alerts.
pub trait Notifier: Send {
    /// Shows one alert to the user.
    fn alert(&self, summary: &str, body: &str);
}

/// Logs alerts without showing anything on screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, summary: &str, body: &str) {
        log::warn!("{}: {}", summary, body);
    }
}

/// Sends alerts as desktop notifications on the session bus.
pub struct DesktopNotifier {
    runtime_handle: tokio::runtime::Handle,
}

impl DesktopNotifier {
    pub fn new(runtime_handle: tokio::runtime::Handle) -> Self {
        Self { runtime_handle }
    }
}

impl Notifier for DesktopNotifier {
    fn alert(&self, summary: &str, body: &str) {
        log::warn!("{}: {}", summary, body);
        send_notification_async(&self.runtime_handle, summary.to_string(), body.to_string());
    }
}

/// Records alerts in memory, for headless runs and tests.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    alerts: Mutex<Vec<(String, String)>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alerts recorded so far as `(summary, body)` pairs.
    pub fn alerts(&self) -> Vec<(String, String)> {
        self.alerts
            .lock()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.alerts.lock().map(|alerts| alerts.len()).unwrap_or(0)
    }
}

impl Notifier for CollectingNotifier {
    fn alert(&self, summary: &str, body: &str) {
        log::warn!("{}: {}", summary, body);
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push((summary.to_string(), body.to_string()));
        }
    }
}

impl<N: Notifier + Sync> Notifier for std::sync::Arc<N> {
    fn alert(&self, summary: &str, body: &str) {
        (**self).alert(summary, body);
    }
}

/// Send a system notification.
///
/// # Arguments
/// * `summary` - Notification title
/// * `body` - Notification body text
pub async fn send_notification(summary: &str, body: &str) -> Result<(), String> {
    let connection = Connection::session()
        .await
        .map_err(|e| format!("Failed to connect to session bus: {}", e))?;

    let proxy = NotificationsProxy::new(&connection)
        .await
        .map_err(|e| format!("Failed to create notifications proxy: {}", e))?;

    proxy
        .notify(
            APP_NAME,
            0,
            APP_ICON,
            summary,
            body,
            vec![],
            HashMap::new(),
            5000,
        )
        .await
        .map_err(|e| format!("Failed to send notification: {}", e))?;

    Ok(())
}

/// Send a notification in the background (non-blocking).
///
/// Spawns a tokio task to send the notification and logs errors.
pub fn send_notification_async(
    runtime_handle: &tokio::runtime::Handle,
    summary: String,
    body: String,
) {
    runtime_handle.spawn(async move {
        if let Err(e) = send_notification(&summary, &body).await {
            log::warn!("Failed to send notification: {}", e);
        }
    });
}
