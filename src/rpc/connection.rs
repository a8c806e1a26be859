//! # Connections
//!
//! Tracks connected parties and fans notifications out to them.
//!
//! Delivery is best effort. A failed send to one connection is counted and
//! logged; it never affects the others.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::observability::Logger;

/// Identity of a connected party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generates a fresh random identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outgoing notification message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// Notification identifier, `namespace:path`
    pub method: String,
    /// Payload object
    pub params: Value,
}

impl Notification {
    /// Size of the serialized message in bytes
    pub fn wire_size(&self) -> usize {
        serde_json::to_vec(self).map(|bytes| bytes.len()).unwrap_or(usize::MAX)
    }
}

/// Notification sender for a connection
pub type NotificationSender = mpsc::UnboundedSender<Notification>;

/// Notification receiver for a connection
pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

/// Result of broadcasting a notification
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Number of connections the message was handed to
    pub delivered: usize,
    /// Number of connections whose receiver was gone
    pub failed: usize,
}

/// Set of live connections
#[derive(Debug, Default)]
pub struct ConnectionHub {
    connections: RwLock<HashMap<ConnectionId, NotificationSender>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection and returns its identity and notification stream
    pub fn connect(&self) -> (ConnectionId, NotificationReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ConnectionId::new();

        self.connections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, tx);

        (id, rx)
    }

    /// Removes a connection. Returns false if it was not connected.
    pub fn disconnect(&self, id: &ConnectionId) -> bool {
        self.connections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    pub fn is_connected(&self, id: &ConnectionId) -> bool {
        self.connections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    pub fn connection_count(&self) -> usize {
        self.connections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Sends a notification to every current connection
    pub fn broadcast(&self, notification: &Notification) -> DeliveryReport {
        let targets: Vec<(ConnectionId, NotificationSender)> = self
            .connections
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, sender)| (*id, sender.clone()))
            .collect();

        let mut report = DeliveryReport::default();
        for (id, sender) in targets {
            match sender.send(notification.clone()) {
                Ok(()) => report.delivered += 1,
                Err(_) => {
                    report.failed += 1;
                    Logger::warn(
                        "NOTIFICATION_DELIVERY_FAILED",
                        &[("connection", &id.to_string()), ("method", &notification.method)],
                    );
                }
            }
        }

        report
    }
}
