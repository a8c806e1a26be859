//! # RPC Notifications
//!
//! Outgoing, fire-and-forget messages sent to every connected party as
//! `{method, params: {property: payload}}`.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::connection::{ConnectionHub, DeliveryReport, Notification};
use super::errors::{RpcError, RpcResult};
use super::method::MethodParameter;
use crate::codec::SharedCodec;
use crate::management::ManagementSchema;
use crate::observability::Logger;
use crate::schema::{Identifier, SchemaError, SchemaResult};

/// Builder for a notification carrying a `T`
pub struct RpcNotificationBuilder<T> {
    payload: ManagementSchema<T>,
    property_name: String,
    identifier: Option<(String, String)>,
    description: Option<String>,
}

impl<T: 'static> RpcNotificationBuilder<T> {
    /// Starts a notification whose payload is described by `payload`.
    ///
    /// The payload property is named after the pair unless renamed.
    pub fn of(payload: &ManagementSchema<T>) -> Self {
        Self {
            payload: payload.clone(),
            property_name: payload.name().to_string(),
            identifier: None,
            description: None,
        }
    }

    /// Sets the notification identifier. Required before building.
    pub fn identifier(mut self, namespace: impl Into<String>, path: impl Into<String>) -> Self {
        self.identifier = Some((namespace.into(), path.into()));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn property_name(mut self, name: impl Into<String>) -> Self {
        self.property_name = name.into();
        self
    }

    /// Finalizes the declaration. Register it with a dispatcher to send.
    ///
    /// # Errors
    ///
    /// `MGMT_IDENTIFIER_MISSING`, `MGMT_INVALID_IDENTIFIER` or
    /// `MGMT_INCOMPLETE_SCHEMA`.
    pub fn build(self) -> SchemaResult<RpcNotification<T>> {
        let (namespace, path) = self
            .identifier
            .ok_or_else(|| SchemaError::identifier_missing("notification", &self.property_name))?;
        let identifier = Identifier::new(namespace, path)?;
        let (codec, schema) = self.payload.require_complete()?;

        Ok(RpcNotification {
            identifier,
            description: self.description,
            property: MethodParameter {
                name: self.property_name,
                schema,
            },
            codec,
        })
    }
}

/// A declared notification
pub struct RpcNotification<T> {
    identifier: Identifier,
    description: Option<String>,
    property: MethodParameter,
    codec: SharedCodec<T>,
}

impl<T> RpcNotification<T> {
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn property(&self) -> &MethodParameter {
        &self.property
    }

    pub(crate) fn descriptor(&self) -> NotificationDescriptor {
        NotificationDescriptor {
            identifier: self.identifier.clone(),
            description: self.description.clone(),
            property: self.property.clone(),
        }
    }

    pub(crate) fn into_handler(self, hub: Arc<ConnectionHub>, max_size: usize) -> RpcNotificationHandler<T> {
        RpcNotificationHandler {
            method: self.identifier.to_string(),
            property_name: self.property.name,
            codec: self.codec,
            hub,
            max_size,
        }
    }
}

/// Schema-side view of a registered notification, used for discovery
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDescriptor {
    pub identifier: Identifier,
    pub description: Option<String>,
    pub property: MethodParameter,
}

impl NotificationDescriptor {
    /// Renders the OpenRPC notification object
    pub fn describe(&self, prefix: &str) -> Value {
        let mut out = Map::new();
        out.insert("name".into(), Value::String(self.identifier.to_string()));
        if let Some(description) = &self.description {
            out.insert("description".into(), Value::String(description.clone()));
        }
        out.insert("params".into(), Value::Array(vec![self.property.describe(prefix)]));
        Value::Object(out)
    }
}

/// Sends one kind of notification to every connection
pub struct RpcNotificationHandler<T> {
    method: String,
    property_name: String,
    codec: SharedCodec<T>,
    hub: Arc<ConnectionHub>,
    max_size: usize,
}

impl<T> Clone for RpcNotificationHandler<T> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            property_name: self.property_name.clone(),
            codec: Arc::clone(&self.codec),
            hub: Arc::clone(&self.hub),
            max_size: self.max_size,
        }
    }
}

impl<T> RpcNotificationHandler<T> {
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Builds the message for a value without sending it
    pub fn message(&self, value: &T) -> Notification {
        let mut params = Map::new();
        params.insert(self.property_name.clone(), self.codec.encode(value));
        Notification {
            method: self.method.clone(),
            params: Value::Object(params),
        }
    }

    /// Broadcasts a value to every current connection.
    ///
    /// # Errors
    ///
    /// `MessageTooLarge` if the message exceeds the configured size; nothing
    /// is sent in that case.
    pub fn send(&self, value: &T) -> RpcResult<DeliveryReport> {
        let notification = self.message(value);
        let size = notification.wire_size();

        if size > self.max_size {
            Logger::warn(
                "NOTIFICATION_REJECTED",
                &[
                    ("method", &self.method),
                    ("size", &size.to_string()),
                    ("max_size", &self.max_size.to_string()),
                ],
            );
            return Err(RpcError::MessageTooLarge(self.max_size));
        }

        Ok(self.hub.broadcast(&notification))
    }
}
