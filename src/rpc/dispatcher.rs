//! # RPC Dispatcher
//!
//! Routes incoming calls to declared methods and hands out notification
//! handlers. `D` is the host's context, passed by reference to every
//! method handler.
//!
//! Methods and notifications share one identifier space. Declaring an
//! identifier twice is a construction fault.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::connection::{ConnectionHub, ConnectionId};
use super::errors::{RpcError, RpcResult};
use super::method::IncomingRpcMethod;
use super::notification::{NotificationDescriptor, RpcNotification, RpcNotificationHandler};
use crate::config::ManagementConfig;
use crate::observability::Logger;
use crate::schema::{SchemaError, SchemaRegistry, SchemaResult};

/// Reserved method returning the discovery document
pub const DISCOVER_METHOD: &str = "rpc.discover";

/// An incoming call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcCall {
    /// Method identifier, `namespace:path`
    pub method: String,
    /// Positional (`[payload]`) or named (`{name: payload}`) parameters
    #[serde(default)]
    pub params: Option<Value>,
}

impl RpcCall {
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Parses a raw JSON request
    pub fn parse(raw: &str) -> RpcResult<Self> {
        serde_json::from_str(raw).map_err(|e| RpcError::InvalidRequest(e.to_string()))
    }
}

/// Every declaration, behind one lock so that checking an identifier and
/// claiming it happen together
struct Declarations<D> {
    /// Methods by identifier
    by_name: HashMap<String, IncomingRpcMethod<D>>,
    /// Method identifiers in declaration order
    order: Vec<String>,
    notifications: Vec<NotificationDescriptor>,
}

impl<D> Default for Declarations<D> {
    fn default() -> Self {
        Self {
            by_name: HashMap::new(),
            order: Vec::new(),
            notifications: Vec::new(),
        }
    }
}

impl<D> Declarations<D> {
    fn is_declared(&self, identifier: &str) -> bool {
        identifier == DISCOVER_METHOD
            || self.by_name.contains_key(identifier)
            || self
                .notifications
                .iter()
                .any(|n| n.identifier.to_string() == identifier)
    }
}

/// Method and notification registry with call routing
pub struct RpcDispatcher<D> {
    config: ManagementConfig,
    declarations: RwLock<Declarations<D>>,
    hub: Arc<ConnectionHub>,
}

impl<D: 'static> Default for RpcDispatcher<D> {
    fn default() -> Self {
        Self::new(ManagementConfig::default())
    }
}

impl<D: 'static> RpcDispatcher<D> {
    pub fn new(config: ManagementConfig) -> Self {
        Self::with_hub(config, Arc::new(ConnectionHub::new()))
    }

    /// Creates a dispatcher broadcasting through an existing hub
    pub fn with_hub(config: ManagementConfig, hub: Arc<ConnectionHub>) -> Self {
        Self {
            config,
            declarations: RwLock::new(Declarations::default()),
            hub,
        }
    }

    pub fn config(&self) -> &ManagementConfig {
        &self.config
    }

    pub fn hub(&self) -> &Arc<ConnectionHub> {
        &self.hub
    }

    /// Declares a method.
    ///
    /// # Errors
    ///
    /// `MGMT_DUPLICATE_METHOD` if the identifier is already declared.
    pub fn register_method(&self, method: IncomingRpcMethod<D>) -> SchemaResult<()> {
        let name = method.identifier().to_string();
        let has_parameter = method.parameter().is_some();
        {
            let mut declarations = self
                .declarations
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if declarations.is_declared(&name) {
                return Err(SchemaError::duplicate_method(&name));
            }
            declarations.order.push(name.clone());
            declarations.by_name.insert(name.clone(), method);
        }

        Logger::info(
            "METHOD_REGISTERED",
            &[("method", &name), ("parameter", &has_parameter.to_string())],
        );
        Ok(())
    }

    /// Declares a notification and returns the handler used to send it.
    ///
    /// # Errors
    ///
    /// `MGMT_DUPLICATE_METHOD` if the identifier is already declared.
    pub fn register_notification<T>(
        &self,
        notification: RpcNotification<T>,
    ) -> SchemaResult<RpcNotificationHandler<T>> {
        let name = notification.identifier().to_string();
        {
            let mut declarations = self
                .declarations
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if declarations.is_declared(&name) {
                return Err(SchemaError::duplicate_method(&name));
            }
            declarations.notifications.push(notification.descriptor());
        }

        Logger::info("NOTIFICATION_REGISTERED", &[("method", &name)]);

        Ok(notification.into_handler(Arc::clone(&self.hub), self.config.max_notification_size))
    }

    /// Identifiers of declared methods, in declaration order
    pub fn method_names(&self) -> Vec<String> {
        self.declarations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .clone()
    }

    pub fn notifications(&self) -> Vec<NotificationDescriptor> {
        self.declarations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .notifications
            .clone()
    }

    /// Routes a call to its method
    pub fn call(&self, ctx: &D, call: &RpcCall, connection: ConnectionId) -> RpcResult<Value> {
        if call.method == DISCOVER_METHOD {
            return Ok(self.discover());
        }

        let method = self
            .declarations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_name
            .get(&call.method)
            .cloned();

        let result = match method {
            Some(method) => method.invoke(ctx, call.params.as_ref(), connection),
            None => Err(RpcError::MethodNotFound(call.method.clone())),
        };

        if let Err(e) = &result {
            Logger::warn(
                "RPC_CALL_FAILED",
                &[
                    ("code", &e.code().to_string()),
                    ("connection", &connection.to_string()),
                    ("error", &e.to_string()),
                    ("method", &call.method),
                ],
            );
        }
        result
    }

    /// Parses a raw JSON request and routes it
    pub fn handle_json(&self, ctx: &D, raw: &str, connection: ConnectionId) -> RpcResult<Value> {
        let call = RpcCall::parse(raw)?;
        self.call(ctx, &call, connection)
    }

    /// Builds the OpenRPC discovery document
    pub fn discover(&self) -> Value {
        let prefix = self.config.schema_ref_prefix.as_str();

        let methods: Vec<Value> = {
            let table = self.declarations.read().unwrap_or_else(PoisonError::into_inner);
            table
                .order
                .iter()
                .filter_map(|name| table.by_name.get(name))
                .map(|method| method.describe(prefix))
                .collect()
        };

        let notifications: Vec<Value> = self
            .notifications()
            .iter()
            .map(|n| n.describe(prefix))
            .collect();

        let mut schemas = Map::new();
        for entry in SchemaRegistry::global().entries() {
            schemas.insert(entry.identifier.to_string(), entry.node.to_json_with_prefix(prefix));
        }

        json!({
            "openrpc": self.config.openrpc_version,
            "info": {
                "title": self.config.title,
                "version": self.config.version,
            },
            "methods": methods,
            "notifications": notifications,
            "components": {
                "schemas": schemas,
            },
        })
    }
}
