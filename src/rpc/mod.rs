//! # RPC Declaration Layer
//!
//! Declares methods and notifications from schema pairs and routes calls
//! to them.
//!
//! ## Design Principles
//!
//! - Only complete schema pairs reach a declaration
//! - Every declaration has an explicit identifier
//! - Notification delivery is best effort and isolated per connection

mod connection;
mod dispatcher;
mod errors;
mod method;
mod notification;

pub use connection::{
    ConnectionHub, ConnectionId, DeliveryReport, Notification, NotificationReceiver,
    NotificationSender,
};
pub use dispatcher::{RpcCall, RpcDispatcher, DISCOVER_METHOD};
pub use errors::{RpcError, RpcResult};
pub use method::{IncomingRpcMethod, MethodParameter, RpcMethodBuilder, RpcParameterizedMethodBuilder};
pub use notification::{
    NotificationDescriptor, RpcNotification, RpcNotificationBuilder, RpcNotificationHandler,
};
