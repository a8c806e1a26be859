//! mgmt-schema - typed schema and codec co-builder for management APIs
//!
//! Records are declared once, as an ordered list of fields; the declaration
//! yields both a JSON codec and a schema descriptor that always agree.

pub mod codec;
pub mod config;
pub mod enumeration;
pub mod management;
pub mod observability;
pub mod registration;
pub mod rpc;
pub mod schema;

pub use codec::{Codec, DecodeError, DecodeResult, SharedCodec};
pub use config::{ConfigError, ManagementConfig};
pub use enumeration::{EnumTransformer, SchemaEnum};
pub use management::{Field, ManagementSchema, RecordSchemaBuilder};
pub use registration::{InitializerList, DEFAULT_PRIORITY};
pub use rpc::{
    ConnectionHub, ConnectionId, RpcDispatcher, RpcError, RpcMethodBuilder, RpcNotificationBuilder,
    RpcNotificationHandler,
};
pub use schema::{Identifier, SchemaError, SchemaErrorCode, SchemaNode, SchemaRegistry};
