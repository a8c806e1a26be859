//! # RPC Methods
//!
//! Declares incoming request methods from schema pairs.
//!
//! A method has a mandatory identifier, an optional description, at most one
//! parameter and a single named result. Request parameters may be passed
//! positionally (`[payload]`) or by name (`{name: payload}`).

use std::sync::Arc;

use serde_json::{json, Map, Value};

use super::connection::ConnectionId;
use super::errors::{RpcError, RpcResult};
use crate::codec::SharedCodec;
use crate::management::ManagementSchema;
use crate::schema::{Identifier, SchemaError, SchemaNode, SchemaResult};

/// Named schema slot of a method: its parameter or its result
#[derive(Debug, Clone, PartialEq)]
pub struct MethodParameter {
    pub name: String,
    pub schema: SchemaNode,
}

impl MethodParameter {
    /// Renders the OpenRPC content descriptor
    pub fn describe(&self, prefix: &str) -> Value {
        json!({
            "name": self.name,
            "schema": self.schema.to_json_with_prefix(prefix),
        })
    }
}

type Invoker<D> = Arc<dyn Fn(&D, Option<&Value>, ConnectionId) -> RpcResult<Value> + Send + Sync>;

/// A declared, callable method
pub struct IncomingRpcMethod<D> {
    identifier: Identifier,
    description: Option<String>,
    parameter: Option<MethodParameter>,
    result: MethodParameter,
    invoker: Invoker<D>,
}

impl<D> Clone for IncomingRpcMethod<D> {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            description: self.description.clone(),
            parameter: self.parameter.clone(),
            result: self.result.clone(),
            invoker: Arc::clone(&self.invoker),
        }
    }
}

impl<D> std::fmt::Debug for IncomingRpcMethod<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncomingRpcMethod")
            .field("identifier", &self.identifier)
            .field("parameter", &self.parameter)
            .field("result", &self.result)
            .finish()
    }
}

impl<D> IncomingRpcMethod<D> {
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn parameter(&self) -> Option<&MethodParameter> {
        self.parameter.as_ref()
    }

    pub fn result(&self) -> &MethodParameter {
        &self.result
    }

    /// Decodes the parameter, runs the handler and wraps the result as
    /// `{result_name: payload}`
    pub fn invoke(&self, ctx: &D, params: Option<&Value>, connection: ConnectionId) -> RpcResult<Value> {
        (self.invoker)(ctx, params, connection)
    }

    /// Renders the OpenRPC method object
    pub fn describe(&self, prefix: &str) -> Value {
        let params: Vec<Value> = self
            .parameter
            .iter()
            .map(|parameter| parameter.describe(prefix))
            .collect();

        let mut out = Map::new();
        out.insert("name".into(), Value::String(self.identifier.to_string()));
        if let Some(description) = &self.description {
            out.insert("description".into(), Value::String(description.clone()));
        }
        out.insert("params".into(), Value::Array(params));
        out.insert("result".into(), self.result.describe(prefix));
        Value::Object(out)
    }
}

/// Picks the parameter payload out of the request params
fn extract_parameter<'a>(params: Option<&'a Value>, name: &str) -> RpcResult<&'a Value> {
    let found = match params {
        Some(Value::Array(items)) => items.first(),
        Some(Value::Object(map)) => map.get(name),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(RpcError::InvalidRequest(
                "params must be an array or an object".into(),
            ))
        }
    };
    found.ok_or_else(|| RpcError::MissingParameter(name.to_string()))
}

fn wrap_result(name: &str, payload: Value) -> Value {
    let mut out = Map::new();
    out.insert(name.to_string(), payload);
    Value::Object(out)
}

fn resolve_identifier(
    identifier: Option<(String, String)>,
    kind: &str,
    name: &str,
) -> SchemaResult<Identifier> {
    let (namespace, path) =
        identifier.ok_or_else(|| SchemaError::identifier_missing(kind, name))?;
    Identifier::new(namespace, path)
}

/// Builder for a method without a parameter
pub struct RpcMethodBuilder<R> {
    response: ManagementSchema<R>,
    response_name: String,
    identifier: Option<(String, String)>,
    description: Option<String>,
}

impl<R: 'static> RpcMethodBuilder<R> {
    /// Starts a method whose result is described by `response`.
    ///
    /// The result property is named after the pair unless renamed.
    pub fn of(response: &ManagementSchema<R>) -> Self {
        Self {
            response: response.clone(),
            response_name: response.name().to_string(),
            identifier: None,
            description: None,
        }
    }

    pub fn response_property_name(mut self, name: impl Into<String>) -> Self {
        self.response_name = name.into();
        self
    }

    /// Sets the method identifier. Required before building.
    pub fn identifier(mut self, namespace: impl Into<String>, path: impl Into<String>) -> Self {
        self.identifier = Some((namespace.into(), path.into()));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a parameter. Its name defaults to the pair's name.
    pub fn parameter<P: 'static>(self, parameter: &ManagementSchema<P>) -> RpcParameterizedMethodBuilder<P, R> {
        RpcParameterizedMethodBuilder {
            parameter_name: parameter.name().to_string(),
            parameter: parameter.clone(),
            inner: self,
        }
    }

    /// Finalizes the method.
    ///
    /// # Errors
    ///
    /// - `MGMT_IDENTIFIER_MISSING` if no identifier was set
    /// - `MGMT_INVALID_IDENTIFIER` if the identifier is malformed
    /// - `MGMT_INCOMPLETE_SCHEMA` if the result pair lacks a half
    pub fn build<D, H>(self, handler: H) -> SchemaResult<IncomingRpcMethod<D>>
    where
        D: 'static,
        H: Fn(&D, ConnectionId) -> R + Send + Sync + 'static,
    {
        let identifier = resolve_identifier(self.identifier, "method", &self.response_name)?;
        let (codec, schema) = self.response.require_complete()?;
        let result_name = self.response_name;

        let invoker_name = result_name.clone();
        let invoker: Invoker<D> = Arc::new(
            move |ctx: &D, _params: Option<&Value>, connection: ConnectionId| -> RpcResult<Value> {
                let response = handler(ctx, connection);
                Ok(wrap_result(&invoker_name, codec.encode(&response)))
            },
        );

        Ok(IncomingRpcMethod {
            identifier,
            description: self.description,
            parameter: None,
            result: MethodParameter {
                name: result_name,
                schema,
            },
            invoker,
        })
    }
}

/// Builder for a method taking one parameter of type `P`
pub struct RpcParameterizedMethodBuilder<P, R> {
    inner: RpcMethodBuilder<R>,
    parameter: ManagementSchema<P>,
    parameter_name: String,
}

impl<P: 'static, R: 'static> RpcParameterizedMethodBuilder<P, R> {
    pub fn response_property_name(mut self, name: impl Into<String>) -> Self {
        self.inner = self.inner.response_property_name(name);
        self
    }

    pub fn parameter_name(mut self, name: impl Into<String>) -> Self {
        self.parameter_name = name.into();
        self
    }

    pub fn identifier(mut self, namespace: impl Into<String>, path: impl Into<String>) -> Self {
        self.inner = self.inner.identifier(namespace, path);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner = self.inner.description(description);
        self
    }

    /// Finalizes the method.
    ///
    /// # Errors
    ///
    /// Same as [`RpcMethodBuilder::build`], and `MGMT_INCOMPLETE_SCHEMA` if
    /// the parameter pair lacks a half.
    pub fn build<D, H>(self, handler: H) -> SchemaResult<IncomingRpcMethod<D>>
    where
        D: 'static,
        H: Fn(&D, P, ConnectionId) -> R + Send + Sync + 'static,
    {
        let inner = self.inner;
        let identifier = resolve_identifier(inner.identifier, "method", &inner.response_name)?;
        let (codec, schema) = inner.response.require_complete()?;
        let (parameter_codec, parameter_schema): (SharedCodec<P>, SchemaNode) =
            self.parameter.require_complete()?;

        let result_name = inner.response_name;
        let parameter_name = self.parameter_name;

        let invoker_result = result_name.clone();
        let invoker_parameter = parameter_name.clone();
        let invoker: Invoker<D> = Arc::new(
            move |ctx: &D, params: Option<&Value>, connection: ConnectionId| -> RpcResult<Value> {
                let raw = extract_parameter(params, &invoker_parameter)?;
                let value = parameter_codec
                    .decode(raw)
                    .map_err(|e| e.within(invoker_parameter.clone()))?;
                let response = handler(ctx, value, connection);
                Ok(wrap_result(&invoker_result, codec.encode(&response)))
            },
        );

        Ok(IncomingRpcMethod {
            identifier,
            description: inner.description,
            parameter: Some(MethodParameter {
                name: parameter_name,
                schema: parameter_schema,
            }),
            result: MethodParameter {
                name: result_name,
                schema,
            },
            invoker,
        })
    }
}
