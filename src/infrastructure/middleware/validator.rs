use axum::{
    body::Body,
    extract::{Query, RawPathParams, Request},
    response::{IntoResponse, Response},
    RequestPartsExt,
};
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::domain::validation::ValidationSchema;
use crate::error::AppError;

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Coerced request values, defaults applied, left in the request extensions
/// for handlers behind a validation layer
#[derive(Debug, Clone, Default)]
pub struct ValidatedInput {
    pub body: Map<String, Value>,
    pub query: Map<String, Value>,
    pub params: Map<String, Value>,
}

impl ValidatedInput {
    pub fn query_u32(&self, key: &str) -> Option<u32> {
        self.query
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}

/// Validation layer for a route; use with `Router::route_layer` so path
/// parameters are available
pub fn validate(schema: ValidationSchema) -> ValidateLayer {
    ValidateLayer {
        schema: Arc::new(schema),
    }
}

#[derive(Clone)]
pub struct ValidateLayer {
    schema: Arc<ValidationSchema>,
}

impl<S> Layer<S> for ValidateLayer {
    type Service = Validate<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Validate {
            inner,
            schema: self.schema.clone(),
        }
    }
}

#[derive(Clone)]
pub struct Validate<S> {
    inner: S,
    schema: Arc<ValidationSchema>,
}

impl<S> Service<Request> for Validate<S>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let schema = self.schema.clone();
        // The clone may not be ready; keep the one that was polled
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match check_request(&schema, request).await {
                Ok(request) => inner.call(request).await,
                Err(err) => Ok(err.into_response()),
            }
        })
    }
}

/// Validate every present part, collecting all violations before deciding
pub async fn check_request(
    schema: &ValidationSchema,
    request: Request,
) -> Result<Request, AppError> {
    let (mut parts, body) = request.into_parts();
    let mut violations = Vec::new();
    let mut input = ValidatedInput::default();

    let body = match &schema.body {
        Some(rules) => {
            let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
                .await
                .map_err(|e| AppError::bad_request(format!("Unreadable request body: {}", e)))?;
            let value: Value = if bytes.is_empty() {
                Value::Object(Map::new())
            } else {
                serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::bad_request(format!("Malformed JSON body: {}", e)))?
            };

            let outcome = rules.check(&value);
            violations.extend(outcome.violations);
            input.body = outcome.values;
            Body::from(bytes)
        }
        None => body,
    };

    if let Some(rules) = &schema.query {
        let pairs = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        let value = Value::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        );

        let outcome = rules.check(&value);
        violations.extend(outcome.violations);
        input.query = outcome.values;
    }

    if let Some(rules) = &schema.params {
        let params: Map<String, Value> = match parts.extract::<RawPathParams>().await {
            Ok(raw) => raw
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                .collect(),
            Err(_) => Map::new(),
        };

        let outcome = rules.check(&Value::Object(params));
        violations.extend(outcome.violations);
        input.params = outcome.values;
    }

    if !violations.is_empty() {
        tracing::debug!(violations = ?violations, "Request validation failed");
        return Err(AppError::validation(violations));
    }

    parts.extensions.insert(input);
    Ok(Request::from_parts(parts, body))
}
