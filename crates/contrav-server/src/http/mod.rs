// SPDX-License-Identifier: Apache-2.0

pub(crate) mod agents;
pub(crate) mod categories;
pub(crate) mod communes;
pub(crate) mod decisions;
pub(crate) mod infractions;
pub(crate) mod probes;
pub(crate) mod response_contract;
pub(crate) mod users;
pub(crate) mod violants;

use axum::Json;
use serde_json::Value;

/// PUT/POST bodies are optional on the wire; an absent body validates the
/// same as `{}` with every field missing.
pub(crate) fn take_body(body: Option<Json<Value>>) -> Value {
    body.map_or(Value::Null, |Json(v)| v)
}
