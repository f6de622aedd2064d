//! The CLI's JSON request and response shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::BridgeError;
use crate::expr::{Arg, Call};

/// `{"procedure": "my/api-search-notes", "args": ["query"]}`
#[derive(Debug, Deserialize)]
pub struct Request {
    pub procedure: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// A request that cannot be turned into a call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("procedure name `{0}` is not a plain symbol")]
    BadProcedure(String),
    #[error("argument {index}: {reason}")]
    BadArg { index: usize, reason: String },
}

impl Request {
    pub fn to_call(&self) -> Result<Call, RequestError> {
        let mut call =
            Call::try_new(&self.procedure).map_err(|e| RequestError::BadProcedure(e.0))?;
        for (index, value) in self.args.iter().enumerate() {
            let arg = to_arg(value).map_err(|reason| RequestError::BadArg { index, reason })?;
            call = call.arg(arg);
        }
        Ok(call)
    }
}

fn to_arg(value: &Value) -> Result<Arg, String> {
    match value {
        Value::Null => Ok(Arg::Nil),
        Value::Bool(b) => Ok(Arg::Bool(*b)),
        Value::String(s) => Ok(Arg::Str(s.clone())),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Arg::Int(i))
            } else {
                n.as_f64()
                    .map(Arg::Float)
                    .ok_or_else(|| format!("number {n} is out of range"))
            }
        }
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(format!("list items must be strings, got {other}")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Arg::List),
        Value::Object(_) => Err("objects are not supported".to_string()),
    }
}

/// What the CLI prints.
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Response {
    Ok { ok: bool, result: Value },
    Err { ok: bool, kind: String, error: String },
}

impl Response {
    pub fn ok(result: Value) -> Self {
        Response::Ok { ok: true, result }
    }

    pub fn error(kind: &str, error: impl ToString) -> Self {
        Response::Err {
            ok: false,
            kind: kind.to_string(),
            error: error.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok { .. })
    }
}

impl From<BridgeError> for Response {
    fn from(e: BridgeError) -> Self {
        Response::error(e.kind().as_str(), e)
    }
}

/// `kind` used for malformed requests, before any call is made.
pub const REQUEST_KIND: &str = "request";

/// `kind` used when the merged configuration cannot be acted on.
pub const CONFIG_KIND: &str = "config";

impl From<RequestError> for Response {
    fn from(e: RequestError) -> Self {
        Response::error(REQUEST_KIND, e)
    }
}
