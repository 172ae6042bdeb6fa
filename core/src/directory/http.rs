//! Blocking JSON-RPC client for the staffing directory.
//!
//! Every call is a POST of `{"method": ..., "params": [...]}` to the base
//! URL with an `X-Auth-Token` header. The useful payload is the response
//! body's `result` member.

use super::{Attendee, Job, RemoteDirectory, ShiftRange};
use crate::{
    config::DirectoryConfig,
    error::{EscalationError, EscalationResult},
    types::{DepartmentId, DepartmentName},
};
use reqwest::blocking::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use std::{collections::BTreeMap, time::Duration};

pub const AUTH_HEADER: &str = "X-Auth-Token";

const DEPT_LIST: &str = "dept.list";
const SHIFTS_LOOKUP: &str = "shifts.lookup";
const ATTENDEE_SEARCH: &str = "attendee.search";

pub struct HttpDirectory {
    base_url: String,
    token: String,
    client: Client,
}

impl HttpDirectory {
    pub fn new(config: &DirectoryConfig) -> EscalationResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            client,
        })
    }

    fn call<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> EscalationResult<T> {
        log::debug!("directory: {method} {params:?}");
        let response = self
            .client
            .post(&self.base_url)
            .header(AUTH_HEADER, &self.token)
            .json(&rpc_request(method, params))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(EscalationError::HttpStatus {
                method: method.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: RpcResponse = response.json()?;
        decode_result(method, envelope)
    }
}

impl RemoteDirectory for HttpDirectory {
    fn list_departments(&self) -> EscalationResult<BTreeMap<DepartmentId, DepartmentName>> {
        self.call(DEPT_LIST, Vec::new())
    }

    fn lookup_shifts(
        &self,
        department_id: &str,
        range: Option<&ShiftRange>,
    ) -> EscalationResult<Vec<Job>> {
        let mut params = vec![json!(department_id)];
        if let Some(range) = range {
            params.push(json!(range.start.to_rfc3339()));
            params.push(json!(range.end.to_rfc3339()));
        }
        self.call(SHIFTS_LOOKUP, params)
    }

    fn search_attendees(&self, query: &str, full: bool) -> EscalationResult<Vec<Attendee>> {
        self.call(ATTENDEE_SEARCH, vec![json!(query), json!(full)])
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Build a request body. `params` is left out entirely when empty.
fn rpc_request(method: &str, params: Vec<Value>) -> Value {
    let mut body = json!({ "method": method });
    if !params.is_empty() {
        body["params"] = Value::Array(params);
    }
    body
}

fn decode_result<T: DeserializeOwned>(method: &str, envelope: RpcResponse) -> EscalationResult<T> {
    match envelope.result {
        Some(result) => Ok(serde_json::from_value(result)?),
        None => {
            let message = match envelope.error {
                Some(Value::String(text)) => text,
                Some(other) => other.to_string(),
                None => "response carried no result".to_string(),
            };
            Err(EscalationError::Rpc { method: method.to_string(), message })
        }
    }
}
