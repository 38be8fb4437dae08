//! Management API client.
//!
//! Every request is a signed `GET` against the API endpoint. Responses come
//! wrapped in a `{"<command>response": {...}}` envelope which is unwrapped
//! here; API errors inside the envelope become [`ApiError::Server`].

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, trace};

use crate::error::{ApiError, Result};
use crate::poll::{poll_until, PollOutcome, PollPolicy};
use crate::signing;
use crate::types::AsyncJob;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default connect timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default async job policy: query every 5 seconds for up to 10 minutes.
pub const DEFAULT_JOB_POLICY: PollPolicy = PollPolicy::new(Duration::from_secs(5), 120);

/// Parameters whose values are masked in logs.
const SENSITIVE_PARAMS: [&str; 2] = ["apikey", "password"];

/// API key pair of the calling user.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    /// Public API key.
    pub api_key: String,
    /// Secret key used for signing.
    pub secret_key: String,
}

/// Ordered request parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Sets a parameter, replacing any previous value.
    #[must_use]
    pub fn set(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key.to_string(), value)),
        }
        self
    }

    /// Sets a parameter only if a value is present.
    #[must_use]
    pub fn set_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the parameters as key/value pairs.
    #[must_use]
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns the pairs with credentials masked.
    fn redacted(&self) -> Vec<(&str, &str)> {
        self.pairs
            .iter()
            .map(|(k, v)| {
                if SENSITIVE_PARAMS.contains(&k.to_ascii_lowercase().as_str()) {
                    (k.as_str(), "********")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect()
    }
}

/// Client for the management API.
pub struct ApiClient {
    /// HTTP client.
    client: Client,
    /// API endpoint, e.g. `http://mgmt:8080/client/api`.
    endpoint: String,
    /// Key pair for signing.
    credentials: ApiCredentials,
    /// Policy used when waiting for async jobs.
    job_policy: PollPolicy,
}

impl ApiClient {
    /// Creates a new client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an HTTP(S) URL or the HTTP
    /// client cannot be built.
    pub fn new(endpoint: impl Into<String>, credentials: ApiCredentials) -> Result<Self> {
        let endpoint = endpoint.into();
        let parsed =
            url::Url::parse(&endpoint).map_err(|e| ApiError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidEndpoint(format!(
                "{endpoint}: unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(concat!("router-bvt/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('?').to_string(),
            credentials,
            job_policy: DEFAULT_JOB_POLICY,
        })
    }

    /// Sets the policy used when waiting for async jobs.
    #[must_use]
    pub const fn with_job_policy(mut self, policy: PollPolicy) -> Self {
        self.job_policy = policy;
        self
    }

    /// Gets the API endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues a command and returns the unwrapped response object.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-JSON error response, or
    /// an API error envelope.
    #[instrument(skip(self, params))]
    pub async fn execute(&self, command: &str, params: Params) -> Result<Value> {
        let params = params
            .set("command", command)
            .set("response", "json")
            .set("apiKey", &self.credentials.api_key);
        let query = signing::signed_query(params.as_pairs(), &self.credentials.secret_key)?;
        let url = format!("{}?{}", self.endpoint, query);

        debug!(params = ?params.redacted(), "sending API request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        trace!(status = %status, body_len = body.len(), "received API response");

        let mut envelope: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let mut key = format!("{}response", command.to_lowercase());
        if envelope.get(&key).is_none() {
            key = "errorresponse".to_string();
        }
        let inner = match envelope.get_mut(&key) {
            Some(inner) => inner.take(),
            None if !status.is_success() => {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            None => {
                return Err(ApiError::MissingField {
                    context: command.to_string(),
                    field: "response",
                });
            }
        };

        if let Some(text) = inner.get("errortext").and_then(Value::as_str) {
            let code = inner
                .get("errorcode")
                .and_then(Value::as_u64)
                .and_then(|c| u32::try_from(c).ok())
                .unwrap_or_else(|| u32::from(status.as_u16()));
            return Err(ApiError::Server {
                command: command.to_string(),
                code,
                text: text.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(inner)
    }

    /// Issues a list command and deserializes the named array.
    ///
    /// The server omits the array entirely when nothing matches, which is
    /// returned as an empty vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the items do not parse.
    pub async fn list<T: DeserializeOwned>(
        &self,
        command: &str,
        key: &str,
        params: Params,
    ) -> Result<Vec<T>> {
        let mut inner = self.execute(command, params).await?;
        match inner.get_mut(key).map(Value::take) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(items) => Ok(serde_json::from_value(items)?),
        }
    }

    /// Issues an async command and waits for its job to finish.
    ///
    /// Returns the job's result payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected, the job fails, or the job
    /// is still pending when the job policy runs out.
    pub async fn execute_async(&self, command: &str, params: Params) -> Result<Value> {
        let inner = self.execute(command, params).await?;
        let job_id = inner
            .get("jobid")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::MissingField {
                context: command.to_string(),
                field: "jobid",
            })?;
        self.wait_for_job(job_id).await
    }

    /// Waits for an async job to leave the pending state.
    ///
    /// # Errors
    ///
    /// Returns an error if the job fails or does not finish in time.
    #[instrument(skip(self))]
    pub async fn wait_for_job(&self, job_id: &str) -> Result<Value> {
        let outcome = poll_until(
            &self.job_policy,
            || self.query_job(job_id),
            AsyncJob::is_finished,
        )
        .await?;

        match outcome {
            PollOutcome::Ready(job) => {
                debug!(status = ?job.status, "job finished");
                job.into_result()
            }
            PollOutcome::Exhausted(_) => Err(ApiError::JobTimeout {
                job_id: job_id.to_string(),
                attempts: self.job_policy.max_queries(),
            }),
        }
    }

    async fn query_job(&self, job_id: &str) -> Result<AsyncJob> {
        let inner = self
            .execute("queryAsyncJobResult", Params::new().set("jobid", job_id))
            .await?;
        Ok(serde_json::from_value(inner)?)
    }
}

/// Pulls a typed object out of a response or job result.
pub(crate) fn take_object<T: DeserializeOwned>(
    mut value: Value,
    context: &str,
    field: &'static str,
) -> Result<T> {
    match value.get_mut(field).map(Value::take) {
        Some(object) if !object.is_null() => Ok(serde_json::from_value(object)?),
        _ => Err(ApiError::MissingField {
            context: context.to_string(),
            field,
        }),
    }
}
