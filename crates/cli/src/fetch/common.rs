//! Shared infrastructure for the fetch adapters.
//!
//! Both adapters (wikipedia, nytimes) reuse:
//! - `FetchClient` — HTTP client with retry / backoff / error classification
//! - `resolve_api_key` — flag > env > error

use std::thread;
use std::time::Duration;

use crate::CliError;

pub(crate) const MAX_RETRIES: u32 = 3;
pub(crate) const USER_AGENT: &str = concat!("necrolist/", env!("CARGO_PKG_VERSION"));

/// Exit codes a FetchClient maps HTTP conditions onto. Each adapter owns
/// a range in the registry.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FetchExitCodes {
    pub auth: u8,
    pub validation: u8,
    pub rate_limit: u8,
    pub upstream: u8,
}

/// Shared HTTP client that handles retry, backoff, and error
/// classification.
///
/// Adapters own their base URL and query parameters. They pass a
/// request-building closure to [`FetchClient::get_json`], which runs the
/// retry loop and maps HTTP status codes to the adapter's exit codes.
pub(crate) struct FetchClient {
    pub(crate) http: reqwest::blocking::Client,
    source_name: String,
    codes: FetchExitCodes,
}

impl FetchClient {
    pub(crate) fn new(source_name: &str, codes: FetchExitCodes) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            source_name: source_name.to_string(),
            codes,
        }
    }

    /// Make a GET request with retry + exponential backoff, parsing the
    /// response as JSON.
    ///
    /// `build_request` is called once per attempt. It receives the
    /// underlying `reqwest::blocking::Client` and must return a fully
    /// configured `RequestBuilder` (URL, headers, query params).
    pub(crate) fn get_json(
        &self,
        build_request: impl Fn(&reqwest::blocking::Client) -> reqwest::blocking::RequestBuilder,
    ) -> Result<serde_json::Value, CliError> {
        let mut backoff_secs = 1u64;

        for attempt in 0..=MAX_RETRIES {
            let result = build_request(&self.http).send();

            match result {
                Ok(resp) => {
                    let status = resp.status().as_u16();

                    // Auth errors: fail immediately
                    if status == 401 || status == 403 {
                        return Err(CliError {
                            code: self.codes.auth,
                            message: format!("{} auth failed ({})", self.source_name, status),
                            hint: None,
                        });
                    }

                    // Bad request: fail immediately
                    if status == 400 {
                        let body = resp.text().unwrap_or_default();
                        return Err(CliError {
                            code: self.codes.validation,
                            message: format!(
                                "{} request rejected (400): {}",
                                self.source_name,
                                &body[..body.len().min(200)],
                            ),
                            hint: None,
                        });
                    }

                    // Other 4xx (not 429): fail immediately
                    if status >= 400 && status < 500 && status != 429 {
                        return Err(CliError {
                            code: self.codes.upstream,
                            message: format!("{} error ({})", self.source_name, status),
                            hint: None,
                        });
                    }

                    // Retryable: 429, 5xx
                    if status == 429 || status >= 500 {
                        if attempt == MAX_RETRIES {
                            let code = if status == 429 {
                                self.codes.rate_limit
                            } else {
                                self.codes.upstream
                            };
                            return Err(CliError {
                                code,
                                message: format!(
                                    "{} {} after {} attempts ({})",
                                    self.source_name,
                                    if status == 429 {
                                        "rate limited"
                                    } else {
                                        "upstream error"
                                    },
                                    MAX_RETRIES,
                                    status,
                                ),
                                hint: None,
                            });
                        }

                        // Respect Retry-After for 429
                        let wait = if status == 429 {
                            resp.headers()
                                .get("retry-after")
                                .and_then(|v| v.to_str().ok())
                                .and_then(|v| v.parse::<u64>().ok())
                                .unwrap_or(backoff_secs)
                        } else {
                            backoff_secs
                        };

                        eprintln!(
                            "warning: retry {}/{} in {}s (HTTP {})",
                            attempt + 1,
                            MAX_RETRIES,
                            wait,
                            status,
                        );
                        thread::sleep(Duration::from_secs(wait));
                        backoff_secs *= 2;
                        continue;
                    }

                    // Success: parse JSON
                    let text = resp.text().map_err(|e| CliError {
                        code: self.codes.upstream,
                        message: format!(
                            "failed to read {} response body: {}",
                            self.source_name, e,
                        ),
                        hint: None,
                    })?;
                    let body: serde_json::Value =
                        serde_json::from_str(&text).map_err(|e| CliError {
                            code: self.codes.upstream,
                            message: format!(
                                "failed to parse {} JSON response: {} (body: {})",
                                self.source_name,
                                e,
                                &text[..text.len().min(200)],
                            ),
                            hint: None,
                        })?;

                    return Ok(body);
                }
                Err(e) => {
                    // Network/timeout errors: retry
                    if attempt == MAX_RETRIES {
                        return Err(CliError {
                            code: self.codes.upstream,
                            message: format!(
                                "{} upstream error after {} attempts: {}",
                                self.source_name, MAX_RETRIES, e,
                            ),
                            hint: None,
                        });
                    }

                    eprintln!(
                        "warning: retry {}/{} in {}s ({})",
                        attempt + 1,
                        MAX_RETRIES,
                        backoff_secs,
                        e,
                    );
                    thread::sleep(Duration::from_secs(backoff_secs));
                    backoff_secs *= 2;
                }
            }
        }

        unreachable!()
    }
}

/// Resolve an API key: flag value > environment variable > error.
pub(crate) fn resolve_api_key(
    flag: Option<String>,
    source_name: &str,
    env_var: &str,
    missing_code: u8,
) -> Result<String, CliError> {
    if let Some(key) = flag {
        let trimmed = key.trim().to_string();
        if trimmed.is_empty() {
            return Err(missing_key_error(source_name, env_var, missing_code));
        }
        return Ok(trimmed);
    }

    if let Ok(key) = std::env::var(env_var) {
        let trimmed = key.trim().to_string();
        if !trimmed.is_empty() {
            return Ok(trimmed);
        }
    }

    Err(missing_key_error(source_name, env_var, missing_code))
}

fn missing_key_error(source_name: &str, env_var: &str, code: u8) -> CliError {
    CliError {
        code,
        message: format!(
            "missing {} API key (use --api-key or set {})",
            source_name, env_var,
        ),
        hint: None,
    }
}
