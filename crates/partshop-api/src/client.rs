// Storefront backend HTTP client
//
// Wraps `reqwest::Client` with base-URL selection (shop vs. auth host),
// bearer + cookie credentials, and the status translation every endpoint
// shares. Endpoint groups (catalog, auth, checkout, admin, account) are
// inherent methods in separate files; this module only does transport.

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, FieldErrors};
use crate::session::Session;
use crate::transport::TransportConfig;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ── Request shaping ─────────────────────────────────────────────────

/// Per-request knobs for [`ApiClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Do not attach the bearer token (cookies are still sent).
    pub skip_auth: bool,
    /// Send to this host instead of the shop base URL.
    pub base_url: Option<Url>,
    /// A 401 means "invalid credentials", not "session expired":
    /// the body is parsed for a message and the token is left alone.
    pub allow_401: bool,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    pub fn allow_401(mut self) -> Self {
        self.allow_401 = true;
        self
    }

    pub fn base_url(mut self, base: Url) -> Self {
        self.base_url = Some(base);
        self
    }

    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Request payload.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Pre-encoded JSON bytes.
    Json(Vec<u8>),
    Multipart(Form),
}

impl RequestBody {
    pub fn json(value: &impl Serialize) -> Result<Self, Error> {
        Ok(Self::Json(serde_json::to_vec(value)?))
    }
}

// ── Client ──────────────────────────────────────────────────────────

/// Raw HTTP client for the storefront backend.
///
/// Always keeps a cookie jar (the backend may authenticate by cookie) and
/// attaches the in-memory bearer token from its [`Session`] as well, since
/// the backend's session strategy is not fixed at build time.
pub struct ApiClient {
    http: reqwest::Client,
    shop_base: Url,
    auth_base: Url,
    session: Arc<Session>,
}

impl ApiClient {
    /// Build a client with a fresh cookie jar and a fresh [`Session`].
    pub fn new(shop_base: Url, auth_base: Url, transport: &TransportConfig) -> Result<Self, Error> {
        Self::with_session(shop_base, auth_base, transport, Arc::new(Session::new()))
    }

    /// Build a client that shares an existing [`Session`].
    pub fn with_session(
        shop_base: Url,
        auth_base: Url,
        transport: &TransportConfig,
        session: Arc<Session>,
    ) -> Result<Self, Error> {
        let http = transport.build_client(Arc::new(Jar::default()))?;
        Ok(Self {
            http,
            shop_base,
            auth_base,
            session,
        })
    }

    /// Wrap a pre-built `reqwest::Client` (caller owns cookie and TLS setup).
    pub fn with_client(http: reqwest::Client, shop_base: Url, auth_base: Url) -> Self {
        Self {
            http,
            shop_base,
            auth_base,
            session: Arc::new(Session::new()),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn shop_base(&self) -> &Url {
        &self.shop_base
    }

    pub fn auth_base(&self) -> &Url {
        &self.auth_base
    }

    /// Options preset for the auth host.
    pub(crate) fn auth_options(&self) -> RequestOptions {
        RequestOptions::new().base_url(self.auth_base.clone())
    }

    // ── Transport core ───────────────────────────────────────────────

    /// Send one request and translate the response.
    ///
    /// Status handling, first match wins:
    /// 1. 401 with `allow_401` → [`Error::InvalidCredentials`], token kept
    /// 2. 401 → token cleared, [`Error::Unauthorized`]
    /// 3. 403 → [`Error::Forbidden`]
    /// 4. 404 → [`Error::NotFound`]
    /// 5. other non-2xx → [`Error::Api`] with the parsed message
    /// 6. 204 / empty body → the empty value of `T` (`{}`, then `null`)
    /// 7. otherwise the decoded JSON body
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<T, Error> {
        let base = options.base_url.as_ref().unwrap_or(&self.shop_base);
        let url = join_endpoint(base, endpoint)?;
        debug!("{method} {url}");

        let mut builder = self.http.request(method, url);
        if !options.query.is_empty() {
            trace!(query = ?options.query, "query parameters");
            builder = builder.query(&options.query);
        }

        let has_content_type = options.headers.contains_key(CONTENT_TYPE);
        let has_authorization = options.headers.contains_key(AUTHORIZATION);
        builder = builder.headers(options.headers);

        if !options.skip_auth && !has_authorization {
            if let Some(token) = self.session.access_token() {
                builder = builder.bearer_auth(token.expose_secret());
            }
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => {
                let builder = if has_content_type {
                    builder
                } else {
                    builder.header(CONTENT_TYPE, "application/json")
                };
                builder.body(bytes)
            }
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let resp = builder.send().await?;
        self.handle_response(resp, options.allow_401).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        allow_401: bool,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            if allow_401 {
                let parsed = ParsedError::from_body(&resp.text().await.unwrap_or_default());
                return Err(Error::InvalidCredentials {
                    message: parsed
                        .message
                        .unwrap_or_else(|| INVALID_CREDENTIALS.to_owned()),
                    field_errors: parsed.field_errors,
                });
            }
            debug!("401 received, clearing session token");
            self.session.clear();
            return Err(Error::Unauthorized);
        }

        if status == StatusCode::FORBIDDEN {
            return Err(Error::Forbidden);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound);
        }

        if !status.is_success() {
            let parsed = ParsedError::from_body(&resp.text().await.unwrap_or_default());
            return Err(Error::Api {
                message: parsed
                    .message
                    .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16())),
                status: status.as_u16(),
                field_errors: parsed.field_errors,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return empty_value();
        }

        let body = resp.text().await?;
        if body.trim().is_empty() {
            return empty_value();
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    // ── Verb helpers ─────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let options = RequestOptions::new().query(query.iter().map(|(k, v)| (*k, v.clone())));
        self.request(Method::GET, endpoint, RequestBody::Empty, options)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.request(
            Method::POST,
            endpoint,
            RequestBody::json(body)?,
            RequestOptions::new(),
        )
        .await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        self.request(
            Method::POST,
            endpoint,
            RequestBody::Empty,
            RequestOptions::new(),
        )
        .await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: Form,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let options = RequestOptions::new().query(query.iter().map(|(k, v)| (*k, v.clone())));
        self.request(Method::POST, endpoint, RequestBody::Multipart(form), options)
            .await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.request(
            Method::PUT,
            endpoint,
            RequestBody::json(body)?,
            RequestOptions::new(),
        )
        .await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.request(
            Method::PATCH,
            endpoint,
            RequestBody::json(body)?,
            RequestOptions::new(),
        )
        .await
    }

    /// DELETE, discarding whatever body the backend sends back.
    pub(crate) async fn delete(&self, endpoint: &str) -> Result<(), Error> {
        let _: Value = self
            .request(
                Method::DELETE,
                endpoint,
                RequestBody::Empty,
                RequestOptions::new(),
            )
            .await?;
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Append `endpoint` to `base`, keeping any path prefix the base carries.
fn join_endpoint(base: &Url, endpoint: &str) -> Result<Url, Error> {
    let base = base.as_str().trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{endpoint}"))?)
}

/// Percent-encode one path segment (SKUs and slugs may carry `/` or spaces).
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// The "empty object typed as `T`" for bodiless success responses.
fn empty_value<T: DeserializeOwned>() -> Result<T, Error> {
    serde_json::from_value(Value::Object(serde_json::Map::new()))
        .or_else(|_| serde_json::from_value(Value::Null))
        .map_err(|e| Error::Deserialization {
            message: format!("empty response body: {e}"),
            body: String::new(),
        })
}

/// Best-effort view of a backend error body.
///
/// Accepts `{message}` or `{error}` for the text, and `fieldErrors` /
/// `errors` either as a `{field: message}` map or as a list of
/// `{field, message}` (Spring's `defaultMessage` also recognised).
#[derive(Debug, Default)]
struct ParsedError {
    message: Option<String>,
    field_errors: Option<FieldErrors>,
}

impl ParsedError {
    fn from_body(raw: &str) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
            return Self::default();
        };

        let message = ["message", "error"].iter().find_map(|key| {
            map.get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        });

        let field_errors = ["fieldErrors", "errors"]
            .iter()
            .find_map(|key| map.get(*key).and_then(field_errors_from));

        Self {
            message,
            field_errors,
        }
    }
}

fn field_errors_from(value: &Value) -> Option<FieldErrors> {
    let mut out = FieldErrors::new();
    match value {
        Value::Object(entries) => {
            for (field, msg) in entries {
                let text = match msg {
                    Value::String(s) => s.clone(),
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join("; "),
                    _ => continue,
                };
                out.insert(field.clone(), text);
            }
        }
        Value::Array(items) => {
            for item in items {
                let field = item.get("field").and_then(Value::as_str);
                let msg = item
                    .get("message")
                    .or_else(|| item.get("defaultMessage"))
                    .and_then(Value::as_str);
                if let (Some(field), Some(msg)) = (field, msg) {
                    out.insert(field.to_owned(), msg.to_owned());
                }
            }
        }
        _ => {}
    }
    if out.is_empty() { None } else { Some(out) }
}
