//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    AccountInfo, Credentials, DeliveryReport, DeliveryReportQuery, SendSms, SendSmsResponse,
    ValidationError,
};
use crate::transport::{DecodeError, EncodeError};

const DEFAULT_BASE_URL: &str = "http://smspro.nikita.kg/";

const SEND_PATH: &str = "api/message";
const DELIVERY_REPORT_PATH: &str = "api/dr";
const ACCOUNT_INFO_PATH: &str = "api/info";

const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Boxed future returned by [`HttpTransport`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw HTTP reply handed back by an [`HttpTransport`].
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP exchange used by [`SmsProClient`].
///
/// Implement this to route requests through your own HTTP stack. Proxy, TLS, and
/// timeout configuration belong to the implementation.
pub trait HttpTransport: Send + Sync {
    /// POST `body` as `text/xml` to `url` and return the status and body as-is.
    ///
    /// Non-2xx statuses must be returned as a response, not as an error.
    fn post_xml<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone, Default)]
/// [`HttpTransport`] backed by a [`reqwest::Client`].
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_xml<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(reqwest::header::CONTENT_TYPE, XML_CONTENT_TYPE)
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which gateway response failed to decode.
pub enum ResponseKind {
    SendSms,
    DeliveryReport,
    AccountInfo,
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SendSms => "send SMS",
            Self::DeliveryReport => "delivery report",
            Self::AccountInfo => "account info",
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsProClient`].
///
/// Gateway status codes are not errors: they are returned inside the response types
/// together with their description.
pub enum SmsProError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The request could not be serialized to XML.
    #[error("encode error: {0}")]
    Encode(#[source] EncodeError),

    /// Response body is not the XML document the gateway documents.
    #[error("failed to parse {kind} response: {source}")]
    Parse {
        kind: ResponseKind,
        #[source]
        source: DecodeError,
    },

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[source] url::ParseError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Endpoints {
    send: String,
    delivery_report: String,
    account_info: String,
}

impl Endpoints {
    fn from_base(base: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            send: base.join(SEND_PATH)?.into(),
            delivery_report: base.join(DELIVERY_REPORT_PATH)?.into(),
            account_info: base.join(ACCOUNT_INFO_PATH)?.into(),
        })
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            send: format!("{DEFAULT_BASE_URL}{SEND_PATH}"),
            delivery_report: format!("{DEFAULT_BASE_URL}{DELIVERY_REPORT_PATH}"),
            account_info: format!("{DEFAULT_BASE_URL}{ACCOUNT_INFO_PATH}"),
        }
    }
}

#[derive(Clone)]
/// Builder for [`SmsProClient`].
///
/// Use this when you need to customize the base URL, timeout, user-agent, or the
/// HTTP stack itself.
pub struct SmsProClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    http_client: Option<reqwest::Client>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl fmt::Debug for SmsProClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsProClientBuilder")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("http_client", &self.http_client.is_some())
            .field("transport", &self.transport.is_some())
            .finish()
    }
}

impl SmsProClientBuilder {
    /// Create a builder with the default gateway URL and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: None,
            http_client: None,
            transport: None,
        }
    }

    /// Override the gateway base URL; `api/message`, `api/dr` and `api/info` are joined to it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use a preconfigured `reqwest` client (proxy, TLS, timeouts).
    ///
    /// `timeout` and `user_agent` are ignored when this is set.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replace the HTTP stack entirely.
    ///
    /// Takes precedence over `http_client`, `timeout` and `user_agent`.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`SmsProClient`].
    pub fn build(self) -> Result<SmsProClient, SmsProError> {
        let endpoints = Endpoints::from_base(&self.base_url).map_err(SmsProError::InvalidBaseUrl)?;

        if let Some(http) = self.transport {
            return Ok(SmsProClient {
                credentials: self.credentials,
                endpoints,
                http,
            });
        }
        if let Some(client) = self.http_client {
            return Ok(SmsProClient {
                credentials: self.credentials,
                endpoints,
                http: Arc::new(ReqwestTransport::new(client)),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| SmsProError::Transport(Box::new(err)))?;

        Ok(SmsProClient {
            credentials: self.credentials,
            endpoints,
            http: Arc::new(ReqwestTransport::new(client)),
        })
    }
}

#[derive(Clone)]
/// High-level smspro.nikita.kg client.
///
/// This type orchestrates XML encoding, the HTTP exchange, and response parsing.
/// By default it uses:
/// - `http://smspro.nikita.kg/api/message` for sending messages
/// - `http://smspro.nikita.kg/api/dr` for delivery reports
/// - `http://smspro.nikita.kg/api/info` for account info
pub struct SmsProClient {
    credentials: Credentials,
    endpoints: Endpoints,
    http: Arc<dyn HttpTransport>,
}

impl SmsProClient {
    /// Create a client using the default gateway URL.
    ///
    /// For more customization, use [`SmsProClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoints: Endpoints::default(),
            http: Arc::new(ReqwestTransport::default()),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SmsProClientBuilder {
        SmsProClientBuilder::new(credentials)
    }

    /// Credentials embedded in every request.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Send an SMS to up to 50 recipients.
    ///
    /// A scheduled time that is not in the future is dropped and the message is sent
    /// immediately.
    ///
    /// Errors:
    /// - [`SmsProError::Transport`] / [`SmsProError::HttpStatus`] for HTTP failures,
    /// - [`SmsProError::Parse`] when the reply is not the expected XML.
    pub async fn send_sms(&self, request: SendSms) -> Result<SendSmsResponse, SmsProError> {
        let xml = crate::transport::encode_send_sms_xml(
            &self.credentials,
            &request,
            &chrono::Utc::now(),
        )
        .map_err(SmsProError::Encode)?;

        debug!(
            endpoint = %self.endpoints.send,
            id = request.id().as_str(),
            recipients = request.recipients().len(),
            "sending SMS"
        );
        let body = self.post(&self.endpoints.send, xml).await?;

        let parsed = crate::transport::decode_send_sms_xml_response(&body).map_err(|source| {
            SmsProError::Parse {
                kind: ResponseKind::SendSms,
                source,
            }
        })?;
        debug!(
            id = %parsed.id,
            status = parsed.status_code.as_i32(),
            sms_parts = parsed.sms_parts,
            "send SMS response"
        );

        Ok(parsed)
    }

    /// Fetch the delivery report of a previous send.
    ///
    /// Errors:
    /// - [`SmsProError::Transport`] / [`SmsProError::HttpStatus`] for HTTP failures,
    /// - [`SmsProError::Parse`] when the reply is not the expected XML.
    pub async fn delivery_report(
        &self,
        query: DeliveryReportQuery,
    ) -> Result<DeliveryReport, SmsProError> {
        let xml = crate::transport::encode_delivery_report_xml(&self.credentials, &query)
            .map_err(SmsProError::Encode)?;

        debug!(
            endpoint = %self.endpoints.delivery_report,
            id = query.id().as_str(),
            phone = query.phone().map(|phone| phone.raw()),
            "requesting delivery report"
        );
        let body = self.post(&self.endpoints.delivery_report, xml).await?;

        let parsed =
            crate::transport::decode_delivery_report_xml_response(&body).map_err(|source| {
                SmsProError::Parse {
                    kind: ResponseKind::DeliveryReport,
                    source,
                }
            })?;
        debug!(
            status = parsed.status_code.as_i32(),
            phones = parsed.phones.len(),
            "delivery report response"
        );

        Ok(parsed)
    }

    /// Fetch account state, balance, and the price of one SMS.
    ///
    /// Errors:
    /// - [`SmsProError::Transport`] / [`SmsProError::HttpStatus`] for HTTP failures,
    /// - [`SmsProError::Parse`] when the reply is not the expected XML.
    pub async fn account_info(&self) -> Result<AccountInfo, SmsProError> {
        let xml = crate::transport::encode_account_info_xml(&self.credentials)
            .map_err(SmsProError::Encode)?;

        debug!(endpoint = %self.endpoints.account_info, "requesting account info");
        let body = self.post(&self.endpoints.account_info, xml).await?;

        let parsed = crate::transport::decode_account_info_xml_response(&body).map_err(|source| {
            SmsProError::Parse {
                kind: ResponseKind::AccountInfo,
                source,
            }
        })?;
        debug!(
            status = parsed.status_code.as_i32(),
            active = parsed.is_active,
            "account info response"
        );

        Ok(parsed)
    }

    async fn post(&self, url: &str, xml: String) -> Result<String, SmsProError> {
        let response = self
            .http
            .post_xml(url, xml)
            .await
            .map_err(SmsProError::Transport)?;

        if !(200..=299).contains(&response.status) {
            warn!(endpoint = url, status = response.status, "gateway returned HTTP error");
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(SmsProError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use crate::domain::{MessageId, MessageText, RawPhoneNumber, SendOptions, StatusCode};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_body: Option<String>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_body: None,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, Option<String>) {
            let state = self.state.lock().unwrap();
            (state.last_url.clone(), state.last_body.clone())
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_xml<'a>(
            &'a self,
            url: &'a str,
            body: String,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    state.last_body = Some(body);
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    struct FailingTransport;

    impl HttpTransport for FailingTransport {
        fn post_xml<'a>(
            &'a self,
            _url: &'a str,
            _body: String,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let err: Box<dyn StdError + Send + Sync> =
                    Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
                Err::<HttpResponse, _>(err)
            })
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("acc1", "pw1", "TEST").unwrap()
    }

    fn make_client(transport: Arc<dyn HttpTransport>) -> SmsProClient {
        SmsProClient {
            credentials: credentials(),
            endpoints: Endpoints::from_base("https://example.invalid/gw").unwrap(),
            http: transport,
        }
    }

    fn send_request() -> SendSms {
        SendSms::new(
            vec![
                RawPhoneNumber::new("+996555123456").unwrap(),
                RawPhoneNumber::new("996700000001").unwrap(),
            ],
            MessageText::new("hello").unwrap(),
            SendOptions {
                id: Some(MessageId::new("abc").unwrap()),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn send_sms_posts_xml_and_parses_response() {
        let reply = "<message><id>abc</id><status>0</status><phones>2</phones><smscnt>1</smscnt></message>";
        let transport = FakeTransport::new(200, reply);
        let client = make_client(Arc::new(transport.clone()));

        let response = client.send_sms(send_request()).await.unwrap();
        assert_eq!(response.id, "abc");
        assert_eq!(response.status_code, StatusCode::new(0));
        assert_eq!(response.recipients, 2);
        assert_eq!(response.sms_parts, 1);

        let (url, body) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/gw/api/message"));
        assert_eq!(
            body.as_deref(),
            Some(
                "<message><login>acc1</login><pwd>pw1</pwd><id>abc</id><sender>TEST</sender>\
                 <text>hello</text><phones><phone>+996555123456</phone>\
                 <phone>996700000001</phone></phones></message>"
            )
        );
    }

    #[tokio::test]
    async fn send_sms_returns_gateway_errors_as_data() {
        let reply = "<message><id>abc</id><status>4</status><phones>0</phones><smscnt>0</smscnt></message>";
        let client = make_client(Arc::new(FakeTransport::new(200, reply)));

        let response = client.send_sms(send_request()).await.unwrap();
        assert!(!response.status_code.is_ok());
        assert_eq!(response.status_text, "Недостаточно средств на счету");
    }

    #[tokio::test]
    async fn delivery_report_uses_report_endpoint() {
        let reply = "<response><status>0</status><phone><number>996555123456</number>\
                     <report>3</report><sendTime>20240301120000</sendTime>\
                     <rcvTime>20240301120010</rcvTime></phone></response>";
        let transport = FakeTransport::new(200, reply);
        let client = make_client(Arc::new(transport.clone()));

        let query = DeliveryReportQuery::for_phone(
            MessageId::new("abc").unwrap(),
            RawPhoneNumber::new("996555123456").unwrap(),
        );
        let report = client.delivery_report(query).await.unwrap();
        assert_eq!(report.phones.len(), 1);
        assert_eq!(report.phones[0].number, "996555123456");

        let (url, body) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/gw/api/dr"));
        assert_eq!(
            body.as_deref(),
            Some("<dr><login>acc1</login><pwd>pw1</pwd><id>abc</id><phone>996555123456</phone></dr>")
        );
    }

    #[tokio::test]
    async fn account_info_uses_info_endpoint() {
        let reply = "<info><status>0</status><state>0</state><account>10.5</account><smsprice>0.9</smsprice></info>";
        let transport = FakeTransport::new(200, reply);
        let client = make_client(Arc::new(transport.clone()));

        let info = client.account_info().await.unwrap();
        assert!(info.is_active);
        assert_eq!(info.balance.to_string(), "10.5");

        let (url, body) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/gw/api/info"));
        assert_eq!(
            body.as_deref(),
            Some("<info><login>acc1</login><pwd>pw1</pwd></info>")
        );
    }

    #[tokio::test]
    async fn malformed_reply_maps_to_parse_error_with_kind() {
        let client = make_client(Arc::new(FakeTransport::new(200, "<info><status>0</status>")));

        let err = client.account_info().await.unwrap_err();
        assert!(matches!(
            err,
            SmsProError::Parse {
                kind: ResponseKind::AccountInfo,
                ..
            }
        ));
        assert!(err.to_string().starts_with("failed to parse account info response"));
    }

    #[tokio::test]
    async fn non_success_http_status_is_reported() {
        let client = make_client(Arc::new(FakeTransport::new(500, "oops")));
        let err = client.account_info().await.unwrap_err();
        assert!(matches!(
            err,
            SmsProError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));

        let client = make_client(Arc::new(FakeTransport::new(503, "   ")));
        let err = client.account_info().await.unwrap_err();
        assert!(matches!(
            err,
            SmsProError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_surfaced_unchanged() {
        let client = make_client(Arc::new(FailingTransport));
        let err = client.send_sms(send_request()).await.unwrap_err();
        match err {
            SmsProError::Transport(source) => assert_eq!(source.to_string(), "refused"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validation_errors_convert_into_client_errors() {
        let err: SmsProError = Credentials::new("", "pw", "TEST").unwrap_err().into();
        assert!(matches!(err, SmsProError::Validation(ValidationError::Empty { .. })));
    }

    #[test]
    fn endpoints_join_base_with_or_without_trailing_slash() {
        let plain = Endpoints::from_base("http://smspro.nikita.kg").unwrap();
        assert_eq!(plain, Endpoints::default());

        let nested = Endpoints::from_base("https://proxy.example/sms/").unwrap();
        assert_eq!(nested.send, "https://proxy.example/sms/api/message");
        assert_eq!(nested.delivery_report, "https://proxy.example/sms/api/dr");
        assert_eq!(nested.account_info, "https://proxy.example/sms/api/info");

        assert!(Endpoints::from_base("not a url").is_err());
    }

    #[test]
    fn builder_base_url_override_is_applied() {
        let client = SmsProClient::builder(credentials())
            .base_url("https://example.invalid/gw")
            .timeout(Duration::from_secs(5))
            .user_agent("smspro-tests")
            .build()
            .unwrap();
        assert_eq!(client.endpoints.send, "https://example.invalid/gw/api/message");

        let result = SmsProClient::builder(credentials())
            .base_url("::bad::")
            .build();
        assert!(matches!(result, Err(SmsProError::InvalidBaseUrl(_))));
    }

    #[tokio::test]
    async fn builder_accepts_custom_transport() {
        let reply = "<info><status>0</status><state>1</state><account>0</account><smsprice>1.2</smsprice></info>";
        let transport = FakeTransport::new(200, reply);
        let client = SmsProClient::builder(credentials())
            .base_url("https://proxy.example/sms/")
            .timeout(Duration::from_secs(1))
            .transport(Arc::new(transport.clone()))
            .build()
            .unwrap();

        let info = client.account_info().await.unwrap();
        assert!(!info.is_active);

        let (url, _) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://proxy.example/sms/api/info"));
    }

    #[test]
    fn builder_accepts_preconfigured_reqwest_client() {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        let builder = SmsProClient::builder(credentials()).http_client(http);
        assert!(format!("{builder:?}").contains("http_client: true"));

        let client = builder.build().unwrap();
        assert_eq!(client.endpoints, Endpoints::default());
    }
}
