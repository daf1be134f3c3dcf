//! Typed Rust client for the smspro.nikita.kg XML API.
//!
//! The crate is split into a domain layer of strong types, a transport layer that owns
//! the XML wire format, and a small client layer orchestrating HTTP requests.
//!
//! ```rust,no_run
//! use smspro::{Credentials, MessageText, RawPhoneNumber, SendOptions, SendSms, SmsProClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smspro::SmsProError> {
//!     let client = SmsProClient::new(Credentials::new("login", "password", "SENDER")?);
//!     let phone = RawPhoneNumber::new("+996555123456")?;
//!     let msg = MessageText::new("hello")?;
//!     let request = SendSms::new(vec![phone], msg, SendOptions::default())?;
//!     let resp = client.send_sms(request).await?;
//!     println!("{}: {}", resp.status_code.as_i32(), resp.status_text);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod transport;

pub use client::{
    HttpResponse, HttpTransport, ReqwestTransport, ResponseKind, SmsProClient, SmsProClientBuilder,
    SmsProError,
};
pub use domain::{
    AccountInfo, Credentials, DeliveryReport, DeliveryReportQuery, Login, MessageId, MessageText,
    Password, PhoneNumber, PhoneReport, RawPhoneNumber, SEND_SMS_MAX_RECIPIENTS, ScheduledTime,
    SendOptions, SendSms, SendSmsResponse, SenderId, StatusCode, StatusTable, ValidationError,
};
