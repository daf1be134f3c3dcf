use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::domain::value::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsResponse {
    pub id: String,
    pub status_code: StatusCode,
    pub status_text: String,
    /// Number of recipients accepted (`phones`).
    pub recipients: u32,
    /// Number of SMS parts per recipient (`smscnt`).
    pub sms_parts: u32,
    /// Optional explanation sent along with an error status.
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub status_code: StatusCode,
    pub status_text: String,
    pub phones: Vec<PhoneReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneReport {
    pub number: String,
    pub report_code: StatusCode,
    pub report_text: String,
    /// `None` while the message is still queued.
    pub send_time: Option<DateTime<FixedOffset>>,
    /// `None` until the message is delivered.
    pub receive_time: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub status_code: StatusCode,
    pub status_text: String,
    pub is_active: bool,
    pub balance: Decimal,
    pub sms_price: Decimal,
}
