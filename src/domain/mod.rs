//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod status;
mod validation;
mod value;

pub use request::{
    Credentials, DeliveryReportQuery, SEND_SMS_MAX_RECIPIENTS, SendOptions, SendSms,
};
pub use response::{AccountInfo, DeliveryReport, PhoneReport, SendSmsResponse};
pub use status::StatusTable;
pub use validation::ValidationError;
pub use value::{
    GATEWAY_TIME_FORMAT, GATEWAY_UTC_OFFSET_SECS, Login, MessageId, MessageText, Password,
    PhoneNumber, RawPhoneNumber, ScheduledTime, SenderId, StatusCode, gateway_local_time,
    gateway_offset,
};
