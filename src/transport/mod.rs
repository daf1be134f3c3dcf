//! Transport layer: XML wire format of the gateway (request encoding, response decoding).
//!
//! Every function here is pure; the HTTP exchange itself lives in [`crate::client`].

mod account_info;
mod delivery_report;
mod send_sms;
mod xml;

pub use account_info::{decode_account_info_xml_response, encode_account_info_xml};
pub use delivery_report::{decode_delivery_report_xml_response, encode_delivery_report_xml};
pub use send_sms::{decode_send_sms_xml_response, encode_send_sms_xml};
pub use xml::{DecodeError, EncodeError};
