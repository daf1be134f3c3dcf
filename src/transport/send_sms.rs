use chrono::{DateTime, TimeZone};

use super::xml::{DecodeError, Element, EncodeError, XmlBuilder};
use crate::domain::{
    Credentials, MessageId, MessageText, RawPhoneNumber, ScheduledTime, SendSms,
    SendSmsResponse, SenderId, StatusCode, StatusTable,
};

const REQUEST_ROOT: &str = "message";
const PHONES: &str = "phones";

const ID: &str = "id";
const STATUS: &str = "status";
const RECIPIENTS: &str = "phones";
const SMS_PARTS: &str = "smscnt";
const MESSAGE: &str = "message";

/// Encode a send request.
///
/// `time` is only written when the scheduled time is strictly after `now`; otherwise the
/// gateway sends immediately.
pub fn encode_send_sms_xml<Tz: TimeZone>(
    credentials: &Credentials,
    request: &SendSms,
    now: &DateTime<Tz>,
) -> Result<String, EncodeError> {
    let mut xml = XmlBuilder::new();
    xml.open(REQUEST_ROOT)?;
    xml.credentials(credentials)?;
    xml.text_element(MessageId::FIELD, request.id().as_str())?;
    xml.text_element(SenderId::FIELD, credentials.sender().as_str())?;
    xml.text_element(MessageText::FIELD, request.text().as_str())?;
    if let Some(time) = request.time().filter(|time| time.is_after(now)) {
        xml.text_element(ScheduledTime::FIELD, &time.to_gateway_string())?;
    }
    xml.open(PHONES)?;
    for phone in request.recipients() {
        xml.text_element(RawPhoneNumber::FIELD, phone.raw())?;
    }
    xml.close(PHONES)?;
    xml.close(REQUEST_ROOT)?;
    xml.finish()
}

pub fn decode_send_sms_xml_response(xml: &str) -> Result<SendSmsResponse, DecodeError> {
    let root = Element::parse(xml)?;
    let status_code = StatusCode::new(root.require_int(STATUS)?);

    Ok(SendSmsResponse {
        id: root.require(ID)?.inner_text(),
        status_code,
        status_text: StatusTable::SendSms.describe(status_code),
        recipients: root.require_int(RECIPIENTS)?,
        sms_parts: root.require_int(SMS_PARTS)?,
        message: root
            .find(MESSAGE)
            .map(Element::inner_text)
            .filter(|text| !text.trim().is_empty()),
    })
}
