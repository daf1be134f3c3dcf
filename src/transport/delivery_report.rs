use chrono::{DateTime, FixedOffset};

use super::xml::{DecodeError, Element, EncodeError, XmlBuilder, parse_int, parse_timestamp};
use crate::domain::{
    Credentials, DeliveryReport, DeliveryReportQuery, MessageId, PhoneReport, RawPhoneNumber,
    StatusCode, StatusTable,
};

const REQUEST_ROOT: &str = "dr";

const STATUS: &str = "status";
const PHONE: &str = "phone";
const NUMBER: &str = "number";
const REPORT: &str = "report";
const SEND_TIME: &str = "sendTime";
const RECEIVE_TIME: &str = "rcvTime";

pub fn encode_delivery_report_xml(
    credentials: &Credentials,
    query: &DeliveryReportQuery,
) -> Result<String, EncodeError> {
    let mut xml = XmlBuilder::new();
    xml.open(REQUEST_ROOT)?;
    xml.credentials(credentials)?;
    xml.text_element(MessageId::FIELD, query.id().as_str())?;
    if let Some(phone) = query.phone() {
        xml.text_element(RawPhoneNumber::FIELD, phone.raw())?;
    }
    xml.close(REQUEST_ROOT)?;
    xml.finish()
}

pub fn decode_delivery_report_xml_response(xml: &str) -> Result<DeliveryReport, DecodeError> {
    let root = Element::parse(xml)?;
    let status_code = StatusCode::new(root.require_child_int(STATUS)?);

    let phones = root
        .children()
        .iter()
        .filter(|child| child.name() == PHONE)
        .map(decode_phone_report)
        .collect::<Result<Vec<_>, DecodeError>>()?;

    Ok(DeliveryReport {
        status_code,
        status_text: StatusTable::DeliveryReport.describe(status_code),
        phones,
    })
}

fn decode_phone_report(phone: &Element) -> Result<PhoneReport, DecodeError> {
    let mut number = None;
    let mut report_code = None;
    let mut send_time = None;
    let mut receive_time = None;

    for field in phone.children() {
        let text = field.inner_text();
        match field.name() {
            NUMBER => number = Some(text.trim().to_owned()),
            REPORT => report_code = Some(StatusCode::new(parse_int(REPORT, &text)?)),
            SEND_TIME => send_time = optional_timestamp(SEND_TIME, &text)?,
            RECEIVE_TIME => receive_time = optional_timestamp(RECEIVE_TIME, &text)?,
            _ => {}
        }
    }

    let report_code = report_code.ok_or(DecodeError::MissingElement { tag: REPORT })?;
    Ok(PhoneReport {
        number: number.ok_or(DecodeError::MissingElement { tag: NUMBER })?,
        report_code,
        report_text: StatusTable::PhoneReport.describe(report_code),
        send_time,
        receive_time,
    })
}

fn optional_timestamp(
    tag: &'static str,
    text: &str,
) -> Result<Option<DateTime<FixedOffset>>, DecodeError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_timestamp(tag, text).map(Some)
}
