use super::xml::{DecodeError, Element, EncodeError, XmlBuilder};
use crate::domain::{AccountInfo, Credentials, StatusCode, StatusTable};

const REQUEST_ROOT: &str = "info";

const STATUS: &str = "status";
const STATE: &str = "state";
const BALANCE: &str = "account";
const SMS_PRICE: &str = "smsprice";

/// Account state value meaning "active".
const STATE_ACTIVE: i32 = 0;

pub fn encode_account_info_xml(credentials: &Credentials) -> Result<String, EncodeError> {
    let mut xml = XmlBuilder::new();
    xml.open(REQUEST_ROOT)?;
    xml.credentials(credentials)?;
    xml.close(REQUEST_ROOT)?;
    xml.finish()
}

pub fn decode_account_info_xml_response(xml: &str) -> Result<AccountInfo, DecodeError> {
    let root = Element::parse(xml)?;
    let status_code = StatusCode::new(root.require_int(STATUS)?);
    let state: i32 = root.require_int(STATE)?;

    Ok(AccountInfo {
        status_code,
        status_text: StatusTable::AccountInfo.describe(status_code),
        is_active: state == STATE_ACTIVE,
        balance: root.require_decimal(BALANCE)?,
        sms_price: root.require_decimal(SMS_PRICE)?,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn encode_writes_login_and_password_only() {
        let credentials = Credentials::new("acc1", "pw1", "TEST").unwrap();
        assert_eq!(
            encode_account_info_xml(&credentials).unwrap(),
            "<info><login>acc1</login><pwd>pw1</pwd></info>"
        );
    }

    #[test]
    fn encode_escapes_credentials() {
        let credentials = Credentials::new("a&b", "p<w>", "TEST").unwrap();
        assert_eq!(
            encode_account_info_xml(&credentials).unwrap(),
            "<info><login>a&amp;b</login><pwd>p&lt;w&gt;</pwd></info>"
        );
    }

    #[test]
    fn decode_reads_active_account() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <info>
              <status>0</status>
              <state>0</state>
              <account>1520.75</account>
              <smsprice>0.90</smsprice>
            </info>"#;

        let info = decode_account_info_xml_response(xml).unwrap();
        assert_eq!(info.status_code, StatusCode::new(0));
        assert_eq!(info.status_text, "Запрос корректен");
        assert!(info.is_active);
        assert_eq!(info.balance, Decimal::new(152_075, 2));
        assert_eq!(info.sms_price, Decimal::new(90, 2));
    }

    #[test]
    fn decode_treats_non_zero_state_as_inactive() {
        let xml = "<info><status>0</status><state>1</state><account>0</account><smsprice>1</smsprice></info>";
        let info = decode_account_info_xml_response(xml).unwrap();
        assert!(!info.is_active);
    }

    #[test]
    fn decode_keeps_unknown_status_as_text() {
        let xml = "<info><status>7</status><state>0</state><account>0</account><smsprice>0</smsprice></info>";
        let info = decode_account_info_xml_response(xml).unwrap();
        assert_eq!(info.status_text, "Unknown status 7");
    }

    #[test]
    fn decode_reports_bad_numbers() {
        let xml = "<info><status>0</status><state>0</state><account>lots</account><smsprice>1</smsprice></info>";
        assert!(matches!(
            decode_account_info_xml_response(xml),
            Err(DecodeError::InvalidDecimal { tag: "account", .. })
        ));

        let xml = "<info><status>0</status><state>on</state><account>1</account><smsprice>1</smsprice></info>";
        assert!(matches!(
            decode_account_info_xml_response(xml),
            Err(DecodeError::InvalidInteger { tag: "state", .. })
        ));

        let xml = "<info><status>0</status><state>0</state><account>1</account></info>";
        assert!(matches!(
            decode_account_info_xml_response(xml),
            Err(DecodeError::MissingElement { tag: "smsprice" })
        ));
    }
}
