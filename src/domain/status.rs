//! Fixed status-code descriptions published by the gateway.

use crate::domain::value::StatusCode;

const SEND_SMS: &[(i32, &str)] = &[
    (0, "Сообщение успешно принято к отправке"),
    (1, "Ошибка в формате запроса"),
    (2, "Неверная авторизация"),
    (3, "Недопустимый IP-адрес отправителя"),
    (4, "Недостаточно средств на счету"),
    (
        5,
        "Недопустимое имя отправителя (значение поля sender в запросе не валидировано администратором smspro.nikita.kg)",
    ),
    (
        6,
        "Сообщение заблокировано по стоп-словам (в сообщении содержатся слова, блокируемые роботом. Например, нецензурная лексика)",
    ),
    (7, "Некорректный номер"),
    (8, "Неверный формат времени отправки"),
    (9, "Отправка заблокирована из-за срабатывания SPAM фильтра"),
    (
        10,
        "Отправка заблокирована из-за последовательного повторения id (ошибочная переотправка)",
    ),
    (
        11,
        "Сообщение успешно обработано, но не принято к отправке и не протарифицировано т.к. в запросе был установлен параметр <test>1</test>",
    ),
];

const DELIVERY_REPORT: &[(i32, &str)] = &[
    (0, "Запрос корректен"),
    (1, "Ошибка в формате запроса"),
    (2, "Неверная авторизация"),
    (3, "Недопустимый IP-адрес отправителя"),
    (4, "Отчет для указанных номера телефона и ID не найден"),
];

const PHONE_REPORT: &[(i32, &str)] = &[
    (0, "Сообщение находится в очереди на отправку"),
    (1, "Сообщение отправлено (передано оператору)"),
    (2, "Сообщение отклонено"),
    (3, "Сообщение успешно доставлено"),
    (4, "Сообщение не доставлено"),
    (
        5,
        "Сообщение не отправлено из-за нехватки средств на счету партнера",
    ),
    (6, "Неизвестный (новый) статус отправки"),
];

const ACCOUNT_INFO: &[(i32, &str)] = &[
    (0, "Запрос корректен"),
    (1, "Ошибка в формате запроса"),
    (2, "Неверная авторизация"),
    (3, "Недопустимый IP-адрес отправителя"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which gateway table a code belongs to. The same integer means different things per table.
pub enum StatusTable {
    /// Top-level status of `api/message`.
    SendSms,
    /// Top-level status of `api/dr`.
    DeliveryReport,
    /// Per-phone `report` code inside a delivery report.
    PhoneReport,
    /// Top-level status of `api/info`.
    AccountInfo,
}

impl StatusTable {
    fn entries(self) -> &'static [(i32, &'static str)] {
        match self {
            Self::SendSms => SEND_SMS,
            Self::DeliveryReport => DELIVERY_REPORT,
            Self::PhoneReport => PHONE_REPORT,
            Self::AccountInfo => ACCOUNT_INFO,
        }
    }

    /// Look up the gateway's description of `code`, if the table knows it.
    pub fn known(self, code: StatusCode) -> Option<&'static str> {
        self.entries()
            .iter()
            .find(|(known, _)| *known == code.as_i32())
            .map(|(_, text)| *text)
    }

    /// Describe `code`; codes missing from the table render as `Unknown status {code}`.
    pub fn describe(self, code: StatusCode) -> String {
        match self.known(code) {
            Some(text) => text.to_owned(),
            None => format!("Unknown status {}", code.as_i32()),
        }
    }
}
