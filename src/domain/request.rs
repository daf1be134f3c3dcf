use crate::domain::validation::ValidationError;
use crate::domain::value::{
    Login, MessageId, MessageText, Password, RawPhoneNumber, ScheduledTime, SenderId,
};

pub const SEND_SMS_MAX_RECIPIENTS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account credentials and sender name, embedded in every request.
pub struct Credentials {
    login: Login,
    password: Password,
    sender: SenderId,
}

impl Credentials {
    /// Validate and bundle the three account values.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        sender: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            login: Login::new(login)?,
            password: Password::new(password)?,
            sender: SenderId::new(sender)?,
        })
    }

    pub fn login(&self) -> &Login {
        &self.login
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn sender(&self) -> &SenderId {
        &self.sender
    }
}

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Transaction id; a random one is generated when unset.
    pub id: Option<MessageId>,
    /// Deferred send time. Unset or not in the future means "send now".
    pub time: Option<ScheduledTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSms {
    id: MessageId,
    text: MessageText,
    recipients: Vec<RawPhoneNumber>,
    time: Option<ScheduledTime>,
}

impl SendSms {
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        text: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        if recipients.len() > SEND_SMS_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: SEND_SMS_MAX_RECIPIENTS,
                actual: recipients.len(),
            });
        }
        Ok(Self {
            id: options.id.unwrap_or_else(MessageId::generate),
            text,
            recipients,
            time: options.time,
        })
    }

    pub fn one(recipient: RawPhoneNumber, text: MessageText, options: SendOptions) -> Self {
        Self {
            id: options.id.unwrap_or_else(MessageId::generate),
            text,
            recipients: vec![recipient],
            time: options.time,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn time(&self) -> Option<ScheduledTime> {
        self.time
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Delivery report lookup for a previous send.
pub struct DeliveryReportQuery {
    id: MessageId,
    phone: Option<RawPhoneNumber>,
}

impl DeliveryReportQuery {
    /// Report for every number of the transaction.
    pub fn all(id: MessageId) -> Self {
        Self { id, phone: None }
    }

    /// Report for a single number of the transaction.
    pub fn for_phone(id: MessageId, phone: RawPhoneNumber) -> Self {
        Self {
            id,
            phone: Some(phone),
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn phone(&self) -> Option<&RawPhoneNumber> {
        self.phone.as_ref()
    }
}
