use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooManyRecipients { max: usize, actual: usize },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidPhoneNumber { input: String },
    InvalidSender { input: String },
    InvalidMessageId { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooManyRecipients { max, actual } => {
                write!(f, "too many recipients: {actual} (max {max})")
            }
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} chars (max {max})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidSender { input } => write!(
                f,
                "invalid sender: {input} (expected up to 11 of [A-Za-z0-9.-] or up to 14 digits)"
            ),
            Self::InvalidMessageId { input } => write!(
                f,
                "invalid message id: {input} (expected up to 12 alphanumeric chars)"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "login" };
        assert_eq!(err.to_string(), "login must not be empty");

        let err = ValidationError::TooManyRecipients {
            max: 50,
            actual: 51,
        };
        assert_eq!(err.to_string(), "too many recipients: 51 (max 50)");

        let err = ValidationError::TooLong {
            field: "text",
            max: 800,
            actual: 801,
        };
        assert_eq!(err.to_string(), "text is too long: 801 chars (max 800)");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::InvalidMessageId {
            input: "a-b".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid message id: a-b (expected up to 12 alphanumeric chars)"
        );
    }
}
