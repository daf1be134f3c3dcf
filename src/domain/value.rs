use crate::domain::validation::ValidationError;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use phonenumber::country;

/// UTC offset of the gateway's wall clock (GMT+6, Asia/Bishkek).
pub const GATEWAY_UTC_OFFSET_SECS: i32 = 6 * 60 * 60;

/// Wall-clock format used by the gateway for every timestamp (`yyyyMMddHHmmss`).
pub const GATEWAY_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// The gateway's fixed UTC offset.
pub fn gateway_offset() -> FixedOffset {
    FixedOffset::east_opt(GATEWAY_UTC_OFFSET_SECS).expect("GMT+6 is a valid UTC offset")
}

/// Interpret a wall-clock time read off the gateway as a GMT+6 instant.
pub fn gateway_local_time(at: NaiveDateTime) -> DateTime<FixedOffset> {
    let utc = at - chrono::Duration::seconds(i64::from(GATEWAY_UTC_OFFSET_SECS));
    DateTime::from_naive_utc_and_offset(utc, gateway_offset())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway account login.
///
/// Invariant: non-empty after trimming.
pub struct Login(String);

impl Login {
    /// XML element name used by the gateway (`login`).
    pub const FIELD: &'static str = "login";

    /// Create a validated [`Login`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Gateway account password.
///
/// Invariant: not blank. The value is kept as provided, surrounding whitespace included.
pub struct Password(String);

impl Password {
    /// XML element name used by the gateway (`pwd`).
    pub const FIELD: &'static str = "pwd";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender name shown on the recipient's phone (`sender`).
///
/// Invariant: either up to 11 characters of `[A-Za-z0-9.-]` or up to 14 digits.
/// The name must also be approved by the gateway administrator.
pub struct SenderId(String);

impl SenderId {
    /// XML element name used by the gateway (`sender`).
    pub const FIELD: &'static str = "sender";

    /// Maximum length of an alphanumeric sender name.
    pub const MAX_ALPHANUMERIC_LEN: usize = 11;
    /// Maximum length of a numeric sender.
    pub const MAX_NUMERIC_LEN: usize = 14;

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let numeric = trimmed.bytes().all(|b| b.is_ascii_digit())
            && trimmed.len() <= Self::MAX_NUMERIC_LEN;
        let alphanumeric = trimmed
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
            && trimmed.len() <= Self::MAX_ALPHANUMERIC_LEN;
        if !numeric && !alphanumeric {
            return Err(ValidationError::InvalidSender {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming and at most [`MessageText::MAX_CHARS`] characters.
/// The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// XML element name used by the gateway (`text`).
    pub const FIELD: &'static str = "text";

    /// Maximum message length accepted by the gateway.
    pub const MAX_CHARS: usize = 800;

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let chars = value.chars().count();
        if chars > Self::MAX_CHARS {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: Self::MAX_CHARS,
                actual: chars,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Transaction id (`id`) chosen by the client for a send.
///
/// The gateway rejects a repeated id, so every send needs a fresh one.
/// Invariant: 1 to 12 ASCII alphanumeric characters.
pub struct MessageId(String);

impl MessageId {
    /// XML element name used by the gateway (`id`).
    pub const FIELD: &'static str = "id";

    /// Maximum id length accepted by the gateway.
    pub const MAX_LEN: usize = 12;

    const GENERATED_LEN: usize = 11;

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if trimmed.len() > Self::MAX_LEN || !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ValidationError::InvalidMessageId {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Generate a random id (11 lowercase hex characters).
    pub fn generate() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(Self::GENERATED_LEN);
        Self(id)
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number as sent to the gateway (`phone`), in `[+]<country><number>` form.
///
/// Invariant: optional leading `+` followed by digits only, after trimming. This type does
/// not normalize; if you want E.164 normalization, parse into [`PhoneNumber`] and convert it
/// into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// XML element name used by the gateway (`phone`).
    pub const FIELD: &'static str = "phone";

    /// Create a validated raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidPhoneNumber {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the gateway.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// XML element name used by the gateway (`phone`).
    pub const FIELD: &'static str = "phone";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix
    /// (the gateway's home region is `country::Id::KG`).
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Deferred send time (`time`), kept in the gateway's GMT+6 wall clock.
pub struct ScheduledTime(DateTime<FixedOffset>);

impl ScheduledTime {
    /// XML element name used by the gateway (`time`).
    pub const FIELD: &'static str = "time";

    /// Schedule at the given instant, whatever time zone it is expressed in.
    pub fn new<Tz: TimeZone>(at: DateTime<Tz>) -> Self {
        Self(at.with_timezone(&gateway_offset()))
    }

    /// Schedule at a wall-clock time in the gateway's time zone.
    pub fn from_gateway_local(at: NaiveDateTime) -> Self {
        Self(gateway_local_time(at))
    }

    /// The scheduled instant in the gateway's offset.
    pub fn value(self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Returns `true` if this time is strictly later than `now`.
    pub fn is_after<Tz: TimeZone>(self, now: &DateTime<Tz>) -> bool {
        self.0 > *now
    }

    /// Gateway wire representation (`yyyyMMddHHmmss` in GMT+6).
    pub fn to_gateway_string(self) -> String {
        self.0.format(GATEWAY_TIME_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Gateway status or report code.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct StatusCode(i32);

impl StatusCode {
    /// Construct a status code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by the gateway.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Returns `true` for `0`, the "request accepted" code of every gateway operation.
    pub fn is_ok(self) -> bool {
        self.0 == 0
    }
}
