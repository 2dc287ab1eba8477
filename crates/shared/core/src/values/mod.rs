use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Risk score reported by a detection run - uses Decimal so full-range
/// (fractional) scores and integer attenuation scores share one type
pub type RiskScore = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Calendar day a key package was published for
pub type DayId = NaiveDate;
