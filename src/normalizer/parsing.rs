//! Field-level parsers used by the normalizer.
//!
//! Each parser takes a classified `RawField` and returns `Ok(None)` when the
//! field is absent, so that absence and malformation stay distinguishable.

use crate::error::RecordRejected;
use crate::record::{RawField, Rating};

/// Parses a currency-prefixed price such as `"£51.77"`.
///
/// At most one symbol from `symbols` is stripped. Unprefixed amounts and JSON
/// numbers are accepted as they are.
pub fn parse_price(field: RawField<'_>, symbols: &[String]) -> Result<Option<f64>, RecordRejected> {
    let value = match field {
        RawField::Absent => return Ok(None),
        RawField::Number(value) => value,
        RawField::Text(text) => {
            let amount = symbols
                .iter()
                .find_map(|symbol| text.strip_prefix(symbol.as_str()))
                .unwrap_or(text);
            amount
                .trim()
                .parse::<f64>()
                .map_err(|_| RecordRejected::InvalidPrice(text.to_string()))?
        }
        RawField::Other(value) => return Err(RecordRejected::InvalidPrice(value.to_string())),
    };

    if !value.is_finite() {
        return Err(RecordRejected::InvalidPrice(value.to_string()));
    }
    if value < 0.0 {
        return Err(RecordRejected::NegativePrice(value));
    }
    // "-0.00" parses as negative zero; store it as plain zero.
    Ok(Some(value + 0.0))
}

/// Maps the `One`..`Five` token onto a `Rating`.
pub fn parse_rating(field: RawField<'_>) -> Result<Option<Rating>, RecordRejected> {
    match field {
        RawField::Absent => Ok(None),
        RawField::Text(token) => token.parse().map(Some),
        RawField::Number(value) => Err(RecordRejected::UnknownRating(value.to_string())),
        RawField::Other(value) => Err(RecordRejected::UnknownRating(value.to_string())),
    }
}

/// Reads a supplied popularity. `Ok(None)` means the caller should derive one.
pub fn parse_popularity(field: RawField<'_>) -> Result<Option<f64>, RecordRejected> {
    match field {
        RawField::Absent => Ok(None),
        RawField::Number(value) => Ok(Some(value)),
        RawField::Text(text) => text
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Some)
            .ok_or_else(|| RecordRejected::InvalidPopularity(text.to_string())),
        RawField::Other(value) => Err(RecordRejected::InvalidPopularity(value.to_string())),
    }
}

/// Lenient year parser: `2016`, `"2016"` and `"14/06/2016"` all yield 2016,
/// anything else (`"N/A"`) yields `None`.
pub fn parse_year(field: RawField<'_>) -> Option<i32> {
    match field {
        RawField::Number(value) if value.fract() == 0.0 => Some(value as i32),
        RawField::Text(text) => text.rsplit('/').next()?.trim().parse().ok(),
        _ => None,
    }
}

/// Extracts the stock count from text such as `"In stock (22 available)"`.
pub fn parse_in_stock(field: RawField<'_>) -> Option<u32> {
    match field {
        RawField::Number(value) if value >= 0.0 && value.fract() == 0.0 => Some(value as u32),
        RawField::Text(text) => {
            let digits: String = text
                .chars()
                .skip_while(|c| !c.is_ascii_digit())
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}
