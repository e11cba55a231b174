//! Directory listing backing `GET /api/advocates`.

use crate::dto::api::AdvocatesResponse;
use crate::repository::{AdvocateListQuery, AdvocateReader};
use crate::services::ServiceResult;

/// Number of advocates returned when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: usize = 10;

/// Interprets the raw `limit` query parameter.
///
/// Absent means [`DEFAULT_LIMIT`]. Otherwise the leading integer is read after
/// optional whitespace and sign, ignoring trailing characters. A value without
/// digits, zero or a negative value yields `0`, meaning no records. Values too
/// large for `usize` saturate.
pub fn parse_limit(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };

    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = unsigned.bytes().take_while(u8::is_ascii_digit);
    let mut seen_digit = false;
    let value = digits.fold(0usize, |acc, digit| {
        seen_digit = true;
        acc.saturating_mul(10).saturating_add(usize::from(digit - b'0'))
    });

    if !seen_digit || negative { 0 } else { value }
}

/// Returns the first `limit` advocates in natural store order.
pub fn list_advocates<R>(repo: &R, limit: Option<&str>) -> ServiceResult<AdvocatesResponse>
where
    R: AdvocateReader + ?Sized,
{
    let limit = parse_limit(limit);

    let data = repo.list_advocates(AdvocateListQuery::new().limit(limit))?;

    Ok(AdvocatesResponse { data })
}
