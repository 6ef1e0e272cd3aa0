//! `?at=` parsing for time-dependent reads.

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

/// Resolve an optional RFC 3339 `at` query value, falling back to now.
///
/// Carts price coupons and returns check their window against this instant,
/// so tests and support staff can ask "what would this look like then".
pub(crate) trait PointInTimeExt {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError>;
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self) -> Result<Timestamp, StatusError> {
        parse_point_in_time(self.into_inner().as_deref())
    }
}

fn parse_point_in_time(value: Option<&str>) -> Result<Timestamp, StatusError> {
    match value.map(str::trim) {
        None | Some("") => Ok(Timestamp::now()),
        Some(value) => value.parse::<Timestamp>().map_err(|error| {
            StatusError::bad_request()
                .brief("could not parse \"at\" query parameter")
                .detail(error.to_string())
        }),
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn explicit_instant_is_used() -> TestResult {
        let at = parse_point_in_time(Some("2026-03-01T10:00:00+05:30"))?;

        assert_eq!(at, "2026-03-01T04:30:00Z".parse::<Timestamp>()?);

        Ok(())
    }

    #[test]
    fn blank_value_means_now() -> TestResult {
        let before = Timestamp::now();
        let at = parse_point_in_time(Some("  "))?;

        assert!(at >= before, "blank `at` should resolve to the current time");

        Ok(())
    }

    #[test]
    fn malformed_value_is_a_bad_request() {
        let result = parse_point_in_time(Some("yesterday"));

        assert!(
            matches!(result, Err(ref status) if status.code == StatusCode::BAD_REQUEST),
            "expected 400, got {result:?}"
        );
    }
}
