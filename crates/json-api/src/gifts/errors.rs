//! Gift Errors

use salvo::http::StatusError;
use tracing::error;

use bazaar_app::domain::gifts::GiftsServiceError;

pub(crate) fn into_status_error(error: GiftsServiceError) -> StatusError {
    match error {
        error @ GiftsServiceError::NotEligible { .. } => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        GiftsServiceError::AlreadyClaimed => {
            StatusError::conflict().brief("Gift already claimed")
        }
        error @ GiftsServiceError::MissingField(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        GiftsServiceError::InvalidReference | GiftsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid gift claim")
        }
        GiftsServiceError::Sql(source) => {
            error!("gift storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn not_eligible_reports_progress() {
        let status = into_status_error(GiftsServiceError::NotEligible { kept: 3, threshold: 5 });

        assert_eq!(status.code, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status.brief, "3 of 5 products kept, gift not yet unlocked");
    }
}
