pub mod admin;
pub mod availability;
pub mod booking;
pub mod catalog;

use chrono::NaiveDate;
use validator::ValidationError;

use crate::common::error::AppError;

// Checagem de consistência comum aos handlers com intervalo de datas.
pub(crate) fn validate_date_range(from: NaiveDate, to: NaiveDate) -> Result<(), AppError> {
    if from > to {
        let mut err = ValidationError::new("range");
        err.message = Some("'from' deve ser anterior ou igual a 'to'.".into());
        let mut errors = validator::ValidationErrors::new();
        errors.add("from", err);
        return Err(AppError::ValidationError(errors));
    }
    Ok(())
}
