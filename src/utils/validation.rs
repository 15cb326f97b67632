use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

pub fn non_negative_amount(amount: &Decimal) -> std::result::Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some(Cow::Borrowed("Le montant doit être positif ou nul"));
        return Err(err);
    }
    Ok(())
}

pub fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::Borrowed("Ce champ est obligatoire"));
        return Err(err);
    }
    Ok(())
}
