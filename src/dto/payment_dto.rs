use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::payment::{NewPayment, PaymentMode, PaymentStatus, PaymentType, PaymentUpdate};
use crate::utils::time::today;

/// Body of the payment form. Without `candidate_id` the payment goes to the
/// candidate selected in the payments view.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentFormPayload {
    pub candidate_id: Option<Uuid>,
    #[validate(custom(function = "crate::utils::validation::non_negative_amount"))]
    pub amount: Decimal,
    #[serde(default)]
    pub payment_type: PaymentType,
    #[serde(default)]
    pub mode: PaymentMode,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PaymentStatus,
    pub notes: Option<String>,
}

impl PaymentFormPayload {
    pub fn into_new_payment(self, candidate_id: Uuid) -> NewPayment {
        NewPayment {
            candidate_id,
            amount: self.amount,
            payment_type: self.payment_type,
            mode: self.mode,
            date: self.date.unwrap_or_else(today),
            status: self.status,
            notes: normalize_notes(self.notes),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePaymentPayload {
    #[validate(custom(function = "crate::utils::validation::non_negative_amount"))]
    pub amount: Option<Decimal>,
    pub payment_type: Option<PaymentType>,
    pub mode: Option<PaymentMode>,
    pub date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
    /// A blank note clears the stored one.
    pub notes: Option<String>,
}

impl From<UpdatePaymentPayload> for PaymentUpdate {
    fn from(payload: UpdatePaymentPayload) -> Self {
        PaymentUpdate {
            amount: payload.amount,
            payment_type: payload.payment_type,
            mode: payload.mode,
            date: payload.date,
            status: payload.status,
            notes: payload.notes.map(|n| normalize_notes(Some(n))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectCandidatePayload {
    pub candidate_id: Uuid,
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
