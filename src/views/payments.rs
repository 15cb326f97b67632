use serde::Serialize;
use uuid::Uuid;

use crate::models::payment::Payment;
use crate::pages::payments::PaymentsPage;
use crate::services::aggregation::{total_paid, PaymentSummary};
use crate::utils::format::{format_currency, format_date};
use crate::views::PageMeta;

pub const SELECT_SESSION: &str = "Sélectionnez une session pour voir les paiements";
pub const SELECT_CANDIDATE: &str = "Sélectionnez un candidat pour voir ses paiements";
pub const NO_PAYMENTS: &str = "Aucun paiement enregistré";

#[derive(Debug, Clone, Serialize)]
pub struct PaymentItem {
    #[serde(flatten)]
    pub payment: Payment,
    pub amount_label: String,
    pub date_label: String,
    pub status_label: &'static str,
}

impl From<&Payment> for PaymentItem {
    fn from(payment: &Payment) -> Self {
        Self {
            amount_label: format_currency(payment.amount),
            date_label: format_date(payment.date),
            status_label: payment.status.label(),
            payment: payment.clone(),
        }
    }
}

/// One entry of the candidate column: name and what they paid so far.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateEntry {
    pub id: Uuid,
    pub full_name: String,
    pub paid_label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub paid: String,
    pub pending: String,
    pub total: String,
}

impl From<PaymentSummary> for SummaryView {
    fn from(summary: PaymentSummary) -> Self {
        Self {
            paid: format_currency(summary.paid),
            pending: format_currency(summary.pending),
            total: format_currency(summary.total),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectedCandidateView {
    pub id: Uuid,
    pub full_name: String,
    pub summary: SummaryView,
    pub payments: Vec<PaymentItem>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentsView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub placeholder: Option<&'static str>,
    pub candidates: Vec<CandidateEntry>,
    pub selected: Option<SelectedCandidateView>,
    pub candidate_prompt: Option<&'static str>,
}

impl PaymentsView {
    pub fn build(page: &PaymentsPage, session_selected: bool) -> Self {
        let meta = PageMeta::from(page.status());
        if !session_selected {
            return Self {
                meta,
                placeholder: Some(SELECT_SESSION),
                candidates: Vec::new(),
                selected: None,
                candidate_prompt: None,
            };
        }

        let selected_id = page.selected_candidate().map(|c| c.id);
        let candidates = page
            .candidates()
            .iter()
            .map(|c| CandidateEntry {
                id: c.id,
                full_name: c.full_name(),
                paid_label: format_currency(total_paid(page.payments_of(&c.id))),
                selected: Some(c.id) == selected_id,
            })
            .collect();

        let selected = page.selected_candidate().map(|c| {
            let payments: Vec<PaymentItem> =
                page.payments_of(&c.id).iter().map(PaymentItem::from).collect();
            SelectedCandidateView {
                id: c.id,
                full_name: c.full_name(),
                summary: page.summary().unwrap_or_default().into(),
                empty_message: payments.is_empty().then_some(NO_PAYMENTS),
                payments,
            }
        });

        Self {
            meta,
            placeholder: None,
            candidate_prompt: selected.is_none().then_some(SELECT_CANDIDATE),
            candidates,
            selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payment::PaymentStatus;
    use crate::services::aggregation::fixtures::payment;

    #[test]
    fn without_session_only_the_placeholder_is_shown() {
        let view = PaymentsView::build(&PaymentsPage::default(), false);
        assert_eq!(view.placeholder, Some(SELECT_SESSION));
        assert!(view.candidates.is_empty());
        assert!(view.candidate_prompt.is_none());
    }

    #[test]
    fn session_without_selection_prompts_for_a_candidate() {
        let view = PaymentsView::build(&PaymentsPage::default(), true);
        assert!(view.placeholder.is_none());
        assert_eq!(view.candidate_prompt, Some(SELECT_CANDIDATE));
    }

    #[test]
    fn payment_item_formats_amount_and_status() {
        let p = payment(Uuid::new_v4(), "1234.5", PaymentStatus::Pending);
        let item = PaymentItem::from(&p);
        assert_eq!(item.amount_label, "1\u{202F}234,50\u{A0}€");
        assert_eq!(item.date_label, "06/01/2026");
        assert_eq!(item.status_label, "En attente");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["payment_type"], "acompte");
    }
}
