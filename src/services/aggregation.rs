//! Derived figures computed from fetched records: totals, per-candidate
//! grouping, payment standing and the dashboard breakdowns.
//!
//! Everything here is pure and total. Empty input yields zero or an empty
//! collection.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::candidate::Candidate;
use crate::models::payment::{Payment, PaymentMode, PaymentStatus};

fn sum_with_status(payments: &[Payment], status: PaymentStatus) -> Decimal {
    payments
        .iter()
        .filter(|p| p.status == status)
        .map(|p| p.amount)
        .sum()
}

/// Sum of the completed payments.
pub fn total_paid(payments: &[Payment]) -> Decimal {
    sum_with_status(payments, PaymentStatus::Completed)
}

/// Sum of the payments still awaiting settlement.
pub fn total_pending(payments: &[Payment]) -> Decimal {
    sum_with_status(payments, PaymentStatus::Pending)
}

/// Paid, pending and their sum, as shown above a candidate's payments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    pub paid: Decimal,
    pub pending: Decimal,
    pub total: Decimal,
}

pub fn summarize(payments: &[Payment]) -> PaymentSummary {
    let paid = total_paid(payments);
    let pending = total_pending(payments);
    PaymentSummary {
        paid,
        pending,
        total: paid + pending,
    }
}

/// Payments bucketed by candidate.
///
/// Groups keep their input order and are iterated in the order their
/// candidate was first seen (or seeded).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentGroups {
    order: Vec<Uuid>,
    groups: HashMap<Uuid, Vec<Payment>>,
}

impl PaymentGroups {
    /// Starts every listed candidate with an empty group.
    pub fn seeded<I>(candidate_ids: I) -> Self
    where
        I: IntoIterator<Item = Uuid>,
    {
        let mut groups = Self::default();
        for id in candidate_ids {
            groups.ensure(id);
        }
        groups
    }

    fn ensure(&mut self, candidate_id: Uuid) -> &mut Vec<Payment> {
        if !self.groups.contains_key(&candidate_id) {
            self.order.push(candidate_id);
        }
        self.groups.entry(candidate_id).or_default()
    }

    /// Appends at the end of the candidate's group.
    pub fn push(&mut self, payment: Payment) {
        self.ensure(payment.candidate_id).push(payment);
    }

    /// Inserts at the head of the candidate's group, the way a freshly
    /// created payment shows up in the list.
    pub fn prepend(&mut self, payment: Payment) {
        self.ensure(payment.candidate_id).insert(0, payment);
    }

    /// Removes a payment wherever it is. Returns the removed record.
    pub fn remove(&mut self, payment_id: Uuid) -> Option<Payment> {
        for group in self.groups.values_mut() {
            if let Some(pos) = group.iter().position(|p| p.id == payment_id) {
                return Some(group.remove(pos));
            }
        }
        None
    }

    /// Replaces a payment in place, keeping its position.
    pub fn replace(&mut self, payment: Payment) -> bool {
        match self
            .groups
            .get_mut(&payment.candidate_id)
            .and_then(|group| group.iter_mut().find(|p| p.id == payment.id))
        {
            Some(slot) => {
                *slot = payment;
                true
            }
            None => {
                // The candidate may have changed; drop the stale copy first.
                let moved = self.remove(payment.id).is_some();
                if moved {
                    self.push(payment);
                }
                moved
            }
        }
    }

    /// The candidate's payments, empty when unknown.
    pub fn get(&self, candidate_id: &Uuid) -> &[Payment] {
        self.groups
            .get(candidate_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &[Payment])> {
        self.order
            .iter()
            .map(move |id| (id, self.get(id)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

pub fn group_by_candidate(payments: &[Payment]) -> PaymentGroups {
    let mut groups = PaymentGroups::default();
    for payment in payments {
        groups.push(payment.clone());
    }
    groups
}

/// Where a candidate stands with respect to payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStanding {
    Unpaid,
    PartiallyPaid,
    Paid,
}

/// Classifies a candidate from their payments.
///
/// Zero collected wins over anything pending: a candidate whose only
/// payment is pending counts as unpaid.
pub fn classify(payments: &[Payment]) -> PaymentStanding {
    if total_paid(payments).is_zero() {
        PaymentStanding::Unpaid
    } else if payments.iter().any(|p| p.status == PaymentStatus::Pending) {
        PaymentStanding::PartiallyPaid
    } else {
        PaymentStanding::Paid
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub total_candidates: usize,
    pub paid_count: usize,
    pub pending_count: usize,
    pub unpaid_count: usize,
}

pub fn session_stats(candidates: &[Candidate], groups: &PaymentGroups) -> SessionStats {
    let mut stats = SessionStats {
        total_candidates: candidates.len(),
        ..Default::default()
    };
    for candidate in candidates {
        match classify(groups.get(&candidate.id)) {
            PaymentStanding::Unpaid => stats.unpaid_count += 1,
            PaymentStanding::PartiallyPaid => stats.pending_count += 1,
            PaymentStanding::Paid => stats.paid_count += 1,
        }
    }
    stats
}

/// Share of candidates who paid something, as a rounded percentage.
pub fn collection_rate(stats: &SessionStats) -> u32 {
    if stats.total_candidates == 0 {
        return 0;
    }
    let ratio = (stats.paid_count + stats.pending_count) as f64 / stats.total_candidates as f64;
    (ratio * 100.0).round() as u32
}

/// Keeps only the payments that belong to one of `candidates`.
pub fn payments_for_candidates(payments: &[Payment], candidates: &[Candidate]) -> Vec<Payment> {
    payments
        .iter()
        .filter(|p| candidates.iter().any(|c| c.id == p.candidate_id))
        .cloned()
        .collect()
}

/// Completed revenue per payment mode, every mode listed even when zero.
pub fn revenue_by_mode(payments: &[Payment]) -> Vec<(PaymentMode, Decimal)> {
    PaymentMode::ALL
        .into_iter()
        .map(|mode| {
            let amount = payments
                .iter()
                .filter(|p| p.status == PaymentStatus::Completed && p.mode == mode)
                .map(|p| p.amount)
                .sum();
            (mode, amount)
        })
        .collect()
}

pub fn revenue_total(breakdown: &[(PaymentMode, Decimal)]) -> Decimal {
    breakdown.iter().map(|(_, amount)| *amount).sum()
}

/// Candidates with nothing collected, sorted by last name.
pub fn unpaid_candidates<'a>(
    candidates: &'a [Candidate],
    groups: &PaymentGroups,
) -> Vec<&'a Candidate> {
    let mut unpaid: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| total_paid(groups.get(&c.id)).is_zero())
        .collect();
    unpaid.sort_by_key(|c| c.last_name.to_lowercase());
    unpaid
}


#[cfg(test)]
mod tests {
    use super::fixtures::{amount, candidate, payment};
    use super::*;

    #[test]
    fn summary_adds_paid_and_pending() {
        let id = Uuid::new_v4();
        let summary = summarize(&[
            payment(id, "100", PaymentStatus::Completed),
            payment(id, "50", PaymentStatus::Pending),
        ]);
        assert_eq!(summary.paid, amount("100"));
        assert_eq!(summary.pending, amount("50"));
        assert_eq!(summary.total, amount("150"));
    }

    #[test]
    fn totals_on_empty_input_are_zero() {
        assert_eq!(total_paid(&[]), Decimal::ZERO);
        assert_eq!(total_pending(&[]), Decimal::ZERO);
        assert!(group_by_candidate(&[]).is_empty());
    }

    #[test]
    fn paid_and_pending_add_up_to_the_whole() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let payments = vec![
            payment(a, "100", PaymentStatus::Completed),
            payment(a, "50", PaymentStatus::Pending),
            payment(b, "12.34", PaymentStatus::Completed),
            payment(b, "0", PaymentStatus::Pending),
        ];
        let whole: Decimal = payments.iter().map(|p| p.amount).sum();
        assert_eq!(total_paid(&payments) + total_pending(&payments), whole);
        assert!(total_paid(&payments) >= Decimal::ZERO);
        assert!(total_pending(&payments) >= Decimal::ZERO);
    }

    #[test]
    fn scenario_b_totals() {
        let c = Uuid::new_v4();
        let payments = vec![
            payment(c, "100", PaymentStatus::Completed),
            payment(c, "50", PaymentStatus::Pending),
        ];
        assert_eq!(total_paid(&payments), amount("100"));
        assert_eq!(total_pending(&payments), amount("50"));
        assert_eq!(classify(&payments), PaymentStanding::PartiallyPaid);
    }

    #[test]
    fn no_payments_means_unpaid() {
        assert_eq!(classify(&[]), PaymentStanding::Unpaid);
    }

    #[test]
    fn pending_only_is_still_unpaid() {
        let c = Uuid::new_v4();
        let payments = vec![payment(c, "80", PaymentStatus::Pending)];
        assert_eq!(classify(&payments), PaymentStanding::Unpaid);
    }

    #[test]
    fn completed_only_is_paid() {
        let c = Uuid::new_v4();
        let payments = vec![payment(c, "80", PaymentStatus::Completed)];
        assert_eq!(classify(&payments), PaymentStanding::Paid);
    }

    #[test]
    fn grouping_partitions_and_keeps_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let payments = vec![
            payment(b, "1", PaymentStatus::Completed),
            payment(a, "2", PaymentStatus::Completed),
            payment(b, "3", PaymentStatus::Pending),
            payment(a, "4", PaymentStatus::Completed),
        ];
        let groups = group_by_candidate(&payments);

        let order: Vec<Uuid> = groups.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![b, a]);

        let b_amounts: Vec<Decimal> = groups.get(&b).iter().map(|p| p.amount).collect();
        assert_eq!(b_amounts, vec![amount("1"), amount("3")]);

        let flattened: Vec<Uuid> = groups
            .iter()
            .flat_map(|(_, group)| group.iter().map(|p| p.id))
            .collect();
        assert_eq!(flattened.len(), payments.len());
        for p in &payments {
            assert_eq!(flattened.iter().filter(|id| **id == p.id).count(), 1);
        }
    }

    #[test]
    fn seeded_groups_exist_for_candidates_without_payments() {
        let a = Uuid::new_v4();
        let groups = PaymentGroups::seeded([a]);
        assert_eq!(groups.len(), 1);
        assert!(groups.get(&a).is_empty());
        assert!(groups.get(&Uuid::new_v4()).is_empty());
    }

    #[test]
    fn removing_a_payment_drops_it_from_the_totals() {
        let c = Uuid::new_v4();
        let kept = payment(c, "100", PaymentStatus::Completed);
        let removed = payment(c, "40", PaymentStatus::Completed);
        let mut groups = group_by_candidate(&[kept, removed.clone()]);
        assert_eq!(total_paid(groups.get(&c)), amount("140"));

        assert!(groups.remove(removed.id).is_some());
        assert_eq!(total_paid(groups.get(&c)), amount("100"));
        assert!(groups.remove(removed.id).is_none());
    }

    #[test]
    fn replace_moves_payment_to_its_new_candidate() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let original = payment(a, "10", PaymentStatus::Completed);
        let mut groups = group_by_candidate(&[original.clone()]);

        let mut moved = original.clone();
        moved.candidate_id = b;
        assert!(groups.replace(moved));
        assert!(groups.get(&a).is_empty());
        assert_eq!(groups.get(&b).len(), 1);
    }

    #[test]
    fn stats_and_collection_rate() {
        let session = Uuid::new_v4();
        let paid = candidate(session, "Bernard");
        let partial = candidate(session, "Arnaud");
        let unpaid = candidate(session, "Caron");
        let payments = vec![
            payment(paid.id, "300", PaymentStatus::Completed),
            payment(partial.id, "100", PaymentStatus::Completed),
            payment(partial.id, "200", PaymentStatus::Pending),
            payment(unpaid.id, "50", PaymentStatus::Pending),
        ];
        let candidates = vec![paid, partial, unpaid];
        let groups = group_by_candidate(&payments);
        let stats = session_stats(&candidates, &groups);

        assert_eq!(
            stats,
            SessionStats {
                total_candidates: 3,
                paid_count: 1,
                pending_count: 1,
                unpaid_count: 1,
            }
        );
        assert_eq!(collection_rate(&stats), 67);
        assert_eq!(collection_rate(&SessionStats::default()), 0);

        let unpaid_names: Vec<&str> = unpaid_candidates(&candidates, &groups)
            .into_iter()
            .map(|c| c.last_name.as_str())
            .collect();
        assert_eq!(unpaid_names, vec!["Caron"]);
    }

    #[test]
    fn revenue_lists_every_mode_and_ignores_pending() {
        let c = Uuid::new_v4();
        let mut cash = payment(c, "40", PaymentStatus::Completed);
        cash.mode = PaymentMode::Cash;
        let mut pending_cash = payment(c, "999", PaymentStatus::Pending);
        pending_cash.mode = PaymentMode::Cash;
        let cpf = payment(c, "60", PaymentStatus::Completed);

        let breakdown = revenue_by_mode(&[cash, pending_cash, cpf]);
        assert_eq!(
            breakdown,
            vec![
                (PaymentMode::Cpf, amount("60")),
                (PaymentMode::Cash, amount("40")),
                (PaymentMode::FsisTransfer, Decimal::ZERO),
                (PaymentMode::Habilitation, Decimal::ZERO),
            ]
        );
        assert_eq!(revenue_total(&breakdown), amount("100"));
    }

    #[test]
    fn restricts_payments_to_session_candidates() {
        let session = Uuid::new_v4();
        let inside = candidate(session, "Dupont");
        let outside = Uuid::new_v4();
        let payments = vec![
            payment(inside.id, "10", PaymentStatus::Completed),
            payment(outside, "20", PaymentStatus::Completed),
        ];
        let scoped = payments_for_candidates(&payments, &[inside.clone()]);
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].candidate_id, inside.id);
    }
}
