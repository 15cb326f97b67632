use serde::Serialize;

use crate::dto::session_dto::SessionResponse;
use crate::models::session::Session;
use crate::pages::dashboard::DashboardPage;
use crate::services::aggregation::{revenue_total, SessionStats};
use crate::utils::format::format_currency;
use crate::views::candidates::CandidateItem;
use crate::views::PageMeta;

pub const SELECT_SESSION: &str = "Sélectionnez une session pour voir le tableau de bord";

#[derive(Debug, Clone, Serialize)]
pub struct StatTile {
    pub label: &'static str,
    pub value: usize,
}

fn tiles(stats: &SessionStats) -> Vec<StatTile> {
    vec![
        StatTile { label: "Total candidats", value: stats.total_candidates },
        StatTile { label: "Complètement payés", value: stats.paid_count },
        StatTile { label: "Paiement partiel", value: stats.pending_count },
        StatTile { label: "Non payés", value: stats.unpaid_count },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueLine {
    pub mode: &'static str,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub placeholder: Option<&'static str>,
    pub session: Option<SessionResponse>,
    pub stats: SessionStats,
    pub tiles: Vec<StatTile>,
    pub revenue_by_mode: Vec<RevenueLine>,
    pub revenue_total: String,
    /// "67%"
    pub collection_rate: String,
    pub unpaid_candidates: Vec<CandidateItem>,
}

impl DashboardView {
    pub fn build(page: &DashboardPage, selected: Option<&Session>) -> Self {
        let meta = PageMeta::from(page.status());
        let Some(session) = selected else {
            return Self {
                meta,
                placeholder: Some(SELECT_SESSION),
                session: None,
                stats: SessionStats::default(),
                tiles: Vec::new(),
                revenue_by_mode: Vec::new(),
                revenue_total: format_currency(Default::default()),
                collection_rate: "0%".to_string(),
                unpaid_candidates: Vec::new(),
            };
        };

        let stats = page.stats();
        let revenue = page.revenue_by_mode();
        Self {
            meta,
            placeholder: None,
            session: Some(SessionResponse::from(session)),
            tiles: tiles(&stats),
            stats,
            revenue_total: format_currency(revenue_total(&revenue)),
            revenue_by_mode: revenue
                .into_iter()
                .map(|(mode, amount)| RevenueLine {
                    mode: mode.as_str(),
                    amount: format_currency(amount),
                })
                .collect(),
            collection_rate: format!("{}%", page.collection_rate()),
            unpaid_candidates: page.unpaid_candidates().iter().map(CandidateItem::from).collect(),
        }
    }
}
