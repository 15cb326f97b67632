use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    /// Acompte.
    #[default]
    #[serde(rename = "acompte")]
    Advance,
    /// Solde.
    #[serde(rename = "solde")]
    Balance,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Advance => "acompte",
            PaymentType::Balance => "solde",
        }
    }
}

impl FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "acompte" => Ok(PaymentType::Advance),
            "solde" => Ok(PaymentType::Balance),
            other => Err(format!("unknown payment type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    #[default]
    #[serde(rename = "CPF")]
    Cpf,
    #[serde(rename = "Espèces")]
    Cash,
    #[serde(rename = "Virement FSIS")]
    FsisTransfer,
    #[serde(rename = "Habilitation")]
    Habilitation,
}

impl PaymentMode {
    /// Display order used by the revenue breakdown.
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Cpf,
        PaymentMode::Cash,
        PaymentMode::FsisTransfer,
        PaymentMode::Habilitation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cpf => "CPF",
            PaymentMode::Cash => "Espèces",
            PaymentMode::FsisTransfer => "Virement FSIS",
            PaymentMode::Habilitation => "Habilitation",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| format!("unknown payment mode '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    #[default]
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "En attente",
            PaymentStatus::Completed => "Complété",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "completed" => Ok(PaymentStatus::Completed),
            other => Err(format!("unknown payment status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub amount: Decimal,
    pub payment_type: PaymentType,
    pub mode: PaymentMode,
    pub date: NaiveDate,
    pub status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn apply(&mut self, update: &PaymentUpdate) {
        if let Some(v) = update.amount {
            self.amount = v;
        }
        if let Some(v) = update.payment_type {
            self.payment_type = v;
        }
        if let Some(v) = update.mode {
            self.mode = v;
        }
        if let Some(v) = update.date {
            self.date = v;
        }
        if let Some(v) = update.status {
            self.status = v;
        }
        if let Some(v) = &update.notes {
            self.notes = v.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub candidate_id: Uuid,
    pub amount: Decimal,
    pub payment_type: PaymentType,
    pub mode: PaymentMode,
    pub date: NaiveDate,
    pub status: PaymentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<PaymentMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    /// `Some(None)` clears the notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl PaymentUpdate {
    pub fn is_empty(&self) -> bool {
        *self == PaymentUpdate::default()
    }
}
