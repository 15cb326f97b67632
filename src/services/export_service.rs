use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use uuid::Uuid;

use crate::dto::page_dto::ExportFormat;
use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::models::payment::Payment;
use crate::services::aggregation::{total_paid, PaymentGroups};
use crate::utils::format::{format_currency, format_date};

const CANDIDATE_COLUMNS: [(&str, f64); 9] = [
    ("Nom", 20.0),
    ("Prénom", 20.0),
    ("Date de naissance", 18.0),
    ("Lieu de naissance", 22.0),
    ("Sexe", 12.0),
    ("CNAPS", 20.0),
    ("Niveau d'études", 20.0),
    ("Situation prof.", 24.0),
    ("Montant payé", 16.0),
];

const PAYMENT_COLUMNS: [(&str, f64); 7] = [
    ("Candidat", 28.0),
    ("Date", 14.0),
    ("Type", 12.0),
    ("Montant", 16.0),
    ("Mode", 18.0),
    ("Statut", 14.0),
    ("Notes", 40.0),
];

/// A sheet ready to be written as CSV or XLSX.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub sheet_name: &'static str,
    pub columns: &'static [(&'static str, f64)],
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn headers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }
}

pub struct ExportService;

impl ExportService {
    /// One row per candidate with the amount they paid so far.
    pub fn candidates_table(candidates: &[Candidate], groups: &PaymentGroups) -> ExportTable {
        let rows = candidates
            .iter()
            .map(|c| {
                vec![
                    c.last_name.clone(),
                    c.first_name.clone(),
                    format_date(c.birth_date),
                    c.birth_place.clone(),
                    c.sex.as_str().to_string(),
                    c.cnaps_number.clone(),
                    c.education_level.clone(),
                    c.professional_situation.clone(),
                    format_currency(total_paid(groups.get(&c.id))),
                ]
            })
            .collect();
        ExportTable {
            sheet_name: "Candidats",
            columns: &CANDIDATE_COLUMNS,
            rows,
        }
    }

    /// One row per payment; `candidates` resolves names, `N/A` otherwise.
    pub fn payments_table(payments: &[Payment], candidates: &[Candidate]) -> ExportTable {
        let rows = payments
            .iter()
            .map(|p| {
                let candidate = candidates
                    .iter()
                    .find(|c| c.id == p.candidate_id)
                    .map(Candidate::full_name)
                    .unwrap_or_else(|| "N/A".to_string());
                vec![
                    candidate,
                    format_date(p.date),
                    p.payment_type.as_str().to_string(),
                    format_currency(p.amount),
                    p.mode.as_str().to_string(),
                    p.status.label().to_string(),
                    p.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        ExportTable {
            sheet_name: "Paiements",
            columns: &PAYMENT_COLUMNS,
            rows,
        }
    }

    /// `candidats-{session id|tous}.csv` and the like.
    pub fn file_name(prefix: &str, session_id: Option<Uuid>, format: ExportFormat) -> String {
        let scope = session_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "tous".to_string());
        format!("{}-{}.{}", prefix, scope, format.extension())
    }

    pub fn render(table: &ExportTable, format: ExportFormat) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Csv => Self::to_csv(table),
            ExportFormat::Xlsx => Self::to_xlsx(table),
        }
    }

    /// Comma separated, header row first, quoted where needed.
    pub fn to_csv(table: &ExportTable) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(table.headers())?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| crate::error::Error::Io(e.into_error()))
    }

    pub fn to_xlsx(table: &ExportTable) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(table.sheet_name)?;

        let border_color = Color::RGB(0xE2E8F0);
        let header_format = Format::new()
            .set_bold()
            .set_background_color(Color::RGB(0xF1F5F9))
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        let cell_format = Format::new()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        for (col, (name, width)) in table.columns.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
            worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
        }

        for (idx, row) in table.rows.iter().enumerate() {
            let row_num = idx as u32 + 1;
            for (col, value) in row.iter().enumerate() {
                worksheet.write_string_with_format(row_num, col as u16, value, &cell_format)?;
            }
        }

        worksheet.set_freeze_panes(1, 0)?;
        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
