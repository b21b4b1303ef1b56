use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Payment state of an expense row.
///
/// The backend historically emitted "Yet to be Paid" for pending rows; the
/// alias keeps that legacy value deserializing as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseStatus {
    Paid,
    #[serde(alias = "Yet to be Paid")]
    Pending,
    Rejected,
}

/// One submitted expense row, as listed for the accountant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub project_id: String,
    pub project_manager: String,
    pub client_name: String,
    pub budget: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub vendor_name: String,
    pub amount: Decimal,
    pub status: ExpenseStatus,
    pub rejection_comment: Option<String>,
    pub payment_proof: Option<String>,
}

/// Summary row for one (project, client) pair: the aggregate the accountant
/// table shows collapsed, with the individual payments nested beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseGroup {
    pub project_id: String,
    pub project_manager: String,
    pub client_name: String,
    pub budget: Decimal,
    pub total_expense: Decimal,
    /// Detail rows, newest first.
    pub payments: Vec<Expense>,
}

impl ExpenseGroup {
    pub fn payment_count(&self) -> usize {
        self.payments.len()
    }
}

/// Short reference shown in tables: `EXP-` plus the last four characters
/// of the row id.
pub fn display_id(id: &str) -> String {
    let tail_start = id
        .char_indices()
        .rev()
        .nth(3)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    format!("EXP-{}", &id[tail_start..])
}

/// Groups flat expense rows by (project id, client name).
///
/// Manager and budget are taken from the first row seen for a group, the
/// total is the sum of row amounts, and each group's payments are sorted
/// date-descending. Groups come back in first-seen row order so the table
/// is stable across refreshes.
pub fn group_expenses(rows: &[Expense]) -> Vec<ExpenseGroup> {
    let mut groups: Vec<ExpenseGroup> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for row in rows {
        let key = (row.project_id.clone(), row.client_name.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(ExpenseGroup {
                project_id: row.project_id.clone(),
                project_manager: row.project_manager.clone(),
                client_name: row.client_name.clone(),
                budget: row.budget,
                total_expense: Decimal::ZERO,
                payments: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].total_expense += row.amount;
        groups[slot].payments.push(row.clone());
    }

    for group in &mut groups {
        group.payments.sort_by(|a, b| b.date.cmp(&a.date));
    }

    debug!(
        "Grouped {} expense row(s) into {} group(s)",
        rows.len(),
        groups.len()
    );
    groups
}
