//! Question bank — a read-only table mapping roles to ordered interview
//! prompts, loaded from an XLSX workbook at startup.

use std::path::Path;

use calamine::Reader;
use tracing::{error, warn};

const ROLE_COLUMN: &str = "Role";
const PROMPT_COLUMN: &str = "Transcript";

/// One row of the bank: a role and one interview prompt for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankEntry {
    pub role: String,
    pub prompt: String,
}

/// In-memory question bank. Loaded once; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    entries: Vec<BankEntry>,
}

impl QuestionBank {
    /// Loads the bank from the first sheet of an XLSX workbook.
    ///
    /// A missing file or a malformed workbook degrades to an empty bank with
    /// a logged warning so the API still serves; the interview routes then
    /// report no available roles instead of the process failing at startup.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            warn!(
                "Question bank not found at {}; starting with an empty bank",
                path.display()
            );
            return Self::default();
        }
        match Self::read_workbook(path) {
            Ok(bank) => bank,
            Err(e) => {
                error!("Failed to load question bank: {e}");
                Self::default()
            }
        }
    }

    /// Builds a bank from already-loaded rows.
    pub fn from_entries(entries: Vec<BankEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|entry| !entry.role.trim().is_empty())
            .collect();
        Self { entries }
    }

    fn read_workbook(path: &Path) -> anyhow::Result<Self> {
        let mut workbook = calamine::open_workbook_auto(path)?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("workbook has no sheets"))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header: Vec<String> = rows
            .next()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let (Some(role_idx), Some(prompt_idx)) = (
            header.iter().position(|name| name == ROLE_COLUMN),
            header.iter().position(|name| name == PROMPT_COLUMN),
        ) else {
            anyhow::bail!(
                "question bank format is incorrect: expected '{ROLE_COLUMN}' and \
                 '{PROMPT_COLUMN}' columns, found {header:?}"
            );
        };

        let entries = rows
            .map(|row| BankEntry {
                role: cell_text(row, role_idx),
                prompt: cell_text(row, prompt_idx),
            })
            .collect();
        Ok(Self::from_entries(entries))
    }

    /// Unique roles in bank order.
    pub fn roles(&self) -> Vec<String> {
        let mut roles: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !roles.contains(&entry.role) {
                roles.push(entry.role.clone());
            }
        }
        roles
    }

    /// Ordered prompts for `role`, with blank entries excluded. This is the
    /// queue handed to `InterviewSession::start`.
    pub fn questions_for(&self, role: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.role == role && !entry.prompt.trim().is_empty())
            .map(|entry| entry.prompt.clone())
            .collect()
    }

    pub fn contains_role(&self, role: &str) -> bool {
        self.entries.iter().any(|entry| entry.role == role)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cell_text(row: &[calamine::Data], idx: usize) -> String {
    row.get(idx)
        .map(|cell| cell.to_string().trim().to_string())
        .unwrap_or_default()
}
