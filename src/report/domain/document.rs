//! Rendered spreadsheet documents.

use chrono::NaiveDate;

/// MIME type of every exported workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Kind of exported workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Account listing.
    Users,
    /// Collaborators of one organization.
    Collaborators,
    /// Task listing.
    Tasks,
}

impl ReportKind {
    /// Returns the worksheet name.
    #[must_use]
    pub const fn sheet_name(self) -> &'static str {
        match self {
            Self::Users => "Usuarios",
            Self::Collaborators => "Colaboradores",
            Self::Tasks => "Reporte de Tareas",
        }
    }

    /// Returns the attachment filename for a workbook generated on `date`.
    #[must_use]
    pub fn filename(self, date: NaiveDate) -> String {
        let stamp = date.format("%Y-%m-%d");
        match self {
            Self::Users => format!("usuarios_{stamp}.xlsx"),
            Self::Collaborators => format!("informacion-colaboradores-{stamp}.xlsx"),
            Self::Tasks => format!("reporte_tareas_{stamp}.xlsx"),
        }
    }
}

/// A rendered workbook ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    kind: ReportKind,
    generated_on: NaiveDate,
    bytes: Vec<u8>,
}

impl ReportDocument {
    /// Wraps rendered workbook bytes.
    #[must_use]
    pub const fn new(kind: ReportKind, generated_on: NaiveDate, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            generated_on,
            bytes,
        }
    }

    /// Returns the report kind.
    #[must_use]
    pub const fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Returns the generation date.
    #[must_use]
    pub const fn generated_on(&self) -> NaiveDate {
        self.generated_on
    }

    /// Returns the attachment filename.
    #[must_use]
    pub fn filename(&self) -> String {
        self.kind.filename(self.generated_on)
    }

    /// Returns the workbook bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the document, returning the workbook bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
