//! Excel workbook rendering with `rust_xlsxwriter`.

use crate::report::{
    domain::{CollaboratorTally, ReportKind, TaskTally, UserTally},
    ports::{RenderError, RenderResult, ReportRenderer},
};
use crate::task::domain::{TaskStatus, TaskView};
use crate::user::domain::{User, UserRole, UserStatus};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_xlsxwriter::{ColNum, Color, Format, FormatAlign, RowNum, Workbook, Worksheet, XlsxError};

const HEADER_FILL: u32 = 0x003B_82F6;
const SUMMARY_FILL: u32 = 0x00F3_F4F6;

struct Column {
    header: &'static str,
    width: f64,
}

const fn column(header: &'static str, width: f64) -> Column {
    Column { header, width }
}

const USER_COLUMNS: [Column; 9] = [
    column("ID", 38.0),
    column("Nombre", 25.0),
    column("Email", 30.0),
    column("Tipo Documento", 18.0),
    column("Número Documento", 18.0),
    column("Rol", 15.0),
    column("Organización", 25.0),
    column("Estado", 12.0),
    column("Fecha Creación", 18.0),
];

const COLLABORATOR_COLUMNS: [Column; 5] = [
    column("ID Usuario", 38.0),
    column("Nombres Completos", 30.0),
    column("Correo Electrónico", 35.0),
    column("Organización", 25.0),
    column("Estado", 12.0),
];

const TASK_COLUMNS: [Column; 14] = [
    column("ID", 38.0),
    column("Título", 30.0),
    column("Descripción", 40.0),
    column("Área", 20.0),
    column("Colaborador", 25.0),
    column("Número Documento", 18.0),
    column("Email", 25.0),
    column("Fecha Asignación", 18.0),
    column("Hora Asignación", 15.0),
    column("Fecha Vencimiento", 18.0),
    column("Hora Vencimiento", 15.0),
    column("Estado", 15.0),
    column("Creado Por", 25.0),
    column("Fecha Creación", 18.0),
];

/// Renders reports as `.xlsx` workbooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReportRenderer;

impl XlsxReportRenderer {
    /// Creates a renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportRenderer for XlsxReportRenderer {
    fn render_users(&self, users: &[User]) -> RenderResult<Vec<u8>> {
        build(ReportKind::Users, |sheet| {
            sheet.header(&USER_COLUMNS)?;
            for user in users {
                sheet.text(0, user.id().to_string())?;
                sheet.text(1, user.name())?;
                sheet.text(2, user.email().as_str())?;
                sheet.text(3, user.document_type().map_or("", |kind| kind.as_str()))?;
                sheet.text(4, user.document_number().unwrap_or_default())?;
                sheet.badge(5, user.role().as_str(), role_colour(user.role()))?;
                sheet.text(6, user.organization())?;
                sheet.badge(7, user.status().as_str(), account_colour(user.status()))?;
                sheet.text(8, day(user.created_at().date_naive()))?;
                sheet.advance();
            }

            let tally = UserTally::of(users);
            sheet.summary("RESUMEN")?;
            sheet.count("Total de Usuarios:", tally.total)?;
            sheet.count("Activos:", tally.active)?;
            sheet.count("Inactivos:", tally.inactive)?;
            sheet.count("Administradores:", tally.administrators)?;
            sheet.count("Team Leaders:", tally.team_leaders)?;
            sheet.count("Colaboradores:", tally.collaborators)
        })
    }

    fn render_collaborators(
        &self,
        users: &[User],
        now: DateTime<FixedOffset>,
    ) -> RenderResult<Vec<u8>> {
        build(ReportKind::Collaborators, |sheet| {
            sheet.header(&COLLABORATOR_COLUMNS)?;
            for user in users {
                sheet.text(0, user.id().to_string())?;
                sheet.text(1, user.name())?;
                sheet.text(2, user.email().as_str())?;
                sheet.text(3, user.organization())?;
                sheet.badge(4, user.status().as_str(), account_colour(user.status()))?;
                sheet.advance();
            }

            let tally = CollaboratorTally::of(users);
            sheet.summary("RESUMEN DE INFORMACIÓN")?;
            sheet.count("Total de Colaboradores:", tally.total)?;
            sheet.pair(
                "Fecha de Generación:",
                now.format("%d/%m/%Y %H:%M:%S").to_string(),
            )?;
            sheet.pair("Organizaciones:", tally.organization_list())
        })
    }

    fn render_tasks(
        &self,
        views: &[TaskView],
        now: DateTime<FixedOffset>,
    ) -> RenderResult<Vec<u8>> {
        build(ReportKind::Tasks, |sheet| {
            sheet.header(&TASK_COLUMNS)?;
            for view in views {
                let task = &view.task;
                let schedule = task.schedule();
                let assignee = view.assignee.as_ref();
                let status = task.effective_status(now);

                sheet.text(0, task.id().to_string())?;
                sheet.text(1, task.title())?;
                sheet.text(2, task.description().unwrap_or_default())?;
                sheet.text(3, task.area().display_label())?;
                sheet.text(4, assignee.map_or("No asignado", |person| person.name.as_str()))?;
                sheet.text(
                    5,
                    assignee
                        .and_then(|person| person.document_number.as_deref())
                        .unwrap_or_default(),
                )?;
                sheet.text(6, assignee.map_or("", |person| person.email.as_str()))?;
                sheet.text(7, schedule.assigned_on.map(day).unwrap_or_default())?;
                sheet.text(8, schedule.assigned_at.map(clock_time).unwrap_or_default())?;
                sheet.text(9, schedule.due_on.map(day).unwrap_or_default())?;
                sheet.text(10, schedule.due_at.map(clock_time).unwrap_or_default())?;
                sheet.badge(11, status.as_str(), status_colour(status))?;
                sheet.text(
                    12,
                    view.creator
                        .as_ref()
                        .map_or("", |person| person.name.as_str()),
                )?;
                sheet.text(13, day(task.created_at().date_naive()))?;
                sheet.advance();
            }

            let tally = TaskTally::of(views, now);
            sheet.summary("RESUMEN")?;
            sheet.count("Total de Tareas:", tally.total)?;
            sheet.count("Asignadas:", tally.assigned)?;
            sheet.count("En Proceso:", tally.in_progress)?;
            sheet.count("Atrasadas:", tally.overdue)?;
            sheet.count("Finalizadas:", tally.finalized)
        })
    }
}

fn build<F>(kind: ReportKind, fill: F) -> RenderResult<Vec<u8>>
where
    F: FnOnce(&mut SheetWriter<'_>) -> Result<(), XlsxError>,
{
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(kind.sheet_name())
        .map_err(RenderError::workbook)?;
    fill(&mut SheetWriter::new(worksheet)).map_err(RenderError::workbook)?;
    workbook.save_to_buffer().map_err(RenderError::workbook)
}

/// Row cursor over one worksheet.
struct SheetWriter<'a> {
    sheet: &'a mut Worksheet,
    row: RowNum,
}

impl<'a> SheetWriter<'a> {
    const fn new(sheet: &'a mut Worksheet) -> Self {
        Self { sheet, row: 0 }
    }

    fn header(&mut self, columns: &[Column]) -> Result<(), XlsxError> {
        let format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center);
        for (index, spec) in (0..).zip(columns) {
            let col: ColNum = index;
            self.sheet
                .write_string_with_format(self.row, col, spec.header, &format)?;
            self.sheet.set_column_width(col, spec.width)?;
        }
        self.advance();
        Ok(())
    }

    fn text(&mut self, col: ColNum, value: impl Into<String>) -> Result<(), XlsxError> {
        self.sheet.write_string(self.row, col, value)?;
        Ok(())
    }

    fn badge(&mut self, col: ColNum, value: &str, fill: Color) -> Result<(), XlsxError> {
        let format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(fill);
        self.sheet
            .write_string_with_format(self.row, col, value, &format)?;
        Ok(())
    }

    fn summary(&mut self, title: &str) -> Result<(), XlsxError> {
        let format = Format::new()
            .set_bold()
            .set_font_size(14)
            .set_background_color(Color::RGB(SUMMARY_FILL));
        self.advance();
        self.sheet
            .write_string_with_format(self.row, 0, title, &format)?;
        self.advance();
        Ok(())
    }

    fn count(&mut self, label: &str, value: usize) -> Result<(), XlsxError> {
        self.sheet.write_string(self.row, 0, label)?;
        let number = u32::try_from(value).map_or(f64::from(u32::MAX), f64::from);
        self.sheet.write_number(self.row, 1, number)?;
        self.advance();
        Ok(())
    }

    fn pair(&mut self, label: &str, value: String) -> Result<(), XlsxError> {
        self.sheet.write_string(self.row, 0, label)?;
        self.sheet.write_string(self.row, 1, value)?;
        self.advance();
        Ok(())
    }

    const fn advance(&mut self) {
        self.row += 1;
    }
}

fn day(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn clock_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

const fn status_colour(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Assigned => Color::RGB(0x003B_82F6),
        TaskStatus::InProgress => Color::RGB(0x00F5_9E0B),
        TaskStatus::Overdue => Color::RGB(0x00EF_4444),
        TaskStatus::Finalized => Color::RGB(0x0010_B981),
    }
}

const fn account_colour(status: UserStatus) -> Color {
    match status {
        UserStatus::Active => Color::RGB(0x0010_B981),
        UserStatus::Inactive => Color::RGB(0x00EF_4444),
    }
}

const fn role_colour(role: UserRole) -> Color {
    match role {
        UserRole::Administrator => Color::RGB(0x007C_3AED),
        UserRole::TeamLeader => Color::RGB(0x0006_B6D4),
        UserRole::Collaborator => Color::RGB(0x0063_66F1),
    }
}
