use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap,
};
use ratatui::Frame;

use crate::config::{RosterKind, Settings};
use crate::error::RosterError;
use crate::models::{Employee, RecordId, Student};
use crate::roster::{
    EmployeeFilter, EmployeeSummary, Record, Selection, Store, StudentFilter, StudentSummary,
};
use crate::TRACING_TARGET_UI;

use super::forms::{ConfirmDelete, FormField, RecordForm};
use super::helpers::{centered_rect, clamp_selection, surface_error};
use super::screens::{
    other_screen, tab_index, tab_titles, table_title, TableRow, COLUMN_WIDTHS,
};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Share of the body width given to the record table; reports get the rest.
const TABLE_PERCENT: u16 = 62;

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    Adding(RecordForm),
    Editing { id: RecordId, form: RecordForm },
    ConfirmDelete(ConfirmDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Each roster lives in its
/// own store for the whole session.
pub struct App {
    students: Store<Student>,
    employees: Store<Employee>,
    settings: Settings,
    screen: RosterKind,
    selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            students: Store::new(),
            employees: Store::new(),
            screen: settings.start,
            settings,
            selected: 0,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn students(&self) -> &Store<Student> {
        &self.students
    }

    pub fn employees(&self) -> &Store<Employee> {
        &self.employees
    }

    pub fn screen(&self) -> RosterKind {
        self.screen
    }

    /// Route a key press to the active mode. Returns `true` when the user asked
    /// to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Adding(form) => self.handle_form(code, None, form)?,
            Mode::Editing { id, form } => self.handle_form(code, Some(id), form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Tab | KeyCode::BackTab => self.switch_screen(other_screen(self.screen)),
            KeyCode::Char('1') => self.switch_screen(RosterKind::Students),
            KeyCode::Char('2') => self.switch_screen(RosterKind::Employees),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char('n') | KeyCode::Char('+') => {
                return Ok(Mode::Adding(RecordForm::new(self.screen)));
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(form) = self.edit_form_for_selection() {
                    if let Some(id) = self.selected_id() {
                        return Ok(Mode::Editing { id, form });
                    }
                }
                self.set_status("No record selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(confirm) = self.confirm_for_selection() {
                    return Ok(Mode::ConfirmDelete(confirm));
                }
                self.set_status("No record selected to delete.", StatusKind::Error);
            }
            KeyCode::Char('f') => self.apply_filter(),
            KeyCode::Char('a') => {
                self.show_all();
                self.set_status("Showing all records.", StatusKind::Info);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_form(
        &mut self,
        code: KeyCode,
        editing: Option<RecordId>,
        mut form: RecordForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                let message = if editing.is_some() {
                    "Edit cancelled."
                } else {
                    "Add cancelled."
                };
                self.set_status(message, StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let saved = match editing {
                    Some(id) => self.save_existing(id, &form),
                    None => self.save_new(&form),
                };
                match saved {
                    Ok(()) => return Ok(Mode::Normal),
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
            }
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }

        Ok(match editing {
            Some(id) => Mode::Editing { id, form },
            None => Mode::Adding(form),
        })
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Err(err) = self.perform_delete(&confirm) {
                    self.set_status(surface_error(&err), StatusKind::Error);
                }
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_content(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Adding(form) => self.draw_form(frame, area, "Add", form),
            Mode::Editing { form, .. } => self.draw_form(frame, area, "Edit", form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_content(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let tabs = Tabs::new(tab_titles().to_vec())
            .select(tab_index(self.screen))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, rows[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(TABLE_PERCENT),
                Constraint::Percentage(100 - TABLE_PERCENT),
            ])
            .split(rows[1]);

        // Reports always cover the full roster, whatever the table shows.
        let report_lines = match self.screen {
            RosterKind::Students => {
                self.draw_table(frame, columns[0], &self.students);
                StudentSummary::compute(self.students.all(), &self.settings.courses).lines()
            }
            RosterKind::Employees => {
                self.draw_table(frame, columns[0], &self.employees);
                EmployeeSummary::compute(self.employees.all()).lines()
            }
        };
        self.draw_reports(frame, columns[1], report_lines);
    }

    fn draw_table<R: TableRow>(&self, frame: &mut Frame, area: Rect, store: &Store<R>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(table_title(store));

        if store.is_empty() {
            let message = Paragraph::new(format!(
                "No {} yet. Press 'n' to add one.",
                R::TITLE.to_lowercase()
            ))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(message, area);
            return;
        }

        let records = store.current_view();
        let header = Row::new(R::HEADERS).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows = records.iter().map(|record| Row::new(record.cells()));
        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let selected = if records.is_empty() {
            None
        } else {
            Some(clamp_selection(self.selected, records.len()))
        };
        let mut state = TableState::default().with_selected(selected);
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_reports(&self, frame: &mut Frame, area: Rect, lines: Vec<String>) {
        let block = Block::default().borders(Borders::ALL).title("Reports");
        let lines: Vec<Line> = lines.into_iter().map(Line::from).collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hint = |key: &'static str, text: &'static str| {
            [Span::styled(key, key_style), Span::raw(text)]
        };

        let spans: Vec<Span<'static>> = match &self.mode {
            Mode::Adding(_) | Mode::Editing { .. } => [
                hint("[Tab]", " Next field   "),
                hint("[Enter]", " Save   "),
                hint("[Esc]", " Cancel"),
            ]
            .concat(),
            Mode::ConfirmDelete(_) => {
                [hint("[Y]", " Delete   "), hint("[N/Esc]", " Keep")].concat()
            }
            Mode::Normal => {
                let filter = match self.screen {
                    RosterKind::Students => " Approved   ",
                    RosterKind::Employees => " Salary filter   ",
                };
                [
                    hint("[↑↓]", " Navigate   "),
                    hint("[Tab]", " Switch   "),
                    hint("[n]", " New   "),
                    hint("[e]", " Edit   "),
                    hint("[d]", " Delete   "),
                    hint("[f]", filter),
                    hint("[a]", " All   "),
                    hint("[q]", " Quit"),
                ]
                .concat()
            }
        };
        Line::from(spans)
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect, action: &str, form: &RecordForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let noun = match form.kind {
            RosterKind::Students => Student::KIND,
            RosterKind::Employees => Employee::KIND,
        };
        let block = Block::default()
            .title(format!("{action} {noun}"))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(FormField::Name),
            form.build_line(FormField::Age),
            form.build_line(FormField::Category),
            form.build_line(FormField::Amount),
            Line::from(""),
        ];
        lines.push(Line::from(Span::styled(
            "Enter to save • Tab to switch • Esc to cancel",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let cursor_x = inner.x + form.cursor_offset() as u16;
        let cursor_y = inner.y + form.cursor_row() as u16;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!(
                "Delete {} with ID {}?",
                confirm.kind.to_lowercase(),
                confirm.id
            )),
            Line::from(confirm.summary.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    #[cfg(test)]
    fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    fn save_new(&mut self, form: &RecordForm) -> Result<()> {
        let (kind, name, id) = match self.screen {
            RosterKind::Students => {
                let student = form.to_student();
                let name = student.name.clone();
                let id = self.students.insert(student);
                (Student::KIND, name, id)
            }
            RosterKind::Employees => {
                let employee = form.to_employee();
                let name = employee.name().to_string();
                let id = self.employees.insert(employee);
                (Employee::KIND, name, id)
            }
        };
        self.show_all();
        self.focus(id);
        self.set_status(format!("{kind} {name} added (ID: {id})."), StatusKind::Info);
        Ok(())
    }

    fn save_existing(&mut self, id: RecordId, form: &RecordForm) -> Result<()> {
        let (kind, name, updated) = match self.screen {
            RosterKind::Students => {
                let student = form.to_student();
                let name = student.name.clone();
                (Student::KIND, name, self.students.update(id, student))
            }
            RosterKind::Employees => {
                let employee = form.to_employee();
                let name = employee.name().to_string();
                (Employee::KIND, name, self.employees.update(id, employee))
            }
        };
        if !updated {
            return Err(RosterError::NotFound { kind, id }.into());
        }
        self.show_all();
        self.focus(id);
        self.set_status(format!("{kind} {name} (ID: {id}) updated."), StatusKind::Info);
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmDelete) -> Result<()> {
        let deleted = match self.screen {
            RosterKind::Students => self.students.delete(confirm.id),
            RosterKind::Employees => self.employees.delete(confirm.id),
        };
        if !deleted {
            return Err(RosterError::NotFound {
                kind: confirm.kind,
                id: confirm.id,
            }
            .into());
        }
        self.show_all();
        self.selected = clamp_selection(self.selected, self.view_len());
        self.set_status(
            format!("{} ID {} deleted.", confirm.kind, confirm.id),
            StatusKind::Info,
        );
        Ok(())
    }

    fn apply_filter(&mut self) {
        let description = match self.screen {
            RosterKind::Students => {
                self.students
                    .set_view(Selection::Only(StudentFilter::Approved));
                format!("{} approved students.", self.students.current_view().len())
            }
            RosterKind::Employees => {
                let threshold = self.settings.salary_threshold;
                self.employees
                    .set_view(Selection::Only(EmployeeFilter::SalaryAbove(threshold)));
                format!(
                    "{} employees above the salary threshold.",
                    self.employees.current_view().len()
                )
            }
        };
        self.selected = 0;
        tracing::info!(target: TRACING_TARGET_UI, screen = ?self.screen, "filter applied");
        self.set_status(format!("Filter applied: {description}"), StatusKind::Info);
    }

    /// Reset the current roster's view to every record.
    fn show_all(&mut self) {
        match self.screen {
            RosterKind::Students => self.students.set_view(Selection::All),
            RosterKind::Employees => self.employees.set_view(Selection::All),
        }
    }

    fn switch_screen(&mut self, screen: RosterKind) {
        if self.screen != screen {
            tracing::info!(target: TRACING_TARGET_UI, screen = ?screen, "screen switched");
        }
        self.screen = screen;
        self.selected = 0;
    }

    fn view_len(&self) -> usize {
        match self.screen {
            RosterKind::Students => self.students.current_view().len(),
            RosterKind::Employees => self.employees.current_view().len(),
        }
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.view_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + offset;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    /// Select the row showing `id`, if the current view contains it.
    fn focus(&mut self, id: RecordId) {
        let position = match self.screen {
            RosterKind::Students => position_of(self.students.current_view(), id),
            RosterKind::Employees => position_of(self.employees.current_view(), id),
        };
        if let Some(idx) = position {
            self.selected = idx;
        }
    }

    fn selected_id(&self) -> Option<RecordId> {
        let idx = self.selected;
        match self.screen {
            RosterKind::Students => self.students.current_view().get(idx)?.id,
            RosterKind::Employees => self.employees.current_view().get(idx)?.id(),
        }
    }

    /// Build the edit form from the live record behind the selected row.
    fn edit_form_for_selection(&self) -> Option<RecordForm> {
        let id = self.selected_id()?;
        match self.screen {
            RosterKind::Students => self.students.find_by_id(id).map(RecordForm::from_student),
            RosterKind::Employees => self
                .employees
                .find_by_id(id)
                .map(RecordForm::from_employee),
        }
    }

    fn confirm_for_selection(&self) -> Option<ConfirmDelete> {
        let id = self.selected_id()?;
        match self.screen {
            RosterKind::Students => ConfirmDelete::from_record(self.students.find_by_id(id)?),
            RosterKind::Employees => ConfirmDelete::from_record(self.employees.find_by_id(id)?),
        }
    }
}

fn position_of<R: Record>(records: &[R], id: RecordId) -> Option<usize> {
    records.iter().position(|record| record.id() == Some(id))
}
