//! Filterable issue picker: candidate rows on the left, a pretty-printed
//! JSON preview of the highlighted candidate on the right.

use super::{is_cancel_key, TerminalGuard};
use castoff_core::error::SelectionError;
use castoff_core::tracker::{Candidate, CandidatePicker, SelectionOutcome};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub struct TuiPicker;

impl CandidatePicker for TuiPicker {
    fn pick(&self, candidates: &[Candidate]) -> Result<SelectionOutcome, SelectionError> {
        let mut guard = TerminalGuard::new()?;
        let mut state = PickerState::new(candidates);
        loop {
            guard.terminal_mut().draw(|frame| render(frame, &state))?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_cancel_key(&key) {
                    return Ok(SelectionOutcome::Cancelled);
                }
                match key.code {
                    // Enter with nothing highlighted keeps the picker open.
                    KeyCode::Enter => {
                        if let Some(candidate) = state.highlighted() {
                            return Ok(SelectionOutcome::Chosen(candidate.clone()));
                        }
                    }
                    KeyCode::Up => state.move_up(),
                    KeyCode::Down => state.move_down(),
                    KeyCode::Backspace => {
                        state.filter.pop();
                        state.refresh();
                    }
                    KeyCode::Char(c) => {
                        state.filter.push(c);
                        state.refresh();
                    }
                    _ => {}
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Picker state
// ---------------------------------------------------------------------------

struct PickerState<'a> {
    candidates: &'a [Candidate],
    filter: String,
    matches: Vec<usize>,
    cursor: usize,
}

impl<'a> PickerState<'a> {
    fn new(candidates: &'a [Candidate]) -> Self {
        let mut state = PickerState {
            candidates,
            filter: String::new(),
            matches: Vec::new(),
            cursor: 0,
        };
        state.refresh();
        state
    }

    /// Recomputes the match set for the current filter and clamps the
    /// cursor into it.
    fn refresh(&mut self) {
        self.matches = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, candidate)| subsequence_match(&candidate.label(), &self.filter))
            .map(|(index, _)| index)
            .collect();
        if self.cursor >= self.matches.len() {
            self.cursor = self.matches.len().saturating_sub(1);
        }
    }

    fn highlighted(&self) -> Option<&'a Candidate> {
        self.matches.get(self.cursor).map(|&index| &self.candidates[index])
    }

    fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.matches.len() {
            self.cursor += 1;
        }
    }
}

/// Case-insensitive subsequence match: every filter character must appear
/// in the label in order, gaps allowed. An empty filter matches everything.
fn subsequence_match(label: &str, filter: &str) -> bool {
    let mut label_chars = label.chars().map(|c| c.to_ascii_lowercase());
    filter
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .all(|wanted| label_chars.any(|have| have == wanted))
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(frame: &mut Frame, state: &PickerState) {
    let [filter_area, body_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());
    let [list_area, preview_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(body_area);

    frame.render_widget(Paragraph::new(format!("> {}", state.filter)), filter_area);

    let items: Vec<ListItem> = state
        .matches
        .iter()
        .map(|&index| ListItem::new(state.candidates[index].label()))
        .collect();
    let list = List::new(items)
        .block(Block::bordered().title(format!("Issues ({})", state.matches.len())))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if !state.matches.is_empty() {
        list_state.select(Some(state.cursor));
    }
    frame.render_stateful_widget(list, list_area, &mut list_state);

    let preview = state
        .highlighted()
        .map(|candidate| {
            serde_json::to_string_pretty(&candidate.payload).unwrap_or_default()
        })
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(preview)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title("Preview")),
        preview_area,
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
