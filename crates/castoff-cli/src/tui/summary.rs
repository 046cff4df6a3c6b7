//! Single-line summary prompt, capped at the commit-subject limit.

use super::{is_cancel_key, TerminalGuard};
use castoff_core::summary::SUMMARY_LIMIT;
use castoff_core::workflow::SummaryPrompt;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::io;

const PROMPT: &str = "Enter a summary of your changes:";
const HINT: &str = "(enter to confirm, esc to cancel)";

pub struct TuiPrompt;

impl SummaryPrompt for TuiPrompt {
    fn read_summary(&self) -> io::Result<Option<String>> {
        let mut guard = TerminalGuard::new()?;
        let mut input = String::new();
        loop {
            guard.terminal_mut().draw(|frame| render(frame, &input))?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_cancel_key(&key) {
                    return Ok(None);
                }
                match key.code {
                    KeyCode::Enter => return Ok(Some(input)),
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    // Input is capped at the limit rather than rejected later.
                    KeyCode::Char(c) if input.chars().count() < SUMMARY_LIMIT => input.push(c),
                    _ => {}
                }
            }
        }
    }
}

fn render(frame: &mut Frame, input: &str) {
    let [prompt_area, input_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(Paragraph::new(PROMPT), prompt_area);
    frame.render_widget(Paragraph::new(format!("> {input}")), input_area);
    frame.render_widget(
        Paragraph::new(HINT).style(Style::default().fg(Color::DarkGray)),
        hint_area,
    );

    let cursor_x = input_area.x + 2 + input.chars().count() as u16;
    frame.set_cursor_position((cursor_x.min(input_area.right()), input_area.y));
}
