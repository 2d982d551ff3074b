//! Ratatui backend implementation for the FormFiller trait.
//!
//! Presents one question per screen with a progress bar, live validation
//! messages and keyboard navigation.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use formstep::{
    Answers, Direction as StepDirection, FormDefinition, FormFiller, StepperConfig, Validator,
};
use ratatui::{
    Frame, Terminal,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use thiserror::Error;
use tracing::info;

use crate::state::{Editor, Flow, WizardState};

/// How long to wait for input when no transition is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Error type for the Ratatui backend.
#[derive(Debug, Error)]
pub enum WizardError {
    /// User cancelled filling (e.g., pressed Esc).
    #[error("Form filling cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
        }
    }
}

/// Ratatui-based wizard that fills a form one question at a time.
#[derive(Debug, Clone, Default)]
pub struct RatatuiFiller {
    /// Title shown at the top; defaults to the form title.
    title: Option<String>,
    theme: Theme,
    config: StepperConfig,
    validator: Validator,
}

impl RatatuiFiller {
    /// Create a new Ratatui filler with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the title shown at the top of the wizard.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the stepper transition window.
    pub fn with_config(mut self, config: StepperConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the validator (e.g. one with a strict shape policy).
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, WizardError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), WizardError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn run(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        state: &mut WizardState<'_>,
        title: &str,
    ) -> Result<Flow, WizardError> {
        loop {
            state.tick(Instant::now());
            terminal.draw(|frame| {
                if state.complete {
                    draw_completion(frame, state, &self.theme);
                } else {
                    draw_ui(frame, state, &self.theme, title);
                }
            })?;

            let timeout = state
                .session
                .stepper()
                .remaining(Instant::now())
                .unwrap_or(IDLE_POLL);
            if !event::poll(timeout)? {
                continue;
            }

            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match state.handle_key(key.code) {
                Flow::Continue => {}
                flow => return Ok(flow),
            }
        }
    }
}

fn draw_ui(frame: &mut Frame, state: &WizardState<'_>, theme: &Theme, title: &str) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Progress bar
            Constraint::Min(10),   // Content
            Constraint::Length(3), // Help
        ])
        .split(area);

    let header = Paragraph::new(title.to_string())
        .style(Style::default().fg(theme.primary).bold())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(header, chunks[0]);

    draw_progress(frame, state, theme, chunks[1]);

    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Question prompt
            Constraint::Min(5),    // Input area
            Constraint::Length(2), // Error message
        ])
        .split(chunks[2]);

    let Some(question) = state.current_question() else {
        let empty = Paragraph::new("This form has no questions.")
            .style(Style::default().fg(theme.secondary))
            .alignment(Alignment::Center);
        frame.render_widget(empty, chunks[2]);
        return;
    };

    // Dim the outgoing question while a transition runs.
    let text_style = if state.session.is_animating() {
        Style::default().fg(theme.text).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(theme.text)
    };

    let mut title_spans = vec![Span::styled(question.title.clone(), text_style.bold())];
    if question.required {
        title_spans.push(Span::styled(" *", Style::default().fg(theme.error)));
    }
    let mut prompt_lines = vec![Line::from(title_spans)];
    if let Some(description) = &question.description {
        prompt_lines.push(Line::styled(
            description.clone(),
            Style::default().fg(theme.secondary),
        ));
    }
    let arrow = match state.session.direction() {
        StepDirection::Forward => " Question → ",
        StepDirection::Backward => " ← Question ",
    };
    let prompt = Paragraph::new(prompt_lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .title(arrow)
            .title_style(Style::default().fg(theme.highlight)),
    );
    frame.render_widget(prompt, content_chunks[0]);

    draw_editor(frame, state, theme, content_chunks[1]);

    if let Some(error) = state.session.current_error() {
        let error_widget = Paragraph::new(format!("✗ {error}"))
            .style(Style::default().fg(theme.error))
            .alignment(Alignment::Center);
        frame.render_widget(error_widget, content_chunks[2]);
    }

    let back = if state.session.stepper().is_first() {
        ""
    } else {
        "  Backspace: Back"
    };
    let next = if state.session.stepper().is_last() {
        "Enter: Submit"
    } else {
        "Enter: Next"
    };
    let help_text = match &state.editor {
        Editor::Choice { .. } => format!("↑/↓/Space: Select  {next}  Esc: Cancel{back}"),
        Editor::Multi { .. } => format!("↑/↓: Navigate  Space: Toggle  {next}  Esc: Cancel{back}"),
        Editor::Fields { .. } => format!("Tab/↓: Next field  ↑: Previous  {next}  Esc: Cancel{back}"),
        Editor::Text { .. } => format!("{next}  Esc: Cancel{back}"),
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(theme.border))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(help, chunks[3]);
}

/// Thin bar with `current / total` underneath.
fn draw_progress(frame: &mut Frame, state: &WizardState<'_>, theme: &Theme, area: Rect) {
    let stepper = state.session.stepper();
    let shown = if stepper.is_empty() {
        0
    } else {
        stepper.current_index() + 1
    };
    let progress_text = format!(" {shown} / {} ", stepper.len());

    let bar_width = area.width.saturating_sub(2);
    let text_width = progress_text.chars().count() as u16;
    let filled_width = (stepper.progress_fraction() * f64::from(bar_width)) as u16;

    let bar_y = area.y;
    let bar_x = area.x + 1;

    let track = "─".repeat(bar_width as usize);
    let track_widget = Paragraph::new(track).style(Style::default().fg(theme.border));
    frame.render_widget(track_widget, Rect::new(bar_x, bar_y, bar_width, 1));

    if filled_width > 0 {
        let filled = "━".repeat(filled_width as usize);
        let filled_widget = Paragraph::new(filled).style(Style::default().fg(theme.primary));
        frame.render_widget(filled_widget, Rect::new(bar_x, bar_y, filled_width, 1));
    }

    let text_x = bar_x + (bar_width.saturating_sub(text_width)) / 2;
    let text_widget = Paragraph::new(progress_text).style(Style::default().fg(theme.secondary));
    frame.render_widget(text_widget, Rect::new(text_x, bar_y + 1, text_width, 1));
}

fn draw_editor(frame: &mut Frame, state: &WizardState<'_>, theme: &Theme, area: Rect) {
    let Some(question) = state.current_question() else {
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.secondary));

    match &state.editor {
        Editor::Text { input, cursor } => {
            let text = if input.is_empty() {
                Line::styled(
                    question.placeholder.clone().unwrap_or_default(),
                    Style::default().fg(theme.border).add_modifier(Modifier::DIM),
                )
            } else {
                Line::styled(input.clone(), Style::default().fg(theme.text))
            };
            let paragraph = Paragraph::new(text)
                .wrap(Wrap { trim: false })
                .block(block.title(format!(" {} ", question.field_type)));
            frame.render_widget(paragraph, area);
            frame.set_cursor_position((area.x + 1 + *cursor as u16, area.y + 1));
        }
        Editor::Choice {
            highlighted,
            picked,
        } => {
            let items = question.choices().iter().enumerate().map(|(idx, choice)| {
                let marker = if *picked == Some(idx) { "● " } else { "○ " };
                let style = if idx == *highlighted {
                    Style::default().fg(theme.highlight).bold()
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(format!("{marker}{choice}")).style(style)
            });
            frame.render_widget(List::new(items).block(block.title(" Choose one ")), area);
        }
        Editor::Multi {
            highlighted,
            checked,
        } => {
            let items = question.choices().iter().enumerate().map(|(idx, choice)| {
                let marker = if checked.get(idx).copied().unwrap_or(false) {
                    "[x] "
                } else {
                    "[ ] "
                };
                let style = if idx == *highlighted {
                    Style::default().fg(theme.highlight).bold()
                } else {
                    Style::default().fg(theme.text)
                };
                ListItem::new(format!("{marker}{choice}")).style(style)
            });
            frame.render_widget(
                List::new(items).block(block.title(" Choose any ")),
                area,
            );
        }
        Editor::Fields { focus, values } => {
            let lines: Vec<Line> = question
                .sub_inputs()
                .iter()
                .zip(values)
                .enumerate()
                .map(|(idx, (sub, value))| {
                    let required = if sub.required { "*" } else { "" };
                    let label_style = if idx == *focus {
                        Style::default().fg(theme.highlight).bold()
                    } else {
                        Style::default().fg(theme.secondary)
                    };
                    let shown = if value.is_empty() {
                        Span::styled(
                            sub.placeholder.clone().unwrap_or_default(),
                            Style::default().fg(theme.border).add_modifier(Modifier::DIM),
                        )
                    } else {
                        Span::styled(value.clone(), Style::default().fg(theme.text))
                    };
                    Line::from(vec![
                        Span::styled(format!("{}{required}: ", sub.label), label_style),
                        shown,
                    ])
                })
                .collect();
            frame.render_widget(Paragraph::new(lines).block(block), area);
        }
    }
}

fn draw_completion(frame: &mut Frame, state: &WizardState<'_>, theme: &Theme) {
    let area = frame.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.success))
        .title(" Complete ")
        .title_style(Style::default().fg(theme.success).bold());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = format!(
        "All {} questions answered!\n\nPress Enter to submit.",
        state.session.stepper().len()
    );

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(theme.text))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    let centered = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(3),
            Constraint::Percentage(40),
        ])
        .split(inner);

    frame.render_widget(paragraph, centered[1]);
}

impl FormFiller for RatatuiFiller {
    type Error = WizardError;

    fn fill(&self, form: &FormDefinition) -> Result<Answers, Self::Error> {
        let title = self.title.clone().unwrap_or_else(|| form.title.clone());
        let mut state = WizardState::new(form, self.config, self.validator);

        let mut terminal = self.setup_terminal()?;
        let flow = self.run(&mut terminal, &mut state, &title);
        self.restore_terminal(&mut terminal)?;

        match flow? {
            Flow::Cancel => {
                info!(form = %form.title, "form filling cancelled");
                Err(WizardError::Cancelled)
            }
            Flow::Submit | Flow::Continue => Ok(state.session.into_answers()),
        }
    }
}
