//! Terminal-independent wizard state: the fill session plus the editing state
//! of the question on screen. Key handling lives here so it can be tested
//! without a terminal.

use std::collections::BTreeMap;
use std::time::Instant;

use crossterm::event::KeyCode;
use formstep::{
    Advance, AnswerShape, AnswerValue, FillSession, FormDefinition, Question, Retreat,
    StepperConfig, Validator, registry,
};
use tracing::debug;

/// Editing state for the question on screen.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Editor {
    /// Free text. List-shaped questions without choices take comma separated values.
    Text { input: String, cursor: usize },

    /// Pick one of the question's choices. Nothing is picked until the user
    /// moves through the list or presses Space.
    Choice {
        highlighted: usize,
        picked: Option<usize>,
    },

    /// Toggle any number of the question's choices.
    Multi { highlighted: usize, checked: Vec<bool> },

    /// One line per sub-input of a multi-input question.
    Fields { focus: usize, values: Vec<String> },
}

impl Editor {
    /// Build the editor for a question, restoring a previous answer.
    fn for_question(question: &Question, answer: Option<&AnswerValue>) -> Self {
        let choices = question.choices();
        match registry::shape_of(&question.field_type) {
            AnswerShape::Map => {
                let fields = answer.and_then(AnswerValue::as_fields);
                let values = question
                    .sub_inputs()
                    .iter()
                    .map(|sub| {
                        fields
                            .and_then(|f| f.get(&sub.id))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect();
                Self::Fields { focus: 0, values }
            }
            AnswerShape::List if !choices.is_empty() => {
                let picked = answer.and_then(AnswerValue::as_choices).unwrap_or_default();
                let checked = choices.iter().map(|c| picked.contains(c)).collect();
                Self::Multi {
                    highlighted: 0,
                    checked,
                }
            }
            AnswerShape::Scalar if !choices.is_empty() => {
                let picked = answer
                    .and_then(AnswerValue::as_str)
                    .and_then(|s| choices.iter().position(|c| c == s));
                Self::Choice {
                    highlighted: picked.unwrap_or(0),
                    picked,
                }
            }
            _ => {
                let input = match answer {
                    Some(AnswerValue::Text(s)) => s.clone(),
                    Some(AnswerValue::Choices(list)) => list.join(", "),
                    _ => String::new(),
                };
                let cursor = input.chars().count();
                Self::Text { input, cursor }
            }
        }
    }
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Submit,
    Cancel,
}

/// State for the entire wizard.
pub(crate) struct WizardState<'f> {
    pub(crate) session: FillSession<'f>,
    pub(crate) editor: Editor,
    /// Index the editor was built for; rebuilt whenever the stepper moves.
    editor_index: usize,
    pub(crate) complete: bool,
}

impl<'f> WizardState<'f> {
    pub(crate) fn new(form: &'f FormDefinition, config: StepperConfig, validator: Validator) -> Self {
        let session = FillSession::with_config(form, config, validator);
        let editor = session
            .current_question()
            .map(|q| Editor::for_question(q, None))
            .unwrap_or(Editor::Text {
                input: String::new(),
                cursor: 0,
            });
        Self {
            session,
            editor,
            editor_index: 0,
            complete: false,
        }
    }

    pub(crate) fn current_question(&self) -> Option<&'f Question> {
        self.session.current_question()
    }

    /// Commit a pending transition if its window has passed.
    pub(crate) fn tick(&mut self, now: Instant) {
        self.session.settle_if_elapsed(now);
        self.sync_editor();
    }

    fn sync_editor(&mut self) {
        let index = self.session.current_index();
        if index == self.editor_index {
            return;
        }
        self.editor_index = index;
        if let Some(question) = self.session.current_question() {
            self.editor = Editor::for_question(question, self.session.current_answer());
        }
    }

    /// Push the editor contents into the session, running live validation.
    /// A choice editor with nothing picked leaves the answer untouched.
    fn commit(&mut self) {
        let Some(question) = self.session.current_question() else {
            return;
        };
        let value = match &self.editor {
            Editor::Text { input, .. } => {
                if registry::shape_of(&question.field_type) == AnswerShape::List {
                    AnswerValue::Choices(
                        input
                            .split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_string)
                            .collect(),
                    )
                } else {
                    AnswerValue::Text(input.clone())
                }
            }
            Editor::Choice { picked, .. } => {
                let Some(choice) = picked.and_then(|idx| question.choices().get(idx)) else {
                    return;
                };
                AnswerValue::Text(choice.clone())
            }
            Editor::Multi { checked, .. } => AnswerValue::Choices(
                question
                    .choices()
                    .iter()
                    .zip(checked)
                    .filter(|(_, on)| **on)
                    .map(|(choice, _)| choice.clone())
                    .collect(),
            ),
            Editor::Fields { values, .. } => {
                let fields: BTreeMap<String, String> = question
                    .sub_inputs()
                    .iter()
                    .zip(values)
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(sub, value)| (sub.id.clone(), value.clone()))
                    .collect();
                AnswerValue::Fields(fields)
            }
        };
        self.session.set_current_answer(value);
    }

    /// Returns `Continue` even on the last step: submission waits for the
    /// completion screen to be confirmed.
    fn advance(&mut self) -> Flow {
        match self.session.advance() {
            Advance::Submit => {
                self.complete = true;
                Flow::Continue
            }
            Advance::Moving { .. } => {
                self.sync_editor();
                Flow::Continue
            }
            Advance::Rejected(error) => {
                debug!(%error, "step rejected");
                Flow::Continue
            }
            Advance::Busy | Advance::Empty => Flow::Continue,
        }
    }

    fn retreat(&mut self) {
        if let Retreat::Moving { .. } = self.session.retreat() {
            self.sync_editor();
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyCode) -> Flow {
        if self.complete {
            return match key {
                KeyCode::Enter => Flow::Submit,
                KeyCode::Esc => Flow::Cancel,
                _ => Flow::Continue,
            };
        }
        if key == KeyCode::Esc {
            return Flow::Cancel;
        }
        // Keys belong to the question being left until the transition settles.
        if self.session.is_animating() {
            return Flow::Continue;
        }
        if key == KeyCode::Enter {
            return self.advance();
        }

        let choice_count = self.current_question().map_or(0, |q| q.choices().len());
        let mut retreat = false;
        let mut changed = false;
        match &mut self.editor {
            Editor::Text { input, cursor } => match key {
                KeyCode::Backspace if input.is_empty() => retreat = true,
                other => changed = edit_line(input, cursor, other),
            },
            Editor::Choice {
                highlighted,
                picked,
            } => match key {
                KeyCode::Up if choice_count > 0 => {
                    *highlighted = highlighted.saturating_sub(1);
                    *picked = Some(*highlighted);
                    changed = true;
                }
                KeyCode::Down if choice_count > 0 => {
                    *highlighted = (*highlighted + 1).min(choice_count - 1);
                    *picked = Some(*highlighted);
                    changed = true;
                }
                KeyCode::Char(' ') if choice_count > 0 => {
                    *picked = Some(*highlighted);
                    changed = true;
                }
                KeyCode::Backspace => retreat = true,
                _ => {}
            },
            Editor::Multi {
                highlighted,
                checked,
            } => match key {
                KeyCode::Up => *highlighted = highlighted.saturating_sub(1),
                KeyCode::Down if *highlighted + 1 < checked.len() => *highlighted += 1,
                KeyCode::Char(' ') => {
                    if let Some(on) = checked.get_mut(*highlighted) {
                        *on = !*on;
                        changed = true;
                    }
                }
                KeyCode::Backspace => retreat = true,
                _ => {}
            },
            Editor::Fields { focus, values } => match key {
                KeyCode::Tab | KeyCode::Down if *focus + 1 < values.len() => *focus += 1,
                KeyCode::BackTab | KeyCode::Up => *focus = focus.saturating_sub(1),
                KeyCode::Backspace if values.iter().all(String::is_empty) => retreat = true,
                other => {
                    if let Some(value) = values.get_mut(*focus) {
                        let mut cursor = value.chars().count();
                        changed = edit_line(value, &mut cursor, other);
                    }
                }
            },
        }

        if retreat {
            self.retreat();
        } else if changed {
            self.commit();
        }
        Flow::Continue
    }
}

/// Apply a key to a single-line input. Returns whether the text changed.
fn edit_line(input: &mut String, cursor: &mut usize, key: KeyCode) -> bool {
    let byte_at = |s: &str, idx: usize| s.char_indices().nth(idx).map_or(s.len(), |(b, _)| b);
    match key {
        KeyCode::Char(c) => {
            let at = byte_at(input, *cursor);
            input.insert(at, c);
            *cursor += 1;
            true
        }
        KeyCode::Backspace if *cursor > 0 => {
            *cursor -= 1;
            let at = byte_at(input, *cursor);
            input.remove(at);
            true
        }
        KeyCode::Delete if *cursor < input.chars().count() => {
            let at = byte_at(input, *cursor);
            input.remove(at);
            true
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
            false
        }
        KeyCode::Right => {
            *cursor = (*cursor + 1).min(input.chars().count());
            false
        }
        KeyCode::Home => {
            *cursor = 0;
            false
        }
        KeyCode::End => {
            *cursor = input.chars().count();
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use formstep::QuestionId;

    use super::*;

    fn type_text(state: &mut WizardState<'_>, text: &str) {
        for c in text.chars() {
            state.handle_key(KeyCode::Char(c));
        }
    }

    fn immediate(form: &FormDefinition) -> WizardState<'_> {
        WizardState::new(form, StepperConfig::immediate(), Validator::default())
    }

    #[test]
    fn enter_is_gated_on_validation() {
        let form = example_forms::contact_form();
        let mut state = immediate(&form);

        assert_eq!(state.handle_key(KeyCode::Enter), Flow::Continue);
        assert_eq!(state.session.current_index(), 0);
        assert_eq!(state.session.current_error(), Some("This field is required"));

        type_text(&mut state, "Ada");
        assert_eq!(state.session.current_error(), None);
        state.handle_key(KeyCode::Enter);
        assert_eq!(state.session.current_index(), 1);
        assert_eq!(
            state.editor,
            Editor::Text {
                input: String::new(),
                cursor: 0
            }
        );
    }

    #[test]
    fn backspace_on_empty_input_goes_back_and_restores_answer() {
        let form = example_forms::contact_form();
        let mut state = immediate(&form);

        type_text(&mut state, "Ada");
        state.handle_key(KeyCode::Enter);
        state.handle_key(KeyCode::Backspace);

        assert_eq!(state.session.current_index(), 0);
        assert_eq!(
            state.editor,
            Editor::Text {
                input: "Ada".to_string(),
                cursor: 3
            }
        );
    }

    #[test]
    fn editing_in_the_middle_of_a_line() {
        let mut input = "héllo".to_string();
        let mut cursor = 5;
        edit_line(&mut input, &mut cursor, KeyCode::Left);
        edit_line(&mut input, &mut cursor, KeyCode::Left);
        edit_line(&mut input, &mut cursor, KeyCode::Backspace);
        assert_eq!(input, "hélo");
        edit_line(&mut input, &mut cursor, KeyCode::Home);
        edit_line(&mut input, &mut cursor, KeyCode::Char('¡'));
        assert_eq!(input, "¡hélo");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn multi_input_choices_and_submit() {
        let form = example_forms::event_registration();
        let mut state = immediate(&form);

        type_text(&mut state, "Ferris");
        state.handle_key(KeyCode::Tab);
        type_text(&mut state, "ferris@example");
        state.handle_key(KeyCode::Enter);
        assert_eq!(state.session.current_error(), Some("Invalid email in Email"));

        type_text(&mut state, ".com");
        state.handle_key(KeyCode::Enter);
        assert_eq!(state.session.current_index(), 1);

        // Single choice: arrows pick, Enter moves on.
        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Enter);
        assert_eq!(
            state.session.answers().get_text(&QuestionId::from("ticket")).unwrap(),
            "Regular"
        );

        // Multi choice: Space toggles.
        state.handle_key(KeyCode::Char(' '));
        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Char(' '));
        state.handle_key(KeyCode::Enter);
        assert_eq!(
            state.session.answers().get_choices(&QuestionId::from("sessions")).unwrap(),
            ["Keynote".to_string(), "Lightning talks".to_string()]
        );

        state.handle_key(KeyCode::Enter);
        type_text(&mut state, "yes");
        assert_eq!(state.handle_key(KeyCode::Enter), Flow::Continue);
        assert!(state.complete);

        // The completion screen confirms the submission.
        assert_eq!(state.handle_key(KeyCode::Char('x')), Flow::Continue);
        assert_eq!(state.handle_key(KeyCode::Enter), Flow::Submit);
        assert_eq!(
            state
                .session
                .answers()
                .get_fields(&QuestionId::from("details"))
                .unwrap()
                .get("email")
                .map(String::as_str),
            Some("ferris@example.com")
        );
    }

    fn size_form(required: bool) -> FormDefinition {
        let mut size = Question::new(1, "radio", "Size")
            .with_order(1)
            .with_choices(["S", "M"]);
        if required {
            size = size.required();
        }
        FormDefinition::new(
            "Order",
            vec![size, Question::new(2, "short-text", "Notes").with_order(2)],
        )
    }

    #[test]
    fn optional_choice_is_skipped_without_a_pick() {
        let form = size_form(false);
        let mut state = immediate(&form);

        state.handle_key(KeyCode::Enter);
        assert_eq!(state.session.current_index(), 1);
        assert!(state.session.answers().get(&QuestionId::Int(1)).is_none());

        // Going back shows nothing picked.
        state.handle_key(KeyCode::Backspace);
        assert_eq!(
            state.editor,
            Editor::Choice {
                highlighted: 0,
                picked: None
            }
        );
    }

    #[test]
    fn required_choice_needs_a_pick() {
        let form = size_form(true);
        let mut state = immediate(&form);

        state.handle_key(KeyCode::Enter);
        assert_eq!(state.session.current_index(), 0);
        assert_eq!(state.session.current_error(), Some("This field is required"));

        state.handle_key(KeyCode::Char(' '));
        state.handle_key(KeyCode::Enter);
        assert_eq!(state.session.current_index(), 1);
        assert_eq!(
            state.session.answers().get(&QuestionId::Int(1)),
            Some(&AnswerValue::from("S"))
        );
    }

    #[test]
    fn picked_choice_is_restored_on_return() {
        let form = size_form(true);
        let mut state = immediate(&form);

        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Enter);
        state.handle_key(KeyCode::Backspace);
        assert_eq!(
            state.editor,
            Editor::Choice {
                highlighted: 1,
                picked: Some(1)
            }
        );
    }

    #[test]
    fn transitions_wait_for_tick() {
        let form = example_forms::contact_form();
        let mut state = WizardState::new(&form, StepperConfig::default(), Validator::default());

        type_text(&mut state, "Ada");
        state.handle_key(KeyCode::Enter);
        assert!(state.session.is_animating());
        assert_eq!(state.handle_key(KeyCode::Enter), Flow::Continue);

        state.tick(Instant::now() + std::time::Duration::from_secs(1));
        assert_eq!(state.session.current_index(), 1);
        assert!(!state.session.is_animating());
    }

    #[test]
    fn edits_are_ignored_while_animating() {
        let form = example_forms::contact_form();
        let mut state = WizardState::new(&form, StepperConfig::default(), Validator::default());

        type_text(&mut state, "Ada");
        state.handle_key(KeyCode::Enter);
        type_text(&mut state, "x");
        state.handle_key(KeyCode::Backspace);

        assert_eq!(
            state.session.answers().get(&QuestionId::Int(1)),
            Some(&AnswerValue::from("Ada"))
        );
        assert_eq!(
            state.editor,
            Editor::Text {
                input: "Ada".to_string(),
                cursor: 3
            }
        );
    }

    #[test]
    fn escape_cancels() {
        let form = example_forms::contact_form();
        let mut state = immediate(&form);
        assert_eq!(state.handle_key(KeyCode::Esc), Flow::Cancel);
    }

    #[test]
    fn escape_on_completion_screen_cancels() {
        let form = FormDefinition::new("One", vec![Question::new(1, "short-text", "Anything?")]);
        let mut state = immediate(&form);

        state.handle_key(KeyCode::Enter);
        assert!(state.complete);
        assert_eq!(state.handle_key(KeyCode::Esc), Flow::Cancel);
    }
}
