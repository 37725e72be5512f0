//! Data-entry forms shown as popups in the TUI
//!
//! A form is a list of text fields with one focused field. Submitting
//! validates every field and produces a typed record.

use crate::types::{FeedingLog, Owner, Pet, Vaccination, VetVisit};
use crate::validate::{self, ValidationError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

/// Which record a form creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    AddPet,
    VetVisit { pet_id: i64 },
    Vaccination { pet_id: i64 },
    FeedingLog { pet_id: i64 },
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::AddPet => "🐾 Add a New Pet",
            FormKind::VetVisit { .. } => "🩺 Add Vet Visit",
            FormKind::Vaccination { .. } => "💉 Add Vaccination",
            FormKind::FeedingLog { .. } => "🍖 Add Feeding Log",
        }
    }

    fn labels(&self) -> &'static [&'static str] {
        match self {
            FormKind::AddPet => &[
                "Pet Name",
                "Breed",
                "Birthdate (YYYY-MM-DD)",
                "Image path (optional)",
                "Owner Name",
                "Contact Number",
                "Address",
            ],
            FormKind::VetVisit { .. } => &["Visit Date (YYYY-MM-DD)", "Reason", "Notes (optional)"],
            FormKind::Vaccination { .. } => &[
                "Vaccine Name",
                "Date Administered (YYYY-MM-DD)",
                "Next Due (blank = 12 months)",
                "Category (Core, Optional, Rabies)",
                "Notes (optional)",
            ],
            FormKind::FeedingLog { .. } => &[
                "Start Date (YYYY-MM-DD)",
                "Number of Days",
                "Feeding Plan (0-3)",
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

/// Outcome of a key press inside a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Cancel,
    Submit,
}

/// A validated form
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Pet {
        pet: Pet,
        owner: Owner,
        image: Option<PathBuf>,
    },
    VetVisit(VetVisit),
    Vaccination(Vaccination),
    FeedingLog(FeedingLog),
}

#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<Field>,
    pub focus: usize,
    pub error: Option<String>,
}

impl Form {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            fields: kind
                .labels()
                .iter()
                .map(|label| Field {
                    label: *label,
                    value: String::new(),
                })
                .collect(),
            focus: 0,
            error: None,
        }
    }

    fn is_last_field(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return FormAction::Submit;
            }
            KeyCode::Enter if self.is_last_field() => return FormAction::Submit,
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len() - 1);
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.pop();
                }
                self.error = None;
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.push(c);
                }
                self.error = None;
            }
            _ => {}
        }
        FormAction::Continue
    }

    fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map(|f| f.value.trim()).unwrap_or_default()
    }

    /// Validate all fields; the focus moves to the first offending field
    pub fn submit(&mut self) -> Result<Submission, ValidationError> {
        let result = self.build();
        if let Err((idx, e)) = &result {
            self.focus = *idx;
            self.error = Some(e.to_string());
        }
        result.map_err(|(_, e)| e)
    }

    fn build(&self) -> Result<Submission, (usize, ValidationError)> {
        match self.kind {
            FormKind::AddPet => {
                let name = at(0, validate::require_non_empty("Name", self.value(0)))?;
                let birthdate = at(2, validate::parse_date(self.value(2)))?;
                let owner_name = at(4, validate::require_non_empty("Owner name", self.value(4)))?;
                let image = Some(self.value(3))
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from);

                Ok(Submission::Pet {
                    pet: Pet {
                        id: None,
                        owner_id: None,
                        name,
                        breed: self.value(1).to_string(),
                        birthdate,
                        image_path: None,
                    },
                    owner: Owner {
                        id: None,
                        name: owner_name,
                        contact_number: self.value(5).to_string(),
                        address: self.value(6).to_string(),
                    },
                    image,
                })
            }
            FormKind::VetVisit { pet_id } => Ok(Submission::VetVisit(VetVisit {
                id: None,
                pet_id,
                visit_date: at(0, validate::parse_date(self.value(0)))?,
                reason: self.value(1).to_string(),
                notes: self.value(2).to_string(),
            })),
            FormKind::Vaccination { pet_id } => {
                let name = at(0, validate::require_non_empty("Vaccine name", self.value(0)))?;
                let administered = at(1, validate::parse_date(self.value(1)))?;
                let mut vax = Vaccination::new(
                    pet_id,
                    name,
                    administered,
                    self.value(3),
                    self.value(4),
                );
                if !self.value(2).is_empty() {
                    vax.next_due = at(2, validate::parse_date(self.value(2)))?;
                }
                Ok(Submission::Vaccination(vax))
            }
            FormKind::FeedingLog { pet_id } => Ok(Submission::FeedingLog(FeedingLog {
                id: None,
                pet_id,
                start_date: at(0, validate::parse_date(self.value(0)))?,
                num_days: at(1, validate::parse_day_count(self.value(1)))?,
                plan: at(2, validate::parse_feeding_plan(self.value(2)))?,
            })),
        }
    }
}

/// Tag a validation error with the index of the field it came from
fn at<T>(idx: usize, result: Result<T, ValidationError>) -> Result<T, (usize, ValidationError)> {
    result.map_err(|e| (idx, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeedingPlan;
    use chrono::NaiveDate;

    fn press(form: &mut Form, code: KeyCode) -> FormAction {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(form: &mut Form, s: &str) {
        for c in s.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_navigation_wraps() {
        let mut form = Form::new(FormKind::VetVisit { pet_id: 1 });
        assert_eq!(press(&mut form, KeyCode::Up), FormAction::Continue);
        assert_eq!(form.focus, 2);
        press(&mut form, KeyCode::Tab);
        assert_eq!(form.focus, 0);
        assert_eq!(press(&mut form, KeyCode::Esc), FormAction::Cancel);
    }

    #[test]
    fn test_feeding_log_submission() {
        let mut form = Form::new(FormKind::FeedingLog { pet_id: 7 });
        type_str(&mut form, "2024-03-15");
        press(&mut form, KeyCode::Enter);
        type_str(&mut form, "3");
        press(&mut form, KeyCode::Enter);
        type_str(&mut form, "twice");
        assert_eq!(press(&mut form, KeyCode::Enter), FormAction::Submit);

        match form.submit().unwrap() {
            Submission::FeedingLog(log) => {
                assert_eq!(log.pet_id, 7);
                assert_eq!(log.num_days, 3);
                assert_eq!(log.plan, FeedingPlan::Twice);
                assert_eq!(log.start_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
            }
            other => panic!("unexpected submission {:?}", other),
        }
    }

    #[test]
    fn test_invalid_field_takes_focus() {
        let mut form = Form::new(FormKind::AddPet);
        type_str(&mut form, "Rex");
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "2024-13-40");
        form.focus = 6;

        assert!(form.submit().is_err());
        assert_eq!(form.focus, 2);
        assert!(form.error.as_deref().unwrap().contains("2024-13-40"));

        press(&mut form, KeyCode::Backspace);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_vaccination_default_and_explicit_due() {
        let mut form = Form::new(FormKind::Vaccination { pet_id: 1 });
        type_str(&mut form, "Rabies");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "2024-03-15");

        let Ok(Submission::Vaccination(vax)) = form.submit() else {
            panic!("expected a vaccination");
        };
        assert_eq!(vax.next_due, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());

        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "2027-01-01");
        let Ok(Submission::Vaccination(vax)) = form.submit() else {
            panic!("expected a vaccination");
        };
        assert_eq!(vax.next_due, NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }
}
