use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::domain::{ApplicantRecord, Field, FieldKind, Role};
use super::wizard::Step;

pub const FULL_NAME_REQUIRED: &str = "Full name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const ROLE_REQUIRED: &str = "Please select a role";
pub const ANSWER_REQUIRED: &str = "This field is required";
pub const CHOICE_REQUIRED: &str = "Please select an option";
pub const PORTFOLIO_REQUIRED: &str = "Portfolio link is required";
pub const PORTFOLIO_INVALID: &str = "Must be a valid URL";
pub const COVER_LETTER_REQUIRED: &str = "Cover letter is required";
pub const RESUME_REQUIRED: &str = "Resume is required";
pub const FILE_TOO_LARGE: &str = "File size must be less than 10MB. Please choose a smaller file.";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

fn portfolio_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^https?://.+").expect("portfolio pattern compiles"))
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

pub fn is_valid_portfolio_link(value: &str) -> bool {
    portfolio_pattern().is_match(value)
}

/// Field-keyed, human readable validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

/// Required-field and format checks for one step. Pure: the record is never touched.
pub fn validate_step(step: Step, record: &ApplicantRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match step {
        Step::Welcome => {}
        Step::Identity => validate_identity(record, &mut errors),
        Step::RoleSelect => {
            if record.role().is_none() {
                errors.insert(Field::Role, ROLE_REQUIRED);
            }
        }
        Step::RoleQuestions => {
            if let Some(role) = record.role() {
                validate_role_questions(role, record, &mut errors);
            }
        }
        Step::Upload | Step::Review => validate_documents(record, &mut errors),
    }

    errors
}

fn validate_identity(record: &ApplicantRecord, errors: &mut FieldErrors) {
    let identity = &record.identity;

    if identity.full_name.trim().is_empty() {
        errors.insert(Field::FullName, FULL_NAME_REQUIRED);
    }

    if identity.email.trim().is_empty() {
        errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&identity.email) {
        errors.insert(Field::Email, EMAIL_INVALID);
    }

    if identity.phone.trim().is_empty() {
        errors.insert(Field::Phone, PHONE_REQUIRED);
    }
}

fn validate_role_questions(role: Role, record: &ApplicantRecord, errors: &mut FieldErrors) {
    for &field in role.question_fields() {
        let value = record.value(field);
        match field.kind() {
            FieldKind::YesNo => {
                if value.is_none() {
                    errors.insert(field, CHOICE_REQUIRED);
                }
            }
            FieldKind::Url => match value {
                Some(link) if !link.trim().is_empty() => {
                    if !is_valid_portfolio_link(link) {
                        errors.insert(field, PORTFOLIO_INVALID);
                    }
                }
                _ => errors.insert(field, PORTFOLIO_REQUIRED),
            },
            _ => {
                if is_blank(value) {
                    errors.insert(field, ANSWER_REQUIRED);
                }
            }
        }
    }
}

fn validate_documents(record: &ApplicantRecord, errors: &mut FieldErrors) {
    if record.cover_letter.is_none() {
        errors.insert(Field::CoverLetter, COVER_LETTER_REQUIRED);
    }
    if record.resume.is_none() {
        errors.insert(Field::Resume, RESUME_REQUIRED);
    }
}
