use serde::Serialize;

use super::domain::{Attachment, Field, FieldKind, Role, YesNo, ACCEPTED_EXTENSIONS};
use super::wizard::{ApplicationWizard, Step};

pub const WELCOME_HEADING: &str = "Welcome to EduRepublic";
pub const SUCCESS_HEADING: &str = "Application Submitted!";
pub const UPLOAD_NOTE: &str = "PDF, DOC, or DOCX (max 10MB)";
pub const CONFIRMATION_NOTE: &str =
    "By submitting this application, you confirm that all information provided is accurate and complete.";

const NEXT_STEPS: [&str; 3] = [
    "We'll review your application within 3-5 business days",
    "You'll receive an email confirmation shortly",
    "If selected, we'll contact you for an interview",
];

#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    pub current: u8,
    pub total: u8,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentView {
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
}

impl From<&Attachment> for AttachmentView {
    fn from(attachment: &Attachment) -> Self {
        Self {
            file_name: attachment.file_name.clone(),
            content_type: attachment.content_type.essence_str().to_string(),
            size: attachment.size(),
        }
    }
}

/// One input of the current step as a client would draw it.
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewEntry {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewView {
    pub identity: Vec<ReviewEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub answers: Vec<ReviewEntry>,
    pub cover_letter: Option<AttachmentView>,
    pub resume: Option<AttachmentView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    Advance,
    Submit,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavigationView {
    pub can_go_back: bool,
    pub primary_action: PrimaryAction,
    pub primary_label: &'static str,
    pub submitting: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessView {
    pub heading: &'static str,
    pub message: &'static str,
    pub next_steps: Vec<&'static str>,
}

/// Serializable snapshot of the wizard for display.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub step: Step,
    pub step_index: u8,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressView>,
    pub heading: &'static str,
    pub subheading: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<&'static str>,
    pub fields: Vec<FieldView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewView>,
    pub navigation: NavigationView,
    pub submitted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<SuccessView>,
}

/// Project the wizard into a view. Never mutates the wizard.
pub fn render(wizard: &ApplicationWizard) -> WizardView {
    let step = wizard.step();
    let role = wizard.record().role();

    let progress = (step != Step::Welcome).then(|| ProgressView {
        current: step.index(),
        total: Step::PROGRESS_TOTAL,
        label: format!(
            "Step {} of {}: {}",
            step.index(),
            Step::PROGRESS_TOTAL,
            step.title()
        ),
    });

    let (heading, subheading) = copy_for(step, role);
    let notes = match step {
        Step::Welcome => vec![
            "This will take approximately 5-10 minutes",
            "All fields marked with * are required",
        ],
        Step::Upload => vec![UPLOAD_NOTE],
        Step::Review => vec![CONFIRMATION_NOTE],
        _ => Vec::new(),
    };

    let fields = step
        .fields(role)
        .iter()
        .map(|&field| field_view(wizard, field))
        .collect();

    let review = (step == Step::Review).then(|| review_view(wizard));
    let success = wizard.is_submitted().then(|| SuccessView {
        heading: SUCCESS_HEADING,
        message: "Thank you for applying to EduRepublic. We've received your application successfully.",
        next_steps: NEXT_STEPS.to_vec(),
    });

    WizardView {
        step,
        step_index: step.index(),
        title: step.title(),
        progress,
        heading: if wizard.is_submitted() {
            SUCCESS_HEADING
        } else {
            heading
        },
        subheading,
        notes,
        fields,
        review,
        navigation: navigation(wizard),
        submitted: wizard.is_submitted(),
        success,
    }
}

fn copy_for(step: Step, role: Option<Role>) -> (&'static str, String) {
    match step {
        Step::Welcome => (
            WELCOME_HEADING,
            "Ready to join our team? Let's start your application journey.".to_string(),
        ),
        Step::Identity => (
            "Let's get to know you",
            "Tell us about yourself to get started".to_string(),
        ),
        Step::RoleSelect => (
            "What role interests you?",
            "Select the position you'd like to apply for".to_string(),
        ),
        Step::RoleQuestions => (
            "Tell us about your experience",
            match role {
                Some(role) => format!("Role-specific questions for {role}"),
                None => "Select a role to see its questions".to_string(),
            },
        ),
        Step::Upload => (
            "Upload your documents",
            "Please upload your cover letter and resume".to_string(),
        ),
        Step::Review => (
            "Review Your Application",
            "Please review all information before submitting".to_string(),
        ),
    }
}

fn field_view(wizard: &ApplicationWizard, field: Field) -> FieldView {
    let record = wizard.record();
    let kind = field.kind();
    let options = match kind {
        FieldKind::YesNo => vec![YesNo::Yes.as_str(), YesNo::No.as_str()],
        FieldKind::RoleChoice => Role::ALL.iter().map(|role| role.label()).collect(),
        FieldKind::Document => ACCEPTED_EXTENSIONS.to_vec(),
        _ => Vec::new(),
    };

    FieldView {
        field,
        label: field.label(),
        kind,
        placeholder: field.placeholder(),
        options,
        value: record.value(field).map(str::to_string),
        attachment: record.attachment(field).map(AttachmentView::from),
        error: wizard.errors().get(field).map(str::to_string),
    }
}

fn review_view(wizard: &ApplicationWizard) -> ReviewView {
    let record = wizard.record();
    let entry = |field: Field| ReviewEntry {
        field,
        label: field.label(),
        value: record.value(field).unwrap_or_default().to_string(),
    };

    let role = record.role();
    let answers = role
        .map(|role| role.question_fields().iter().copied().map(entry).collect())
        .unwrap_or_default();

    ReviewView {
        identity: Field::IDENTITY.into_iter().map(entry).collect(),
        role,
        answers,
        cover_letter: record.cover_letter.as_ref().map(AttachmentView::from),
        resume: record.resume.as_ref().map(AttachmentView::from),
    }
}

fn navigation(wizard: &ApplicationWizard) -> NavigationView {
    let step = wizard.step();
    let (primary_action, primary_label) = match step {
        Step::Welcome => (PrimaryAction::Advance, "Start Application"),
        Step::Upload => (PrimaryAction::Advance, "Review Application"),
        Step::Review if wizard.is_submitting() => (PrimaryAction::Submit, "Submitting..."),
        Step::Review => (PrimaryAction::Submit, "Submit Application"),
        _ => (PrimaryAction::Advance, "Next"),
    };

    NavigationView {
        can_go_back: step != Step::Welcome && !wizard.is_submitted(),
        primary_action,
        primary_label,
        submitting: wizard.is_submitting(),
    }
}
