use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Every input collected by the wizard. Serialized names are the multipart part names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Phone,
    Role,
    SocialMediaExperience,
    PortfolioLink,
    SocialMediaTools,
    ContentCreation,
    EmailMarketing,
    LivesInArea,
    SocialMediaPages,
    ItExpertise,
    TeachingExperience,
    ExplainConcepts,
    LmsPlatforms,
    ItPortfolioLink,
    CurriculumExperience,
    NeedsAnalysis,
    CurriculumPortfolioLink,
    ToolsProficiency,
    EvaluateEffectiveness,
    CoverLetter,
    Resume,
}

/// Input shape of a field, driving validation messages and how clients render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Url,
    YesNo,
    RoleChoice,
    Document,
}

impl Field {
    pub const ALL: [Field; 23] = [
        Field::FullName,
        Field::Email,
        Field::Phone,
        Field::Role,
        Field::SocialMediaExperience,
        Field::PortfolioLink,
        Field::SocialMediaTools,
        Field::ContentCreation,
        Field::EmailMarketing,
        Field::LivesInArea,
        Field::SocialMediaPages,
        Field::ItExpertise,
        Field::TeachingExperience,
        Field::ExplainConcepts,
        Field::LmsPlatforms,
        Field::ItPortfolioLink,
        Field::CurriculumExperience,
        Field::NeedsAnalysis,
        Field::CurriculumPortfolioLink,
        Field::ToolsProficiency,
        Field::EvaluateEffectiveness,
        Field::CoverLetter,
        Field::Resume,
    ];

    pub const IDENTITY: [Field; 3] = [Field::FullName, Field::Email, Field::Phone];
    pub const DOCUMENTS: [Field; 2] = [Field::CoverLetter, Field::Resume];

    pub const fn name(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Role => "role",
            Field::SocialMediaExperience => "socialMediaExperience",
            Field::PortfolioLink => "portfolioLink",
            Field::SocialMediaTools => "socialMediaTools",
            Field::ContentCreation => "contentCreation",
            Field::EmailMarketing => "emailMarketing",
            Field::LivesInArea => "livesInArea",
            Field::SocialMediaPages => "socialMediaPages",
            Field::ItExpertise => "itExpertise",
            Field::TeachingExperience => "teachingExperience",
            Field::ExplainConcepts => "explainConcepts",
            Field::LmsPlatforms => "lmsPlatforms",
            Field::ItPortfolioLink => "itPortfolioLink",
            Field::CurriculumExperience => "curriculumExperience",
            Field::NeedsAnalysis => "needsAnalysis",
            Field::CurriculumPortfolioLink => "curriculumPortfolioLink",
            Field::ToolsProficiency => "toolsProficiency",
            Field::EvaluateEffectiveness => "evaluateEffectiveness",
            Field::CoverLetter => "coverLetter",
            Field::Resume => "resume",
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            Field::FullName
            | Field::Email
            | Field::Phone
            | Field::SocialMediaExperience
            | Field::SocialMediaTools
            | Field::EmailMarketing
            | Field::ItExpertise
            | Field::LmsPlatforms
            | Field::ToolsProficiency => FieldKind::Text,
            Field::SocialMediaPages
            | Field::TeachingExperience
            | Field::ExplainConcepts
            | Field::CurriculumExperience
            | Field::NeedsAnalysis
            | Field::EvaluateEffectiveness => FieldKind::LongText,
            Field::PortfolioLink | Field::ItPortfolioLink | Field::CurriculumPortfolioLink => {
                FieldKind::Url
            }
            Field::ContentCreation | Field::LivesInArea => FieldKind::YesNo,
            Field::Role => FieldKind::RoleChoice,
            Field::CoverLetter | Field::Resume => FieldKind::Document,
        }
    }

    /// Role whose question set owns this field, if any.
    pub const fn role(self) -> Option<Role> {
        match self {
            Field::SocialMediaExperience
            | Field::PortfolioLink
            | Field::SocialMediaTools
            | Field::ContentCreation
            | Field::EmailMarketing
            | Field::LivesInArea
            | Field::SocialMediaPages => Some(Role::SocialMediaManager),
            Field::ItExpertise
            | Field::TeachingExperience
            | Field::ExplainConcepts
            | Field::LmsPlatforms
            | Field::ItPortfolioLink => Some(Role::ItTutor),
            Field::CurriculumExperience
            | Field::NeedsAnalysis
            | Field::CurriculumPortfolioLink
            | Field::ToolsProficiency
            | Field::EvaluateEffectiveness => Some(Role::CurriculumDesigner),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full Name",
            Field::Email => "Email Address",
            Field::Phone => "Phone Number",
            Field::Role => "Select Role",
            Field::SocialMediaExperience => "How long have you managed social media accounts?",
            Field::PortfolioLink => {
                "Upload links to a portfolio or social media handles you've managed?"
            }
            Field::SocialMediaTools => "Which social media tools are you familiar with?",
            Field::ContentCreation => "Can you create content, film & edit videos?",
            Field::EmailMarketing => {
                "Are you familiar with email marketing? list the tools you are familiar with"
            }
            Field::LivesInArea => "Do you live at Ajah, Ado, Badore or it's environs?",
            Field::SocialMediaPages => "Share your social media pages",
            Field::ItExpertise => "What are your areas of expertise in IT?",
            Field::TeachingExperience => {
                "Describe your experience in teaching or tutoring IT subjects. What age groups or skill levels have you worked with?"
            }
            Field::ExplainConcepts => {
                "How do you approach explaining a complex technical concept to a beginner? Provide an example."
            }
            Field::LmsPlatforms => {
                "Which Learning Management Systems (LMS) or online teaching platforms are you familiar with?"
            }
            Field::ItPortfolioLink => {
                "Please provide a link to a portfolio of any teaching materials, tutorials, or projects you have created."
            }
            Field::CurriculumExperience => {
                "Describe your experience in curriculum design and instructional design. Which instructional design models are you familiar with?"
            }
            Field::NeedsAnalysis => {
                "What is your process for conducting a needs analysis to determine learning objectives?"
            }
            Field::CurriculumPortfolioLink => {
                "Please provide a link to a portfolio of curriculum or learning materials you have designed."
            }
            Field::ToolsProficiency => {
                "Which e-learning authoring tools and multimedia development software are you proficient in?"
            }
            Field::EvaluateEffectiveness => {
                "How do you evaluate the effectiveness of a curriculum and measure learning outcomes?"
            }
            Field::CoverLetter => "Cover Letter",
            Field::Resume => "Resume/CV",
        }
    }

    pub const fn placeholder(self) -> Option<&'static str> {
        match self {
            Field::FullName => Some("Enter your full name"),
            Field::Email => Some("your.email@example.com"),
            Field::Phone => Some("+1234567890"),
            Field::Role => Some("Choose a role"),
            Field::SocialMediaExperience => Some("e.g., 2 years"),
            Field::PortfolioLink | Field::ItPortfolioLink | Field::CurriculumPortfolioLink => {
                Some("https://your-portfolio.com")
            }
            Field::SocialMediaTools => Some("e.g., Hootsuite, Buffer, Canva"),
            Field::EmailMarketing => Some("e.g., Mailchimp, ConvertKit"),
            Field::SocialMediaPages => Some("List your social media handles"),
            Field::ItExpertise => Some("e.g., Web Development, Data Analysis, Javascript"),
            Field::TeachingExperience => Some("Describe your teaching experience"),
            Field::ExplainConcepts => Some("Describe your teaching methodology"),
            Field::LmsPlatforms => Some("e.g., Moodle, Canvas, Blackboard"),
            Field::CurriculumExperience => Some("Describe your curriculum design experience"),
            Field::NeedsAnalysis => Some("Describe your needs analysis process"),
            Field::ToolsProficiency => Some("e.g., Articulate Storyline, Adobe Captivate"),
            Field::EvaluateEffectiveness => Some("Describe your evaluation methods"),
            Field::ContentCreation | Field::LivesInArea | Field::CoverLetter | Field::Resume => {
                None
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.name() == trimmed)
            .ok_or_else(|| UnknownField(trimmed.to_string()))
    }
}

/// Open positions. Exactly one is chosen per application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Social Media Manager")]
    SocialMediaManager,
    #[serde(rename = "IT Tutor")]
    ItTutor,
    #[serde(rename = "Curriculum Designer")]
    CurriculumDesigner,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::SocialMediaManager, Role::ItTutor, Role::CurriculumDesigner];

    pub const fn label(self) -> &'static str {
        match self {
            Role::SocialMediaManager => "Social Media Manager",
            Role::ItTutor => "IT Tutor",
            Role::CurriculumDesigner => "Curriculum Designer",
        }
    }

    /// Questions asked of applicants for this role, in display order.
    pub const fn question_fields(self) -> &'static [Field] {
        match self {
            Role::SocialMediaManager => &[
                Field::SocialMediaExperience,
                Field::PortfolioLink,
                Field::SocialMediaTools,
                Field::ContentCreation,
                Field::EmailMarketing,
                Field::LivesInArea,
                Field::SocialMediaPages,
            ],
            Role::ItTutor => &[
                Field::ItExpertise,
                Field::TeachingExperience,
                Field::ExplainConcepts,
                Field::LmsPlatforms,
                Field::ItPortfolioLink,
            ],
            Role::CurriculumDesigner => &[
                Field::CurriculumExperience,
                Field::NeedsAnalysis,
                Field::CurriculumPortfolioLink,
                Field::ToolsProficiency,
                Field::EvaluateEffectiveness,
            ],
        }
    }

    /// Match a submitted role label, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Binary-choice answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Some(YesNo::Yes),
            "no" => Some(YesNo::No),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialMediaAnswers {
    pub social_media_experience: String,
    pub portfolio_link: String,
    pub social_media_tools: String,
    pub content_creation: Option<YesNo>,
    pub email_marketing: String,
    pub lives_in_area: Option<YesNo>,
    pub social_media_pages: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItTutorAnswers {
    pub it_expertise: String,
    pub teaching_experience: String,
    pub explain_concepts: String,
    pub lms_platforms: String,
    pub it_portfolio_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CurriculumAnswers {
    pub curriculum_experience: String,
    pub needs_analysis: String,
    pub curriculum_portfolio_link: String,
    pub tools_proficiency: String,
    pub evaluate_effectiveness: String,
}

/// Role-specific answers keyed by the selected role. Only the active role's answers exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", content = "answers")]
pub enum RoleAnswers {
    #[serde(rename = "Social Media Manager")]
    SocialMediaManager(SocialMediaAnswers),
    #[serde(rename = "IT Tutor")]
    ItTutor(ItTutorAnswers),
    #[serde(rename = "Curriculum Designer")]
    CurriculumDesigner(CurriculumAnswers),
}

enum AnswerSlot<'a> {
    Text(&'a mut String),
    Choice(&'a mut Option<YesNo>),
}

impl RoleAnswers {
    pub fn empty(role: Role) -> Self {
        match role {
            Role::SocialMediaManager => RoleAnswers::SocialMediaManager(Default::default()),
            Role::ItTutor => RoleAnswers::ItTutor(Default::default()),
            Role::CurriculumDesigner => RoleAnswers::CurriculumDesigner(Default::default()),
        }
    }

    pub const fn role(&self) -> Role {
        match self {
            RoleAnswers::SocialMediaManager(_) => Role::SocialMediaManager,
            RoleAnswers::ItTutor(_) => Role::ItTutor,
            RoleAnswers::CurriculumDesigner(_) => Role::CurriculumDesigner,
        }
    }

    /// Current answer for a question of this role; `None` for unset choices and foreign fields.
    pub fn value(&self, field: Field) -> Option<&str> {
        match (self, field) {
            (RoleAnswers::SocialMediaManager(a), Field::SocialMediaExperience) => {
                Some(a.social_media_experience.as_str())
            }
            (RoleAnswers::SocialMediaManager(a), Field::PortfolioLink) => {
                Some(a.portfolio_link.as_str())
            }
            (RoleAnswers::SocialMediaManager(a), Field::SocialMediaTools) => {
                Some(a.social_media_tools.as_str())
            }
            (RoleAnswers::SocialMediaManager(a), Field::ContentCreation) => {
                a.content_creation.map(YesNo::as_str)
            }
            (RoleAnswers::SocialMediaManager(a), Field::EmailMarketing) => {
                Some(a.email_marketing.as_str())
            }
            (RoleAnswers::SocialMediaManager(a), Field::LivesInArea) => {
                a.lives_in_area.map(YesNo::as_str)
            }
            (RoleAnswers::SocialMediaManager(a), Field::SocialMediaPages) => {
                Some(a.social_media_pages.as_str())
            }
            (RoleAnswers::ItTutor(a), Field::ItExpertise) => Some(a.it_expertise.as_str()),
            (RoleAnswers::ItTutor(a), Field::TeachingExperience) => {
                Some(a.teaching_experience.as_str())
            }
            (RoleAnswers::ItTutor(a), Field::ExplainConcepts) => Some(a.explain_concepts.as_str()),
            (RoleAnswers::ItTutor(a), Field::LmsPlatforms) => Some(a.lms_platforms.as_str()),
            (RoleAnswers::ItTutor(a), Field::ItPortfolioLink) => Some(a.it_portfolio_link.as_str()),
            (RoleAnswers::CurriculumDesigner(a), Field::CurriculumExperience) => {
                Some(a.curriculum_experience.as_str())
            }
            (RoleAnswers::CurriculumDesigner(a), Field::NeedsAnalysis) => {
                Some(a.needs_analysis.as_str())
            }
            (RoleAnswers::CurriculumDesigner(a), Field::CurriculumPortfolioLink) => {
                Some(a.curriculum_portfolio_link.as_str())
            }
            (RoleAnswers::CurriculumDesigner(a), Field::ToolsProficiency) => {
                Some(a.tools_proficiency.as_str())
            }
            (RoleAnswers::CurriculumDesigner(a), Field::EvaluateEffectiveness) => {
                Some(a.evaluate_effectiveness.as_str())
            }
            _ => None,
        }
    }

    fn slot_mut(&mut self, field: Field) -> Option<AnswerSlot<'_>> {
        let slot = match (self, field) {
            (RoleAnswers::SocialMediaManager(a), Field::SocialMediaExperience) => {
                AnswerSlot::Text(&mut a.social_media_experience)
            }
            (RoleAnswers::SocialMediaManager(a), Field::PortfolioLink) => {
                AnswerSlot::Text(&mut a.portfolio_link)
            }
            (RoleAnswers::SocialMediaManager(a), Field::SocialMediaTools) => {
                AnswerSlot::Text(&mut a.social_media_tools)
            }
            (RoleAnswers::SocialMediaManager(a), Field::ContentCreation) => {
                AnswerSlot::Choice(&mut a.content_creation)
            }
            (RoleAnswers::SocialMediaManager(a), Field::EmailMarketing) => {
                AnswerSlot::Text(&mut a.email_marketing)
            }
            (RoleAnswers::SocialMediaManager(a), Field::LivesInArea) => {
                AnswerSlot::Choice(&mut a.lives_in_area)
            }
            (RoleAnswers::SocialMediaManager(a), Field::SocialMediaPages) => {
                AnswerSlot::Text(&mut a.social_media_pages)
            }
            (RoleAnswers::ItTutor(a), Field::ItExpertise) => AnswerSlot::Text(&mut a.it_expertise),
            (RoleAnswers::ItTutor(a), Field::TeachingExperience) => {
                AnswerSlot::Text(&mut a.teaching_experience)
            }
            (RoleAnswers::ItTutor(a), Field::ExplainConcepts) => {
                AnswerSlot::Text(&mut a.explain_concepts)
            }
            (RoleAnswers::ItTutor(a), Field::LmsPlatforms) => {
                AnswerSlot::Text(&mut a.lms_platforms)
            }
            (RoleAnswers::ItTutor(a), Field::ItPortfolioLink) => {
                AnswerSlot::Text(&mut a.it_portfolio_link)
            }
            (RoleAnswers::CurriculumDesigner(a), Field::CurriculumExperience) => {
                AnswerSlot::Text(&mut a.curriculum_experience)
            }
            (RoleAnswers::CurriculumDesigner(a), Field::NeedsAnalysis) => {
                AnswerSlot::Text(&mut a.needs_analysis)
            }
            (RoleAnswers::CurriculumDesigner(a), Field::CurriculumPortfolioLink) => {
                AnswerSlot::Text(&mut a.curriculum_portfolio_link)
            }
            (RoleAnswers::CurriculumDesigner(a), Field::ToolsProficiency) => {
                AnswerSlot::Text(&mut a.tools_proficiency)
            }
            (RoleAnswers::CurriculumDesigner(a), Field::EvaluateEffectiveness) => {
                AnswerSlot::Text(&mut a.evaluate_effectiveness)
            }
            _ => return None,
        };
        Some(slot)
    }
}

/// Advisory extension filter offered to file pickers. Never enforced.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = [".pdf", ".doc", ".docx"];

/// Uploaded document held in memory until submission.
#[derive(Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: mime::Mime,
    pub bytes: Bytes,
}

impl Attachment {
    /// Build an attachment, guessing the content type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name).first_or_octet_stream();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read a document from disk, keeping only the final path component as its name.
    pub fn read_from(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn has_accepted_extension(&self) -> bool {
        let lower = self.file_name.to_ascii_lowercase();
        ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type.essence_str())
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Errors raised when a value cannot be stored against a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("field '{field}' belongs to the {owner} questions, not the selected role")]
    InactiveRoleField { field: Field, owner: Role },
    #[error("field '{0}' expects a document upload")]
    ExpectsDocument(Field),
    #[error("field '{0}' does not accept documents")]
    ExpectsText(Field),
}

/// Everything collected from the applicant during one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicantRecord {
    pub identity: Identity,
    pub answers: Option<RoleAnswers>,
    pub cover_letter: Option<Attachment>,
    pub resume: Option<Attachment>,
}

impl ApplicantRecord {
    pub fn role(&self) -> Option<Role> {
        self.answers.as_ref().map(RoleAnswers::role)
    }

    /// Text view of a non-document field. Unset choices, an unselected role and
    /// questions of other roles read as `None`.
    pub fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::FullName => Some(self.identity.full_name.as_str()),
            Field::Email => Some(self.identity.email.as_str()),
            Field::Phone => Some(self.identity.phone.as_str()),
            Field::Role => self.role().map(Role::label),
            Field::CoverLetter | Field::Resume => None,
            question => self.answers.as_ref().and_then(|answers| answers.value(question)),
        }
    }

    pub fn attachment(&self, field: Field) -> Option<&Attachment> {
        match field {
            Field::CoverLetter => self.cover_letter.as_ref(),
            Field::Resume => self.resume.as_ref(),
            _ => None,
        }
    }

    /// Store a text or choice value. Choices outside their closed set clear the field.
    pub fn set_value(&mut self, field: Field, value: &str) -> Result<(), RecordError> {
        match field {
            Field::FullName => self.identity.full_name = value.to_string(),
            Field::Email => self.identity.email = value.to_string(),
            Field::Phone => self.identity.phone = value.to_string(),
            Field::Role => self.select_role(Role::parse(value)),
            Field::CoverLetter | Field::Resume => return Err(RecordError::ExpectsDocument(field)),
            question => {
                let owner = question.role().ok_or(RecordError::ExpectsDocument(field))?;
                let slot = self
                    .answers
                    .as_mut()
                    .and_then(|answers| answers.slot_mut(question))
                    .ok_or(RecordError::InactiveRoleField {
                        field: question,
                        owner,
                    })?;
                match slot {
                    AnswerSlot::Text(target) => *target = value.to_string(),
                    AnswerSlot::Choice(target) => *target = YesNo::parse(value),
                }
            }
        }
        Ok(())
    }

    pub fn set_attachment(
        &mut self,
        field: Field,
        attachment: Attachment,
    ) -> Result<(), RecordError> {
        match field {
            Field::CoverLetter => self.cover_letter = Some(attachment),
            Field::Resume => self.resume = Some(attachment),
            other => return Err(RecordError::ExpectsText(other)),
        }
        Ok(())
    }

    /// Switching to a different role discards the previous role's answers.
    fn select_role(&mut self, role: Option<Role>) {
        match role {
            Some(role) if self.role() == Some(role) => {}
            Some(role) => self.answers = Some(RoleAnswers::empty(role)),
            None => self.answers = None,
        }
    }
}
