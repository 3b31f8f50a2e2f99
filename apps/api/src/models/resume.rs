use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Your Name";
pub const DEFAULT_EMAIL: &str = "your.email@example.com";
pub const DEFAULT_PHONE: &str = "(123) 456-7890";
pub const DEFAULT_LINKEDIN: &str = "linkedin.com/in/yourprofile";
pub const DEFAULT_SUMMARY: &str = "A highly motivated professional.";
pub const DEFAULT_SKILLS: &str = "Communication, Problem-solving, Teamwork";
pub const DEFAULT_EXPERIENCE: &str = "No experience provided.";
pub const DEFAULT_EDUCATION: &str = "No education provided.";

/// The form a user fills in. Every text field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    /// Template name; unknown or missing names render as `Simple`.
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default = "default_tailor")]
    pub tailor_to_job: bool,
}

fn default_tailor() -> bool {
    true
}

impl ResumeForm {
    pub fn to_resume_data(&self) -> ResumeData {
        ResumeData {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            linkedin: self.linkedin.clone(),
            summary: None,
            skills: self.skills.clone(),
            experience: self.experience.clone(),
            education: self.education.clone(),
        }
    }

    /// The job description, if one was pasted.
    pub fn job_description(&self) -> Option<&str> {
        self.job_description
            .as_deref()
            .filter(|jd| !jd.trim().is_empty())
    }
}

/// The eight fields a template is filled with.
///
/// `None` renders as the field default. `Some("")` renders as an empty line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
}

impl ResumeData {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or(DEFAULT_EMAIL)
    }

    pub fn phone(&self) -> &str {
        self.phone.as_deref().unwrap_or(DEFAULT_PHONE)
    }

    pub fn linkedin(&self) -> &str {
        self.linkedin.as_deref().unwrap_or(DEFAULT_LINKEDIN)
    }

    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or(DEFAULT_SUMMARY)
    }

    pub fn skills(&self) -> &str {
        self.skills.as_deref().unwrap_or(DEFAULT_SKILLS)
    }

    pub fn experience(&self) -> &str {
        self.experience.as_deref().unwrap_or(DEFAULT_EXPERIENCE)
    }

    pub fn education(&self) -> &str {
        self.education.as_deref().unwrap_or(DEFAULT_EDUCATION)
    }
}
