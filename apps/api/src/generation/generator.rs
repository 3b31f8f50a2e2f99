//! Resume generation: drafts the summary and tailors sections to a job description.
//!
//! Flow: copy form → summary step → (optional) skills / experience / education
//!       refinement steps → merged `ResumeData` plus user-facing notices.
//!
//! A failed step never fails the whole generation: the summary falls back to a
//! placeholder, a failed refinement keeps the user's original text, and both
//! surface as error notices.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{
    EDUCATION_PROMPT_TEMPLATE, EXPERIENCE_PROMPT_TEMPLATE, NO_JOB_DESCRIPTION,
    SKILLS_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE,
};
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::resume::{ResumeData, ResumeForm};
use crate::render::templates::fill_placeholders;

/// Summary text used when the summary step fails or returns nothing.
pub const SUMMARY_FAILED: &str = "Failed to generate summary.";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A resume field a generation step can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeSection {
    Summary,
    Skills,
    Experience,
    Education,
}

impl ResumeSection {
    /// The sections a job description can refine, in the order they are reported.
    pub const REFINABLE: [ResumeSection; 3] = [
        ResumeSection::Skills,
        ResumeSection::Experience,
        ResumeSection::Education,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResumeSection::Summary => "Summary",
            ResumeSection::Skills => "Skills",
            ResumeSection::Experience => "Experience",
            ResumeSection::Education => "Education",
        }
    }

    fn refinement_template(self) -> Option<&'static str> {
        match self {
            ResumeSection::Summary => None,
            ResumeSection::Skills => Some(SKILLS_PROMPT_TEMPLATE),
            ResumeSection::Experience => Some(EXPERIENCE_PROMPT_TEMPLATE),
            ResumeSection::Education => Some(EDUCATION_PROMPT_TEMPLATE),
        }
    }

    fn current<'a>(self, form: &'a ResumeForm) -> &'a str {
        let value = match self {
            ResumeSection::Summary => None,
            ResumeSection::Skills => form.skills.as_deref(),
            ResumeSection::Experience => form.experience.as_deref(),
            ResumeSection::Education => form.education.as_deref(),
        };
        value.unwrap_or("")
    }

    fn assign(self, resume: &mut ResumeData, text: String) {
        let slot = match self {
            ResumeSection::Summary => &mut resume.summary,
            ResumeSection::Skills => &mut resume.skills,
            ResumeSection::Experience => &mut resume.experience,
            ResumeSection::Education => &mut resume.education,
        };
        *slot = Some(text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user about one generation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub section: ResumeSection,
    pub message: String,
}

impl Notice {
    fn info(section: ResumeSection, message: String) -> Self {
        Self {
            level: NoticeLevel::Info,
            section,
            message,
        }
    }

    fn error(section: ResumeSection, message: String) -> Self {
        Self {
            level: NoticeLevel::Error,
            section,
            message,
        }
    }
}

/// Result of a generation run: the merged record and what happened along the way.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub resume: ResumeData,
    pub notices: Vec<Notice>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the summary step and, when asked for and a job description is present,
/// the three refinement steps.
///
/// Refinements are independent of each other and of the summary: each one is
/// conditioned on the user's original input, so they run concurrently.
pub async fn generate_resume(llm: &dyn TextGenerator, form: &ResumeForm) -> GenerationOutcome {
    let mut resume = form.to_resume_data();
    let mut notices = Vec::new();

    info!("Generating summary");
    let summary_prompt = build_summary_prompt(form);
    match llm.generate(&summary_prompt).await {
        Ok(text) if !text.is_empty() => resume.summary = Some(text),
        Ok(_) => {
            warn!("Summary step returned no text");
            resume.summary = Some(SUMMARY_FAILED.to_string());
            notices.push(Notice::error(
                ResumeSection::Summary,
                "The model returned an empty summary.".to_string(),
            ));
        }
        Err(e) => {
            warn!("Summary step failed: {e}");
            resume.summary = Some(SUMMARY_FAILED.to_string());
            notices.push(Notice::error(
                ResumeSection::Summary,
                format!("Error generating content: {e}"),
            ));
        }
    }

    let job_description = match form.job_description() {
        Some(jd) if form.tailor_to_job => jd,
        _ => return GenerationOutcome { resume, notices },
    };

    info!("Refining sections against job description");
    let [skills, experience, education] =
        ResumeSection::REFINABLE.map(|s| build_refinement_prompt(s, s.current(form), job_description));

    let (skills, experience, education) = tokio::join!(
        llm.generate(&skills),
        llm.generate(&experience),
        llm.generate(&education),
    );

    for (section, result) in ResumeSection::REFINABLE
        .into_iter()
        .zip([skills, experience, education])
    {
        apply_refinement(&mut resume, &mut notices, section, result);
    }

    GenerationOutcome { resume, notices }
}

/// Runs a single refinement step on its own and returns the rewritten text.
pub async fn refine_section(
    llm: &dyn TextGenerator,
    section: ResumeSection,
    current: &str,
    job_description: &str,
) -> Result<String, AppError> {
    if section.refinement_template().is_none() {
        return Err(AppError::Validation(format!(
            "section '{}' cannot be refined; expected skills, experience or education",
            section.label().to_lowercase()
        )));
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let prompt = build_refinement_prompt(section, current, job_description);
    let text = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("{} refinement failed: {e}", section.label())))?;

    if text.is_empty() {
        return Err(AppError::Llm(format!(
            "{} refinement returned no text",
            section.label()
        )));
    }
    Ok(text)
}

fn apply_refinement(
    resume: &mut ResumeData,
    notices: &mut Vec<Notice>,
    section: ResumeSection,
    result: Result<String, LlmError>,
) {
    match result {
        Ok(text) if !text.is_empty() => {
            let message = match section {
                ResumeSection::Skills => format!("Refined {}: {text}", section.label()),
                _ => format!("Refined {}:\n{text}", section.label()),
            };
            section.assign(resume, text);
            notices.push(Notice::info(section, message));
        }
        // Nothing to overwrite with.
        Ok(_) => warn!("{} refinement returned no text", section.label()),
        Err(e) => {
            warn!("{} refinement failed: {e}", section.label());
            notices.push(Notice::error(
                section,
                format!("Error generating content: {e}"),
            ));
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt building
// ────────────────────────────────────────────────────────────────────────────

fn build_summary_prompt(form: &ResumeForm) -> String {
    fill_placeholders(
        SUMMARY_PROMPT_TEMPLATE,
        &[
            ("skills", form.skills.as_deref().unwrap_or("")),
            ("experience", form.experience.as_deref().unwrap_or("")),
            ("education", form.education.as_deref().unwrap_or("")),
            (
                "job_description",
                form.job_description().unwrap_or(NO_JOB_DESCRIPTION),
            ),
        ],
    )
}

fn build_refinement_prompt(section: ResumeSection, current: &str, job_description: &str) -> String {
    let template = section.refinement_template().unwrap_or_default();
    fill_placeholders(
        template,
        &[("current", current), ("job_description", job_description)],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
