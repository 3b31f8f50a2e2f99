//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{generate_resume, refine_section, Notice, ResumeSection};
use crate::models::resume::{ResumeData, ResumeForm};
use crate::render::{render_resume, TemplateChoice};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub generation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub template: TemplateChoice,
    pub resume: ResumeData,
    pub content: String,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub section: ResumeSection,
    #[serde(default)]
    pub current: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct RefineResponse {
    pub section: ResumeSection,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<&'static str>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Drafts the summary, optionally tailors sections to the job description, and
/// returns the merged record alongside its rendered text.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(form): Json<ResumeForm>,
) -> Json<GenerateResponse> {
    let generation_id = Uuid::new_v4();
    let template = TemplateChoice::from_name(form.template.as_deref());
    info!(%generation_id, %template, tailor = form.tailor_to_job, "Generating resume");

    let outcome = generate_resume(state.llm.as_ref(), &form).await;
    let content = render_resume(template, &outcome.resume);

    info!(
        %generation_id,
        notices = outcome.notices.len(),
        "Resume generated"
    );

    Json(GenerateResponse {
        generation_id,
        generated_at: Utc::now(),
        template,
        resume: outcome.resume,
        content,
        notices: outcome.notices,
    })
}

/// POST /api/v1/resumes/refine
///
/// Runs one refinement step against a job description.
pub async fn handle_refine(
    State(state): State<AppState>,
    Json(request): Json<RefineRequest>,
) -> Result<Json<RefineResponse>, AppError> {
    let text = refine_section(
        state.llm.as_ref(),
        request.section,
        &request.current,
        &request.job_description,
    )
    .await?;

    Ok(Json(RefineResponse {
        section: request.section,
        text,
    }))
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: TemplateChoice::ALL.iter().map(|t| t.name()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;

    fn state_with(llm: ScriptedGenerator) -> AppState {
        AppState::for_tests(llm)
    }

    #[tokio::test]
    async fn test_generate_renders_chosen_template() {
        let state = state_with(ScriptedGenerator::new(vec![(
            "professional summary",
            Some("Builds reliable systems."),
        )]));
        let form = ResumeForm {
            name: Some("Linus".to_string()),
            template: Some("Professional".to_string()),
            ..Default::default()
        };

        let Json(response) = handle_generate(State(state), Json(form)).await;

        assert_eq!(response.template, TemplateChoice::Professional);
        assert!(response.content.starts_with("\n# Linus\n"));
        assert!(response
            .content
            .contains("## Professional Summary\nBuilds reliable systems.\n"));
        assert_eq!(
            response.resume.summary.as_deref(),
            Some("Builds reliable systems.")
        );
        assert!(response.notices.is_empty());
    }

    #[tokio::test]
    async fn test_generate_with_unknown_template_uses_simple() {
        let state = state_with(ScriptedGenerator::new(vec![("summary", Some("S."))]));
        let form = ResumeForm {
            template: Some("Baroque".to_string()),
            ..Default::default()
        };

        let Json(response) = handle_generate(State(state), Json(form)).await;

        assert_eq!(response.template, TemplateChoice::Simple);
        assert!(response.content.contains("**Summary:**\nS.\n"));
    }

    #[tokio::test]
    async fn test_refine_returns_section_and_text() {
        let state = state_with(ScriptedGenerator::new(vec![(
            "Current Skills",
            Some("Rust, Tokio"),
        )]));
        let request = RefineRequest {
            section: ResumeSection::Skills,
            current: "Rust, Tokio, Baking".to_string(),
            job_description: "Async Rust developer".to_string(),
        };

        let Json(response) = handle_refine(State(state), Json(request)).await.unwrap();

        assert_eq!(response.section, ResumeSection::Skills);
        assert_eq!(response.text, "Rust, Tokio");
    }

    #[tokio::test]
    async fn test_refine_blank_job_description_is_validation_error() {
        let state = state_with(ScriptedGenerator::new(vec![]));
        let request = RefineRequest {
            section: ResumeSection::Education,
            current: "BSc".to_string(),
            job_description: String::new(),
        };

        let err = handle_refine(State(state), Json(request)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_templates_in_fixed_order() {
        let Json(response) = handle_list_templates().await;
        assert_eq!(response.templates, vec!["Professional", "Modern", "Simple"]);
    }
}
