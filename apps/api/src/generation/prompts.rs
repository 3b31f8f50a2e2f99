// All LLM prompt templates for the Generation module.
// Filled with render::templates::fill_placeholders so user text is never re-expanded.

/// Summary prompt. Replace: {skills}, {experience}, {education}, {job_description}
pub const SUMMARY_PROMPT_TEMPLATE: &str = "\
Generate a concise professional summary (3-4 sentences) for a resume based on:
Skills: {skills}
Experience: {experience}
Education: {education}
Job Description: {job_description}";

/// Placeholder used in the summary prompt when no job description was pasted.
pub const NO_JOB_DESCRIPTION: &str = "N/A";

/// Skills refinement prompt. Replace: {current}, {job_description}
pub const SKILLS_PROMPT_TEMPLATE: &str = "\
Refine the following skills to highlight those most relevant to the job description (comma-separated).
Current Skills: {current}
Job Description: {job_description}";

/// Experience refinement prompt. Replace: {current}, {job_description}
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = "\
Rephrase the experience to emphasize achievements relevant to the job description. Use bullet points.
Current Experience: {current}
Job Description: {job_description}";

/// Education refinement prompt. Replace: {current}, {job_description}
pub const EDUCATION_PROMPT_TEMPLATE: &str = "\
Highlight relevant coursework or projects from the education based on the job description.
Current Education: {current}
Job Description: {job_description}";
