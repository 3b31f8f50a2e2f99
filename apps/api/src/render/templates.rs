//! The three resume layouts and the placeholder substitution that fills them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;

/// The fixed set of resume layouts, selected by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateChoice {
    Professional,
    Modern,
    #[default]
    Simple,
}

impl TemplateChoice {
    pub const ALL: [TemplateChoice; 3] = [
        TemplateChoice::Professional,
        TemplateChoice::Modern,
        TemplateChoice::Simple,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TemplateChoice::Professional => "Professional",
            TemplateChoice::Modern => "Modern",
            TemplateChoice::Simple => "Simple",
        }
    }

    /// Looks a template up by name. Unknown or missing names fall back to `Simple`.
    pub fn from_name(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }

    fn layout(self) -> &'static str {
        match self {
            TemplateChoice::Professional => PROFESSIONAL_LAYOUT,
            TemplateChoice::Modern => MODERN_LAYOUT,
            TemplateChoice::Simple => SIMPLE_LAYOUT,
        }
    }
}

impl fmt::Display for TemplateChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateChoice {
    type Err = String;

    /// Exact, case-sensitive match on the template name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateChoice::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown template '{s}'"))
    }
}

const PROFESSIONAL_LAYOUT: &str = "
# {name}
{email} | {phone} | {linkedin}

## Professional Summary
{summary}

## Key Skills
{skills}

## Work Experience
{experience}

## Education
{education}
";

const MODERN_LAYOUT: &str = "
**{name_upper}**
*Email:* {email} | *Phone:* {phone} | *LinkedIn:* {linkedin}

---

## **PROFESSIONAL SUMMARY**
{summary}

---

## **SKILLS**
{skills}

---

## **WORK EXPERIENCE**
{experience}

---

## **EDUCATION**
{education}
";

const SIMPLE_LAYOUT: &str = "
{name}
Contact: {email}, {phone}, {linkedin}

**Summary:**
{summary}

**Skills:**
{skills}

**Experience:**
{experience}

**Education:**
{education}
";

/// Renders `data` through the chosen layout.
pub fn render_resume(choice: TemplateChoice, data: &ResumeData) -> String {
    let name_upper = data.name().to_uppercase();
    fill_placeholders(
        choice.layout(),
        &[
            ("name", data.name()),
            ("name_upper", &name_upper),
            ("email", data.email()),
            ("phone", data.phone()),
            ("linkedin", data.linkedin()),
            ("summary", data.summary()),
            ("skills", data.skills()),
            ("experience", data.experience()),
            ("education", data.education()),
        ],
    )
}

/// Replaces `{key}` tokens in `template` with their values in a single pass.
///
/// Values are inserted verbatim: braces inside a value are never expanded.
/// Tokens with no matching key are left in place.
pub fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let key = &after_open[..close];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after_open[close + 1..];
    }

    out.push_str(rest);
    out
}
