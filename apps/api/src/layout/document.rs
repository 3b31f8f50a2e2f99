//! Turns rendered resume text into a flat list of typed blocks.
//!
//! Recognised line shapes: `# ` title, `## ` section heading, a run of three or
//! more `-` as a horizontal rule, a line wholly wrapped in `**` as a bold line,
//! and blank lines. Everything else is a body paragraph.

/// One line of resume content, classified for layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Title(String),
    Heading(String),
    Rule,
    Paragraph { text: String, bold: bool },
    Blank,
}

/// Classifies every line of `content`, in order.
pub fn parse_blocks(content: &str) -> Vec<Block> {
    content.split('\n').map(classify_line).collect()
}

fn classify_line(line: &str) -> Block {
    let line = line.trim_end();

    if let Some(rest) = line.strip_prefix("# ") {
        return Block::Title(clean_text(rest));
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Block::Heading(clean_text(rest));
    }

    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Block::Blank;
    }
    if trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-') {
        return Block::Rule;
    }
    if let Some(inner) = trimmed
        .strip_prefix("**")
        .and_then(|s| s.strip_suffix("**"))
        .filter(|s| !s.trim().is_empty() && !s.contains("**"))
    {
        return Block::Paragraph {
            text: clean_text(inner),
            bold: true,
        };
    }

    Block::Paragraph {
        text: clean_text(trimmed),
        bold: false,
    }
}

/// Drops markdown emphasis markers and makes the text encodable by the built-in fonts.
///
/// A leading `* ` or `• ` bullet becomes `- ` so it survives the marker strip.
pub fn clean_text(text: &str) -> String {
    let text = text.trim();
    let (bullet, body) = match text
        .strip_prefix("* ")
        .or_else(|| text.strip_prefix("\u{2022} "))
    {
        Some(rest) => ("- ", rest),
        None => ("", text),
    };
    let body = body.replace('*', "");
    transliterate(&format!("{bullet}{}", body.trim()))
}

/// Maps text onto printable ASCII.
///
/// Typographic punctuation gets its plain equivalent, Latin-1 letters lose their
/// diacritics, tabs become spaces and anything else becomes `?`.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' '..='~' => out.push(c),
            '\t' | '\u{00A0}' | '\u{2002}' | '\u{2003}' | '\u{2009}' => out.push(' '),
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2022}' | '\u{00B7}' | '\u{25CF}' | '\u{25AA}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A9}' => out.push_str("(c)"),
            '\u{00AE}' => out.push_str("(R)"),
            '\u{2122}' => out.push_str("(TM)"),
            '\u{20AC}' => out.push_str("EUR"),
            '\u{00A3}' => out.push_str("GBP"),
            '\u{00C0}'..='\u{00C5}' => out.push('A'),
            '\u{00C6}' => out.push_str("AE"),
            '\u{00C7}' => out.push('C'),
            '\u{00C8}'..='\u{00CB}' => out.push('E'),
            '\u{00CC}'..='\u{00CF}' => out.push('I'),
            '\u{00D0}' => out.push('D'),
            '\u{00D1}' => out.push('N'),
            '\u{00D2}'..='\u{00D6}' | '\u{00D8}' => out.push('O'),
            '\u{00D9}'..='\u{00DC}' => out.push('U'),
            '\u{00DD}' => out.push('Y'),
            '\u{00DF}' => out.push_str("ss"),
            '\u{00E0}'..='\u{00E5}' => out.push('a'),
            '\u{00E6}' => out.push_str("ae"),
            '\u{00E7}' => out.push('c'),
            '\u{00E8}'..='\u{00EB}' => out.push('e'),
            '\u{00EC}'..='\u{00EF}' => out.push('i'),
            '\u{00F1}' => out.push('n'),
            '\u{00F2}'..='\u{00F6}' | '\u{00F8}' => out.push('o'),
            '\u{00F9}'..='\u{00FC}' => out.push('u'),
            '\u{00FD}' | '\u{00FF}' => out.push('y'),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeData;
    use crate::render::{render_resume, TemplateChoice};

    #[test]
    fn test_heading_prefixes() {
        assert_eq!(classify_line("# Ada Lovelace"), Block::Title("Ada Lovelace".into()));
        assert_eq!(classify_line("## Education"), Block::Heading("Education".into()));
        // Three hashes is not a recognised heading level.
        assert_eq!(
            classify_line("### Notes"),
            Block::Paragraph {
                text: "### Notes".into(),
                bold: false
            }
        );
    }

    #[test]
    fn test_rules_and_blanks() {
        assert_eq!(classify_line("---"), Block::Rule);
        assert_eq!(classify_line("  -----  "), Block::Rule);
        assert_eq!(classify_line("   "), Block::Blank);
        assert_eq!(
            classify_line("--"),
            Block::Paragraph {
                text: "--".into(),
                bold: false
            }
        );
    }

    #[test]
    fn test_bold_line_detection() {
        assert_eq!(
            classify_line("**Summary:**"),
            Block::Paragraph {
                text: "Summary:".into(),
                bold: true
            }
        );
        assert_eq!(
            classify_line("**a** and **b**"),
            Block::Paragraph {
                text: "a and b".into(),
                bold: false
            }
        );
    }

    #[test]
    fn test_heading_emphasis_is_stripped() {
        assert_eq!(
            classify_line("## **WORK EXPERIENCE**"),
            Block::Heading("WORK EXPERIENCE".into())
        );
    }

    #[test]
    fn test_bullet_markers_survive() {
        assert_eq!(clean_text("* Led a team of 5"), "- Led a team of 5");
        assert_eq!(clean_text("\u{2022} Shipped v2"), "- Shipped v2");
        assert_eq!(clean_text("- Kept as is"), "- Kept as is");
    }

    #[test]
    fn test_transliterate_typography_and_accents() {
        assert_eq!(
            transliterate("Jos\u{00E9} \u{2014} \u{201C}Caf\u{00E9}\u{201D}\u{2026}"),
            "Jose - \"Cafe\"..."
        );
        assert_eq!(transliterate("M\u{00FC}ller\u{2019}s"), "Muller's");
        assert_eq!(transliterate("\u{4E2D}"), "?");
    }

    #[test]
    fn test_modern_template_blocks() {
        let content = render_resume(
            TemplateChoice::Modern,
            &ResumeData {
                name: Some("Ada".into()),
                ..Default::default()
            },
        );
        let blocks = parse_blocks(&content);

        assert_eq!(blocks[0], Block::Blank);
        assert_eq!(
            blocks[1],
            Block::Paragraph {
                text: "ADA".into(),
                bold: true
            }
        );
        assert_eq!(blocks.iter().filter(|b| **b == Block::Rule).count(), 4);
        assert!(blocks.contains(&Block::Heading("PROFESSIONAL SUMMARY".into())));
    }

    #[test]
    fn test_professional_template_blocks() {
        let content = render_resume(TemplateChoice::Professional, &ResumeData::default());
        let blocks = parse_blocks(&content);
        assert_eq!(blocks[1], Block::Title("Your Name".into()));
        let headings: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(h) => Some(h.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            headings,
            vec!["Professional Summary", "Key Skills", "Work Experience", "Education"]
        );
    }
}
