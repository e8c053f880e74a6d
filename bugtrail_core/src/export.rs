//! Text exports of a [`BugTrail`].
//!
//! Both templates are plain field substitution: no escaping, no validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::BugTrail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    /// Jira wiki markup.
    Jira,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Jira => "jira",
        }
    }

    #[must_use]
    pub fn render(&self, trail: &BugTrail) -> String {
        match self {
            Self::Markdown => to_markdown(trail),
            Self::Jira => to_jira(trail),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "jira" | "wiki" => Ok(Self::Jira),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

fn bullets(items: &[String], marker: &str) -> String {
    items
        .iter()
        .map(|item| format!("{marker} {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render as Markdown headings and lists.
#[must_use]
pub fn to_markdown(trail: &BugTrail) -> String {
    let steps = trail
        .steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    let tags = trail
        .tags
        .iter()
        .map(|tag| format!("`{tag}`"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "# {title}

## Summary
{summary}

## Environment Markers
{environment}

## Preconditions
{preconditions}

## Steps to Reproduce
{steps}

## Expected vs Actual
**Expected:** {expected}

**Actual:** {actual}

## Impact
{impact}

## Evidence
{evidence}

## Tags
{tags}",
        title = trail.title,
        summary = trail.summary,
        environment = bullets(&trail.environment, "-"),
        preconditions = bullets(&trail.preconditions, "-"),
        expected = trail.expected,
        actual = trail.actual,
        impact = trail.impact,
        evidence = bullets(&trail.evidence, "-"),
    )
}

/// Render as Jira wiki markup.
#[must_use]
pub fn to_jira(trail: &BugTrail) -> String {
    format!(
        "h1. {title}

h2. Summary
{summary}

h2. Environment
{environment}

h2. Preconditions
{preconditions}

h2. Steps to Reproduce
{steps}

h2. Expected vs Actual
*Expected:* {expected}

*Actual:* {actual}

h2. Impact
{impact}

h2. Evidence
{evidence}

h2. Labels
{labels}",
        title = trail.title,
        summary = trail.summary,
        environment = bullets(&trail.environment, "*"),
        preconditions = bullets(&trail.preconditions, "*"),
        steps = bullets(&trail.steps, "#"),
        expected = trail.expected,
        actual = trail.actual,
        impact = trail.impact,
        evidence = bullets(&trail.evidence, "*"),
        labels = trail.tags.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BugTrail {
        BugTrail {
            title: "iOS Face ID Authentication Crash".to_string(),
            summary: "iOS app crashes when attempting Face ID authentication".to_string(),
            environment: vec!["iOS".to_string(), "iPhone Device".to_string()],
            preconditions: vec!["User must be logged in".to_string()],
            steps: vec!["Open the app".to_string(), "Tap Face ID login".to_string()],
            expected: "Login succeeds".to_string(),
            actual: "App crashes with EXC_BAD_ACCESS".to_string(),
            impact: "High - blocks login".to_string(),
            evidence: vec!["Crash logs".to_string()],
            tags: vec!["crash".to_string(), "ios".to_string()],
        }
    }

    fn field_values(trail: &BugTrail) -> Vec<&str> {
        let mut values = vec![
            trail.title.as_str(),
            trail.summary.as_str(),
            trail.expected.as_str(),
            trail.actual.as_str(),
            trail.impact.as_str(),
        ];
        for list in [
            &trail.environment,
            &trail.preconditions,
            &trail.steps,
            &trail.evidence,
            &trail.tags,
        ] {
            values.extend(list.iter().map(String::as_str));
        }
        values
    }

    #[test]
    fn markdown_layout() {
        let md = to_markdown(&sample());

        assert!(md.starts_with("# iOS Face ID Authentication Crash\n\n## Summary\n"));
        assert!(md.contains("## Environment Markers\n- iOS\n- iPhone Device\n"));
        assert!(md.contains("## Steps to Reproduce\n1. Open the app\n2. Tap Face ID login\n"));
        assert!(md.contains("**Expected:** Login succeeds\n\n**Actual:** App crashes"));
        assert!(md.ends_with("## Tags\n`crash`, `ios`"));
    }

    #[test]
    fn jira_layout() {
        let jira = to_jira(&sample());

        assert!(jira.starts_with("h1. iOS Face ID Authentication Crash\n\nh2. Summary\n"));
        assert!(jira.contains("h2. Environment\n* iOS\n* iPhone Device\n"));
        assert!(jira.contains("h2. Steps to Reproduce\n# Open the app\n# Tap Face ID login\n"));
        assert!(jira.contains("*Expected:* Login succeeds"));
        assert!(jira.ends_with("h2. Labels\ncrash, ios"));
    }

    #[test]
    fn both_formats_keep_every_field_verbatim() {
        let trail = sample();
        let md = to_markdown(&trail);
        let jira = to_jira(&trail);

        for value in field_values(&trail) {
            assert!(md.contains(value), "markdown missing {value:?}");
            assert!(jira.contains(value), "jira missing {value:?}");
        }
    }

    #[test]
    fn content_is_not_escaped() {
        let trail = BugTrail {
            title: "<script>*bold*</script> `x`".to_string(),
            ..BugTrail::default()
        };

        assert!(to_markdown(&trail).contains("<script>*bold*</script> `x`"));
        assert!(to_jira(&trail).contains("<script>*bold*</script> `x`"));
    }

    #[test]
    fn format_parsing_and_dispatch() {
        assert_eq!("md".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert_eq!("Wiki".parse::<ExportFormat>(), Ok(ExportFormat::Jira));
        assert!("pdf".parse::<ExportFormat>().is_err());

        let trail = sample();
        assert_eq!(ExportFormat::Jira.render(&trail), to_jira(&trail));
    }
}
