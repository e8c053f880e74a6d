use bugtrail_core::{BugTrail, ExportFormat};
use tracing::info;

use super::{build_services, init_common_components};

/// How `extract` prints the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Json,
    Markdown,
    Jira,
}

impl ReportFormat {
    pub fn render(self, bugtrail: &BugTrail) -> anyhow::Result<String> {
        Ok(match self {
            Self::Json => serde_json::to_string_pretty(bugtrail)?,
            Self::Markdown => ExportFormat::Markdown.render(bugtrail),
            Self::Jira => ExportFormat::Jira.render(bugtrail),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExtractInput {
    pub format: ReportFormat,
}

/// Build a BugTrail from the saved conversation and save it.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components().await?;
        let (_, extraction) = build_services(&common.config)?;

        let history = common.state.load_chat().await;
        let result = extraction.extract(&history).await?;
        info!(
            "Extracted BugTrail from {} messages ({:?})",
            history.len(),
            result.source
        );

        common.state.save_bugtrail(&result.bugtrail).await?;
        println!("{}", input.format.render(&result.bugtrail)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn json_output_is_the_report_itself() {
        let trail = BugTrail {
            title: "Reset link expired".to_string(),
            ..BugTrail::default()
        };
        let json = ReportFormat::Json.render(&trail).expect("renders");
        let parsed: BugTrail = serde_json::from_str(&json).expect("round trips");
        assert_eq!(parsed, trail);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn markdown_output_uses_export_template() {
        let trail = BugTrail {
            title: "Double charge".to_string(),
            ..BugTrail::default()
        };
        let markdown = ReportFormat::Markdown.render(&trail).expect("renders");
        assert!(markdown.starts_with("# Double charge"));
    }
}
