use bugtrail_core::ExportFormat;

use super::init_common_components;

#[derive(Debug, Clone, Copy)]
pub struct ExportInput {
    pub format: ExportFormat,
}

/// Print the saved BugTrail as Markdown or Jira markup.
#[derive(Debug, Clone, Copy)]
pub struct ExportStrategy;

impl super::CommandStrategy for ExportStrategy {
    type Input = ExportInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components().await?;
        let Some(bugtrail) = common.state.load_bugtrail().await else {
            anyhow::bail!("No saved BugTrail. Run 'bugtrail extract' first.");
        };
        println!("{}", input.format.render(&bugtrail));
        Ok(())
    }
}
