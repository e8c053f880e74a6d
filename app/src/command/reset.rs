use super::init_common_components;

/// Remove every saved slot: chat, persona, scenario and report.
#[derive(Debug, Clone, Copy)]
pub struct ResetStrategy;

impl super::CommandStrategy for ResetStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components().await?;
        common.state.clear_all().await?;
        println!(
            "Cleared client state in {}",
            common.state.store().dir().display()
        );
        Ok(())
    }
}
