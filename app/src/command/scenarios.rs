use bugtrail_core::all_scenarios;

use super::init_common_components;

/// List the scenarios, marking the selected one.
#[derive(Debug, Clone, Copy)]
pub struct ScenariosStrategy;

impl super::CommandStrategy for ScenariosStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components().await?;
        let selected = common.state.load_scenario().await;

        for brief in all_scenarios() {
            let marker = if selected == Some(brief.id) { "*" } else { " " };
            println!("{marker} {:<24} {}", brief.id.as_str(), brief.title);
        }
        Ok(())
    }
}
