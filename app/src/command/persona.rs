use bugtrail_core::{Industry, Level, Persona, Timezone, ToneArc};
use tracing::info;

use super::init_common_components;

/// Persona fields to change; unset fields keep their saved value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonaInput {
    pub industry: Option<Industry>,
    pub tech_savvy: Option<Level>,
    pub patience: Option<Level>,
    pub tone_arc: Option<ToneArc>,
    pub timezone: Option<Timezone>,
}

impl PersonaInput {
    const fn is_empty(&self) -> bool {
        self.industry.is_none()
            && self.tech_savvy.is_none()
            && self.patience.is_none()
            && self.tone_arc.is_none()
            && self.timezone.is_none()
    }

    fn apply(self, mut persona: Persona) -> Persona {
        if let Some(industry) = self.industry {
            persona.industry = industry;
        }
        if let Some(level) = self.tech_savvy {
            persona.tech_savvy = level;
        }
        if let Some(level) = self.patience {
            persona.patience = level;
        }
        if let Some(arc) = self.tone_arc {
            persona.tone_arc = arc;
        }
        if let Some(timezone) = self.timezone {
            persona.timezone = timezone;
        }
        persona
    }
}

/// Show or update the simulated customer's persona.
#[derive(Debug, Clone, Copy)]
pub struct PersonaStrategy;

impl super::CommandStrategy for PersonaStrategy {
    type Input = PersonaInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components().await?;
        let mut persona = common.state.load_persona().await;

        if !input.is_empty() {
            persona = input.apply(persona);
            common.state.save_persona(&persona).await?;
            info!("Saved persona: {persona}");
        }

        println!("{persona}");
        println!("{}", serde_json::to_string_pretty(&persona)?);
        Ok(())
    }
}
