use crate::error::SkillError;
use whose_turn_types::Intent;

pub const LAST_TURN_WAS_INTENT: &str = "LastTurnWasIntent";
pub const WHOSE_TURN_IS_IT_INTENT: &str = "WhoseTurnIsItIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";

/// Slot carrying the spoken name in `LastTurnWasIntent`.
pub const NAME_SLOT: &str = "Name";

/// Every intent this skill understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillIntent {
    /// "It was Isaiah's turn last time". `name` is `None` when the platform
    /// couldn't fill the slot.
    LastTurnWas { name: Option<String> },
    /// "Whose turn is it?"
    WhoseTurnIsIt,
    Help,
    Stop,
    Cancel,
}

impl SkillIntent {
    pub fn name(&self) -> &'static str {
        match self {
            SkillIntent::LastTurnWas { .. } => LAST_TURN_WAS_INTENT,
            SkillIntent::WhoseTurnIsIt => WHOSE_TURN_IS_IT_INTENT,
            SkillIntent::Help => HELP_INTENT,
            SkillIntent::Stop => STOP_INTENT,
            SkillIntent::Cancel => CANCEL_INTENT,
        }
    }
}

impl TryFrom<&Intent> for SkillIntent {
    type Error = SkillError;

    fn try_from(intent: &Intent) -> Result<Self, Self::Error> {
        match intent.name() {
            LAST_TURN_WAS_INTENT => {
                let name = intent
                    .slot(NAME_SLOT)
                    .and_then(|slot| slot.value())
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string);
                Ok(SkillIntent::LastTurnWas { name })
            }
            WHOSE_TURN_IS_IT_INTENT => Ok(SkillIntent::WhoseTurnIsIt),
            HELP_INTENT | "Help" => Ok(SkillIntent::Help),
            STOP_INTENT | "Stop" => Ok(SkillIntent::Stop),
            CANCEL_INTENT | "Cancel" => Ok(SkillIntent::Cancel),
            other => Err(SkillError::UnknownIntent(other.to_string())),
        }
    }
}
