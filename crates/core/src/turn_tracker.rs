use crate::roster::Roster;
use rand::Rng;

/// Who took the most recent turn within one conversation scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnState {
    last_turn: Option<String>,
}

impl TurnState {
    pub fn last_turn(&self) -> Option<&str> {
        self.last_turn.as_deref()
    }
}

/// Drives the turn rotation for a fixed roster.
///
/// The tracker holds no mutable state of its own. Callers hand it the
/// `TurnState` for the scope they are serving, which keeps separate
/// conversations from seeing each other's turns.
#[derive(Debug, Clone)]
pub struct TurnTracker {
    roster: Roster,
}

impl TurnTracker {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Records `name` as the last turn holder and returns it.
    ///
    /// The name is taken as spoken and isn't checked against the roster.
    pub fn record_last_turn(&self, state: &mut TurnState, name: &str) -> String {
        if !self.roster.contains(name) {
            tracing::debug!("Recording last turn for '{}', who is not on the roster", name);
        }
        state.last_turn = Some(name.to_string());
        name.to_string()
    }

    /// Picks the next turn holder uniformly at random, skipping `excluding`,
    /// and records the pick as the new last turn.
    ///
    /// When skipping `excluding` leaves nobody (a one-person roster), the
    /// draw falls back to the whole roster and the same person goes again.
    pub fn pick_next_turn<R: Rng>(
        &self,
        state: &mut TurnState,
        excluding: Option<&str>,
        rng: &mut R,
    ) -> String {
        let mut candidates: Vec<&String> = self
            .roster
            .names()
            .iter()
            .filter(|name| Some(name.as_str()) != excluding)
            .collect();

        if candidates.is_empty() {
            tracing::warn!(
                "No one besides '{}' is on the roster; allowing a repeat turn",
                excluding.unwrap_or_default()
            );
            candidates = self.roster.names().iter().collect();
        }

        // The roster is never empty, so the range is never empty either.
        let index = rng.gen_range(0..candidates.len());
        let next = candidates[index].clone();

        state.last_turn = Some(next.clone());
        next
    }
}
