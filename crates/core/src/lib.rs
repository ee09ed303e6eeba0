pub mod error;
pub mod handler;
pub mod intent;
pub mod response;
pub mod roster;
pub mod store;
pub mod turn_tracker;

pub use error::SkillError;
pub use handler::{StateScope, TurnSkill};
pub use intent::SkillIntent;
pub use response::ResponseBuilder;
pub use roster::{Roster, RosterError};
pub use store::{InMemoryTurnStore, SharedTurnState, TurnStore};
pub use turn_tracker::{TurnState, TurnTracker};
