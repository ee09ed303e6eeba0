use std::collections::HashSet;
use std::str::FromStr;

/// Participants used when nothing else is configured.
pub const DEFAULT_ROSTER: [&str; 3] = ["Odelia", "Isaiah", "Angela"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("Roster must contain at least one name")]
    Empty,
    #[error("Roster names must not be blank")]
    BlankName,
    #[error("Duplicate roster name: {0}")]
    DuplicateName(String),
}

/// The fixed, ordered list of people who take turns.
///
/// A `Roster` is never empty and never contains the same name twice, so any
/// code drawing from it can rely on having at least one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut validated = Vec::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(RosterError::BlankName);
            }
            if !seen.insert(name.to_string()) {
                return Err(RosterError::DuplicateName(name.to_string()));
            }
            validated.push(name.to_string());
        }

        if validated.is_empty() {
            return Err(RosterError::Empty);
        }

        Ok(Self { names: validated })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Name used in spoken examples ("by saying, It was Odelia's turn").
    pub fn example_name(&self) -> &str {
        &self.names[0]
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            names: DEFAULT_ROSTER.iter().map(|n| n.to_string()).collect(),
        }
    }
}

/// Parses a comma separated list, e.g. `"Odelia, Isaiah, Angela"`.
impl FromStr for Roster {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(RosterError::Empty);
        }
        Self::new(s.split(','))
    }
}
