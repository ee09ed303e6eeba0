use crate::{
    error::SkillError,
    intent::SkillIntent,
    response::ResponseBuilder,
    roster::Roster,
    store::TurnStore,
    turn_tracker::TurnTracker,
};
use std::fmt;
use std::str::FromStr;
use whose_turn_types::{
    IntentRequest, LaunchRequest, Request, RequestEnvelope, ResponseEnvelope, Session,
    SessionEndedRequest,
};

/// Which identifier keys the turn state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateScope {
    /// One state per platform session, dropped when the session ends or a
    /// response closes it.
    #[default]
    Session,
    /// One state per user, kept across sessions. Falls back to the session
    /// id when the request carries no user, and is then dropped with the
    /// session.
    User,
}

impl StateScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateScope::Session => "session",
            StateScope::User => "user",
        }
    }
}

impl fmt::Display for StateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "session" => Ok(StateScope::Session),
            "user" => Ok(StateScope::User),
            other => Err(format!("'{}' is not a valid state scope", other)),
        }
    }
}

/// Routes platform requests to the turn tracker and formats the replies.
///
/// The store is injected so the caller decides where turn state lives and
/// how long it is kept.
pub struct TurnSkill<S> {
    tracker: TurnTracker,
    responses: ResponseBuilder,
    store: S,
    scope: StateScope,
    application_id: Option<String>,
}

impl<S: TurnStore> TurnSkill<S> {
    pub fn new(roster: Roster, store: S) -> Self {
        let responses = ResponseBuilder::new(roster.example_name());
        Self {
            tracker: TurnTracker::new(roster),
            responses,
            store,
            scope: StateScope::default(),
            application_id: None,
        }
    }

    pub fn with_scope(mut self, scope: StateScope) -> Self {
        self.scope = scope;
        self
    }

    /// Rejects requests whose `applicationId` differs from `application_id`.
    pub fn with_application_id(mut self, application_id: &str) -> Self {
        self.application_id = Some(application_id.to_string());
        self
    }

    pub fn roster(&self) -> &Roster {
        self.tracker.roster()
    }

    pub fn scope(&self) -> StateScope {
        self.scope
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handles one request from the platform.
    ///
    /// Returns `Ok(None)` for `SessionEndedRequest`, which takes no response.
    pub async fn handle(
        &self,
        envelope: &RequestEnvelope,
    ) -> Result<Option<ResponseEnvelope>, SkillError> {
        let session = envelope.session();
        self.verify_application_id(session)?;

        if session.is_new() {
            tracing::info!(
                "Session started (request_id={}, session_id={})",
                envelope.request().request_id(),
                session.session_id()
            );
        }

        match envelope.request() {
            Request::Launch(launch) => Ok(Some(self.on_launch(launch, session))),
            Request::Intent(intent_request) => {
                let response = self.on_intent(intent_request, session).await?;
                // The platform sends no SessionEndedRequest after a response
                // that closes the session itself.
                if response.response().should_end_session() {
                    self.release_session_state(session).await?;
                }
                Ok(Some(response))
            }
            Request::SessionEnded(ended) => {
                self.on_session_ended(ended, session).await?;
                Ok(None)
            }
        }
    }

    fn verify_application_id(&self, session: &Session) -> Result<(), SkillError> {
        match &self.application_id {
            Some(expected) if expected != session.application_id() => {
                tracing::warn!(
                    "Rejecting request for application {}",
                    session.application_id()
                );
                Err(SkillError::InvalidApplicationId {
                    expected: expected.clone(),
                    actual: session.application_id().to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn scope_id<'a>(&self, session: &'a Session) -> &'a str {
        match self.scope {
            StateScope::Session => session.session_id(),
            StateScope::User => session.user_id().unwrap_or(session.session_id()),
        }
    }

    /// True when the state for this request is keyed by its session id.
    fn is_session_keyed(&self, session: &Session) -> bool {
        match self.scope {
            StateScope::Session => true,
            StateScope::User => session.user_id().is_none(),
        }
    }

    async fn release_session_state(&self, session: &Session) -> Result<(), SkillError> {
        if !self.is_session_keyed(session) {
            return Ok(());
        }
        self.store
            .remove(session.session_id())
            .await
            .map_err(SkillError::Store)
    }

    fn on_launch(&self, launch: &LaunchRequest, session: &Session) -> ResponseEnvelope {
        tracing::info!(
            "Launch (request_id={}, session_id={}, locale={})",
            launch.request_id(),
            session.session_id(),
            launch.locale().unwrap_or("unknown")
        );
        self.responses.welcome()
    }

    async fn on_intent(
        &self,
        intent_request: &IntentRequest,
        session: &Session,
    ) -> Result<ResponseEnvelope, SkillError> {
        tracing::info!(
            "Intent {} (request_id={}, session_id={})",
            intent_request.intent().name(),
            intent_request.request_id(),
            session.session_id()
        );

        let intent = SkillIntent::try_from(intent_request.intent()).inspect_err(|e| {
            tracing::error!("Cannot route request {}: {}", intent_request.request_id(), e);
        })?;

        match &intent {
            SkillIntent::LastTurnWas { name: Some(name) } => {
                let shared = self
                    .store
                    .entry(self.scope_id(session))
                    .await
                    .map_err(SkillError::Store)?;
                let mut state = shared.lock().await;
                let recorded = self.tracker.record_last_turn(&mut state, name);
                Ok(self.responses.last_turn_recorded(intent.name(), &recorded))
            }
            SkillIntent::LastTurnWas { name: None } => {
                tracing::debug!("LastTurnWasIntent arrived without a name; asking again");
                Ok(self.responses.last_turn_missing(intent.name()))
            }
            SkillIntent::WhoseTurnIsIt => {
                let shared = self
                    .store
                    .entry(self.scope_id(session))
                    .await
                    .map_err(SkillError::Store)?;
                let mut state = shared.lock().await;
                let previous = state.last_turn().map(str::to_string);
                let next = {
                    let mut rng = rand::thread_rng();
                    self.tracker
                        .pick_next_turn(&mut state, previous.as_deref(), &mut rng)
                };
                tracing::info!("Next turn: {} (previous: {:?})", next, previous);
                Ok(self
                    .responses
                    .next_turn(intent.name(), previous.as_deref(), &next))
            }
            SkillIntent::Help => Ok(self.responses.welcome()),
            SkillIntent::Stop | SkillIntent::Cancel => Ok(self.responses.farewell()),
        }
    }

    async fn on_session_ended(
        &self,
        ended: &SessionEndedRequest,
        session: &Session,
    ) -> Result<(), SkillError> {
        tracing::info!(
            "Session ended (request_id={}, session_id={}, reason={})",
            ended.request_id(),
            session.session_id(),
            ended.reason().unwrap_or("unknown")
        );
        if let Some(error) = ended.error() {
            tracing::warn!(
                "Session ended with error {}: {}",
                error.error_type(),
                error.message()
            );
        }

        self.release_session_state(session).await
    }
}
