use crate::session::Session;
use std::collections::HashMap;

/// Top level body the voice platform posts to the skill endpoint.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    version: String,

    session: Session,

    request: Request,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl RequestEnvelope {
    pub fn new(session: Session, request: Request) -> Self {
        Self {
            version: default_version(),
            session,
            request,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn request(&self) -> &Request {
        &self.request
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "LaunchRequest")]
    Launch(LaunchRequest),
    #[serde(rename = "IntentRequest")]
    Intent(IntentRequest),
    #[serde(rename = "SessionEndedRequest")]
    SessionEnded(SessionEndedRequest),
}

impl Request {
    pub fn request_id(&self) -> &str {
        match self {
            Request::Launch(r) => &r.request_id,
            Request::Intent(r) => &r.request_id,
            Request::SessionEnded(r) => &r.request_id,
        }
    }
}

/// `LaunchRequest`: the user opened the skill without asking for anything.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
}

impl LaunchRequest {
    pub fn new(request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            timestamp: None,
            locale: None,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

/// `IntentRequest`: the platform classified the utterance into an intent.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dialog_state: Option<String>,

    intent: Intent,
}

impl IntentRequest {
    pub fn new(request_id: &str, intent: Intent) -> Self {
        Self {
            request_id: request_id.to_string(),
            timestamp: None,
            locale: None,
            dialog_state: None,
            intent,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    name: String,

    /// Slot values keyed by slot name. Missing entirely when the intent has no slots.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    slots: HashMap<String, Slot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    confirmation_status: Option<String>,
}

impl Intent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slots: HashMap::new(),
            confirmation_status: None,
        }
    }

    pub fn with_slot(mut self, slot: Slot) -> Self {
        self.slots.insert(slot.name.clone(), slot);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }
}

/// A named parameter the platform extracted from speech. `value` is absent
/// when the user didn't say anything that filled it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confirmation_status: Option<String>,
}

impl Slot {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            confirmation_status: None,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// `SessionEndedRequest`: sent when the session closes for a reason other
/// than the skill returning `shouldEndSession: true`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
    /// "USER_INITIATED" | "ERROR" | "EXCEEDED_MAX_REPROMPTS"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<SessionEndedError>,
}

impl SessionEndedRequest {
    pub fn new(request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            timestamp: None,
            locale: None,
            reason: None,
            error: None,
        }
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn error(&self) -> Option<&SessionEndedError> {
        self.error.as_ref()
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionEndedError {
    #[serde(rename = "type")]
    error_type: String,
    #[serde(default)]
    message: String,
}

impl SessionEndedError {
    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
