use serde_json::Value;
use std::collections::HashMap;

/// The platform-managed conversation context sent with every request.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// True on the first request of a new session.
    #[serde(default)]
    new: bool,

    session_id: String,

    #[serde(default)]
    application: Application,

    /// Opaque attributes echoed back by the platform from the previous response.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    attributes: HashMap<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

impl Session {
    pub fn new(session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_new(mut self, new: bool) -> Self {
        self.new = new;
        self
    }

    pub fn with_application_id(mut self, application_id: &str) -> Self {
        self.application = Application {
            application_id: application_id.to_string(),
        };
        self
    }

    pub fn with_user_id(mut self, user_id: &str) -> Self {
        self.user = Some(User {
            user_id: user_id.to_string(),
        });
        self
    }

    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    pub fn is_new(&self) -> bool {
        self.new
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn application_id(&self) -> &str {
        &self.application.application_id
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.user_id.as_str())
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    application_id: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    user_id: String,
}
