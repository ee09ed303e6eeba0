/// Top level body returned to the voice platform.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    version: String,
    session_attributes: SessionAttributes,
    response: SpeechletResponse,
}

impl ResponseEnvelope {
    pub fn new(session_attributes: SessionAttributes, response: SpeechletResponse) -> Self {
        Self {
            version: "1.0".to_string(),
            session_attributes,
            response,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn session_attributes(&self) -> &SessionAttributes {
        &self.session_attributes
    }

    pub fn response(&self) -> &SpeechletResponse {
        &self.response
    }
}

/// Attributes the platform stores and echoes back on the next request of the session.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_turn: Option<String>,
}

impl SessionAttributes {
    pub fn with_last_turn(mut self, last_turn: &str) -> Self {
        self.last_turn = Some(last_turn.to_string());
        self
    }

    pub fn last_turn(&self) -> Option<&str> {
        self.last_turn.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    output_speech: OutputSpeech,
    card: Card,
    reprompt: Reprompt,
    should_end_session: bool,
}

impl SpeechletResponse {
    pub fn new(
        output_speech: OutputSpeech,
        card: Card,
        reprompt: Reprompt,
        should_end_session: bool,
    ) -> Self {
        Self {
            output_speech,
            card,
            reprompt,
            should_end_session,
        }
    }

    pub fn output_speech(&self) -> &OutputSpeech {
        &self.output_speech
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn reprompt(&self) -> &Reprompt {
        &self.reprompt
    }

    pub fn should_end_session(&self) -> bool {
        self.should_end_session
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    /// A null `text` tells the platform not to say anything.
    #[serde(rename = "PlainText")]
    PlainText { text: Option<String> },
}

impl OutputSpeech {
    pub fn plain_text(text: Option<&str>) -> Self {
        Self::PlainText {
            text: text.map(str::to_string),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            OutputSpeech::PlainText { text } => text.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    #[serde(rename = "Simple")]
    Simple { title: String, content: String },
}

impl Card {
    pub fn simple(title: &str, content: &str) -> Self {
        Self::Simple {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Card::Simple { title, .. } => title,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Card::Simple { content, .. } => content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    output_speech: OutputSpeech,
}

impl Reprompt {
    pub fn new(output_speech: OutputSpeech) -> Self {
        Self { output_speech }
    }

    pub fn output_speech(&self) -> &OutputSpeech {
        &self.output_speech
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_response_envelope_shape() {
        let envelope = ResponseEnvelope::new(
            SessionAttributes::default().with_last_turn("Isaiah"),
            SpeechletResponse::new(
                OutputSpeech::plain_text(Some("Hello")),
                Card::simple("SessionSpeechlet - Welcome", "SessionSpeechlet - Hello"),
                Reprompt::new(OutputSpeech::plain_text(Some("Still there?"))),
                false,
            ),
        );

        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({
                "version": "1.0",
                "sessionAttributes": { "lastTurn": "Isaiah" },
                "response": {
                    "outputSpeech": { "type": "PlainText", "text": "Hello" },
                    "card": {
                        "type": "Simple",
                        "title": "SessionSpeechlet - Welcome",
                        "content": "SessionSpeechlet - Hello"
                    },
                    "reprompt": {
                        "outputSpeech": { "type": "PlainText", "text": "Still there?" }
                    },
                    "shouldEndSession": false
                }
            })
        );
    }

    #[test]
    fn test_null_reprompt_and_empty_attributes() {
        let envelope = ResponseEnvelope::new(
            SessionAttributes::default(),
            SpeechletResponse::new(
                OutputSpeech::plain_text(Some("Bye")),
                Card::simple("t", "c"),
                Reprompt::new(OutputSpeech::plain_text(None)),
                true,
            ),
        );

        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["sessionAttributes"], json!({}));
        assert_eq!(value["response"]["reprompt"]["outputSpeech"]["text"], json!(null));
        assert_eq!(value["response"]["shouldEndSession"], json!(true));
    }
}
