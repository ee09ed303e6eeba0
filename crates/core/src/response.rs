use whose_turn_types::{
    Card, OutputSpeech, Reprompt, ResponseEnvelope, SessionAttributes, SpeechletResponse,
};

const CARD_PREFIX: &str = "SessionSpeechlet";

/// Builds the speech, card and reprompt for a response. `reprompt` of `None`
/// means the platform won't re-ask if the user stays silent.
pub fn build_speechlet_response(
    title: &str,
    output: &str,
    reprompt: Option<&str>,
    should_end_session: bool,
) -> SpeechletResponse {
    SpeechletResponse::new(
        OutputSpeech::plain_text(Some(output)),
        Card::simple(
            &format!("{CARD_PREFIX} - {title}"),
            &format!("{CARD_PREFIX} - {output}"),
        ),
        Reprompt::new(OutputSpeech::plain_text(reprompt)),
        should_end_session,
    )
}

pub fn build_response(
    session_attributes: SessionAttributes,
    speechlet: SpeechletResponse,
) -> ResponseEnvelope {
    ResponseEnvelope::new(session_attributes, speechlet)
}

/// The skill's scripted replies.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    example_name: String,
}

impl ResponseBuilder {
    /// `example_name` is used in prompts that show the user what to say.
    pub fn new(example_name: &str) -> Self {
        Self {
            example_name: example_name.to_string(),
        }
    }

    pub fn welcome(&self) -> ResponseEnvelope {
        let example = &self.example_name;
        let speech =
            format!("Tell me whose turn it was last time by saying, Last time it was {example}'s turn");
        let reprompt = format!(
            "Please tell me whose turn it was last time by saying, It was {example}'s turn last time"
        );
        build_response(
            SessionAttributes::default(),
            build_speechlet_response("Welcome", &speech, Some(&reprompt), false),
        )
    }

    pub fn farewell(&self) -> ResponseEnvelope {
        build_response(
            SessionAttributes::default(),
            build_speechlet_response("Session Ended", "Don't forget to do your chores!", None, true),
        )
    }

    pub fn last_turn_recorded(&self, title: &str, name: &str) -> ResponseEnvelope {
        let speech = format!(
            "Ok, so it was {name}'s turn last time. You can ask me to tell you whose turn is next by saying, Whose turn is it next?"
        );
        build_response(
            SessionAttributes::default().with_last_turn(name),
            build_speechlet_response(
                title,
                &speech,
                Some("You can ask me who's next by saying, Who has the next turn?"),
                false,
            ),
        )
    }

    pub fn last_turn_missing(&self, title: &str) -> ResponseEnvelope {
        let reprompt = format!(
            "I'm not sure who had the last turn. You can tell me who it was by saying, {} took the last turn",
            self.example_name
        );
        build_response(
            SessionAttributes::default(),
            build_speechlet_response(
                title,
                "I'm not sure whose turn it was last. Please try again.",
                Some(&reprompt),
                false,
            ),
        )
    }

    pub fn next_turn(&self, title: &str, previous: Option<&str>, next: &str) -> ResponseEnvelope {
        let speech = match previous {
            Some(previous) => {
                format!("It was {previous}'s turn last time. Now it is {next}'s turn!")
            }
            None => format!(
                "I'm not sure who had the last turn, so I'll just randomly pick who goes next. Now it is {next}'s turn!"
            ),
        };
        build_response(
            SessionAttributes::default(),
            build_speechlet_response(title, &speech, None, true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speech(envelope: &ResponseEnvelope) -> &str {
        envelope.response().output_speech().text().unwrap_or_default()
    }

    #[test]
    fn test_card_mirrors_title_and_speech() {
        let speechlet = build_speechlet_response("Welcome", "Hi there", Some("Hello?"), false);

        assert_eq!(speechlet.card().title(), "SessionSpeechlet - Welcome");
        assert_eq!(speechlet.card().content(), "SessionSpeechlet - Hi there");
        assert_eq!(speechlet.reprompt().output_speech().text(), Some("Hello?"));
        assert!(!speechlet.should_end_session());
    }

    #[test]
    fn test_welcome_keeps_session_open() {
        let responses = ResponseBuilder::new("Odelia");
        let welcome = responses.welcome();

        assert!(speech(&welcome).contains("Odelia's turn"));
        assert!(welcome.response().reprompt().output_speech().text().is_some());
        assert!(!welcome.response().should_end_session());
        assert_eq!(welcome.version(), "1.0");
    }

    #[test]
    fn test_farewell_ends_session_without_reprompt() {
        let farewell = ResponseBuilder::new("Odelia").farewell();

        assert_eq!(speech(&farewell), "Don't forget to do your chores!");
        assert_eq!(farewell.response().card().title(), "SessionSpeechlet - Session Ended");
        assert_eq!(farewell.response().reprompt().output_speech().text(), None);
        assert!(farewell.response().should_end_session());
    }

    #[test]
    fn test_last_turn_recorded_echoes_attribute() {
        let recorded = ResponseBuilder::new("Odelia").last_turn_recorded("LastTurnWasIntent", "Isaiah");

        assert!(speech(&recorded).contains("Isaiah"));
        assert_eq!(recorded.session_attributes().last_turn(), Some("Isaiah"));
        assert!(!recorded.response().should_end_session());
    }

    #[test]
    fn test_next_turn_wording() {
        let responses = ResponseBuilder::new("Odelia");

        let known = responses.next_turn("WhoseTurnIsItIntent", Some("Isaiah"), "Angela");
        assert_eq!(
            speech(&known),
            "It was Isaiah's turn last time. Now it is Angela's turn!"
        );
        assert!(known.response().should_end_session());

        let unknown = responses.next_turn("WhoseTurnIsItIntent", None, "Angela");
        assert!(speech(&unknown).starts_with("I'm not sure who had the last turn"));
        assert!(speech(&unknown).ends_with("Now it is Angela's turn!"));
        assert_eq!(unknown.response().reprompt().output_speech().text(), None);
    }
}
