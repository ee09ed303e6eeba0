//re-export the envelope types so callers don't need to know the module layout
pub mod request;
pub mod response;
pub mod session;

pub use request::{
    Intent, IntentRequest, LaunchRequest, Request, RequestEnvelope, SessionEndedError,
    SessionEndedRequest, Slot,
};
pub use response::{
    Card, OutputSpeech, Reprompt, ResponseEnvelope, SessionAttributes, SpeechletResponse,
};
pub use session::{Application, Session, User};
