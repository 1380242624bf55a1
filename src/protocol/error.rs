//! Response validation errors

/// Reason a chat response body was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedResponse {
    #[error("response body is empty")]
    EmptyBody,

    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: String },

    #[error("response is missing `choices`")]
    MissingChoices,

    #[error("`choices` must be a list")]
    ChoicesNotAList,

    #[error("response has an empty `choices` list")]
    EmptyChoices,

    #[error("first choice is missing the `message` field")]
    MissingMessage,

    #[error("invalid message in first choice: {0}")]
    InvalidMessage(String),
}
