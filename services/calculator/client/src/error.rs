use derive_more::Display;

#[derive(Debug, Display, Clone, PartialEq)]
pub enum ProtocolError {
    #[display(fmt = "empty payload")]
    EmptyPayload,
    #[display(fmt = "payload exceeds {} bytes", _0)]
    PayloadTooLarge(usize),
    #[display(fmt = "protocol decode error: {}", _0)]
    Decode(String),
    #[display(fmt = "protocol encode error: {}", _0)]
    Encode(String),
    #[display(fmt = "transport error: {}", _0)]
    Io(String),
    #[display(fmt = "invalid operand \"{}\"", _0)]
    InvalidOperand(String),
    #[display(fmt = "unknown operator \"{}\"", _0)]
    UnknownOperator(String),
    #[display(fmt = "operator \"{}\" is missing an operand", _0)]
    MissingOperand(String),
    #[display(fmt = "operand \"{}\" has children", _0)]
    UnexpectedChildren(String),
    #[display(fmt = "reply is not a single leaf")]
    UnexpectedShape,
    #[display(fmt = "invalid result \"{}\"", _0)]
    InvalidResult(String),
}

impl std::error::Error for ProtocolError {}

impl From<std::io::Error> for ProtocolError {
    fn from(e: std::io::Error) -> Self {
        ProtocolError::Io(e.to_string())
    }
}
