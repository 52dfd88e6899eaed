use derive_more::Display;

use calculator_client::ProtocolError;
use telemetry::IsErr;

use crate::expression::BuildError;

#[derive(Debug, Display)]
pub enum GatewayError {
    #[display(fmt = "{}", _0)]
    InvalidExpression(BuildError),
    #[display(fmt = "could not connect to {}: {}", _0, _1)]
    Connect(String, String),
    #[display(fmt = "{}", _0)]
    Protocol(ProtocolError),
    #[display(fmt = "{}", _0)]
    Remote(String),
}

impl std::error::Error for GatewayError {}

impl From<BuildError> for GatewayError {
    fn from(e: BuildError) -> Self {
        GatewayError::InvalidExpression(e)
    }
}

impl From<ProtocolError> for GatewayError {
    fn from(e: ProtocolError) -> Self {
        GatewayError::Protocol(e)
    }
}

impl IsErr for GatewayError {
    fn is_err(&self) -> bool {
        matches!(self, GatewayError::Connect(..) | GatewayError::Protocol(_))
    }
}
