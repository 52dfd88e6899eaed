use derive_more::Display;

use calculator_client::ProtocolError;
use telemetry::IsErr;

use crate::eval::EvalError;

#[derive(Debug, Display)]
pub enum CalculatorError {
    #[display(fmt = "failed to bind {}: {}", _0, _1)]
    Bind(String, String),
    #[display(fmt = "{}", _0)]
    Protocol(ProtocolError),
    #[display(fmt = "{}", _0)]
    Eval(EvalError),
}

impl std::error::Error for CalculatorError {}

impl From<ProtocolError> for CalculatorError {
    fn from(e: ProtocolError) -> Self {
        CalculatorError::Protocol(e)
    }
}

impl From<EvalError> for CalculatorError {
    fn from(e: EvalError) -> Self {
        CalculatorError::Eval(e)
    }
}

impl IsErr for CalculatorError {
    fn is_err(&self) -> bool {
        matches!(
            self,
            CalculatorError::Bind(..)
                | CalculatorError::Protocol(ProtocolError::Io(_))
                | CalculatorError::Protocol(ProtocolError::Encode(_))
        )
    }
}
