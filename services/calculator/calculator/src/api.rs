use std::convert::TryFrom;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use calculator_client::{read_payload, write_payload, Expr, Format, ProtocolError, Reply, Tree};
use telemetry::Measure;

use crate::config::Config;
use crate::error::CalculatorError;
use crate::eval::{evaluate, evaluate_lenient};

lazy_static! {
    static ref SERVE_MEASURE: Measure = Measure::new("evaluator", "serve");
}

/// Services the evaluator side of the request/reply exchange
#[derive(Debug, Clone)]
pub struct Handler {
    format: Format,
    lenient: bool,
    max_payload: usize,
}

impl Handler {
    pub fn new(config: &Config) -> Handler {
        Handler {
            format: config.format,
            lenient: config.lenient,
            max_payload: config.max_payload,
        }
    }

    /// Reads one request from `stream`, evaluates it and writes one reply.
    ///
    /// Anything wrong with the request itself is reported to the peer as a
    /// failure reply; only transport errors are returned without replying.
    pub async fn serve<S>(&self, stream: &mut S) -> Result<Reply, CalculatorError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        SERVE_MEASURE
            .stats(async move {
                let reply = match read_payload(stream, self.format, self.max_payload).await {
                    Ok(tree) => self.reply(tree),
                    Err(e @ ProtocolError::Io(_)) => return Err(e.into()),
                    Err(e) => {
                        warn!("Rejected request: {}", e);
                        Reply::Failure(e.to_string())
                    }
                };

                let payload = self.format.encode(&Tree::from(&reply))?;
                write_payload(stream, &payload).await?;
                Ok(reply)
            })
            .await
    }

    /// Evaluates a single decoded request
    pub fn compute(&self, tree: Tree) -> Result<i64, CalculatorError> {
        if self.lenient {
            return Ok(evaluate_lenient(&tree)?);
        }

        let expr = Expr::try_from(tree)?;
        debug!("Evaluating {}", expr);
        Ok(evaluate(&expr)?)
    }

    fn reply(&self, tree: Tree) -> Reply {
        match self.compute(tree) {
            Ok(val) => Reply::Value(val),
            Err(e) => {
                warn!("Rejected request: {}", e);
                Reply::Failure(e.to_string())
            }
        }
    }
}
