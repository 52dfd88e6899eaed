use std::convert::TryFrom;

use tokio::net::TcpStream;

use calculator_client::{read_payload, write_payload, Expr, Format, Reply, Tree};
use telemetry::Measure;

use crate::config::Config;
use crate::error::GatewayError;

lazy_static! {
    static ref COMPUTE_MEASURE: Measure = Measure::new("requester", "compute");
}

/// Sends each expression to the evaluator over a fresh connection
pub struct CalculatorClient {
    upstream: String,
    format: Format,
    max_payload: usize,
}

impl CalculatorClient {
    pub fn new(config: &Config) -> CalculatorClient {
        CalculatorClient {
            upstream: config.upstream(),
            format: config.format,
            max_payload: config.max_payload,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub async fn compute(&self, expr: &Expr) -> Result<i64, GatewayError> {
        COMPUTE_MEASURE
            .stats(async move {
                let request = self.format.encode(&Tree::from(expr))?;

                let mut stream = TcpStream::connect(&self.upstream)
                    .await
                    .map_err(|e| GatewayError::Connect(self.upstream.clone(), e.to_string()))?;

                write_payload(&mut stream, &request).await?;
                let reply = read_payload(&mut stream, self.format, self.max_payload).await?;

                match Reply::try_from(reply)? {
                    Reply::Value(val) => Ok(val),
                    Reply::Failure(message) => Err(GatewayError::Remote(message)),
                }
            })
            .await
    }
}
