use log::error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use telemetry::IsErr;

use crate::client::CalculatorClient;
use crate::error::GatewayError;
use crate::expression::parse;

fn banner(client: &CalculatorClient) -> String {
    format!(
        "\nRemote calculator with - {}\n\n\
         WRONG Expression:   10+4/2 (Without spaces)\n\
         CORRECT Expression: 10 + 4 / 2 (With spaces)\n\n",
        client.format().to_string().to_uppercase()
    )
}

/// Parses `line` and has it evaluated remotely. Expressions that fail to
/// build never reach the evaluator.
pub async fn evaluate_line(client: &CalculatorClient, line: &str) -> Result<i64, GatewayError> {
    let expr = parse(line)?;
    client.compute(&expr).await
}

/// Reads one expression per line until `input` is exhausted
pub async fn run<R, W>(client: &CalculatorClient, input: R, output: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(banner(client).as_bytes()).await?;

    let mut lines = input.lines();
    loop {
        output.write_all(b"Expression: ").await?;
        output.flush().await?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        let message = match evaluate_line(client, &line).await {
            Ok(val) => format!("Result: {}\n\n", val),
            Err(e) => {
                if e.is_err() {
                    error!("Request failed: {}", e);
                }
                format!("Error: {}\n\n", e)
            }
        };
        output.write_all(message.as_bytes()).await?;
    }

    output.write_all(b"\n").await?;
    output.flush().await
}
