//! Success, failure and latency measures for the calculator roles

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;

use std::convert::Infallible;
use std::future::Future;

use prometheus::{Encoder, Histogram, HistogramVec, IntCounter, IntCounterVec, TextEncoder};

lazy_static! {
    static ref SUCCESS: IntCounterVec = register_int_counter_vec!(
        "calculator_success_total",
        "Completed operations",
        &["role", "operation"]
    )
    .unwrap();
    static ref FAILURE: IntCounterVec = register_int_counter_vec!(
        "calculator_failure_total",
        "Failed operations",
        &["role", "operation"]
    )
    .unwrap();
    static ref TIMER: HistogramVec = register_histogram_vec!(
        "calculator_duration_seconds",
        "Operation latency",
        &["role", "operation"]
    )
    .unwrap();
}

/// Classifies errors that should not count as failures, e.g. a malformed
/// expression is the caller's mistake, not an outage
pub trait IsErr {
    fn is_err(&self) -> bool {
        true
    }
}

impl IsErr for Infallible {
    fn is_err(&self) -> bool {
        false
    }
}

#[derive(Clone)]
pub struct Measure {
    success: IntCounter,
    failure: IntCounter,
    timer: Histogram,
}

impl Measure {
    pub fn new(role: &str, operation: &str) -> Measure {
        Measure {
            success: SUCCESS.with_label_values(&[role, operation]),
            failure: FAILURE.with_label_values(&[role, operation]),
            timer: TIMER.with_label_values(&[role, operation]),
        }
    }

    pub async fn stats<F, T, E>(&self, inner: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: IsErr,
    {
        let timer = self.timer.start_timer();
        let r = inner.await;
        timer.observe_duration();
        self.record(&r);
        r
    }

    fn record<T, E: IsErr>(&self, r: &Result<T, E>) {
        match r {
            Ok(_) => self.success.inc(),
            Err(e) if !e.is_err() => self.success.inc(),
            Err(_) => self.failure.inc(),
        }
    }
}

/// Renders every registered metric in the prometheus text format
pub fn encode() -> Result<String, Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use tokio::time::Duration;

    use super::*;

    enum TestError {
        Transport,
        BadExpression,
    }

    impl IsErr for TestError {
        fn is_err(&self) -> bool {
            match self {
                Self::Transport => true,
                Self::BadExpression => false,
            }
        }
    }

    fn counts(role: &str, operation: &str) -> (u64, u64, u64) {
        (
            SUCCESS.with_label_values(&[role, operation]).get(),
            FAILURE.with_label_values(&[role, operation]).get(),
            TIMER
                .with_label_values(&[role, operation])
                .get_sample_count(),
        )
    }

    #[tokio::test]
    async fn test_success() {
        let m = Measure::new("test", "success");

        let f = async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<_, Infallible>(42)
        };

        assert_eq!(m.stats(f).await.ok(), Some(42));
        assert_eq!(counts("test", "success"), (1, 0, 1));
        assert!(
            TIMER
                .with_label_values(&["test", "success"])
                .get_sample_sum()
                >= 0.01
        );
    }

    #[tokio::test]
    async fn test_failure() {
        let m = Measure::new("test", "failure");

        let _ = m.stats(async { Err::<(), _>(TestError::Transport) }).await;

        assert_eq!(counts("test", "failure"), (0, 1, 1));
    }

    #[tokio::test]
    async fn test_recoverable() {
        let m = Measure::new("test", "recoverable");

        let _ = m
            .stats(async { Err::<(), _>(TestError::BadExpression) })
            .await;

        assert_eq!(counts("test", "recoverable"), (1, 0, 1));
    }

    #[tokio::test]
    async fn test_encode() -> Result<(), Box<dyn std::error::Error>> {
        let m = Measure::new("test", "encode");
        let _ = m.stats(async { Ok::<_, Infallible>(()) }).await;

        let text = encode()?;
        assert!(text.contains("calculator_success_total"));
        assert!(text.contains("operation=\"encode\""));
        Ok(())
    }
}
