//! Requester role: turns expression lines into trees and has them evaluated
//! by a remote `calculator`.

#[macro_use]
extern crate lazy_static;

pub mod client;
pub mod config;
pub mod error;
pub mod expression;
pub mod prompt;

pub use crate::client::CalculatorClient;
pub use crate::config::Config;
pub use crate::error::GatewayError;
