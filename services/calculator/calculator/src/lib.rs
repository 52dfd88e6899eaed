//! Evaluator role: accepts one expression tree per connection, evaluates it
//! and replies with a single-leaf result tree.

#[macro_use]
extern crate lazy_static;

pub mod api;
pub mod config;
pub mod error;
pub mod eval;
pub mod server;
mod shutdown;

pub use crate::api::Handler;
pub use crate::config::Config;
pub use crate::error::CalculatorError;
pub use crate::eval::{evaluate, evaluate_lenient, EvalError};
pub use crate::server::{Server, ServerHandle};
