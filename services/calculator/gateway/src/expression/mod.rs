pub use builder::{build, BuildError};
pub use calculator_client::Expr;
pub use tokenizer::tokenize;

mod builder;
mod tokenizer;

/// Tokenizes and builds `expr`, e.g. `"10 - 4 / 2"`
pub fn parse(expr: &str) -> Result<Expr, BuildError> {
    build(&tokenize(expr))
}
