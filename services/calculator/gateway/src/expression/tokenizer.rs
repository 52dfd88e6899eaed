/// Splits on every single space. Operators must be space separated:
/// `"10+4/2"` is one token.
pub fn tokenize(expr: &str) -> Vec<&str> {
    expr.split(' ').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("10 + 4 / 2"), vec!["10", "+", "4", "/", "2"]);
        assert_eq!(tokenize("10+4/2"), vec!["10+4/2"]);
        assert_eq!(tokenize(""), vec![""]);
        assert_eq!(tokenize("1  + 2"), vec!["1", "", "+", "2"]);
        assert_eq!(tokenize(" 7"), vec!["", "7"]);
    }
}
