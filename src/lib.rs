pub mod calc;
pub mod error;
pub mod stack;

use rayon::prelude::*;

pub use calc::evaluate;
pub use error::{CalcError, Result};

/// Evaluates independent expressions in parallel.
///
/// Each evaluation owns its own stacks, so nothing is shared between the
/// worker threads. Results come back in input order.
pub fn evaluate_batch<S>(expressions: &[S]) -> Vec<Result<f64>>
where
    S: AsRef<str> + Sync,
{
    expressions
        .par_iter()
        .map(|expression| evaluate(expression.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_preserves_order() {
        let expressions = ["1 + 1", "2 * 3", "1 / 0", "(", "2 ^ 10"];
        let results = evaluate_batch(&expressions[..]);

        assert_eq!(
            results,
            vec![
                Ok(2.0),
                Ok(6.0),
                Err(CalcError::MathError),
                Err(CalcError::InvalidSyntax),
                Ok(1024.0),
            ]
        );
    }

    #[test]
    fn test_batch_matches_sequential() {
        let expressions: Vec<String> = (0..200)
            .map(|i| format!("{i} * 2 - ({i} + 1) / 4"))
            .collect();
        let sequential: Vec<_> = expressions.iter().map(|e| evaluate(e)).collect();
        assert_eq!(evaluate_batch(&expressions[..]), sequential);
    }

    #[test]
    fn test_empty_batch() {
        let expressions: [&str; 0] = [];
        assert!(evaluate_batch(&expressions[..]).is_empty());
    }
}
