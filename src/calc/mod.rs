mod evaluator;
mod lexer;
mod operation;
mod relation;

pub use evaluator::evaluate;
pub use lexer::{classify, next_state, Action};
pub use operation::operate;
pub use relation::{relation, resolve, Relation};

use crate::stack::BoundedStack;

/// Lexical category of one input byte, also used as the operator stack tag.
///
/// `UnaryPlus` and `UnaryMinus` are never produced by [`classify`]; they are
/// derived when a sign shows up where an operand is expected. `Other` is both
/// the "reject" class and the bottom sentinel of the operator stack.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Digit,
    Plus,
    UnaryPlus,
    Minus,
    UnaryMinus,
    Mult,
    Div,
    Power,
    OpenParen,
    CloseParen,
    Other,
}

impl Token {
    #[cfg(test)]
    pub(crate) const ALL: [Token; 11] = [
        Token::Digit,
        Token::Plus,
        Token::UnaryPlus,
        Token::Minus,
        Token::UnaryMinus,
        Token::Mult,
        Token::Div,
        Token::Power,
        Token::OpenParen,
        Token::CloseParen,
        Token::Other,
    ];

    /// Remaps a token read while an operand is expected.
    ///
    /// Signs become unary and `(` stays an opening bracket; anything else
    /// turns into `Other`, which the relation table rejects.
    pub fn as_repeat(self) -> Token {
        match self {
            Token::Plus => Token::UnaryPlus,
            Token::Minus => Token::UnaryMinus,
            Token::OpenParen => Token::OpenParen,
            Token::Digit
            | Token::UnaryPlus
            | Token::UnaryMinus
            | Token::Mult
            | Token::Div
            | Token::Power
            | Token::CloseParen
            | Token::Other => Token::Other,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Token::Digit => "<number>",
            Token::Plus | Token::UnaryPlus => "+",
            Token::Minus | Token::UnaryMinus => "-",
            Token::Mult => "*",
            Token::Div => "/",
            Token::Power => "^",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Other => "<other>",
        }
    }
}

/// Syntactic role the next token has to fill.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum State {
    /// Start of the expression or of a fresh bracket scope.
    Start,
    /// A number or a closed bracket was just completed.
    AwaitingOperator,
    /// An operator was just consumed; a number, sign or `(` comes next.
    AwaitingOperand,
    /// Absorbing failure state.
    Error,
}

impl State {
    #[cfg(test)]
    pub(crate) const ALL: [State; 4] = [
        State::Start,
        State::AwaitingOperator,
        State::AwaitingOperand,
        State::Error,
    ];
}

/// Pending operands of one evaluation.
pub type OperandStack = BoundedStack<f64>;

/// Pending operators of one evaluation, anchored by a `Token::Other` sentinel.
pub type OperatorStack = BoundedStack<Token>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_table() {
        assert_eq!(Token::Plus.as_repeat(), Token::UnaryPlus);
        assert_eq!(Token::Minus.as_repeat(), Token::UnaryMinus);
        assert_eq!(Token::OpenParen.as_repeat(), Token::OpenParen);

        for token in [Token::Mult, Token::Div, Token::Power, Token::CloseParen, Token::Digit] {
            assert_eq!(token.as_repeat(), Token::Other, "{token:?}");
        }
    }
}
