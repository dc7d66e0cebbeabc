use crate::calc::{State, Token};

/// Maps an input byte to its token class.
///
/// `.` counts as a digit so a literal such as `.5` starts a number; the
/// literal itself is validated when it is read.
pub fn classify(byte: u8) -> Token {
    match byte {
        b'0'..=b'9' | b'.' => Token::Digit,
        b'+' => Token::Plus,
        b'-' => Token::Minus,
        b'*' => Token::Mult,
        b'/' => Token::Div,
        b'^' => Token::Power,
        b'(' => Token::OpenParen,
        b')' => Token::CloseParen,
        _ => Token::Other,
    }
}

/// Lexer transition function, total over every `(State, Token)` pair.
pub fn next_state(state: State, token: Token) -> State {
    match state {
        State::Start => match token {
            Token::Digit => State::AwaitingOperator,
            Token::Plus | Token::Minus => State::AwaitingOperand,
            Token::OpenParen => State::Start,
            Token::UnaryPlus
            | Token::UnaryMinus
            | Token::Mult
            | Token::Div
            | Token::Power
            | Token::CloseParen
            | Token::Other => State::Error,
        },
        State::AwaitingOperator => match token {
            Token::Plus | Token::Minus | Token::Mult | Token::Div | Token::Power => {
                State::AwaitingOperand
            }
            Token::CloseParen => State::AwaitingOperator,
            Token::Digit
            | Token::UnaryPlus
            | Token::UnaryMinus
            | Token::OpenParen
            | Token::Other => State::Error,
        },
        State::AwaitingOperand => match token {
            Token::Digit => State::AwaitingOperator,
            Token::Plus | Token::Minus | Token::OpenParen => State::AwaitingOperand,
            Token::UnaryPlus
            | Token::UnaryMinus
            | Token::Mult
            | Token::Div
            | Token::Power
            | Token::CloseParen
            | Token::Other => State::Error,
        },
        State::Error => State::Error,
    }
}

/// Behaviour selected by the pair of states spanning one token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    /// Scan a numeric literal and push it onto the operand stack.
    ReadNumber,
    /// Resolve the current byte's token against the operator stack top.
    ReadOperator,
    /// Resolve the current token after remapping it through the repeat table
    /// (unary signs, nested `(`).
    RepeatAsUnary,
    /// Resolve the current token as read right after a completed operand.
    RepeatAsNumberContext,
    /// Fail with `InvalidSyntax` without touching the stacks.
    Reject,
}

impl Action {
    pub fn select(previous: State, current: State) -> Action {
        match (previous, current) {
            (State::Start, State::Start) => Action::ReadOperator,
            (State::Start, State::AwaitingOperator) => Action::ReadNumber,
            (State::Start, State::AwaitingOperand) => Action::RepeatAsUnary,
            (State::Start, State::Error) => Action::Reject,

            (State::AwaitingOperator, State::Start) => Action::Reject,
            (State::AwaitingOperator, State::AwaitingOperator) => Action::RepeatAsNumberContext,
            (State::AwaitingOperator, State::AwaitingOperand) => Action::ReadOperator,
            (State::AwaitingOperator, State::Error) => Action::Reject,

            (State::AwaitingOperand, State::Start) => Action::Reject,
            (State::AwaitingOperand, State::AwaitingOperator) => Action::ReadNumber,
            (State::AwaitingOperand, State::AwaitingOperand) => Action::RepeatAsUnary,
            (State::AwaitingOperand, State::Error) => Action::Reject,

            (State::Error, State::Start)
            | (State::Error, State::AwaitingOperator)
            | (State::Error, State::AwaitingOperand)
            | (State::Error, State::Error) => Action::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        for byte in b'0'..=b'9' {
            assert_eq!(classify(byte), Token::Digit);
        }
        assert_eq!(classify(b'.'), Token::Digit);
        assert_eq!(classify(b'+'), Token::Plus);
        assert_eq!(classify(b'-'), Token::Minus);
        assert_eq!(classify(b'*'), Token::Mult);
        assert_eq!(classify(b'/'), Token::Div);
        assert_eq!(classify(b'^'), Token::Power);
        assert_eq!(classify(b'('), Token::OpenParen);
        assert_eq!(classify(b')'), Token::CloseParen);
    }

    #[test]
    fn test_classify_never_yields_unary() {
        for byte in 0..=u8::MAX {
            let token = classify(byte);
            assert_ne!(token, Token::UnaryPlus);
            assert_ne!(token, Token::UnaryMinus);
        }
    }

    #[test]
    fn test_classify_rejects_unknown_bytes() {
        for byte in [b'a', b'x', b'%', b'@', b' ', b'e', 0x00, 0x7f, 0xc3, 0xff] {
            assert_eq!(classify(byte), Token::Other, "byte {byte:#x}");
        }
    }

    #[test]
    fn test_error_state_is_absorbing() {
        for token in Token::ALL {
            assert_eq!(next_state(State::Error, token), State::Error);
        }
    }

    #[test]
    fn test_other_always_errors() {
        for state in State::ALL {
            assert_eq!(next_state(state, Token::Other), State::Error);
        }
    }

    #[test]
    fn test_transitions_from_start() {
        assert_eq!(next_state(State::Start, Token::Digit), State::AwaitingOperator);
        assert_eq!(next_state(State::Start, Token::Minus), State::AwaitingOperand);
        assert_eq!(next_state(State::Start, Token::OpenParen), State::Start);
        assert_eq!(next_state(State::Start, Token::CloseParen), State::Error);
        assert_eq!(next_state(State::Start, Token::Mult), State::Error);
    }

    #[test]
    fn test_transitions_after_operand() {
        assert_eq!(
            next_state(State::AwaitingOperator, Token::Power),
            State::AwaitingOperand
        );
        assert_eq!(
            next_state(State::AwaitingOperator, Token::CloseParen),
            State::AwaitingOperator
        );
        assert_eq!(next_state(State::AwaitingOperator, Token::Digit), State::Error);
        assert_eq!(
            next_state(State::AwaitingOperator, Token::OpenParen),
            State::Error
        );
    }

    #[test]
    fn test_transitions_after_operator() {
        assert_eq!(
            next_state(State::AwaitingOperand, Token::Digit),
            State::AwaitingOperator
        );
        assert_eq!(
            next_state(State::AwaitingOperand, Token::OpenParen),
            State::AwaitingOperand
        );
        assert_eq!(next_state(State::AwaitingOperand, Token::Div), State::Error);
        assert_eq!(
            next_state(State::AwaitingOperand, Token::CloseParen),
            State::Error
        );
    }

    #[test]
    fn test_entering_error_always_rejects() {
        for state in State::ALL {
            assert_eq!(Action::select(state, State::Error), Action::Reject);
            assert_eq!(Action::select(State::Error, state), Action::Reject);
        }
    }

    #[test]
    fn test_reachable_pairs_never_reject() {
        for state in State::ALL {
            if state == State::Error {
                continue;
            }
            for token in Token::ALL {
                let next = next_state(state, token);
                if next != State::Error {
                    assert_ne!(
                        Action::select(state, next),
                        Action::Reject,
                        "{state:?} --{token:?}--> {next:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_action_selection() {
        assert_eq!(
            Action::select(State::AwaitingOperand, State::AwaitingOperator),
            Action::ReadNumber
        );
        assert_eq!(
            Action::select(State::AwaitingOperator, State::AwaitingOperand),
            Action::ReadOperator
        );
        assert_eq!(
            Action::select(State::AwaitingOperand, State::AwaitingOperand),
            Action::RepeatAsUnary
        );
        assert_eq!(
            Action::select(State::AwaitingOperator, State::AwaitingOperator),
            Action::RepeatAsNumberContext
        );
    }
}
