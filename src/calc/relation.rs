use log::trace;

use crate::calc::{operate, OperandStack, OperatorStack, Token};
use crate::error::{CalcError, Result};

/// Outcome of comparing the operator stack top with an incoming token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Relation {
    /// Push the incoming token on top of the stack.
    Push,
    /// The incoming `)` closes the `(` on top of the stack.
    PopMatch,
    /// Apply the top operator, then compare again with the new top.
    Reduce,
    Invalid,
}

/// Precedence table over `(stack top, incoming)`.
///
/// `* /` bind tighter than `+ -` and are left-associative among themselves;
/// `^` binds tighter than all four and is right-associative. Unary signs and
/// `(` always push. A `)` reduces everything down to its matching `(`.
pub fn relation(top: Token, incoming: Token) -> Relation {
    use Relation::{Invalid, PopMatch, Push, Reduce};

    match top {
        // sentinel
        Token::Other => match incoming {
            Token::Plus
            | Token::UnaryPlus
            | Token::Minus
            | Token::UnaryMinus
            | Token::Mult
            | Token::Div
            | Token::Power
            | Token::OpenParen => Push,
            Token::CloseParen | Token::Digit | Token::Other => Invalid,
        },
        Token::OpenParen => match incoming {
            Token::Plus
            | Token::UnaryPlus
            | Token::Minus
            | Token::UnaryMinus
            | Token::Mult
            | Token::Div
            | Token::Power
            | Token::OpenParen => Push,
            Token::CloseParen => PopMatch,
            Token::Digit | Token::Other => Invalid,
        },
        Token::Plus | Token::Minus => match incoming {
            Token::Plus | Token::Minus | Token::CloseParen => Reduce,
            Token::UnaryPlus
            | Token::UnaryMinus
            | Token::Mult
            | Token::Div
            | Token::Power
            | Token::OpenParen => Push,
            Token::Digit | Token::Other => Invalid,
        },
        Token::Mult | Token::Div | Token::UnaryPlus | Token::UnaryMinus => match incoming {
            Token::Plus | Token::Minus | Token::Mult | Token::Div | Token::CloseParen => Reduce,
            Token::UnaryPlus | Token::UnaryMinus | Token::Power | Token::OpenParen => Push,
            Token::Digit | Token::Other => Invalid,
        },
        Token::Power => match incoming {
            Token::Plus | Token::Minus | Token::Mult | Token::Div | Token::CloseParen => Reduce,
            Token::UnaryPlus | Token::UnaryMinus | Token::Power | Token::OpenParen => Push,
            Token::Digit | Token::Other => Invalid,
        },
        // never stored on the operator stack
        Token::Digit | Token::CloseParen => Invalid,
    }
}

/// Resolves `incoming` against the operator stack, reducing pending
/// operators onto `operands` until it can be pushed or has closed its
/// bracket.
pub fn resolve(
    incoming: Token,
    operands: &mut OperandStack,
    operators: &mut OperatorStack,
) -> Result<()> {
    loop {
        let top = *operators.peek().ok_or(CalcError::InvalidSyntax)?;
        let decision = relation(top, incoming);
        trace!("relation {top:?} / {incoming:?} -> {decision:?}");

        match decision {
            Relation::Push => {
                operators.push(incoming)?;
                return Ok(());
            }
            Relation::PopMatch => {
                operators.pop();
                return Ok(());
            }
            Relation::Reduce => {
                operators.pop();
                operate(top, operands)?;
            }
            Relation::Invalid => return Err(CalcError::InvalidSyntax),
        }
    }
}
