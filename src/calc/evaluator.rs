use log::{debug, trace};

use crate::calc::{
    classify, next_state, operate, resolve, Action, OperandStack, OperatorStack, State, Token,
};
use crate::error::{CalcError, Result};
use crate::stack::BoundedStack;

/// Evaluates an infix arithmetic expression in a single left-to-right pass.
///
/// Supports `+ - * / ^`, parentheses, unary signs and decimal literals;
/// ASCII whitespace between tokens is ignored.
///
/// # Returns
///
/// * `Ok(f64)` if the expression is well-formed and numerically defined.
/// * `Err(CalcError::InvalidSyntax)` for any malformed input, including `""`.
/// * `Err(CalcError::MathError)` for division by zero or `0 ^ -n`.
/// * `Err(CalcError::AllocationFailure)` if the stacks could not be reserved.
pub fn evaluate(expression: &str) -> Result<f64> {
    debug!("Evaluating expression: {:?}", expression);

    let result = Evaluation::new(expression.as_bytes()).and_then(Evaluation::run);
    match &result {
        Ok(value) => debug!("Result: {value}"),
        Err(error) => debug!("Evaluation failed: {error}"),
    }
    result
}

struct Evaluation<'a> {
    input: &'a [u8],
    cursor: usize,
    state: State,
    operands: OperandStack,
    operators: OperatorStack,
}

impl<'a> Evaluation<'a> {
    fn new(input: &'a [u8]) -> Result<Self> {
        // at most one operand or operator per byte, plus the sentinel
        let operands = BoundedStack::with_capacity(input.len())?;
        let mut operators = BoundedStack::with_capacity(input.len() + 1)?;
        operators.push(Token::Other)?;

        Ok(Self {
            input,
            cursor: 0,
            state: State::Start,
            operands,
            operators,
        })
    }

    fn run(mut self) -> Result<f64> {
        self.skip_whitespace();

        while let Some(&byte) = self.input.get(self.cursor) {
            let previous = self.state;
            let token = classify(byte);
            self.state = next_state(previous, token);

            let action = Action::select(previous, self.state);
            trace!(
                "offset {}: {:?} {:?} -> {:?} => {:?}",
                self.cursor,
                token,
                previous,
                self.state,
                action
            );

            self.perform(action, byte)?;
            self.skip_whitespace();
        }

        self.finalize()
    }

    fn perform(&mut self, action: Action, byte: u8) -> Result<()> {
        match action {
            Action::ReadNumber => self.read_number(),
            Action::ReadOperator | Action::RepeatAsNumberContext => {
                self.cursor += 1;
                resolve(classify(byte), &mut self.operands, &mut self.operators)
            }
            Action::RepeatAsUnary => {
                self.cursor += 1;
                resolve(
                    classify(byte).as_repeat(),
                    &mut self.operands,
                    &mut self.operators,
                )
            }
            Action::Reject => {
                debug!(
                    "Unexpected {:?} at offset {}",
                    char::from(byte),
                    self.cursor
                );
                Err(CalcError::InvalidSyntax)
            }
        }
    }

    fn read_number(&mut self) -> Result<()> {
        let rest = &self.input[self.cursor..];
        let len = literal_len(rest);
        if len == 0 {
            debug!("Malformed number at offset {}", self.cursor);
            return Err(CalcError::InvalidSyntax);
        }

        let value = std::str::from_utf8(&rest[..len])
            .ok()
            .and_then(|literal| literal.parse::<f64>().ok())
            .ok_or(CalcError::InvalidSyntax)?;

        trace!("number {value}");
        self.operands.push(value)?;
        self.cursor += len;
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while self
            .input
            .get(self.cursor)
            .is_some_and(|byte| byte.is_ascii_whitespace())
        {
            self.cursor += 1;
        }
    }

    /// Drains the pending operators once the input is exhausted.
    fn finalize(mut self) -> Result<f64> {
        if self.state != State::AwaitingOperator {
            debug!("Expression ended in state {:?}", self.state);
            return Err(CalcError::InvalidSyntax);
        }

        while let Some(&top) = self.operators.peek() {
            if top == Token::Other {
                break;
            }
            operate(top, &mut self.operands)?;
            self.operators.pop();
        }

        let result = self.operands.pop().ok_or(CalcError::InvalidSyntax)?;
        if !self.operands.is_empty() {
            return Err(CalcError::InvalidSyntax);
        }
        Ok(result)
    }
}

/// Length of the longest decimal floating-point literal at the start of
/// `bytes`, or 0 if there is none.
///
/// Accepts `12`, `1.5`, `1.`, `.5` and an optional exponent (`1e3`,
/// `2.5E-2`); the exponent is only consumed when it has digits.
fn literal_len(bytes: &[u8]) -> usize {
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut len = digits(0);
    let mut mantissa_digits = len;
    if bytes.get(len) == Some(&b'.') {
        let fraction = digits(len + 1);
        len += 1 + fraction;
        mantissa_digits += fraction;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(len), Some(b'e' | b'E')) {
        let mut end = len + 1;
        if matches!(bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let exponent = digits(end);
        if exponent > 0 {
            len = end + exponent;
        }
    }

    len
}
