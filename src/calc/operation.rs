use log::trace;

use crate::calc::{OperandStack, Token};
use crate::error::{CalcError, Result};

/// Applies `operator` to the top of the operand stack.
///
/// Binary operators pop the right operand first, then the left one; every
/// handler pushes exactly one result. An `OpenParen` reaching this point
/// means an empty or unclosed bracket.
pub fn operate(operator: Token, operands: &mut OperandStack) -> Result<()> {
    let result = match operator {
        Token::Plus => binary(operands, |left, right| Ok(left + right))?,
        Token::Minus => binary(operands, |left, right| Ok(left - right))?,
        Token::Mult => binary(operands, |left, right| Ok(left * right))?,
        Token::Div => binary(operands, divide)?,
        Token::Power => binary(operands, power)?,
        Token::UnaryPlus => pop_operand(operands)?,
        Token::UnaryMinus => -pop_operand(operands)?,
        Token::OpenParen | Token::CloseParen | Token::Digit | Token::Other => {
            return Err(CalcError::InvalidSyntax)
        }
    };

    trace!("apply {} -> {result}", operator.symbol());
    operands.push(result)?;
    Ok(())
}

fn pop_operand(operands: &mut OperandStack) -> Result<f64> {
    operands.pop().ok_or(CalcError::InvalidSyntax)
}

fn binary<F>(operands: &mut OperandStack, apply: F) -> Result<f64>
where
    F: FnOnce(f64, f64) -> Result<f64>,
{
    let right = pop_operand(operands)?;
    let left = pop_operand(operands)?;
    apply(left, right)
}

fn divide(dividend: f64, divisor: f64) -> Result<f64> {
    if divisor == 0.0 {
        return Err(CalcError::MathError);
    }
    Ok(dividend / divisor)
}

/// Beyond 2^53 a counting loop can no longer step through every integer.
const MAX_COUNTED_EXPONENT: f64 = 9_007_199_254_740_992.0;

/// Integer power: a negative exponent takes the reciprocal of the base, and
/// the fractional part of the exponent is dropped (`2 ^ 2.5 == 4`).
fn power(base: f64, exponent: f64) -> Result<f64> {
    if exponent < 0.0 && base == 0.0 {
        return Err(CalcError::MathError);
    }

    let (base, exponent) = if exponent < 0.0 {
        (1.0 / base, -exponent)
    } else {
        (base, exponent)
    };

    let count = exponent.trunc();
    if count > MAX_COUNTED_EXPONENT {
        return Ok(base.powf(count));
    }
    Ok(repeated_product(base, count))
}

/// Multiplies `base` into `1.0` once per unit of `count`, left to right.
///
/// Once a step leaves the magnitude unchanged (zero, infinity, `|base| == 1`
/// or a rounding fixed point) every later step does too, and only the sign
/// can still alternate, so the remaining steps are settled by parity.
fn repeated_product(base: f64, count: f64) -> f64 {
    // a NaN count runs no steps
    if count.is_nan() || count < 1.0 {
        return 1.0;
    }

    let steps = count as u64;
    let mut result = 1.0;
    for done in 0..steps {
        let next = result * base;
        if next.is_nan() {
            return next;
        }
        if next.abs() == result.abs() {
            let remaining = steps - done;
            return if base.is_sign_negative() && remaining % 2 == 1 {
                -result
            } else {
                result
            };
        }
        result = next;
    }
    result
}
