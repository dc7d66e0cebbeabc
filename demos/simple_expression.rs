use log::debug;
use stackcalc::{evaluate, CalcError};

fn main() {
    pretty_env_logger::init();

    let expressions = [
        "2 + 3",
        "200-100+50.5",
        "(5 + 3) * 2",
        "4 * 5 / ((4 -5))",
        "(2) ^ -2",
        "-5 ^ 2",
        "        --\t\t5",
        "0/0",
        "5(7)",
    ];

    for expression in expressions {
        match evaluate(expression) {
            Ok(value) => println!("{expression:>20} = {value}"),
            Err(err @ CalcError::MathError) => println!("{expression:>20} : {err}"),
            Err(err) => {
                debug!("status code {}", err.code());
                println!("{expression:>20} : {err}");
            }
        }
    }
}
