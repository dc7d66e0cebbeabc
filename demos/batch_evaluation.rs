use stackcalc::evaluate_batch;

fn main() {
    pretty_env_logger::init();

    let expressions: Vec<String> = (1..=8)
        .map(|i| format!("({i} + 1) ^ 2 / {i} - {}", i - 1))
        .collect();

    let results = evaluate_batch(&expressions[..]);
    for (i, (expression, result)) in expressions.iter().zip(&results).enumerate() {
        println!("Result {}: {} = {:?}", i, expression, result);
    }
}
