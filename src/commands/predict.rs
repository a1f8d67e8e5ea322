use std::io::Write;

use crate::entities::{QuoteRequest, DEFAULT_LOCATION_FACTOR};
use crate::pricing::predict_price;

const USAGE: &str = "Usage: railquote predict <source> <destination> <distance> <weight> [source_factor] [dest_factor]";

/// Prints the price for one route on `out`; diagnostics go to `err`.
/// Returns the process exit code.
pub fn run<O: Write, E: Write>(args: &[String], out: &mut O, err: &mut E) -> u8 {
    if args.len() < 4 {
        let _ = writeln!(err, "{}", USAGE);
        return 1;
    }

    let request = match parse(args) {
        Some(request) => request,
        None => {
            let _ = writeln!(err, "Error: Invalid input format");
            return 1;
        }
    };

    if request.distance <= 0.0 || request.weight <= 0.0 {
        let _ = writeln!(err, "Error: Distance and weight must be positive numbers");
        return 1;
    }
    if request.source_factor <= 0.0 || request.dest_factor <= 0.0 {
        let _ = writeln!(err, "Error: Location factors must be positive numbers");
        return 1;
    }

    match predict_price(&request) {
        Ok(price) => match writeln!(out, "{}", price) {
            Ok(()) => 0,
            Err(_) => 1,
        },
        Err(e) => {
            let _ = writeln!(err, "Error in prediction: {}", e);
            1
        }
    }
}

fn parse(args: &[String]) -> Option<QuoteRequest> {
    let number = |value: &String| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
    };

    let distance = number(&args[2])?;
    let weight = number(&args[3])?;
    let source_factor = match args.get(4) {
        Some(value) => number(value)?,
        None => DEFAULT_LOCATION_FACTOR,
    };
    let dest_factor = match args.get(5) {
        Some(value) => number(value)?,
        None => DEFAULT_LOCATION_FACTOR,
    };

    Some(
        QuoteRequest::new(&args[0], &args[1], distance, weight)
            .with_factors(source_factor, dest_factor),
    )
}

#[cfg(test)]
fn run_with(args: &[&str]) -> (u8, String, String) {
    let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    let mut out = Vec::new();
    let mut err = Vec::new();

    let code = run(&args, &mut out, &mut err);

    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn predict_reference_test() {
    let (code, out, err) = run_with(&["KYN", "NGSM", "382", "1374"]);
    assert_eq!(code, 0);
    assert_eq!(out, "0.0853\n");
    assert!(err.is_empty());
}

#[test]
fn predict_output_parses_test() {
    let (code, out, _) = run_with(&["DHI", "JL", "1200", "30", "1.4", "1.15"]);
    assert_eq!(code, 0);

    let request = QuoteRequest::new("DHI", "JL", 1200.0, 30.0).with_factors(1.4, 1.15);
    assert_eq!(
        out.trim().parse::<f64>().unwrap(),
        predict_price(&request).unwrap()
    );
}

#[test]
fn predict_rejects_test() {
    let (code, out, err) = run_with(&["KYN", "NGSM", "382"]);
    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert!(err.starts_with("Usage:"));

    let (code, _, err) = run_with(&["KYN", "NGSM", "far", "1374"]);
    assert_eq!(code, 1);
    assert_eq!(err, "Error: Invalid input format\n");

    let (code, _, err) = run_with(&["KYN", "NGSM", "-5", "1374"]);
    assert_eq!(code, 1);
    assert_eq!(err, "Error: Distance and weight must be positive numbers\n");

    let (code, _, err) = run_with(&["KYN", "NGSM", "5", "1374", "0"]);
    assert_eq!(code, 1);
    assert_eq!(err, "Error: Location factors must be positive numbers\n");
}
