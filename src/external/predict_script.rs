use std::env;
use std::process::Stdio;

use tokio::process::Command;

use crate::{
    entities::QuoteRequest,
    error::{invalid_output_error, upstream_error, Error},
    pricing::js_number_string,
};

/// An external prediction process.
///
/// The process receives `<args...> <source> <destination> <distance> <weight>
/// <source_factor> <dest_factor>` on its command line, reports the price in
/// crore on stdout and signals failure with a non-zero exit status.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictScript {
    pub program: String,
    pub args: Vec<String>,
}

impl PredictScript {
    pub fn new<I>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Runs this executable's own `predict` subcommand.
    pub fn current_exe() -> Result<Self, Error> {
        let program = env::current_exe()?;
        Ok(Self::new(
            program.to_string_lossy(),
            vec!["predict".to_string()],
        ))
    }

    pub fn argv(&self, request: &QuoteRequest) -> Vec<String> {
        let mut argv = self.args.clone();
        argv.extend([
            request.source.clone(),
            request.destination.clone(),
            js_number_string(request.distance),
            js_number_string(request.weight),
            js_number_string(request.source_factor),
            js_number_string(request.dest_factor),
        ]);
        argv
    }

    #[tracing::instrument(skip(self), fields(program = %self.program))]
    pub async fn predict(&self, request: &QuoteRequest) -> Result<f64, Error> {
        let output = Command::new(&self.program)
            .args(self.argv(request))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "failed to start prediction process");
                upstream_error().with_detail(err.to_string())
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(status = %output.status, stderr = %stderr.trim(), "prediction process failed");
            return Err(upstream_error().with_detail(output.status.to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.trim().parse::<f64>() {
            Ok(price) if price.is_finite() => Ok(price),
            _ => {
                tracing::error!(stdout = %stdout.trim(), "unparsable prediction output");
                Err(invalid_output_error().with_detail(stdout.trim().to_string()))
            }
        }
    }
}

#[test]
fn argv_test() {
    let script = PredictScript::new("python", vec!["scripts/predict.py".to_string()]);
    let request = QuoteRequest::new("KYN", "NGSM", 382.0, 2.5).with_factors(1.2, 1.1);

    assert_eq!(
        script.argv(&request),
        vec!["scripts/predict.py", "KYN", "NGSM", "382", "2.5", "1.2", "1.1"]
    );
}

#[cfg(unix)]
#[test]
fn predict_stdout_test() {
    use tokio_test::block_on;

    // $3 is the distance
    let script = PredictScript::new(
        "sh",
        vec!["-c".to_string(), "echo \" $3 \"".to_string(), "sh".to_string()],
    );
    let request = QuoteRequest::new("DHI", "JL", 0.125, 10.0);

    assert_eq!(block_on(script.predict(&request)).unwrap(), 0.125);
}

#[cfg(unix)]
#[test]
fn predict_failure_test() {
    use tokio_test::block_on;

    let request = QuoteRequest::new("DHI", "JL", 10.0, 10.0);

    let failing = PredictScript::new(
        "sh",
        vec!["-c".to_string(), "echo boom >&2; exit 3".to_string(), "sh".to_string()],
    );
    let err = block_on(failing.predict(&request)).unwrap_err();
    assert_eq!(err.message, "Failed to predict price");

    let garbage = PredictScript::new(
        "sh",
        vec!["-c".to_string(), "echo not-a-number".to_string(), "sh".to_string()],
    );
    let err = block_on(garbage.predict(&request)).unwrap_err();
    assert_eq!(err.message, "Invalid output from prediction model");

    let missing = PredictScript::new("/nonexistent/predict", Vec::new());
    let err = block_on(missing.predict(&request)).unwrap_err();
    assert_eq!(err.message, "Failed to predict price");
}
