use std::io::Write;

use crate::config::Config;
use crate::entities::{find_station, is_valid_location_pair};
use crate::error::{invalid_input_error, location_not_found_error, Error};
use crate::external::predict_client::PredictClient;
use crate::pricing::{format_inr, Jitter};

pub struct QuoteArgs {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub weight: f64,
    pub api_url: Option<String>,
    pub deterministic: bool,
}

pub async fn run<O: Write>(args: QuoteArgs, out: &mut O) -> Result<(), Error> {
    let api_url = match args.api_url {
        Some(url) => url,
        None => Config::from_env()?.api_url,
    };

    if !(args.distance > 0.0 && args.weight > 0.0) {
        return Err(invalid_input_error().with_detail("distance and weight must be positive"));
    }

    let source = find_station(&args.from).ok_or_else(|| location_not_found_error(&args.from))?;
    let destination = find_station(&args.to).ok_or_else(|| location_not_found_error(&args.to))?;

    if !is_valid_location_pair(&source.id, &destination.id) {
        return Err(invalid_input_error().with_detail("source and destination must differ"));
    }

    let jitter = if args.deterministic {
        Jitter::Hashed
    } else {
        Jitter::Random
    };
    let client = PredictClient::new(&api_url).with_fallback_jitter(jitter);

    let rupees = client
        .quote_rupees(&source, &destination, args.distance, args.weight)
        .await?;

    writeln!(
        out,
        "{} ({}) -> {} ({}), {} km, {} t: {}",
        source.name,
        source.id,
        destination.name,
        destination.id,
        args.distance,
        args.weight,
        format_inr(rupees)
    )?;

    Ok(())
}

#[test]
fn quote_offline_test() {
    use tokio_test::block_on;

    let args = QuoteArgs {
        from: "kyn".into(),
        to: "NGSM".into(),
        distance: 100.0,
        weight: 5.0,
        api_url: Some("http://127.0.0.1:9".into()),
        deterministic: true,
    };

    let mut out = Vec::new();
    block_on(run(args, &mut out)).unwrap();

    // (5000 + 5000) * 1.15 * 1.03
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Kalyan (KYN) -> Nagasamudram (NGSM), 100 km, 5 t: ₹11,845\n"
    );
}

#[test]
fn quote_rejects_same_station_test() {
    use tokio_test::block_on;

    let args = QuoteArgs {
        from: "DHI".into(),
        to: "dhi".into(),
        distance: 10.0,
        weight: 1.0,
        api_url: Some("http://127.0.0.1:9".into()),
        deterministic: true,
    };

    let err = block_on(run(args, &mut Vec::new())).unwrap_err();
    assert_eq!(err.code, 100);
}

#[test]
fn quote_unknown_station_test() {
    use tokio_test::block_on;

    let args = QuoteArgs {
        from: "KYN".into(),
        to: "NOWHERE".into(),
        distance: 10.0,
        weight: 1.0,
        api_url: Some("http://127.0.0.1:9".into()),
        deterministic: true,
    };

    let err = block_on(run(args, &mut Vec::new())).unwrap_err();
    assert_eq!(err.code, 105);
}
