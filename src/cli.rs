use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "railquote", version, about = "Rail freight price quotes")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Listen address, overrides HOST
        #[arg(long)]
        host: Option<String>,

        /// Listen port, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the predicted price in crore for one route and exit
    ///
    /// Usage: predict <source> <destination> <distance> <weight> [source_factor] [dest_factor]
    Predict {
        #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Quote a price in rupees between two stations through the HTTP API
    Quote {
        /// Origin station code
        #[arg(long)]
        from: String,

        /// Destination station code
        #[arg(long)]
        to: String,

        /// Distance in kilometres
        #[arg(long)]
        distance: f64,

        /// Cargo weight in tonnes
        #[arg(long)]
        weight: f64,

        /// Base URL of the quoting API, overrides PREDICT_API_URL
        #[arg(long)]
        api_url: Option<String>,

        /// Use reproducible jitter if the API is unavailable
        #[arg(long)]
        deterministic: bool,
    },

    /// List the known stations
    Stations,
}

#[test]
fn parse_predict_test() {
    let cli = Cli::try_parse_from(["railquote", "predict", "KYN", "NGSM", "-5", "1374"]).unwrap();
    match cli.command {
        Some(Commands::Predict { args }) => assert_eq!(args, vec!["KYN", "NGSM", "-5", "1374"]),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn parse_quote_test() {
    let cli = Cli::try_parse_from([
        "railquote",
        "quote",
        "--from",
        "KYN",
        "--to",
        "DHI",
        "--distance",
        "1400",
        "--weight",
        "25.5",
        "--deterministic",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Quote {
            from,
            to,
            distance,
            weight,
            api_url,
            deterministic,
        }) => {
            assert_eq!(from, "KYN");
            assert_eq!(to, "DHI");
            assert_eq!(distance, 1400.0);
            assert_eq!(weight, 25.5);
            assert_eq!(api_url, None);
            assert!(deterministic);
        }
        other => panic!("unexpected command {:?}", other),
    }

    assert!(Cli::try_parse_from(["railquote"]).unwrap().command.is_none());
}
