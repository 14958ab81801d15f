//! EV charging simulator entry point: CLI wiring and config-driven runs.

mod cli;

use std::path::Path;
use std::process;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ev_charge_sim::config::ScenarioConfig;
use ev_charge_sim::io::export::{export_csv, export_json};
use ev_charge_sim::runner::run_scenario;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    // Load config: --scenario takes priority, then --preset, then baseline default
    let loaded = if let Some(ref path) = opts.scenario {
        ScenarioConfig::from_toml_file(path)
    } else if let Some(ref name) = opts.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };
    let mut scenario = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    opts.overrides.apply(&mut scenario);

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let run = match run_scenario(&scenario) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    for s in run.results.samples() {
        println!("{s}");
    }
    println!("\n{}", run.summary);

    if let Some(ref path) = opts.csv_out {
        if let Err(e) = export_csv(&run.results, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        tracing::info!(path = %path.display(), "samples written as CSV");
    }

    if let Some(ref path) = opts.json_out {
        if let Err(e) = export_json(&run.results, Path::new(path)) {
            eprintln!("error: failed to write JSON: {e}");
            process::exit(1);
        }
        tracing::info!(path = %path.display(), "samples written as JSON");
    }

    #[cfg(feature = "api")]
    if opts.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(ev_charge_sim::api::AppState {
            config: scenario,
            summary: run.summary,
            results: run.results,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], opts.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(ev_charge_sim::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
