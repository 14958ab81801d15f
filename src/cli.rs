use std::env;
use std::path::PathBuf;

use chrono::NaiveDateTime;

use ev_charge_sim::config::ScenarioConfig;
use ev_charge_sim::timefmt::parse_timestamp;

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub overrides: Overrides,
    pub csv_out: Option<PathBuf>,
    pub json_out: Option<PathBuf>,
    pub serve: bool,
    #[cfg_attr(not(feature = "api"), allow(dead_code))]
    pub port: u16,
}

/// Per-field overrides applied on top of the loaded scenario.
#[derive(Debug, Default, PartialEq)]
pub struct Overrides {
    pub connection: Option<NaiveDateTime>,
    pub disconnection: Option<NaiveDateTime>,
    pub sample_interval_minutes: Option<u32>,
    pub capacity_kwh: Option<f32>,
    pub initial_soc: Option<f32>,
    pub vehicle_max_kw: Option<f32>,
    pub unit_max_kw: Option<f32>,
}

impl Overrides {
    pub fn apply(&self, cfg: &mut ScenarioConfig) {
        if let Some(t) = self.connection {
            cfg.session.connection = t;
        }
        if let Some(t) = self.disconnection {
            cfg.session.disconnection = t;
        }
        if let Some(m) = self.sample_interval_minutes {
            cfg.simulation.sample_interval_minutes = m;
        }
        if let Some(v) = self.capacity_kwh {
            cfg.battery.capacity_kwh = v;
        }
        if let Some(v) = self.initial_soc {
            cfg.battery.initial_soc = v;
        }
        if let Some(v) = self.vehicle_max_kw {
            cfg.battery.max_power_kw = v;
        }
        if let Some(v) = self.unit_max_kw {
            cfg.charging_unit.max_output_kw = v;
        }
    }
}

const DEFAULT_PORT: u16 = 3000;

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        port: DEFAULT_PORT,
        ..CliOptions::default()
    };

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scenario (expected a TOML file path)")?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--connect" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --connect (expected YYYY-MM-DD HH:MM)")?;
                opts.overrides.connection = Some(timestamp_arg("--connect", raw)?);
            }
            "--disconnect" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --disconnect (expected YYYY-MM-DD HH:MM)")?;
                opts.overrides.disconnection = Some(timestamp_arg("--disconnect", raw)?);
            }
            "--interval" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --interval (expected minutes)")?;
                opts.overrides.sample_interval_minutes = Some(number_arg("--interval", raw)?);
            }
            "--capacity" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --capacity (expected kWh)")?;
                opts.overrides.capacity_kwh = Some(number_arg("--capacity", raw)?);
            }
            "--soc" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --soc (expected a fraction 0-1)")?;
                opts.overrides.initial_soc = Some(number_arg("--soc", raw)?);
            }
            "--vehicle-kw" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --vehicle-kw (expected kW)")?;
                opts.overrides.vehicle_max_kw = Some(number_arg("--vehicle-kw", raw)?);
            }
            "--unit-kw" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --unit-kw (expected kW)")?;
                opts.overrides.unit_max_kw = Some(number_arg("--unit-kw", raw)?);
            }
            "--csv-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --csv-out (expected a file path)")?;
                if opts.csv_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--csv-out provided more than once".to_string());
                }
            }
            "--json-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --json-out (expected a file path)")?;
                if opts.json_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--json-out provided more than once".to_string());
                }
            }
            "--serve" => opts.serve = true,
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = number_arg("--port", raw)?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.serve && !cfg!(feature = "api") {
        return Err("--serve requires a build with the `api` feature".to_string());
    }

    Ok(opts)
}

fn timestamp_arg(flag: &str, raw: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(raw)
        .map_err(|e| format!("invalid value for {flag}: \"{raw}\" (expected YYYY-MM-DD HH:MM): {e}"))
}

fn number_arg<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, String> {
    raw.parse::<T>()
        .map_err(|_| format!("invalid value for {flag}: \"{raw}\" is not a valid number"))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("ev-charge-sim: single-vehicle EV charging session simulator");
    eprintln!();
    eprintln!("Usage: ev-charge-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>          Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>            Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --connect <ts>             Connection time, \"YYYY-MM-DD HH:MM\"");
    eprintln!("  --disconnect <ts>          Disconnection time, \"YYYY-MM-DD HH:MM\"");
    eprintln!("  --interval <minutes>       Sample interval (default 15)");
    eprintln!("  --capacity <kWh>           Battery capacity");
    eprintln!("  --soc <fraction>           Initial state of charge (0-1)");
    eprintln!("  --vehicle-kw <kW>          Vehicle charging power limit");
    eprintln!("  --unit-kw <kW>             Charging unit output limit");
    eprintln!("  --csv-out <path>           Export samples to CSV");
    eprintln!("  --json-out <path>          Export samples to JSON");
    eprintln!("  --serve                    Serve results over HTTP (feature `api`)");
    eprintln!("  --port <u16>               API server port (default: {DEFAULT_PORT})");
    eprintln!("  --help                     Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}
