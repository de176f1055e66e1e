//! case-runner: headless runner for the simulation cases.
//!
//! Usage:
//!   case-runner --case call-center --shifts 4,3,4 --seed 42 --iterations 100
//!   case-runner --case inventory --locations 1,3 --policies 100:500,100:500 --seed 42
//!   case-runner ... --report   (dump the two-section report bytes to stdout)
//!   case-runner ... --json     (print the summary as a JSON object)

use anyhow::{bail, Context, Result};
use casesim_core::call_center::CallCenterCase;
use casesim_core::case::{SimulationCase, DEFAULT_ITERATIONS};
use casesim_core::inventory::InventoryCase;
use casesim_core::result::SimulationResult;
use std::env;
use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let case = str_arg(&args, "--case").unwrap_or("call-center");
    let seed = parse_arg(&args, "--seed", 42u64);
    let iterations = parse_arg(&args, "--iterations", DEFAULT_ITERATIONS);
    let report = args.iter().any(|a| a == "--report");
    let json = args.iter().any(|a| a == "--json");

    println!("case-runner");
    println!("  case:       {case}");
    println!("  seed:       {seed}");
    println!();

    let result = match case {
        "call-center" => run_call_center(&args, seed, iterations)?,
        "inventory" => run_inventory(&args, seed)?,
        other => bail!("unknown case {other:?} (expected call-center or inventory)"),
    };

    println!("score: {:.3}", result.score());
    if json {
        println!("{}", serde_json::to_string_pretty(&result.summary_json()?)?);
    } else {
        println!("summary:");
        for (key, value) in result.summary() {
            println!("  {key}: {value}");
        }
    }

    if report {
        println!();
        std::io::stdout().write_all(&result.detail_as_bytes())?;
    }
    Ok(())
}

fn run_call_center(args: &[String], seed: u64, iterations: u32) -> Result<SimulationResult> {
    let mut case = if let Some(spec) = str_arg(args, "--shifts") {
        let counts = parse_u32_list(spec).context("parsing --shifts")?;
        let counts: [u32; 3] = counts
            .try_into()
            .map_err(|_| anyhow::anyhow!("--shifts expects exactly three counts"))?;
        CallCenterCase::from_shift_counts(counts, seed)?
    } else if let Some(spec) = str_arg(args, "--slots") {
        let decision = parse_u32_list(spec).context("parsing --slots")?;
        CallCenterCase::new(decision, seed)?
    } else {
        bail!("call-center needs --shifts c1,c2,c3 or --slots s1,...,s18");
    };
    log::info!("running call-center with {iterations} replications");
    Ok(case.run(iterations)?)
}

fn run_inventory(args: &[String], seed: u64) -> Result<SimulationResult> {
    let locations: Vec<String> = str_arg(args, "--locations")
        .context("inventory needs --locations")?
        .split(',')
        .map(str::to_string)
        .collect();
    let policies = str_arg(args, "--policies")
        .context("inventory needs --policies s:S,s:S,...")?
        .split(',')
        .map(|pair| {
            let (s, big_s) = pair
                .split_once(':')
                .with_context(|| format!("policy {pair:?} is not s:S"))?;
            Ok((s.trim().parse::<i64>()?, big_s.trim().parse::<i64>()?))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut case = InventoryCase::new(locations, policies, None, seed)?;
    Ok(case.run(1)?)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    str_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_u32_list(spec: &str) -> Result<Vec<u32>> {
    spec.split(',')
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .with_context(|| format!("bad count {part:?}"))
        })
        .collect()
}
