use polyroute::RouteEngine;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

const USAGE: &str = "usage: polyroute <FROM> <TO> <AMOUNT>\nexample: polyroute USDC POL 100";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();
    info!("Starting polyroute v{}", polyroute::VERSION);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [from, to, amount] = args.as_slice() else {
        bail!("{USAGE}");
    };
    let amount: f64 = amount
        .parse()
        .with_context(|| format!("amount {amount:?} is not a number"))?;

    let engine = RouteEngine::new();
    info!(%from, %to, amount, "quoting");

    let quotes = engine.quote_pair(from, to, amount)?;
    match &quotes.direct {
        Some(direct) => info!(
            output = direct.estimated_output,
            venue = %direct.steps[0].venue,
            "direct quote"
        ),
        None => warn!("no direct route available"),
    }
    info!(
        output = quotes.optimal.estimated_output,
        hops = quotes.optimal.steps.len(),
        gas = quotes.optimal.gas_estimate,
        "optimal quote"
    );

    println!("{}", serde_json::to_string_pretty(&quotes)?);
    Ok(())
}
