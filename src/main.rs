use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;

use receipt_points::{breakdown, Receipt, VERSION};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    run(&args)
}

fn run(args: &[String]) -> Result<()> {
    match args.first().map(String::as_str) {
        Some("score") if args.len() > 1 => {
            for path in &args[1..] {
                run_score(Path::new(path))?;
            }
        }
        Some("score") => bail!("score needs at least one receipt file"),
        _ => print_usage(),
    }

    Ok(())
}

fn run_score(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read receipt file: {:?}", path))?;

    let receipt = Receipt::from_json(&content)
        .with_context(|| format!("Failed to parse receipt JSON: {:?}", path))?;

    let result = breakdown(&receipt);

    println!("🧾 {} ({})", receipt.retailer_name, path.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (rule, points) in result.entries() {
        println!("  {:<24} {:>6}", rule, points);
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {:<24} {:>6}\n", "total", result.total());

    Ok(())
}

fn print_usage() {
    println!("receipt-points {}", VERSION);
    println!();
    println!("Usage:");
    println!("  receipt-points score <receipt.json>...   Print per-rule points for each receipt");
    println!("  receipt-points help                      Show this message");
    println!();
    println!("HTTP server: cargo run --bin receipt-server");
}
