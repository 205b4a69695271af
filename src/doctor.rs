use callwatch::health::Severity;
use callwatch::{ApiHealth, StatusReport};
use colored::*;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;

pub async fn run_doctor(url: &str) -> Result<(), Box<dyn Error>> {
    println!("{}", "Callwatch Doctor".bold().cyan());
    println!("{}", "Checking voice service health...".dimmed());
    println!();

    let client = Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;
    let mut all_good = true;

    // 1. Connectivity
    print!("• Service Connectivity: ");
    let report: StatusReport = match client.get(format!("{}/status", url)).send().await {
        Ok(resp) if resp.status().is_success() => match resp.json().await {
            Ok(report) => {
                println!("{}", "OK".green());
                report
            }
            Err(e) => {
                println!("{}", format!("FAIL (invalid JSON: {e})").red());
                return Ok(());
            }
        },
        Ok(resp) => {
            println!("{}", format!("FAIL (Status {})", resp.status()).red());
            return Ok(());
        }
        Err(e) => {
            println!("{}", format!("FAIL ({})", e).red());
            println!("  → Is the voice service running on {url}?");
            return Ok(()); // Stop here if we can't connect
        }
    };

    // 2. OpenAI API health
    print!("• OpenAI API:           ");
    let api_health = ApiHealth::parse(&report.openai_api);
    let label = api_health.label();
    match api_health.severity() {
        Severity::Ok => println!("{}", label.green()),
        Severity::Danger => {
            println!("{}", label.red());
            all_good = false;
        }
        _ => {
            println!("{}", label.yellow());
            all_good = false;
        }
    }
    if let Some(detail) = api_health.detail() {
        println!("  → {detail}");
    }

    // 3. Model in use
    print!("• Model:                ");
    match report.model.as_deref() {
        Some(model) => println!("{}", model.green()),
        None => println!("{}", "not reported".dimmed()),
    }

    // 4. Active calls
    print!("• Active Calls:         ");
    if report.active_calls > 0 {
        println!(
            "{}",
            format!("{} in progress", report.active_calls).yellow()
        );
    } else {
        println!("{}", "0".green());
    }

    println!();
    if all_good {
        println!("{}", "✅ Service is ready to place calls.".bold().green());
    } else {
        println!("{}", "⚠️  Service has issues. See above.".bold().yellow());
    }

    Ok(())
}
