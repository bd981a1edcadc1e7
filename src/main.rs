// src/main.rs
//
// Console front-end for the dashboard core.
//
// Usage:
//   employee-dashboard                 list employees
//   employee-dashboard delete <id> <name>

use std::sync::Arc;

use anyhow::{bail, Context};

use employee_dashboard::{
    DashboardConfig, DashboardSession, EmployeeCollectionChanged, NotificationQueueChanged,
    StaticToken,
};

const ENV_API_TOKEN: &str = "EMPLOYEE_API_TOKEN";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. CONFIGURATION
    let config = DashboardConfig::from_env().context("reading configuration")?;
    let token = std::env::var(ENV_API_TOKEN)
        .with_context(|| format!("{} must hold the bearer token", ENV_API_TOKEN))?;

    // 2. SESSION
    let session = DashboardSession::connect(&config, Arc::new(StaticToken::new(token)))?;

    // 3. PRESENTATION (console stand-in for the UI)
    session
        .event_bus
        .subscribe::<NotificationQueueChanged, _>(|event| {
            if let Some(latest) = event.snapshot.last() {
                match &latest.description {
                    Some(description) => {
                        eprintln!("[{}] {} - {}", latest.kind, latest.title, description)
                    }
                    None => eprintln!("[{}] {}", latest.kind, latest.title),
                }
            }
        });
    session
        .event_bus
        .subscribe::<EmployeeCollectionChanged, _>(|event| {
            println!("{} funcionário(s)", event.snapshot.len());
            for employee in &event.snapshot {
                println!(
                    "  {:>4}  {:<24} {:<28} {:<12} {:<16} {}",
                    employee.id,
                    employee.name,
                    employee.email,
                    employee.sector,
                    employee.office,
                    employee.level
                );
            }
        });

    // 4. COMMAND
    let args: Vec<String> = std::env::args().skip(1).collect();
    let outcome = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["list"] => session.employees.load().await,
        ["delete", id, name] => {
            let id = id.parse().with_context(|| format!("invalid employee id '{}'", id))?;
            session.employees.delete(id, name).await
        }
        _ => bail!("usage: employee-dashboard [list | delete <id> <name>]"),
    };

    session.teardown();

    // The failure was already reported through the notification presenter
    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
