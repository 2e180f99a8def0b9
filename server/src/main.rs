//! bank-server: runs the HTTP API and the database maintenance commands.
//!
//! ```text
//! bank-server [serve]   create/upgrade the database, then serve until Ctrl-C
//! bank-server migrate   create/upgrade the database and exit
//! bank-server reset     drop the database, recreate schema and seed, exit
//! ```

use bank_api::{app, connect, migrate, reset_database, AppConfig, AppState};
use tokio::net::TcpListener;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Serve,
    Migrate,
    Reset,
}

fn parse_command(arg: Option<&str>) -> Result<Command, String> {
    match arg {
        None | Some("serve") => Ok(Command::Serve),
        Some("migrate") => Ok(Command::Migrate),
        Some("reset") => Ok(Command::Reset),
        Some(other) => Err(format!(
            "unknown command '{}' (expected serve, migrate or reset)",
            other
        )),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        return;
    }
    tracing::info!("shutdown requested");
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = migrate(&config).await?;
    tracing::info!(?outcome, "database ready");

    let pool = connect(&config).await?;
    let router = app(AppState::new(pool.clone()), &config)?;
    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("bank API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("connection pool closed");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("bank_api=info,bank_server=info,tower_http=info")
            }),
        )
        .init();

    let arg = std::env::args().nth(1);
    let command = parse_command(arg.as_deref())?;
    let config = AppConfig::from_env()?;

    match command {
        Command::Serve => serve(config).await?,
        Command::Migrate => {
            let outcome = migrate(&config).await?;
            tracing::info!(?outcome, "migration finished");
        }
        Command::Reset => {
            let outcome = reset_database(&config).await?;
            tracing::info!(?outcome, "database reset");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        assert_eq!(parse_command(None), Ok(Command::Serve));
        assert_eq!(parse_command(Some("serve")), Ok(Command::Serve));
    }

    #[test]
    fn maintenance_commands() {
        assert_eq!(parse_command(Some("migrate")), Ok(Command::Migrate));
        assert_eq!(parse_command(Some("reset")), Ok(Command::Reset));
        assert!(parse_command(Some("drop")).is_err());
    }
}
