use guestbook::cli::{self, Command};
use guestbook::{build_app, config::Config, db};
use sqlx::SqlitePool;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = cli::parse_args(&args) else {
        eprintln!("{}", cli::USAGE);
        return ExitCode::FAILURE;
    };

    let pool = match db::init_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(err) => {
            error!("failed to open database: {err}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("connected to {}", config.database_label());

    let result: Result<(), Box<dyn std::error::Error>> = match command {
        Command::Import(file) => cli::import_visitors(&pool, &file).await.map(|_| ()),
        Command::Serve => serve(&config, pool.clone()).await.map_err(Into::into),
    };

    pool.close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: &Config, pool: SqlitePool) -> std::io::Result<()> {
    let app = build_app(pool);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, stopping server");
}
