use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod message;
mod models;
mod risk;
mod server;
mod validation;

use config::ServerConfig;
use models::{MessageRequest, StudentInfo};
use risk::MockRiskPredictor;

#[derive(Parser)]
#[command(name = "student-success-api")]
#[command(about = "Student risk prediction and outreach messaging API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve(ServerConfig),
    /// Predict the risk score for a single student
    Predict {
        #[arg(long)]
        name: String,
        #[arg(long)]
        attendance: f64,
        #[arg(long, value_delimiter = ',', required = true)]
        scores: Vec<f64>,
    },
    /// Compose the outreach message for a student
    Message {
        #[arg(long)]
        name: String,
        #[arg(long)]
        risk_score: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(config) => serve(config).await?,
        Commands::Predict {
            name,
            attendance,
            scores,
        } => {
            let student = StudentInfo {
                name,
                attendance,
                scores,
            };
            let prediction = risk::predict_risk(&MockRiskPredictor, student)?;
            println!("{}", serde_json::to_string_pretty(&prediction)?);
        }
        Commands::Message { name, risk_score } => {
            let request = MessageRequest {
                student_name: name,
                risk_score,
            };
            let response = message::compose_message(request)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let cors = config.cors_layer()?;
    let app = server::router(server::AppState::new(MockRiskPredictor), cors);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(
        listen_addr = %addr,
        origins = ?config.allowed_origins,
        "{} listening",
        server::SERVICE_NAME
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
