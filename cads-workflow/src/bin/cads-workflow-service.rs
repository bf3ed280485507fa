//! Serve workflows over HTTP: one `POST /run` per workflow execution.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use cads_workflow::{server, Runner};
use clap::Parser;

/// HTTP front door for the FMU workflow runner
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Working root; autodetected from the current directory when omitted
    #[arg(long)]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sensible_env_logger::try_init_timed!()?;

    let args = Args::parse();
    let runner = Arc::new(Runner::new(args.root)?);
    log::info!("working root: {}", runner.root().display());

    let app = server::router(runner);
    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    log::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
