use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use tower_http::services::ServeDir;

mod handlers;

use crate::handlers::{no_cache_layer, ping_handler};

/// Serves the paint widget page and its wasm bundle.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding index.html and the built pkg/
    #[arg(long)]
    public_dir: Option<PathBuf>,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
}

impl Args {
    fn public_dir(&self) -> PathBuf {
        self.public_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public"))
    }
}

fn router(public_dir: PathBuf) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(no_cache_layer())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let public_dir = args.public_dir();
    if !public_dir.join("index.html").is_file() {
        log::warn!("no index.html in {}", public_dir.display());
    }

    let addr = SocketAddr::new(args.host, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!(
        "paintpad serving {} at http://localhost:{}",
        public_dir.display(),
        args.port
    );
    axum::serve(listener, router(public_dir))
        .await
        .context("server crashed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["paintpad_server"]).unwrap();
        assert!(args.public_dir.is_none());
        assert!(args.public_dir().ends_with("public"));
        assert_eq!(args.host.to_string(), "0.0.0.0");
    }

    #[test]
    fn explicit_flags() {
        let args = Args::try_parse_from([
            "paintpad_server",
            "--public-dir",
            "/srv/paint",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
        ])
        .unwrap();
        assert_eq!(args.public_dir(), PathBuf::from("/srv/paint"));
        assert_eq!(args.port, 8080);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Args::try_parse_from(["paintpad_server", "--port", "http"]).is_err());
    }
}
