//! Demonstration driver.
//!
//! Starts three echo backends, puts the proxy in front of them, then sends
//! a sample request through the proxy once a second so the rotation and the
//! URL rewriting are visible in the logs. Ctrl-C shuts everything down.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rotary::{EchoServer, ReverseProxy};

const PROXY_PORT: u16 = 18000;
const BACKEND_PORTS: [u16; 3] = [18001, 18002, 18003];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rotary=debug,demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut hosts = Vec::new();
    let mut backends = Vec::new();
    for port in BACKEND_PORTS {
        let backend = Arc::new(EchoServer::new(port));
        hosts.push(backend.address());

        let runner = backend.clone();
        tokio::spawn(async move {
            if let Err(error) = runner.start().await {
                tracing::error!(%error, port, "echo server failed");
            }
        });
        backends.push(backend);
    }

    let proxy = Arc::new(ReverseProxy::new(&hosts, PROXY_PORT)?);
    let runner = proxy.clone();
    let proxy_task = tokio::spawn(async move {
        if let Err(error) = runner.start().await {
            tracing::error!(%error, "reverse proxy failed");
        }
    });

    // Sample traffic through the proxy after it has had a moment to bind.
    let client = reqwest::Client::builder().no_proxy().build()?;
    tokio::spawn(async move {
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let url = format!("http://127.0.0.1:{}/hello?q=hello", PROXY_PORT);
            match client.get(&url).send().await {
                Ok(response) => {
                    let status = response.status();
                    match response.text().await {
                        Ok(body) => tracing::info!(%status, body, "sample response"),
                        Err(error) => tracing::warn!(%error, "sample response unreadable"),
                    }
                }
                Err(error) => tracing::warn!(%error, "sample request failed"),
            }
        }
    });

    tokio::signal::ctrl_c().await?;

    proxy.stop();
    for backend in &backends {
        backend.stop();
    }
    tokio::time::sleep(Duration::from_millis(50)).await;
    let _ = proxy_task.await;

    tracing::info!("done");
    Ok(())
}
