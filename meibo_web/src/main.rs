use std::{error::Error, net::SocketAddr};

use axum_server::tls_rustls::RustlsConfig;
use meibo::{domain::IdGeneratorTask, infrastructure, MeiboConfig};
use meibo_web::{app, AppState};
use snowflake::SnowflakeIdGenerator;
use tracing::{error, info, Level};

#[tokio::main]
async fn main() {
    match MeiboConfig::load() {
        Ok(config) => {
            tracing_subscriber::fmt()
                .with_max_level(Level::from(&config.logger.level))
                .init();
            if let Err(error) = serve(&config).await {
                error!("アプリケーションエラー: {}", error);
            }
        }
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("アプリケーションエラー: {}", error)
        }
    }
}

async fn serve(config: &MeiboConfig) -> Result<(), Box<dyn Error>> {
    let repository = infrastructure::connect(config).await?;
    let ids = IdGeneratorTask::spawn(SnowflakeIdGenerator::new(1, 1).into());
    let app = app(AppState::new(repository, ids));
    let address = config.server.address.parse::<SocketAddr>()?;

    match &config.server.tls {
        Some(tls) => {
            let rustls = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            info!("https://{} で待ち受けます", address);
            axum_server::bind_rustls(address, rustls)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!("http://{} で待ち受けます", address);
            axum_server::bind(address)
                .serve(app.into_make_service())
                .await?;
        }
    }
    Ok(())
}
