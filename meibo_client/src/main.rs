use meibo::MeiboConfig;
use meibo_client::{CustomerApi, CustomerPage};
use tracing::{error, Level};

#[tokio::main]
async fn main() {
    match MeiboConfig::load() {
        Ok(config) => {
            tracing_subscriber::fmt()
                .with_max_level(Level::from(&config.logger.level))
                .with_writer(std::io::stderr)
                .init();
            let mut page = CustomerPage::new(CustomerApi::from_config(&config));
            page.mount().await;
            print!("{}", page.render());
        }
        Err(error) => {
            tracing_subscriber::fmt::init();
            error!("アプリケーションエラー: {}", error)
        }
    }
}
