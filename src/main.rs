use std::io;

use anyhow::{anyhow, Context};

use share_allocator::config::Config;
use share_allocator::input::read_request;
use share_allocator::logging::init_logging;
use share_allocator::run;
use share_allocator::stocks::YahooChart;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_logging(&config.log_level).map_err(|e| anyhow!("failed to initialise logging: {}", e))?;

    let request = {
        let stdin = io::stdin();
        let mut reader = stdin.lock();
        let mut writer = io::stdout();
        read_request(&mut reader, &mut writer)?
    };

    let source = YahooChart::new(&config.chart_url, config.request_timeout)?;

    let path = run(&config, &request, &source)
        .await
        .with_context(|| format!("run for {} failed", request.date))?;

    println!("Result data has been written to '{}'", path.display());
    Ok(())
}
