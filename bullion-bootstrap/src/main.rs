use std::{env, fs, sync::Arc};

use anyhow::Context;
use bullion_core::{
    data::historical::fetch_historical_days,
    model::{config::ServiceConfig, event::Event},
    service::MarketDataService,
};
use bullion_model::{
    alert::PriceAlert,
    enums::{AlertCondition, Metal, TimeRange},
    identifiers::{CurrencyCode, UnitCode},
};
use rand::{rngs::StdRng, SeedableRng};
use tokio_stream::{wrappers::UnboundedReceiverStream, StreamExt};
use tracing::{info, warn};

const CONFIG_PATH_ENV: &str = "BULLION_CONFIG";

// Global JSON `tracing` subscriber, DEBUG and above unless RUST_LOG narrows it.
fn init_logging() {
    tracing_subscriber::fmt()
        // DEBUG by default, overridable through RUST_LOG
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::DEBUG.into())
                .from_env_lossy(),
        )
        // colours only in debug builds
        .with_ansi(cfg!(debug_assertions))
        // one JSON object per event
        .json()
        .init()
}

fn load_config() -> anyhow::Result<ServiceConfig> {
    match env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            let input = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {path}"))?;
            let config = ServiceConfig::from_json(&input)
                .with_context(|| format!("failed to load config file {path}"))?;
            info!(%path, "loaded service config");
            Ok(config)
        }
        Err(_) => Ok(ServiceConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = load_config()?;
    let service = MarketDataService::builder()
        .config(config)
        .rng(StdRng::from_entropy())
        .build()?;

    let prices = service.current_prices();
    for metal in Metal::ALL {
        let quote = prices.get(metal);
        info!(
            %metal,
            price = quote.price,
            change = quote.change,
            change_percent = quote.change_percent,
            "spot quote"
        );
    }

    if let Some(ratio) = service.ratio(&prices) {
        info!(
            ratio = ratio.ratio,
            status = %ratio.status,
            deviation_pct = ratio.deviation_pct,
            "gold/silver ratio"
        );
    }

    let conversion = service.conversion();
    let tables = Arc::clone(service.tables());
    for currency in tables.currencies.currencies() {
        for unit in tables.units.iter() {
            let value = conversion.price_per_unit(prices.gold.price, &unit.code, &currency.code)?;
            info!(
                currency = %currency.code,
                symbol = %currency.symbol,
                unit = %unit.code,
                value,
                "gold price per unit"
            );
        }
    }

    let calculator = conversion.value_for_input(
        "10",
        &UnitCode::from("g"),
        &CurrencyCode::from("INR"),
        prices.silver.price,
    )?;
    info!(value = calculator, "10 g of silver in INR");

    let range = TimeRange::OneMonth;
    let (series, summary) = service.historical_summary(Metal::Gold, range).await?;
    info!(
        %range,
        days = fetch_historical_days(range),
        points = series.len(),
        change = summary.change,
        change_percent = summary.change_percent,
        "historical gold prices"
    );

    for article in service.market_news() {
        info!(
            source = %article.source,
            published_at = %article.published_at,
            title = %article.title,
            "market news"
        );
    }

    let alerts = vec![
        PriceAlert::new(Metal::Gold, prices.gold.price * 1.01, AlertCondition::Above),
        PriceAlert::new(Metal::Silver, prices.silver.price * 0.99, AlertCondition::Below),
    ];
    let handle = service.spawn_live_feed(alerts);

    let mut events = UnboundedReceiverStream::new(handle.event_rx);
    while let Some(event) = events.next().await {
        match event {
            Event::Quotes(prices) => {
                info!(
                    gold = prices.gold.price,
                    silver = prices.silver.price,
                    "refreshed spot quotes"
                );
            }
            Event::AlertTriggered { alert, price } => {
                warn!(
                    alert_id = %alert.id,
                    metal = %alert.metal,
                    target_price = alert.target_price,
                    price,
                    "price alert triggered"
                );
            }
        }
    }

    Ok(())
}
