pub mod builder;

use std::sync::Arc;

use bullion_model::{
    alert::PriceAlert,
    enums::{Metal, TimeRange},
    news::NewsArticle,
    price::{CurrentPrice, MetalPrices, PricePoint},
    tables::MarketTables,
};
use chrono::Utc;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::info;

use crate::{
    analysis::{ratio::RatioAnalysis, summary::SeriesSummary},
    conversion::ConversionEngine,
    data::{
        historical::HistoricalFeed,
        live::{FeedCommand, LiveQuoteFeed},
        news::demo_market_news,
        RandomSource, SharedGenerator,
    },
    model::{
        config::FeedConfig,
        engine_error::EngineError,
        event::{Event, EventTx},
    },
};

use self::builder::MarketDataServiceBuilder;

/// Handle to a running [`LiveQuoteFeed`].
#[derive(Debug)]
pub struct LiveFeedHandle {
    pub command_tx: mpsc::Sender<FeedCommand>,
    pub event_rx: mpsc::UnboundedReceiver<Event>,
    pub task: JoinHandle<()>,
}

impl LiveFeedHandle {
    pub async fn terminate(self, message: impl Into<String>) {
        let _ = self.command_tx.send(FeedCommand::Terminate(message.into())).await;
        let _ = self.task.await;
    }
}

/// Entry point for a presentation layer: spot quotes, history, conversion and ratio analysis.
pub struct MarketDataService<R> {
    pub(crate) tables: Arc<MarketTables>,
    pub(crate) conversion: ConversionEngine,
    pub(crate) generator: SharedGenerator<R>,
    pub(crate) historical: HistoricalFeed<R>,
    pub(crate) feed_config: FeedConfig,
}

impl<R> MarketDataService<R>
where
    R: RandomSource,
{
    pub fn builder() -> MarketDataServiceBuilder<R> {
        MarketDataServiceBuilder::new()
    }

    pub fn tables(&self) -> &Arc<MarketTables> {
        &self.tables
    }

    pub fn conversion(&self) -> &ConversionEngine {
        &self.conversion
    }

    pub fn current_quote(&self, metal: Metal) -> CurrentPrice {
        self.generator.lock().generate_current_quote(metal)
    }

    pub fn current_prices(&self) -> MetalPrices {
        self.generator.lock().generate_current_prices()
    }

    pub async fn historical(
        &self,
        metal: Metal,
        range: TimeRange,
    ) -> Result<Vec<PricePoint>, EngineError> {
        Ok(self.historical.fetch(metal, range).await?)
    }

    pub async fn historical_summary(
        &self,
        metal: Metal,
        range: TimeRange,
    ) -> Result<(Vec<PricePoint>, SeriesSummary), EngineError> {
        let series = self.historical(metal, range).await?;
        let summary = SeriesSummary::from_series(&series);
        Ok((series, summary))
    }

    pub fn ratio(&self, prices: &MetalPrices) -> Option<RatioAnalysis> {
        RatioAnalysis::new(prices.gold.price, prices.silver.price)
    }

    /// Latest market headlines, newest first.
    pub fn market_news(&self) -> Vec<NewsArticle> {
        demo_market_news(Utc::now())
    }
}

impl<R> MarketDataService<R>
where
    R: RandomSource + Send + 'static,
{
    /// Spawn the periodic refresh loop on the current tokio runtime.
    pub fn spawn_live_feed(&self, alerts: Vec<PriceAlert>) -> LiveFeedHandle {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let feed = LiveQuoteFeed::new(
            Arc::clone(&self.generator),
            self.feed_config.refresh_interval(),
            command_rx,
            EventTx::new(event_tx),
        )
        .with_alerts(alerts);

        info!(
            refresh_interval_ms = self.feed_config.refresh_interval_ms,
            "spawning live quote feed"
        );

        LiveFeedHandle {
            command_tx,
            event_rx,
            task: tokio::spawn(feed.run()),
        }
    }
}
