use std::sync::Arc;

use bullion_model::tables::MarketTables;
use parking_lot::Mutex;
use tracing::info;

use crate::{
    conversion::ConversionEngine,
    data::{historical::HistoricalFeed, synthetic::SyntheticSeriesGenerator, RandomSource},
    model::{
        config::{FeedConfig, GeneratorConfig, ServiceConfig},
        engine_error::EngineError,
    },
};

use super::MarketDataService;

pub struct MarketDataServiceBuilder<R>
where
    R: RandomSource,
{
    tables: Option<Arc<MarketTables>>,
    generator_config: Option<GeneratorConfig>,
    feed_config: Option<FeedConfig>,
    rng: Option<R>,
}

impl<R> Default for MarketDataServiceBuilder<R>
where
    R: RandomSource,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R> MarketDataServiceBuilder<R>
where
    R: RandomSource,
{
    pub fn new() -> Self {
        Self {
            tables: None,
            generator_config: None,
            feed_config: None,
            rng: None,
        }
    }

    pub fn tables(self, value: Arc<MarketTables>) -> Self {
        Self {
            tables: Some(value),
            ..self
        }
    }

    pub fn generator_config(self, value: GeneratorConfig) -> Self {
        Self {
            generator_config: Some(value),
            ..self
        }
    }

    pub fn feed_config(self, value: FeedConfig) -> Self {
        Self {
            feed_config: Some(value),
            ..self
        }
    }

    pub fn rng(self, value: R) -> Self {
        Self {
            rng: Some(value),
            ..self
        }
    }

    /// Take tables, generator and feed settings from one [`ServiceConfig`].
    pub fn config(self, value: ServiceConfig) -> Self {
        Self {
            tables: Some(Arc::new(value.tables)),
            generator_config: Some(value.generator),
            feed_config: Some(value.feed),
            ..self
        }
    }

    pub fn build(self) -> Result<MarketDataService<R>, EngineError> {
        let tables = self.tables.ok_or(EngineError::BuilderIncomplete("tables"))?;
        let rng = self.rng.ok_or(EngineError::BuilderIncomplete("rng"))?;
        let generator_config = self.generator_config.unwrap_or_default();
        let feed_config = self.feed_config.unwrap_or_default();
        feed_config.validate()?;

        let generator = Arc::new(Mutex::new(SyntheticSeriesGenerator::new(generator_config, rng)?));
        let historical = HistoricalFeed::new(Arc::clone(&generator), feed_config.simulated_latency());

        info!(
            currencies = tables.currencies.len(),
            units = tables.units.len(),
            gold_base_price = generator_config.gold_base_price,
            silver_base_price = generator_config.silver_base_price,
            "constructed market data service"
        );

        Ok(MarketDataService {
            conversion: ConversionEngine::new(Arc::clone(&tables)),
            tables,
            generator,
            historical,
            feed_config,
        })
    }
}
