use std::time::Duration;

use bullion_model::alert::PriceAlert;
use tokio::{
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::model::event::{Event, EventTx, MessageTransmitter};

use super::{RandomSource, SharedGenerator};

#[derive(Debug)]
pub enum FeedCommand {
    RefreshNow,
    AddAlert(PriceAlert),
    Terminate(String),
}

/// Periodically regenerates a gold + silver snapshot and publishes it as [`Event::Quotes`].
///
/// Active alerts are checked against every snapshot and fire at most once.
pub struct LiveQuoteFeed<R> {
    generator: SharedGenerator<R>,
    refresh_interval: Duration,
    command_rx: mpsc::Receiver<FeedCommand>,
    event_tx: EventTx,
    alerts: Vec<PriceAlert>,
}

impl<R> LiveQuoteFeed<R>
where
    R: RandomSource,
{
    pub fn new(
        generator: SharedGenerator<R>,
        refresh_interval: Duration,
        command_rx: mpsc::Receiver<FeedCommand>,
        event_tx: EventTx,
    ) -> Self {
        Self {
            generator,
            refresh_interval,
            command_rx,
            event_tx,
            alerts: Vec::new(),
        }
    }

    pub fn with_alerts(self, alerts: Vec<PriceAlert>) -> Self {
        Self { alerts, ..self }
    }

    /// Runs until terminated, until the command sender is dropped, or until nobody listens.
    pub async fn run(mut self) {
        let mut interval = time::interval(self.refresh_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            refresh_interval_ms = self.refresh_interval.as_millis() as u64,
            alerts = self.alerts.len(),
            "live quote feed started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => self.refresh(),

                command = self.command_rx.recv() => match command {
                    Some(FeedCommand::RefreshNow) => {
                        self.refresh();
                        interval.reset();
                    },
                    Some(FeedCommand::AddAlert(alert)) => {
                        debug!(alert_id = %alert.id, metal = %alert.metal, "registered price alert");
                        self.alerts.push(alert);
                    },
                    Some(FeedCommand::Terminate(message)) => {
                        info!(%message, "live quote feed terminated");
                        break;
                    },
                    None => {
                        info!("command sender dropped, stopping live quote feed");
                        break;
                    },
                },
            }

            if self.event_tx.receiver_dropped() {
                info!("event receiver dropped, stopping live quote feed");
                break;
            }
        }
    }

    fn refresh(&mut self) {
        let prices = self.generator.lock().generate_current_prices();

        let triggered = self
            .alerts
            .iter_mut()
            .filter_map(|alert| {
                let price = prices.get(alert.metal).price;
                alert.is_triggered(price).then(|| {
                    alert.deactivate();
                    info!(alert_id = %alert.id, metal = %alert.metal, price, "price alert triggered");
                    Event::AlertTriggered {
                        alert: alert.clone(),
                        price,
                    }
                })
            })
            .collect::<Vec<_>>();
        self.alerts.retain(|alert| alert.is_active);

        debug!(
            gold = prices.gold.price,
            silver = prices.silver.price,
            "refreshed spot quotes"
        );

        self.event_tx.send(Event::Quotes(prices));
        self.event_tx.send_many(triggered);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bullion_model::enums::{AlertCondition, Metal};
    use parking_lot::Mutex;

    use crate::{
        data::{synthetic::SyntheticSeriesGenerator, SequenceSource},
        model::config::GeneratorConfig,
    };

    use super::*;

    fn feed(
        refresh_interval: Duration,
    ) -> (
        LiveQuoteFeed<SequenceSource>,
        mpsc::Sender<FeedCommand>,
        mpsc::UnboundedReceiver<Event>,
    ) {
        // every quote sits exactly on its base price
        let generator =
            SyntheticSeriesGenerator::new(GeneratorConfig::default(), SequenceSource::constant(0.5)).unwrap();
        let (command_tx, command_rx) = mpsc::channel(10);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let feed = LiveQuoteFeed::new(
            Arc::new(Mutex::new(generator)),
            refresh_interval,
            command_rx,
            EventTx::new(event_tx),
        );

        (feed, command_tx, event_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_on_every_interval() {
        let (feed, command_tx, mut event_rx) = feed(Duration::from_secs(30));
        let handle = tokio::spawn(feed.run());

        for _ in 0..3 {
            match event_rx.recv().await {
                Some(Event::Quotes(prices)) => {
                    assert_eq!(prices.gold.price, 2650.0);
                    assert_eq!(prices.silver.price, 31.5);
                }
                other => panic!("expected quotes, got {other:?}"),
            }
        }

        command_tx
            .send(FeedCommand::Terminate("test finished".to_string()))
            .await
            .unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_now_publishes_immediately() {
        let (feed, command_tx, mut event_rx) = feed(Duration::from_secs(3600));
        let handle = tokio::spawn(feed.run());

        // first tick fires immediately
        assert!(matches!(event_rx.recv().await, Some(Event::Quotes(_))));

        command_tx.send(FeedCommand::RefreshNow).await.unwrap();
        assert!(matches!(event_rx.recv().await, Some(Event::Quotes(_))));

        drop(command_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_fires_once() {
        let (feed, command_tx, mut event_rx) = feed(Duration::from_secs(30));
        let alert = PriceAlert::new(Metal::Gold, 2600.0, AlertCondition::Above);
        let untouched = PriceAlert::new(Metal::Silver, 20.0, AlertCondition::Below);
        let handle = tokio::spawn(feed.with_alerts(vec![alert.clone(), untouched]).run());

        assert!(matches!(event_rx.recv().await, Some(Event::Quotes(_))));
        match event_rx.recv().await {
            Some(Event::AlertTriggered { alert: fired, price }) => {
                assert_eq!(fired.id, alert.id);
                assert!(!fired.is_active);
                assert_eq!(price, 2650.0);
            }
            other => panic!("expected triggered alert, got {other:?}"),
        }

        // next refresh carries quotes only
        assert!(matches!(event_rx.recv().await, Some(Event::Quotes(_))));
        command_tx.send(FeedCommand::RefreshNow).await.unwrap();
        assert!(matches!(event_rx.recv().await, Some(Event::Quotes(_))));

        command_tx
            .send(FeedCommand::Terminate("done".to_string()))
            .await
            .unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_added_alert_is_checked() {
        let (feed, command_tx, mut event_rx) = feed(Duration::from_secs(30));
        let handle = tokio::spawn(feed.run());

        assert!(matches!(event_rx.recv().await, Some(Event::Quotes(_))));

        let alert = PriceAlert::new(Metal::Silver, 32.0, AlertCondition::Below);
        command_tx.send(FeedCommand::AddAlert(alert.clone())).await.unwrap();
        command_tx.send(FeedCommand::RefreshNow).await.unwrap();

        assert!(matches!(event_rx.recv().await, Some(Event::Quotes(_))));
        assert!(matches!(
            event_rx.recv().await,
            Some(Event::AlertTriggered { alert: fired, .. }) if fired.id == alert.id
        ));

        drop(command_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_event_receiver_dropped() {
        let (feed, _command_tx, event_rx) = feed(Duration::from_secs(30));
        drop(event_rx);

        feed.run().await;
    }
}
