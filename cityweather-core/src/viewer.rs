//! Weather viewer state machine.
//!
//! Each change of the active location starts one fetch cycle: the previous
//! cycle's task is aborted, the state moves to `Loading`, and a new task runs
//! [`fetch_report`]. Completions carry the generation they were started for;
//! anything from a superseded generation is dropped, so a slow answer for an
//! old query can never overwrite the page for a newer one.

use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::FORECAST_DAYS,
    error::{DataKind, FetchError},
    model::{ForecastSet, LocationQuery, WeatherReport},
    provider::WeatherProvider,
};

/// What the page currently shows. Exactly one variant at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    NoLocation,
    Loading,
    Error(String),
    Loaded(Arc<WeatherReport>),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ViewState::Loaded(_))
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            ViewState::Loaded(report) => Some(report),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// One fetch-and-derive cycle: current conditions, then the forecast.
///
/// Both reads must succeed and both payloads must be complete; otherwise the
/// whole cycle fails and nothing partial is returned.
#[instrument(skip(provider, query), fields(query = %query))]
pub async fn fetch_report(
    provider: &dyn WeatherProvider,
    query: &LocationQuery,
    days: u8,
) -> Result<WeatherReport, FetchError> {
    let current = provider.get_current(query.as_str()).await?;
    let forecast = provider.get_forecast(query.as_str(), days).await?;

    let current = current
        .into_conditions()
        .ok_or(FetchError::DataUnavailable(DataKind::Current))?;

    let forecast = forecast
        .into_days()
        .and_then(ForecastSet::new)
        .ok_or(FetchError::DataUnavailable(DataKind::Forecast))?;

    Ok(WeatherReport::new(current, forecast))
}

#[derive(Debug)]
struct FetchOutcome {
    generation: u64,
    result: Result<WeatherReport, FetchError>,
}

/// Owns the [`ViewState`] and the single in-flight fetch task.
#[derive(Debug)]
pub struct WeatherViewer {
    provider: Arc<dyn WeatherProvider>,
    state: watch::Sender<ViewState>,
    generation: u64,
    in_flight: Option<AbortHandle>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl WeatherViewer {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let (state, _) = watch::channel(ViewState::NoLocation);
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Self { provider, state, generation: 0, in_flight: None, outcome_tx, outcome_rx }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Start a new cycle for `query`, cancelling the one in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_location(&mut self, query: &LocationQuery) {
        self.cancel_in_flight();
        self.generation += 1;

        if query.is_empty() {
            debug!("no location, idle");
            self.state.send_replace(ViewState::NoLocation);
            return;
        }

        info!(%query, generation = self.generation, "fetching weather");
        self.state.send_replace(ViewState::Loading);

        let provider = Arc::clone(&self.provider);
        let query = query.clone();
        let tx = self.outcome_tx.clone();
        let generation = self.generation;

        let handle = tokio::spawn(async move {
            let fetch = fetch_report(provider.as_ref(), &query, FORECAST_DAYS);
            let result = AssertUnwindSafe(fetch)
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(FetchError::Panicked(panic_message(panic.as_ref()))));
            let _ = tx.send(FetchOutcome { generation, result });
        });

        self.in_flight = Some(handle.abort_handle());
    }

    /// Wait until the current cycle leaves `Loading` and return the result.
    pub async fn settle(&mut self) -> ViewState {
        while self.is_loading() {
            let Some(outcome) = self.outcome_rx.recv().await else {
                break;
            };
            self.apply(outcome);
        }

        self.state()
    }

    /// Follow the location cell until it is dropped.
    pub async fn run(mut self, mut location: watch::Receiver<LocationQuery>) {
        let initial = location.borrow_and_update().clone();
        self.set_location(&initial);

        loop {
            tokio::select! {
                changed = location.changed() => {
                    if changed.is_err() {
                        debug!("location source closed");
                        break;
                    }
                    let query = location.borrow_and_update().clone();
                    self.set_location(&query);
                }
                Some(outcome) = self.outcome_rx.recv() => self.apply(outcome),
                else => break,
            }
        }
    }

    fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    fn apply(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            debug!(
                stale = outcome.generation,
                current = self.generation,
                "discarding superseded fetch result"
            );
            return;
        }

        self.in_flight = None;

        let next = match outcome.result {
            Ok(report) => ViewState::Loaded(Arc::new(report)),
            Err(err) => {
                let message = err.message();
                warn!(error = %message, "weather fetch failed");
                ViewState::Error(message)
            }
        };

        self.state.send_replace(next);
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl Drop for WeatherViewer {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
