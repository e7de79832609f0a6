//! # Weather Pipeline
//!
//! [`WeatherManager`] drives one pass of the widget: forecast first, station
//! reading second, error card last. Each failure is caught at its fetch
//! boundary and turned into the next transition; nothing propagates out of
//! [`WeatherManager::run`].
//!
//! ```text
//! Init → FetchingPrimary
//! FetchingPrimary  --ok-->  RenderedForecast  [terminal]
//! FetchingPrimary  --err--> FetchingFallback
//! FetchingFallback --ok-->  RenderedReading   [terminal]
//! FetchingFallback --err--> RenderedError     [terminal]
//! ```

use crate::{
    presenter::{DisplayRegion, Presenter},
    ui::{LoadingOverlay, Notifier},
    weather_data::WeatherClient,
};
use tracing::{debug, error, info, warn};

const LOADING_MESSAGE: &str = "Loading beach weather...";

/// Where a pipeline run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    FetchingPrimary,
    FetchingFallback,
    RenderedForecast,
    RenderedReading,
    RenderedError,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::RenderedForecast | Self::RenderedReading | Self::RenderedError
        )
    }
}

/// Owns the collaborators for one weather widget and runs it once.
pub struct WeatherManager<R: DisplayRegion, N: Notifier> {
    client: WeatherClient,
    presenter: Presenter<R>,
    notifier: N,
    overlay: LoadingOverlay,
    state: PipelineState,
}

impl<R: DisplayRegion, N: Notifier> WeatherManager<R, N> {
    pub fn new(
        client: WeatherClient,
        presenter: Presenter<R>,
        notifier: N,
        overlay: LoadingOverlay,
    ) -> Self {
        Self {
            client,
            presenter,
            notifier,
            overlay,
            state: PipelineState::Init,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn presenter(&self) -> &Presenter<R> {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut Presenter<R> {
        &mut self.presenter
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn overlay(&self) -> &LoadingOverlay {
        &self.overlay
    }

    /// Run the fetch-fallback-render chain once.
    ///
    /// Calling this again after a terminal state does nothing and returns
    /// that state.
    pub async fn run(&mut self) -> PipelineState {
        if self.state != PipelineState::Init {
            debug!(state = ?self.state, "weather pipeline already ran");
            return self.state;
        }

        self.overlay.show(LOADING_MESSAGE);
        self.transition(PipelineState::FetchingPrimary);

        match self.client.fetch_forecast().await {
            Ok(days) => {
                info!(days = days.len(), "rendering forecast");
                self.presenter.render_forecast(&days);
                self.transition(PipelineState::RenderedForecast);
            }
            Err(err) => {
                warn!(error = %err, "forecast unavailable, falling back to station readings");
                self.notifier
                    .warning("Forecast unavailable, showing current temperature instead");
                self.transition(PipelineState::FetchingFallback);
                self.run_fallback().await;
            }
        }

        self.overlay.hide();
        self.state
    }

    async fn run_fallback(&mut self) {
        match self.client.fetch_current_reading().await {
            Ok(reading) => {
                info!(station = %reading.station_id, "rendering station reading");
                self.presenter.render_reading(&reading);
                self.transition(PipelineState::RenderedReading);
            }
            Err(err) => {
                error!(error = %err, "all weather sources failed");
                self.notifier
                    .error(&format!("Unable to load weather: {}", err.user_message()));
                self.presenter.render_error();
                self.transition(PipelineState::RenderedError);
            }
        }
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(from = ?self.state, to = ?next, "weather pipeline transition");
        self.state = next;
    }
}
