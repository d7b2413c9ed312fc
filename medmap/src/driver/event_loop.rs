//! The driver task and its input multiplexing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::command::EngineCommand;
use crate::engine::{EngineView, MapEngine};
use crate::geo::Coordinates;
use crate::geolocation::{GeolocationError, Geolocator};
use crate::mode::MapMode;
use crate::provider::{FeedState, ProviderFeed};
use crate::render::MapRenderer;

/// Pending geolocation results. One request in flight at a time.
const LOCATE_CHANNEL_CAPACITY: usize = 4;

/// How long a location request may take before it fails with a timeout.
pub const DEFAULT_LOCATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Input streams owned by the running loop.
struct Inputs {
    feed_mode: MapMode,
    feed_rx: watch::Receiver<FeedState>,
    feed_open: bool,
    locate_tx: mpsc::Sender<Result<Coordinates, GeolocationError>>,
}

enum Step {
    Stop,
    Command(EngineCommand),
    FeedChanged,
    FeedClosed,
    Located(Result<Coordinates, GeolocationError>),
}

/// Runs a [`MapEngine`] against a provider feed and a geolocator.
pub struct EngineDriver<R, F, G>
where
    R: MapRenderer,
    F: ProviderFeed,
    G: Geolocator + 'static,
{
    engine: MapEngine<R>,
    feed: Arc<F>,
    geolocator: Arc<G>,
    locate_timeout: Duration,
    view_tx: watch::Sender<EngineView>,
}

impl<R, F, G> EngineDriver<R, F, G>
where
    R: MapRenderer,
    F: ProviderFeed,
    G: Geolocator + 'static,
{
    pub fn new(engine: MapEngine<R>, feed: Arc<F>, geolocator: Arc<G>) -> Self {
        let (view_tx, _) = watch::channel(engine.view());
        Self {
            engine,
            feed,
            geolocator,
            locate_timeout: DEFAULT_LOCATE_TIMEOUT,
            view_tx,
        }
    }

    pub fn with_locate_timeout(mut self, timeout: Duration) -> Self {
        self.locate_timeout = timeout;
        self
    }

    /// Receiver of the view published after every handled input.
    pub fn subscribe_view(&self) -> watch::Receiver<EngineView> {
        self.view_tx.subscribe()
    }

    pub fn engine(&self) -> &MapEngine<R> {
        &self.engine
    }

    /// Process inputs until `cancel` fires or every command sender is gone.
    ///
    /// Returns the engine so callers can inspect or reuse it.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<EngineCommand>,
        cancel: CancellationToken,
    ) -> MapEngine<R> {
        let (locate_tx, mut locate_rx) = mpsc::channel(LOCATE_CHANNEL_CAPACITY);
        let mode = self.engine.mode();
        let mut inputs = Inputs {
            feed_mode: mode,
            feed_rx: self.feed.subscribe(mode),
            feed_open: true,
            locate_tx,
        };
        self.apply_feed(&mut inputs);
        self.publish();

        info!(mode = %mode, "engine driver started");

        loop {
            let step = tokio::select! {
                biased;
                _ = cancel.cancelled() => Step::Stop,
                command = commands.recv() => match command {
                    Some(command) => Step::Command(command),
                    None => Step::Stop,
                },
                changed = inputs.feed_rx.changed(), if inputs.feed_open => match changed {
                    Ok(()) => Step::FeedChanged,
                    Err(_) => Step::FeedClosed,
                },
                Some(result) = locate_rx.recv() => Step::Located(result),
            };

            match step {
                Step::Stop => break,
                Step::Command(command) => self.handle_command(command, &mut inputs),
                Step::FeedChanged => self.apply_feed(&mut inputs),
                Step::FeedClosed => {
                    warn!(mode = %inputs.feed_mode, "provider feed closed");
                    inputs.feed_open = false;
                }
                Step::Located(result) => self.apply_location(result),
            }

            self.publish();
        }

        info!("engine driver stopped");
        self.engine
    }

    fn handle_command(&mut self, command: EngineCommand, inputs: &mut Inputs) {
        let engine = &mut self.engine;
        match command {
            EngineCommand::Mount(container) => {
                engine.mount(container);
            }
            EngineCommand::RetryMount => {
                engine.retry_mount();
            }
            EngineCommand::Unmount => engine.unmount(),
            EngineCommand::Navigate(mode) => {
                if engine.navigate(mode) {
                    // Replacing the receiver drops the old subscription
                    inputs.feed_mode = mode;
                    inputs.feed_rx = self.feed.subscribe(mode);
                    inputs.feed_open = true;
                    self.apply_feed(inputs);
                    debug!(mode = %mode, "switched feed subscription");
                }
            }
            EngineCommand::SetFilters(filters) => engine.set_filters(filters),
            EngineCommand::ApplyQueryString(qs) => engine.apply_query_string(&qs),
            EngineCommand::SelectProvider(id) => {
                engine.select_provider(id.as_deref());
            }
            EngineCommand::Event(event) => engine.handle_event(event),
            EngineCommand::LocateUser => {
                if engine.geolocation().loading {
                    debug!("location request already in flight");
                    return;
                }
                engine.begin_locate();
                let geolocator = Arc::clone(&self.geolocator);
                let deadline = self.locate_timeout;
                let tx = inputs.locate_tx.clone();
                tokio::spawn(async move {
                    let result = match tokio::time::timeout(deadline, geolocator.locate()).await {
                        Ok(result) => result,
                        Err(_) => Err(GeolocationError::Timeout(deadline)),
                    };
                    let _ = tx.send(result).await;
                });
            }
            EngineCommand::SetUserPosition(position) => engine.set_user_position(position),
            EngineCommand::SetTheme(theme) => {
                engine.set_theme(theme);
            }
            EngineCommand::SetDirection(direction) => engine.set_direction(direction),
            EngineCommand::SetFullscreen(fullscreen) => engine.set_fullscreen(fullscreen),
            EngineCommand::RetryFeed => {
                if let Some(mode) = engine.request_retry() {
                    info!(mode = %mode, "retrying provider feed");
                    self.feed.retry(mode);
                }
            }
        }
    }

    /// Apply a geolocation result unless a position was set since the
    /// request started.
    fn apply_location(&mut self, result: Result<Coordinates, GeolocationError>) {
        if !self.engine.geolocation().loading {
            debug!("dropping location result, position was set meanwhile");
            return;
        }
        match result {
            Ok(position) => {
                debug!(position = %position, "user located");
                self.engine.set_user_position(Some(position));
            }
            Err(error) => self.engine.locate_failed(error),
        }
    }

    fn apply_feed(&mut self, inputs: &mut Inputs) {
        let mode = inputs.feed_mode;
        let state = inputs.feed_rx.borrow_and_update().clone();
        match state {
            FeedState::Loading => self.engine.set_feed_loading(mode),
            FeedState::Ready(snapshot) => {
                debug!(mode = %mode, revision = snapshot.revision, entities = snapshot.len(), "snapshot received");
                self.engine.set_snapshot(mode, snapshot);
            }
            FeedState::Failed { message } => self.engine.set_feed_failed(mode, message),
        }
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.engine.view());
    }
}
