//! The owning task for tracker state and the flush timer
//!
//! File events and flush requests arrive over a channel and the periodic
//! timer ticks inside the same task, so the [`Tracker`] never needs a lock.
//! A flush drains the buffer synchronously and only then hands the records
//! to a spawned remote-write task. Saves that arrive while that task is
//! running land in the buffer for the next cycle. At most one remote-write
//! task exists at a time; a tick that finds one still running is skipped.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::notifier::Notifier;
use crate::record::ChangeRecord;
use crate::sync::LogSynchronizer;
use crate::tracker::Tracker;
use crate::{Error, Result};

/// Input to the service task
#[derive(Debug)]
pub enum TrackerEvent {
    Created(PathBuf),
    Deleted(PathBuf),
    Saved { path: PathBuf, content: String },
    /// Start a flush cycle now instead of waiting for the timer
    Flush,
    /// Reply with the number of buffered records
    Pending(oneshot::Sender<usize>),
    /// Flush what is buffered and stop
    Shutdown,
}

/// Cloneable sender side of a running [`TrackerService`]
#[derive(Debug, Clone)]
pub struct TrackerHandle {
    events: mpsc::UnboundedSender<TrackerEvent>,
}

impl TrackerHandle {
    pub fn send(&self, event: TrackerEvent) -> Result<()> {
        self.events.send(event).map_err(|_| Error::ServiceStopped)
    }

    pub fn file_created(&self, path: impl Into<PathBuf>) -> Result<()> {
        self.send(TrackerEvent::Created(path.into()))
    }

    pub fn file_deleted(&self, path: impl Into<PathBuf>) -> Result<()> {
        self.send(TrackerEvent::Deleted(path.into()))
    }

    pub fn file_saved(&self, path: impl Into<PathBuf>, content: impl Into<String>) -> Result<()> {
        self.send(TrackerEvent::Saved {
            path: path.into(),
            content: content.into(),
        })
    }

    pub fn flush_now(&self) -> Result<()> {
        self.send(TrackerEvent::Flush)
    }

    /// Number of buffered records once every earlier event is handled
    pub async fn pending(&self) -> Result<usize> {
        let (tx, rx) = oneshot::channel();
        self.send(TrackerEvent::Pending(tx))?;
        rx.await.map_err(|_| Error::ServiceStopped)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(TrackerEvent::Shutdown)
    }
}

/// Bounds for the timer period; values outside are clamped
const MIN_TICK_PERIOD: Duration = Duration::from_secs(1);
const MAX_TICK_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

fn tick_period(interval: Duration) -> Duration {
    let period = interval.clamp(MIN_TICK_PERIOD, MAX_TICK_PERIOD);
    if period != interval {
        warn!(
            "Flush interval of {}s is out of range, using {}s",
            interval.as_secs(),
            period.as_secs()
        );
    }
    period
}

/// Owns the [`Tracker`] and schedules flush cycles
pub struct TrackerService {
    tracker: Tracker,
    synchronizer: Arc<LogSynchronizer>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
    events: mpsc::UnboundedReceiver<TrackerEvent>,
    in_flight: Option<JoinHandle<()>>,
    completed_tx: mpsc::UnboundedSender<()>,
    completed_rx: mpsc::UnboundedReceiver<()>,
}

impl TrackerService {
    /// Create a service and the handle used to feed it events
    ///
    /// `interval` is clamped to between one second and one year.
    pub fn new(
        synchronizer: LogSynchronizer,
        interval: Duration,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, TrackerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (completed_tx, completed_rx) = mpsc::unbounded_channel();
        let service = Self {
            tracker: Tracker::new(),
            synchronizer: Arc::new(synchronizer),
            notifier,
            interval: tick_period(interval),
            events: rx,
            in_flight: None,
            completed_tx,
            completed_rx,
        };
        (service, TrackerHandle { events: tx })
    }

    /// Run until a shutdown event arrives or every handle is dropped.
    ///
    /// On the way out the service waits for an in-flight flush, then
    /// flushes whatever is still buffered.
    pub async fn run(mut self) {
        let start = Instant::now()
            .checked_add(self.interval)
            .unwrap_or_else(Instant::now);
        let mut ticker = time::interval_at(start, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            "Tracker started, flushing every {}s to {}",
            self.interval.as_secs(),
            self.synchronizer.resource()
        );

        loop {
            // Completions first: a caller that saw a flush notification
            // must find the service idle on its next request.
            tokio::select! {
                biased;
                Some(()) = self.completed_rx.recv() => self.in_flight = None,
                _ = ticker.tick() => self.start_flush(),
                event = self.events.recv() => match event {
                    Some(TrackerEvent::Shutdown) | None => break,
                    Some(event) => self.handle(event),
                },
            }
        }

        // Events queued behind the shutdown request still belong to this session
        self.events.close();
        while let Ok(event) = self.events.try_recv() {
            if !matches!(event, TrackerEvent::Shutdown | TrackerEvent::Flush) {
                self.handle(event);
            }
        }

        if let Some(in_flight) = self.in_flight.take()
            && let Err(e) = in_flight.await
        {
            error!("Flush task failed: {}", e);
        }

        let records = self.tracker.drain();
        if !records.is_empty() {
            info!("Flushing {} record(s) before shutdown", records.len());
            run_flush(
                self.synchronizer.clone(),
                self.notifier.clone(),
                records,
                self.completed_tx.clone(),
            )
            .await;
        }
        info!("Tracker stopped");
    }

    fn handle(&mut self, event: TrackerEvent) {
        match event {
            TrackerEvent::Created(path) => self.tracker.file_created(path),
            TrackerEvent::Deleted(path) => self.tracker.file_deleted(path),
            TrackerEvent::Saved { path, content } => {
                self.tracker.file_saved(path, content);
            }
            TrackerEvent::Flush => self.start_flush(),
            TrackerEvent::Pending(reply) => {
                let _ = reply.send(self.tracker.buffer().len());
            }
            TrackerEvent::Shutdown => {}
        }
    }

    /// Drain the buffer and spawn the remote write, unless one is running
    fn start_flush(&mut self) {
        if let Some(in_flight) = &self.in_flight
            && !in_flight.is_finished()
        {
            warn!(
                "Previous flush still in progress, keeping {} record(s) for the next cycle",
                self.tracker.buffer().len()
            );
            return;
        }

        if self.tracker.buffer().is_empty() {
            debug!("Nothing buffered, skipping flush");
            return;
        }

        // Drain before the first await so later saves go to the next cycle
        let records = self.tracker.drain();
        info!("Initiating flush of {} buffered change(s)", records.len());
        self.in_flight = Some(tokio::spawn(run_flush(
            self.synchronizer.clone(),
            self.notifier.clone(),
            records,
            self.completed_tx.clone(),
        )));
    }
}

async fn run_flush(
    synchronizer: Arc<LogSynchronizer>,
    notifier: Arc<dyn Notifier>,
    records: Vec<ChangeRecord>,
    completed: mpsc::UnboundedSender<()>,
) {
    let count = records.len();
    let result = synchronizer.flush(records).await;
    let _ = completed.send(());
    match result {
        Ok(outcome) => notifier.flush_succeeded(&outcome),
        Err(e) => {
            error!(records = count, error = ?e, "Flush failed, records dropped");
            notifier.flush_failed(&e);
        }
    }
}
