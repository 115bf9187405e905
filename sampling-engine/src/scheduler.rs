use std::{sync::Arc, time::Duration};

use core_types::{Health, OccupancySnapshot, StatusGauge, StatusHandle};
use parking_lot::Mutex;
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};

use crate::{
    error::{CallbackError, SchedulerError},
    shared::SharedSnapshot,
};

/// Sampling callback: reads the current occupancy and may persist it as a
/// side effect. Runs synchronously inside the tick loop.
pub type SampleFn = Box<dyn FnMut() -> Result<Arc<OccupancySnapshot>, CallbackError> + Send>;

/// Secondary callback driven at a sub-multiple of the base rate.
pub type PeriodicFn = Box<dyn FnMut() -> Result<(), CallbackError> + Send>;

/// The tick counter carries no meaning beyond the gauge; the wrap just
/// keeps it from growing without bound.
const TICK_COUNTER_BOUND: u32 = 100;

#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    pub base_freq_hz: f64,
    pub stop_timeout: Duration,
}

impl SchedulerConfig {
    pub fn new(base_freq_hz: f64) -> Self {
        Self {
            base_freq_hz: base_freq_hz.max(0.001),
            stop_timeout: Duration::from_secs(5),
        }
    }

    fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.base_freq_hz)
    }
}

struct PeriodicTask {
    name: &'static str,
    ratio_hz: f64,
    ticks: u32,
    run: PeriodicFn,
}

struct ActiveLoop {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<()>,
}

/// Multi-rate tick scheduler.
///
/// Exactly one background task runs the loop: sleep one base period, fire
/// the first due secondary task (if any), invoke the sampling callback,
/// repeat. Callback errors are recoverable; they are logged and pushed to
/// the status handle and the loop continues to the next tick. `stop` lets
/// the in-flight tick finish and bounds its wait on the loop's exit.
pub struct Scheduler {
    config: SchedulerConfig,
    tasks: Arc<Mutex<Vec<PeriodicTask>>>,
    active: tokio::sync::Mutex<Option<ActiveLoop>>,
    shared: SharedSnapshot,
    status: StatusHandle,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            tasks: Arc::new(Mutex::new(Vec::new())),
            active: tokio::sync::Mutex::new(None),
            shared: SharedSnapshot::new(),
            status: StatusHandle::new("sampling_engine"),
        }
    }

    /// The latest-snapshot cell this loop publishes into.
    pub fn shared_snapshot(&self) -> SharedSnapshot {
        self.shared.clone()
    }

    pub fn status(&self) -> StatusHandle {
        self.status.clone()
    }

    /// Registers a secondary task to fire once each time
    /// `ratio_hz * ticks / base_freq_hz` reaches 1; its private tick
    /// accumulator resets on firing, so `ratio_hz` is the task's own
    /// frequency. On any given tick only the FIRST due task fires, in
    /// registration order; registration order is priority order.
    pub fn register_periodic(
        &self,
        name: &'static str,
        ratio_hz: f64,
        task: impl FnMut() -> Result<(), CallbackError> + Send + 'static,
    ) {
        self.tasks.lock().push(PeriodicTask {
            name,
            ratio_hz,
            ticks: 0,
            run: Box::new(task),
        });
    }

    /// Launches the tick loop. Must be called within a tokio runtime.
    pub fn start(
        &self,
        sample_fn: impl FnMut() -> Result<Arc<OccupancySnapshot>, CallbackError> + Send + 'static,
    ) -> Result<(), SchedulerError> {
        self.spawn_loop(None, Box::new(sample_fn))
    }

    /// Like [`Self::start`], but the loop blocks on `ready` before its
    /// first tick. The dependent collaborator signals once it can accept
    /// updates.
    pub fn start_gated(
        &self,
        ready: oneshot::Receiver<()>,
        sample_fn: impl FnMut() -> Result<Arc<OccupancySnapshot>, CallbackError> + Send + 'static,
    ) -> Result<(), SchedulerError> {
        self.spawn_loop(Some(ready), Box::new(sample_fn))
    }

    fn spawn_loop(
        &self,
        ready: Option<oneshot::Receiver<()>>,
        mut sample_fn: SampleFn,
    ) -> Result<(), SchedulerError> {
        let mut active = self
            .active
            .try_lock()
            .map_err(|_| SchedulerError::AlreadyRunning)?;
        if active.is_some() {
            return Err(SchedulerError::AlreadyRunning);
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let period = self.config.tick_period();
        let base_freq_hz = self.config.base_freq_hz;
        let tasks = Arc::clone(&self.tasks);
        let shared = self.shared.clone();
        let status = self.status.clone();

        let join = tokio::spawn(async move {
            if let Some(ready) = ready {
                log::info!("sampling loop waiting for readiness signal");
                if ready.await.is_err() {
                    log::warn!("readiness signal dropped; starting the loop anyway");
                }
            }

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // Consume the interval's immediate tick so the first real one
            // lands a full period after start.
            ticker.tick().await;

            status.set_health(Health::Ok);
            log::info!("sampling loop started at {base_freq_hz} Hz");
            let mut tick_counter: u32 = 0;

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {}
                }

                dispatch_first_due(&tasks, base_freq_hz, &status);

                match sample_fn() {
                    Ok(snapshot) => {
                        status.set_gauges(vec![
                            StatusGauge::with_unit(
                                "percent_full",
                                snapshot.percent_full() as f64,
                                "percent",
                            ),
                            StatusGauge::new("tick_counter", tick_counter as f64),
                        ]);
                        shared.publish(snapshot);
                    }
                    Err(err) => {
                        log::error!("sample callback failed: {err}");
                        status.push_error(format!("sample callback failed: {err}"));
                    }
                }

                tick_counter = if tick_counter >= TICK_COUNTER_BOUND {
                    0
                } else {
                    tick_counter + 1
                };
            }

            log::info!("sampling loop stopped");
        });

        *active = Some(ActiveLoop {
            shutdown: shutdown_tx,
            join,
        });
        Ok(())
    }

    /// Signals the loop to exit after its current tick and waits for it,
    /// bounded by the configured stop timeout. On timeout the handle is
    /// kept so a later `stop` can try again.
    pub async fn stop(&self) -> Result<(), SchedulerError> {
        let mut active = self.active.lock().await;
        let ActiveLoop { shutdown, mut join } = active.take().ok_or(SchedulerError::NotRunning)?;
        let _ = shutdown.send(true);

        match tokio::time::timeout(self.config.stop_timeout, &mut join).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                log::error!("sampling loop panicked during shutdown: {err}");
                Ok(())
            }
            Err(_) => {
                log::error!(
                    "sampling loop did not stop within {:?}",
                    self.config.stop_timeout
                );
                *active = Some(ActiveLoop { shutdown, join });
                Err(SchedulerError::JoinTimeout(self.config.stop_timeout))
            }
        }
    }

    pub fn is_running(&self) -> bool {
        match self.active.try_lock() {
            Ok(active) => active.is_some(),
            // Someone is starting or stopping the loop right now.
            Err(_) => true,
        }
    }
}

/// Advances every registration's accumulator, then fires the first due
/// task. Only the fired task's accumulator resets; later due tasks wait
/// for a tick on which nothing ahead of them is due.
fn dispatch_first_due(tasks: &Mutex<Vec<PeriodicTask>>, base_freq_hz: f64, status: &StatusHandle) {
    let mut tasks = tasks.lock();
    for task in tasks.iter_mut() {
        task.ticks = task.ticks.saturating_add(1);
    }
    if let Some(task) = tasks
        .iter_mut()
        .find(|task| task.ratio_hz * task.ticks as f64 / base_freq_hz >= 1.0)
    {
        match (task.run)() {
            Ok(()) => log::debug!("periodic task {} fired", task.name),
            Err(err) => {
                log::error!("periodic task {} failed: {err}", task.name);
                status.push_error(format!("periodic task {} failed: {err}", task.name));
            }
        }
        task.ticks = 0;
    }
}
