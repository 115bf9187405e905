use tokio::sync::mpsc;

/// Opaque zero-argument callback for the presentation collaborator.
pub type UpdateTask = Box<dyn FnOnce() + Send>;

/// Creates the two ends of a presentation update channel.
///
/// The core enqueues callbacks fire-and-forget; the collaborator drains and
/// executes them on whatever thread it owns. The core assumes nothing about
/// that thread's identity.
pub fn update_queue() -> (UpdateQueue, UpdateDrain) {
    let (tx, rx) = mpsc::unbounded_channel();
    (UpdateQueue { tx }, UpdateDrain { rx })
}

/// Producer end, held by the core.
#[derive(Clone)]
pub struct UpdateQueue {
    tx: mpsc::UnboundedSender<UpdateTask>,
}

impl UpdateQueue {
    /// Enqueues a callback; returns false when the collaborator is gone.
    pub fn enqueue(&self, task: impl FnOnce() + Send + 'static) -> bool {
        self.tx.send(Box::new(task)).is_ok()
    }
}

/// Consumer end, held by the presentation collaborator.
pub struct UpdateDrain {
    rx: mpsc::UnboundedReceiver<UpdateTask>,
}

impl UpdateDrain {
    /// Awaits the next callback; `None` when every producer is gone.
    pub async fn next(&mut self) -> Option<UpdateTask> {
        self.rx.recv().await
    }

    /// Runs every callback queued so far; returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }
}
