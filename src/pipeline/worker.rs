//! Background transform thread.
//!
//! Jobs go in over one channel, `(RequestId, TransformOutput)` pairs come
//! back over another. The event loop drains results and passes each one
//! through [`Invoker::deliver`](super::Invoker::deliver), so a slow job can
//! never overwrite a newer result.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::LensResult;
use crate::transform::{Transform, TransformOutput};

use super::invoker::RequestId;

/// Transform usable from the worker thread.
pub type SharedTransform = Arc<dyn Transform + Send + Sync>;

struct Job {
    id: RequestId,
    source: String,
}

pub struct TransformWorker {
    jobs: Option<Sender<Job>>,
    results: Receiver<(RequestId, TransformOutput)>,
    handle: Option<JoinHandle<()>>,
}

impl TransformWorker {
    pub fn spawn(transform: SharedTransform) -> LensResult<Self> {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (result_tx, result_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("wslens-transform".into())
            .spawn(move || {
                for job in job_rx {
                    let output = transform.transform(&job.source);
                    if result_tx.send((job.id, output)).is_err() {
                        break;
                    }
                }
                debug!("transform worker exiting");
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            results: result_rx,
            handle: Some(handle),
        })
    }

    /// Queue a transform. A dead worker is logged, not reported.
    pub fn submit(&self, id: RequestId, source: String) {
        let Some(jobs) = &self.jobs else {
            return;
        };
        if jobs.send(Job { id, source }).is_err() {
            warn!(request = id.get(), "transform worker is gone; request dropped");
        }
    }

    /// Next finished result, if any, without blocking.
    pub fn try_recv(&self) -> Option<(RequestId, TransformOutput)> {
        self.results.try_recv().ok()
    }

    /// Wait up to `timeout` for the next finished result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<(RequestId, TransformOutput)> {
        match self.results.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for TransformWorker {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
