use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;

use tokio::sync::mpsc;

use crate::persist::{
    decode::decode_image_file,
    types::{LoadCompletion, LoadedImage, PersistError},
};

#[derive(Debug)]
struct LoadRequest {
    path: PathBuf,
    revision: u64,
    generation: u64,
}

/// Decodes image files in the background.
///
/// Requests go to a tokio task that decodes on the blocking pool; finished
/// loads are queued for the UI thread, which owns the canvas and applies them.
pub struct ImageLoader {
    /// Channel for sending load requests.
    request_tx: mpsc::UnboundedSender<LoadRequest>,
    /// Finished loads waiting to be applied.
    completion_rx: std_mpsc::Receiver<LoadCompletion>,
    /// Requests sent but not yet taken.
    pending: usize,
    /// Generation of the newest request.
    latest_generation: u64,
}

impl ImageLoader {
    /// Create a new loader.
    ///
    /// This spawns a background task that handles decode requests.
    ///
    /// # Arguments
    /// * `runtime_handle` - Tokio runtime handle for spawning async tasks
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<LoadRequest>();
        let (completion_tx, completion_rx) = std_mpsc::channel::<LoadCompletion>();

        runtime_handle.spawn(async move {
            while let Some(request) = request_rx.recv().await {
                log::debug!("Processing load request: {}", request.path.display());

                let LoadRequest {
                    path,
                    revision,
                    generation,
                } = request;
                let decode_path = path.clone();
                let result = match tokio::task::spawn_blocking(move || {
                    decode_image_file(&decode_path)
                })
                .await
                {
                    Ok(Ok(image)) => Ok(LoadedImage {
                        source: path.clone(),
                        revision,
                        image,
                    }),
                    Ok(Err(e)) => Err(e),
                    Err(join_error) => Err(PersistError::Decode {
                        path: path.clone(),
                        message: join_error.to_string(),
                    }),
                };

                if completion_tx
                    .send(LoadCompletion {
                        source: path,
                        generation,
                        result,
                    })
                    .is_err()
                {
                    log::debug!("Image loader owner dropped, stopping");
                    break;
                }
            }
        });

        Self {
            request_tx,
            completion_rx,
            pending: 0,
            latest_generation: 0,
        }
    }

    /// Request a load of `path`, tagged with the current store revision.
    ///
    /// This is non-blocking and returns immediately. Returns the request's
    /// generation; only the newest generation should be applied.
    pub fn request(&mut self, path: PathBuf, revision: u64) -> Result<u64, PersistError> {
        let generation = self.latest_generation + 1;
        self.request_tx
            .send(LoadRequest {
                path,
                revision,
                generation,
            })
            .map_err(|_| PersistError::LoaderStopped)?;
        self.latest_generation = generation;
        self.pending += 1;
        Ok(generation)
    }

    /// Whether a newer request has been made since `generation`.
    pub fn is_superseded(&self, generation: u64) -> bool {
        generation < self.latest_generation
    }

    /// Number of loads requested but not yet taken.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Takes every finished load without waiting.
    pub fn try_take_completed(&mut self) -> Vec<LoadCompletion> {
        let mut completed = Vec::new();
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            completed.push(completion);
        }
        completed
    }

    /// Blocks until every outstanding load has finished and returns them in
    /// request order.
    pub fn wait_completed(&mut self) -> Result<Vec<LoadCompletion>, PersistError> {
        let mut completed = Vec::new();
        while self.pending > 0 {
            let completion = self
                .completion_rx
                .recv()
                .map_err(|_| PersistError::LoaderStopped)?;
            self.pending -= 1;
            completed.push(completion);
        }
        Ok(completed)
    }
}

#[cfg(test)]
impl ImageLoader {
    pub(crate) fn with_closed_channel_for_test() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<LoadRequest>();
        drop(rx);
        let (_completion_tx, completion_rx) = std_mpsc::channel();
        Self {
            request_tx: tx,
            completion_rx,
            pending: 0,
            latest_generation: 0,
        }
    }
}
