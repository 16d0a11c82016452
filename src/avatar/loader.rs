//! Background avatar loading.
//!
//! Requests go to a single worker thread over a channel; results come back
//! over a second channel that the event loop drains without blocking.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use image::DynamicImage;

use super::fetch::{AvatarError, AvatarFetcher};

#[derive(Debug)]
struct AvatarRequest {
    key: String,
    url: String,
}

/// Outcome of one avatar fetch.
#[derive(Debug)]
pub struct AvatarResult {
    /// Entry text the avatar belongs to.
    pub key: String,
    pub outcome: Result<DynamicImage, AvatarError>,
}

/// Fire-and-forget avatar loader.
///
/// Dropping the loader (or calling [`AvatarLoader::shutdown`]) closes the
/// request channel; the worker finishes its current fetch and exits.
pub struct AvatarLoader {
    base_url: String,
    requests: Option<Sender<AvatarRequest>>,
    results: Receiver<AvatarResult>,
}

impl AvatarLoader {
    /// Spawn the worker thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS refuses to spawn a thread.
    pub fn spawn<F>(fetcher: F, base_url: impl Into<String>) -> std::io::Result<Self>
    where
        F: AvatarFetcher + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<AvatarRequest>();
        let (result_tx, result_rx) = mpsc::channel();

        thread::Builder::new()
            .name("avatar-loader".to_string())
            .spawn(move || {
                for request in request_rx {
                    let outcome = fetcher.fetch(&request.url);
                    if let Err(err) = &outcome {
                        tracing::debug!(url = %request.url, %err, "avatar fetch failed");
                    }
                    let result = AvatarResult {
                        key: request.key,
                        outcome,
                    };
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
                tracing::debug!("avatar loader stopped");
            })?;

        Ok(Self {
            base_url: base_url.into(),
            requests: Some(request_tx),
            results: result_rx,
        })
    }

    /// Queue a fetch for the avatar of `key`.
    ///
    /// Returns false once the loader has been shut down.
    pub fn request(&self, key: &str) -> bool {
        let Some(requests) = &self.requests else {
            return false;
        };
        let url = super::avatar_url(&self.base_url, key);
        tracing::trace!(%url, "avatar requested");
        requests
            .send(AvatarRequest {
                key: key.to_string(),
                url,
            })
            .is_ok()
    }

    /// Collect every result that has arrived so far.
    pub fn drain(&self) -> Vec<AvatarResult> {
        let mut out = Vec::new();
        loop {
            match self.results.try_recv() {
                Ok(result) => out.push(result),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    /// Stop accepting requests. Pending requests are abandoned.
    pub fn shutdown(&mut self) {
        self.requests = None;
    }

    pub const fn is_running(&self) -> bool {
        self.requests.is_some()
    }

    #[cfg(test)]
    fn recv_timeout(&self, timeout: std::time::Duration) -> Option<AvatarResult> {
        self.results.recv_timeout(timeout).ok()
    }
}

impl Drop for AvatarLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}
