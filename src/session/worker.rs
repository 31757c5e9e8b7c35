//! Background thread that resolves hovered points.
//!
//! Hover events arrive far faster than thumbnails can be rendered, so the
//! thread only ever works on the newest queued request. Older ones are
//! skipped without a result; the session discards late results anyway.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};

use super::error::SessionError;
use crate::hover::{DisplayConfig, HoverResolver, Resolution};

/// Request to resolve one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Session-wide request number, increasing with every dispatch
    pub request: u64,
    pub point_id: usize,
}

/// Resolution of a request, tagged with the request it answers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveResult {
    pub request: u64,
    pub point_id: usize,
    pub resolution: Resolution,
}

/// Message sent to the resolver thread.
enum ThreadMessage {
    /// Resolve a point
    Resolve(ResolveRequest),
    /// Shutdown the thread
    Shutdown,
}

/// Owns the resolver thread and both ends of its channels.
pub struct ResolverThread {
    request_tx: Sender<ThreadMessage>,
    result_rx: Receiver<ResolveResult>,
    thread_handle: Option<JoinHandle<()>>,
}

impl ResolverThread {
    /// Spawn the resolver thread.
    pub fn spawn(resolver: Arc<HoverResolver>, config: DisplayConfig) -> Result<Self, SessionError> {
        let (request_tx, request_rx) = unbounded::<ThreadMessage>();
        let (result_tx, result_rx) = unbounded::<ResolveResult>();

        let thread_handle = thread::Builder::new()
            .name("hover-resolver".to_string())
            .spawn(move || {
                log::debug!("Hover resolver thread started");
                Self::thread_loop(&resolver, &config, request_rx, result_tx);
                log::debug!("Hover resolver thread exiting");
            })
            .map_err(SessionError::Spawn)?;

        Ok(Self {
            request_tx,
            result_rx,
            thread_handle: Some(thread_handle),
        })
    }

    fn thread_loop(
        resolver: &HoverResolver,
        config: &DisplayConfig,
        request_rx: Receiver<ThreadMessage>,
        result_tx: Sender<ResolveResult>,
    ) {
        loop {
            let mut request = match request_rx.recv() {
                Ok(ThreadMessage::Resolve(request)) => request,
                Ok(ThreadMessage::Shutdown) => {
                    log::debug!("Received shutdown signal");
                    return;
                }
                Err(_) => return,
            };

            // Coalesce: only the newest queued request is worth resolving
            loop {
                match request_rx.try_recv() {
                    Ok(ThreadMessage::Resolve(newer)) => {
                        log::trace!("Skipping superseded request {}", request.request);
                        request = newer;
                    }
                    Ok(ThreadMessage::Shutdown) => return,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }

            let resolution = resolver.resolve(Some(request.point_id), config);
            let result = ResolveResult {
                request: request.request,
                point_id: request.point_id,
                resolution,
            };
            if result_tx.send(result).is_err() {
                log::warn!("Result channel closed, resolver thread exiting");
                return;
            }
        }
    }

    /// Queue a request. Never blocks.
    pub fn request(&self, request: ResolveRequest) -> Result<(), SessionError> {
        self.request_tx
            .send(ThreadMessage::Resolve(request))
            .map_err(|_| SessionError::WorkerDisconnected)
    }

    /// Receiving end for results, e.g. for use in `select!`.
    pub fn results(&self) -> &Receiver<ResolveResult> {
        &self.result_rx
    }

    /// Stop the thread and wait for it to finish.
    pub fn shutdown(mut self) {
        self.join();
    }

    fn join(&mut self) {
        let Some(handle) = self.thread_handle.take() else {
            return;
        };

        let _ = self.request_tx.send(ThreadMessage::Shutdown);
        if let Err(e) = handle.join() {
            log::warn!("Hover resolver thread panicked: {:?}", e);
        }
    }
}

impl Drop for ResolverThread {
    fn drop(&mut self) {
        self.join();
    }
}
