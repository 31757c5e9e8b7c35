//! The live hover loop of one scatter plot.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError, select};

use super::error::SessionError;
use super::event::{HoverEvent, HoverPoint};
use super::figure::{Figure, FigureOptions};
use super::state::HoverState;
use super::surface::{Overlay, PlotSurface};
use super::worker::{ResolveRequest, ResolveResult, ResolverThread};
use crate::hover::{DisplayConfig, HoverResolver, Resolution};

/// What happened to a result that came back from the resolver thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOutcome {
    /// It answered the latest request and changed the tooltip
    Applied,
    /// A newer hover (or a leave) superseded it
    Discarded,
}

/// A scatter plot with a live tooltip.
///
/// Hover events are handled on the caller's thread and never block: each one
/// that needs a new tooltip is numbered and handed to the resolver thread.
/// Only the result for the latest number is ever shown.
pub struct PlotSession<S: PlotSurface> {
    surface: S,
    figure: Figure,
    worker: Option<ResolverThread>,
    state: HoverState,
    last_request: u64,
}

impl<S: PlotSurface> PlotSession<S> {
    /// Render the figure on `surface` and start the resolver thread.
    pub fn start(
        resolver: Arc<HoverResolver>,
        config: DisplayConfig,
        mut surface: S,
    ) -> Result<Self, SessionError> {
        let figure = Figure::from_table(resolver.table(), &FigureOptions::default());
        surface.render_figure(&figure)?;

        let worker = ResolverThread::spawn(resolver, config)?;
        log::info!("Plot session started with {} points", figure.points.len());

        Ok(Self {
            surface,
            figure,
            worker: Some(worker),
            state: HoverState::Idle,
            last_request: 0,
        })
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    fn worker(&self) -> Result<&ResolverThread, SessionError> {
        self.worker.as_ref().ok_or(SessionError::Stopped)
    }

    /// React to a pointer move. Never waits for resolution.
    pub fn handle_event(&mut self, event: HoverEvent) -> Result<(), SessionError> {
        match event.point {
            Some(hover) => self.hover(hover),
            None => self.leave(),
        }
    }

    fn hover(&mut self, hover: HoverPoint) -> Result<(), SessionError> {
        if self.state.point_id() == Some(hover.id) {
            log::trace!("Point {} already shown or in flight", hover.id);
            return Ok(());
        }

        let request = self.last_request + 1;
        self.worker()?.request(ResolveRequest {
            request,
            point_id: hover.id,
        })?;
        self.last_request = request;

        log::debug!("Hover over point {} (request {})", hover.id, request);
        self.state = HoverState::Resolving { request, hover };
        Ok(())
    }

    fn leave(&mut self) -> Result<(), SessionError> {
        if self.state.is_idle() {
            return Ok(());
        }

        log::debug!("Hover left point, clearing tooltip");
        self.state = HoverState::Idle;
        self.surface.hide_tooltip()?;
        Ok(())
    }

    /// Apply a result if it answers the request currently in flight.
    pub(crate) fn apply_result(
        &mut self,
        result: ResolveResult,
    ) -> Result<ResultOutcome, SessionError> {
        let hover = match &self.state {
            HoverState::Resolving { request, hover } if *request == result.request => *hover,
            _ => {
                log::debug!(
                    "Discarding stale result {} for point {}",
                    result.request,
                    result.point_id
                );
                return Ok(ResultOutcome::Discarded);
            }
        };

        match result.resolution {
            Resolution::Tooltip(payload) => {
                self.surface.show_tooltip(&Overlay::new(&hover, &payload))?;
                self.state = HoverState::Showing {
                    request: result.request,
                    hover,
                    payload,
                };
            }
            Resolution::NoSelection => {
                self.state = HoverState::Idle;
                self.surface.hide_tooltip()?;
            }
        }

        Ok(ResultOutcome::Applied)
    }

    /// Apply every result that is already available. Returns how many were
    /// applied (stale ones are not counted).
    pub fn poll(&mut self) -> Result<usize, SessionError> {
        let mut applied = 0;
        loop {
            let result = match self.worker()?.results().try_recv() {
                Ok(result) => result,
                Err(TryRecvError::Empty) => return Ok(applied),
                Err(TryRecvError::Disconnected) => return Err(SessionError::WorkerDisconnected),
            };
            if self.apply_result(result)? == ResultOutcome::Applied {
                applied += 1;
            }
        }
    }

    /// Block until the next result arrives, then apply or discard it.
    pub fn wait_for_result(&mut self, timeout: Duration) -> Result<ResultOutcome, SessionError> {
        let result = match self.worker()?.results().recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => return Err(SessionError::Timeout),
            Err(RecvTimeoutError::Disconnected) => return Err(SessionError::WorkerDisconnected),
        };
        self.apply_result(result)
    }

    /// Wait until nothing is in flight.
    pub fn settle(&mut self, timeout: Duration) -> Result<(), SessionError> {
        let deadline = Instant::now() + timeout;
        while self.state.is_resolving() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            self.wait_for_result(remaining)?;
        }
        Ok(())
    }

    /// Drive the session from `events` until that channel closes.
    ///
    /// The tooltip for the last hover is still shown before returning.
    pub fn run(&mut self, events: Receiver<HoverEvent>) -> Result<(), SessionError> {
        let results = self.worker()?.results().clone();

        loop {
            let open = select! {
                recv(events) -> event => match event {
                    Ok(event) => {
                        self.handle_event(event)?;
                        true
                    }
                    Err(_) => false,
                },
                recv(results) -> result => match result {
                    Ok(result) => {
                        self.apply_result(result)?;
                        true
                    }
                    Err(_) => return Err(SessionError::WorkerDisconnected),
                },
            };
            if !open {
                break;
            }
        }

        log::debug!("Hover event stream closed");
        while self.state.is_resolving() {
            let result = results.recv().map_err(|_| SessionError::WorkerDisconnected)?;
            self.apply_result(result)?;
        }
        Ok(())
    }

    /// Shut down the resolver thread. Later hovers fail with `Stopped`.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.shutdown();
            log::info!("Plot session stopped");
        }
    }
}

impl<S: PlotSurface> Drop for PlotSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
