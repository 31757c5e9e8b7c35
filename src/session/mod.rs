//! Plot sessions: the scatter figure plus a live hover-to-tooltip loop.
//!
//! A [`PlotSession`] owns a [`PlotSurface`] and a background resolver thread.
//! Hover events go in through [`PlotSession::handle_event`] or
//! [`PlotSession::run`]; tooltips come out on the surface.

mod error;
mod event;
mod figure;
mod placement;
mod plot_session;
mod state;
mod surface;
mod worker;


pub use error::SessionError;
pub use event::{BoundingBox, HoverEvent, HoverPoint};
pub use figure::{Figure, FigureOptions, FigurePoint};
pub use placement::TooltipDirection;
pub use plot_session::{PlotSession, ResultOutcome};
pub use state::HoverState;
pub use surface::{JsonLinesSurface, Overlay, OverlayImage, PlotSurface};
pub use worker::{ResolveRequest, ResolveResult, ResolverThread};
