//! Mounted collaboration board: drawing surface plus simulated presence.
//!
//! The board owns the presence timer, so unmounting it is the single point
//! where ticking stops and the raster is released.

use crate::presence::{PresenceSource, PresenceTimer, RemoteActor, SimulatedPresence};
use crate::surface::DrawingSurface;
use crate::tools::ToolKind;
use kurbo::Size;
use std::time::{Duration, Instant};

/// A drawing surface mounted together with a presence source.
#[derive(Debug)]
pub struct Whiteboard<P: PresenceSource = SimulatedPresence> {
    surface: DrawingSurface,
    presence: Option<P>,
    timer: PresenceTimer,
}

impl<P: PresenceSource> Whiteboard<P> {
    /// Mount a board measured at `size`, ticking at the default period.
    pub fn mount(size: Size, source: P) -> Self {
        Self::mount_with_timer(size, source, PresenceTimer::default())
    }

    /// Mount a board with a custom presence period.
    pub fn mount_with_period(size: Size, source: P, period: Duration) -> Self {
        Self::mount_with_timer(size, source, PresenceTimer::new(period))
    }

    fn mount_with_timer(size: Size, source: P, timer: PresenceTimer) -> Self {
        log::debug!(
            "Mounting whiteboard at {}x{} with {} remote actors",
            size.width,
            size.height,
            source.actors().len()
        );
        Self {
            surface: DrawingSurface::with_size(size),
            presence: Some(source),
            timer,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.presence.is_some()
    }

    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DrawingSurface {
        &mut self.surface
    }

    /// Tool the local user is holding.
    pub fn local_tool(&self) -> ToolKind {
        self.surface.stroke_state().tool()
    }

    /// Current remote actors; empty once unmounted.
    pub fn actors(&self) -> &[RemoteActor] {
        self.presence.as_ref().map(|p| p.actors()).unwrap_or(&[])
    }

    pub fn presence(&self) -> Option<&P> {
        self.presence.as_ref()
    }

    pub fn timer(&self) -> &PresenceTimer {
        &self.timer
    }

    /// Fire the ticks due after `elapsed`. Returns the number fired.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.timer.advance(elapsed);
        self.fire(due)
    }

    /// Fire the ticks due at wall-clock time `now`. Returns the number fired.
    pub fn pump(&mut self, now: Instant) -> u32 {
        let due = self.timer.poll(now);
        self.fire(due)
    }

    fn fire(&mut self, due: u32) -> u32 {
        let Some(presence) = self.presence.as_mut() else {
            return 0;
        };
        for _ in 0..due {
            presence.tick();
        }
        due
    }

    /// Tear the board down: stop ticking, drop actors, release the raster.
    pub fn unmount(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.timer.cancel();
        self.presence = None;
        self.surface.release();
        log::debug!("Whiteboard unmounted after {} presence ticks", self.timer.fired());
    }
}

impl<P: PresenceSource> Drop for Whiteboard<P> {
    fn drop(&mut self) {
        self.unmount();
    }
}
