//! App module for SimpleClock
//! Turns window events into clock-face updates, window moves and help popups

use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::constants::{VK_F1, VK_F2};
use crate::display::{ClockFace, DisplayMode};
use crate::geometry::{Point, Rect, Size};
use crate::help::HELP_TEXT;
use crate::placement::{dock_bottom_right, place_beside};

/// Keys the clock distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    F1,
    F2,
    Other(u32),
}

impl Key {
    pub fn from_virtual_key(code: u32) -> Self {
        match code {
            VK_F1 => Key::F1,
            VK_F2 => Key::F2,
            other => Key::Other(other),
        }
    }
}

/// Input delivered by the window layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Loaded,
    TimerTick,
    DoubleClick,
    RightClick,
    KeyDown(Key),
}

/// Wall-clock and monotonic time read together for one event
#[derive(Debug, Clone, Copy)]
pub struct Moment {
    pub wall: NaiveDateTime,
    pub mono: Instant,
}

impl Moment {
    pub fn now() -> Self {
        Self {
            wall: Local::now().naive_local(),
            mono: Instant::now(),
        }
    }
}

/// The windows the clock drives. Implemented by the Win32 layer and by test mocks.
pub trait Surface {
    /// Handle to an open help popup
    type Help;

    /// Usable screen area, excluding taskbars
    fn work_area(&self) -> Rect;
    /// Current outer bounds of the clock window
    fn main_bounds(&self) -> Rect;
    fn move_main(&mut self, to: Point);
    fn set_label(&mut self, text: &str, tooltip: Option<&str>, mode: DisplayMode);
    fn set_topmost(&mut self, topmost: bool);

    /// Create the help popup, hidden, so it can be measured before placing
    fn open_help(&mut self, text: &str) -> Self::Help;
    fn help_size(&self, help: &Self::Help) -> Size;
    /// Move the help popup to `to` and show it
    fn move_help(&mut self, help: &Self::Help, to: Point);
    fn close_help(&mut self, help: Self::Help);
}

/// Application state behind the clock window
#[derive(Debug)]
pub struct ClockApp<H> {
    face: ClockFace,
    topmost: bool,
    help: Option<H>,
}

impl<H: PartialEq> ClockApp<H> {
    pub fn new(topmost: bool) -> Self {
        Self {
            face: ClockFace::new(),
            topmost,
            help: None,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.face.mode()
    }

    pub fn topmost(&self) -> bool {
        self.topmost
    }

    pub fn help(&self) -> Option<&H> {
        self.help.as_ref()
    }

    /// Handle one event from the window layer
    pub fn dispatch<S>(&mut self, event: ClockEvent, moment: Moment, surface: &mut S)
    where
        S: Surface<Help = H>,
    {
        match event {
            ClockEvent::Loaded => {
                surface.set_topmost(self.topmost);
                self.dock(surface);
                self.refresh(moment, surface);
            }
            ClockEvent::DoubleClick => self.dock(surface),
            ClockEvent::TimerTick => self.refresh(moment, surface),
            ClockEvent::RightClick => {
                let mode = self.face.toggle(moment.mono);
                info!(?mode, "switched display mode");
                self.refresh(moment, surface);
            }
            ClockEvent::KeyDown(Key::F1) => self.show_help(surface),
            ClockEvent::KeyDown(Key::F2) => {
                self.topmost = !self.topmost;
                info!(topmost = self.topmost, "toggled topmost");
                surface.set_topmost(self.topmost);
            }
            ClockEvent::KeyDown(Key::Other(code)) => {
                debug!(code, "ignoring key");
            }
        }
    }

    /// Forget the help popup once the window layer reports it closed.
    /// Stale notifications for an already replaced popup are ignored.
    pub fn help_closed(&mut self, help: &H) {
        if self.help.as_ref() == Some(help) {
            self.help = None;
        }
    }

    fn dock<S: Surface<Help = H>>(&self, surface: &mut S) {
        let size = surface.main_bounds().size();
        let home = dock_bottom_right(size, surface.work_area());
        debug!(x = home.x, y = home.y, "docking clock");
        surface.move_main(home);
    }

    fn refresh<S: Surface<Help = H>>(&self, moment: Moment, surface: &mut S) {
        let readout = self.face.tick(moment.wall, moment.mono);
        surface.set_label(&readout.text, readout.tooltip.as_deref(), self.face.mode());
    }

    fn show_help<S: Surface<Help = H>>(&mut self, surface: &mut S) {
        if let Some(old) = self.help.take() {
            surface.close_help(old);
        }

        let help = surface.open_help(HELP_TEXT);
        let size = surface.help_size(&help);
        let pos = place_beside(surface.main_bounds(), size, surface.work_area());
        debug!(x = pos.x, y = pos.y, "placing help");
        surface.move_help(&help, pos);
        self.help = Some(help);
    }
}
