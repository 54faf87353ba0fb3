//! Collaboration workspace shell.
//!
//! The workspace switches between a document view, the whiteboard and a
//! layout view. Only the whiteboard is stateful: it is mounted when selected
//! and unmounted (presence stopped, raster released) when the user switches
//! away, so a later visit starts on a blank board.

use crate::presence::{DEFAULT_TICK_PERIOD, SimulatedPresence};
use crate::whiteboard::Whiteboard;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Panels available in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceTool {
    #[default]
    Doc,
    Board,
    Layout,
}

/// Workspace state: the selected panel and, while on the board, the board.
#[derive(Debug)]
pub struct Workspace {
    tool: WorkspaceTool,
    board: Option<Whiteboard>,
    board_size: Size,
    tick_period: Duration,
}

impl Workspace {
    pub fn new(board_size: Size) -> Self {
        Self::with_tick_period(board_size, DEFAULT_TICK_PERIOD)
    }

    pub fn with_tick_period(board_size: Size, tick_period: Duration) -> Self {
        Self {
            tool: WorkspaceTool::default(),
            board: None,
            board_size,
            tick_period,
        }
    }

    pub fn tool(&self) -> WorkspaceTool {
        self.tool
    }

    pub fn board(&self) -> Option<&Whiteboard> {
        self.board.as_ref()
    }

    pub fn board_mut(&mut self) -> Option<&mut Whiteboard> {
        self.board.as_mut()
    }

    /// Switch panels, mounting or unmounting the board as needed.
    pub fn select_tool(&mut self, tool: WorkspaceTool) {
        if tool == self.tool {
            return;
        }
        self.tool = tool;

        if tool == WorkspaceTool::Board {
            self.board = Some(Whiteboard::mount_with_period(
                self.board_size,
                SimulatedPresence::new(),
                self.tick_period,
            ));
        } else if let Some(mut board) = self.board.take() {
            board.unmount();
        }
    }

    /// Container resize; forwarded to the board when it is mounted.
    pub fn resize(&mut self, size: Size) {
        self.board_size = size;
        if let Some(board) = self.board.as_mut() {
            board.surface_mut().resize(size);
        }
    }

    /// Drive the board's presence timer from the host loop.
    pub fn pump(&mut self, now: Instant) -> u32 {
        self.board.as_mut().map(|b| b.pump(now)).unwrap_or(0)
    }
}
