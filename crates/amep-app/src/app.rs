//! Application root.

use amep_content::{ContentBackend, ContentError, ContentService, ContentType, HttpBackend, TopicContent};
use amep_core::presence::DEFAULT_TICK_PERIOD;
use amep_core::session::{Role, SessionState};
use amep_core::storage::{SlotStorage, StorageError};
use amep_core::tasks::{TaskBoard, XpAward};
use amep_core::whiteboard::Whiteboard;
use amep_core::workspace::{Workspace, WorkspaceTool};
use amep_render::{PresenceOverlay, RenderContext, Renderer, RendererError};
use kurbo::{Point, Size};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub board_width: u32,
    pub board_height: u32,
    /// Presence tick period.
    pub tick_period: Duration,
    /// Session storage directory; the platform data dir when unset.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            board_width: 1280,
            board_height: 800,
            tick_period: DEFAULT_TICK_PERIOD,
            data_dir: None,
        }
    }
}

impl AppConfig {
    pub fn board_size(&self) -> Size {
        Size::new(f64::from(self.board_width), f64::from(self.board_height))
    }
}

/// The application root.
pub struct App<S: SlotStorage, B: ContentBackend = HttpBackend> {
    config: AppConfig,
    session: SessionState<S>,
    workspace: Workspace,
    tasks: Option<TaskBoard>,
    content: Option<ContentService<B>>,
}

impl<S: SlotStorage, B: ContentBackend> App<S, B> {
    /// Create the app, restoring any persisted session from `storage`.
    pub fn new(config: AppConfig, storage: Arc<S>) -> Self {
        let session = SessionState::init(storage);
        let tasks = session.role().map(TaskBoard::for_role);
        let workspace = Workspace::with_tick_period(config.board_size(), config.tick_period);
        Self {
            config,
            session,
            workspace,
            tasks,
            content: None,
        }
    }

    /// Attach a content service.
    pub fn with_content(mut self, content: ContentService<B>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    pub fn session(&self) -> &SessionState<S> {
        &self.session
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    pub fn tasks(&self) -> Option<&TaskBoard> {
        self.tasks.as_ref()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Log in as `role`, loading that role's task list.
    pub fn login(&mut self, role: Role) -> AppResult<()> {
        self.tasks = Some(TaskBoard::for_role(role));
        self.session.login(role)?;
        Ok(())
    }

    /// Log out, closing the board and clearing the persisted role.
    pub fn logout(&mut self) -> AppResult<()> {
        self.workspace.select_tool(WorkspaceTool::Doc);
        self.tasks = None;
        self.session.logout()?;
        Ok(())
    }

    /// Switch the workspace to the whiteboard.
    pub fn open_board(&mut self) -> Option<&mut Whiteboard> {
        self.workspace.select_tool(WorkspaceTool::Board);
        self.workspace.board_mut()
    }

    /// Advance presence on the open board. Returns ticks fired.
    pub fn advance_presence(&mut self, elapsed: Duration) -> u32 {
        self.workspace
            .board_mut()
            .map(|board| board.advance(elapsed))
            .unwrap_or(0)
    }

    /// Overlay for the open board, if any.
    pub fn overlay(&self) -> Option<PresenceOverlay> {
        self.workspace.board().map(PresenceOverlay::for_board)
    }

    /// Render the open board. Returns `false` when there is nothing to draw.
    pub fn render_board<R: Renderer>(&self, renderer: &mut R) -> AppResult<bool> {
        let Some(board) = self.workspace.board() else {
            return Ok(false);
        };
        let Some(raster) = board.surface().raster() else {
            return Ok(false);
        };
        let overlay = PresenceOverlay::for_board(board);
        renderer.build_scene(&RenderContext::new(raster, &overlay))?;
        Ok(true)
    }

    /// Toggle a task on the current role's board.
    pub fn toggle_task(&mut self, id: &str, at: Point) -> Option<XpAward> {
        self.tasks.as_mut().and_then(|tasks| tasks.toggle(id, at))
    }

    /// Generate library content; `None` without a content service.
    pub async fn topic_content(&self, topic: &str, content_type: ContentType) -> Option<TopicContent> {
        match &self.content {
            Some(content) => content.topic_content(topic, content_type).await,
            None => {
                log::warn!("Content service not configured; skipping {} for {:?}", content_type, topic);
                None
            }
        }
    }
}
