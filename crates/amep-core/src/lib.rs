//! AMEP Core Library
//!
//! Platform-agnostic core of the AMEP collaboration board: the freehand
//! drawing surface, simulated collaborator presence, session role state and
//! the task list.

pub mod color;
pub mod input;
pub mod presence;
pub mod raster;
pub mod resize;
pub mod session;
pub mod storage;
pub mod surface;
pub mod tasks;
pub mod tools;
pub mod whiteboard;
pub mod workspace;

pub use color::{BACKGROUND, ColorError, DEFAULT_STROKE_COLOR, PALETTE, Rgba};
pub use input::PointerEvent;
pub use presence::{PresenceSource, PresenceTimer, PresenceTool, RemoteActor, SimulatedPresence};
pub use raster::RasterBuffer;
pub use session::{ROLE_KEY, Role, SessionState};
pub use storage::{MemoryStorage, SlotStorage, StorageError, StorageResult};
pub use surface::DrawingSurface;
pub use tasks::{Task, TaskBoard, XpAward};
pub use tools::{StrokeState, ToolKind};
pub use whiteboard::Whiteboard;
pub use workspace::{Workspace, WorkspaceTool};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
