//! Headless AMEP entry point.
//!
//! Restores (or starts) a session, opens the whiteboard, replays a short
//! stroke, runs a few presence ticks and logs what a viewer would see.

use amep_app::{App, AppConfig, AppResult};
use amep_content::{ContentService, ContentType, HttpBackend};
use amep_core::input::PointerEvent;
use amep_core::session::Role;
use amep_core::storage::FileStorage;
use amep_render::SoftwareRenderer;
use clap::{Parser, ValueEnum};
use kurbo::Point;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliRole {
    Teacher,
    Student,
}

impl From<CliRole> for Role {
    fn from(role: CliRole) -> Self {
        match role {
            CliRole::Teacher => Role::Teacher,
            CliRole::Student => Role::Student,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "amep", about = "AMEP collaboration board (headless)")]
struct Cli {
    /// Log in with this role.
    #[arg(long, value_enum)]
    role: Option<CliRole>,

    /// Clear the stored session and exit.
    #[arg(long)]
    logout: bool,

    /// Presence ticks to simulate.
    #[arg(long, default_value_t = 10)]
    ticks: u32,

    /// Generate library content for this topic (needs AMEP_API_KEY).
    #[arg(long)]
    topic: Option<String>,

    /// Library content type: quiz, summary or problems.
    #[arg(long, default_value = "summary")]
    content_type: ContentType,

    /// Session storage directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig {
        data_dir: cli.data_dir,
        ..AppConfig::default()
    };
    let storage = match &config.data_dir {
        Some(dir) => FileStorage::new(dir.clone())?,
        None => FileStorage::default_location()?,
    };
    log::info!("Starting AMEP (session in {})", storage.base_path().display());

    let mut app: App<FileStorage> = App::new(config, Arc::new(storage));
    if cli.logout {
        return app.logout();
    }

    if cli.topic.is_some() {
        match HttpBackend::from_env() {
            Ok(backend) => app = app.with_content(ContentService::new(backend)),
            Err(e) => log::warn!("Content generation disabled: {}", e),
        }
    }

    if let Some(role) = cli.role {
        app.login(role.into())?;
    }
    let Some(role) = app.role() else {
        log::info!("No active session; pass --role teacher|student to log in");
        return Ok(());
    };

    if let Some(tasks) = app.tasks() {
        for task in tasks.pending() {
            log::info!("[{:?}] {} ({} XP)", task.priority, task.title, task.xp);
        }
        log::info!("{} session, {} XP earned", role, tasks.earned_xp());
    }

    if let Some(board) = app.open_board() {
        let surface = board.surface_mut();
        let stroke = [
            PointerEvent::Down { position: Point::new(10.0, 10.0) },
            PointerEvent::Move { position: Point::new(60.0, 40.0) },
            PointerEvent::Move { position: Point::new(120.0, 40.0) },
            PointerEvent::Up { position: Point::new(120.0, 40.0) },
        ];
        for event in stroke {
            surface.handle_pointer_event(event);
        }
    }

    let period = app.config().tick_period;
    let fired: u32 = (0..cli.ticks).map(|_| app.advance_presence(period)).sum();
    log::info!("Simulated {} presence ticks", fired);

    if let Some(overlay) = app.overlay() {
        for entry in &overlay.roster {
            log::info!("{:>3} {} - {}", entry.badge, entry.name, entry.status);
        }
        for cursor in &overlay.cursors {
            log::info!("{} at ({:.1}, {:.1})", cursor.label, cursor.position.x, cursor.position.y);
        }
    }

    let mut renderer = SoftwareRenderer::new();
    if app.render_board(&mut renderer)? {
        let frame = renderer.take_frame()?;
        log::info!(
            "Rendered {}x{} frame with {} cursors",
            frame.width(),
            frame.height(),
            frame.cursors_drawn()
        );
    }

    if let Some(topic) = cli.topic.as_deref() {
        match app.topic_content(topic, cli.content_type).await {
            Some(content) => {
                log::info!("{}", content.title);
                log::info!("{}", content.content);
                for item in &content.items {
                    log::info!("Q: {} / A: {}", item.question, item.answer);
                }
            }
            None => log::info!("No {} generated for {:?}", cli.content_type, topic),
        }
    }

    Ok(())
}
