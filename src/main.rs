mod app;
mod clipboard;
mod config;
mod constants;
mod input;
mod logging;
mod player;
mod reflow;
mod selection;
mod source;
mod theme;
mod timestamp;
mod ui;
mod viewport;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use ratatui::{
  DefaultTerminal,
  crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
  },
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use app::App;
use clipboard::SystemClipboard;
use config::{Config, Session};
use constants::constants;
use player::{PlayerClient, PlayerTransport, SocketTransport};

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,

  /// Subtitle file to display (.vtt, or a video file with an embedded subtitle track)
  file: Option<PathBuf>,

  /// mpv IPC socket (default: from prefs.toml, else /tmp/mpvsocket)
  #[arg(short, long)]
  socket: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Display a transcript synced to mpv
  Display {
    file: PathBuf,
    #[arg(short, long)]
    socket: Option<PathBuf>,
  },
  /// Follow the viewer's log file
  Log,
  /// Print shell completions
  Completions { shell: clap_complete::Shell },
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Display { file, socket }) => display(&file, socket.as_deref()).await,
    Some(Commands::Log) => {
      let log_path = config::default_log_path();
      eprintln!("Following {}", log_path.display());
      logging::follow(&log_path, &mut std::io::stdout()).await
    }
    Some(Commands::Completions { shell }) => {
      clap_complete::generate(shell, &mut Cli::command(), &constants().app_name, &mut std::io::stdout());
      Ok(())
    }
    None => match cli.file {
      Some(file) => display(&file, cli.socket.as_deref()).await,
      None => {
        Cli::command().print_help().context("Failed to print help")?;
        Ok(())
      }
    },
  }
}

fn restore_terminal() {
  let _ = execute!(std::io::stdout(), DisableMouseCapture);
  ratatui::restore();
}

async fn display(file: &Path, socket: Option<&Path>) -> Result<()> {
  let config = Config::load();
  let session = Session::resolve(socket, &config);
  let _log_guard = logging::init(&session.log_path)?;
  info!(file = %file.display(), socket = %session.socket_path.display(), "starting viewer");

  // Load before touching the terminal so errors print normally.
  let raw_lines = source::load_transcription(file).await.with_context(|| format!("Failed to load {}", file.display()))?;
  let source_name =
    file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| file.display().to_string());

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    restore_terminal();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = async {
    execute!(std::io::stdout(), EnableMouseCapture).context("Failed to enable mouse capture")?;
    let size = terminal.size().context("Failed to read terminal size")?;
    let mut app = App::new(
      raw_lines,
      source_name,
      PlayerClient::new(SocketTransport::new(&session.socket_path)),
      Box::new(SystemClipboard::new()),
      theme::theme_index(session.theme_name.as_deref()),
      (size.width, size.height),
    );
    run(&mut terminal, &mut app).await
  }
  .await;
  restore_terminal();
  info!("viewer closed");
  result
}

async fn run<T: PlayerTransport>(terminal: &mut DefaultTerminal, app: &mut App<T>) -> Result<()> {
  let poll_interval = Duration::from_millis(constants().poll_interval_ms);

  loop {
    terminal.draw(|frame| ui::ui(frame, app)).context("Failed to draw frame")?;

    if event::poll(poll_interval)? {
      let event = event::read()?;
      input::handle_event(app, event).await;
    }

    if app.should_quit {
      break;
    }
  }
  Ok(())
}
