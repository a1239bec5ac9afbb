use anyhow::{Context, Result};
use arena_client::{
    random_color, HostedTransport, InputEvent, Reconciler, Scene, Session, SessionConfig,
    SocketTransport, Transport,
};
use arena_core::{Color, HostedCodec, PeerId, Position, SocketCodec};
use arena_server::{Server, ServerConfig};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::Input;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Multiplayer arena sync: relay server and terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the hub (`/ws`) and socket relay (`/socket`).
    Serve {
        #[arg(long, env = "ARENA_ADDR", default_value = "0.0.0.0:3000")]
        addr: SocketAddr,

        #[arg(long, default_value_t = 100)]
        channel_capacity: usize,
    },

    /// Join a room and drive the local peer from stdin.
    Play {
        #[arg(long, env = "ARENA_URL", default_value = "ws://127.0.0.1:3000")]
        url: String,

        #[arg(long, value_enum, default_value_t = Variant::Hosted)]
        variant: Variant,

        /// Room code; prompted for when omitted.
        #[arg(short, long)]
        room: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Variant {
    Hosted,
    Socket,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Serve {
            addr,
            channel_capacity,
        } => {
            let server = Server::bind(ServerConfig {
                addr,
                channel_capacity,
            })
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

            println!(
                "{} {}",
                "Arena relay up on".green().bold(),
                server.local_addr()?
            );
            server.run().await?;
        }

        Commands::Play { url, variant, room } => {
            let room = match room {
                Some(room) => room,
                None => Input::new()
                    .with_prompt("Room code")
                    .allow_empty(true)
                    .interact_text()?,
            };
            play(&url, variant, &room).await?;
        }
    }

    Ok(())
}

async fn play(url: &str, variant: Variant, room: &str) -> Result<()> {
    let base = url.trim_end_matches('/');
    info!("Joining room '{}' through {}", room, base);
    let transport: Arc<dyn Transport> = match variant {
        Variant::Hosted => Arc::new(
            HostedTransport::connect(&format!("{}/ws", base), HostedCodec)
                .await
                .context("Failed to reach the hub")?,
        ),
        Variant::Socket => Arc::new(
            SocketTransport::connect(&format!("{}/socket", base), SocketCodec)
                .await
                .context("Failed to reach the relay")?,
        ),
    };

    let local_id = PeerId::generate();
    let scene = TerminalScene::new(local_id.clone());
    let reconciler = Reconciler::with_scene(local_id.clone(), SessionConfig::default(), scene);

    let session = Session::start(transport, room, reconciler, random_color())
        .await
        .context("Failed to join room")?;

    println!(
        "{} {} as {}",
        "Joined room".green().bold(),
        session.room().to_string().cyan(),
        local_id.to_string().bold()
    );
    println!(
        "{}",
        "Keys: +KEY to hold, -KEY to release (w a s d, arrows by name), `.` releases all, q quits"
            .dimmed()
    );

    let (input_tx, input_rx) = mpsc::channel(32);
    tokio::spawn(read_commands(input_tx));

    let reconciler = session.run(input_rx).await;
    println!(
        "{} ({} peers still in view)",
        "Left the arena".yellow().bold(),
        reconciler.len()
    );
    Ok(())
}

/// Maps stdin lines to key events until EOF or `q`.
async fn read_commands(tx: mpsc::Sender<InputEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut held: Vec<String> = Vec::new();

    while let Ok(Some(line)) = lines.next_line().await {
        let events = match line.trim() {
            "q" | "quit" => vec![InputEvent::Quit],
            "." => held.drain(..).map(InputEvent::KeyUp).collect(),
            cmd => {
                if let Some(key) = cmd.strip_prefix('+').filter(|k| !k.is_empty()) {
                    held.push(key.to_owned());
                    vec![InputEvent::KeyDown(key.to_owned())]
                } else if let Some(key) = cmd.strip_prefix('-').filter(|k| !k.is_empty()) {
                    held.retain(|k| k != key);
                    vec![InputEvent::KeyUp(key.to_owned())]
                } else {
                    eprintln!("{} {:?}", "Unknown command".red(), cmd);
                    continue;
                }
            }
        };

        for event in events {
            let quit = event == InputEvent::Quit;
            if tx.send(event).await.is_err() || quit {
                return;
            }
        }
    }
}

/// Prints remote peer lifecycle to the terminal in each peer's color.
struct TerminalScene {
    local_id: PeerId,
}

impl TerminalScene {
    fn new(local_id: PeerId) -> Self {
        Self { local_id }
    }

    fn label(id: &PeerId, color: Color) -> ColoredString {
        let (r, g, b) = color.channels();
        id.to_string().truecolor(r, g, b).bold()
    }
}

impl Scene for TerminalScene {
    fn spawn(&mut self, id: &PeerId, position: Position, color: Color) {
        let who = if *id == self.local_id { "you" } else { "peer" };
        println!(
            "{} {} {} at ({:.1}, {:.1})",
            "+".green(),
            who,
            Self::label(id, color),
            position.x,
            position.z
        );
    }

    fn place(&mut self, id: &PeerId, position: Position) {
        if *id == self.local_id {
            return;
        }
        println!("  {} -> ({:.1}, {:.1})", id, position.x, position.z);
    }

    fn despawn(&mut self, id: &PeerId) {
        println!("{} {}", "-".red(), id);
    }
}
