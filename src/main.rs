use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use geosandbox::{api, runner};
use geosandbox::simulation::{ObserverSnapshot, SimulationConfig, SimulationWorld, WorldSeed};

const DEFAULT_SEED_PATH: &str = "data/world.json";

#[derive(Clone, Copy)]
struct SpeedPreset {
    key: char,
    label: &'static str,
    /// `None` pauses the clock.
    tick_ms: Option<u64>,
}

impl SpeedPreset {
    fn duration(&self) -> Option<Duration> {
        self.tick_ms.map(Duration::from_millis)
    }
}

const SPEED_PRESETS: [SpeedPreset; 4] = [
    SpeedPreset {
        key: '0',
        label: "Paused",
        tick_ms: None,
    },
    SpeedPreset {
        key: '1',
        label: "Normal",
        tick_ms: Some(200),
    },
    SpeedPreset {
        key: '2',
        label: "Fast",
        tick_ms: Some(100),
    },
    SpeedPreset {
        key: '3',
        label: "Fastest",
        tick_ms: Some(1),
    },
];

/// Geopolitical sandbox: ticks the world one simulated day at a time.
#[derive(Parser, Debug)]
#[command(name = "geosandbox")]
struct Args {
    /// World data file (countries and alliances as JSON)
    #[arg(default_value = DEFAULT_SEED_PATH)]
    seed_path: String,

    /// Serve the observer snapshot over HTTP on this address
    #[arg(long)]
    api: Option<SocketAddr>,

    /// RNG seed (defaults to the built-in one)
    #[arg(long)]
    seed: Option<u64>,
}

fn load_seed(path: &str) -> WorldSeed {
    match WorldSeed::load(path) {
        Ok(seed) => seed,
        Err(error) => {
            warn!(%path, %error, "could not load world data; using the sample country");
            WorldSeed::sample()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = SimulationConfig::default();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let initial_tick_duration = config.tick_duration;
    let world_seed = load_seed(&args.seed_path);

    let (tick_duration_tx, tick_duration_rx) = watch::channel(initial_tick_duration);
    let (pause_tx, pause_rx) = watch::channel(false);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let observer = Arc::new(RwLock::new(ObserverSnapshot::default()));
    let simulation = SimulationWorld::with_observer(config, &world_seed, observer.clone());
    let simulation_task = tokio::spawn(runner::run(
        simulation,
        runner::TickControls {
            tick_duration: tick_duration_rx,
            paused: pause_rx,
            shutdown: shutdown_rx.clone(),
        },
    ));

    let api_task = args.api.map(|addr| {
        let observer = observer.clone();
        let shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            if let Err(error) = api::serve(addr, observer, shutdown).await {
                warn!(%error, "observer API stopped");
            }
        })
    });

    info!("commands: 0 pause, 1-3 speed, p toggle pause, q quit, anything else prints status");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // Stdin closed; keep running until Ctrl-C.
                    tokio::signal::ctrl_c().await?;
                    break;
                };
                let command = line.trim();
                if command == "q" {
                    break;
                }
                if command == "p" {
                    let new_state = !*pause_tx.borrow();
                    pause_tx.send(new_state).ok();
                    info!(paused = new_state, "pause toggled");
                    continue;
                }
                match command.chars().next().and_then(|key| SPEED_PRESETS.iter().find(|p| p.key == key)) {
                    Some(preset) => apply_preset(preset, &tick_duration_tx, &pause_tx),
                    None => print_status(&observer),
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    shutdown_tx.send(true).ok();
    let simulation = simulation_task.await?;
    let ticks = simulation.tick_count();
    if let Some(task) = api_task {
        if tokio::time::timeout(Duration::from_secs(2), task).await.is_err() {
            warn!("observer API did not stop in time");
        }
    }
    info!(ticks, "simulation stopped");

    Ok(())
}

fn apply_preset(
    preset: &SpeedPreset,
    tick_duration_tx: &watch::Sender<Duration>,
    pause_tx: &watch::Sender<bool>,
) {
    match preset.duration() {
        Some(duration) => {
            tick_duration_tx.send(duration).ok();
            pause_tx.send(false).ok();
        }
        None => {
            pause_tx.send(true).ok();
        }
    }
    info!(speed = preset.label, "speed changed");
}

fn print_status(observer: &Arc<RwLock<ObserverSnapshot>>) {
    let snapshot = observer.read().expect("Observer lock is poisoned").clone();
    info!(
        tick = snapshot.tick,
        date = %snapshot.date,
        wars = snapshot.wars.len(),
        "{}",
        snapshot.ticker
    );
}
