//! The wall-clock driver must stop promptly whenever shutdown is requested.

use std::time::Duration;

use geosandbox::runner::{self, TickControls};
use geosandbox::simulation::{SimulationConfig, SimulationWorld, WorldSeed};
use tokio::sync::watch;

fn sample_world() -> SimulationWorld {
    SimulationWorld::new(SimulationConfig::default(), &WorldSeed::sample())
}

struct Senders {
    _tick_duration: watch::Sender<Duration>,
    pause: watch::Sender<bool>,
    shutdown: watch::Sender<bool>,
}

fn controls(tick: Duration) -> (Senders, TickControls) {
    let (tick_tx, tick_rx) = watch::channel(tick);
    let (pause_tx, pause_rx) = watch::channel(false);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    (
        Senders {
            _tick_duration: tick_tx,
            pause: pause_tx,
            shutdown: shutdown_tx,
        },
        TickControls {
            tick_duration: tick_rx,
            paused: pause_rx,
            shutdown: shutdown_rx,
        },
    )
}

#[tokio::test]
async fn test_shutdown_sent_before_the_loop_starts_is_honoured() {
    let (senders, controls) = controls(Duration::from_millis(1));
    senders.shutdown.send(true).unwrap();

    let task = tokio::spawn(runner::run(sample_world(), controls));
    let simulation = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("runner ignored a shutdown sent before it started")
        .unwrap();
    assert_eq!(simulation.tick_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_during_fast_ticking_stops_the_runner() {
    let (senders, controls) = controls(Duration::from_millis(1));
    let task = tokio::spawn(runner::run(sample_world(), controls));

    tokio::time::sleep(Duration::from_millis(50)).await;
    senders.shutdown.send(true).unwrap();

    let simulation = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("runner kept ticking after shutdown")
        .unwrap();
    assert!(simulation.tick_count() > 0);
}

#[tokio::test]
async fn test_paused_runner_does_not_tick() {
    let (senders, controls) = controls(Duration::from_millis(1));
    senders.pause.send(true).unwrap();
    let task = tokio::spawn(runner::run(sample_world(), controls));

    tokio::time::sleep(Duration::from_millis(20)).await;
    senders.shutdown.send(true).unwrap();

    let simulation = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(simulation.tick_count(), 0);
}
