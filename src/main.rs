//! # Crossing Control
//!
//! Level-crossing barrier controller. Polls the three track presence
//! detectors, runs the train-position state machine, and commands the
//! barrier through the serial interface board, once per control cycle
//! until stopped.
//!
//! Two modes:
//! - **Hardware** (default): opens the interface board on `--device`
//!   (`ls /dev/ttyACM*` with the board unplugged and plugged to find it).
//! - **Replay** (`--replay <file>`): drives the loop from a JSON sensor
//!   scenario instead of hardware and reports the commanded barrier states.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use crossing_control::cycle::CycleRunner;
use crossing_control::gateway::sim::{RecordingBarrier, Scenario, ScriptedSensors};
use crossing_control::gateway::{BarrierGateway, SensorGateway, serial};

/// Crossing Control — level-crossing barrier automation
#[derive(Parser, Debug)]
#[command(name = "crossing_control")]
#[command(version)]
#[command(about = "Sensor-driven level-crossing barrier controller")]
struct Args {
    /// Serial device of the barrier interface board.
    #[arg(long, default_value = "/dev/ttyACM0", value_name = "DEV")]
    device: PathBuf,

    /// Control cycle period in milliseconds (0 = free-running).
    #[arg(long, default_value_t = 50)]
    period_ms: u64,

    /// Replay a JSON sensor scenario instead of opening hardware.
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("Crossing Control v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("Crossing Control shutdown complete");
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = stop.clone();
    ctrlc::set_handler(move || {
        info!("received shutdown signal");
        flag.store(true, Ordering::SeqCst);
    })?;

    let period = (args.period_ms > 0).then(|| Duration::from_millis(args.period_ms));

    if let Some(ref replay) = args.replay {
        let scenario = Scenario::load(replay)?;
        info!(
            "replaying {} scripted cycles from {}",
            scenario.len(),
            replay.display()
        );
        // A few settle cycles past the script let the state machine return
        // to Init before the run ends.
        let cycles = scenario.len() as u64 + 4;
        let sensors = ScriptedSensors::new(scenario);
        drive(sensors, RecordingBarrier::new(), period, Some(cycles), &stop);
    } else {
        let (sensors, barrier) = serial::open(&args.device)?;
        info!("interface board connected at {}", args.device.display());
        drive(sensors, barrier, period, None, &stop);
    }

    Ok(())
}

/// Run the control loop to completion with the given gateways.
fn drive<S: SensorGateway, B: BarrierGateway>(
    sensors: S,
    barrier: B,
    period: Option<Duration>,
    cycles: Option<u64>,
    stop: &AtomicBool,
) {
    let mut runner = CycleRunner::new(sensors, barrier);
    if let Some(period) = period {
        runner = runner.with_period(period);
    }

    match cycles {
        Some(n) => runner.run_for(n, stop),
        None => runner.run(stop),
    }

    let stats = runner.stats();
    info!(
        "loop finished: {} cycles, {} transitions, {} sensor faults, {} actuator faults",
        stats.cycle_count, stats.transitions, stats.sensor_faults, stats.actuator_faults
    );
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
