//! Block Descent entry point
//!
//! Headless native driver: runs the simulation through the fixed-step
//! accumulator with a scripted input sequence and logs what happened.

use block_descent::consts::SIM_DT;
use block_descent::sim::{GameEvent, World};
use block_descent::{Buttons, FixedStep, Tuning};

/// Simulated seconds to run
const RUN_SECONDS: f32 = 30.0;
/// Frame time fed to the accumulator (a 144 Hz display)
const FRAME_DT: f32 = 1.0 / 144.0;

/// Scripted input: start, then wander, lift and throw
fn scripted_buttons(frame: u32) -> Buttons {
    let second = frame as f32 * FRAME_DT;
    if second < 0.1 {
        return Buttons {
            primary: true,
            ..Default::default()
        };
    }
    let phase = (second * 2.0) as u32;
    Buttons {
        left: phase % 4 == 1,
        right: phase % 4 == 3,
        up: phase % 5 == 0,
        down: phase % 7 == 2,
        primary: frame % 97 < 3,
        secondary: frame % 151 < 3,
    }
}

fn main() {
    env_logger::init();
    log::info!("Block Descent (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut world = World::new(seed, tuning);
    let mut stepper = FixedStep::new();
    log::info!("Game initialized with seed: {}", seed);

    let frames = (RUN_SECONDS / FRAME_DT) as u32;
    let mut ticks = 0u64;
    let mut matches = 0usize;
    for frame in 0..frames {
        ticks += stepper.advance(&mut world, FRAME_DT, scripted_buttons(frame)) as u64;
        for event in stepper.events() {
            if let GameEvent::MatchFound { ids } = event {
                matches += ids.len();
            }
        }
    }

    let snapshot = world.snapshot();
    let json_len = snapshot.to_json().map(|json| json.len()).unwrap_or(0);
    log::info!(
        "Ran {} ticks ({:.1}s): player row {} ({}), {} blocks, {} matched, snapshot {} bytes",
        ticks,
        ticks as f32 * SIM_DT,
        world.player.pos.iy(),
        snapshot.player.state,
        world.blocks.len(),
        matches,
        json_len
    );
}
