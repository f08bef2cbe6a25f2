//! Strider - Headless Demo
//!
//! Runs a scripted actor through the test arena and logs what it touches.
//!
//! ```text
//! strider [config.json]
//! ```
//!
//! The optional argument is a JSON-encoded `SimulationConfig`. Set
//! `RUST_LOG=debug` to see jumps and platform turnarounds.

use std::fs;

use anyhow::Context;
use strider_game::{ActorInput, Level, Simulation, SimulationConfig};

/// One leg of the scripted run.
struct Segment {
    label: &'static str,
    ticks: u32,
    input: ActorInput,
}

fn script() -> Vec<Segment> {
    vec![
        Segment {
            label: "settle",
            ticks: 10,
            input: ActorInput::idle(),
        },
        Segment {
            label: "walk right into the block",
            ticks: 100,
            input: ActorInput::moving(1.0),
        },
        Segment {
            label: "jump over the block",
            ticks: 60,
            input: ActorInput::moving(1.0).with_jump(true),
        },
        Segment {
            label: "walk left under the ceiling",
            ticks: 150,
            input: ActorInput::moving(-1.0),
        },
        Segment {
            label: "climb the slope",
            ticks: 150,
            input: ActorInput::moving(-1.0),
        },
        Segment {
            label: "walk back down",
            ticks: 150,
            input: ActorInput::moving(1.0),
        },
    ]
}

fn load_config() -> anyhow::Result<SimulationConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(SimulationConfig::default());
    };
    let text = fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {}", path))?;
    log::info!("loaded simulation config from {}", path);
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let mut simulation = Simulation::new(config, Level::test_arena())?;
    let actor = simulation.spawn_actor("Runner")?;

    let mut jumps = 0;
    for segment in script() {
        log::info!("{}: {} ticks", segment.label, segment.ticks);
        for _ in 0..segment.ticks {
            let grounded = simulation.contacts(actor)?.below;
            simulation.step_with(actor, segment.input)?;
            // Release between ticks so a held jump becomes repeated taps
            simulation.sample_input(actor, ActorInput { jump: false, ..segment.input })?;
            if grounded && simulation.velocity(actor)?.y > 0.0 {
                jumps += 1;
            }

            if simulation.frame % 25 == 0 {
                let position = simulation.actor_position(actor)?;
                let contacts = simulation.contacts(actor)?;
                log::info!(
                    "frame {:>4} pos=({:>7.3}, {:>6.3}) below={} left={} right={} above={} slope={:.1}",
                    simulation.frame,
                    position.x,
                    position.y,
                    contacts.below,
                    contacts.left,
                    contacts.right,
                    contacts.above,
                    contacts.slope_angle,
                );
            }
        }
    }

    let position = simulation.actor_position(actor)?;
    let platforms = simulation.platform_positions()?;
    println!("frames simulated: {}", simulation.frame);
    println!("final position:   ({:.3}, {:.3})", position.x, position.y);
    println!("final contacts:   {:?}", simulation.contacts(actor)?);
    println!("platforms:        {:?}", platforms);
    println!("jumps:            {}", jumps);
    Ok(())
}
