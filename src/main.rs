//! Snowfield - Entry Point
//!
//! Headless console driver for the simulation core: builds a world, spawns
//! the standard scene, and steps the tick loop from stdin commands. A
//! graphical host would replace this loop with window events and a real
//! render surface.

use snowfield::core::config::WorldConfig;
use snowfield::core::error::Result;
use snowfield::entity::{Behavior, CharState, EntityClass};
use snowfield::sim::{SimEvent, World};

use glam::Vec2;
use std::io::{self, Write};

/// Fixed timestep for console-driven ticks, 20 Hz
const DT: f32 = 0.05;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snowfield=info".into()),
        )
        .init();

    tracing::info!("Snowfield starting...");

    // Load config next to the binary if present, defaults otherwise
    let config_path = std::path::Path::new("snowfield.toml");
    let config = if config_path.exists() {
        WorldConfig::load(config_path)?
    } else {
        WorldConfig::default()
    };

    let mut world = World::new(config);
    let player = world.spawn_default_scene();
    let mut ticks: u64 = 0;

    println!("\n=== SNOWFIELD ===");
    println!("An isometric snowball fight on procedurally generated terrain");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance simulation by one tick ({DT}s)");
    println!("  run <n>         - Run n simulation ticks");
    println!("  walk <x> <y>    - Walk the player to grid position (x, y)");
    println!("  throw <x> <y>   - Throw a snowball toward (x, y)");
    println!("  status / s      - Show entity status");
    println!("  quit / q        - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            step(&mut world, &mut ticks, 1);
            continue;
        }

        if input == "status" || input == "s" {
            display_status(&world, ticks);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            if let Ok(n) = rest.parse::<u64>() {
                step(&mut world, &mut ticks, n);
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("walk ") {
            if let Some(goal) = parse_point(rest) {
                world.command_walk(player, goal);
                println!("Walking to ({}, {})", goal.x, goal.y);
            } else {
                println!("Usage: walk <x> <y>");
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("throw ") {
            if let Some(target) = parse_point(rest) {
                world.command_throw(player, target);
                println!("Throwing toward ({}, {})", target.x, target.y);
            } else {
                println!("Usage: throw <x> <y>");
            }
            continue;
        }

        println!("Unknown command. Available: tick, run <n>, walk <x> <y>, throw <x> <y>, status, quit");
    }

    println!(
        "\nGoodbye! Final state: {} entities, {} ticks elapsed.",
        world.entities.len(),
        ticks
    );
    Ok(())
}

/// Run `n` ticks, echoing noteworthy events
fn step(world: &mut World, ticks: &mut u64, n: u64) {
    for _ in 0..n {
        *ticks += 1;
        for event in world.update(DT) {
            match event {
                SimEvent::PlaySound { name } => println!("  [tick {ticks}] sound: {name}"),
                SimEvent::Damage { target, amount } => {
                    println!("  [tick {ticks}] entity #{} takes {amount}", target.0)
                }
                SimEvent::Removed { id, class } => {
                    println!("  [tick {ticks}] {class:?} #{} removed", id.0)
                }
                _ => {}
            }
        }
    }
    println!("Tick {ticks} complete.");
}

fn display_status(world: &World, ticks: u64) {
    println!(
        "Tick {ticks}: {} entities, {} chunks",
        world.entities.len(),
        world.terrain.chunk_count()
    );
    for e in &world.entities {
        let detail = match &e.behavior {
            Behavior::Character(ch) => {
                let role = if ch.ai { "ai" } else { "player" };
                if ch.state == CharState::Dead {
                    format!("{role}, dead")
                } else {
                    format!("{role}, {:?}, {} hp", ch.state, ch.hp)
                }
            }
            Behavior::Snowball(ball) => format!("{:?}", ball.phase),
            Behavior::Label(label) => format!("\"{}\"", label.text),
            _ => String::new(),
        };
        if e.class == EntityClass::Camera || e.class == EntityClass::Cursor {
            continue;
        }
        println!(
            "  #{:<3} {:?} at ({:.1}, {:.1}) {}",
            e.id.0, e.class, e.pos.x, e.pos.y, detail
        );
    }
}

fn parse_point(text: &str) -> Option<Vec2> {
    let mut parts = text.split_whitespace();
    let x: f32 = parts.next()?.parse().ok()?;
    let y: f32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Vec2::new(x, y))
}
