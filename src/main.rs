//! Replay Scope CLI - Play back recorded sessions headless.

use std::path::PathBuf;
use std::time::Instant;

use glam::{Quat, Vec3};

use replay_scope::{
    PlaybackController, ReplayDocument,
    schema::{Command, CommandKind, Frame, ObjectDescriptor, ObjectState, Shape},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <replay.json> [ticks]", args[0]);
        eprintln!();
        eprintln!("Play back a recorded physics session without a renderer.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  replay.json  Path to the recorded session file");
        eprintln!("  ticks        Number of playback ticks (default: one full loop)");
        eprintln!();
        eprintln!("An example recording is generated with --example.");

        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_recording();
        return;
    }

    let replay_path = PathBuf::from(&args[1]);

    let document = ReplayDocument::from_path(&replay_path).unwrap_or_else(|e| {
        eprintln!("Error loading recording: {}", e);
        std::process::exit(1);
    });

    let ticks: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| document.frame_count());

    println!("Replay Scope");
    println!("============");
    println!("Objects: {}", document.object_count());
    println!("Frames: {}", document.frame_count());
    println!("Duration: {:.2}s", document.duration());
    println!("Ticks: {}", ticks);
    println!();

    let mut controller = PlaybackController::new();
    controller.load(document);
    controller.toggle_play();

    println!("Playing...");
    let start = Instant::now();

    for i in 0..ticks {
        let updates = controller.tick();

        // Print progress every 10%
        if (i + 1) % (ticks / 10).max(1) == 0 {
            let annotations = controller
                .annotations()
                .iter()
                .filter(|slot| slot.visible)
                .count();
            println!(
                "  Tick {}/{}: {} | {} updates, {} annotations",
                i + 1,
                ticks,
                controller.frame_label(),
                updates.len(),
                annotations
            );
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("Final: {}", controller.frame_label());
    println!(
        "Time: {:.2}s ({:.1} ticks/s)",
        elapsed.as_secs_f32(),
        ticks as f32 / elapsed.as_secs_f32().max(f32::EPSILON)
    );
}

/// Generate a small bouncing-ball recording and print it as JSON.
fn print_example_recording() {
    let objects = vec![
        ObjectDescriptor {
            id: 0,
            name: "ball".to_string(),
            shape: Shape::Sphere { radius: 0.25 },
            color: [0.9, 0.2, 0.2],
        },
        ObjectDescriptor {
            id: 1,
            name: "floor".to_string(),
            shape: Shape::Box {
                half_dimensions: Vec3::new(10.0, 0.1, 10.0),
            },
            color: [0.5, 0.5, 0.5],
        },
    ];

    let dt = 1.0 / 60.0;
    let frames = (0..120)
        .map(|i| {
            let t = i as f32 * dt;
            // Ball on a repeating parabolic arc above the floor.
            let phase = (t % 1.0) * 2.0 - 1.0;
            let height = 0.25 + 4.0 * (1.0 - phase * phase);

            let mut commands = Vec::new();
            if height < 0.5 {
                // Annotate the contact normal near the bounce.
                commands.push(Command {
                    kind: CommandKind::Vector,
                    direction: Vec3::new(0.0, 2.0, 0.0),
                    origin: Vec3::new(0.0, 0.25, 0.0),
                });
            }

            Frame {
                timestamp: t,
                states: vec![ObjectState {
                    id: 0,
                    position: Vec3::new(0.0, height, 0.0),
                    rotation: Quat::IDENTITY,
                    visible: true,
                    metadata: serde_json::Value::Null,
                }],
                commands,
            }
        })
        .collect();

    let document = ReplayDocument { objects, frames };

    println!("{}", serde_json::to_string_pretty(&document).unwrap());
}
