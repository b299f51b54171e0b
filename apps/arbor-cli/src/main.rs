use anyhow::{Context, bail};
use arbor_input::{Action, Binding, InputState};
use arbor_scene::{DebugTextRenderer, FrameClock, SceneRenderer, Walkthrough, room};
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arbor-cli", about = "Headless tool for the arbor walkthrough")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Hold keys for a number of frames and report where the camera ends up
    Walk {
        /// Keys held for the whole walk, any of "wasd"
        #[arg(short, long, default_value = "w")]
        keys: String,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016", allow_hyphen_values = true)]
        dt: f32,
        /// Pointer delta applied on the first frame, as DX,DY
        #[arg(long, allow_hyphen_values = true)]
        look: Option<String>,
        /// Hold the run key
        #[arg(long)]
        run: bool,
        /// Print the final camera state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Dump the draw list and lighting for a frame at a given time
    Frame {
        /// Seconds since start
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        time: f32,
        /// Turn the flashlight on
        #[arg(long)]
        flashlight: bool,
    },
}

fn key_binding(key: char) -> anyhow::Result<Binding> {
    match key.to_ascii_lowercase() {
        'w' => Ok(Binding::MoveForward),
        's' => Ok(Binding::MoveBackward),
        'a' => Ok(Binding::StrafeLeft),
        'd' => Ok(Binding::StrafeRight),
        other => bail!("unknown movement key '{other}', expected one of w, a, s, d"),
    }
}

fn parse_look(raw: &str) -> anyhow::Result<Vec2> {
    let (x, y) = raw
        .split_once(',')
        .with_context(|| format!("look must be DX,DY, got '{raw}'"))?;
    let dx: f32 = x.trim().parse().with_context(|| format!("bad DX '{x}'"))?;
    let dy: f32 = y.trim().parse().with_context(|| format!("bad DY '{y}'"))?;
    Ok(Vec2::new(dx, dy))
}

/// Drive a walkthrough the same way the desktop app does, from scripted input.
fn scripted_walk(
    keys: &str,
    frames: u32,
    dt: f32,
    look: Option<Vec2>,
    run: bool,
) -> anyhow::Result<Walkthrough> {
    if dt.is_nan() || dt <= 0.0 {
        bail!("dt must be a positive number of seconds, got {dt}");
    }

    let mut input = InputState::new();
    for key in keys.chars() {
        input.press(key_binding(key)?);
    }
    if run {
        input.press(Binding::Run);
    }
    if let Some(look) = look {
        input.pointer_motion(look.x as f64, look.y as f64);
    }

    let mut walk = Walkthrough::new();
    let mut clock = FrameClock::new();
    for frame in 1..=frames {
        let time = clock.tick_at(frame as f32 * dt);
        let actions = input.drain_frame();
        walk.apply(time, &actions);
    }
    Ok(walk)
}

/// Text dump of the room as it looks `time` seconds after start.
fn frame_dump(time: f32, flashlight: bool) -> anyhow::Result<String> {
    if time.is_nan() || time < 0.0 {
        bail!("time must be zero or more seconds, got {time}");
    }

    let mut walk = Walkthrough::new();
    let time = FrameClock::new().tick_at(time);
    if flashlight {
        walk.apply(time, &[Action::ToggleFlashlight]);
    }
    let frame = walk.frame(time);
    Ok(DebugTextRenderer::new().render(&frame, &room()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let walk = Walkthrough::new();
            let start = walk.camera().position();
            println!("arbor-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("camera: start=({:.2}, {:.2}, {:.2})", start.x, start.y, start.z);
            println!(
                "camera: speed={} sensitivity={} boundary=±{}",
                arbor_camera::SPEED,
                arbor_camera::SENSITIVITY,
                arbor_camera::BOUNDARY
            );
            println!("scene: {} draw items", room().len());
            println!("scene: tree model at {}", arbor_scene::TREE_MODEL_PATH);
        }
        Commands::Walk {
            keys,
            frames,
            dt,
            look,
            run,
            json,
        } => {
            let look = look.as_deref().map(parse_look).transpose()?;
            tracing::debug!(%keys, frames, dt, run, "scripted walk");
            let walk = scripted_walk(&keys, frames, dt, look, run)?;
            let snapshot = walk.camera().snapshot();

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                let p = snapshot.position;
                let f = snapshot.front;
                println!("Walked {frames} frames ({:.2}s) holding '{keys}'", frames as f32 * dt);
                println!("Position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
                println!("Front: ({:.3}, {:.3}, {:.3})", f.x, f.y, f.z);
                println!("Yaw: {:.2}  Pitch: {:.2}", snapshot.yaw, snapshot.pitch);
                println!(
                    "Gait: {:?}  Speed: {}",
                    snapshot.gait, snapshot.movement_speed
                );
            }
        }
        Commands::Frame { time, flashlight } => {
            print!("{}", frame_dump(time, flashlight)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_camera::{BOBBING_SIZE, Gait, SPEED};

    #[test]
    fn keys_map_to_bindings() {
        assert_eq!(key_binding('w').unwrap(), Binding::MoveForward);
        assert_eq!(key_binding('D').unwrap(), Binding::StrafeRight);
        assert!(key_binding('q').is_err());
    }

    #[test]
    fn look_parses_signed_pair() {
        assert_eq!(parse_look("-10,2.5").unwrap(), Vec2::new(-10.0, 2.5));
        assert!(parse_look("10").is_err());
        assert!(parse_look("a,b").is_err());
    }

    #[test]
    fn forward_walk_moves_along_negative_z() {
        let walk = scripted_walk("w", 10, 0.1, None, false).unwrap();
        let p = walk.camera().position();
        // one second at the default speed, from z = 3
        assert!((p.z - (3.0 - SPEED)).abs() < 1e-3);
        // sideways sway never exceeds the bobbing size
        assert!(p.x.abs() <= BOBBING_SIZE + 1e-4);
    }

    #[test]
    fn run_flag_switches_gait() {
        let walk = scripted_walk("", 1, 0.1, None, true).unwrap();
        assert_eq!(walk.camera().gait(), Gait::Running);
    }

    #[test]
    fn unknown_key_fails_the_walk() {
        assert!(scripted_walk("wx", 1, 0.1, None, false).is_err());
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        assert!(scripted_walk("w", 10, 0.0, None, false).is_err());
        assert!(scripted_walk("w", 10, -0.1, None, false).is_err());
        assert!(scripted_walk("w", 10, f32::NAN, None, false).is_err());
    }

    #[test]
    fn negative_frame_time_is_rejected() {
        assert!(frame_dump(-5.0, false).is_err());
        assert!(frame_dump(f32::NAN, false).is_err());
    }

    #[test]
    fn frame_dump_reports_time_and_flashlight() {
        let dump = frame_dump(5.0, true).unwrap();
        assert!(dump.contains("t=5.00s"));
        assert!(dump.contains("Flashlight: on"));
        assert!(frame_dump(0.0, false).unwrap().contains("Flashlight: off"));
    }

    #[test]
    fn negative_time_parses_and_then_fails() {
        let cli = Cli::parse_from(["arbor-cli", "frame", "--time", "-5"]);
        let Commands::Frame { time, .. } = cli.command else {
            panic!("expected frame command");
        };
        assert!(frame_dump(time, false).is_err());
    }

    #[test]
    fn long_walk_stays_inside_the_room() {
        let walk = scripted_walk("a", 200, 0.1, None, true).unwrap();
        assert!(walk.camera().position().x >= -arbor_camera::BOUNDARY);
    }
}
