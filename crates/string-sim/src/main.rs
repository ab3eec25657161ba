mod script;
mod smoother;

use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use instant::Instant;
use log::info;
use string_core::{collect_observations, EngineConfig, StringEngine, Transition};

use script::GestureScript;
use smoother::SmoothedSink;

/// Drive the string engine with a scripted pinch-pull-yank-release gesture.
#[derive(Parser, Debug)]
#[command(name = "string-sim", version)]
struct Args {
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 240)]
    frames: u32,
    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Seed for tracker jitter.
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Pace frames in real time and feed measured frame times.
    #[arg(long)]
    realtime: bool,
    #[arg(long, default_value_t = 640.0)]
    width: f32,
    #[arg(long, default_value_t = 480.0)]
    height: f32,
    /// Log the smoothed parameters every N frames.
    #[arg(long, default_value_t = 15)]
    report_every: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("fps must be positive, got {}", args.fps);
    }

    let config = EngineConfig::for_viewport(args.width, args.height);
    config
        .gesture
        .validate()
        .context("default gesture config rejected")?;
    let mut script = GestureScript::new(config.anchors, config.viewport, args.seed);
    let mut engine = StringEngine::new(config);

    let step = 1.0 / args.fps;
    let mut sink = SmoothedSink::new(step);
    let mut last = Instant::now();
    let mut t = 0.0_f32;

    info!(
        "simulating {} frames at {} fps ({})",
        args.frames,
        args.fps,
        if args.realtime { "real time" } else { "fixed step" }
    );

    for frame in 0..args.frames {
        let dt = if args.realtime {
            thread::sleep(Duration::from_secs_f32(step));
            let now = Instant::now();
            let dt = (now - last).as_secs_f32();
            last = now;
            dt
        } else {
            step
        };
        t += dt;

        let raw = script.hands_at(t);
        let hands = collect_observations(raw.iter());
        sink.set_dt(dt);
        let out = engine.tick_into(&hands, dt, &mut sink);

        for (side, tr) in ["left", "right"].iter().zip(out.transitions) {
            match tr {
                Transition::Grabbed(id) => info!("frame {frame}: {side} grabbed by hand {id}"),
                Transition::Released(id, why) => {
                    info!("frame {frame}: {side} released by hand {id} ({why:?})")
                }
                _ => {}
            }
        }

        if args.report_every > 0 && frame % args.report_every == 0 {
            let p = &sink.current;
            info!(
                "frame {frame:4} tension {:.2} angle {:+.2} | {:7.1} Hz {:6.1} dB cutoff {:6.0} Hz dist {:.2} rev {:.2} mod {:4.1} Hz",
                out.control.tension,
                out.control.angle,
                p.frequency,
                p.volume_db,
                p.filter_cutoff_hz,
                p.distortion_amount,
                p.reverb_wet,
                p.modulation_depth_hz,
            );
        }
    }

    let rest = engine.snapshot();
    info!(
        "done: {} plucks, endpoints at ({:.1}, {:.1}) / ({:.1}, {:.1})",
        sink.plucks, rest.left_end.x, rest.left_end.y, rest.right_end.x, rest.right_end.y
    );
    Ok(())
}
