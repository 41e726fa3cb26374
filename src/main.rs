//! Kayak Runner entry point
//!
//! Headless native demo: drives one kayak through a scripted run with the
//! same fixed-step loop a host engine would use.
//!
//! Usage: `kayak-runner [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;

    use kayak_runner::audio::AudioService;
    use kayak_runner::consts::*;
    use kayak_runner::platform::{LogAnimationSink, LogAudioSink, LogHealthSink};
    use kayak_runner::sim::{
        ContactEvent, KayakBuilder, KayakPhase, ObstacleClass, ObstacleId, RawInput, RigidBody,
        SimBody, WaveWater, apply_paddle_force, handle_contact, sample_input, tick,
    };
    use kayak_runner::{ConfigError, ControlSettings, KayakTuning};

    /// Render rate of the pretend host
    const FRAME_DT: f32 = 1.0 / 60.0;
    const RUN_SECONDS: f32 = 30.0;
    /// Seconds between scripted paddle strokes
    const STROKE_INTERVAL: f32 = 0.8;

    const PADDLE_CLIPS: [&str; 3] = ["paddle_splash_1", "paddle_splash_2", "paddle_splash_3"];

    /// Scripted collisions: (time, obstacle, class)
    const OBSTACLES: [(f32, u64, ObstacleClass); 6] = [
        (4.0, 1, ObstacleClass::Small),
        (5.5, 1, ObstacleClass::Small),
        (9.0, 2, ObstacleClass::Medium),
        (14.0, 3, ObstacleClass::Large),
        (18.0, 4, ObstacleClass::Large),
        (21.0, 5, ObstacleClass::Medium),
    ];

    pub fn run() -> Result<(), ConfigError> {
        let tuning = match std::env::args().nth(1) {
            Some(path) => KayakTuning::load(path)?,
            None => KayakTuning {
                buoyancy_points: vec![
                    Vec3::new(0.3, -0.1, 1.2),
                    Vec3::new(-0.3, -0.1, 1.2),
                    Vec3::new(0.3, -0.1, -1.2),
                    Vec3::new(-0.3, -0.1, -1.2),
                ],
                ..Default::default()
            },
        };
        let settings = ControlSettings {
            autopilot: true,
            ..Default::default()
        };

        let water = Rc::new(RefCell::new(WaveWater::default()));
        let clips = PADDLE_CLIPS.iter().map(|c| c.to_string()).collect();
        let audio = AudioService::from_settings(Box::new(LogAudioSink::default()), clips, &settings);
        let body = SimBody::new(4.0, 4.0)
            .with_gravity(Vec3::new(0.0, -GRAVITY, 0.0))
            .at(Vec3::new(0.0, -0.2, 0.0));

        let mut kayak = KayakBuilder::new(tuning)
            .settings(settings)
            .body(body)
            .water(water.clone())
            .animation(LogAnimationSink::new())
            .health_sink(LogHealthSink)
            .audio(audio)
            .build()?;

        let mut accumulator = 0.0;
        let mut frame_time = 0.0;
        let mut next_stroke = STROKE_INTERVAL;
        let mut stroke_side = 1.0;
        let mut next_report = 1.0;
        let mut obstacles = OBSTACLES.iter().peekable();

        while frame_time < RUN_SECONDS {
            frame_time += FRAME_DT;
            sample_input(&mut kayak, &RawInput::default());

            accumulator += FRAME_DT;
            let mut substeps = 0;
            while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                water.borrow_mut().advance(SIM_DT);
                tick(&mut kayak, SIM_DT);
                kayak.body_mut().integrate(SIM_DT);
                accumulator -= SIM_DT;
                substeps += 1;
            }

            let now = kayak.time();

            // Alternate blade contacts left and right of the centerline
            if now >= next_stroke {
                next_stroke += STROKE_INTERVAL;
                let offset = kayak.body().right() * 0.6 * stroke_side;
                let contact = kayak.body().position() + offset;
                let blade = kayak.body().forward() * 4.0;

                kayak.set_paddle_in_water(true);
                apply_paddle_force(&mut kayak, contact, blade);
                kayak.play_paddle_sound(0.3 * stroke_side);
                kayak.set_paddle_in_water(false);
                stroke_side = -stroke_side;
            }

            while let Some(&&(at, id, class)) = obstacles.peek() {
                if at > now {
                    break;
                }
                obstacles.next();
                let event = ContactEvent::new(ObstacleId(id), class.tag(), now)
                    .at(kayak.body().position());
                handle_contact(&mut kayak, &event);
            }

            if now >= next_report {
                next_report += 1.0;
                let body = kayak.body();
                log::info!(
                    "t={:>5.1}s pos=({:+.2}, {:+.2}, {:+.2}) speed={:.2} roll={:+.1} health={}",
                    now,
                    body.position.x,
                    body.position.y,
                    body.position.z,
                    body.linear_velocity.length(),
                    kayak.lean().roll_degrees(),
                    kayak.health()
                );
            }

            if kayak.phase() == KayakPhase::Sunk {
                log::info!("Run ended after {:.1}s", now);
                break;
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Kayak Runner (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a host engine on the web; nothing to run here
}
