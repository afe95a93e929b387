//! Flappy Barbie headless runner
//!
//! Plays sessions with a simple autopilot at a fixed 60 Hz step, writing the
//! results to a profile on disk. Useful for balance checks and soak tests.

use std::path::PathBuf;

use clap::Parser;

use flappy_barbie::audio::AudioManager;
use flappy_barbie::consts::SIM_DT;
use flappy_barbie::persistence::ProfileStore;
use flappy_barbie::sim::{Avatar, Command, GamePhase, ObstacleField, SessionEvent};
use flappy_barbie::{Session, Tuning};

#[derive(Parser, Debug)]
#[command(version, about = "Run Flappy Barbie sessions headless")]
struct Args {
    /// Seed for obstacle and pickup placement
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Number of sessions to play
    #[arg(long, default_value_t = 3)]
    sessions: u32,
    /// Frame limit per session (60 frames = 1 s)
    #[arg(long, default_value_t = 60 * 300)]
    frames: u32,
    /// Profile directory
    #[arg(long, default_value = "save")]
    profile: PathBuf,
    /// Balance overrides (JSON)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Sound effect volume (0.0 - 1.0)
    #[arg(long, default_value_t = 0.8)]
    volume: f32,
    /// Render no sound clips
    #[arg(long)]
    mute: bool,
}

/// Flap when the avatar sinks below the next gap centre
fn autopilot(avatar: &Avatar, field: &ObstacleField, start_y: f32) -> bool {
    let target = field
        .obstacles
        .iter()
        .find(|o| o.trailing_edge() >= avatar.bounds.min.x)
        .map(|o| o.gap_center + o.gap_height * 0.15)
        .unwrap_or(start_y);
    avatar.vel_y > 0.0 && avatar.pos.y > target
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Flappy Barbie (headless) starting...");

    let tuning = args
        .tuning
        .as_deref()
        .map(Tuning::load)
        .unwrap_or_default();
    let store = ProfileStore::open(args.profile.join(ProfileStore::FILE_NAME));
    let mut audio = AudioManager::default();
    audio.set_volume(args.volume);
    audio.set_muted(args.mute);
    let mut session = Session::new(tuning, args.seed, audio, store);
    let start_y = session.tuning().avatar.start_y;

    let mut clips = 0usize;
    for _ in 0..args.sessions {
        let command = if session.phase() == GamePhase::GameOver {
            Command::Restart
        } else {
            Command::Start
        };
        session.step(SIM_DT, &[command]);

        for _ in 0..args.frames {
            let flap = autopilot(session.avatar(), session.field(), start_y) || !session.started();
            let commands: &[Command] = if flap { &[Command::Impulse] } else { &[] };
            let event = session.step(SIM_DT, commands);
            clips += session.audio_mut().drain().len();
            if let SessionEvent::GameOver(summary) = event {
                println!(
                    "session {}: score {} (level {}), currency {}, {:.1}s",
                    session.sessions_played(),
                    summary.final_score,
                    summary.level,
                    summary.collected_currency,
                    summary.duration_secs
                );
                break;
            }
        }

        // Frame limit reached with the avatar still alive
        if session.phase() != GamePhase::GameOver {
            println!(
                "session {}: still alive at score {} after {} frames",
                session.sessions_played(),
                session.score(),
                args.frames
            );
            session.step(SIM_DT, &[Command::Quit]);
        }
    }

    let profile = session.recorder().profile();
    println!(
        "profile {}: best {}, games {}, coins {}, {} sound clips rendered",
        session.recorder().path().display(),
        profile.stats.high_score,
        profile.stats.total_games,
        profile.coins,
        clips
    );
}
