//! Sky Angel entry point
//!
//! Headless driver: flies one autopilot session at the configured frame
//! rate, then records the result on the local leaderboard.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use directories::ProjectDirs;

use sky_angel::autopilot::Autopilot;
use sky_angel::highscores::{self, HighScores};
use sky_angel::session::LogObserver;
use sky_angel::sim::{Assets, Signal};
use sky_angel::{DifficultyPreset, Session, Settings};

/// Ten minutes of frames at 60 Hz. Parachutes can keep the tank topped up
/// forever, so this is only a safety stop.
const MAX_FRAMES: u64 = 60 * 60 * 10;

#[derive(Parser, Debug)]
#[command(name = "sky-angel", version)]
#[command(about = "Fly one headless autopilot run and record it on the leaderboard")]
struct Cli {
    /// RNG seed for the run (defaults to the current time)
    seed: Option<u64>,

    /// Difficulty preset: easy, normal or hard (defaults to the saved setting)
    #[arg(value_parser = parse_difficulty)]
    difficulty: Option<DifficultyPreset>,

    /// Directory holding settings.json and highscores.json
    #[arg(long, env = "SKY_ANGEL_DATA")]
    data_dir: Option<PathBuf>,
}

fn parse_difficulty(s: &str) -> Result<DifficultyPreset, String> {
    DifficultyPreset::from_str(s).ok_or_else(|| format!("expected easy, normal or hard, got '{s}'"))
}

/// Explicit directory first, then the per-user data directory
fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| {
            ProjectDirs::from("", "", "sky-angel").map(|dirs| dirs.data_dir().to_path_buf())
        })
        .unwrap_or_else(|| {
            log::warn!("No home directory found, using ./.sky-angel");
            PathBuf::from(".sky-angel")
        })
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    log::info!("Sky Angel starting...");

    let dir = resolve_data_dir(cli.data_dir);
    let settings_path = dir.join("settings.json");
    let scores_path = dir.join("highscores.json");

    let mut settings = Settings::load(&settings_path);
    if let Some(preset) = cli.difficulty {
        settings.difficulty = preset;
    }
    let seed = cli.seed.unwrap_or_else(now_ms);

    let mut session = match Session::start(&settings, &Assets::placeholder(), seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start session: {e}");
            std::process::exit(1);
        }
    };
    session.add_observer(Box::new(LogObserver));

    let pilot = Autopilot::new();
    let dt = settings.frame_dt();
    let mut frames = 0;
    let summary = loop {
        if let Some(direction) = pilot.decide(session.world()) {
            session.steer(direction);
        }
        if let Signal::GameOver(summary) = session.frame(dt) {
            break Some(summary);
        }
        frames += 1;
        if frames >= MAX_FRAMES {
            break None;
        }
    };

    let Some(summary) = summary else {
        let world = session.world();
        log::warn!(
            "Stopped after {frames} frames: {}s survived, {} stars, fuel {}; not ranked",
            world.elapsed_time,
            world.score,
            world.fuel
        );
        println!(
            "Time: {}  Stars: {}  (unfinished)",
            highscores::format_time(world.elapsed_time),
            world.score
        );
        return;
    };

    println!(
        "Time: {}  Stars: {}",
        highscores::format_time(summary.elapsed_time),
        summary.score
    );

    let mut scores = HighScores::load(&scores_path);
    match scores.submit(&settings.pilot_name, &summary, now_ms()) {
        Ok(rank) => {
            println!("Ranked #{rank}");
            if let Err(e) = scores.save(&scores_path) {
                log::warn!("Failed to save high scores: {e}");
            }
        }
        Err(reason) => log::info!("Not ranked: {:?}", reason),
    }

    for (i, entry) in scores.entries.iter().enumerate() {
        println!(
            "{:>2}. {:<24} {:>3} stars  {}",
            i + 1,
            entry.name,
            entry.stars,
            highscores::format_time(entry.time)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_exits_without_a_run() {
        let err = Cli::try_parse_from(["sky-angel", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_seed_and_difficulty() {
        let cli = Cli::try_parse_from(["sky-angel", "7", "HARD"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.difficulty, Some(DifficultyPreset::Hard));
    }

    #[test]
    fn test_bad_arguments_rejected() {
        assert!(Cli::try_parse_from(["sky-angel", "not-a-seed"]).is_err());
        assert!(Cli::try_parse_from(["sky-angel", "7", "insane"]).is_err());
        let err = Cli::try_parse_from(["sky-angel", "--turbo"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_data_dir_flag() {
        let cli = Cli::try_parse_from(["sky-angel", "--data-dir", "/tmp/angel"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/angel")));
        assert_eq!(resolve_data_dir(cli.data_dir), PathBuf::from("/tmp/angel"));
    }
}
