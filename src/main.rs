//! Ocean Runner entry point
//!
//! The browser build is driven from JavaScript through `ocean_runner::web`.
//! Natively this is a headless runner: it plays a seeded run (autopilot or
//! straight ahead) and prints a summary.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::{Parser, ValueEnum};
    use serde::Serialize;

    use ocean_runner::consts::SIM_DT;
    use ocean_runner::hud::LogHud;
    use ocean_runner::{FramePacing, Game, QualityPreset, Settings, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "ocean-runner")]
    #[command(about = "Headless deterministic runs of the Ocean Runner simulation")]
    struct Cli {
        /// Run seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Ticks to simulate (60 per second)
        #[arg(long, default_value_t = 3_600)]
        ticks: u32,
        /// Balance overrides as JSON
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Steer toward rocks instead of riding straight
        #[arg(long)]
        autopilot: bool,
        /// Explosion budget preset
        #[arg(long, value_enum, default_value_t = CliQuality::Medium)]
        quality: CliQuality,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    }

    #[derive(Copy, Clone, Debug, ValueEnum)]
    enum CliQuality {
        Low,
        Medium,
        High,
    }

    impl From<CliQuality> for QualityPreset {
        fn from(value: CliQuality) -> Self {
            match value {
                CliQuality::Low => QualityPreset::Low,
                CliQuality::Medium => QualityPreset::Medium,
                CliQuality::High => QualityPreset::High,
            }
        }
    }

    #[derive(Debug, Serialize)]
    struct RunSummary {
        seed: u64,
        ticks: u64,
        seconds: f64,
        score: u32,
        win_score: u32,
        won: bool,
        distance: f32,
        final_x: f32,
        forward_speed: f32,
        live_bursts: usize,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("invalid tuning in {}", path.display()))
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();

        let tuning = load_tuning(cli.tuning.as_ref())?;
        let settings = Settings {
            frame_pacing: FramePacing::PerDisplayFrame,
            ..Settings::from_preset(cli.quality.into())
        };

        let mut game = Game::new(cli.seed, tuning, settings, Box::new(LogHud));
        game.set_idle_mode(cli.autopilot);

        for _ in 0..cli.ticks {
            if game.is_won() {
                break;
            }
            game.frame(SIM_DT);
        }

        let state = &game.state;
        let summary = RunSummary {
            seed: state.seed,
            ticks: state.time_ticks,
            seconds: state.time_secs(),
            score: state.score.score,
            win_score: state.score.win_threshold,
            won: game.is_won(),
            distance: -state.player.position.z,
            final_x: state.player.position.x,
            forward_speed: state.player.forward_speed,
            live_bursts: state.explosions.bursts().len(),
        };

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!(
                "seed {} | {} ticks ({:.1}s) | score {}/{}{} | distance {:.1} | x {:.2} | speed {:.3}",
                summary.seed,
                summary.ticks,
                summary.seconds,
                summary.score,
                summary.win_score,
                if summary.won { " WIN" } else { "" },
                summary.distance,
                summary.final_x,
                summary.forward_speed,
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is `ocean_runner::web::start`
}
