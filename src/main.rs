//! Dash Runner entry point
//!
//! Native: a headless demo that lets the autopilot play for a while and
//! prints the final snapshot as JSON.
//! Usage: `dash-runner [seconds] [seed] [best-file] [tuning-file]`
//!
//! Web: the library's `WebRunner` is driven from JavaScript; there is
//! nothing to do here.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::process::ExitCode;

    use dash_runner::consts::FRAME_DT_60HZ;
    use dash_runner::persistence::JsonFileStore;
    use dash_runner::sim::{GameEvent, autopilot};
    use dash_runner::{
        BestScoreStore, MemoryStore, Session, Settings, Tuning, TuningError, format_score,
    };

    const DEFAULT_SECONDS: f32 = 60.0;
    const DEFAULT_SEED: u64 = 0x5EED;

    struct Args {
        seconds: f32,
        seed: u64,
        best_file: Option<String>,
        tuning_file: Option<String>,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = std::env::args().skip(1);
        let seconds = match args.next() {
            Some(s) => s
                .parse::<f32>()
                .ok()
                .filter(|s| s.is_finite() && *s >= 0.0)
                .ok_or_else(|| format!("invalid seconds: {s}"))?,
            None => DEFAULT_SECONDS,
        };
        let seed = match args.next() {
            Some(s) => s.parse::<u64>().map_err(|e| format!("invalid seed {s}: {e}"))?,
            None => DEFAULT_SEED,
        };
        Ok(Args {
            seconds,
            seed,
            best_file: args.next(),
            tuning_file: args.next(),
        })
    }

    fn load_tuning(path: &str) -> Result<Tuning, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Tuning::from_json(&json)
    }

    pub fn run() -> ExitCode {
        let args = match parse_args() {
            Ok(args) => args,
            Err(e) => {
                eprintln!("{e}");
                eprintln!("usage: dash-runner [seconds] [seed] [best-file] [tuning-file]");
                return ExitCode::from(2);
            }
        };

        let tuning = match &args.tuning_file {
            Some(path) => match load_tuning(path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    eprintln!("{path}: {e}");
                    return ExitCode::from(2);
                }
            },
            None => Tuning::default(),
        };

        let store: Box<dyn BestScoreStore> = match &args.best_file {
            Some(path) => Box::new(JsonFileStore::new(path)),
            None => Box::new(MemoryStore::default()),
        };
        let mut session: Session = Session::new(args.seed, store, tuning, Settings::load());

        log::info!(
            "Dash Runner (headless) starting: {:.0}s, seed {}",
            args.seconds,
            args.seed
        );

        let frames = (args.seconds / FRAME_DT_60HZ).round() as u64;
        let mut runs = 0u32;
        for _ in 0..frames {
            let input = autopilot(session.state());
            for event in session.frame(FRAME_DT_60HZ, &input) {
                if let GameEvent::GameOver { score } = event {
                    runs += 1;
                    log::info!("Run {} ended at {}", runs, format_score(score));
                }
            }
        }

        log::info!(
            "Finished after {} crash(es); best {}",
            runs,
            format_score(session.state().best_score)
        );

        match serde_json::to_string_pretty(&session.snapshot()) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("failed to serialize snapshot: {e}");
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebRunner, this is just to satisfy the compiler
}
