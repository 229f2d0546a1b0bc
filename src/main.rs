//! Tap Tycoon entry point
//!
//! Handles platform-specific initialization and runs the session loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_session {
    //! Browser session: LocalStorage-backed scheduler exposed to page scripts.
    //!
    //! The page drives the engine: `tap` from click handlers, `idle_tick`
    //! from a 1s interval, `frame` from requestAnimationFrame for feedback
    //! expiry. Teardown is the page clearing its interval; the engine holds
    //! no timers of its own.

    use wasm_bindgen::prelude::*;

    use tap_tycoon::feedback::FeedbackQueue;
    use tap_tycoon::persistence::LocalStore;
    use tap_tycoon::{AccrualScheduler, LevelTable, Tuning};

    #[wasm_bindgen]
    pub struct Session {
        scheduler: AccrualScheduler<LocalStore>,
        feedback: FeedbackQueue,
    }

    #[wasm_bindgen]
    impl Session {
        #[wasm_bindgen(constructor)]
        pub fn new() -> Session {
            Session {
                scheduler: AccrualScheduler::load(
                    LocalStore,
                    LevelTable::default(),
                    Tuning::default(),
                ),
                feedback: FeedbackQueue::new(),
            }
        }

        /// One scoring tap at page coordinates (x, y); returns the marker id.
        pub fn tap(&mut self, x: f32, y: f32) -> u64 {
            self.scheduler.apply_tap();
            self.feedback.push(x, y)
        }

        /// Passive income tick; call once per second while the page is live.
        pub fn idle_tick(&mut self) {
            self.scheduler.apply_idle_tick();
        }

        /// Animation frame tick; expires tap markers.
        pub fn frame(&mut self) {
            self.feedback.tick();
        }

        /// Drop a tap marker whose float-up animation finished early.
        pub fn marker_done(&mut self, id: u64) {
            self.feedback.remove(id);
        }

        pub fn points(&self) -> u64 {
            self.scheduler.state().points
        }

        pub fn level_index(&self) -> usize {
            self.scheduler.state().level_index
        }

        pub fn level_count(&self) -> usize {
            self.scheduler.table().len()
        }

        pub fn level_name(&self) -> String {
            self.scheduler.level_name().to_string()
        }

        pub fn progress(&self) -> f64 {
            self.scheduler.progress()
        }

        pub fn reset(&mut self) {
            self.scheduler.reset();
        }

        /// Shop write-back after a completed transaction.
        pub fn set_points(&mut self, new_points: u64) {
            self.scheduler.set_points(new_points);
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Tap Tycoon (web) ready");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_session::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::io::{self, BufRead};
    use std::time::Instant;

    use tap_tycoon::consts::IDLE_TICK_SECS;
    use tap_tycoon::persistence::{FileStore, PointsStore};
    use tap_tycoon::{AccrualScheduler, LevelTable, Tuning, format_points};

    fn print_status<S: PointsStore>(session: &AccrualScheduler<S>) {
        let state = session.state();
        let filled = (session.progress() / 10.0).round() as usize;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(10 - filled));
        println!(
            "{} points | {} ({}/{}) [{}] {:.0}%",
            format_points(state.points),
            session.level_name(),
            state.level_index + 1,
            session.table().len(),
            bar,
            session.progress(),
        );
    }

    env_logger::init();
    log::info!("Tap Tycoon (native) starting...");

    let store = FileStore::open("tap-tycoon-save.json");
    let mut session = AccrualScheduler::load(store, LevelTable::default(), Tuning::default());
    print_status(&session);
    println!("Commands: tap [n], status, buy <cost>, reset, quit");

    let stdin = io::stdin();
    let mut last_input = Instant::now();
    let mut accumulator = 0.0_f64;
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };

        // Catch up the idle ticks that elapsed while waiting for input
        accumulator += last_input.elapsed().as_secs_f64();
        last_input = Instant::now();
        while accumulator >= IDLE_TICK_SECS {
            session.apply_idle_tick();
            accumulator -= IDLE_TICK_SECS;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("tap") | Some("t") => {
                let count: u64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1);
                for _ in 0..count {
                    session.apply_tap();
                }
                print_status(&session);
            }
            Some("status") | Some("s") => print_status(&session),
            Some("buy") => {
                // The shop owns affordability; this driver plays both roles
                match parts.next().and_then(|s| s.parse::<u64>().ok()) {
                    Some(cost) if cost <= session.state().points => {
                        let remaining = session.state().points - cost;
                        session.set_points(remaining);
                        println!("Purchased for {} points", format_points(cost));
                        print_status(&session);
                    }
                    Some(_) => println!("Not enough points"),
                    None => println!("Usage: buy <cost>"),
                }
            }
            Some("reset") => {
                session.reset();
                print_status(&session);
            }
            Some("quit") | Some("q") => break,
            Some(other) => println!("Unknown command: {}", other),
            None => {}
        }
    }

    log::info!("Session over");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
