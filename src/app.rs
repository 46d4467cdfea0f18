use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::constants::{MAX_CATCH_UP_TICKS, TICK, TICK_SECONDS};
use crate::game::Game;
use crate::input_source::InputSource;
use crate::session::LevelOutcome;

/// Turns elapsed wall-clock time into a whole number of fixed simulation steps.
///
/// Time that does not fill a whole step carries over as lag; [`FixedStepper::alpha`] exposes it
/// so a renderer can interpolate between the last two steps.
#[derive(Debug, Clone, Copy)]
pub struct FixedStepper {
    lag: Duration,
    step: Duration,
    max_steps: u32,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self::new(TICK, MAX_CATCH_UP_TICKS)
    }
}

impl FixedStepper {
    pub fn new(step: Duration, max_steps: u32) -> Self {
        Self {
            lag: Duration::ZERO,
            step,
            max_steps,
        }
    }

    /// Adds `elapsed` to the lag and returns how many steps to run now.
    ///
    /// At most `max_steps` are returned; whole steps beyond that are dropped so a long stall
    /// does not snowball into ever longer frames.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.lag += elapsed;

        let mut steps = 0;
        while self.lag >= self.step && steps < self.max_steps {
            self.lag -= self.step;
            steps += 1;
        }

        if self.lag >= self.step {
            let dropped = (self.lag.as_nanos() / self.step.as_nanos()) as u64;
            warn!(dropped, "Simulation fell behind, dropping steps");
            self.lag = Duration::from_nanos((self.lag.as_nanos() % self.step.as_nanos()) as u64);
        }

        steps
    }

    /// Fraction of a step left over as lag, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        self.lag.as_secs_f32() / self.step.as_secs_f32()
    }

    pub fn lag(&self) -> Duration {
        self.lag
    }
}

/// How the headless runner drives a level.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Simulated time after which the level is abandoned.
    pub max_seconds: f32,
    /// Pace steps against the wall clock instead of running flat out.
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_seconds: 120.0,
            realtime: false,
        }
    }
}

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: LevelOutcome,
    pub score: u32,
    pub ticks: u64,
}

impl RunSummary {
    /// Simulated time covered by the run, saturating instead of wrapping on absurd tick counts.
    pub fn simulated(&self) -> Duration {
        let tick_nanos = u64::try_from(TICK.as_nanos()).unwrap_or(u64::MAX);
        Duration::from_nanos(self.ticks.saturating_mul(tick_nanos))
    }
}

/// Runs `game` until it is won, lost, or `options.max_seconds` of simulated time pass.
pub fn run(game: &mut Game, input: &mut dyn InputSource, options: RunOptions) -> RunSummary {
    let max_ticks = (options.max_seconds / TICK_SECONDS).round().max(0.0) as u64;
    let mut stepper = FixedStepper::default();
    let mut last_frame = Instant::now();
    let mut ticks: u64 = 0;
    let mut stage = game.stage();

    info!(max_ticks, realtime = options.realtime, "Starting game loop");

    'frames: while !stage.is_finished() && ticks < max_ticks {
        let frame_start = Instant::now();
        let steps = if options.realtime {
            stepper.advance(frame_start - last_frame)
        } else {
            stepper.advance(TICK)
        };
        last_frame = frame_start;

        for _ in 0..steps {
            if let Some(direction) = input.poll(ticks, game) {
                game.press(direction);
            }
            stage = game.tick(TICK_SECONDS);
            ticks += 1;
            if stage.is_finished() || ticks >= max_ticks {
                break 'frames;
            }
        }

        if options.realtime {
            let remaining = TICK.saturating_sub(frame_start.elapsed());
            if remaining != Duration::ZERO {
                spin_sleep::sleep(remaining);
            }
        }
    }

    let outcome = LevelOutcome::from_stage(stage).unwrap_or_else(|| {
        debug!(?stage, ticks, "Run stopped before the level was decided");
        LevelOutcome::Abandoned
    });

    RunSummary {
        outcome,
        score: game.score(),
        ticks,
    }
}
