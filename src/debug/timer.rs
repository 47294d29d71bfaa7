use instant::Instant;

/// Which phase of the simulation tick is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SystemPhase {
    SpatialRebuild = 0,
    Hunt = 1,
    Flee = 2,
    PredatorMating = 3,
    PreyMating = 4,
    Metabolism = 5,
    Population = 6,
}

const PHASES: usize = 7;

impl SystemPhase {
    pub const ALL: [SystemPhase; PHASES] = [
        Self::SpatialRebuild,
        Self::Hunt,
        Self::Flee,
        Self::PredatorMating,
        Self::PreyMating,
        Self::Metabolism,
        Self::Population,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SpatialRebuild => "Spatial",
            Self::Hunt => "Hunt",
            Self::Flee => "Flee",
            Self::PredatorMating => "Predator mating",
            Self::PreyMating => "Prey mating",
            Self::Metabolism => "Metabolism",
            Self::Population => "Population",
        }
    }
}

/// Smoothing weight of the newest sample.
const EMA_ALPHA: f64 = 0.1;

/// Smoothed cost of each tick phase, in microseconds.
#[derive(Debug, Clone, Default)]
pub struct SystemTimers {
    smoothed_us: [f64; PHASES],
    samples: u64,
}

impl SystemTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `phase` and fold its wall time into the average.
    pub fn measure<R>(&mut self, phase: SystemPhase, run: impl FnOnce() -> R) -> R {
        let started = Instant::now();
        let out = run();
        self.record(phase, started.elapsed().as_secs_f64() * 1_000_000.0);
        out
    }

    fn record(&mut self, phase: SystemPhase, elapsed_us: f64) {
        let slot = &mut self.smoothed_us[phase as usize];
        // First sample seeds the average instead of decaying from zero.
        *slot = if *slot == 0.0 {
            elapsed_us
        } else {
            *slot + (elapsed_us - *slot) * EMA_ALPHA
        };
        if phase == SystemPhase::Population {
            self.samples += 1;
        }
    }

    pub fn duration_us(&self, phase: SystemPhase) -> f64 {
        self.smoothed_us[phase as usize]
    }

    /// Ticks measured so far.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn total_us(&self) -> f64 {
        self.smoothed_us.iter().sum()
    }

    /// Fraction of the tick spent in `phase`, 0 before anything ran.
    pub fn share(&self, phase: SystemPhase) -> f64 {
        let total = self.total_us();
        if total > 0.0 {
            self.duration_us(phase) / total
        } else {
            0.0
        }
    }

    /// e.g. `Spatial 12.0us (8%) | Hunt 30.5us (21%) | ...`
    pub fn breakdown(&self) -> String {
        let mut line = String::new();
        for (i, phase) in SystemPhase::ALL.into_iter().enumerate() {
            if i > 0 {
                line.push_str(" | ");
            }
            line.push_str(&format!(
                "{} {:.1}us ({:.0}%)",
                phase.label(),
                self.duration_us(phase),
                self.share(phase) * 100.0
            ));
        }
        line
    }
}
