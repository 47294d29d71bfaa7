use instant::Instant;

use crate::config::SimConfig;
use crate::world::World;

/// Wall-clock seconds between throughput log lines.
const TPS_LOG_INTERVAL: f64 = 2.0;

// ---------------------------------------------------------------------------
// Throughput
// ---------------------------------------------------------------------------

/// How fast simulated time runs compared to wall time.
struct Throughput {
    dt: f64,
    window_start: Instant,
    window_ticks: u32,
    window_busy: f64,
}

impl Throughput {
    fn new(dt: f32) -> Self {
        Self {
            dt: dt as f64,
            window_start: Instant::now(),
            window_ticks: 0,
            window_busy: 0.0,
        }
    }

    /// Count one tick that took `busy` seconds. Logs once per window.
    fn record_tick(&mut self, busy: f64, tick: u64) {
        self.window_ticks += 1;
        self.window_busy += busy;

        let elapsed = self.window_start.elapsed().as_secs_f64();
        if elapsed < TPS_LOG_INTERVAL {
            return;
        }
        let ticks = self.window_ticks as f64;
        log::info!(
            "tick {} | {:.0} ticks/s | {:.3}ms per tick | {:.1}x realtime",
            tick,
            ticks / elapsed,
            self.window_busy / ticks * 1000.0,
            ticks * self.dt / elapsed,
        );
        self.window_start = Instant::now();
        self.window_ticks = 0;
        self.window_busy = 0.0;
    }
}

// ---------------------------------------------------------------------------
// Headless driver
// ---------------------------------------------------------------------------

/// Run `ticks` steps of a fresh world, logging the dashboard every sample
/// interval. Stops early once both populations are gone.
pub fn run(config: SimConfig, ticks: u64) -> Result<World, Box<dyn std::error::Error>> {
    let mut world = World::new(config)?;
    world.start();

    let interval = world.config().sample_interval;
    let mut throughput = Throughput::new(world.config().dt);

    while world.tick_count() < ticks {
        let started = Instant::now();
        world.tick();
        throughput.record_tick(started.elapsed().as_secs_f64(), world.tick_count());

        let summary = world.stats_summary();
        if world.tick_count() % interval == 0 {
            log::info!("tick {}\n{}", world.tick_count(), summary);
            log::debug!("{}", world.timers().breakdown());
        }
        if summary.is_extinct() {
            log::info!("Both populations extinct after {} ticks", world.tick_count());
            break;
        }
    }

    log::info!(
        "Finished at tick {} with {} predators and {} prey",
        world.tick_count(),
        world.stats_summary().predators.population,
        world.stats_summary().prey.population,
    );
    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_the_requested_number_of_ticks() {
        let config = SimConfig {
            seed: Some(11),
            ..SimConfig::default()
        };
        let world = run(config, 120).unwrap();
        assert_eq!(world.tick_count(), 120);
        assert_eq!(world.population_history().len(), 2);
    }

    #[test]
    fn stops_early_when_everyone_is_gone() {
        let mut config = SimConfig {
            seed: Some(12),
            ..SimConfig::default()
        };
        config.predator.initial_count = 0;
        config.prey.initial_count = 0;
        let world = run(config, 1000).unwrap();
        assert_eq!(world.tick_count(), 1);
    }

    #[test]
    fn rejects_bad_config() {
        let config = SimConfig {
            dt: 0.0,
            ..SimConfig::default()
        };
        assert!(run(config, 10).is_err());
    }
}
