//! Optional per-stage resource log for `--monitor` runs.
//!
//! Each pipeline stage reports how many locations it handed on; the monitor
//! pairs that with elapsed time and process memory and prints a summary at the
//! end of the run.

use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

/// One stage boundary as seen by the monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSample {
    pub stage: &'static str,
    pub locations: usize,
    /// Since the monitor was created.
    pub elapsed: Duration,
    pub memory_mb: Option<u64>,
    pub cpu_usage: Option<f32>,
}

pub struct SystemMonitor {
    #[cfg(feature = "cli")]
    system: Mutex<System>,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
    started: Instant,
    samples: Mutex<Vec<StageSample>>,
    enabled: bool,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        #[cfg(feature = "cli")]
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                if enabled {
                    tracing::warn!("Process memory unavailable: {}", e);
                }
                None
            }
        };

        Self {
            #[cfg(feature = "cli")]
            system: Mutex::new(System::new_with_specifics(RefreshKind::nothing())),
            #[cfg(feature = "cli")]
            pid,
            started: Instant::now(),
            samples: Mutex::new(Vec::new()),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// `(memory MB, cpu %)` of this process.
    #[cfg(feature = "cli")]
    fn process_usage(&self) -> Option<(u64, f32)> {
        let mut system = self.system.lock().ok()?;
        system.refresh_all();
        let process = system.process(self.pid?)?;
        Some((process.memory() / 1024 / 1024, process.cpu_usage()))
    }

    #[cfg(not(feature = "cli"))]
    fn process_usage(&self) -> Option<(u64, f32)> {
        None
    }

    /// Records the end of `stage`, which left `locations` locations behind it.
    pub fn log_stage(&self, stage: &'static str, locations: usize) {
        if !self.enabled {
            return;
        }

        let usage = self.process_usage();
        let sample = StageSample {
            stage,
            locations,
            elapsed: self.started.elapsed(),
            memory_mb: usage.map(|(memory, _)| memory),
            cpu_usage: usage.map(|(_, cpu)| cpu),
        };

        match (sample.memory_mb, sample.cpu_usage) {
            (Some(memory), Some(cpu)) => tracing::info!(
                "📊 {} - {} locations, CPU: {:.1}%, Memory: {}MB, Time: {:?}",
                stage,
                locations,
                cpu,
                memory,
                sample.elapsed
            ),
            _ => tracing::info!(
                "📊 {} - {} locations, Time: {:?}",
                stage,
                locations,
                sample.elapsed
            ),
        }

        if let Ok(mut samples) = self.samples.lock() {
            samples.push(sample);
        }
    }

    pub fn stage_samples(&self) -> Vec<StageSample> {
        self.samples
            .lock()
            .map(|samples| samples.clone())
            .unwrap_or_default()
    }

    /// Per-stage durations, throughput and peak memory over the whole run.
    pub fn log_summary(&self) {
        if !self.enabled {
            return;
        }

        let samples = self.stage_samples();
        let mut previous = Duration::ZERO;
        for sample in &samples {
            let spent = sample.elapsed.saturating_sub(previous);
            previous = sample.elapsed;
            let rate = if spent.as_secs_f64() > 0.0 {
                sample.locations as f64 / spent.as_secs_f64()
            } else {
                0.0
            };
            tracing::info!(
                "📊 {:<9} {:>10} locations in {:?} ({:.0} locations/s)",
                sample.stage,
                sample.locations,
                spent,
                rate
            );
        }

        let peak = samples.iter().filter_map(|s| s.memory_mb).max();
        match peak {
            Some(peak) => tracing::info!(
                "📊 Total Time: {:?}, Peak Memory: {}MB",
                self.started.elapsed(),
                peak
            ),
            None => tracing::info!("📊 Total Time: {:?}", self.started.elapsed()),
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
