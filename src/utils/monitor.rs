#[cfg(feature = "cli")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// 單一階段結束時的行程用量
#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct StageSample {
    pub cpu_percent: f32,
    pub rss_mb: u64,
    pub peak_rss_mb: u64,
    pub elapsed: Duration,
}

/// 只追蹤本行程；關閉時不碰 sysinfo
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Option<Sampler>,
}

#[cfg(feature = "cli")]
struct Sampler {
    system: RefCell<System>,
    pid: Pid,
    started: Instant,
    peak_rss_mb: Cell<u64>,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self { state: None };
        }

        let state = match sysinfo::get_current_pid() {
            Ok(pid) => Some(Sampler {
                system: RefCell::new(System::new()),
                pid,
                started: Instant::now(),
                peak_rss_mb: Cell::new(0),
            }),
            Err(e) => {
                tracing::warn!("Cannot determine current PID, monitoring disabled: {}", e);
                None
            }
        };

        Self { state }
    }

    pub fn sample(&self) -> Option<StageSample> {
        let sampler = self.state.as_ref()?;
        let mut system = sampler.system.try_borrow_mut().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[sampler.pid]), true);

        let process = system.process(sampler.pid)?;
        let rss_mb = process.memory() / 1024 / 1024;
        let peak_rss_mb = sampler.peak_rss_mb.get().max(rss_mb);
        sampler.peak_rss_mb.set(peak_rss_mb);

        Some(StageSample {
            cpu_percent: process.cpu_usage(),
            rss_mb,
            peak_rss_mb,
            elapsed: sampler.started.elapsed(),
        })
    }

    pub fn log_stats(&self, stage: &str) {
        if let Some(s) = self.sample() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, RSS: {}MB, Peak: {}MB, Time: {:?}",
                stage,
                s.cpu_percent,
                s.rss_mb,
                s.peak_rss_mb,
                s.elapsed
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(s) = self.sample() {
            tracing::info!("📊 Done in {:?}, peak RSS {}MB", s.elapsed, s.peak_rss_mb);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 沒有 sysinfo 時不做任何事
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _stage: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
