//! Load sampling.
//!
//! [`HostLoadSampler`] reads the host's 1-minute load average and divides it
//! by the number of logical cores, so `1.0` means "every core busy". The
//! monitor only sees the [`LoadSampler`] trait, which lets tests substitute
//! [`StaticSampler`].

use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::CoreError;
use crate::types::LoadValue;

const PROC_LOADAVG: &str = "/proc/loadavg";

/// A source of normalized load readings.
///
/// Implementations must be cheap and non-blocking: the monitor calls
/// `sample` while holding its state lock.
pub trait LoadSampler: Send + Sync {
    fn sample(&self) -> Result<LoadValue, CoreError>;
}

/// Reads the real host load average.
#[derive(Debug, Clone)]
pub struct HostLoadSampler {
    cores: NonZeroUsize,
}

impl Default for HostLoadSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl HostLoadSampler {
    /// Detect the logical core count.
    ///
    /// Falls back to a single core if the platform cannot report it, which
    /// leaves the raw load average unscaled rather than failing.
    pub fn new() -> Self {
        let cores = match std::thread::available_parallelism() {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "Core count unavailable -- load will not be normalized");
                NonZeroUsize::MIN
            }
        };
        Self { cores }
    }

    /// Number of logical cores used for normalization.
    pub fn cores(&self) -> usize {
        self.cores.get()
    }
}

impl LoadSampler for HostLoadSampler {
    fn sample(&self) -> Result<LoadValue, CoreError> {
        let raw = match load_average_1m() {
            Some(raw) => raw,
            None => read_proc_loadavg(Path::new(PROC_LOADAVG))?,
        };
        Ok(normalize(raw, self.cores.get()))
    }
}

/// Divide a raw load average by the core count.
pub fn normalize(load_average: f64, cores: usize) -> LoadValue {
    load_average / cores.max(1) as f64
}

#[cfg(unix)]
fn load_average_1m() -> Option<f64> {
    let mut values = [0.0_f64; 1];
    // SAFETY: `getloadavg` writes at most `nelem` doubles into a valid buffer.
    let n = unsafe { libc::getloadavg(values.as_mut_ptr(), 1) };
    (n >= 1).then_some(values[0])
}

#[cfg(not(unix))]
fn load_average_1m() -> Option<f64> {
    None
}

fn read_proc_loadavg(path: &Path) -> Result<f64, CoreError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CoreError::Sampler(format!("reading {}: {e}", path.display())))?;
    parse_loadavg_1m(&contents)
}

/// Parse the first field of a `/proc/loadavg`-formatted string.
pub fn parse_loadavg_1m(contents: &str) -> Result<f64, CoreError> {
    let first = contents
        .split_whitespace()
        .next()
        .ok_or_else(|| CoreError::Sampler("loadavg missing first field".to_string()))?;
    first
        .parse::<f64>()
        .map_err(|e| CoreError::Sampler(format!("invalid loadavg value '{first}': {e}")))
}

/// A sampler that returns whatever value it was last given.
#[derive(Debug)]
pub struct StaticSampler {
    bits: AtomicU64,
}

impl StaticSampler {
    pub fn new(value: LoadValue) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    pub fn set(&self, value: LoadValue) {
        self.bits.store(value.to_bits(), Ordering::SeqCst);
    }
}

impl LoadSampler for StaticSampler {
    fn sample(&self) -> Result<LoadValue, CoreError> {
        Ok(f64::from_bits(self.bits.load(Ordering::SeqCst)))
    }
}
