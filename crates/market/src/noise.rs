//! Noise source implementations
//!
//! Market jitter is re-sampled on every request; it is never cached.

use kisan_agent_core::NoiseSource;
use rand::Rng;

/// Default jitter source backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngNoise;

impl NoiseSource for ThreadRngNoise {
    fn draw(&self, amplitude: f64) -> f64 {
        let mut rng = rand::thread_rng();
        (rng.gen::<f64>() - 0.5) * 2.0 * amplitude
    }
}

/// Pins every draw to a fixed fraction of the amplitude's sign range,
/// clamped into bounds. `FixedNoise(0.0)` removes jitter entirely;
/// `FixedNoise(-1.0)` always draws the worst case.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn draw(&self, amplitude: f64) -> f64 {
        self.0.clamp(-amplitude.abs(), amplitude.abs())
    }
}
