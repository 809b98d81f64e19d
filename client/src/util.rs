use paintpad_shared::RandomSource;

/// `Math.random()`.
pub struct MathRandom;

impl RandomSource for MathRandom {
    fn next_f64(&self) -> f64 {
        js_sys::Math::random()
    }
}
