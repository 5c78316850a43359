/// Weighted random draws shared by the generators.

use rand::Rng;

/// Failures before the first success of a Bernoulli(`p`) trial, drawn by
/// inversion so one uniform sample is consumed per draw.
pub fn geometric<R: Rng + ?Sized>(rng: &mut R, p: f64) -> u32 {
    if p >= 1.0 {
        return 0;
    }
    let u: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    (u.ln() / (1.0 - p).ln()).floor() as u32
}
