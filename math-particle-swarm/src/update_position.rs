use crate::particle::Particle;
use ndarray::Zip;

/// Moves a particle by its velocity and clamps it into `[pos_min, pos_max]`.
///
/// A coordinate that leaves the box is set to the nearest bound and its
/// velocity component is zeroed (no reflection). Returns how many
/// coordinates were clamped.
pub fn update_position(particle: &mut Particle, pos_min: f64, pos_max: f64) -> usize {
    let mut clamped = 0;
    Zip::from(&mut particle.position)
        .and(&mut particle.velocity)
        .for_each(|x, v| {
            *x += *v;
            if *x < pos_min {
                *x = pos_min;
                *v = 0.0;
                clamped += 1;
            } else if *x > pos_max {
                *x = pos_max;
                *v = 0.0;
                clamped += 1;
            }
        });
    clamped
}
