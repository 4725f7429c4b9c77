use std::f32::consts::TAU;

use bevy::math::{Vec2, Vec3};
use rand::Rng;

use crate::config::SpawnSettings;

/// Uniformly distributed point inside a disc of `radius` centred on the origin.
pub fn random_point_in_disc<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec2 {
    let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
    // sqrt for uniform density over the area
    let distance = radius * rng.gen::<f32>().sqrt();
    let angle = rng.gen_range(0.0..TAU);
    Vec2::new(angle.cos(), angle.sin()) * distance
}

/// Release point for a new body above water centred at `center`, whose base
/// level is `center.y`.
pub fn drop_position<R: Rng + ?Sized>(rng: &mut R, center: Vec3, settings: &SpawnSettings) -> Vec3 {
    let offset = random_point_in_disc(rng, settings.area_radius);
    Vec3::new(
        center.x + offset.x,
        center.y + settings.drop_height,
        center.z + offset.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_points_stay_inside_disc() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(random_point_in_disc(&mut rng, 5.0).length() <= 5.0 + 1e-5);
        }
    }

    #[test]
    fn test_points_cover_the_disc() {
        let mut rng = StdRng::seed_from_u64(11);
        let points: Vec<Vec2> = (0..2000)
            .map(|_| random_point_in_disc(&mut rng, 1.0))
            .collect();
        // Half the area lies outside radius 1/sqrt(2).
        let outer = points.iter().filter(|p| p.length() > 0.5f32.sqrt()).count();
        assert!((800..1200).contains(&outer), "outer = {}", outer);
        assert!(points.iter().any(|p| p.x < 0.0 && p.y < 0.0));
        assert!(points.iter().any(|p| p.x > 0.0 && p.y > 0.0));
    }

    #[test]
    fn test_degenerate_radius_is_origin() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(random_point_in_disc(&mut rng, -2.0), Vec2::ZERO);
        assert_eq!(random_point_in_disc(&mut rng, f32::NAN), Vec2::ZERO);
    }

    #[test]
    fn test_drop_position_height() {
        let mut rng = StdRng::seed_from_u64(5);
        let settings = SpawnSettings::default();
        let center = Vec3::new(10.0, 1.0, -4.0);
        let pos = drop_position(&mut rng, center, &settings);
        assert_eq!(pos.y, 1.0 + settings.drop_height);
        assert!(Vec2::new(pos.x - 10.0, pos.z + 4.0).length() <= settings.area_radius + 1e-4);
    }
}
