//! Target positions for a zone's members.

use glam::Vec3;

use crate::core::config::ArrangementConfig;
use crate::core::geometry::Aabb;

/// Gap between neighbouring cards for a zone holding `count` cards.
///
/// Cards share `fill_ratio` of the zone's long side, but never spread
/// further apart than `spacing_cap`.
#[must_use]
pub fn spacing_for(bounds: &Aabb, count: usize, config: &ArrangementConfig) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let extent = bounds.extent(bounds.dominant_axis());
    (extent * config.fill_ratio / count as f32).min(config.spacing_cap)
}

/// Evenly spaced rest positions for `count` cards, in member order.
///
/// Positions run along the zone's dominant horizontal axis and are
/// symmetric about the zone center. The result depends only on the inputs,
/// so re-arranging an unchanged zone yields the same targets.
#[must_use]
pub fn compute_layout(bounds: &Aabb, count: usize, config: &ArrangementConfig) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }

    let spacing = spacing_for(bounds, count, config);
    let direction = bounds.dominant_axis().unit();
    let center = bounds.center() + Vec3::Y * config.rest_height;
    let middle = (count - 1) as f32 / 2.0;

    (0..count)
        .map(|index| center + direction * ((index as f32 - middle) * spacing))
        .collect()
}
