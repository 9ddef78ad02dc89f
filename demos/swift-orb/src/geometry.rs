use glam::Vec2;

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Keep `location` within `radius` of `anchor`.
///
/// Inside the circle the location is returned untouched. Outside, it is
/// projected onto the circle along the bearing `atan2(dx, dy)`.
pub fn clamp_to_circle(anchor: Vec2, location: Vec2, radius: f32) -> Vec2 {
    if distance(location, anchor) < radius {
        return location;
    }
    let phi = (location.x - anchor.x).atan2(location.y - anchor.y);
    anchor + Vec2::new(phi.sin(), phi.cos()) * radius
}
