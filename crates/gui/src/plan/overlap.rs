//! Footprint overlap detection. Overlaps are reported as a warning only;
//! placement is never rejected.

use std::collections::HashSet;

use glam::Vec2;

const EPS: f32 = 1e-4;

/// An oriented rectangle on the floor plane, in world meters.
#[derive(Debug, Clone, Copy)]
pub struct FootprintRect {
    pub center: Vec2,
    /// Unrotated half extents (width/2, depth/2), already scaled
    pub half: Vec2,
    pub rotation_deg: f32,
}

impl FootprintRect {
    fn axes(&self) -> [Vec2; 2] {
        let rad = self.rotation_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        [Vec2::new(cos, sin), Vec2::new(-sin, cos)]
    }

    /// Corner positions, counter-clockwise starting from +x/+z.
    pub fn corners(&self) -> [Vec2; 4] {
        let [ax, az] = self.axes();
        let ex = ax * self.half.x;
        let ez = az * self.half.y;
        [
            self.center + ex + ez,
            self.center + ex - ez,
            self.center - ex - ez,
            self.center - ex + ez,
        ]
    }

    /// Point-in-rectangle test; both surfaces use it for click hit testing.
    pub fn contains(&self, point: Vec2) -> bool {
        let [ax, az] = self.axes();
        let rel = point - self.center;
        rel.dot(ax).abs() <= self.half.x && rel.dot(az).abs() <= self.half.y
    }
}

/// Separating-axis test for two oriented rectangles. Edge-to-edge contact
/// within EPS does not count as an overlap.
pub fn rects_overlap(a: &FootprintRect, b: &FootprintRect) -> bool {
    let corners_a = a.corners();
    let corners_b = b.corners();
    let axes = [a.axes(), b.axes()];

    for axis in axes.iter().flatten() {
        let (min_a, max_a) = project(&corners_a, *axis);
        let (min_b, max_b) = project(&corners_b, *axis);
        if max_a <= min_b + EPS || max_b <= min_a + EPS {
            return false;
        }
    }
    true
}

fn project(corners: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for c in corners {
        let d = c.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

/// Ids of every footprint that intersects at least one other footprint.
pub fn overlapping_ids(entries: &[(String, FootprintRect)]) -> HashSet<String> {
    let mut out = HashSet::new();
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            if rects_overlap(&entries[i].1, &entries[j].1) {
                out.insert(entries[i].0.clone());
                out.insert(entries[j].0.clone());
            }
        }
    }
    out
}
