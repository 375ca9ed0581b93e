// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides an axis-aligned bounding box for collision and ray queries.

use super::vector::{Vec2, Vec3};

/// An axis-aligned bounding box (AABB), defined by its minimum and maximum
/// corner points.
///
/// All overlap and containment tests use strict inequalities: boxes that
/// merely touch at a face do not intersect, and a point on a face is not
/// contained. This matches the swept-collision helpers
/// ([`calc_x_offset`](Self::calc_x_offset) and friends), which rely on
/// touching boxes being free to slide along each other.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Aabb {
    /// The corner of the box with the smallest coordinates on all axes.
    pub min: Vec3,
    /// The corner of the box with the largest coordinates on all axes.
    pub max: Vec3,
}

impl Aabb {
    /// Creates a new `Aabb` from two corner points.
    ///
    /// The corners are stored exactly as given; callers are responsible for
    /// `min <= max` on every axis. Queries on an inverted box are
    /// well-defined but degenerate (nothing intersects it).
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a new `Aabb` from six corner coordinates.
    #[inline]
    pub const fn from_coords(
        min_x: f32,
        min_y: f32,
        min_z: f32,
        max_x: f32,
        max_y: f32,
        max_z: f32,
    ) -> Self {
        Self {
            min: Vec3::new(min_x, min_y, min_z),
            max: Vec3::new(max_x, max_y, max_z),
        }
    }

    /// Creates an `Aabb` from six consecutive floats (min corner then max
    /// corner) in `src` starting at `offset`.
    ///
    /// # Panics
    /// Panics if `offset + 6` exceeds `src.len()`.
    #[inline]
    pub fn from_slice(src: &[f32], offset: usize) -> Self {
        Self::new(
            Vec3::from_slice(src, offset),
            Vec3::from_slice(src, offset + 3),
        )
    }

    /// Returns the corners as a fixed array, min corner then max corner.
    #[inline]
    pub const fn to_array(&self) -> [f32; 6] {
        [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
    }

    /// Appends the corners to `buf`, min corner then max corner.
    #[inline]
    pub fn write_to(&self, buf: &mut Vec<f32>) {
        buf.extend_from_slice(&self.to_array());
    }

    /// The extent of the box along the x axis.
    #[inline]
    pub fn x_size(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// The extent of the box along the y axis.
    #[inline]
    pub fn y_size(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// The extent of the box along the z axis.
    #[inline]
    pub fn z_size(&self) -> f32 {
        self.max.z - self.min.z
    }

    /// Calculates the center point of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.max.x + self.min.x) / 2.0,
            (self.max.y + self.min.y) / 2.0,
            (self.max.z + self.min.z) / 2.0,
        )
    }

    /// Checks if this box overlaps another on all three axes.
    ///
    /// The comparison is strict, so boxes that only touch at a face or edge
    /// do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        other.max.x > self.min.x
            && other.min.x < self.max.x
            && other.max.y > self.min.y
            && other.min.y < self.max.y
            && other.max.z > self.min.z
            && other.min.z < self.max.z
    }

    /// Checks if a point lies strictly inside the box. Points on a face are
    /// not contained.
    #[inline]
    pub fn contains(&self, pos: Vec3) -> bool {
        pos.x > self.min.x
            && pos.x < self.max.x
            && pos.y > self.min.y
            && pos.y < self.max.y
            && pos.z > self.min.z
            && pos.z < self.max.z
    }

    /// Returns the parametric distances at which a ray from `pos` in
    /// direction `dir` enters and exits this box, or `None` if the ray's
    /// line misses it.
    ///
    /// The slab method: `dir` is normalized internally, so the returned
    /// distances are in world units along the unit direction. The entry
    /// distance is not clamped to zero, so a box entirely behind `pos`
    /// still reports an intersection with negative distances. Zero direction
    /// components produce infinite slab distances, which resolve correctly
    /// through the min/max reduction.
    pub fn intersect_dists(&self, pos: Vec3, dir: Vec3) -> Option<Vec2> {
        let dir = dir.normalize();
        let tx1 = (self.min.x - pos.x) / dir.x;
        let tx2 = (self.max.x - pos.x) / dir.x;

        let ty1 = (self.min.y - pos.y) / dir.y;
        let ty2 = (self.max.y - pos.y) / dir.y;

        let tz1 = (self.min.z - pos.z) / dir.z;
        let tz2 = (self.max.z - pos.z) / dir.z;

        let tmin = tx1.min(tx2).max(ty1.min(ty2)).max(tz1.min(tz2));
        let tmax = tx1.max(tx2).min(ty1.max(ty2)).min(tz1.max(tz2));
        if tmax >= tmin {
            Some(Vec2::new(tmin, tmax))
        } else {
            None
        }
    }

    /// Checks if a ray from `pos` in direction `dir` intersects this box.
    #[inline]
    pub fn intersects_ray(&self, pos: Vec3, dir: Vec3) -> bool {
        self.intersect_dists(pos, dir).is_some()
    }

    /// Returns the point where a ray from `pos` in direction `dir` enters
    /// this box, or `None` if it misses.
    ///
    /// The point is computed as `pos + dir * entry_dist` with `dir` as the
    /// caller passed it; pass a unit vector for exact world-space points.
    pub fn intersect_entry(&self, pos: Vec3, dir: Vec3) -> Option<Vec3> {
        let dists = self.intersect_dists(pos, dir)?;
        Some(pos + dir * dists.x)
    }

    /// Returns the point where a ray from `pos` in direction `dir` exits
    /// this box, or `None` if it misses.
    ///
    /// The point is computed as `pos + dir * exit_dist` with `dir` as the
    /// caller passed it; pass a unit vector for exact world-space points.
    pub fn intersect_exit(&self, pos: Vec3, dir: Vec3) -> Option<Vec3> {
        let dists = self.intersect_dists(pos, dir)?;
        Some(pos + dir * dists.y)
    }

    /// Grows the box directionally by `amount`: negative components move the
    /// min face, positive components move the max face. The box never
    /// shrinks.
    pub fn expand(&self, amount: Vec3) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        if amount.x < 0.0 {
            min.x += amount.x;
        } else {
            max.x += amount.x;
        }
        if amount.y < 0.0 {
            min.y += amount.y;
        } else {
            max.y += amount.y;
        }
        if amount.z < 0.0 {
            min.z += amount.z;
        } else {
            max.z += amount.z;
        }
        Self::new(min, max)
    }

    /// Translates both corners by `amount`.
    #[inline]
    pub fn offset(&self, amount: Vec3) -> Self {
        Self::new(self.min + amount, self.max + amount)
    }

    /// Keeps the box's dimensions but moves its center to `pos`.
    pub fn with_center(&self, pos: Vec3) -> Self {
        let half = Vec3::new(
            self.x_size() / 2.0,
            self.y_size() / 2.0,
            self.z_size() / 2.0,
        );
        Self::new(pos - half, pos + half)
    }

    /// Clamps a proposed x movement of `other` so it stops at this box.
    ///
    /// Active only when `other` overlaps this box on the y and z axes
    /// (strictly). A positive `offset` with `other` entirely on the min side
    /// is clamped down to the gap `self.min.x - other.max.x`; a negative
    /// `offset` with `other` entirely on the max side is clamped up to
    /// `self.max.x - other.min.x`. Otherwise `offset` passes through
    /// unchanged. Stateless, so it can be folded over every candidate
    /// obstacle in turn.
    pub fn calc_x_offset(&self, other: &Aabb, offset: f32) -> f32 {
        let mut offset = offset;
        if other.max.y > self.min.y
            && other.min.y < self.max.y
            && other.max.z > self.min.z
            && other.min.z < self.max.z
        {
            if offset > 0.0 && other.max.x <= self.min.x {
                let new_off = self.min.x - other.max.x;
                if new_off < offset {
                    offset = new_off;
                }
            }
            if offset < 0.0 && other.min.x >= self.max.x {
                let new_off = self.max.x - other.min.x;
                if new_off > offset {
                    offset = new_off;
                }
            }
        }
        offset
    }

    /// Clamps a proposed y movement of `other` so it stops at this box.
    /// See [`calc_x_offset`](Self::calc_x_offset) for the clamping rules.
    pub fn calc_y_offset(&self, other: &Aabb, offset: f32) -> f32 {
        let mut offset = offset;
        if other.max.x > self.min.x
            && other.min.x < self.max.x
            && other.max.z > self.min.z
            && other.min.z < self.max.z
        {
            if offset > 0.0 && other.max.y <= self.min.y {
                let new_off = self.min.y - other.max.y;
                if new_off < offset {
                    offset = new_off;
                }
            }
            if offset < 0.0 && other.min.y >= self.max.y {
                let new_off = self.max.y - other.min.y;
                if new_off > offset {
                    offset = new_off;
                }
            }
        }
        offset
    }

    /// Clamps a proposed z movement of `other` so it stops at this box.
    /// See [`calc_x_offset`](Self::calc_x_offset) for the clamping rules.
    pub fn calc_z_offset(&self, other: &Aabb, offset: f32) -> f32 {
        let mut offset = offset;
        if other.max.y > self.min.y
            && other.min.y < self.max.y
            && other.max.x > self.min.x
            && other.min.x < self.max.x
        {
            if offset > 0.0 && other.max.z <= self.min.z {
                let new_off = self.min.z - other.max.z;
                if new_off < offset {
                    offset = new_off;
                }
            }
            if offset < 0.0 && other.min.z >= self.max.z {
                let new_off = self.max.z - other.min.z;
                if new_off > offset {
                    offset = new_off;
                }
            }
        }
        offset
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx_eq;

    fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn unit_cube() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_aabb_constructors_store_as_given() {
        let a = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(a.min, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(a.max, Vec3::new(4.0, 5.0, 6.0));

        let b = Aabb::from_coords(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        assert_eq!(a, b);

        // Corners are not reordered
        let inverted = Aabb::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(inverted.min, Vec3::ONE);
        assert_eq!(inverted.max, Vec3::ZERO);
    }

    #[test]
    fn test_aabb_accessors() {
        let a = Aabb::new(Vec3::new(-1.0, 0.0, 1.0), Vec3::new(3.0, 2.0, 5.0));
        assert!(approx_eq(a.x_size(), 4.0));
        assert!(approx_eq(a.y_size(), 2.0));
        assert!(approx_eq(a.z_size(), 4.0));
        assert!(vec3_approx_eq(a.center(), Vec3::new(1.0, 1.0, 3.0)));
    }

    #[test]
    fn test_aabb_intersects_strict() {
        let a = unit_cube();

        let overlapping = Aabb::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(1.5, 1.5, 1.5));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));

        // Face contact is not an intersection
        let touching = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(!a.intersects(&touching));
        assert!(!touching.intersects(&a));

        let separated = Aabb::new(Vec3::new(1.1, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(!a.intersects(&separated));

        let contained = Aabb::new(Vec3::new(0.25, 0.25, 0.25), Vec3::new(0.75, 0.75, 0.75));
        assert!(a.intersects(&contained));
        assert!(contained.intersects(&a));
    }

    #[test]
    fn test_aabb_contains_strict() {
        let a = unit_cube();
        assert!(a.contains(Vec3::new(0.5, 0.5, 0.5)));
        // Face points do not count
        assert!(!a.contains(Vec3::new(0.0, 0.5, 0.5)));
        assert!(!a.contains(Vec3::new(1.0, 0.5, 0.5)));
        assert!(!a.contains(Vec3::new(0.5, 0.5, 1.5)));
    }

    #[test]
    fn test_ray_hit_through_center() {
        let a = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
        let dists = a
            .intersect_dists(Vec3::new(-5.0, 0.0, 0.0), Vec3::X)
            .unwrap();
        assert!(approx_eq(dists.x, 4.0));
        assert!(approx_eq(dists.y, 6.0));

        let entry = a.intersect_entry(Vec3::new(-5.0, 0.0, 0.0), Vec3::X).unwrap();
        let exit = a.intersect_exit(Vec3::new(-5.0, 0.0, 0.0), Vec3::X).unwrap();
        assert!(vec3_approx_eq(entry, Vec3::new(-1.0, 0.0, 0.0)));
        assert!(vec3_approx_eq(exit, Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let a = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
        // Distances are measured along the unit direction regardless of the
        // length of dir
        let dists = a
            .intersect_dists(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0))
            .unwrap();
        assert!(approx_eq(dists.x, 4.0));
        assert!(approx_eq(dists.y, 6.0));
    }

    #[test]
    fn test_ray_miss() {
        let a = unit_cube();
        assert!(!a.intersects_ray(Vec3::new(-5.0, 5.0, 0.5), Vec3::X));
        assert!(a.intersect_entry(Vec3::new(-5.0, 5.0, 0.5), Vec3::X).is_none());
        assert!(a.intersect_exit(Vec3::new(-5.0, 5.0, 0.5), Vec3::X).is_none());
    }

    #[test]
    fn test_ray_behind_origin_still_hits() {
        // The line through the ray hits the box even though the box lies in
        // the negative-t direction; both distances come back negative.
        let a = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
        let dists = a.intersect_dists(Vec3::new(5.0, 0.0, 0.0), Vec3::X).unwrap();
        assert!(approx_eq(dists.x, -6.0));
        assert!(approx_eq(dists.y, -4.0));
    }

    #[test]
    fn test_ray_axis_parallel_inside_slab() {
        // Direction has zero y and z components; the ray stays inside those
        // slabs, and the infinities fall out of the min/max reduction.
        let a = unit_cube();
        let dists = a
            .intersect_dists(Vec3::new(-2.0, 0.5, 0.5), Vec3::X)
            .unwrap();
        assert!(approx_eq(dists.x, 2.0));
        assert!(approx_eq(dists.y, 3.0));

        // Same direction, but outside the y slab
        assert!(a.intersect_dists(Vec3::new(-2.0, 2.0, 0.5), Vec3::X).is_none());
    }

    #[test]
    fn test_expand_is_directional() {
        let a = unit_cube();

        let grown_pos = a.expand(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(grown_pos.min, Vec3::ZERO);
        assert_eq!(grown_pos.max, Vec3::new(3.0, 1.0, 1.0));

        let grown_neg = a.expand(Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(grown_neg.min, Vec3::new(-2.0, 0.0, 0.0));
        assert_eq!(grown_neg.max, Vec3::ONE);

        let grown_mixed = a.expand(Vec3::new(-1.0, 2.0, 0.0));
        assert_eq!(grown_mixed.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(grown_mixed.max, Vec3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_offset_and_with_center() {
        let a = unit_cube();

        let moved = a.offset(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(moved.min, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(moved.max, Vec3::new(2.0, 3.0, 4.0));

        let centered = a.with_center(Vec3::ZERO);
        assert!(vec3_approx_eq(centered.min, Vec3::new(-0.5, -0.5, -0.5)));
        assert!(vec3_approx_eq(centered.max, Vec3::new(0.5, 0.5, 0.5)));
        assert!(approx_eq(centered.x_size(), a.x_size()));
    }

    #[test]
    fn test_calc_x_offset_clamps_positive_sweep() {
        // Wall occupying x in [2, 3]; mover is a unit cube at the origin
        // trying to move +5 along x. It must stop after 1 unit.
        let wall = Aabb::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 1.0));
        let mover = unit_cube();
        let clamped = wall.calc_x_offset(&mover, 5.0);
        assert!(approx_eq(clamped, 1.0));

        // Movement smaller than the gap is untouched
        assert!(approx_eq(wall.calc_x_offset(&mover, 0.5), 0.5));
    }

    #[test]
    fn test_calc_x_offset_clamps_negative_sweep() {
        let wall = Aabb::new(Vec3::new(-3.0, 0.0, 0.0), Vec3::new(-2.0, 1.0, 1.0));
        let mover = unit_cube();
        let clamped = wall.calc_x_offset(&mover, -5.0);
        assert!(approx_eq(clamped, -2.0));
    }

    #[test]
    fn test_calc_x_offset_requires_lateral_overlap() {
        // The mover passes beside the wall on y, so the sweep is unaffected
        let wall = Aabb::new(Vec3::new(2.0, 5.0, 0.0), Vec3::new(3.0, 6.0, 1.0));
        let mover = unit_cube();
        assert!(approx_eq(wall.calc_x_offset(&mover, 5.0), 5.0));

        // Touching laterally is not overlapping
        let flush = Aabb::new(Vec3::new(2.0, 1.0, 0.0), Vec3::new(3.0, 2.0, 1.0));
        assert!(approx_eq(flush.calc_x_offset(&mover, 5.0), 5.0));
    }

    #[test]
    fn test_calc_y_and_z_offsets() {
        let floor = Aabb::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 1.0));
        let mover = unit_cube();
        // Falling: negative y sweep stops at the floor surface
        assert!(approx_eq(floor.calc_y_offset(&mover, -3.0), 0.0));

        let wall_z = Aabb::new(Vec3::new(0.0, 0.0, 2.5), Vec3::new(1.0, 1.0, 3.5));
        assert!(approx_eq(wall_z.calc_z_offset(&mover, 9.0), 1.5));
    }

    #[test]
    fn test_offset_fold_over_obstacles() {
        // Two walls at different distances; folding picks the nearest stop
        let near_wall = Aabb::new(Vec3::new(4.0, 0.0, 0.0), Vec3::new(5.0, 1.0, 1.0));
        let far_wall = Aabb::new(Vec3::new(8.0, 0.0, 0.0), Vec3::new(9.0, 1.0, 1.0));
        let mover = unit_cube();

        let mut off = 10.0;
        off = far_wall.calc_x_offset(&mover, off);
        off = near_wall.calc_x_offset(&mover, off);
        assert!(approx_eq(off, 3.0));
    }

    #[test]
    fn test_flat_roundtrip() {
        let a = Aabb::from_coords(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let mut buf = Vec::new();
        a.write_to(&mut buf);
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(Aabb::from_slice(&buf, 0), a);
    }

    #[test]
    #[should_panic]
    fn test_from_slice_out_of_bounds() {
        let data = [0.0f32; 6];
        let _ = Aabb::from_slice(&data, 3);
    }
}
