//! Reachable-volume predicates and projections.
//!
//! The endpoint may go anywhere inside a vertical cylinder of radius `r_max`
//! between `z_min` and `z_max`. The pen hangs `pen_dist` below the endpoint and
//! may only drop below `z_clamp` while inside the paper rectangle, never below
//! `z_paper`. That splits the valid endpoint positions into two zones:
//!
//! - `Zone::Cylinder`: pen tip at or above the clamp plane, anywhere in the circle.
//! - `Zone::Prism`: pen tip between paper and clamp plane, inside the rectangle.

use crate::Point3;
use crate::config::GeometryCfg;

/// Where a point sits relative to the two workspace zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Cylinder,
    Prism,
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    cfg: GeometryCfg,
}

impl Workspace {
    pub fn new(cfg: GeometryCfg) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> &GeometryCfg {
        &self.cfg
    }

    pub fn home(&self) -> Point3 {
        self.cfg.home
    }

    /// Height of the pen tip for an endpoint at `p`.
    #[inline]
    pub fn pen_z(&self, p: &Point3) -> f64 {
        p.z - self.cfg.pen_dist
    }

    /// Endpoint height that puts the pen tip on `plane`. Lifted by an ulp
    /// where rounding would leave the tip just below the plane.
    pub fn endpoint_z_for_pen(&self, plane: f64) -> f64 {
        let mut z = plane + self.cfg.pen_dist;
        while z.is_finite() && self.pen_z(&Point3::new(0.0, 0.0, z)) < plane {
            z += (z.abs() * f64::EPSILON).max(f64::MIN_POSITIVE);
        }
        z
    }

    #[inline]
    pub fn in_circle(&self, p: &Point3) -> bool {
        p.x * p.x + p.y * p.y <= self.cfg.r_max * self.cfg.r_max
    }

    #[inline]
    pub fn in_rectangle(&self, p: &Point3) -> bool {
        (self.cfg.x_rct_min..=self.cfg.x_rct_max).contains(&p.x)
            && (self.cfg.y_rct_min..=self.cfg.y_rct_max).contains(&p.y)
    }

    /// Endpoint inside the cylinder, ignoring the pen.
    #[inline]
    pub fn point_valid(&self, p: &Point3) -> bool {
        self.in_circle(p) && (self.cfg.z_min..=self.cfg.z_max).contains(&p.z)
    }

    pub fn pen_in_cylinder(&self, p: &Point3) -> bool {
        self.point_valid(p) && self.pen_z(p) >= self.cfg.z_clamp
    }

    pub fn pen_in_prism(&self, p: &Point3) -> bool {
        self.point_valid(p)
            && self.in_rectangle(p)
            && (self.cfg.z_paper..=self.cfg.z_clamp).contains(&self.pen_z(p))
    }

    /// Endpoint and pen tip both inside the reachable volume.
    pub fn pen_valid(&self, p: &Point3) -> bool {
        self.classify(p) != Zone::Invalid
    }

    /// Cylinder wins for a pen tip sitting exactly on the clamp plane.
    pub fn classify(&self, p: &Point3) -> Zone {
        if self.pen_in_cylinder(p) {
            Zone::Cylinder
        } else if self.pen_in_prism(p) {
            Zone::Prism
        } else {
            Zone::Invalid
        }
    }

    /// Radially project `p` onto the cylinder wall when outside it; z is kept.
    pub fn bound_by_circle(&self, p: &Point3) -> Point3 {
        if self.in_circle(p) {
            return *p;
        }
        let theta = p.y.atan2(p.x);
        let (sin, cos) = theta.sin_cos();
        let mut r = self.cfg.r_max;
        let mut out = Point3::new(r * cos, r * sin, p.z);
        // Rounding in sin/cos can land an ulp outside the wall.
        if !self.in_circle(&out) {
            r *= 1.0 - 4.0 * f64::EPSILON;
            out = Point3::new(r * cos, r * sin, p.z);
        }
        out
    }

    /// Clamp x and y independently into the rectangle; z is kept.
    pub fn bound_by_rectangle(&self, p: &Point3) -> Point3 {
        if self.in_rectangle(p) {
            return *p;
        }
        Point3::new(
            p.x.clamp(self.cfg.x_rct_min, self.cfg.x_rct_max),
            p.y.clamp(self.cfg.y_rct_min, self.cfg.y_rct_max),
            p.z,
        )
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(GeometryCfg::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ws() -> Workspace {
        Workspace::default()
    }

    #[rstest]
    #[case(0.1, -14.5)]
    #[case(0.3, -13.7)]
    #[case(0.7, -12.9)]
    #[case(2.0, -14.5)]
    fn pen_lands_on_plane_despite_rounding(#[case] pen_dist: f64, #[case] plane: f64) {
        let w = Workspace::new(GeometryCfg {
            pen_dist,
            ..GeometryCfg::default()
        });
        let z = w.endpoint_z_for_pen(plane);
        assert!(w.pen_z(&Point3::new(0.0, 0.0, z)) >= plane);
        assert!((z - (plane + pen_dist)).abs() < 1e-12);
    }

    #[test]
    fn default_home_is_in_cylinder_zone() {
        let w = ws();
        assert_eq!(w.classify(&w.home()), Zone::Cylinder);
        assert!(w.pen_valid(&w.home()));
    }

    #[rstest]
    #[case(Point3::new(0.0, 0.0, -9.0), Zone::Cylinder)]
    #[case(Point3::new(5.9, 0.0, -11.5), Zone::Cylinder)]
    #[case(Point3::new(0.0, 0.0, -12.0), Zone::Prism)]
    #[case(Point3::new(4.5, 3.75, -12.5), Zone::Prism)]
    // pen below the clamp plane outside the rectangle
    #[case(Point3::new(5.0, 0.0, -12.0), Zone::Invalid)]
    // pen below the paper
    #[case(Point3::new(0.0, 0.0, -12.6), Zone::Invalid)]
    // above z_max
    #[case(Point3::new(0.0, 0.0, -7.9), Zone::Invalid)]
    // outside the circle
    #[case(Point3::new(6.1, 0.0, -9.0), Zone::Invalid)]
    fn classifies_zones(#[case] p: Point3, #[case] zone: Zone) {
        assert_eq!(ws().classify(&p), zone);
    }

    #[test]
    fn clamp_plane_boundary_prefers_cylinder() {
        let p = Point3::new(0.0, 0.0, -11.5);
        let w = ws();
        assert!(w.pen_in_cylinder(&p));
        assert!(w.pen_in_prism(&p));
        assert_eq!(w.classify(&p), Zone::Cylinder);
    }

    #[test]
    fn bound_by_circle_projects_radially() {
        let w = ws();
        let p = w.bound_by_circle(&Point3::new(12.0, 0.0, -9.0));
        assert!((p.x - 6.0).abs() < 1e-12);
        assert!(p.y.abs() < 1e-12);
        assert_eq!(p.z, -9.0);

        let q = w.bound_by_circle(&Point3::new(-10.0, -10.0, 3.0));
        let r = (q.x * q.x + q.y * q.y).sqrt();
        assert!((r - 6.0).abs() < 1e-9);
        assert!(q.x < 0.0 && q.y < 0.0);
        assert!((q.x - q.y).abs() < 1e-12);
        assert!(w.in_circle(&q));
    }

    #[test]
    fn bound_by_circle_leaves_inside_points() {
        let p = Point3::new(1.0, -2.0, 7.0);
        assert_eq!(ws().bound_by_circle(&p), p);
    }

    #[test]
    fn bound_by_rectangle_clamps_axes_independently() {
        let w = ws();
        let p = w.bound_by_rectangle(&Point3::new(10.0, -1.0, -12.0));
        assert_eq!(p, Point3::new(4.5, -1.0, -12.0));
        let q = w.bound_by_rectangle(&Point3::new(-9.0, 9.0, 0.0));
        assert_eq!(q, Point3::new(-4.5, 3.75, 0.0));
    }
}
