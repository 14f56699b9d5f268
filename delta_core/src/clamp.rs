//! Destination clamping.
//!
//! Given the last accepted position and a desired one, return the closest
//! position the mechanism can move to without leaving the zone it is in
//! except along a boundary it can legally cross. Safe transitions:
//!
//! | start                      | end                                  |
//! |----------------------------|--------------------------------------|
//! | cylinder                   | cylinder, circular wall, top         |
//! | cylinder, outside rect     | cylinder floor (clamp plane)         |
//! | cylinder, inside rect      | prism floor inside rect              |
//! | cylinder, inside rect      | cylinder floor outside rect          |
//! | prism                      | prism, rectangular wall, prism floor |
//! | prism                      | top of cylinder inside rect          |

use crate::Point3;
use crate::geometry::{Workspace, Zone};

impl Workspace {
    /// Limit `end` to the part of the workspace reachable from `start`.
    ///
    /// A `start` outside both zones can only come from a corrupted session;
    /// the result is then `home`.
    pub fn clamp(&self, start: &Point3, end: &Point3) -> Point3 {
        match self.classify(start) {
            Zone::Cylinder => self.clamp_from_cylinder(start, end),
            Zone::Prism => self.clamp_from_prism(end),
            Zone::Invalid => {
                tracing::warn!(?start, "start outside workspace; sending home");
                self.home()
            }
        }
    }

    fn clamp_from_cylinder(&self, start: &Point3, end: &Point3) -> Point3 {
        if self.pen_in_cylinder(end) {
            return *end;
        }
        let cfg = self.cfg();
        let mut out = self.bound_by_circle(end);
        if end.z > cfg.z_max {
            out.z = cfg.z_max;
        }
        let pen_end = self.pen_z(end);
        if pen_end < cfg.z_clamp {
            if !self.in_rectangle(start) || !self.in_rectangle(end) {
                out.z = self.endpoint_z_for_pen(cfg.z_clamp);
            } else if pen_end < cfg.z_paper {
                out.z = self.endpoint_z_for_pen(cfg.z_paper);
            }
        }
        out
    }

    fn clamp_from_prism(&self, end: &Point3) -> Point3 {
        if self.pen_in_prism(end) {
            return *end;
        }
        let cfg = self.cfg();
        let mut out = self.bound_by_rectangle(end);
        if self.pen_z(end) < cfg.z_paper {
            out.z = self.endpoint_z_for_pen(cfg.z_paper);
        }
        if end.z > cfg.z_max {
            out.z = cfg.z_max;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn close(a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < 1e-9
    }

    #[test]
    fn prism_start_rising_above_ceiling_stops_at_z_max() {
        let ws = Workspace::default();
        let out = ws.clamp(&Point3::new(0.0, 0.0, -12.0), &Point3::new(0.0, 0.0, -4.25196));
        assert!(close(&out, &Point3::new(0.0, 0.0, -8.0)), "{out:?}");
    }

    #[rstest]
    // cylinder -> cylinder passes through
    #[case((0.0, 0.0, -9.0), (1.0, 1.0, -10.0), (1.0, 1.0, -10.0))]
    // cylinder -> beyond the wall slides along it
    #[case((0.0, 0.0, -9.0), (9.0, 0.0, -10.0), (6.0, 0.0, -10.0))]
    // cylinder -> above the ceiling
    #[case((0.0, 0.0, -9.0), (0.0, 0.0, -2.0), (0.0, 0.0, -8.0))]
    // cylinder outside rect -> below clamp plane stops on it
    #[case((5.0, 0.0, -10.0), (5.0, 0.0, -12.0), (5.0, 0.0, -11.5))]
    // same start, end inside the rectangle: still stops on the clamp plane
    #[case((5.0, 0.0, -10.0), (0.0, 0.0, -12.0), (0.0, 0.0, -11.5))]
    // same start, far below the paper: no paper floor in this branch
    #[case((5.0, 0.0, -10.0), (0.0, 0.0, -20.0), (0.0, 0.0, -11.5))]
    // cylinder inside rect -> prism floor
    #[case((0.0, 0.0, -10.0), (1.0, 1.0, -13.0), (1.0, 1.0, -12.5))]
    // cylinder inside rect -> between clamp and paper inside the rect is kept
    #[case((0.0, 0.0, -10.0), (1.0, 1.0, -12.2), (1.0, 1.0, -12.2))]
    // cylinder inside rect -> below clamp outside rect
    #[case((0.0, 0.0, -10.0), (5.0, 0.0, -12.0), (5.0, 0.0, -11.5))]
    // prism -> prism passes through
    #[case((0.0, 0.0, -12.0), (2.0, -1.0, -12.4), (2.0, -1.0, -12.4))]
    // prism -> outside the rectangle slides along its wall
    #[case((0.0, 0.0, -12.0), (8.0, -8.0, -12.0), (4.5, -3.75, -12.0))]
    // prism -> through the paper
    #[case((0.0, 0.0, -12.0), (0.0, 0.0, -14.0), (0.0, 0.0, -12.5))]
    // prism -> up into the cylinder zone is reachable inside the rect
    #[case((0.0, 0.0, -12.0), (6.0, 0.0, -9.0), (4.5, 0.0, -9.0))]
    fn decision_table(
        #[case] start: (f64, f64, f64),
        #[case] end: (f64, f64, f64),
        #[case] expected: (f64, f64, f64),
    ) {
        let ws = Workspace::default();
        let start = Point3::new(start.0, start.1, start.2);
        let end = Point3::new(end.0, end.1, end.2);
        let expected = Point3::new(expected.0, expected.1, expected.2);
        let out = ws.clamp(&start, &end);
        assert!(close(&out, &expected), "clamp({start:?}, {end:?}) = {out:?}");
        assert!(ws.pen_valid(&out), "{out:?} not pen-valid");
    }

    #[test]
    fn invalid_start_goes_home() {
        let ws = Workspace::default();
        let out = ws.clamp(&Point3::new(0.0, 0.0, 0.0), &Point3::new(1.0, 1.0, -9.0));
        assert_eq!(out, ws.home());
    }
}
