//! Sensor frame (millimeters) to mechanism frame (inches).

use crate::Point3;
use crate::config::TransformCfg;

#[derive(Debug, Clone, PartialEq)]
pub struct Transformer {
    cfg: TransformCfg,
}

impl Transformer {
    pub fn new(cfg: TransformCfg) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> &TransformCfg {
        &self.cfg
    }

    /// Map a sensor-frame point into the mechanism frame.
    ///
    /// The sensor's depth axis becomes the mechanism's vertical axis with its
    /// sign flipped: `(x, y, z) -> (x, -z, y)`. Then mm -> in, then the
    /// per-axis offset, then the per-axis scale.
    pub fn apply(&self, p_mm: &Point3) -> Point3 {
        let remapped = [p_mm.x, -p_mm.z, p_mm.y];
        let mut out = [0.0; 3];
        for (i, v) in remapped.into_iter().enumerate() {
            out[i] = (v / self.cfg.mm_per_inch + self.cfg.offset[i]) * self.cfg.scale[i];
        }
        Point3::from(out)
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(TransformCfg::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flipped() -> Transformer {
        Transformer::new(TransformCfg {
            offset: [0.0, 0.0, -20.0],
            scale: [-1.0, -1.0, 1.0],
            mm_per_inch: 25.4,
        })
    }

    #[test]
    fn origin_maps_to_offset() {
        let p = flipped().apply(&Point3::origin());
        assert_eq!(p, Point3::new(0.0, 0.0, -20.0));
    }

    #[test]
    fn depth_axis_becomes_negated_y() {
        let t = Transformer::new(TransformCfg {
            offset: [0.0; 3],
            scale: [1.0; 3],
            mm_per_inch: 25.4,
        });
        let p = t.apply(&Point3::new(25.4, 50.8, 76.2));
        assert!((p.x - 1.0).abs() < 1e-12);
        assert!((p.y + 3.0).abs() < 1e-12);
        assert!((p.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn scale_applies_after_offset() {
        // bench defaults: z = 0.75 * (y_mm / 25.4 - 20)
        let p = Transformer::default().apply(&Point3::new(0.0, 254.0, 0.0));
        assert!((p.z - 0.75 * (10.0 - 20.0)).abs() < 1e-12);
    }
}
