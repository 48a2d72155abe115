//! sRGB to CIE LAB (D65) conversion and CIE76 Delta-E.
//!
//! The scalar and batched paths share [`rgb_to_lab`], so a pixel converted on
//! its own and the same pixel converted inside a batch are bit-identical.

use palette::{white_point::D65, Lab};
use rayon::prelude::*;

pub type LabColor = Lab<D65, f64>;

const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
];

const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

const EPSILON: f64 = (6.0 / 29.0) * (6.0 / 29.0) * (6.0 / 29.0);

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        t / (3.0 * (6.0 / 29.0) * (6.0 / 29.0)) + 4.0 / 29.0
    }
}

/// Convert RGB [0-255] to LAB color space
pub fn rgb_to_lab(rgb: [u8; 3]) -> LabColor {
    let linear = [
        srgb_to_linear(rgb[0] as f64 / 255.0),
        srgb_to_linear(rgb[1] as f64 / 255.0),
        srgb_to_linear(rgb[2] as f64 / 255.0),
    ];

    let mut xyz = [0.0f64; 3];
    for (out, (row, white)) in xyz.iter_mut().zip(SRGB_TO_XYZ.iter().zip(D65_WHITE)) {
        let v = row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2];
        *out = v / white;
    }

    let fx = lab_f(xyz[0]);
    let fy = lab_f(xyz[1]);
    let fz = lab_f(xyz[2]);

    Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Convert many RGB values at once (parallel). Output order matches input.
pub fn rgb_to_lab_batch(colors: &[[u8; 3]]) -> Vec<LabColor> {
    colors.par_iter().map(|rgb| rgb_to_lab(*rgb)).collect()
}

/// Squared CIE76 distance. Monotonic in [`delta_e`], so argmin searches use it
/// to skip the square root.
pub fn delta_e_squared(a: &LabColor, b: &LabColor) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    dl * dl + da * da + db * db
}

/// CIE76 Delta-E: Euclidean distance in LAB.
pub fn delta_e(a: &LabColor, b: &LabColor) -> f64 {
    delta_e_squared(a, b).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_lab_close(lab: LabColor, expected: (f64, f64, f64), tol: f64) {
        assert!(
            (lab.l - expected.0).abs() <= tol
                && (lab.a - expected.1).abs() <= tol
                && (lab.b - expected.2).abs() <= tol,
            "got ({:.3}, {:.3}, {:.3}), expected {:?}",
            lab.l,
            lab.a,
            lab.b,
            expected
        );
    }

    #[test]
    fn black_and_white_hit_the_lab_extremes() {
        assert_lab_close(rgb_to_lab([0, 0, 0]), (0.0, 0.0, 0.0), 0.5);
        assert_lab_close(rgb_to_lab([255, 255, 255]), (100.0, 0.0, 0.0), 0.5);
    }

    #[test]
    fn primary_red_matches_reference_values() {
        assert_lab_close(rgb_to_lab([255, 0, 0]), (53.23, 80.11, 67.22), 1.0);
    }

    #[test]
    fn batch_is_bit_identical_to_scalar() {
        let colors: Vec<[u8; 3]> = (0..=255u8)
            .step_by(5)
            .map(|v| [v, 255 - v, v / 2])
            .collect();
        let batch = rgb_to_lab_batch(&colors);
        assert_eq!(batch.len(), colors.len());
        for (rgb, lab) in colors.iter().zip(batch.iter()) {
            let scalar = rgb_to_lab(*rgb);
            assert_eq!(scalar.l.to_bits(), lab.l.to_bits());
            assert_eq!(scalar.a.to_bits(), lab.a.to_bits());
            assert_eq!(scalar.b.to_bits(), lab.b.to_bits());
        }
    }

    #[test]
    fn delta_e_identity_and_positivity() {
        let a = rgb_to_lab([12, 200, 77]);
        let b = rgb_to_lab([12, 200, 78]);
        assert_eq!(delta_e(&a, &a), 0.0);
        assert!(delta_e(&a, &b) > 0.0);
        let d = delta_e(&a, &b);
        assert!((d * d - delta_e_squared(&a, &b)).abs() < 1e-9);
    }
}
