use approx::assert_abs_diff_eq;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::Normal;

use toolbelt::math::{
    cartesian_product, case_distinction, intersect_functions, mask_in_range, safe_div, setdiff2d,
    MixtureDistribution, Side,
};
use toolbelt::metrics::calibration_curve;
use toolbelt::vision::{bbox_of_mask, pixel_overlap, BBox};
use toolbelt::ToolboxError;

// --- Helpers ---

fn random_sequences(rng: &mut StdRng) -> Vec<Vec<u32>> {
    let n = rng.gen_range(0..5);
    (0..n)
        .map(|_| {
            let len = rng.gen_range(0..4);
            (0..len).map(|_| rng.gen_range(0..10)).collect()
        })
        .collect()
}

// --- Cartesian product ---

#[test]
fn test_product_length_is_product_of_lengths() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let sequences = random_sequences(&mut rng);
        let expected: usize = sequences.iter().map(Vec::len).product();
        let product = cartesian_product(&sequences);
        assert_eq!(product.len(), expected);

        let tuples: Vec<Vec<u32>> = product.collect();
        assert_eq!(tuples.len(), expected);
        assert!(tuples.iter().all(|t| t.len() == sequences.len()));
    }
}

#[test]
fn test_product_examples() {
    let pairs: Vec<Vec<i32>> = cartesian_product(&[vec![1, 2], vec![3, 4]]).collect();
    assert_eq!(pairs, [vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]]);

    let none: &[Vec<i32>] = &[];
    let empty: Vec<Vec<i32>> = cartesian_product(none).collect();
    assert_eq!(empty, [Vec::<i32>::new()]);

    let with_empty: Vec<Vec<i32>> = cartesian_product(&[vec![1, 2], vec![]]).collect();
    assert!(with_empty.is_empty());
}

#[test]
fn test_product_of_strings() {
    let words = [vec!["a", "b"], vec!["x"]];
    let joined: Vec<String> = cartesian_product(&words).map(|t| t.concat()).collect();
    assert_eq!(joined, ["ax", "bx"]);
}

// --- Elementwise helpers ---

#[test]
fn test_setdiff_and_ranges() {
    let diff = setdiff2d(&[[1, 2], [3, 4], [1, 2], [5, 6]], &[[3, 4]]);
    assert_eq!(diff, vec![[1, 2], [5, 6]]);

    let angles = [355.0, 5.0, 180.0, -2.0];
    assert_eq!(
        mask_in_range(&angles, (350.0, 10.0), Some(360.0)).unwrap(),
        [true, true, false, true]
    );
}

#[test]
fn test_safe_div_and_cases() {
    let q = safe_div(&[1.0, 2.0, 3.0], &[2.0, 0.0, -1.0], 0.0).unwrap();
    assert_eq!(q, vec![0.5, 0.0, -3.0]);
    assert!(matches!(
        safe_div(&[1.0], &[1.0, 2.0], 0.0),
        Err(ToolboxError::ShapeMismatch { .. })
    ));

    let neg = [-1, -2, -3];
    let pos = [1, 2, 3];
    let picked = case_distinction(
        &[(&neg[..], &[true, false, false][..]), (&pos[..], &[false, true, false][..])],
        0,
    )
    .unwrap();
    assert_eq!(picked, vec![-1, 2, 0]);
}

#[test]
fn test_sampled_crossings() {
    let xs: Vec<f64> = (0..=40).map(|i| -2.05 + 0.1 * f64::from(i)).collect();
    let parabola: Vec<f64> = xs.iter().map(|x| x * x).collect();
    let one = vec![1.0; xs.len()];
    let crossings = intersect_functions(&parabola, &one, Side::Left).unwrap();
    assert_eq!(crossings.len(), 2);
    for idx in crossings {
        assert!((xs[idx].abs() - 1.0).abs() < 0.1);
    }
}

// --- Statistics and metrics ---

#[test]
fn test_mixture_sample_mean() {
    let mixture = MixtureDistribution::new(vec![
        (0.25, Normal::new(-4.0, 1.0).unwrap()),
        (0.75, Normal::new(4.0, 1.0).unwrap()),
    ])
    .unwrap();
    assert_abs_diff_eq!(mixture.mean(), 2.0, epsilon = 1e-12);

    let mut rng = StdRng::seed_from_u64(11);
    let samples = mixture.sample_n(&mut rng, 20_000);
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    assert_abs_diff_eq!(mean, 2.0, epsilon = 0.15);
}

#[test]
fn test_calibration_of_perfect_predictions() {
    let y_pred = [0.0, 0.0, 1.0, 1.0, 1.0];
    let y_true = [0.0, 0.0, 1.0, 1.0, 1.0];
    let curve = calibration_curve(&y_true, &y_pred, 5).unwrap();
    assert_abs_diff_eq!(curve.ece, 0.0);
    assert_abs_diff_eq!(curve.mce, 0.0);
    assert_eq!(curve.counts.iter().sum::<usize>(), 5);
}

#[test]
fn test_mask_and_box_overlap() {
    let mut a = Array2::from_elem((6, 6), false);
    let mut b = Array2::from_elem((6, 6), false);
    a.slice_mut(ndarray::s![0..2, 0..4]).fill(true);
    b.slice_mut(ndarray::s![0..2, 2..6]).fill(true);

    let overlap = pixel_overlap(&a, &b).unwrap();
    assert_abs_diff_eq!(overlap.iou, 4.0 / 12.0, epsilon = 1e-12);

    let box_a = bbox_of_mask(&a).unwrap();
    let box_b = bbox_of_mask(&b).unwrap();
    assert_eq!(box_a, BBox::new(0, 0, 1, 3));
    assert_eq!(box_b, BBox::new(0, 2, 1, 5));
    assert_eq!(box_a.intersection(&box_b).area(), 1);
    assert_abs_diff_eq!(box_a.iou(&box_b), 0.2, epsilon = 1e-12);
}
