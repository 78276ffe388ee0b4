//! Statistical and reproducibility properties of generated measurements.

use std::thread;

use approx::assert_abs_diff_eq;
use ndarray::{Array2, Axis, array};
use statesim_generator::{Generator, LinearGenerator};

fn fixed_two_channel(seed: u64) -> LinearGenerator {
    Generator::linear(
        seed,
        2,
        Array2::eye(2),
        array![0.25, 4.0],
        array![[1.0, 0.0], [2.0, 1.0]],
        array![[3.0], [-1.0]],
    )
    .unwrap()
}

#[test]
fn sample_mean_converges_to_projection() {
    let mut g = fixed_two_channel(42);
    let sim = g.simulate(20_000).unwrap();
    let mean = sim.mean_axis(Axis(0)).unwrap();

    // Sᵀ·H = [3·1 + (-1)·2, 3·0 + (-1)·1] = [1, -1]
    assert_abs_diff_eq!(mean[[0, 0]], 1.0, epsilon = 0.05);
    assert_abs_diff_eq!(mean[[0, 1]], -1.0, epsilon = 0.1);
}

#[test]
fn sample_variance_converges_to_p() {
    let mut g = fixed_two_channel(7);
    let sim = g.simulate(20_000).unwrap();
    let channels = sim.index_axis(Axis(1), 0);

    let var0 = channels.column(0).var(1.0);
    let var1 = channels.column(1).var(1.0);
    assert_abs_diff_eq!(var0, 0.25, epsilon = 0.02);
    assert_abs_diff_eq!(var1, 4.0, epsilon = 0.25);
}

#[test]
fn channels_are_uncorrelated() {
    let mut g = fixed_two_channel(99);
    let sim = g.simulate(20_000).unwrap();
    let m = sim.index_axis(Axis(1), 0);
    let a = m.column(0);
    let b = m.column(1);
    let (ma, mb) = (a.mean().unwrap(), b.mean().unwrap());
    let cov = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x - ma) * (y - mb))
        .sum::<f64>()
        / a.len() as f64;
    let corr = cov / (a.std(0.0) * b.std(0.0));
    assert!(corr.abs() < 0.05, "correlation {corr}");
}

#[test]
fn same_seed_same_sequence() {
    let mut a = fixed_two_channel(123);
    let mut b = fixed_two_channel(123);
    for _ in 0..500 {
        assert_eq!(a.generate().unwrap(), b.generate().unwrap());
    }
}

#[test]
fn different_seed_different_sequence() {
    let mut a = fixed_two_channel(1);
    let mut b = fixed_two_channel(2);
    let sa = a.simulate(10).unwrap();
    let sb = b.simulate(10).unwrap();
    assert_ne!(sa, sb);
}

#[test]
fn generators_do_not_share_a_stream() {
    // Interleaving another generator must not perturb this one.
    let mut reference = fixed_two_channel(5);
    let expected = reference.simulate(50).unwrap();

    let mut g = fixed_two_channel(5);
    let mut other = fixed_two_channel(5);
    for t in 0..50 {
        other.generate().unwrap();
        other.generate().unwrap();
        assert_eq!(g.generate().unwrap(), expected.index_axis(Axis(0), t));
    }
}

#[test]
fn independent_threads_are_reproducible() {
    let expected = fixed_two_channel(2024).simulate(200).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| fixed_two_channel(2024).simulate(200).unwrap()))
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}

#[test]
fn cloned_generator_continues_identically() {
    let mut a = fixed_two_channel(8);
    a.simulate(17).unwrap();
    let mut b = a.clone();
    assert_eq!(a.simulate(30).unwrap(), b.simulate(30).unwrap());
}

#[test]
fn noise_does_not_leak_into_state() {
    let mut g = Generator::linear(
        3,
        1,
        array![[0.5]],
        array![100.0],
        array![[1.0]],
        array![[64.0]],
    )
    .unwrap();
    for expected in [32.0, 16.0, 8.0, 4.0, 2.0] {
        g.generate().unwrap();
        assert_eq!(g.state_estimate(), &array![[expected]]);
    }
}
