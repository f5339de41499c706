// Matrix engine: shapes, arithmetic, reductions, equality, and the debug
// dump format.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lodestone_nn::{Matrix, MatrixError};

fn random_matrix(rng: &mut StdRng, nrow: usize, ncol: usize) -> Matrix {
    Matrix::with_generator(nrow, ncol, || rng.gen::<f64>() * 2.0 - 1.0)
}

#[test]
fn dot_produces_outer_shape() {
    let a = Matrix::zeros(3, 4);
    let b = Matrix::zeros(4, 2);
    let c = a.dot(&b).unwrap();
    assert_eq!((c.nrow, c.ncol), (3, 2));
}

#[test]
fn dot_known_values() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let b = Matrix::from_rows(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
    let c = a.dot(&b).unwrap();
    assert_eq!(c, Matrix::from_rows(vec![vec![19.0, 22.0], vec![43.0, 50.0]]));
}

#[test]
fn dot_rejects_inner_dim_mismatch() {
    let a = Matrix::zeros(3, 4);
    let b = Matrix::zeros(3, 2);
    assert!(matches!(
        a.dot(&b),
        Err(MatrixError::ShapeMismatch { .. })
    ));
}

#[test]
fn dot_is_associative_within_tolerance() {
    let mut rng = StdRng::seed_from_u64(11);
    let a = random_matrix(&mut rng, 3, 4);
    let b = random_matrix(&mut rng, 4, 5);
    let c = random_matrix(&mut rng, 5, 2);

    let left = a.dot(&b).unwrap().dot(&c).unwrap();
    let right = a.dot(&b.dot(&c).unwrap()).unwrap();

    assert_eq!((left.nrow, left.ncol), (right.nrow, right.ncol));
    for (x, y) in left.data().iter().zip(right.data()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-6);
    }
}

#[test]
fn transpose_swaps_dims_and_is_involutive() {
    let mut rng = StdRng::seed_from_u64(3);
    let a = random_matrix(&mut rng, 4, 7);
    let at = a.transpose();
    assert_eq!((at.nrow, at.ncol), (7, 4));
    assert_eq!(at[(2, 3)], a[(3, 2)]);
    assert_eq!(a.t().t(), a);
}

#[test]
fn additive_and_multiplicative_identities() {
    let mut rng = StdRng::seed_from_u64(5);
    let a = random_matrix(&mut rng, 3, 3);

    let zeros = Matrix::zeros(3, 3);
    let mut ones = Matrix::zeros(3, 3);
    ones.set_ones();

    assert_eq!(&a + &zeros, a);
    assert_eq!(&a * &ones, a);
    assert_eq!(&a - &a, zeros);
}

#[test]
fn elementwise_division() {
    let a = Matrix::from_rows(vec![vec![6.0, 9.0]]);
    let b = Matrix::from_rows(vec![vec![2.0, 3.0]]);
    assert_eq!(&a / &b, Matrix::from_rows(vec![vec![3.0, 3.0]]));
}

#[test]
#[should_panic(expected = "division by zero")]
fn elementwise_division_by_zero_element_panics() {
    let a = Matrix::from_rows(vec![vec![6.0, 9.0]]);
    let b = Matrix::from_rows(vec![vec![2.0, 0.0]]);
    let _ = &a / &b;
}

#[test]
#[should_panic(expected = "shape mismatch")]
fn elementwise_add_shape_mismatch_panics() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(3, 2);
    let _ = &a + &b;
}

#[test]
fn scalar_broadcasts() {
    let a = Matrix::from_rows(vec![vec![1.0, -2.0]]);
    assert_eq!(&a + 1.0, Matrix::from_rows(vec![vec![2.0, -1.0]]));
    assert_eq!(&a - 1.0, Matrix::from_rows(vec![vec![0.0, -3.0]]));
    assert_eq!(&a * 2.0, Matrix::from_rows(vec![vec![2.0, -4.0]]));
    assert_eq!(&a / 2.0, Matrix::from_rows(vec![vec![0.5, -1.0]]));
    assert_eq!(-&a, Matrix::from_rows(vec![vec![-1.0, 2.0]]));
}

#[test]
#[should_panic(expected = "division by zero")]
fn scalar_division_by_zero_panics() {
    let a = Matrix::zeros(2, 2);
    let _ = &a / 0.0;
}

#[test]
fn compound_assignments() {
    let mut a = Matrix::from_rows(vec![vec![1.0, 2.0]]);
    let b = Matrix::from_rows(vec![vec![3.0, 4.0]]);

    a += &b;
    assert_eq!(a, Matrix::from_rows(vec![vec![4.0, 6.0]]));
    a -= &b;
    assert_eq!(a, Matrix::from_rows(vec![vec![1.0, 2.0]]));
    a *= &b;
    assert_eq!(a, Matrix::from_rows(vec![vec![3.0, 8.0]]));

    a *= 2.0;
    assert_eq!(a, Matrix::from_rows(vec![vec![6.0, 16.0]]));
    a /= 2.0;
    assert_eq!(a, Matrix::from_rows(vec![vec![3.0, 8.0]]));
    a += 1.0;
    assert_eq!(a, Matrix::from_rows(vec![vec![4.0, 9.0]]));
    a -= 1.0;
    assert_eq!(a, Matrix::from_rows(vec![vec![3.0, 8.0]]));
}

#[test]
fn max_element_and_index_scan_row_major() {
    let a = Matrix::from_rows(vec![vec![1.0, 5.0, 2.0], vec![0.0, 5.0, -3.0]]);
    assert_eq!(a.max_element().unwrap(), 5.0);
    // Tie between (0, 1) and (1, 1): the lower linear index wins.
    assert_eq!(a.max_index().unwrap(), (0, 1));
}

#[test]
fn reductions_on_empty_matrix_fail() {
    let e = Matrix::empty();
    assert!(matches!(e.max_element(), Err(MatrixError::EmptyOperand)));
    assert!(matches!(e.max_index(), Err(MatrixError::EmptyOperand)));
}

#[test]
fn equality_uses_absolute_tolerance() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0]]);
    let close = Matrix::from_rows(vec![vec![1.0 + 1e-11, 2.0]]);
    let far = Matrix::from_rows(vec![vec![1.0 + 1e-9, 2.0]]);
    let reshaped = Matrix::from_vec(vec![1.0, 2.0], 2, 1);

    assert_eq!(a, close);
    assert_ne!(a, far);
    assert_ne!(a, reshaped);
}

#[test]
fn resize_discards_elements_and_changes_shape() {
    let mut a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    a.resize(3, 1);
    assert_eq!((a.nrow, a.ncol), (3, 1));
    assert!(a.data().iter().all(|&x| x == 0.0));
}

#[test]
fn row_extraction() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(a.row(1), Matrix::from_rows(vec![vec![3.0, 4.0]]));
}

#[test]
#[should_panic(expected = "do not fill")]
fn from_vec_rejects_wrong_element_count() {
    let _ = Matrix::from_vec(vec![1.0, 2.0, 3.0], 2, 2);
}

#[test]
fn generator_fill_is_ordered_row_major() {
    let mut counter = 0.0;
    let a = Matrix::with_generator(2, 2, || {
        counter += 1.0;
        counter
    });
    assert_eq!(a.data(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn initializers_produce_finite_values() {
    let h = Matrix::he(8, 16);
    let x = Matrix::xavier(8, 16);
    assert_eq!((h.nrow, h.ncol), (8, 16));
    assert_eq!((x.nrow, x.ncol), (8, 16));
    assert!(h.data().iter().all(|v| v.is_finite()));
    assert!(x.data().iter().all(|v| v.is_finite()));
}

#[test]
fn display_dumps_six_decimal_rows() {
    let a = Matrix::from_rows(vec![vec![1.0, 2.5], vec![-3.0, 4.0]]);
    assert_eq!(
        a.to_string(),
        "[[1.000000,2.500000],\n[-3.000000,4.000000]]"
    );
}
