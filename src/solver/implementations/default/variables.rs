use super::*;
use crate::algebra::*;
use crate::solver::core::linsolvers::LinearSolverError;
use itertools::izip;
use std::iter::zip;

/// A vector partitioned as `[x; λ; s]` with lengths `nx`, `nl` and `nx`.
///
/// Used for the iterate, the Newton direction and the residuals.  The
/// partitions are index ranges into one buffer so that the whole vector
/// can be handed to a linear solver without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct IpmVector<T> {
    pub data: Vec<T>,
    nx: usize,
    nl: usize,
}

impl<T> IpmVector<T>
where
    T: FloatT,
{
    pub fn new(nx: usize, nl: usize) -> Self {
        Self {
            data: vec![T::zero(); 2 * nx + nl],
            nx,
            nl,
        }
    }

    pub fn x(&self) -> &[T] {
        &self.data[..self.nx]
    }

    pub fn l(&self) -> &[T] {
        &self.data[self.nx..self.nx + self.nl]
    }

    pub fn s(&self) -> &[T] {
        &self.data[self.nx + self.nl..]
    }

    pub fn x_mut(&mut self) -> &mut [T] {
        &mut self.data[..self.nx]
    }

    pub fn s_mut(&mut self) -> &mut [T] {
        let off = self.nx + self.nl;
        &mut self.data[off..]
    }

    /// the three partitions, in order
    pub fn split(&self) -> (&[T], &[T], &[T]) {
        let (x, rest) = self.data.split_at(self.nx);
        let (l, s) = rest.split_at(self.nl);
        (x, l, s)
    }

    /// the three partitions, in order, mutably
    pub fn split_mut(&mut self) -> (&mut [T], &mut [T], &mut [T]) {
        let (x, rest) = self.data.split_at_mut(self.nx);
        let (l, s) = rest.split_at_mut(self.nl);
        (x, l, s)
    }

    /// Heuristic starting point.
    ///
    /// Takes the least norm solution of `Ax = b` and the least squares
    /// solution of `A^T λ + s = c`, then shifts `x` and `s` into the
    /// interior.  Both systems share one Cholesky factorization of `AA^T`.
    pub fn start_point(&mut self, data: &LinIpmProblemData<T>) -> Result<(), LinearSolverError> {
        let A = &data.A;
        let nl = data.nl;

        let mut AAt = Matrix::<T>::zeros((nl, nl));
        A.gram_into(&mut AAt);

        let mut chol = CholeskyEngine::<T>::new(nl);
        chol.cholesky(&AAt)
            .map_err(|e| LinearSolverError::Factorization {
                solver: "cholesky",
                reason: e.to_string(),
            })?;

        // d = (AA^T) \ b,  λ = (AA^T) \ Ac
        let mut d = data.b.clone();
        chol.solve(&mut d);

        let (x, l, s) = self.split_mut();
        A.gemv(l, &data.c, T::one(), T::zero());
        chol.solve(l);

        // x = A^T d,  s = c - A^T λ
        A.t().gemv(x, &d, T::one(), T::zero());
        s.copy_from(&data.c);
        A.t().gemv(s, l, -T::one(), T::one());

        // shift so that both are nonnegative
        let onehalf: T = (1.5).as_T();
        let δx = T::max(-onehalf * x.minimum(), T::zero());
        let δs = T::max(-onehalf * s.minimum(), T::zero());
        x.translate(δx);
        s.translate(δs);

        // then push both away from zero by an amount balancing x^T s.
        // The sums are zero only if a vector is already identically zero,
        // in which case no shift is applied.
        let xs = x.dot(s);
        let sumx = x.sum();
        let sums = s.sum();
        let half: T = (0.5).as_T();
        let δx = if sums > T::zero() { half * xs / sums } else { T::zero() };
        let δs = if sumx > T::zero() { half * xs / sumx } else { T::zero() };
        x.translate(δx);
        s.translate(δs);

        Ok(())
    }

    /// Largest steps `(αx, αs)` along `-dy` that keep `x` and `s`
    /// nonnegative.   Infinite when the direction never reaches the boundary.
    pub fn ratio_test(&self, dy: &IpmVector<T>) -> (T, T) {
        (_ratio(self.x(), dy.x()), _ratio(self.s(), dy.s()))
    }

    /// complementarity after trial steps `αp` in x and `αd` in s
    pub fn mu_affine(&self, dy: &IpmVector<T>, αp: T, αd: T) -> T {
        let (x, _, s) = self.split();
        let (dx, _, ds) = dy.split();

        let mut sum = T::zero();
        for (&x, &dx, &s, &ds) in izip!(x, dx, s, ds) {
            sum += (x - αp * dx) * (s - αd * ds);
        }
        let n: T = self.nx.as_T();
        sum / n
    }

    /// Take a step along `-dy`, with `αp` for x and `αd` for λ and s
    pub fn add_step(&mut self, dy: &IpmVector<T>, αp: T, αd: T) {
        let (x, l, s) = self.split_mut();
        let (dx, dl, ds) = dy.split();

        x.axpby(-αp, dx, T::one());
        l.axpby(-αd, dl, T::one());
        s.axpby(-αd, ds, T::one());
    }
}

fn _ratio<T: FloatT>(v: &[T], dv: &[T]) -> T {
    zip(v, dv)
        .filter(|&(_, &dv)| dv > T::zero())
        .fold(T::infinity(), |α, (&v, &dv)| T::min(α, v / dv))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipmvector_partitions() {
        let mut v = IpmVector::<f64>::new(2, 1);
        v.data.copy_from_slice(&[1., 2., 3., 4., 5.]);
        assert_eq!(v.x(), &[1., 2.]);
        assert_eq!(v.l(), &[3.]);
        assert_eq!(v.s(), &[4., 5.]);

        let (x, l, s) = v.split_mut();
        x[0] = -1.;
        l[0] = -3.;
        s[1] = -5.;
        assert_eq!(v.data, vec![-1., 2., -3., 4., -5.]);

        v.s_mut().set(0.);
        v.x_mut().set(7.);
        assert_eq!(v.data, vec![7., 7., -3., 0., 0.]);
    }

    #[test]
    fn test_ratio_test() {
        let mut y = IpmVector::<f64>::new(3, 1);
        y.data.copy_from_slice(&[1., 2., 4., 0., 1., 1., 1.]);

        let mut dy = IpmVector::<f64>::new(3, 1);
        dy.data.copy_from_slice(&[0.5, -1., 8., 100., -1., -2., -3.]);

        let (αx, αs) = y.ratio_test(&dy);
        assert_eq!(αx, 0.5);
        assert_eq!(αs, f64::INFINITY);
    }

    #[test]
    fn test_add_step() {
        let mut y = IpmVector::<f64>::new(1, 1);
        y.data.copy_from_slice(&[1., 1., 1.]);
        let mut dy = IpmVector::<f64>::new(1, 1);
        dy.data.copy_from_slice(&[1., 2., 4.]);

        assert_eq!(y.mu_affine(&dy, 0.5, 0.25), 0.);
        y.add_step(&dy, 0.5, 0.25);
        assert_eq!(y.data, vec![0.5, 0.5, 0.]);
    }

    #[test]
    fn test_start_point() {
        // x1 + x2 = 4, c = (-1, -2)
        let A = CscMatrix::from(&[[1., 1.]]);
        let data = LinIpmProblemData::new(&A, &[4.], &[-1., -2.]).unwrap();
        let mut y = IpmVector::<f64>::new(2, 1);
        y.start_point(&data).unwrap();

        assert!(y.x().iter().all(|&v| v > 0.));
        assert!(y.s().iter().all(|&v| v > 0.));

        // least squares multiplier
        assert!((y.l()[0] + 1.5).abs() < 1e-14);
    }

    #[test]
    fn test_start_point_rank_deficient() {
        // duplicated rows make AA^T exactly singular
        let A = CscMatrix::from(&[[1., 0.], [1., 0.]]);
        let data = LinIpmProblemData::new(&A, &[1., 1.], &[1., 1.]).unwrap();
        let mut y = IpmVector::<f64>::new(2, 2);
        let err = y.start_point(&data).unwrap_err();
        assert!(matches!(
            err,
            LinearSolverError::Factorization {
                solver: "cholesky",
                ..
            }
        ));
    }
}
