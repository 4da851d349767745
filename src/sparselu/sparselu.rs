#![allow(non_snake_case)]
use crate::algebra::*;
use derive_builder::Builder;
use std::iter::zip;
use thiserror::Error;

// marker for rows not yet chosen as a pivot
const UNKNOWN: usize = usize::MAX;

/// Error codes returnable from [`SparseLUFactorisation`](SparseLUFactorisation) operations

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseLUError {
    #[error("Matrix dimension fields are incompatible")]
    IncompatibleDimension,
    #[error("Matrix is structurally or numerically singular at column {0}")]
    SingularMatrix(usize),
    #[error("Invalid permutation vector")]
    InvalidPermutation,
    #[error("Fill reducing ordering failed")]
    OrderingFailed,
    #[error("Matrix has not been numerically factored")]
    NotFactored,
}

/// Required settings for [`SparseLUFactorisation`](SparseLUFactorisation)

#[derive(Builder, Debug, Clone)]
pub struct SparseLUSettings<T: FloatT> {
    /// threshold for accepting the diagonal entry as pivot, relative
    /// to the largest candidate in its column.  1.0 gives partial pivoting.
    #[builder(default = "(0.1).as_T()")]
    pivot_tol: T,
    #[builder(default = "1.0")]
    amd_dense_scale: f64,
    /// user supplied column ordering.  AMD is used if none.
    #[builder(default = "None", setter(strip_option))]
    perm: Option<Vec<usize>>,
}

impl<T> Default for SparseLUSettings<T>
where
    T: FloatT,
{
    fn default() -> SparseLUSettings<T> {
        SparseLUSettingsBuilder::<T>::default().build().unwrap()
    }
}

/// Performs $PAQ = LU$ factorization of a square sparse matrix

#[derive(Debug)]
pub struct SparseLUFactorisation<T = f64> {
    /// column ordering.  Step `k` eliminates column `q[k]` of A
    pub q: Vec<usize>,
    /// inverse row permutation.  Row `i` of A is pivot row `pinv[i]`
    pub pinv: Vec<usize>,
    /// unit lower triangular factor, diagonal stored first in each column
    pub L: CscMatrix<T>,
    /// upper triangular factor, diagonal stored last in each column
    pub U: CscMatrix<T>,
    pivot_tol: T,
    workspace: SparseLUWorkspace<T>,
    is_factored: bool,
}

#[derive(Debug)]
struct SparseLUWorkspace<T> {
    // dense accumulator for the current column
    x: Vec<T>,
    // reach of the current column, stored in xi[top..n]
    xi: Vec<usize>,
    // dfs stack and per-node edge pointers
    stack: Vec<usize>,
    pstack: Vec<usize>,
    marked: Vec<bool>,
}

impl<T> SparseLUWorkspace<T>
where
    T: FloatT,
{
    fn new(n: usize) -> Self {
        Self {
            x: vec![T::zero(); n],
            xi: vec![0; n],
            stack: Vec::with_capacity(n),
            pstack: vec![0; n],
            marked: vec![false; n],
        }
    }
}

impl<T> SparseLUFactorisation<T>
where
    T: FloatT,
{
    /// Symbolic setup.  Computes the column ordering and allocates
    /// workspace, but does not factor.  Call
    /// [`refactor`](SparseLUFactorisation::refactor) before solving.
    pub fn new(
        A: &CscMatrix<T>,
        opts: Option<SparseLUSettings<T>>,
    ) -> Result<SparseLUFactorisation<T>, SparseLUError> {
        check_structure(A)?;

        let n = A.nrows();
        let opts = opts.unwrap_or_default();

        let q = match opts.perm {
            Some(perm) => {
                _invperm(&perm)?;
                perm
            }
            None => _get_amd_ordering(A, opts.amd_dense_scale)?,
        };

        // factors usually need more than the input, but grow on demand
        let guess = 2 * A.nnz() + n;
        let L = _csc_with_capacity(n, guess);
        let U = _csc_with_capacity(n, guess);

        Ok(SparseLUFactorisation {
            q,
            pinv: vec![UNKNOWN; n],
            L,
            U,
            pivot_tol: opts.pivot_tol,
            workspace: SparseLUWorkspace::new(n),
            is_factored: false,
        })
    }

    /// dimension of the factored matrix
    pub fn n(&self) -> usize {
        self.q.len()
    }

    /// total number of nonzeros in L and U
    pub fn nnz(&self) -> usize {
        if self.is_factored {
            self.L.nnz() + self.U.nnz()
        } else {
            0
        }
    }

    /// Numeric factorization of `A`.  The pattern of `A` may differ
    /// from the one used at setup, but the dimension may not.
    pub fn refactor(&mut self, A: &CscMatrix<T>) -> Result<(), SparseLUError> {
        if A.nrows() != self.n() || A.ncols() != self.n() {
            return Err(SparseLUError::IncompatibleDimension);
        }
        self.is_factored = false;
        _factor(
            A,
            &self.q,
            self.pivot_tol,
            &mut self.pinv,
            &mut self.L,
            &mut self.U,
            &mut self.workspace,
        )?;
        self.is_factored = true;
        Ok(())
    }

    /// Solves `Ax = b` in place (x replaces b)
    pub fn solve(&mut self, b: &mut [T]) -> Result<(), SparseLUError> {
        self.check_solve(b)?;
        let x = &mut self.workspace.x;

        _ipermute(x, b, &self.pinv);
        _lsolve(&self.L, x);
        _usolve(&self.U, x);
        _ipermute(b, x, &self.q);
        x.fill(T::zero());
        Ok(())
    }

    /// Solves `A^T x = b` in place (x replaces b)
    pub fn solve_transposed(&mut self, b: &mut [T]) -> Result<(), SparseLUError> {
        self.check_solve(b)?;
        let x = &mut self.workspace.x;

        _permute(x, b, &self.q);
        _utsolve(&self.U, x);
        _ltsolve(&self.L, x);
        _permute(b, x, &self.pinv);
        x.fill(T::zero());
        Ok(())
    }

    fn check_solve(&self, b: &[T]) -> Result<(), SparseLUError> {
        if !self.is_factored {
            return Err(SparseLUError::NotFactored);
        }
        if b.len() != self.n() {
            return Err(SparseLUError::IncompatibleDimension);
        }
        Ok(())
    }
}

fn check_structure<T: FloatT>(A: &CscMatrix<T>) -> Result<(), SparseLUError> {
    if !A.is_square() || A.nrows() == 0 {
        return Err(SparseLUError::IncompatibleDimension);
    }
    if A.check_format().is_err() {
        return Err(SparseLUError::IncompatibleDimension);
    }
    Ok(())
}

fn _csc_with_capacity<T: FloatT>(n: usize, nnz: usize) -> CscMatrix<T> {
    CscMatrix {
        m: n,
        n,
        colptr: vec![0; n + 1],
        rowval: Vec::with_capacity(nnz),
        nzval: Vec::with_capacity(nnz),
    }
}

fn _factor<T: FloatT>(
    A: &CscMatrix<T>,
    q: &[usize],
    tol: T,
    pinv: &mut [usize],
    L: &mut CscMatrix<T>,
    U: &mut CscMatrix<T>,
    work: &mut SparseLUWorkspace<T>,
) -> Result<(), SparseLUError> {
    let n = A.n;

    pinv.fill(UNKNOWN);
    L.rowval.clear();
    L.nzval.clear();
    U.rowval.clear();
    U.nzval.clear();
    work.x.fill(T::zero());

    for k in 0..n {
        L.colptr[k] = L.rowval.len();
        U.colptr[k] = U.rowval.len();

        // x = L \ A(:,col), restricted to the reach of A(:,col)
        let col = q[k];
        let top = _spsolve(L, A, col, pinv, work);

        // find the largest candidate pivot and move the
        // entries in pivotal rows into U
        let mut ipiv = UNKNOWN;
        let mut amax = -T::one();
        for &i in &work.xi[top..n] {
            if pinv[i] == UNKNOWN {
                let t = T::abs(work.x[i]);
                if t > amax {
                    amax = t;
                    ipiv = i;
                }
            } else {
                U.rowval.push(pinv[i]);
                U.nzval.push(work.x[i]);
            }
        }
        if ipiv == UNKNOWN || !(amax > T::zero()) || !amax.is_finite() {
            return Err(SparseLUError::SingularMatrix(k));
        }

        // prefer the diagonal if it is large enough
        if pinv[col] == UNKNOWN && T::abs(work.x[col]) >= amax * tol {
            ipiv = col;
        }

        let pivot = work.x[ipiv];
        U.rowval.push(k);
        U.nzval.push(pivot);
        pinv[ipiv] = k;
        L.rowval.push(ipiv);
        L.nzval.push(T::one());

        for &i in &work.xi[top..n] {
            if pinv[i] == UNKNOWN {
                L.rowval.push(i);
                L.nzval.push(work.x[i] / pivot);
            }
            work.x[i] = T::zero();
        }
    }
    L.colptr[n] = L.rowval.len();
    U.colptr[n] = U.rowval.len();

    // L was built with original row indices
    L.rowval.iter_mut().for_each(|r| *r = pinv[*r]);

    Ok(())
}

// sparse triangular solve x = L \ A(:,col) with L partially built.
// Returns top, with the nonzero pattern of x in xi[top..n]
fn _spsolve<T: FloatT>(
    L: &CscMatrix<T>,
    A: &CscMatrix<T>,
    col: usize,
    pinv: &[usize],
    work: &mut SparseLUWorkspace<T>,
) -> usize {
    let n = A.n;
    let top = _reach(L, A, col, pinv, work);

    let x = &mut work.x;
    for &i in &work.xi[top..n] {
        x[i] = T::zero();
    }
    for p in A.colptr[col]..A.colptr[col + 1] {
        x[A.rowval[p]] = A.nzval[p];
    }

    for &j in &work.xi[top..n] {
        let J = pinv[j];
        if J == UNKNOWN {
            continue;
        }
        // unit diagonal is stored first
        let xj = x[j];
        for p in (L.colptr[J] + 1)..L.colptr[J + 1] {
            x[L.rowval[p]] -= L.nzval[p] * xj;
        }
    }
    top
}

// nonzero pattern of L \ A(:,col), in topological order
fn _reach<T: FloatT>(
    L: &CscMatrix<T>,
    A: &CscMatrix<T>,
    col: usize,
    pinv: &[usize],
    work: &mut SparseLUWorkspace<T>,
) -> usize {
    let n = A.n;
    let mut top = n;

    for p in A.colptr[col]..A.colptr[col + 1] {
        let i = A.rowval[p];
        if !work.marked[i] {
            top = _dfs(i, L, top, pinv, work);
        }
    }
    for &i in &work.xi[top..n] {
        work.marked[i] = false;
    }
    top
}

fn _dfs<T: FloatT>(
    start: usize,
    L: &CscMatrix<T>,
    mut top: usize,
    pinv: &[usize],
    work: &mut SparseLUWorkspace<T>,
) -> usize {
    let SparseLUWorkspace {
        xi,
        stack,
        pstack,
        marked,
        ..
    } = work;

    stack.clear();
    stack.push(start);

    while let Some(&j) = stack.last() {
        // columns of L exist only for rows already pivotal
        let jnew = pinv[j];
        let (p1, p2) = if jnew == UNKNOWN {
            (0, 0)
        } else {
            (L.colptr[jnew], L.colptr[jnew + 1])
        };
        if !marked[j] {
            marked[j] = true;
            pstack[j] = p1;
        }

        let mut done = true;
        while pstack[j] < p2 {
            let i = L.rowval[pstack[j]];
            pstack[j] += 1;
            if !marked[i] {
                stack.push(i);
                done = false;
                break;
            }
        }
        if done {
            stack.pop();
            top -= 1;
            xi[top] = j;
        }
    }
    top
}

// L x = b, L unit lower with diagonal first
fn _lsolve<T: FloatT>(L: &CscMatrix<T>, x: &mut [T]) {
    for j in 0..L.n {
        x[j] /= L.nzval[L.colptr[j]];
        let xj = x[j];
        for p in (L.colptr[j] + 1)..L.colptr[j + 1] {
            x[L.rowval[p]] -= L.nzval[p] * xj;
        }
    }
}

// L^T x = b
fn _ltsolve<T: FloatT>(L: &CscMatrix<T>, x: &mut [T]) {
    for j in (0..L.n).rev() {
        for p in (L.colptr[j] + 1)..L.colptr[j + 1] {
            x[j] -= L.nzval[p] * x[L.rowval[p]];
        }
        x[j] /= L.nzval[L.colptr[j]];
    }
}

// U x = b, U upper with diagonal last
fn _usolve<T: FloatT>(U: &CscMatrix<T>, x: &mut [T]) {
    for j in (0..U.n).rev() {
        let d = U.colptr[j + 1] - 1;
        x[j] /= U.nzval[d];
        let xj = x[j];
        for p in U.colptr[j]..d {
            x[U.rowval[p]] -= U.nzval[p] * xj;
        }
    }
}

// U^T x = b
fn _utsolve<T: FloatT>(U: &CscMatrix<T>, x: &mut [T]) {
    for j in 0..U.n {
        let d = U.colptr[j + 1] - 1;
        for p in U.colptr[j]..d {
            x[j] -= U.nzval[p] * x[U.rowval[p]];
        }
        x[j] /= U.nzval[d];
    }
}

fn _invperm(p: &[usize]) -> Result<Vec<usize>, SparseLUError> {
    let mut b = vec![UNKNOWN; p.len()];

    for (i, &j) in p.iter().enumerate() {
        if j < p.len() && b[j] == UNKNOWN {
            b[j] = i;
        } else {
            return Err(SparseLUError::InvalidPermutation);
        }
    }
    Ok(b)
}

// internal permutation and inverse permutation
// functions that require no memory allocations

fn _permute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, x).for_each(|(p, x)| *x = b[*p]);
}

fn _ipermute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, b).for_each(|(p, b)| x[*p] = *b);
}

fn _get_amd_ordering<T: FloatT>(
    A: &CscMatrix<T>,
    amd_dense_scale: f64,
) -> Result<Vec<usize>, SparseLUError> {
    // AMD orders the pattern of A + A^T, which for the
    // structurally symmetric KKT systems is the pattern itself
    let mut control = amd::Control::default();
    control.dense *= amd_dense_scale;
    let (perm, _iperm, _info) = amd::order(A.nrows(), &A.colptr, &A.rowval, &control)
        .map_err(|_| SparseLUError::OrderingFailed)?;
    Ok(perm)
}

//configure tests of internals
#[path = "test.rs"]
#[cfg(test)]
mod test;
