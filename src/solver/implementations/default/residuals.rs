use super::*;
use crate::algebra::*;

/// KKT residuals and the scalar measures derived from them.
///
/// The residual vector `r = [rx; rl; rs]` doubles as the right hand side of
/// the Newton system, so it is modified in place by the corrector step.
#[derive(Debug, Clone)]
pub struct LinIpmResiduals<T> {
    /// `[A^T λ + s - c;  Ax - b;  x∘s]`
    pub r: IpmVector<T>,
    /// duality measure `x^T s / nx`
    pub mu: T,
    /// primal objective `c^T x`
    pub ctx: T,
    /// dual objective `b^T λ`
    pub btl: T,
    /// relative duality gap `|c^T x - b^T λ| / (1 + |c^T x|)`
    pub gap_rel: T,
    /// `‖Ax - b‖∞`
    pub res_primal: T,
    /// `‖A^T λ + s - c‖∞`
    pub res_dual: T,
}

impl<T> LinIpmResiduals<T>
where
    T: FloatT,
{
    pub fn new(nx: usize, nl: usize) -> Self {
        Self {
            r: IpmVector::new(nx, nl),
            mu: T::zero(),
            ctx: T::zero(),
            btl: T::zero(),
            gap_rel: T::zero(),
            res_primal: T::zero(),
            res_dual: T::zero(),
        }
    }

    pub fn update(&mut self, variables: &IpmVector<T>, data: &LinIpmProblemData<T>) {
        let (x, l, s) = variables.split();
        let (rx, rl, rs) = self.r.split_mut();
        let A = &data.A;

        // rx = A^T λ + s - c
        rx.waxpby(T::one(), s, -T::one(), &data.c);
        A.t().gemv(rx, l, T::one(), T::one());

        // rl = Ax - b
        rl.copy_from(&data.b);
        A.gemv(rl, x, T::one(), -T::one());

        // rs = x∘s
        rs.copy_from(x).hadamard(s);

        let nx: T = data.nx.as_T();
        self.mu = rs.sum() / nx;
        self.ctx = data.c.dot(x);
        self.btl = data.b.dot(l);
        self.gap_rel = T::abs(self.ctx - self.btl) / (T::one() + T::abs(self.ctx));
        self.res_primal = rl.norm_inf();
        self.res_dual = rx.norm_inf();
    }

    /// Relative gap below `tol`.  With `check_feasibility` set, the
    /// scaled primal and dual residuals must also be below `tol_feas`.
    pub fn is_converged(&self, data: &LinIpmProblemData<T>, settings: &LinIpmSettings<T>) -> bool {
        if !(self.gap_rel < settings.tol) {
            return false;
        }
        if !settings.check_feasibility {
            return true;
        }
        self.res_primal / (T::one() + data.normb_inf) < settings.tol_feas
            && self.res_dual / (T::one() + data.normc_inf) < settings.tol_feas
    }
}
