use super::{BoxedLinearSolver, DenseLUSolver, SparseLUSolver};
use crate::algebra::FloatT;
use crate::solver::core::ConfigError;

// Maps the user's `direct_solve_method` string to a backend
// constructor.  Rust has no dispatch on symbols, so a match it is.

type LinearSolverConstructor<T> = fn(T) -> BoxedLinearSolver<T>;

/// backend names recognised by [`get_linear_solver`]
pub(crate) const LINEAR_SOLVER_NAMES: [&str; 3] = ["auto", "sparselu", "dense"];

fn _get_constructor<T: FloatT>(method: &str) -> Option<LinearSolverConstructor<T>> {
    let ctor: LinearSolverConstructor<T> = match method {
        "auto" | "sparselu" => |tol| Box::new(SparseLUSolver::new(tol)),
        "dense" => |_| Box::new(DenseLUSolver::new()),
        _ => return None,
    };
    Some(ctor)
}

/// Check that `method` names a known backend without constructing it
pub(crate) fn check_linear_solver_name(method: &str) -> Result<(), ConfigError> {
    if LINEAR_SOLVER_NAMES.contains(&method) {
        Ok(())
    } else {
        Err(ConfigError::LinearSolverProblem {
            solver: method.to_string(),
            problem: "not recognized",
        })
    }
}

/// Construct the backend named by `method`.  The pivot tolerance is
/// used only by backends with threshold pivoting.
pub(crate) fn get_linear_solver<T: FloatT>(
    method: &str,
    pivot_tol: T,
) -> Result<BoxedLinearSolver<T>, ConfigError> {
    let ctor = _get_constructor::<T>(method).ok_or_else(|| ConfigError::LinearSolverProblem {
        solver: method.to_string(),
        problem: "not recognized",
    })?;
    Ok(ctor(pivot_tol))
}

#[test]
fn test_linear_solver_config() {
    for name in LINEAR_SOLVER_NAMES {
        let solver = get_linear_solver::<f64>(name, 0.1).unwrap();
        assert!(!solver.is_initialized());
    }
    assert_eq!(
        get_linear_solver::<f64>("auto", 0.1).unwrap().name(),
        "sparselu"
    );
    assert_eq!(
        get_linear_solver::<f64>("dense", 0.1).unwrap().name(),
        "dense"
    );

    let err = get_linear_solver::<f64>("pardiso", 0.1).err().unwrap();
    assert!(matches!(err, ConfigError::LinearSolverProblem { .. }));
    assert!(check_linear_solver_name("mumps").is_err());
}
