// ---------------------------------
// enum for managing callbacks
// ---------------------------------

/// User callback called once per iteration with the current solver info.
/// Returning `true` stops the solve.
pub type TerminationCallback<I> = Box<dyn FnMut(&I) -> bool + Send>;

pub(crate) enum Callback<I> {
    None,
    Rust(TerminationCallback<I>),
}

impl<I> std::fmt::Debug for Callback<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Callback::None => write!(f, "Callback::None"),
            Callback::Rust(_) => write!(f, "Callback::Rust"),
        }
    }
}

impl<I> Callback<I> {
    // Call the callback function
    fn call(&mut self, info: &I) -> bool {
        match self {
            Callback::None => false,
            Callback::Rust(f) => f(info),
        }
    }
}

#[derive(Debug)]
pub(crate) struct SolverCallbacks<I> {
    /// callback for termination
    pub termination_callback: Callback<I>,
}

impl<I> Default for SolverCallbacks<I> {
    // Create a new set of callbacks
    fn default() -> Self {
        Self {
            termination_callback: Callback::None,
        }
    }
}

impl<I> SolverCallbacks<I> {
    pub(crate) fn check_termination(&mut self, info: &I) -> bool {
        // check termination conditions
        self.termination_callback.call(info)
    }
}

#[test]
fn test_callbacks() {
    let mut callbacks = SolverCallbacks::<u32>::default();
    assert!(!callbacks.check_termination(&7));

    let mut count = 0;
    callbacks.termination_callback = Callback::Rust(Box::new(move |i: &u32| {
        count += 1;
        count > 1 || *i > 10
    }));
    assert!(!callbacks.check_termination(&0));
    assert!(callbacks.check_termination(&0));
    assert_eq!(format!("{:?}", callbacks.termination_callback), "Callback::Rust");
}
