mod timers;
pub(crate) use timers::*;
