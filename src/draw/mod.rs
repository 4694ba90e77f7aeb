// Draw engine: the Idle/Drawing state machine, its animation ticker, and the
// injected randomness used for both the rolling display and final selection.

pub mod engine;
pub mod sampler;
pub mod ticker;
