mod countdown;
mod mode;
mod progress;

pub use countdown::{Countdown, PendingSwitch};
pub use mode::{Durations, Mode};
pub use progress::{format_clock, ProgressRing};
