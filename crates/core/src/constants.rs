/// Length of the cooling-off window after an investment is created, during
/// which the investor may unilaterally cancel for a full reversal.
pub const COOLING_OFF_HOURS: i64 = 48;

/// Reserved actor id recorded on scheduler-driven campaign transitions.
pub const SCHEDULER_ACTOR_ID: &str = "SYSTEM_SCHEDULER";

/// Default interval between scheduler ticks, in seconds.
pub const DEFAULT_SCHEDULER_INTERVAL_SECS: u64 = 60;
