use chrono::{Local, NaiveTime};

use crate::domain::Clock;

// Local wall-clock time, as shown in the log panel.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local_time(&self) -> NaiveTime {
        Local::now().time()
    }
}
