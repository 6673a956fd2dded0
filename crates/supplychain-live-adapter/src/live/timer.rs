/*
[INPUT]:  Timeout/interval requests from the live client
[OUTPUT]: Next deadline for the driver's select loop, due timer ids
[POS]:    Live layer - tokio-clock Scheduler implementation
[UPDATE]: When changing timer semantics
*/

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::time::Instant;

use super::ports::{Scheduler, TimerId};

#[derive(Debug, Clone, Copy)]
struct Timer {
    deadline: Instant,
    period: Option<Duration>,
}

/// Timer table polled by the driver.
///
/// Uses `tokio::time::Instant`, so paused-clock tests can advance it.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|timer| timer.deadline).min()
    }

    /// Remove due timeouts and re-arm due intervals.
    ///
    /// Ids come back in deadline order; an interval fires once per call even
    /// if several periods were missed.
    pub fn pop_due(&mut self, now: Instant) -> Vec<TimerId> {
        let mut due: Vec<(Instant, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.deadline <= now)
            .map(|(id, timer)| (timer.deadline, *id))
            .collect();
        due.sort();

        for (_, id) in &due {
            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };
            match timer.period {
                Some(period) => {
                    let mut next = timer.deadline + period;
                    if next <= now {
                        next = now + period;
                    }
                    timer.deadline = next;
                }
                None => {
                    self.timers.remove(id);
                }
            }
        }

        due.into_iter().map(|(_, id)| id).collect()
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>) -> TimerId {
        self.next_id += 1;
        let id = TimerId::new(self.next_id);
        self.timers.insert(
            id,
            Timer {
                deadline: Instant::now() + delay,
                period,
            },
        );
        id
    }
}

impl Scheduler for TimerQueue {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.insert(delay, None)
    }

    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.insert(period, Some(period))
    }

    fn clear(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}
