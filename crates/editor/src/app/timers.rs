//! Deterministic timers driven by the host clock

use std::time::Duration;

/// Cancellable handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    deadline: Duration,
    period: Option<Duration>,
    tag: T,
}

/// One-shot and repeating timers over an explicit clock.
///
/// Nothing fires on its own: the owner advances the clock and drains due
/// timers with [`Scheduler::pop_due`]. Timers are returned in deadline
/// order, ties broken by creation order.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            timers: Vec::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire once, `delay` from now
    pub fn schedule_once(&mut self, delay: Duration, tag: T) -> TimerId {
        self.insert(self.now + delay, None, tag)
    }

    /// Fire every `period`, first one `period` from now
    pub fn schedule_repeating(&mut self, period: Duration, tag: T) -> TimerId {
        let period = period.max(Duration::from_millis(1));
        self.insert(self.now + period, Some(period), tag)
    }

    /// Returns false if the timer already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Next timer due at or before `target`, moving the clock to its deadline.
    /// Repeating timers are rescheduled, one-shots removed.
    pub fn pop_due(&mut self, target: Duration) -> Option<(TimerId, T)> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= target)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[pos];
        let fired = (timer.id, timer.tag.clone());
        let deadline = timer.deadline;
        if let Some(period) = timer.period {
            timer.deadline += period;
        } else {
            self.timers.remove(pos);
        }
        self.now = self.now.max(deadline);
        Some(fired)
    }

    /// Move the clock forward without firing anything
    pub fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    fn insert(&mut self, deadline: Duration, period: Option<Duration>, tag: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            deadline,
            period,
            tag,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn drain(s: &mut Scheduler<&'static str>, until: Duration) -> Vec<(Duration, &'static str)> {
        let mut out = Vec::new();
        while let Some((_, tag)) = s.pop_due(until) {
            out.push((s.now(), tag));
        }
        s.set_now(until);
        out
    }

    #[test]
    fn test_once_fires_once() {
        let mut s = Scheduler::default();
        let id = s.schedule_once(ms(1000), "once");
        assert!(drain(&mut s, ms(999)).is_empty());
        assert_eq!(drain(&mut s, ms(1000)), vec![(ms(1000), "once")]);
        assert!(!s.is_active(id));
        assert!(drain(&mut s, ms(5000)).is_empty());
    }

    #[test]
    fn test_repeating_catches_up_in_order() {
        let mut s = Scheduler::default();
        s.schedule_repeating(ms(100), "tick");
        s.schedule_once(ms(250), "once");
        let fired = drain(&mut s, ms(300));
        assert_eq!(
            fired,
            vec![
                (ms(100), "tick"),
                (ms(200), "tick"),
                (ms(250), "once"),
                (ms(300), "tick"),
            ]
        );
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::default();
        let id = s.schedule_repeating(ms(10), "tick");
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(drain(&mut s, ms(100)).is_empty());
    }

    #[test]
    fn test_clock_never_goes_back() {
        let mut s: Scheduler<()> = Scheduler::default();
        s.set_now(ms(50));
        s.set_now(ms(10));
        assert_eq!(s.now(), ms(50));
    }
}
