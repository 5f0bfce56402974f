use log::debug;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Verzögerte Ereignisse auf einer virtuellen Uhr.
///
/// Zeit vergeht nur über [`Scheduler::advance`]. Nach [`Scheduler::close`]
/// feuert nichts mehr und neue Ereignisse werden verworfen.
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), E>,
    closed: bool,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
            closed: false,
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn schedule(&mut self, after: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        if self.closed {
            debug!("Scheduler closed, dropping timer {:?}", id);
        } else {
            self.pending.insert((self.now.saturating_add(after), id), event);
        }
        id
    }

    /// Entfernt ein Ereignis; `false`, wenn es schon gefeuert hat
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let key = self.pending.keys().find(|(_, t)| *t == id).copied();
        match key {
            Some(key) => self.pending.remove(&key).is_some(),
            None => false,
        }
    }

    /// Stellt die Uhr vor und liefert alle fälligen Ereignisse in
    /// Fälligkeitsreihenfolge
    pub fn advance(&mut self, by: Duration) -> Vec<E> {
        self.now = self.now.saturating_add(by);
        let due = match self.now.checked_add(Duration::from_nanos(1)) {
            Some(cutoff) => {
                let later = self.pending.split_off(&(cutoff, TimerId(0)));
                std::mem::replace(&mut self.pending, later)
            }
            // Ende der Zeitachse: alles ist fällig
            None => std::mem::take(&mut self.pending),
        };
        due.into_values().collect()
    }

    /// Verwirft alle ausstehenden Ereignisse
    pub fn close(&mut self) {
        if !self.pending.is_empty() {
            debug!("Cancelling {} pending timer(s)", self.pending.len());
        }
        self.pending.clear();
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(3000), "notice");
        scheduler.schedule(ms(1000), "flash");
        scheduler.schedule(ms(1500), "generate");

        assert!(scheduler.advance(ms(999)).is_empty());
        assert_eq!(scheduler.advance(ms(1)), ["flash"]);
        assert_eq!(scheduler.advance(ms(5000)), ["generate", "notice"]);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.now(), ms(6000));
    }

    #[test]
    fn test_same_deadline_keeps_insertion_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(10), 1);
        scheduler.schedule(ms(10), 2);
        assert_eq!(scheduler.advance(ms(10)), [1, 2]);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(ms(100), "x");
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.advance(ms(200)).is_empty());
    }

    #[test]
    fn test_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(ms(500));
        scheduler.schedule(ms(100), "x");
        assert!(scheduler.advance(ms(99)).is_empty());
        assert_eq!(scheduler.advance(ms(1)), ["x"]);
    }

    #[test]
    fn test_clock_saturates() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(100), "x");
        assert_eq!(scheduler.advance(Duration::MAX), ["x"]);
        assert_eq!(scheduler.now(), Duration::MAX);

        scheduler.schedule(ms(100), "y");
        assert_eq!(scheduler.advance(ms(1)), ["y"]);
        assert_eq!(scheduler.now(), Duration::MAX);
    }

    #[test]
    fn test_close_drops_everything() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(100), "x");
        scheduler.close();
        scheduler.schedule(ms(100), "y");
        assert!(scheduler.is_closed());
        assert!(scheduler.advance(ms(1000)).is_empty());
    }
}
