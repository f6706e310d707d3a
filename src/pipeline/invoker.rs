//! Transformation Invoker - sequence numbers and the staleness guard.
//!
//! Every trigger gets the next [`RequestId`]. A result is applied to the
//! [`OutputState`] only when its id is still the newest one issued; anything
//! older is dropped. Issuing and delivering are separate calls so the guard
//! holds whether the transform runs inline or on another thread.

use tracing::debug;

use crate::transform::{Transform, TransformOutput};

use super::snapshot::OutputState;

/// Monotonic request sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What happened to a delivered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Written to the output state.
    Applied(RequestId),
    /// A newer request exists; the result was discarded.
    Stale { id: RequestId, latest: RequestId },
}

impl Delivery {
    pub fn is_applied(&self) -> bool {
        matches!(self, Delivery::Applied(_))
    }
}

#[derive(Debug, Default)]
pub struct Invoker {
    next: u64,
    latest: Option<RequestId>,
    applied: Option<RequestId>,
}

impl Invoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next request id. It becomes the only acceptable result.
    pub fn issue(&mut self) -> RequestId {
        self.next += 1;
        let id = RequestId(self.next);
        self.latest = Some(id);
        debug!(request = id.0, "transform requested");
        id
    }

    /// Newest id issued so far.
    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    /// Id of the result currently shown.
    pub fn applied(&self) -> Option<RequestId> {
        self.applied
    }

    /// True if `id` is still the newest request.
    pub fn is_current(&self, id: RequestId) -> bool {
        self.latest == Some(id)
    }

    /// True while the newest request has not been applied yet.
    pub fn is_in_flight(&self) -> bool {
        self.latest.is_some() && self.latest != self.applied
    }

    /// Hand back a finished result; applied only if `id` is the newest.
    pub fn deliver(
        &mut self,
        id: RequestId,
        output: TransformOutput,
        state: &mut OutputState,
    ) -> Delivery {
        match self.latest {
            Some(latest) if latest == id => {
                state.replace(output);
                self.applied = Some(id);
                debug!(request = id.0, "transform applied");
                Delivery::Applied(id)
            }
            Some(latest) => {
                debug!(request = id.0, latest = latest.0, "stale transform discarded");
                Delivery::Stale { id, latest }
            }
            // Nothing issued: cannot come from this invoker
            None => Delivery::Stale { id, latest: id },
        }
    }

    /// Issue, call the transform synchronously, deliver.
    pub fn run<T>(&mut self, transform: &T, source: &str, state: &mut OutputState) -> Delivery
    where
        T: Transform + ?Sized,
    {
        let id = self.issue();
        let output = transform.transform(source);
        self.deliver(id, output, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn out(tag: &str) -> TransformOutput {
        TransformOutput::new(format!("ast-{tag}"), format!("dbg-{tag}"), format!("enc-{tag}"))
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut inv = Invoker::new();
        let a = inv.issue();
        let b = inv.issue();
        let c = inv.issue();
        assert!(a < b && b < c);
        assert_eq!(inv.latest(), Some(c));
    }

    #[test]
    fn test_in_order_completion() {
        let mut inv = Invoker::new();
        let mut state = OutputState::new();

        let n1 = inv.issue();
        assert!(inv.deliver(n1, out("1"), &mut state).is_applied());
        let n2 = inv.issue();
        assert!(inv.deliver(n2, out("2"), &mut state).is_applied());

        assert_eq!(*state.current(), out("2"));
    }

    #[test]
    fn test_out_of_order_completion_keeps_newest() {
        let mut inv = Invoker::new();
        let mut state = OutputState::new();

        let n1 = inv.issue();
        let n2 = inv.issue();

        // Newer finishes first
        assert_eq!(inv.deliver(n2, out("2"), &mut state), Delivery::Applied(n2));
        // Slow stale one must not clobber it
        assert_eq!(
            inv.deliver(n1, out("1"), &mut state),
            Delivery::Stale { id: n1, latest: n2 }
        );

        assert_eq!(*state.current(), out("2"));
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn test_stale_arriving_first_is_dropped() {
        let mut inv = Invoker::new();
        let mut state = OutputState::new();

        let n1 = inv.issue();
        let n2 = inv.issue();

        assert!(!inv.deliver(n1, out("1"), &mut state).is_applied());
        assert_eq!(*state.current(), TransformOutput::default());
        assert!(inv.is_in_flight());

        assert!(inv.deliver(n2, out("2"), &mut state).is_applied());
        assert!(!inv.is_in_flight());
        assert_eq!(inv.applied(), Some(n2));
    }

    #[test]
    fn test_run_empty_source_still_applies() {
        let mut inv = Invoker::new();
        let mut state = OutputState::new();
        let calls = std::cell::Cell::new(0);
        let transform = |s: &str| {
            calls.set(calls.get() + 1);
            TransformOutput::new(format!("len={}", s.len()), "", "")
        };

        let delivery = inv.run(&transform, "", &mut state);
        assert!(delivery.is_applied());
        assert_eq!(calls.get(), 1);
        assert_eq!(state.current().ast, "len=0");
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn test_deliver_without_issue_is_stale() {
        let mut inv = Invoker::new();
        let mut other = Invoker::new();
        let mut state = OutputState::new();
        let foreign = other.issue();

        assert!(!inv.deliver(foreign, out("x"), &mut state).is_applied());
        assert_eq!(state.generation(), 0);
    }
}
