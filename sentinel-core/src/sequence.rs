use std::cell::Cell;

/// Position of a request in issue order. Higher is newer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Orders independently started requests so an older response can never
/// overwrite the outcome of a newer one.
///
/// Single-threaded: the dashboard only interleaves futures, it never runs
/// them in parallel.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestToken {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        RequestToken(next)
    }

    /// True if `token` is the most recently issued request.
    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.issued.get()
    }

    /// Claim the right to apply `token`'s outcome. Fails if a newer request
    /// already applied its own.
    pub fn try_apply(&self, token: RequestToken) -> bool {
        if token.0 <= self.applied.get() {
            return false;
        }
        self.applied.set(token.0);
        true
    }

    pub fn last_applied(&self) -> u64 {
        self.applied.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase() {
        let seq = RequestSequence::new();
        let a = seq.begin();
        let b = seq.begin();
        assert!(a < b);
        assert_eq!(b.get(), 2);
        assert!(seq.is_latest(b));
        assert!(!seq.is_latest(a));
    }

    #[test]
    fn older_outcome_is_rejected_after_newer_applied() {
        let seq = RequestSequence::new();
        let older = seq.begin();
        let newer = seq.begin();
        assert!(seq.try_apply(newer));
        assert!(!seq.try_apply(older));
        assert_eq!(seq.last_applied(), 2);
    }

    #[test]
    fn in_order_outcomes_all_apply() {
        let seq = RequestSequence::new();
        let a = seq.begin();
        assert!(seq.try_apply(a));
        let b = seq.begin();
        assert!(seq.try_apply(b));
        assert!(!seq.try_apply(b));
    }
}
