//! Optimistic navigation state.
//!
//! Tracks the path the UI should *show* (optimistic) against the path that
//! has actually been *committed*. `is_navigating` is always derived from the
//! pair and never stored. One `NavigationTracker` owns the state and is the
//! only writer; any number of `NavigationObserver`s read it and can await
//! changes. A newer optimistic path simply replaces an older one.

use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    committed_path: String,
    optimistic_path: String,
}

impl NavigationState {
    fn settled(path: String) -> Self {
        Self {
            committed_path: path.clone(),
            optimistic_path: path,
        }
    }

    pub fn committed_path(&self) -> &str {
        &self.committed_path
    }

    pub fn optimistic_pathname(&self) -> &str {
        &self.optimistic_path
    }

    pub fn is_navigating(&self) -> bool {
        self.committed_path != self.optimistic_path
    }
}

#[derive(Debug)]
pub struct NavigationTracker {
    tx: watch::Sender<NavigationState>,
}

impl NavigationTracker {
    pub fn new(initial_path: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(NavigationState::settled(initial_path.into()));
        Self { tx }
    }

    /// Show `path` immediately, before the navigation lands.
    pub fn set_optimistic_pathname(&self, path: impl Into<String>) {
        let path = path.into();
        self.tx.send_if_modified(|state| {
            if state.optimistic_path == path {
                return false;
            }
            state.optimistic_path = path;
            true
        });
    }

    /// The navigation to `path` landed. Any pending optimistic value is dropped.
    pub fn commit(&self, path: impl Into<String>) {
        let next = NavigationState::settled(path.into());
        self.tx.send_if_modified(|state| {
            if *state == next {
                return false;
            }
            *state = next;
            true
        });
    }

    pub fn snapshot(&self) -> NavigationState {
        self.tx.borrow().clone()
    }

    pub fn is_navigating(&self) -> bool {
        self.tx.borrow().is_navigating()
    }

    pub fn optimistic_pathname(&self) -> String {
        self.tx.borrow().optimistic_path.clone()
    }

    pub fn subscribe(&self) -> NavigationObserver {
        NavigationObserver {
            rx: self.tx.subscribe(),
        }
    }
}

/// Read side of the tracker.
#[derive(Debug, Clone)]
pub struct NavigationObserver {
    rx: watch::Receiver<NavigationState>,
}

impl NavigationObserver {
    pub fn snapshot(&self) -> NavigationState {
        self.rx.borrow().clone()
    }

    pub fn is_navigating(&self) -> bool {
        self.rx.borrow().is_navigating()
    }

    /// Wait for the next state change. `None` once the tracker is dropped.
    pub async fn changed(&mut self) -> Option<NavigationState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_settled() {
        let nav = NavigationTracker::new("/dashboard");
        assert!(!nav.is_navigating());
        assert_eq!(nav.optimistic_pathname(), "/dashboard");
        assert_eq!(nav.snapshot().committed_path(), "/dashboard");
    }

    #[test]
    fn optimistic_update_is_pending_until_commit() {
        let nav = NavigationTracker::new("/dashboard");
        nav.set_optimistic_pathname("/settings");

        assert!(nav.is_navigating());
        assert_eq!(nav.optimistic_pathname(), "/settings");
        assert_eq!(nav.snapshot().committed_path(), "/dashboard");

        nav.commit("/settings");
        assert!(!nav.is_navigating());
        assert_eq!(nav.optimistic_pathname(), "/settings");
    }

    #[test]
    fn last_optimistic_write_wins() {
        let nav = NavigationTracker::new("/");
        nav.set_optimistic_pathname("/dashboard");
        nav.set_optimistic_pathname("/settings");
        assert_eq!(nav.optimistic_pathname(), "/settings");

        // the abandoned target lands first; state resets to what actually committed
        nav.commit("/dashboard");
        assert!(!nav.is_navigating());
        assert_eq!(nav.optimistic_pathname(), "/dashboard");
    }

    #[test]
    fn optimistic_back_to_committed_is_not_navigating() {
        let nav = NavigationTracker::new("/dashboard");
        nav.set_optimistic_pathname("/settings");
        nav.set_optimistic_pathname("/dashboard");
        assert!(!nav.is_navigating());
    }

    #[tokio::test]
    async fn observer_sees_changes() {
        let nav = NavigationTracker::new("/");
        let mut obs = nav.subscribe();

        nav.set_optimistic_pathname("/dashboard");
        let s = obs.changed().await.unwrap();
        assert!(s.is_navigating());
        assert_eq!(s.optimistic_pathname(), "/dashboard");

        nav.commit("/dashboard");
        let s = obs.changed().await.unwrap();
        assert!(!s.is_navigating());
        assert!(!obs.is_navigating());
    }

    #[tokio::test]
    async fn observer_ends_when_tracker_dropped() {
        let nav = NavigationTracker::new("/");
        let mut obs = nav.subscribe();
        drop(nav);
        assert_eq!(obs.changed().await, None);
    }
}
