//! Session change notifier.
//!
//! A process-wide observer registry delivering payload-free "re-check now"
//! pulses. Observers re-derive state through `SessionStore::get()`; delivery
//! is synchronous, in registration order, at-least-once and possibly spurious
//! (a focus pulse fires whether or not anything changed), so observers must
//! be idempotent against redundant pulses.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use super::store::SessionStore;

pub type WatcherId = u64;

type Callback = Arc<dyn Fn() + Send + Sync>;

static WATCHERS: Lazy<RwLock<Vec<(WatcherId, Callback)>>> = Lazy::new(|| RwLock::new(Vec::new()));
static NEXT_ID: AtomicU64 = AtomicU64::new(1);
// Last state-file fingerprint observed by poll(); keyed implicitly by the
// single store this process watches.
static LAST_SEEN: Lazy<Mutex<Option<u64>>> = Lazy::new(|| Mutex::new(None));

/// Register an observer. Handlers run in registration order on every pulse.
pub fn subscribe<F: Fn() + Send + Sync + 'static>(f: F) -> WatcherId {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    WATCHERS.write().push((id, Arc::new(f)));
    id
}

/// Remove an observer; returns false if the id was unknown.
pub fn unsubscribe(id: WatcherId) -> bool {
    let mut w = WATCHERS.write();
    let before = w.len();
    w.retain(|(i, _)| *i != id);
    w.len() != before
}

/// Deliver one pulse to every observer, synchronously, in registration
/// order. Callbacks run outside the registry lock so they may subscribe or
/// unsubscribe without deadlocking.
pub fn pulse() {
    let snapshot: Vec<Callback> = WATCHERS.read().iter().map(|(_, cb)| cb.clone()).collect();
    debug!(target: "clientele::session", "watch.pulse observers={}", snapshot.len());
    for cb in snapshot {
        cb();
    }
}

/// Defensive re-sync when the console regains focus: always pulses, since a
/// cross-process change may have been missed while unfocused.
pub fn focus(store: &SessionStore) {
    *LAST_SEEN.lock() = Some(store.revision());
    pulse();
}

/// Detect a state-file write from another process and pulse if one happened.
/// Returns true when a pulse was delivered.
pub fn poll(store: &SessionStore) -> bool {
    let rev = store.revision();
    let mut last = LAST_SEEN.lock();
    let changed = match *last {
        Some(prev) => prev != rev,
        None => false, // first observation is a baseline, not a change
    };
    *last = Some(rev);
    drop(last);
    if changed {
        debug!(target: "clientele::session", "watch.poll detected external change");
        pulse();
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Role, Session};
    use std::sync::atomic::AtomicUsize;
    use tempfile::tempdir;

    // The registry and poll baseline are process-global; serialize the tests
    // that touch them.
    static GATE: Mutex<()> = Mutex::new(());

    #[test]
    fn pulses_run_in_registration_order() {
        let _g = GATE.lock();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (a, b) = (seen.clone(), seen.clone());
        let id1 = subscribe(move || a.lock().push(1));
        let id2 = subscribe(move || b.lock().push(2));
        pulse();
        assert_eq!(&*seen.lock(), &[1, 2]);
        unsubscribe(id1);
        unsubscribe(id2);
    }

    #[test]
    fn redundant_pulses_are_idempotent_for_derived_state() {
        let _g = GATE.lock();
        let tmp = tempdir().unwrap();
        let store = SessionStore::new(tmp.path()).unwrap();
        store.set(&Session::new("t", Role::Analyst, "ana")).unwrap();

        let derived = Arc::new(Mutex::new(Vec::new()));
        let d = derived.clone();
        let s = store.clone();
        let id = subscribe(move || d.lock().push(s.get()));

        // two rapid pulses with no intervening mutation
        pulse();
        pulse();
        let got = derived.lock().clone();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], got[1]);
        unsubscribe(id);
    }

    #[test]
    fn poll_fires_only_on_external_change() {
        let _g = GATE.lock();
        let tmp = tempdir().unwrap();
        let store = SessionStore::new(tmp.path()).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let id = subscribe(move || { h.fetch_add(1, Ordering::SeqCst); });

        focus(&store); // baseline + one defensive pulse
        let base = hits.load(Ordering::SeqCst);
        assert!(!poll(&store));
        assert_eq!(hits.load(Ordering::SeqCst), base);

        // simulate another process logging in
        store.set(&Session::new("t2", Role::User, "u")).unwrap();
        assert!(poll(&store));
        assert_eq!(hits.load(Ordering::SeqCst), base + 1);
        // and nothing further until the next write
        assert!(!poll(&store));
        unsubscribe(id);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let _g = GATE.lock();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let id = subscribe(move || { h.fetch_add(1, Ordering::SeqCst); });
        pulse();
        assert!(unsubscribe(id));
        assert!(!unsubscribe(id));
        let n = hits.load(Ordering::SeqCst);
        pulse();
        assert_eq!(hits.load(Ordering::SeqCst), n);
    }
}
