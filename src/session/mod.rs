//! Client-side session state: the persisted store, the session record and the
//! change notifier. Keep the public surface thin and split implementation
//! across sub-modules.

mod state;
mod store;
mod watch;

pub use state::{Role, Session};
pub use store::{SessionStore, StoreError, KEY_TOKEN, KEY_ROLE, KEY_USERNAME, KEY_LAST_LOGIN};
pub use watch::{subscribe, unsubscribe, pulse, focus, poll, WatcherId};
