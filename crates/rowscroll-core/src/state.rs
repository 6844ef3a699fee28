//! State management for the row list.
//!
//! Elm-style: `State + Message → (State, Command)`. The state is mutated only
//! through [`State::update`]; side effects the host must perform are returned
//! as [`Command`]s instead of being executed in the reducer.
//!
//! # Examples
//!
//! ```
//! use rowscroll_core::{Command, State};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Default, Serialize, Deserialize)]
//! struct Flag {
//!     on: bool,
//! }
//!
//! impl State for Flag {
//!     type Message = ();
//!
//!     fn update(&mut self, _msg: ()) -> Command {
//!         self.on = !self.on;
//!         Command::None
//!     }
//! }
//!
//! let mut flag = Flag::default();
//! flag.update(());
//! assert!(flag.on);
//! ```

use serde::{Deserialize, Serialize};

/// Application state trait.
pub trait State: Clone + Serialize + for<'de> Deserialize<'de> + Send + Sync {
    /// Message type for state updates
    type Message: Send;

    /// Update state in response to a message.
    ///
    /// Returns a command for side effects the host must carry out.
    fn update(&mut self, msg: Self::Message) -> Command;
}

/// Side effects requested by a state update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// No command
    #[default]
    None,
    /// Execute multiple commands
    Batch(Vec<Command>),
    /// Open a URL in a new browsing context
    OpenUrl {
        /// Target URL, passed through verbatim
        url: String,
    },
}

impl Command {
    /// Open `url` in a new browsing context.
    pub fn open_url(url: impl Into<String>) -> Self {
        Self::OpenUrl { url: url.into() }
    }

    /// Create a batch of commands, dropping `None`s.
    pub fn batch(commands: impl IntoIterator<Item = Self>) -> Self {
        let mut cmds: Vec<Self> = commands.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flatten into the leaf commands, in order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Self> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(cmds) => cmds.into_iter().flat_map(Self::into_vec).collect(),
            other => vec![other],
        }
    }
}

/// Type alias for state change subscribers.
type Subscriber<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Owns a state value and notifies subscribers after every dispatch.
pub struct Store<S: State> {
    state: S,
    subscribers: Vec<Subscriber<S>>,
    dispatched: u64,
}

impl<S: State> Store<S> {
    /// Create a new store with initial state.
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            subscribers: Vec::new(),
            dispatched: 0,
        }
    }

    /// Get current state.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Number of messages dispatched so far.
    pub const fn dispatched(&self) -> u64 {
        self.dispatched
    }

    /// Dispatch a message to update state.
    pub fn dispatch(&mut self, msg: S::Message) -> Command {
        let cmd = self.state.update(msg);
        self.dispatched += 1;
        self.notify_subscribers();
        cmd
    }

    /// Subscribe to state changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    fn notify_subscribers(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.state);
        }
    }
}

impl<S: State + std::fmt::Debug> std::fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .field("dispatched", &self.dispatched)
            .finish()
    }
}
