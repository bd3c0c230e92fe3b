/// Events emitted by the registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use observer_registry::RegistryEvent;
///
/// let event = RegistryEvent::Register { observer: "closure".into(), added: true };
/// println!("{:?}", event);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// An observer was offered to the registry.
    Register {
        /// The observer's name (see [`Observer::name`](crate::Observer::name))
        observer: String,
        /// `false` when the same handle was already registered
        added: bool,
    },

    /// An observer was asked to be removed.
    Unregister {
        /// The observer's name
        observer: String,
        /// `false` when the handle was not registered
        removed: bool,
    },

    /// A notification round finished.
    Notify {
        /// Size of the snapshot that was dispatched to
        observers: usize,
        /// How many callbacks panicked
        failed: usize,
    },

    /// The registry was cleared.
    Clear {
        /// How many observers were dropped
        removed: usize,
    },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register { observer, added } => {
                write!(f, "register {{ observer: {observer}, added: {added} }}")
            }
            RegistryEvent::Unregister { observer, removed } => {
                write!(f, "unregister {{ observer: {observer}, removed: {removed} }}")
            }
            RegistryEvent::Notify { observers, failed } => {
                write!(f, "notify {{ observers: {observers}, failed: {failed} }}")
            }
            RegistryEvent::Clear { removed } => {
                write!(f, "Clearing the Registry ({removed} observers)")
            }
        }
    }
}
