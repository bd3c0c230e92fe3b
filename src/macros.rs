//! Macros for creating global observer registries.

/// Creates a process-global observer registry with a single macro invocation.
///
/// The macro generates a module containing:
/// - Subscriber storage static (hidden)
/// - Trace callback static (hidden)
/// - An `API` value implementing `ObservableApi`
/// - Free functions delegating to `API`
///
/// # Examples
///
/// ```rust
/// use observer_registry::{define_observer_registry, observer_fn};
///
/// define_observer_registry!(settings_changed);
///
/// let observer = observer_fn(|| println!("settings changed"));
/// settings_changed::register(observer.clone());
///
/// let report = settings_changed::notify();
/// assert_eq!(report.observers, 1);
///
/// settings_changed::unregister(&observer);
/// assert!(settings_changed::is_empty());
/// ```
///
/// # Multiple Registries
///
/// Every invocation is isolated from the others:
///
/// ```rust
/// use observer_registry::{define_observer_registry, observer_fn};
///
/// define_observer_registry!(network);
/// define_observer_registry!(battery);
///
/// network::register(observer_fn(|| {}));
///
/// assert_eq!(network::len(), 1);
/// assert!(battery::is_empty());
/// ```
///
/// # Trait-Based Usage
///
/// The `API` value can be handed to code that is generic over `ObservableApi`,
/// such as a [`Notifier`](crate::Notifier):
///
/// ```rust
/// use observer_registry::{define_observer_registry, observer_fn, ObservableApi};
///
/// define_observer_registry!(app);
///
/// app::API.register(observer_fn(|| {}));
/// assert_eq!(app::API.len(), 1);
/// ```
#[macro_export]
macro_rules! define_observer_registry {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock, Mutex};

            // Registered observers (module-private)
            static SUBSCRIBERS: LazyLock<$crate::Subscribers> =
                LazyLock::new(|| Mutex::new($crate::SubscriberSet::new()));

            // Trace callback storage (module-private)
            static TRACE: LazyLock<$crate::TraceSlot> = LazyLock::new(|| Mutex::new(None));

            /// Zero-sized handle to this module's registry.
            ///
            /// All registry operations are provided by the `ObservableApi` trait's
            /// default implementations. This struct only provides access to the statics.
            #[derive(Debug, Clone, Copy)]
            pub struct Api;

            impl $crate::ObservableApi for Api {
                fn subscribers(&self) -> &$crate::Subscribers {
                    &SUBSCRIBERS
                }

                fn trace(&self) -> &$crate::TraceSlot {
                    &TRACE
                }

                fn label(&self) -> &str {
                    stringify!($name)
                }
            }

            /// Convenient constant for accessing the registry API.
            pub const API: Api = Api;

            /// Register an observer.
            pub fn register(observer: Arc<dyn $crate::Observer>) {
                use $crate::ObservableApi;
                API.register(observer)
            }

            /// Remove an observer if it is registered.
            pub fn unregister<O: $crate::Observer + ?Sized>(observer: &Arc<O>) {
                use $crate::ObservableApi;
                API.unregister(observer)
            }

            /// Notify a snapshot of the registered observers.
            pub fn notify() -> $crate::NotifyReport {
                use $crate::ObservableApi;
                API.notify()
            }

            /// Copy of the registered observers, in dispatch order.
            pub fn snapshot() -> Vec<Arc<dyn $crate::Observer>> {
                use $crate::ObservableApi;
                API.snapshot()
            }

            /// Check whether this exact handle is registered.
            pub fn contains<O: $crate::Observer + ?Sized>(observer: &Arc<O>) -> bool {
                use $crate::ObservableApi;
                API.contains(observer)
            }

            /// Number of registered observers.
            pub fn len() -> usize {
                use $crate::ObservableApi;
                API.len()
            }

            /// `true` if no observer is registered.
            pub fn is_empty() -> bool {
                use $crate::ObservableApi;
                API.is_empty()
            }

            /// Remove all observers.
            pub fn clear() {
                use $crate::ObservableApi;
                API.clear()
            }

            /// Set a tracing callback for registry operations.
            pub fn set_trace_callback(callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static) {
                use $crate::ObservableApi;
                API.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                use $crate::ObservableApi;
                API.clear_trace_callback()
            }
        }
    };
}
