//! Resolution orchestrator: wires trip inputs to geocoding and routing.
//!
//! [`TripResolver`] owns the only mutable trip state. Inputs arrive through
//! [`TripResolver::set_address`] and [`TripResolver::click`]; the network
//! work they trigger runs on spawned Tokio tasks and writes back only if it
//! has not been superseded in the meantime. Every accepted change is
//! published as a [`TripSnapshot`].
//!
//! Superseded work is detected with monotonically increasing generations:
//! one per endpoint role for geocoding and one for routing. Each task
//! captures the generation current when it was issued and compares it before
//! writing. In-flight provider calls are never aborted, only ignored.

mod policy;
mod state;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::{Address, Coordinate, EndpointRole, Geocoder, ReverseGeocoder, Router};

pub use policy::{ClickPolicy, ParseWhenBothSetError, WhenBothSet};
pub use state::{EndpointSnapshot, TripPhase, TripSnapshot};

use state::{ResolutionRequest, TripState};

/// Completion handle for the work triggered by one input.
///
/// Dropping it leaves the work running; awaiting
/// [`settled`](Self::settled) waits until geocoding and any routing it
/// triggered have finished or been discarded.
#[derive(Debug)]
pub struct Pending {
    task: Option<JoinHandle<()>>,
}

impl Pending {
    const fn ready() -> Self {
        Self { task: None }
    }

    fn spawn<F>(work: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            task: Some(tokio::spawn(work)),
        }
    }

    /// Whether the input required no asynchronous work.
    #[must_use]
    pub const fn is_immediate(&self) -> bool {
        self.task.is_none()
    }

    /// Wait for the triggered work to finish.
    pub async fn settled(self) {
        let Some(task) = self.task else {
            return;
        };
        if let Err(err) = task.await {
            warn!("trip resolution task ended abnormally: {err}");
        }
    }
}

/// Drives pickup and drop-off resolution for one trip.
///
/// Cloning is cheap; clones share the same trip.
#[derive(Debug, Clone)]
pub struct TripResolver {
    inner: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    geocoder: Geocoder,
    reverse: ReverseGeocoder,
    router: Router,
    policy: ClickPolicy,
    state: Mutex<TripState>,
    updates: watch::Sender<TripSnapshot>,
}

impl TripResolver {
    /// Resolver using the default [`ClickPolicy`].
    #[must_use]
    pub fn new(geocoder: Geocoder, reverse: ReverseGeocoder, router: Router) -> Self {
        Self::with_click_policy(geocoder, reverse, router, ClickPolicy::default())
    }

    /// Resolver with an explicit click policy.
    #[must_use]
    pub fn with_click_policy(
        geocoder: Geocoder,
        reverse: ReverseGeocoder,
        router: Router,
        policy: ClickPolicy,
    ) -> Self {
        let (updates, _) = watch::channel(TripSnapshot::default());
        Self {
            inner: Arc::new(Shared {
                geocoder,
                reverse,
                router,
                policy,
                state: Mutex::new(TripState::default()),
                updates,
            }),
        }
    }

    /// Current state of the trip.
    #[must_use]
    pub fn snapshot(&self) -> TripSnapshot {
        self.inner.lock().snapshot()
    }

    /// Receive every published snapshot from now on.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TripSnapshot> {
        self.inner.updates.subscribe()
    }

    /// Set the address for `role`.
    ///
    /// Blank text clears the role: its address, coordinate and the route are
    /// reset at once and anything in flight for them is superseded.
    /// Resubmitting the current address does nothing. Any other text is
    /// geocoded in the background; the role keeps its previous coordinate
    /// until the new one arrives.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn set_address(&self, role: EndpointRole, text: impl AsRef<str>) -> Pending {
        let address = Address::new(text);
        let mut state = self.inner.lock();

        if address.is_unset() {
            state.endpoint_mut(role).supersede(address);
            state.coordinates.forget(role);
            state.invalidate_route();
            self.inner.publish(&state);
            debug!("cleared {role}");
            return Pending::ready();
        }
        if state.endpoint(role).address == address {
            return Pending::ready();
        }

        let generation = state.endpoint_mut(role).supersede_with_text(address.clone());
        self.inner.publish(&state);
        drop(state);

        let inner = Arc::clone(&self.inner);
        Pending::spawn(async move { inner.geocode(role, generation, address).await })
    }

    /// Clear `role`; shorthand for setting a blank address.
    pub fn clear(&self, role: EndpointRole) {
        // Clearing never spawns work.
        drop(self.set_address(role, ""));
    }

    /// Place an endpoint at a clicked map point.
    ///
    /// The role comes from the [`ClickPolicy`]. The coordinate is stored
    /// straight away and routing starts if the pair is complete; the address
    /// is filled in by the reverse geocoder later and is never forward
    /// geocoded. Clicking the point a role already holds changes nothing,
    /// unless typed text for that role is still being geocoded: the click is
    /// newer, so the text is superseded and the point is named instead.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn click(&self, coordinate: Coordinate) -> Pending {
        let mut state = self.inner.lock();
        let pickup_set = state.is_set(EndpointRole::Pickup);
        let dropoff_set = state.is_set(EndpointRole::Dropoff);
        let Some(role) = self.inner.policy.assign(pickup_set, dropoff_set) else {
            debug!("ignored click at {coordinate}; both endpoints are set");
            return Pending::ready();
        };
        let request = if state.coordinates.observe(role, coordinate).is_changed() {
            state.request_route()
        } else if state.endpoint(role).geocoding {
            debug!("click at {coordinate} supersedes the {role} address being geocoded");
            None
        } else {
            debug!("click at {coordinate} matches the current {role}");
            return Pending::ready();
        };

        let generation = state.endpoint_mut(role).supersede(Address::default());
        self.inner.publish(&state);
        drop(state);

        let inner = Arc::clone(&self.inner);
        Pending::spawn(async move {
            tokio::join!(
                inner.name_clicked(role, generation, coordinate),
                inner.route_if_requested(request),
            );
        })
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, TripState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &TripState) {
        self.updates.send_replace(state.snapshot());
    }

    async fn geocode(&self, role: EndpointRole, generation: u64, address: Address) {
        let outcome = self.geocoder.resolve(&address).await;
        let request = {
            let mut state = self.lock();
            if !state.is_current(role, generation) {
                debug!("discarded superseded {role} geocode for {address}");
                return;
            }
            state.endpoint_mut(role).geocoding = false;
            match outcome {
                Ok(coordinate) => {
                    if !state.coordinates.observe(role, coordinate).is_changed() {
                        debug!("{role} coordinate for {address} is unchanged");
                        return;
                    }
                    let request = state.request_route();
                    self.publish(&state);
                    request
                }
                Err(err) => {
                    info!("{err}; {role} left without a coordinate");
                    state.coordinates.forget(role);
                    state.invalidate_route();
                    self.publish(&state);
                    None
                }
            }
        };
        self.route_if_requested(request).await;
    }

    async fn name_clicked(&self, role: EndpointRole, generation: u64, coordinate: Coordinate) {
        let address = self.reverse.resolve_address(coordinate).await;
        let mut state = self.lock();
        if !state.is_current(role, generation) {
            debug!("discarded superseded {role} address for {coordinate}");
            return;
        }
        state.endpoint_mut(role).address = address;
        self.publish(&state);
    }

    async fn route_if_requested(&self, request: Option<ResolutionRequest>) {
        let Some(request) = request else {
            return;
        };
        let estimate = self.router.route(request.pickup, request.dropoff).await;
        let mut state = self.lock();
        if state.route_generation != request.generation {
            debug!("discarded superseded {} route", estimate.source);
            return;
        }
        state.route = Some(estimate);
        self.publish(&state);
    }
}
