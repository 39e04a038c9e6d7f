//! The cart store: the session's authoritative cart, kept in sync with
//! durable local storage.

use std::fmt;

use shopfront_cache::{cache_key, Cache, KeyValueStore};
use tracing::{debug, warn};

use crate::cart::{Cart, CartItem, CartLine};
use crate::ids::ProductId;
use crate::money::Money;
use crate::CommerceError;

/// Storage key the cart is persisted under unless configured otherwise.
pub fn default_cart_key() -> String {
    cache_key!("shopfront", "cart")
}

/// Persistence adapter for cart snapshots.
///
/// A snapshot is the JSON list of [`CartLine`]s stored under one key. Unlike
/// [`CartStore`], every operation here reports failures.
#[derive(Debug, Clone)]
pub struct CartSnapshots<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> CartSnapshots<S> {
    /// Create an adapter over `store` using the default key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, default_cart_key())
    }

    /// Create an adapter over `store` using a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(store),
            key: key.into(),
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Read the stored snapshot, `Ok(None)` when there is none.
    pub fn load(&self) -> Result<Option<Vec<CartLine>>, CommerceError> {
        Ok(self.cache.get(&self.key)?)
    }

    /// Write a full snapshot, replacing the previous one.
    pub fn save(&self, lines: &[CartLine]) -> Result<(), CommerceError> {
        Ok(self.cache.set(&self.key, lines)?)
    }

    /// Delete the stored snapshot.
    pub fn remove(&self) -> Result<(), CommerceError> {
        Ok(self.cache.delete(&self.key)?)
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&Cart)>;

/// Observable cart state for one browsing session.
///
/// Construct one per session and hand it to whatever needs the cart.
/// Mutations never fail from the caller's point of view: each one updates
/// the in-memory cart, writes the full snapshot and notifies subscribers.
/// A failed write is logged and kept in [`last_persist_error`], and the
/// in-memory cart stays authoritative.
///
/// Two stores over the same storage do not see each other's changes; the
/// last one to write wins.
///
/// [`last_persist_error`]: CartStore::last_persist_error
pub struct CartStore<S> {
    cart: Cart,
    snapshots: CartSnapshots<S>,
    hydrated: bool,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    last_persist_error: Option<CommerceError>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store and rehydrate it from storage right away.
    pub fn open(snapshots: CartSnapshots<S>) -> Self {
        let mut store = Self::detached(snapshots);
        store.hydrate();
        store
    }

    /// Create a store that has not read storage yet.
    ///
    /// Mutations are applied to an empty in-memory cart and are not written
    /// until [`hydrate`](Self::hydrate) runs.
    pub fn detached(snapshots: CartSnapshots<S>) -> Self {
        Self {
            cart: Cart::new(),
            snapshots,
            hydrated: false,
            listeners: Vec::new(),
            next_listener: 0,
            last_persist_error: None,
        }
    }

    /// Rehydrate from the persisted snapshot.
    ///
    /// A stored snapshot replaces the in-memory lines. When there is none,
    /// or it cannot be read or parsed, the in-memory lines are kept and
    /// written out if there are any. Calling this again is a no-op.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }
        self.hydrated = true;

        match self.snapshots.load() {
            Ok(Some(lines)) => {
                self.cart = Cart::from_lines(lines);
                debug!(
                    key = self.snapshots.key(),
                    lines = self.cart.line_count(),
                    "cart rehydrated"
                );
            }
            Ok(None) => {
                debug!(key = self.snapshots.key(), "no stored cart");
                if !self.cart.is_empty() {
                    self.persist();
                }
            }
            Err(e) => {
                warn!(key = self.snapshots.key(), error = %e, "discarding unreadable cart");
                if !self.cart.is_empty() {
                    self.persist();
                }
            }
        }
        self.notify();
    }

    /// Whether the initial rehydration has run.
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Add `quantity` units of `item`. Returns whether the cart changed.
    ///
    /// Zero is ignored. A line already at
    /// [`MAX_QUANTITY_PER_LINE`](crate::cart::MAX_QUANTITY_PER_LINE) does not
    /// grow, and nothing is persisted or broadcast for it.
    pub fn add(&mut self, item: CartItem, quantity: u32) -> bool {
        debug!(id = %item.id, quantity, "cart add");
        let changed = self.cart.add(item, quantity);
        if changed {
            self.commit();
        }
        changed
    }

    /// Add a single unit of `item`.
    pub fn add_one(&mut self, item: CartItem) -> bool {
        self.add(item, 1)
    }

    /// Remove a line entirely.
    pub fn remove(&mut self, id: &ProductId) {
        if self.cart.remove(id) {
            self.commit();
        }
    }

    /// Raise a line's quantity by `step`.
    pub fn increase(&mut self, id: &ProductId, step: u32) {
        if self.cart.increase(id, step) {
            self.commit();
        }
    }

    /// Lower a line's quantity by `step`; the line goes away at zero.
    pub fn decrease(&mut self, id: &ProductId, step: u32) {
        if self.cart.decrease(id, step) {
            self.commit();
        }
    }

    /// Set a line's quantity; zero removes it.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) {
        if self.cart.set_quantity(id, quantity) {
            self.commit();
        }
    }

    /// Empty the cart and persist the empty list.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit();
    }

    /// Sum of `unit_price * quantity`.
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Whether the whole cart ships for free.
    pub fn free_shipping_eligible(&self) -> bool {
        self.cart.free_shipping_eligible()
    }

    /// Call `listener` after every change to the cart.
    pub fn subscribe(&mut self, listener: impl Fn(&Cart) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Stop notifying a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// The error from the most recent failed write, cleared by the next
    /// successful one.
    pub fn last_persist_error(&self) -> Option<&CommerceError> {
        self.last_persist_error.as_ref()
    }

    /// The persistence adapter.
    pub fn snapshots(&self) -> &CartSnapshots<S> {
        &self.snapshots
    }

    fn commit(&mut self) {
        if self.hydrated {
            self.persist();
        }
        self.notify();
    }

    fn persist(&mut self) {
        match self.snapshots.save(self.cart.lines()) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(key = self.snapshots.key(), error = %e, "cart not persisted");
                self.last_persist_error = Some(e);
            }
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.cart);
        }
    }
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("key", &self.snapshots.key)
            .field("hydrated", &self.hydrated)
            .field("listeners", &self.listeners.len())
            .field("last_persist_error", &self.last_persist_error)
            .finish()
    }
}
