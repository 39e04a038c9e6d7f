//! Behaviour of the persisted cart store across mutations and reloads.

use shopfront_cache::{FileStore, KeyValueStore, MemoryStore};
use shopfront_commerce::cart::{default_cart_key, CartItem, CartSnapshots, CartStore};
use shopfront_commerce::catalog::Catalog;
use shopfront_commerce::{Money, ProductId};

fn item(id: &str, reais: i64) -> CartItem {
    CartItem::new(id, format!("Produto {id}"), Money::from_reais(reais))
}

fn open(storage: &MemoryStore) -> CartStore<MemoryStore> {
    CartStore::open(CartSnapshots::new(storage.clone()))
}

#[test]
fn repeated_adds_accumulate_into_one_line() {
    let storage = MemoryStore::new();
    let mut store = open(&storage);

    let quantities = [1, 3, 2, 5];
    for q in quantities {
        store.add(item("galaxy-a55", 1999), q);
    }

    assert_eq!(store.lines().len(), 1);
    assert_eq!(store.lines()[0].quantity, quantities.iter().sum::<u32>());
}

#[test]
fn quantities_never_drop_below_one() {
    let storage = MemoryStore::new();
    let mut store = open(&storage);
    let a = ProductId::new("a");
    let b = ProductId::new("b");

    store.add(item("a", 10), 3);
    store.add(item("b", 10), 1);

    store.decrease(&a, 2);
    store.decrease(&b, 7);
    store.set_quantity(&a, 0);
    store.decrease(&a, 1);

    assert!(store.lines().iter().all(|l| l.quantity >= 1));
    assert!(store.cart().line(&a).is_none());
    assert!(store.cart().line(&b).is_none());
    assert!(store.cart().is_empty());
}

#[test]
fn subtotal_is_recomputed_after_each_mutation() {
    let storage = MemoryStore::new();
    let mut store = open(&storage);

    store.add(item("first", 100), 2);
    store.add(item("second", 200), 1);
    assert_eq!(store.subtotal(), Money::from_reais(400));

    store.remove(&ProductId::new("first"));
    assert_eq!(store.subtotal(), Money::from_reais(200));

    store.increase(&ProductId::new("second"), 2);
    let expected: Money = store.lines().iter().map(|l| l.total()).sum();
    assert_eq!(store.subtotal(), expected);
    assert_eq!(store.subtotal(), Money::from_reais(600));
}

#[test]
fn rehydrated_cart_matches_original() {
    let storage = MemoryStore::new();
    let original = {
        let mut store = open(&storage);
        store.add(item("c", 30), 1);
        store.add(item("a", 10).with_free_shipping(true), 2);
        store.add(item("b", 20), 4);
        store.lines().to_vec()
    };

    let reloaded = open(&storage);
    assert_eq!(reloaded.lines(), original.as_slice());
    let ids: Vec<_> = reloaded.lines().iter().map(|l| l.id().as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn rehydration_survives_a_file_backed_restart() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::bundled().unwrap();
    let phone = catalog.product("galaxy-s24-ultra-512").unwrap();

    {
        let storage = FileStore::open(dir.path()).unwrap();
        let mut store = CartStore::open(CartSnapshots::new(storage));
        store.add(phone.to_cart_item(Some("Titânio"), Some("512 GB")), 2);
    }

    let storage = FileStore::open(dir.path()).unwrap();
    let store = CartStore::open(CartSnapshots::new(storage));
    assert_eq!(store.item_count(), 2);
    assert_eq!(store.subtotal(), phone.price * 2);
    assert_eq!(store.lines()[0].item.variant_color.as_deref(), Some("Titânio"));
}

#[test]
fn free_shipping_requires_every_line() {
    let storage = MemoryStore::new();
    let mut store = open(&storage);
    assert!(!store.free_shipping_eligible());

    store.add(item("a", 10).with_free_shipping(true), 1);
    store.add(item("b", 10).with_free_shipping(true), 1);
    assert!(store.free_shipping_eligible());

    store.add(item("c", 10), 1);
    assert!(!store.free_shipping_eligible());

    store.remove(&ProductId::new("c"));
    assert!(store.free_shipping_eligible());

    store.clear();
    assert!(!store.free_shipping_eligible());
}

#[test]
fn clear_empties_memory_and_storage() {
    let storage = MemoryStore::new();
    let mut store = open(&storage);
    store.add(item("a", 10), 2);
    store.add(item("b", 5), 1);

    store.clear();
    assert_eq!(store.subtotal(), Money::zero());
    assert_eq!(store.item_count(), 0);

    let reloaded = open(&storage);
    assert!(reloaded.cart().is_empty());
    assert_eq!(reloaded.item_count(), 0);
}

#[test]
fn malformed_storage_starts_empty() {
    for raw in ["not json", "{\"lines\": []}", "[{\"id\": 3}]", ""] {
        let storage = MemoryStore::new();
        storage.set_raw(&default_cart_key(), raw).unwrap();

        let mut store = open(&storage);
        assert!(store.is_hydrated());
        assert!(store.cart().is_empty(), "content {raw:?} should be discarded");

        // The store keeps working and overwrites the bad snapshot.
        store.add(item("a", 10), 1);
        let reloaded = open(&storage);
        assert_eq!(reloaded.item_count(), 1);
    }
}

#[test]
fn persistence_failures_do_not_roll_back() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStore::open(dir.path()).unwrap().with_quota(8);
    let mut store = CartStore::open(CartSnapshots::new(storage));

    store.add(item("a", 10), 2);
    assert_eq!(store.item_count(), 2);
    assert!(store.last_persist_error().is_some());

    store.increase(&ProductId::new("a"), 1);
    assert_eq!(store.item_count(), 3);
}

#[test]
fn stores_sharing_storage_are_last_writer_wins() {
    let storage = MemoryStore::new();
    let mut tab_one = open(&storage);
    let mut tab_two = open(&storage);

    tab_one.add(item("from-one", 10), 1);
    tab_two.add(item("from-two", 10), 1);

    let reloaded = open(&storage);
    let ids: Vec<_> = reloaded.lines().iter().map(|l| l.id().as_str()).collect();
    assert_eq!(ids, vec!["from-two"]);
}
