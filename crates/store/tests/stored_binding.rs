//! Proxies bound over store-backed slots behave like in-memory bindings,
//! with writes additionally reaching the store.

use std::cell::RefCell;
use std::rc::Rc;
use tether_binding::{Observable, ValueProxy};
use tether_observe::{Model, Registry};
use tether_store::{BackingStore, MemoryStore, StoredProperty};

struct Settings {
    registry: Registry,
    volume: StoredProperty<i64, MemoryStore<i64>>,
}

impl Model for Settings {
    fn registry(&self) -> &Registry {
        &self.registry
    }
}

fn settings(store: &Rc<RefCell<MemoryStore<i64>>>) -> Rc<RefCell<Settings>> {
    Rc::new(RefCell::new(Settings {
        registry: Registry::new(),
        volume: StoredProperty::open(store.clone(), "volume", 50).unwrap(),
    }))
}

fn volume_prop(m: &Settings) -> &StoredProperty<i64, MemoryStore<i64>> {
    &m.volume
}

fn volume_prop_mut(m: &mut Settings) -> &mut StoredProperty<i64, MemoryStore<i64>> {
    &mut m.volume
}

fn volume_proxy(model: &Rc<RefCell<Settings>>) -> ValueProxy<i64> {
    ValueProxy::bind(model, volume_prop, volume_prop_mut)
}

#[test]
fn test_proxy_write_reaches_store_and_observers() {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let model = settings(&store);
    let proxy = volume_proxy(&model);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let _handle = proxy.subscribe(true, move |v| s.borrow_mut().push(*v));

    proxy.set(80);
    assert_eq!(*seen.borrow(), vec![50, 80]);
    assert_eq!(store.borrow().load("volume").unwrap(), Some(80));
}

#[test]
fn test_rebound_model_starts_from_persisted_value() {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    {
        let model = settings(&store);
        volume_proxy(&model).set(12);
    }

    let model = settings(&store);
    assert_eq!(volume_proxy(&model).get(), 12);
}

#[test]
fn test_change_filter_over_stored_slot() {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let model = settings(&store);
    let proxy = volume_proxy(&model);

    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let _handle = proxy.on_change(false, move |_| *c.borrow_mut() += 1);

    proxy.set(50); // same as default
    assert_eq!(*count.borrow(), 0);
    proxy.set(60);
    assert_eq!(*count.borrow(), 1);
}
