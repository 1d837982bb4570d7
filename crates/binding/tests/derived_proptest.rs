use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tether_binding::{field_selector, Observable, ValueProxy};
use tether_observe::{Model, Property, Registry};

#[derive(Clone, Debug, PartialEq)]
struct Size {
    width: i64,
    height: i64,
}

#[derive(Clone, Debug, PartialEq)]
struct Frame {
    x: i64,
    size: Size,
}

struct Window {
    registry: Registry,
    frame: Property<Frame>,
}

impl Model for Window {
    fn registry(&self) -> &Registry {
        &self.registry
    }
}

fn frame_prop(m: &Window) -> &Property<Frame> {
    &m.frame
}

fn frame_prop_mut(m: &mut Window) -> &mut Property<Frame> {
    &mut m.frame
}

fn frame_proxy() -> ValueProxy<Frame> {
    let model = Rc::new(RefCell::new(Window {
        registry: Registry::new(),
        frame: Property::new(Frame {
            x: 0,
            size: Size { width: 0, height: 0 },
        }),
    }));
    ValueProxy::bind(&model, frame_prop, frame_prop_mut)
}

proptest! {
    /// Property: a write through a derived proxy is immediately visible
    /// through every proxy over the same property, at any derivation depth.
    #[test]
    fn read_after_write_through_derivation(widths in prop::collection::vec(-100i64..100, 1..30)) {
        let proxy = frame_proxy();
        let width = proxy
            .derive(field_selector!(Frame, size))
            .derive(field_selector!(Size, width));

        for w in widths {
            width.set(w);
            prop_assert_eq!(width.get(), w);
            prop_assert_eq!(proxy.get().size.width, w);
        }
    }

    /// Property: subscribing to a derived field through a chain observes
    /// the same changes as subscribing through the composed selector.
    #[test]
    fn chained_and_composed_derivations_agree(
        frames in prop::collection::vec((-10i64..10, -10i64..10, -10i64..10), 1..30),
    ) {
        let proxy = frame_proxy();
        let size = field_selector!(Frame, size);
        let width = field_selector!(Size, width);

        let chained = proxy.derive(size.clone()).derive(width.clone());
        let composed = proxy.derive(size.compose(&width));

        let chained_seen = Rc::new(RefCell::new(Vec::new()));
        let composed_seen = Rc::new(RefCell::new(Vec::new()));
        let cs = chained_seen.clone();
        let os = composed_seen.clone();
        let _h1 = chained.on_change(false, move |w: &i64| cs.borrow_mut().push(*w));
        let _h2 = composed.on_change(false, move |w: &i64| os.borrow_mut().push(*w));

        for (x, w, h) in frames {
            proxy.set(Frame { x, size: Size { width: w, height: h } });
        }

        prop_assert_eq!(&*chained_seen.borrow(), &*composed_seen.borrow());
    }

    /// Property: a field-comparing subscription fires exactly when the
    /// selected field differs between adjacent writes, regardless of what
    /// the rest of the value does.
    #[test]
    fn comparing_tracks_only_selected_field(
        frames in prop::collection::vec((-10i64..10, -10i64..10), 1..30),
    ) {
        let proxy = frame_proxy();
        let width = field_selector!(Frame, size).compose(&field_selector!(Size, width));

        let fired = Rc::new(RefCell::new(0usize));
        let f = fired.clone();
        let _handle = proxy.on_change_comparing(vec![width.comparer()], false, move |_| {
            *f.borrow_mut() += 1;
        });

        let mut expected = 0usize;
        let mut last = 0i64;
        for (x, w) in frames {
            if w != last {
                expected += 1;
            }
            proxy.set(Frame { x, size: Size { width: w, height: 0 } });
            last = w;
        }

        prop_assert_eq!(*fired.borrow(), expected);
    }
}
