//! Compound observables joining several sources into one tuple.
//!
//! A compound recomputes the full tuple whenever any source fires, and
//! delivers at most one `Current` snapshot per subscription no matter how
//! many sources back it. Subscription handles are grouped, so disposing
//! the compound handle severs every per-source registration at once.

use crate::observable::Observable;
use crate::projection::ReadOnlyProjection;
use alloc::rc::Rc;
use alloc::vec;
use core::cell::RefCell;
use tether_core::ChangeEvent;
use tether_observe::UpdateHandler;

/// Joins two observables into a tuple-valued projection.
pub fn compound2<A, B>(a: A, b: B) -> ReadOnlyProjection<(A::Value, B::Value)>
where
    A: Observable + 'static,
    B: Observable + 'static,
{
    let a = Rc::new(a);
    let b = Rc::new(b);

    let read = {
        let a = a.clone();
        let b = b.clone();
        move || (a.current(), b.current())
    };

    let register = move |handler: UpdateHandler<(A::Value, B::Value)>| {
        let tuple = (a.current(), b.current());
        if handler.include_current() {
            handler.deliver(&ChangeEvent::current(tuple.clone()));
        }
        let previous = Rc::new(RefCell::new(tuple));
        let handler = Rc::new(handler.without_current());

        let recompute = {
            let a = a.clone();
            let b = b.clone();
            move || (a.current(), b.current())
        };

        let on_source = {
            let previous = previous.clone();
            let handler = handler.clone();
            move || {
                let new = recompute();
                let old = previous.replace(new.clone());
                handler.deliver(&ChangeEvent::changed(old, new));
            }
        };

        let fire_a = on_source.clone();
        let fire_b = on_source;
        let handle_a = a.register(UpdateHandler::update(false, move |_: &A::Value| fire_a()));
        let handle_b = b.register(UpdateHandler::update(false, move |_: &B::Value| fire_b()));
        tether_observe::ObservationHandle::group(vec![handle_a, handle_b])
    };

    ReadOnlyProjection::new(read, register)
}

/// Joins three observables into a tuple-valued projection.
pub fn compound3<A, B, C>(a: A, b: B, c: C) -> ReadOnlyProjection<(A::Value, B::Value, C::Value)>
where
    A: Observable + 'static,
    B: Observable + 'static,
    C: Observable + 'static,
{
    let ab = compound2(a, b);
    compound2(ab, c).map(|((a, b), c)| (a.clone(), b.clone(), c.clone()))
}

/// Joins four observables into a tuple-valued projection.
pub fn compound4<A, B, C, D>(
    a: A,
    b: B,
    c: C,
    d: D,
) -> ReadOnlyProjection<(A::Value, B::Value, C::Value, D::Value)>
where
    A: Observable + 'static,
    B: Observable + 'static,
    C: Observable + 'static,
    D: Observable + 'static,
{
    let ab = compound2(a, b);
    let cd = compound2(c, d);
    compound2(ab, cd).map(|((a, b), (c, d))| (a.clone(), b.clone(), c.clone(), d.clone()))
}
