//! Explicit, cycle-aware deep cloning.
//!
//! Expansion hands every candidate operation its own independent copy of the
//! agent, so cloning is on the hot path and must be safe for agent graphs
//! with shared or self-referential substructure. Instead of a reflective
//! copy, each agent type spells out its own recursive clone and threads a
//! [`CloneMap`] through it; `Rc`-backed structure is memoized by address so
//! sharing survives the copy and cycles terminate.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A value that can produce a fully independent copy of itself.
///
/// Mutating the copy must never affect the original or any other copy.
pub trait DeepClone {
    /// Clone with a fresh memo map. This is the entry point the solver uses.
    fn deep_clone(&self) -> Self
    where
        Self: Sized,
    {
        self.deep_clone_with(&mut CloneMap::default())
    }

    /// Clone within an in-progress traversal. Composite types forward `map`
    /// to every field so shared `Rc` structure is cloned exactly once.
    fn deep_clone_with(&self, map: &mut CloneMap) -> Self
    where
        Self: Sized;
}

/// Memo table for one deep-clone traversal, keyed by source `Rc` address.
#[derive(Default)]
pub struct CloneMap {
    seen: HashMap<usize, Rc<dyn Any>>,
}

macro_rules! deep_clone_by_copy {
    ($($ty:ty),* $(,)?) => {
        $(
            impl DeepClone for $ty {
                fn deep_clone_with(&self, _map: &mut CloneMap) -> Self {
                    *self
                }
            }
        )*
    };
}

deep_clone_by_copy!(bool, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl DeepClone for String {
    fn deep_clone_with(&self, _map: &mut CloneMap) -> Self {
        self.clone()
    }
}

impl<T: DeepClone> DeepClone for Option<T> {
    fn deep_clone_with(&self, map: &mut CloneMap) -> Self {
        self.as_ref().map(|value| value.deep_clone_with(map))
    }
}

impl<T: DeepClone> DeepClone for Vec<T> {
    fn deep_clone_with(&self, map: &mut CloneMap) -> Self {
        self.iter().map(|value| value.deep_clone_with(map)).collect()
    }
}

impl<T: DeepClone> DeepClone for Box<T> {
    fn deep_clone_with(&self, map: &mut CloneMap) -> Self {
        Box::new(self.as_ref().deep_clone_with(map))
    }
}

/// Shared, mutable substructure. The memo map guarantees one source
/// allocation maps to exactly one cloned allocation per traversal, and the
/// placeholder-then-fill order makes self-referential graphs terminate: the
/// placeholder is registered before the contents are visited, so a cycle
/// resolves to the clone under construction instead of recursing forever.
impl<T> DeepClone for Rc<RefCell<T>>
where
    T: DeepClone + Default + 'static,
{
    fn deep_clone_with(&self, map: &mut CloneMap) -> Self {
        let key = Rc::as_ptr(self) as *const () as usize;
        if let Some(hit) = map.seen.get(&key) {
            if let Ok(existing) = Rc::clone(hit).downcast::<RefCell<T>>() {
                return existing;
            }
        }

        let copy: Rc<RefCell<T>> = Rc::new(RefCell::new(T::default()));
        map.seen.insert(key, Rc::clone(&copy) as Rc<dyn Any>);
        let contents = self.borrow().deep_clone_with(map);
        *copy.borrow_mut() = contents;
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Pack {
        weight: u32,
        next: Option<Rc<RefCell<Pack>>>,
    }

    impl DeepClone for Pack {
        fn deep_clone_with(&self, map: &mut CloneMap) -> Self {
            Self {
                weight: self.weight.deep_clone_with(map),
                next: self.next.deep_clone_with(map),
            }
        }
    }

    #[test]
    fn clone_is_independent() {
        let original = vec![1u32, 2, 3];
        let mut copy = original.deep_clone();
        copy[0] = 99;
        assert_eq!(original[0], 1);
    }

    #[test]
    fn shared_substructure_clones_once() {
        let shared = Rc::new(RefCell::new(Pack {
            weight: 7,
            next: None,
        }));
        let holder = Pack {
            weight: 0,
            next: Some(Rc::clone(&shared)),
        };
        let other = Pack {
            weight: 1,
            next: Some(Rc::clone(&shared)),
        };

        let mut map = CloneMap::default();
        let holder_copy = holder.deep_clone_with(&mut map);
        let other_copy = other.deep_clone_with(&mut map);

        let a = holder_copy.next.unwrap();
        let b = other_copy.next.unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert!(!Rc::ptr_eq(&a, &shared));

        a.borrow_mut().weight = 50;
        assert_eq!(shared.borrow().weight, 7);
    }

    #[test]
    fn self_referential_graph_terminates() {
        let node = Rc::new(RefCell::new(Pack {
            weight: 3,
            next: None,
        }));
        node.borrow_mut().next = Some(Rc::clone(&node));

        let copy = node.deep_clone();
        assert_eq!(copy.borrow().weight, 3);
        let inner = copy.borrow().next.as_ref().map(Rc::clone).unwrap();
        assert!(Rc::ptr_eq(&copy, &inner));
        assert!(!Rc::ptr_eq(&copy, &node));
    }
}
