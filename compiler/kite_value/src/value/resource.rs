//! Refcounted host handles.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

type ReleaseFn = Box<dyn FnOnce(Box<dyn Any>)>;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

struct ResourceCell {
    id: u64,
    kind: String,
    payload: RefCell<Option<Box<dyn Any>>>,
    release: Cell<Option<ReleaseFn>>,
}

impl Drop for ResourceCell {
    fn drop(&mut self) {
        if let (Some(release), Some(payload)) = (self.release.take(), self.payload.get_mut().take())
        {
            tracing::trace!(kind = %self.kind, id = self.id, "releasing resource");
            release(payload);
        }
    }
}

/// Opaque host payload shared by every copy of the value.
///
/// Copies share one cell; mutations through [`Resource::with_payload`] are
/// visible from all of them. The release callback runs once, when the last
/// copy is dropped.
#[derive(Clone)]
pub struct Resource(Rc<ResourceCell>);

impl Resource {
    pub fn new<T: Any>(kind: impl Into<String>, payload: T) -> Self {
        Self::build(kind.into(), Box::new(payload), None)
    }

    /// Resource whose payload is handed to `release` on the last drop.
    pub fn with_release<T: Any>(
        kind: impl Into<String>,
        payload: T,
        release: impl FnOnce(T) + 'static,
    ) -> Self {
        let release: ReleaseFn = Box::new(move |payload: Box<dyn Any>| {
            if let Ok(payload) = payload.downcast::<T>() {
                release(*payload);
            }
        });
        Self::build(kind.into(), Box::new(payload), Some(release))
    }

    fn build(kind: String, payload: Box<dyn Any>, release: Option<ReleaseFn>) -> Self {
        Resource(Rc::new(ResourceCell {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            payload: RefCell::new(Some(payload)),
            release: Cell::new(release),
        }))
    }

    /// Process-unique handle number.
    #[inline]
    pub fn id(&self) -> u64 {
        self.0.id
    }

    #[inline]
    pub fn kind(&self) -> &str {
        &self.0.kind
    }

    /// Number of live copies.
    #[inline]
    pub fn refcount(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Resource) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Run `f` on the payload if it has type `T`.
    ///
    /// Returns `None` on a type mismatch or a reentrant borrow.
    pub fn with_payload<T: Any, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut slot = self.0.payload.try_borrow_mut().ok()?;
        let payload = slot.as_mut()?.downcast_mut::<T>()?;
        Some(f(payload))
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource({}#{})", self.0.kind, self.0.id)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource({}#{}, rc={})", self.0.kind, self.0.id, self.refcount())
    }
}
