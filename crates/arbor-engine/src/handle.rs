//! Shared ownership with deterministic last-release destruction.
//!
//! [`Handle<T>`] is the one ownership primitive used across the workspace.
//! It plays both roles an engine traditionally splits in two:
//!
//! - an *external* counted handle: create it from a value, copy it with
//!   [`Clone`], rebind it with [`Handle::assign`], drop it with
//!   [`Handle::reset`];
//! - an *intrusive-style* object that several subsystems `retain` and
//!   `release` explicitly. Call sites that hand out references before any
//!   long-lived owner exists (fonts registered in the
//!   [`FontSystem`](crate::text::FontSystem), layout params synthesized by a
//!   parent group) use [`Handle::retain`] / [`Handle::release`] so the
//!   last-release transition is observable.
//!
//! Counting is not atomic. Handles must stay on the thread that created them,
//! which `Rc` already enforces (`Handle<T>` is neither `Send` nor `Sync`).

use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

// ── Release ──────────────────────────────────────────────────────────────

/// Outcome of [`Handle::release`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Release {
    /// Other handles still reference the pointee; the payload is how many.
    Alive(usize),
    /// This call dropped the last reference and the pointee was destroyed.
    Destroyed,
}

impl Release {
    #[inline]
    pub fn is_destroyed(self) -> bool {
        matches!(self, Release::Destroyed)
    }
}

// ── Handle ───────────────────────────────────────────────────────────────

/// Nullable, reference-counted owner of a heap value.
///
/// Equality is pointer identity: two handles are equal iff they reference the
/// same allocation, or are both null.
pub struct Handle<T: ?Sized> {
    inner: Option<Rc<T>>,
}

impl<T> Handle<T> {
    /// Moves `value` to the heap and returns the first handle to it (count 1).
    #[inline]
    pub fn new(value: T) -> Self {
        Self { inner: Some(Rc::new(value)) }
    }
}

impl<T: ?Sized> Handle<T> {
    /// The empty handle. Owns nothing and has a count of zero.
    #[inline]
    pub const fn null() -> Self {
        Self { inner: None }
    }

    /// Adopts an existing `Rc`, sharing its count.
    #[inline]
    pub fn from_rc(rc: Rc<T>) -> Self {
        Self { inner: Some(rc) }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.inner.is_none()
    }

    /// Borrow the pointee, or `None` for a null handle.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.inner.as_deref()
    }

    /// Underlying `Rc`, for code that needs to hand a plain `Rc` to a library.
    #[inline]
    pub fn as_rc(&self) -> Option<&Rc<T>> {
        self.inner.as_ref()
    }

    /// Number of live handles referencing the pointee (0 for null).
    ///
    /// Observational only. Destruction decisions belong to [`release`](Self::release).
    #[inline]
    pub fn use_count(&self) -> usize {
        self.inner.as_ref().map_or(0, Rc::strong_count)
    }

    /// Rebind `self` to whatever `rhs` references.
    ///
    /// The new reference is taken before the old one is dropped, so assigning
    /// between two handles that already alias the same object never lets the
    /// shared count touch zero.
    pub fn assign(&mut self, rhs: &Handle<T>) {
        let incoming = rhs.inner.clone();
        let outgoing = std::mem::replace(&mut self.inner, incoming);
        drop(outgoing);
    }

    /// Drop this reference and become null. Frees the pointee if this was the last one.
    #[inline]
    pub fn reset(&mut self) {
        self.inner = None;
    }

    /// Take an additional reference.
    ///
    /// # Panics
    /// Panics on a null handle: there is no object left to keep alive.
    #[must_use = "the retained reference is released as soon as it is dropped"]
    pub fn retain(&self) -> Self {
        match &self.inner {
            Some(rc) => Self { inner: Some(Rc::clone(rc)) },
            None => panic!("retain() called on a null Handle"),
        }
    }

    /// Give up this reference, reporting whether the pointee was destroyed.
    ///
    /// This is the only place a caller learns about the last-release
    /// transition; reading [`use_count`](Self::use_count) first and acting on
    /// it is racy against other owners and not supported.
    ///
    /// # Panics
    /// Panics on a null handle (double release).
    pub fn release(self) -> Release {
        let Some(rc) = self.inner else {
            panic!("release() called on a null Handle");
        };
        let remaining = Rc::strong_count(&rc) - 1;
        drop(rc);
        if remaining == 0 { Release::Destroyed } else { Release::Alive(remaining) }
    }

    /// Non-owning reference to the same pointee.
    pub fn downgrade(&self) -> WeakHandle<T> {
        WeakHandle { inner: self.inner.as_ref().map(Rc::downgrade) }
    }

    /// `true` if both handles reference the same allocation (or are both null).
    #[inline]
    pub fn ptr_eq(&self, other: &Handle<T>) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Maps the allocation to a different (usually unsized) view of it.
    ///
    /// The result shares this handle's count. Used to turn a typed
    /// `Handle<RefCell<Label>>` into a `Handle<RefCell<dyn View>>`.
    pub fn map_rc<U: ?Sized>(self, f: impl FnOnce(Rc<T>) -> Rc<U>) -> Handle<U> {
        Handle { inner: self.inner.map(f) }
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: ?Sized> Default for Handle<T> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized> PartialEq for Handle<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: ?Sized> Eq for Handle<T> {}

impl<T: ?Sized> Deref for Handle<T> {
    type Target = T;

    /// # Panics
    /// Panics when dereferencing a null handle.
    #[inline]
    fn deref(&self) -> &T {
        match self.inner.as_deref() {
            Some(v) => v,
            None => panic!("dereferenced a null Handle"),
        }
    }
}

impl<T: ?Sized> From<Rc<T>> for Handle<T> {
    #[inline]
    fn from(rc: Rc<T>) -> Self {
        Self::from_rc(rc)
    }
}

impl<T: ?Sized> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(rc) => f
                .debug_struct("Handle")
                .field("ptr", &Rc::as_ptr(rc).cast::<()>())
                .field("count", &Rc::strong_count(rc))
                .finish(),
            None => f.write_str("Handle(null)"),
        }
    }
}

// ── WeakHandle ───────────────────────────────────────────────────────────

/// Non-owning companion to [`Handle`]. Does not keep the pointee alive.
pub struct WeakHandle<T: ?Sized> {
    inner: Option<Weak<T>>,
}

impl<T: ?Sized> WeakHandle<T> {
    pub const fn new() -> Self {
        Self { inner: None }
    }

    /// Owning handle if the pointee is still alive.
    pub fn upgrade(&self) -> Option<Handle<T>> {
        self.inner.as_ref().and_then(Weak::upgrade).map(Handle::from_rc)
    }

    /// `true` if this weak reference points at the same allocation as `handle`.
    pub fn points_to(&self, handle: &Handle<T>) -> bool {
        match (&self.inner, handle.as_rc()) {
            (Some(weak), Some(rc)) => std::ptr::addr_eq(weak.as_ptr(), Rc::as_ptr(rc)),
            _ => false,
        }
    }
}

impl<T: ?Sized> Clone for WeakHandle<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: ?Sized> Default for WeakHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for WeakHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WeakHandle")
    }
}
