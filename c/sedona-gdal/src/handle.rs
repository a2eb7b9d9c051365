// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Ownership-tracked native handles
//!
//! A [NativeProxy] stands in for one object on the GDAL heap. It records the
//! object's address, whether this proxy is responsible for releasing it, and
//! an optional keep-alive reference to whatever actually owns the object when
//! the proxy does not (e.g., the feature that a field definition view was
//! obtained from).
//!
//! The three states of a proxy are modelled by [Binding]. There is no
//! transition from `Borrowed` back to `Owned`, so once ownership has been given
//! away (or the proxy disposed) the same proxy can never release the handle.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::os::raw::c_void;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{Result, SedonaGdalError};
use crate::gdal_dyn_bindgen::GdalApi;
use crate::library::GdalLibrary;

/// Opaque address of a native object. Null is the empty sentinel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle(*mut c_void);

// The address is never dereferenced on the Rust side
unsafe impl Send for NativeHandle {}
unsafe impl Sync for NativeHandle {}

impl NativeHandle {
    pub const NULL: NativeHandle = NativeHandle(std::ptr::null_mut());

    pub fn from_raw(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

impl Debug for NativeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NativeHandle({:p})", self.0)
    }
}

impl Default for NativeHandle {
    fn default() -> Self {
        Self::NULL
    }
}

/// Something a proxy can keep alive for as long as it needs a native object
/// owned by it
pub trait Lifeline: Send + Sync {
    /// Run `func` while the native state backing this object is valid,
    /// holding it valid until `func` returns
    ///
    /// Returns false without running `func` when that state is gone.
    fn while_live(&self, func: &mut dyn FnMut()) -> bool;

    /// Whether the native state backing this object is still valid
    fn is_live(&self) -> bool {
        self.while_live(&mut || {})
    }
}

pub type KeepAlive = Arc<dyn Lifeline>;

/// Per-class release policy for a wrapped native type
pub trait NativeKind: Send + Sync + 'static {
    /// Class name used in logs and errors
    const NAME: &'static str;

    /// Release a native object owned by Rust
    ///
    /// Classes without an externally callable destructor return
    /// [SedonaGdalError::DisposalRejected].
    fn release(api: &GdalApi, handle: NativeHandle) -> Result<()>;
}

/// The handle of a proxy together with who is responsible for releasing it
#[derive(Clone)]
pub enum Binding {
    /// This proxy releases the handle
    Owned {
        handle: NativeHandle,
        keep_alive: Option<KeepAlive>,
    },
    /// Something else (a parent object or GDAL itself) releases the handle
    Borrowed {
        handle: NativeHandle,
        keep_alive: Option<KeepAlive>,
    },
    /// Disposed; the handle has been cleared
    Released,
}

impl Binding {
    pub fn handle(&self) -> NativeHandle {
        match self {
            Binding::Owned { handle, .. } | Binding::Borrowed { handle, .. } => *handle,
            Binding::Released => NativeHandle::NULL,
        }
    }

    pub fn owns_native(&self) -> bool {
        matches!(self, Binding::Owned { .. })
    }

    pub fn keep_alive(&self) -> Option<&KeepAlive> {
        match self {
            Binding::Owned { keep_alive, .. } | Binding::Borrowed { keep_alive, .. } => {
                keep_alive.as_ref()
            }
            Binding::Released => None,
        }
    }

    /// Owned handles only need to be non-null; borrowed ones also pin their
    /// parent for the duration of `func`
    fn while_live(&self, func: &mut dyn FnMut()) -> bool {
        match self {
            Binding::Owned { handle, .. } | Binding::Borrowed { handle, keep_alive: None }
                if !handle.is_null() =>
            {
                func();
                true
            }
            Binding::Borrowed {
                handle,
                keep_alive: Some(parent),
            } if !handle.is_null() => parent.while_live(func),
            _ => false,
        }
    }
}

impl Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Owned { handle, keep_alive } => f
                .debug_struct("Owned")
                .field("handle", handle)
                .field("keep_alive", &keep_alive.is_some())
                .finish(),
            Binding::Borrowed { handle, keep_alive } => f
                .debug_struct("Borrowed")
                .field("handle", handle)
                .field("keep_alive", &keep_alive.is_some())
                .finish(),
            Binding::Released => write!(f, "Released"),
        }
    }
}

/// Rust-side stand-in for a native object of class `K`
///
/// Forwarding calls hold the binding lock in shared mode for the duration of
/// the native call; [NativeProxy::dispose] holds it exclusively across the
/// check-release-clear sequence, so concurrent disposals release at most once
/// and never while a call is using the handle.
pub struct NativeProxy<K: NativeKind> {
    library: Arc<GdalLibrary>,
    binding: RwLock<Binding>,
    /// Bumped under the exclusive lock whenever the native object frees or
    /// hands out objects it owns
    generation: AtomicU64,
    _kind: PhantomData<fn() -> K>,
}

impl<K: NativeKind> NativeProxy<K> {
    /// Record a handle, whether this proxy owns it, and an optional parent that
    /// must outlive it
    pub fn new(
        library: Arc<GdalLibrary>,
        handle: NativeHandle,
        owns_native: bool,
        keep_alive: Option<KeepAlive>,
    ) -> Self {
        let binding = if handle.is_null() {
            Binding::Released
        } else if owns_native {
            Binding::Owned { handle, keep_alive }
        } else {
            Binding::Borrowed { handle, keep_alive }
        };

        Self {
            library,
            binding: RwLock::new(binding),
            generation: AtomicU64::new(0),
            _kind: PhantomData,
        }
    }

    /// Proxy for a handle returned by a constructing call
    pub fn owned(library: Arc<GdalLibrary>, handle: NativeHandle) -> Self {
        Self::new(library, handle, true, None)
    }

    /// Proxy for a handle into state owned by `parent` (or by GDAL when `None`)
    pub fn view(library: Arc<GdalLibrary>, handle: NativeHandle, parent: Option<KeepAlive>) -> Self {
        Self::new(library, handle, false, parent)
    }

    pub fn library(&self) -> &Arc<GdalLibrary> {
        &self.library
    }

    /// The current handle (null once disposed)
    pub fn handle(&self) -> NativeHandle {
        self.binding.read_recursive().handle()
    }

    pub fn owns_native(&self) -> bool {
        self.binding.read_recursive().owns_native()
    }

    pub fn has_keep_alive(&self) -> bool {
        self.binding.read_recursive().keep_alive().is_some()
    }

    /// A snapshot of the current binding
    pub fn binding(&self) -> Binding {
        self.binding.read_recursive().clone()
    }

    /// Give release responsibility away and return the handle
    ///
    /// `new_owner` is kept alive by this proxy from now on. Calling this on an
    /// already disowned proxy only replaces the keep-alive reference.
    pub fn disown(&self, new_owner: Option<KeepAlive>) -> NativeHandle {
        let mut binding = self.binding.write();
        let handle = binding.handle();
        if !handle.is_null() {
            *binding = Binding::Borrowed {
                handle,
                keep_alive: new_owner,
            };
        }
        handle
    }

    /// Keep `parent` alive for as long as this proxy exists without changing
    /// ownership, and return the handle
    pub fn bind_parent(&self, parent: Option<KeepAlive>) -> NativeHandle {
        let mut binding = self.binding.write();
        match &mut *binding {
            Binding::Owned { handle, keep_alive } | Binding::Borrowed { handle, keep_alive } => {
                *keep_alive = parent;
                *handle
            }
            Binding::Released => NativeHandle::NULL,
        }
    }

    /// Release the native object if this proxy owns it, then clear the handle
    /// and drop the keep-alive reference
    ///
    /// Safe to call any number of times; only the first call on an owning
    /// proxy reaches the native destructor.
    pub fn dispose(&self) -> Result<()> {
        let previous = std::mem::replace(&mut *self.binding.write(), Binding::Released);
        self.release_binding(previous)
    }

    /// Run a native call with this proxy's handle
    ///
    /// Fails with [SedonaGdalError::InvalidHandle] instead of calling into GDAL
    /// when the proxy was disposed or its keep-alive parent no longer holds
    /// the object.
    ///
    /// Every parent on the keep-alive chain stays pinned until the call
    /// returns, so a concurrent dispose of a parent waits for it.
    pub(crate) fn with_handle<R>(
        &self,
        func: impl FnOnce(&GdalApi, NativeHandle) -> Result<R>,
    ) -> Result<R> {
        let binding = self.binding.read();
        self.call_while_live(&binding, func)
    }

    /// [NativeProxy::with_handle] for calls that may free objects owned by
    /// this one
    ///
    /// Holds the lock exclusively and starts a new generation, which
    /// invalidates every view obtained through
    /// [NativeProxy::generation_keep_alive] before the call.
    pub(crate) fn with_handle_mut<R>(
        &self,
        func: impl FnOnce(&GdalApi, NativeHandle) -> Result<R>,
    ) -> Result<R> {
        let binding = self.binding.write();
        self.call_while_live(&binding, |api, handle| {
            self.generation.fetch_add(1, Ordering::Relaxed);
            func(api, handle)
        })
    }

    fn call_while_live<R>(
        &self,
        binding: &Binding,
        func: impl FnOnce(&GdalApi, NativeHandle) -> Result<R>,
    ) -> Result<R> {
        let handle = binding.handle();
        let mut func = Some(func);
        let mut out = None;
        binding.while_live(&mut || {
            if let Some(func) = func.take() {
                out = Some(self.library.call(|api| func(api, handle)));
            }
        });

        out.unwrap_or(Err(SedonaGdalError::InvalidHandle(K::NAME)))
    }

    /// A keep-alive reference for views of objects this one owns but may
    /// replace; it dies with this proxy or at the next
    /// [NativeProxy::with_handle_mut] call, whichever comes first
    pub(crate) fn generation_keep_alive(self: &Arc<Self>) -> KeepAlive {
        Arc::new(Generation {
            parent: self.clone(),
            generation: self.generation.load(Ordering::Relaxed),
        })
    }

    /// Hand this proxy's handle to `func` with the binding locked exclusively
    ///
    /// The binding afterwards follows whatever `func` recorded in its
    /// [Handoff] argument, even when `func` fails.
    pub(crate) fn transfer<R>(
        &self,
        func: impl FnOnce(NativeHandle, &mut Handoff) -> Result<R>,
    ) -> Result<R> {
        let mut binding = self.binding.write();
        let handle = binding.handle();
        let mut handoff = Handoff::Kept;
        let out = func(handle, &mut handoff);

        match handoff {
            Handoff::Kept => {}
            Handoff::Adopted(owner) if !handle.is_null() => {
                *binding = Binding::Borrowed {
                    handle,
                    keep_alive: Some(owner),
                };
            }
            Handoff::Adopted(_) | Handoff::Consumed => *binding = Binding::Released,
        }

        out
    }

    fn release_binding(&self, previous: Binding) -> Result<()> {
        match previous {
            Binding::Owned { handle, .. } if !handle.is_null() => {
                log::debug!("Releasing native {} {:?}", K::NAME, handle);
                self.library.call(|api| K::release(api, handle))
            }
            _ => Ok(()),
        }
    }
}

impl<K: NativeKind> Lifeline for NativeProxy<K> {
    fn while_live(&self, func: &mut dyn FnMut()) -> bool {
        self.binding.read_recursive().while_live(func)
    }
}

/// What became of a handle passed to [NativeProxy::transfer]
pub(crate) enum Handoff {
    /// Never reached native code; the proxy keeps its binding
    Kept,
    /// Now owned by whatever the keep-alive reference stands for
    Adopted(KeepAlive),
    /// Destroyed by native code
    Consumed,
}

/// Keep-alive that also expires when its parent starts a new generation
struct Generation<K: NativeKind> {
    parent: Arc<NativeProxy<K>>,
    generation: u64,
}

impl<K: NativeKind> Lifeline for Generation<K> {
    fn while_live(&self, func: &mut dyn FnMut()) -> bool {
        let mut ran = false;
        self.parent.while_live(&mut || {
            // Stable while the parent is pinned
            if self.parent.generation.load(Ordering::Relaxed) == self.generation {
                func();
                ran = true;
            }
        });
        ran
    }
}

impl<K: NativeKind> Debug for NativeProxy<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeProxy")
            .field("kind", &K::NAME)
            .field("binding", &*self.binding.read_recursive())
            .finish()
    }
}

impl<K: NativeKind> Drop for NativeProxy<K> {
    fn drop(&mut self) {
        let previous = std::mem::replace(self.binding.get_mut(), Binding::Released);
        if let Err(e) = self.release_binding(previous) {
            log::error!("Failed to release native {}: {e}", K::NAME);
        }
    }
}

/// The handle of an optional proxy, or the null sentinel
pub fn get_handle<K: NativeKind>(proxy: Option<&NativeProxy<K>>) -> NativeHandle {
    proxy.map_or(NativeHandle::NULL, |p| p.handle())
}

/// [NativeProxy::disown] for an optional proxy
pub fn disown<K: NativeKind>(
    proxy: Option<&NativeProxy<K>>,
    new_owner: Option<KeepAlive>,
) -> NativeHandle {
    proxy.map_or(NativeHandle::NULL, |p| p.disown(new_owner))
}

/// [NativeProxy::bind_parent] for an optional proxy
pub fn bind_parent<K: NativeKind>(
    proxy: Option<&NativeProxy<K>>,
    parent: Option<KeepAlive>,
) -> NativeHandle {
    proxy.map_or(NativeHandle::NULL, |p| p.bind_parent(parent))
}

/// Access to the proxy behind a typed wrapper
pub trait AsNativeProxy {
    type Kind: NativeKind;

    fn proxy(&self) -> &Arc<NativeProxy<Self::Kind>>;

    /// The proxy as a keep-alive reference for views into this object
    fn keep_alive(&self) -> KeepAlive {
        self.proxy().clone()
    }

    fn handle(&self) -> NativeHandle {
        self.proxy().handle()
    }

    fn owns_native(&self) -> bool {
        self.proxy().owns_native()
    }

    fn has_keep_alive(&self) -> bool {
        self.proxy().has_keep_alive()
    }

    fn dispose(&self) -> Result<()> {
        self.proxy().dispose()
    }
}

/// Implement [AsNativeProxy] plus the owned/view constructors for a wrapper
/// struct of the form `struct Name { proxy: Arc<NativeProxy<Kind>> }`
macro_rules! native_wrapper {
    ($wrapper:ident, $kind:ty) => {
        impl $crate::handle::AsNativeProxy for $wrapper {
            type Kind = $kind;

            fn proxy(&self) -> &std::sync::Arc<$crate::handle::NativeProxy<$kind>> {
                &self.proxy
            }
        }

        impl $wrapper {
            #[allow(dead_code)]
            pub(crate) fn from_owned(
                library: &std::sync::Arc<$crate::library::GdalLibrary>,
                handle: $crate::handle::NativeHandle,
            ) -> Option<Self> {
                (!handle.is_null()).then(|| Self {
                    proxy: std::sync::Arc::new($crate::handle::NativeProxy::owned(
                        library.clone(),
                        handle,
                    )),
                })
            }

            #[allow(dead_code)]
            pub(crate) fn from_view(
                library: &std::sync::Arc<$crate::library::GdalLibrary>,
                handle: $crate::handle::NativeHandle,
                parent: Option<$crate::handle::KeepAlive>,
            ) -> Option<Self> {
                (!handle.is_null()).then(|| Self {
                    proxy: std::sync::Arc::new($crate::handle::NativeProxy::view(
                        library.clone(),
                        handle,
                        parent,
                    )),
                })
            }

            /// Wrap a raw handle obtained elsewhere
            ///
            /// # Safety
            ///
            /// `handle` must be null or a live object of this class. If
            /// `owns_native` is true, nothing else may release it.
            pub unsafe fn from_raw(
                library: std::sync::Arc<$crate::library::GdalLibrary>,
                handle: $crate::handle::NativeHandle,
                owns_native: bool,
                parent: Option<$crate::handle::KeepAlive>,
            ) -> Self {
                Self {
                    proxy: std::sync::Arc::new($crate::handle::NativeProxy::new(
                        library,
                        handle,
                        owns_native,
                        parent,
                    )),
                }
            }
        }

        impl std::fmt::Debug for $wrapper {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($wrapper)).field(&self.proxy).finish()
            }
        }
    };
}

pub(crate) use native_wrapper;
