//! Context - namespaced provide/inject.
//!
//! A thread-local service locator: one owner provides a handle under a
//! namespace string, any number of consumers inject it. Handles are cloned
//! on inject, so registries and selections (cheap `Rc` handles) are shared,
//! never copied.
//!
//! # Example
//!
//! ```ignore
//! use spark_headless::{ContextKey, Registry};
//!
//! const TABS: &str = "app:tabs";
//!
//! let key: ContextKey<Registry<&str>> = ContextKey::new(TABS);
//! key.provide(Registry::default());
//!
//! let tabs = key.inject()?;
//! ```

use std::any::{type_name, Any};
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::trace;

use crate::error::ContextError;

thread_local! {
    static CONTEXT: RefCell<HashMap<String, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Typed handle to one namespace.
pub struct ContextKey<T> {
    namespace: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextKey")
            .field("namespace", &self.namespace)
            .field("type", &type_name::<T>())
            .finish()
    }
}

impl<T: Clone + 'static> ContextKey<T> {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            _marker: PhantomData,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Provide `value`, returning the previous value of the same type.
    pub fn provide(&self, value: T) -> Option<T> {
        trace!(namespace = %self.namespace, "provide");
        let previous = CONTEXT.with(|ctx| {
            ctx.borrow_mut()
                .insert(self.namespace.clone(), Rc::new(value) as Rc<dyn Any>)
        });
        previous.and_then(|rc| rc.downcast_ref::<T>().cloned())
    }

    /// Clone of the provided value.
    pub fn inject(&self) -> Result<T, ContextError> {
        let entry = CONTEXT.with(|ctx| ctx.borrow().get(&self.namespace).cloned());
        let Some(entry) = entry else {
            return Err(ContextError::Missing {
                namespace: self.namespace.clone(),
            });
        };
        entry
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| ContextError::TypeMismatch {
                namespace: self.namespace.clone(),
                expected: type_name::<T>(),
            })
    }

    /// Like [`inject`](Self::inject), `None` on any failure.
    pub fn try_inject(&self) -> Option<T> {
        self.inject().ok()
    }

    /// Remove the namespace. Returns true if something was provided.
    pub fn forget(&self) -> bool {
        CONTEXT.with(|ctx| ctx.borrow_mut().remove(&self.namespace).is_some())
    }
}

/// Drop every provided value (for testing).
pub fn reset_context() {
    CONTEXT.with(|ctx| ctx.borrow_mut().clear());
}
