//! Persistence adapter for designs.

mod memory;

pub use memory::MemoryStore;

use crate::design::{CanvasSize, Design};
use crate::element::Element;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Design not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Store error: {0}")]
    Other(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future for async store operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Partial update to a persisted design.
///
/// Only the set fields are written; everything else keeps its stored value.
#[derive(Debug, Clone, Default)]
pub struct DesignPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub elements: Option<Vec<Element>>,
    pub backside_elements: Option<Vec<Element>>,
    pub canvas_size: Option<CanvasSize>,
    pub canvas_background: Option<String>,
    pub is_shared: Option<bool>,
}

impl DesignPatch {
    /// Patch carrying the full editable content of `design`.
    pub fn from_design(design: &Design) -> Self {
        Self {
            title: Some(design.title.clone()),
            description: design.description.clone(),
            elements: Some(design.elements.clone()),
            backside_elements: Some(design.backside_elements.clone()),
            canvas_size: Some(design.canvas_size),
            canvas_background: Some(design.canvas_background.clone()),
            is_shared: Some(design.is_shared),
        }
    }

    /// Apply this patch to a stored design.
    pub fn apply_to(&self, design: &mut Design) {
        if let Some(title) = &self.title {
            design.title = title.clone();
        }
        if let Some(description) = &self.description {
            design.description = Some(description.clone());
        }
        if let Some(elements) = &self.elements {
            design.elements = elements.clone();
        }
        if let Some(backside) = &self.backside_elements {
            design.backside_elements = backside.clone();
        }
        if let Some(size) = self.canvas_size {
            design.canvas_size = size;
        }
        if let Some(background) = &self.canvas_background {
            design.canvas_background = background.clone();
        }
        if let Some(shared) = self.is_shared {
            design.is_shared = shared;
        }
    }
}

/// Trait for design storage backends.
///
/// All calls are asynchronous and may fail; callers treat any error as
/// recoverable. `create_design` and `update_design` return the full
/// canonical design, which callers adopt verbatim.
pub trait DesignStore: Send + Sync {
    /// Fetch a design by id. `Ok(None)` if it does not exist.
    fn get_design(&self, id: &str) -> BoxFuture<'_, StoreResult<Option<Design>>>;

    /// Persist a new design. The store assigns `id` and `created_at`.
    fn create_design(&self, design: Design) -> BoxFuture<'_, StoreResult<Design>>;

    /// Apply a partial update. `Ok(None)` if the design does not exist.
    fn update_design(&self, id: &str, patch: DesignPatch)
        -> BoxFuture<'_, StoreResult<Option<Design>>>;

    /// Delete a design. Returns whether anything was removed.
    fn delete_design(&self, id: &str) -> BoxFuture<'_, StoreResult<bool>>;

    /// List all stored designs.
    fn list_designs(&self) -> BoxFuture<'_, StoreResult<Vec<Design>>>;
}

/// Simple polling executor for driving store futures in tests.
#[cfg(test)]
pub(crate) fn block_on<F: std::future::Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
