//! Traversal of a cursor's children with a Rust closure.
//!
//! `clang_visitChildren` drives the walk and calls back into C for every node.
//! The closure is reached through the client-data pointer: it points at a
//! `VisitState` on the stack of [`Cursor::visit_children`], which lives
//! exactly as long as that one call. A monomorphized trampoline turns the raw
//! arguments into [`Cursor`] views, runs the closure, and translates whatever
//! it returned into a control code.
//!
//! Panics never cross the C frames: the trampoline catches them, tells
//! libclang to stop, and the panic is resumed once `clang_visitChildren` has
//! returned.

use std::any::{self, Any};
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use tracing::{trace, warn};

use crate::error::Result;
use crate::ffi::{self, CXChildVisitResult, CXChildVisit_Break, CXClientData, CXCursor};
use crate::handle::{Cursor, Handle};
use crate::types::{ChildVisit, VisitStatus};

/// A value a traversal closure may return.
///
/// [`ChildVisit`] is the natural choice. Integers are accepted when they equal
/// one of the libclang codes (0, 1, 2). Everything else (other integers, `()`,
/// strings, `None`, `Err`) stops the traversal and logs a warning.
pub trait VisitResult {
    /// The control code this value stands for, or `None` if it names none.
    fn to_child_visit(self) -> Option<ChildVisit>;
}

impl VisitResult for ChildVisit {
    fn to_child_visit(self) -> Option<ChildVisit> {
        Some(self)
    }
}

macro_rules! int_visit_result {
    ($($ty:ty),*) => {
        $(
            impl VisitResult for $ty {
                fn to_child_visit(self) -> Option<ChildVisit> {
                    i64::try_from(self).ok().and_then(ChildVisit::from_code)
                }
            }
        )*
    };
}

int_visit_result!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl VisitResult for () {
    fn to_child_visit(self) -> Option<ChildVisit> {
        None
    }
}

impl VisitResult for &str {
    fn to_child_visit(self) -> Option<ChildVisit> {
        None
    }
}

impl VisitResult for String {
    fn to_child_visit(self) -> Option<ChildVisit> {
        None
    }
}

impl<T: VisitResult> VisitResult for Option<T> {
    fn to_child_visit(self) -> Option<ChildVisit> {
        self.and_then(VisitResult::to_child_visit)
    }
}

impl<T: VisitResult, E> VisitResult for std::result::Result<T, E> {
    fn to_child_visit(self) -> Option<ChildVisit> {
        self.ok().and_then(VisitResult::to_child_visit)
    }
}

/// Per-call state reached through the client-data pointer.
struct VisitState<'a, 'tu, F> {
    callback: &'a mut F,
    panic: Option<Box<dyn Any + Send>>,
    _unit: PhantomData<Cursor<'tu>>,
}

unsafe extern "C" fn visit_trampoline<'tu, F, R>(
    current: CXCursor,
    parent: CXCursor,
    data: CXClientData,
) -> CXChildVisitResult
where
    F: FnMut(Cursor<'tu>, Cursor<'tu>) -> R,
    R: VisitResult,
{
    let state = &mut *(data as *mut VisitState<'_, 'tu, F>);
    if state.panic.is_some() {
        return CXChildVisit_Break;
    }

    let current = Cursor::from_raw(current);
    let parent = Cursor::from_raw(parent);
    let callback = &mut *state.callback;

    match panic::catch_unwind(AssertUnwindSafe(|| callback(current, parent).to_child_visit())) {
        Ok(Some(visit)) => visit.code(),
        Ok(None) => {
            warn!(
                result = any::type_name::<R>(),
                "visitor returned no recognized control code, stopping traversal"
            );
            CXChildVisit_Break
        }
        Err(payload) => {
            state.panic = Some(payload);
            CXChildVisit_Break
        }
    }
}

impl<'tu> Cursor<'tu> {
    /// Visit the children of this cursor.
    ///
    /// `callback` receives each visited cursor and its parent, in document
    /// order, and decides whether to stop, skip the node's children, or
    /// descend into them. The closure may itself start a nested traversal.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cindex::{ChildVisit, Cursor};
    /// # fn example(root: Cursor<'_>) -> cindex::Result<()> {
    /// root.visit_children(|cursor, _parent| {
    ///     println!("{}", cursor.spelling().unwrap_or_default());
    ///     ChildVisit::Recurse
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Panics
    ///
    /// A panic in `callback` stops the traversal and is resumed after
    /// libclang has returned.
    pub fn visit_children<F, R>(&self, mut callback: F) -> Result<VisitStatus>
    where
        F: FnMut(Cursor<'tu>, Cursor<'tu>) -> R,
        R: VisitResult,
    {
        let lib = ffi::library()?;
        let mut state = VisitState {
            callback: &mut callback,
            panic: None,
            _unit: PhantomData,
        };

        trace!(op = "clang_visitChildren", "calling libclang");
        let code = unsafe {
            (lib.clang_visitChildren)(
                self.raw(),
                Some(visit_trampoline::<F, R>),
                &mut state as *mut VisitState<'_, 'tu, F> as CXClientData,
            )
        };

        if let Some(payload) = state.panic.take() {
            panic::resume_unwind(payload);
        }
        Ok(VisitStatus::from(code))
    }

    /// The direct children of this cursor.
    pub fn children(&self) -> Result<Vec<Cursor<'tu>>> {
        let mut children = Vec::new();
        self.visit_children(|child, _| {
            children.push(child);
            ChildVisit::Continue
        })?;
        Ok(children)
    }
}
