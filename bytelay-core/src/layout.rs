//! Layout descriptors: the declarative model of a binary wire/file format

use crate::context::Context;
use crate::error::MarshalError;
use crate::primitive::PrimKind;
use core::fmt;
use std::sync::Arc;

/// Length expression evaluated against the sibling-field context
pub type LenFn = Arc<dyn Fn(&Context) -> Result<i64, MarshalError> + Send + Sync>;

/// Length of an array or ASCII string field
///
/// `Fixed` is known at declaration time; `Dynamic` is computed at marshal
/// time from sibling fields already processed within the enclosing record.
#[derive(Clone)]
pub enum Len {
    /// Constant length known when the layout is declared
    Fixed(usize),
    /// Length computed from earlier sibling fields
    Dynamic(LenFn),
}

impl Len {
    /// Constant length
    pub fn fixed(n: usize) -> Self {
        Len::Fixed(n)
    }

    /// Length computed by an arbitrary expression over the context
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Context) -> Result<i64, MarshalError> + Send + Sync + 'static,
    {
        Len::Dynamic(Arc::new(f))
    }

    /// Length equal to the integer value of a named earlier sibling field
    pub fn of_field(name: &str) -> Self {
        let name = name.to_owned();
        Len::dynamic(move |ctx| ctx.len_of(&name))
    }

    /// Resolve to a concrete element/byte count
    ///
    /// Dynamic expressions that yield a negative count fail with
    /// `InvalidLength`; expressions referencing a field not yet in the
    /// context fail with `UnresolvedLength`.
    pub fn resolve(&self, ctx: &Context) -> Result<usize, MarshalError> {
        match self {
            Len::Fixed(n) => Ok(*n),
            Len::Dynamic(f) => {
                let n = f(ctx)?;
                usize::try_from(n).map_err(|_| MarshalError::InvalidLength(n))
            }
        }
    }
}

impl From<usize> for Len {
    fn from(n: usize) -> Self {
        Len::Fixed(n)
    }
}

impl fmt::Debug for Len {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Len::Fixed(n) => f.debug_tuple("Fixed").field(n).finish(),
            Len::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Immutable descriptor of a composite binary layout
///
/// Constructed once, read-only thereafter; safe to share across concurrent
/// `read`/`write` calls on independent streams. Construction performs no
/// I/O and attaches no behavior beyond length expressions.
#[derive(Debug, Clone)]
pub enum Layout {
    /// A fixed-width scalar
    Primitive(PrimKind),

    /// Ordered named fields (a C-style struct); names unique within a record
    Record(Vec<(String, Layout)>),

    /// Homogeneous element sequence with fixed or dynamic length
    Array {
        /// Layout of every element
        element: Box<Layout>,
        /// Element count
        len: Len,
    },

    /// ASCII text of fixed or dynamic byte length, one byte per character,
    /// no trimming and no NUL-termination handling
    Ascii(Len),

    /// Positional heterogeneous elements, unnamed
    Tuple(Vec<Layout>),
}

impl Layout {
    /// Declare a fixed-width scalar field
    pub fn primitive(kind: PrimKind) -> Self {
        Layout::Primitive(kind)
    }

    /// Declare an ordered record of named fields
    ///
    /// Field names must be unique within the record.
    pub fn record<S, I>(fields: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Layout)>,
    {
        let fields: Vec<(String, Layout)> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        debug_assert!(
            fields
                .iter()
                .all(|(name, _)| fields.iter().filter(|(other, _)| other == name).count() == 1),
            "record field names must be unique"
        );
        Layout::Record(fields)
    }

    /// Declare a homogeneous array of `element`
    pub fn array(element: Layout, len: impl Into<Len>) -> Self {
        Layout::Array {
            element: Box::new(element),
            len: len.into(),
        }
    }

    /// Declare an ASCII string field
    pub fn ascii(len: impl Into<Len>) -> Self {
        Layout::Ascii(len.into())
    }

    /// Declare a positional tuple of element layouts
    pub fn tuple(elements: impl IntoIterator<Item = Layout>) -> Self {
        Layout::Tuple(elements.into_iter().collect())
    }

    /// Byte length of this layout
    ///
    /// Fully fixed layouts need no context and may pass `None`. Any
    /// `Dynamic` length resolves against the supplied context; if the
    /// context is absent or missing a referenced field, the call fails with
    /// `UnresolvedLength`. An array's size is its resolved count times the
    /// element size.
    pub fn size(&self, ctx: Option<&Context>) -> Result<usize, MarshalError> {
        let empty = Context::new();
        let ctx = ctx.unwrap_or(&empty);
        self.size_in(ctx)
    }

    fn size_in(&self, ctx: &Context) -> Result<usize, MarshalError> {
        match self {
            Layout::Primitive(kind) => Ok(kind.width()),
            Layout::Ascii(len) => len.resolve(ctx),
            Layout::Array { element, len } => {
                let n = len.resolve(ctx)?;
                n.checked_mul(element.size_in(ctx)?)
                    .ok_or(MarshalError::InvalidLength(saturate(n)))
            }
            Layout::Record(fields) => {
                let mut total: usize = 0;
                for (_, field) in fields {
                    let size = field.size_in(ctx)?;
                    total = total
                        .checked_add(size)
                        .ok_or(MarshalError::InvalidLength(saturate(size)))?;
                }
                Ok(total)
            }
            Layout::Tuple(elements) => {
                let mut total: usize = 0;
                for element in elements {
                    let size = element.size_in(ctx)?;
                    total = total
                        .checked_add(size)
                        .ok_or(MarshalError::InvalidLength(saturate(size)))?;
                }
                Ok(total)
            }
        }
    }
}

/// Report an overflowing count in the error without wrapping it again
fn saturate(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
