#[doc(hidden)]
pub use tracing;

/// Creates a new [`Span`] with the given `name` at the current callsite.
///
/// Additional `key = value` fields are recorded on the span when the `spans` feature is
/// enabled and are not evaluated otherwise.
///
/// ```
/// let _span = game_tracing::trace_span!("Overlay::render").entered();
/// ```
#[macro_export]
macro_rules! trace_span {
    ($name:expr $(, $($fields:tt)*)?) => {
        $crate::__trace_span_impl!($name $(, $($fields)*)?)
    };
}

#[cfg(feature = "spans")]
#[macro_export]
#[doc(hidden)]
macro_rules! __trace_span_impl {
    ($name:expr $(, $($fields:tt)*)?) => {{
        $crate::span::Span {
            inner: $crate::span::tracing::span!(
                $crate::span::tracing::Level::TRACE,
                $name
                $(, $($fields)*)?
            ),
            _priv: (),
        }
    }};
}

#[cfg(not(feature = "spans"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __trace_span_impl {
    ($name:expr $(, $($fields:tt)*)?) => {{
        $crate::span::Span { _priv: () }
    }};
}

/// A `Span` represents a zone of time in which an operation is being run.
#[derive(Clone, Debug)]
pub struct Span {
    #[cfg(feature = "spans")]
    #[doc(hidden)]
    pub inner: tracing::span::Span,
    #[doc(hidden)]
    pub _priv: (),
}

impl Span {
    /// Enters this span, exiting it again when the returned guard is dropped.
    pub fn entered(self) -> EnteredSpan {
        EnteredSpan {
            #[cfg(feature = "spans")]
            _inner: self.inner.entered(),
        }
    }

    /// Runs `f` inside of this span.
    pub fn in_scope<F, T>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let _guard = self.entered();
        f()
    }
}

/// A handle to a [`Span`] that is currently active.
#[derive(Debug)]
#[non_exhaustive]
pub struct EnteredSpan {
    #[cfg(feature = "spans")]
    _inner: tracing::span::EnteredSpan,
}
