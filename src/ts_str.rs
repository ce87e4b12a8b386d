use core::borrow::Borrow;
use core::fmt;
use core::ops::Deref;

/// Fixed-size inline string storage that exactly fits a formatted timestamp.
///
/// Both output formats have a known byte length, so formatting never touches
/// the heap; the buffer is returned by value and dereferences to `str`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct TimestampStr<const N: usize>(pub(crate) [u8; N]);

impl<const N: usize> AsRef<str> for TimestampStr<N> {
    #[inline]
    fn as_ref(&self) -> &str {
        // SAFETY: the formatter only ever writes ASCII digits over an ASCII
        // template, so the buffer is always valid UTF-8
        unsafe { core::str::from_utf8_unchecked(&self.0) }
    }
}

impl<const N: usize> Borrow<str> for TimestampStr<N> {
    #[inline]
    fn borrow(&self) -> &str {
        self.as_ref()
    }
}

impl<const N: usize> Deref for TimestampStr<N> {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}

impl<const N: usize> PartialEq for TimestampStr<N> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}

impl<const N: usize> Eq for TimestampStr<N> {}

impl<const N: usize> PartialEq<str> for TimestampStr<N> {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_ref() == other
    }
}

impl<const N: usize> PartialEq<&str> for TimestampStr<N> {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_ref() == *other
    }
}

impl<const N: usize> PartialEq<TimestampStr<N>> for str {
    #[inline]
    fn eq(&self, other: &TimestampStr<N>) -> bool {
        self == other.as_ref()
    }
}

impl<const N: usize> PartialEq<TimestampStr<N>> for &str {
    #[inline]
    fn eq(&self, other: &TimestampStr<N>) -> bool {
        *self == other.as_ref()
    }
}

impl<const N: usize> fmt::Debug for TimestampStr<N> {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_ref(), f)
    }
}

impl<const N: usize> fmt::Display for TimestampStr<N> {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_ref(), f)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::ser::{Serialize, Serializer};

    use super::TimestampStr;

    impl<const N: usize> Serialize for TimestampStr<N> {
        #[inline]
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self)
        }
    }
}
