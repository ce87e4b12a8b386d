#![allow(unused)]

// borrows technique from https://github.com/rust-lang/hashbrown/pull/209
#[inline]
#[cold]
fn cold() {}

#[rustfmt::skip]
#[inline(always)]
pub fn likely(b: bool) -> bool {
    if !b { cold() } b
}

#[rustfmt::skip]
#[inline(always)]
pub fn unlikely(b: bool) -> bool {
    if b { cold() } b
}

#[rustfmt::skip]
macro_rules! likely {
    ($e:expr) => { $crate::macros::likely($e) }
}

#[rustfmt::skip]
macro_rules! unlikely {
    ($e:expr) => { $crate::macros::unlikely($e) }
}
