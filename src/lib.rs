//! An ordered set of distinct values kept in a plain Binary Search Tree,
//! walked in ascending order with cursors.
//!
//! [`ordered::Tree`] never rebalances and never removes values, so its height
//! is decided by the order values arrive in. Shuffled input keeps lookups near
//! `O(lg N)`; sorted input builds a chain of height `N`. Nothing recurses once
//! per level of the tree, so such chains are safe to walk, print and debug.
//!
//! Each node keeps a link to its parent. That is what lets a
//! [`ordered::Cursor`] step to the next larger value from wherever it is,
//! which backs `iter`, range-style scans from `min_greater_than`, and the
//! `[ 5 10 15 ]` printable form that [`parse`] reads back.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod ordered;
pub mod parse;
