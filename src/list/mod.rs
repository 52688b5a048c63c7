//! Doubly-linked list primitives over an index arena.
//!
//! Nodes live in an [`Arena`] and refer to each other by [`NodeId`], so a
//! chain with `prev`/`next` links never needs shared ownership. The arena
//! knows nothing about rows, characters or cursors: it only moves links.
//!
//! The four splice operations take the current head of a chain and return
//! the (possibly different) head, because splicing at the front changes
//! which node is first. None of them allocates or frees a node; callers
//! decide when a node is created ([`Arena::alloc`]) and released
//! ([`Arena::remove`]).
//!
//! ```
//! use rowedit::list::Arena;
//!
//! let mut arena = Arena::new();
//! let b = arena.alloc('b');
//! let mut head = arena.insert_after(b, None, None);
//!
//! let a = arena.alloc('a');
//! head = arena.insert_before(a, Some(b), head);
//!
//! let text: String = arena.iter(head).map(|(_, ch)| *ch).collect();
//! assert_eq!(text, "ab");
//! assert_eq!(head, Some(a));
//! ```

mod arena;

pub use arena::{Arena, Chain, NodeId, Unlinked};
