//! Handles passed across the C boundary.
//!
//! Generated code treats every node, arc and graph as an opaque pointer, and
//! compares it against null. A handle is therefore pointer-sized: `0` is
//! null and any other value is the heap id plus one.

use gsl_core::{ArcId, GraphId, NodeId};

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident => $id:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(usize);

        impl $name {
            pub const NULL: $name = $name(0);

            pub fn is_null(self) -> bool {
                self.0 == 0
            }

            /// The heap id, or `None` for null. Values too large for an id
            /// are treated as null.
            pub fn id(self) -> Option<$id> {
                let raw = self.0.checked_sub(1)?;
                u32::try_from(raw).ok().map($id)
            }

            pub fn raw(self) -> usize {
                self.0
            }
        }

        impl From<$id> for $name {
            fn from(id: $id) -> Self {
                $name(id.0 as usize + 1)
            }
        }

        impl From<Option<$id>> for $name {
            fn from(id: Option<$id>) -> Self {
                id.map_or($name::NULL, $name::from)
            }
        }
    };
}

define_handle!(
    /// A node, as seen by generated code.
    NodeHandle => NodeId
);
define_handle!(
    /// An arc, as seen by generated code.
    ArcHandle => ArcId
);
define_handle!(
    /// A graph, as seen by generated code.
    GraphHandle => GraphId
);
