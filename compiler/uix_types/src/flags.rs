//! Property metadata flags.

use bitflags::bitflags;

bitflags! {
    /// Per-property metadata reported by the type system.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct PropertyFlags: u8 {
        /// Registered (attached or virtual) property rather than a plain
        /// member. Found by `find_attached_property`, and preferred over a
        /// plain member of the same name.
        const ATTACHED = 1 << 0;
        /// Textual values name an element to look up at runtime.
        const RESOLVE_BY_NAME = 1 << 1;
    }
}
