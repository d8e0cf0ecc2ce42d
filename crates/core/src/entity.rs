//! Records that are identified by a code rather than by their contents.

use core::fmt::Debug;
use core::hash::Hash;

/// A warehouse object with a stable code.
///
/// SKU and bin views built at different moments describe the same physical
/// thing when their codes match, whatever quantities they carry. The code is
/// usable as a map key.
pub trait Entity {
    type Id: Clone + Eq + Hash + Debug;

    fn id(&self) -> &Self::Id;
}
