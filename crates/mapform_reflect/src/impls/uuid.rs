use uuid::Uuid;

use super::impl_leaf;

impl_leaf!(Uuid);

// -----------------------------------------------------------------------------
// Tests
