use super::impl_leaf;

impl_leaf!(
    bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String,
);

// -----------------------------------------------------------------------------
// Tests
