use serde_json::Value;

/// Conversion of an in-memory value into its wire-ready JSON structure.
///
/// Lowering never mutates the receiver: lowering the same value twice yields
/// identical output.
pub trait Lower {
    fn lower(&self) -> Value;
}

impl<T: Lower + ?Sized> Lower for &T {
    fn lower(&self) -> Value {
        (**self).lower()
    }
}
