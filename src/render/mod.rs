mod field;
mod toast;

pub use field::FieldInput;
