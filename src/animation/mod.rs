pub(crate) mod ease;
pub use ease::Ease;
