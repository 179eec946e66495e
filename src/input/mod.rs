mod key;

pub use key::{EditKey, KeyInput};
