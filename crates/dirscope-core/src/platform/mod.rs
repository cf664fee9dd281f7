/// Platform-specific functionality: permission bits.

pub mod permissions;

pub use permissions::permission_bits;
