/// Permission-bit checks for the scanning user.
///
/// On Unix the owner bits of the mode are reported, matching what `ls -l`
/// shows in the first triplet. Elsewhere only the read-only attribute is
/// available, so executability falls back to the extension.
use crate::model::PermissionBits;
use std::fs::Metadata;

#[cfg(unix)]
pub fn permission_bits(meta: &Metadata, _extension: &str) -> PermissionBits {
    use std::os::unix::fs::PermissionsExt;

    let mode = meta.permissions().mode();
    PermissionBits {
        readable: mode & 0o400 != 0,
        writable: mode & 0o200 != 0,
        executable: mode & 0o100 != 0,
    }
}

#[cfg(not(unix))]
pub fn permission_bits(meta: &Metadata, extension: &str) -> PermissionBits {
    PermissionBits {
        readable: true,
        writable: !meta.permissions().readonly(),
        executable: matches!(extension, "exe" | "com" | "bat" | "cmd" | "ps1" | "msi"),
    }
}
