use crate::comparison::Comparison;

/// The volume part of a path: a Windows drive (`c:`) or a UNC host and share
/// (`\\host\share`). POSIX paths and plain relative paths have an empty volume.
///
/// A volume never carries a drive and a host at the same time; the constructors are the only
/// way to build one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Volume {
    host: Option<String>,
    share: Option<String>,
    drive: Option<String>,
}

impl Volume {
    /// A volume without drive, host or share.
    pub fn none() -> Self {
        Self::default()
    }

    /// A drive volume such as `c:`.
    pub fn drive(drive: impl Into<String>) -> Self {
        Self {
            drive: Some(drive.into()),
            ..Self::default()
        }
    }

    /// A UNC volume. The share is optional (`\\host` alone is a valid, if unusual, root).
    pub fn unc(host: impl Into<String>, share: Option<String>) -> Self {
        Self {
            host: Some(host.into()),
            share,
            drive: None,
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn share(&self) -> Option<&str> {
        self.share.as_deref()
    }

    pub fn drive_letter(&self) -> Option<&str> {
        self.drive.as_deref()
    }

    pub fn is_drive(&self) -> bool {
        self.drive.is_some()
    }

    pub fn is_unc(&self) -> bool {
        self.host.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_none() && self.share.is_none() && self.drive.is_none()
    }

    pub fn equals(&self, other: &Volume, cmp: Comparison) -> bool {
        cmp.equals_optional(self.drive_letter(), other.drive_letter())
            && cmp.equals_optional(self.host(), other.host())
            && cmp.equals_optional(self.share(), other.share())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_volume() {
        let volume = Volume::drive("c:");
        assert!(volume.is_drive());
        assert!(!volume.is_unc());
        assert_eq!(volume.drive_letter(), Some("c:"));
    }

    #[test]
    fn test_unc_volume() {
        let volume = Volume::unc("host", Some("share".to_string()));
        assert!(volume.is_unc());
        assert!(!volume.is_drive());
        assert_eq!(volume.host(), Some("host"));
        assert_eq!(volume.share(), Some("share"));
    }

    #[test]
    fn test_equals_uses_comparison() {
        let upper = Volume::drive("C:");
        let lower = Volume::drive("c:");
        assert!(upper.equals(&lower, Comparison::IgnoreCase));
        assert!(!upper.equals(&lower, Comparison::CaseSensitive));
    }

    #[test]
    fn test_missing_share_differs_from_empty_share() {
        let without = Volume::unc("abc", None);
        let empty = Volume::unc("abc", Some(String::new()));
        assert!(!without.equals(&empty, Comparison::CaseSensitive));
        assert!(Volume::none().is_empty());
    }
}
