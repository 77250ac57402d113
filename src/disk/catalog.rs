use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::geometry::ArchimedeanSpiral;
use crate::math::MICRON_TO_MM;

use super::{DiskGeometry, DiskRadii};

/// Physical description of one kind of disc. All lengths are in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub radius_inner: f64,
    pub radius_outer: f64,
    pub data_radius_inner: f64,
    pub data_radius_outer: f64,
    /// Track length of one data byte, including error correction and
    /// modulation overhead.
    pub unit_length: f64,
    /// Distance between adjacent track windings.
    pub pitch: f64,
}

impl DiskProfile {
    /// Single-sided, single-layer DVD.
    ///
    /// A 2048-byte sector becomes 4836 bytes on disc after framing, ECC and
    /// 8-to-16 modulation, which comes out at about 5.16 mm of track.
    #[must_use]
    pub fn dvd5() -> Self {
        Self {
            name: "dvd5".to_owned(),
            description: "DVD-5, single side, single layer".to_owned(),
            radius_inner: 22.0,
            radius_outer: 60.0,
            data_radius_inner: 24.0,
            data_radius_outer: 58.0,
            unit_length: 5.16 / 2048.0,
            pitch: 0.74 * MICRON_TO_MM,
        }
    }

    /// Mode 1 data CD read at 1.2 m/s, 75 sectors of 2048 user bytes per second.
    #[must_use]
    pub fn cd() -> Self {
        Self {
            name: "cd".to_owned(),
            description: "CD-ROM, mode 1".to_owned(),
            radius_inner: 7.5,
            radius_outer: 60.0,
            data_radius_inner: 25.0,
            data_radius_outer: 58.0,
            unit_length: 1200.0 / (75.0 * 2048.0),
            pitch: 1.6 * MICRON_TO_MM,
        }
    }

    #[must_use]
    pub fn radii(&self) -> DiskRadii {
        DiskRadii::new(
            self.radius_inner,
            self.radius_outer,
            self.data_radius_inner,
            self.data_radius_outer,
        )
    }

    /// Builds the disk geometry for this profile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProfile`] if the profile's numbers do
    /// not describe a usable disc.
    pub fn geometry(&self) -> Result<DiskGeometry<ArchimedeanSpiral>> {
        let invalid = |e: crate::error::DiscmapError| ConfigError::InvalidProfile {
            name: self.name.clone(),
            reason: e.to_string(),
        };
        let spiral = ArchimedeanSpiral::new(self.pitch).map_err(invalid)?;
        let geometry = DiskGeometry::new(self.radii(), self.unit_length, spiral).map_err(invalid)?;
        Ok(geometry)
    }
}

/// The set of disc profiles available by name.
#[derive(Debug, Clone)]
pub struct DiskCatalog {
    profiles: Vec<DiskProfile>,
}

impl Default for DiskCatalog {
    fn default() -> Self {
        Self {
            profiles: vec![DiskProfile::dvd5(), DiskProfile::cd()],
        }
    }
}

impl DiskCatalog {
    /// Name of the profile used when none is requested.
    pub const DEFAULT_PROFILE: &'static str = "dvd5";

    /// Creates a catalog holding the built-in profiles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds profiles, replacing any existing profile with the same name.
    #[must_use]
    pub fn with_profiles(mut self, extra: impl IntoIterator<Item = DiskProfile>) -> Self {
        for profile in extra {
            match self
                .profiles
                .iter_mut()
                .find(|p| p.name.eq_ignore_ascii_case(&profile.name))
            {
                Some(existing) => *existing = profile,
                None => self.profiles.push(profile),
            }
        }
        self
    }

    /// Looks up a profile by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProfile`] if no profile has that name.
    pub fn get(&self, name: &str) -> Result<&DiskProfile> {
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_owned()).into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiskProfile> {
        self.profiles.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::DiscmapError;

    #[test]
    fn builtin_profiles_build() {
        for profile in DiskCatalog::new().iter() {
            let g = profile.geometry().unwrap();
            assert!(g.capacity() > 0.0, "{}", profile.name);
        }
    }

    #[test]
    fn cd_holds_roughly_650_to_700_mb() {
        let capacity = DiskProfile::cd().geometry().unwrap().capacity();
        assert!(capacity > 6.5e8 && capacity < 7.2e8, "capacity={capacity}");
    }

    #[test]
    fn lookup_ignores_case() {
        let catalog = DiskCatalog::new();
        assert_eq!(catalog.get("DVD5").unwrap().name, "dvd5");
    }

    #[test]
    fn unknown_profile() {
        let catalog = DiskCatalog::new();
        let r = catalog.get("laserdisc");
        assert!(matches!(
            r,
            Err(DiscmapError::Config(ConfigError::UnknownProfile(_)))
        ));
    }

    #[test]
    fn custom_profile_replaces_builtin() {
        let mut custom = DiskProfile::dvd5();
        custom.name = "DVD5".to_owned();
        custom.data_radius_outer = 40.0;
        let catalog = DiskCatalog::new().with_profiles([custom]);
        assert_eq!(catalog.iter().count(), 2);
        assert!((catalog.get("dvd5").unwrap().data_radius_outer - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_profile_is_reported_by_name() {
        let mut broken = DiskProfile::cd();
        broken.pitch = 0.0;
        let r = broken.geometry();
        assert!(matches!(
            r,
            Err(DiscmapError::Config(ConfigError::InvalidProfile { ref name, .. })) if name == "cd"
        ));
    }
}
