use std::{
    io::{self, Read},
    path::Path,
};

use yaserde_derive::YaDeserialize;

#[cfg(feature = "fmi2")]
use crate::fmi2;
#[cfg(feature = "fmi3")]
use crate::fmi3;
use crate::{traits::FmiImport, Error};

const MODEL_DESCRIPTION: &str = "modelDescription.xml";

/// Just enough of the model description to decide which full schema applies
/// to the archive. Everything else is left to the per-version imports.
#[derive(Default, Debug, YaDeserialize)]
#[yaserde(rename = "fmiModelDescription")]
struct VersionProbe {
    #[yaserde(attribute = true, rename = "fmiVersion")]
    fmi_version: String,
    #[yaserde(attribute = true, rename = "modelName")]
    model_name: String,
}

impl VersionProbe {
    /// The major component of the `fmiVersion` attribute: `"2.0"` gives 2,
    /// `"3.0-beta.2"` gives 3. Anything that does not lead with a number is
    /// an unsupported version.
    fn major_version(&self) -> Result<u32, Error> {
        self.fmi_version
            .split(['.', '-'])
            .next()
            .and_then(|major| major.parse().ok())
            .ok_or_else(|| Error::UnsupportedFmiVersion(self.fmi_version.clone()))
    }
}

/// Import is responsible for extracting the FMU into a scratch directory,
/// parsing the modelDescription XML and dispatching on the FMI major version.
///
/// The scratch directory lives exactly as long as the import (or the
/// version-specific import extracted from it) and is removed when it drops,
/// on every exit path.
#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
pub enum Import {
    #[cfg(feature = "fmi2")]
    Fmi2(fmi2::import::Fmi2Import),
    #[cfg(feature = "fmi3")]
    Fmi3(fmi3::import::Fmi3Import),
}

impl Import {
    /// Creates a new Import by extracting the FMU and parsing the modelDescription XML
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = std::fs::File::open(path.as_ref())?;
        log::debug!("Opening FMU file {:?}", path.as_ref());
        Self::new(file)
    }

    /// Creates a new Import by extracting the FMU and parsing the modelDescription XML
    pub fn new<R: Read + io::Seek>(reader: R) -> Result<Self, Error> {
        let mut archive = zip::ZipArchive::new(reader)?;
        let temp_dir = tempfile::Builder::new().prefix("cads-fmi").tempdir()?;
        log::debug!("Extracting into {temp_dir:?}");
        archive.extract(&temp_dir)?;

        // Open and read the modelDescription XML into a string
        let descr_file_path = temp_dir.path().join(MODEL_DESCRIPTION);
        let descr_xml = std::fs::read_to_string(descr_file_path)?;

        let probe: VersionProbe =
            yaserde::de::from_str(&descr_xml).map_err(cads_fmi_schema::Error::XmlParse)?;
        log::debug!(
            "Found FMI {} named '{}'",
            probe.fmi_version,
            probe.model_name
        );

        match probe.major_version()? {
            #[cfg(feature = "fmi2")]
            2 => fmi2::import::Fmi2Import::new(temp_dir, &descr_xml).map(Import::Fmi2),

            #[cfg(feature = "fmi3")]
            3 => fmi3::import::Fmi3Import::new(temp_dir, &descr_xml).map(Import::Fmi3),

            _ => Err(Error::UnsupportedFmiVersion(probe.fmi_version)),
        }
    }

    #[cfg(feature = "fmi2")]
    #[must_use]
    pub fn as_fmi2(self) -> Option<fmi2::import::Fmi2Import> {
        if let Self::Fmi2(v) = self {
            Some(v)
        } else {
            None
        }
    }

    #[cfg(feature = "fmi3")]
    #[must_use]
    pub fn as_fmi3(self) -> Option<fmi3::import::Fmi3Import> {
        if let Self::Fmi3(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_probe() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
        <fmiModelDescription fmiVersion="3.0-beta.2" modelName="BouncingBall">
          <CoSimulation modelIdentifier="BouncingBall"/>
        </fmiModelDescription>"#;
        let probe: VersionProbe = yaserde::de::from_str(xml).unwrap();
        assert_eq!(probe.model_name, "BouncingBall");
        assert_eq!(probe.major_version().unwrap(), 3);
    }

    #[test]
    fn test_version_probe_rejects_non_numeric() {
        let probe = VersionProbe {
            fmi_version: "next".to_owned(),
            model_name: String::new(),
        };
        assert!(matches!(
            probe.major_version(),
            Err(Error::UnsupportedFmiVersion(_))
        ));
    }

    #[test]
    fn test_version_probe_rejects_garbage_xml() {
        assert!(yaserde::de::from_str::<VersionProbe>("not xml at all").is_err());
    }
}
