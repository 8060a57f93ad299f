use crate::error::Result;
use crate::models::AcquisitionMetadata;
use crate::utils::constants::{ENV_PREFIX, ENV_SEPARATOR};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Defaults layered beneath the command line: an optional settings file,
/// then `COORD2STAR_*` environment variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub image_ext: Option<String>,
    pub acquisition: AcquisitionMetadata,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            env.prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(Settings {
            acquisition: settings.acquisition.without_negatives(),
            ..settings
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::Builder;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn test_load_from_toml() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "image_ext = \".tiff\"")?;
        writeln!(file, "[acquisition]")?;
        writeln!(file, "voltage = 300.0")?;
        writeln!(file, "spherical_aberration = 2.7")?;
        writeln!(file, "defocus_u = -1.0")?;

        let settings = Settings::load_with_env(Some(file.path()), no_env())?;

        assert_eq!(settings.image_ext.as_deref(), Some(".tiff"));
        assert_eq!(settings.acquisition.voltage, Some(300.0));
        assert_eq!(settings.acquisition.spherical_aberration, Some(2.7));
        assert_eq!(settings.acquisition.defocus_u, None);
        Ok(())
    }

    #[test]
    fn test_environment_overrides() -> Result<()> {
        let vars = HashMap::from([
            ("COORD2STAR_ACQUISITION__VOLTAGE".to_string(), "200".to_string()),
            ("COORD2STAR_IMAGE_EXT".to_string(), ".mrcs".to_string()),
        ]);
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let settings = Settings::load_with_env(None, env)?;

        assert_eq!(settings.acquisition.voltage, Some(200.0));
        assert_eq!(settings.image_ext.as_deref(), Some(".mrcs"));
        Ok(())
    }

    #[test]
    fn test_no_sources_is_default() -> Result<()> {
        let settings = Settings::load_with_env(None, no_env())?;
        assert_eq!(settings, Settings::default());
        Ok(())
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Settings::load_with_env(Some(Path::new("missing-settings.toml")), no_env())
            .unwrap_err();
        assert!(matches!(err, ProcessingError::ConfigSource(_)));
    }
}
