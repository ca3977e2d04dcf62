// src/config/validate.rs

use crate::config::model::{ConfigFile, ExecutorSection, RawConfigFile};
use crate::errors::{Result, RfError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = RfError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_executor(&raw.executor)?;
        Ok(ConfigFile::new_unchecked(raw.executor, raw.discovery))
    }
}

fn validate_executor(executor: &ExecutorSection) -> Result<()> {
    if executor.program.trim().is_empty() {
        return Err(RfError::ConfigError(
            "[executor].program must not be empty".to_string(),
        ));
    }
    Ok(())
}
