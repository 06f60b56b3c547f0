// Copyright 2023 Google Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::latlon::error::{OracleError, Result};
use clap::Parser;
use std::ffi::OsString;

/// Environment variable overriding [`HarnessConfig::seed`].
pub const ENV_SEED: &str = "ORACLE_SEED";
/// Environment variable overriding [`HarnessConfig::trials`].
pub const ENV_TRIALS: &str = "ORACLE_TRIALS";
/// Environment variable overriding [`HarnessConfig::shapes_per_trial`].
pub const ENV_SHAPES: &str = "ORACLE_SHAPES";
/// Environment variable overriding [`HarnessConfig::queries_per_trial`].
pub const ENV_QUERIES: &str = "ORACLE_QUERIES";

/// HarnessConfig controls the scale and randomness of a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HarnessConfig {
    /// Master seed; every trial derives its own seed from it.
    pub seed: u64,
    /// Number of independent trials.
    pub trials: usize,
    /// Number of document slots indexed per trial.
    pub shapes_per_trial: usize,
    /// Number of queries run against each trial's index.
    pub queries_per_trial: usize,
    /// Upper bound on the vertex count of generated lines.
    pub max_line_points: usize,
    /// Upper bound on the vertex count of generated polygon shells.
    pub max_polygon_points: usize,
    /// A query line reuses indexed vertices one time in this many.
    pub shared_vertex_one_in: u32,
    /// A document slot is left empty one time in this many.
    pub missing_one_in: u32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            seed: 0,
            trials: 10,
            shapes_per_trial: 100,
            queries_per_trial: 25,
            max_line_points: 10,
            max_polygon_points: 12,
            shared_vertex_one_in: 100,
            missing_one_in: 20,
        }
    }
}

/// Command-line and environment overrides for a harness run. Anything left
/// unset keeps its [`HarnessConfig`] default.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "latlon-oracle", about = "Randomized lat/lon line shape oracle")]
pub struct HarnessArgs {
    /// Master seed
    #[arg(long, env = ENV_SEED)]
    pub seed: Option<u64>,

    /// Number of trials
    #[arg(long, env = ENV_TRIALS)]
    pub trials: Option<usize>,

    /// Document slots per trial
    #[arg(long = "shapes", env = ENV_SHAPES)]
    pub shapes_per_trial: Option<usize>,

    /// Queries per trial
    #[arg(long = "queries", env = ENV_QUERIES)]
    pub queries_per_trial: Option<usize>,
}

impl HarnessArgs {
    /// Overlays the overrides that are set onto config.
    pub fn apply(&self, mut config: HarnessConfig) -> HarnessConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(shapes) = self.shapes_per_trial {
            config.shapes_per_trial = shapes;
        }
        if let Some(queries) = self.queries_per_trial {
            config.queries_per_trial = queries;
        }
        config
    }
}

impl HarnessConfig {
    /// Returns the defaults overlaid with the ORACLE_* environment variables.
    pub fn from_env() -> Result<HarnessConfig> {
        HarnessConfig::from_args(["latlon-oracle"])
    }

    /// Returns the defaults overlaid with the given command line, the first
    /// item being the program name. Flags take precedence over the ORACLE_*
    /// environment variables.
    pub fn from_args<I, T>(args: I) -> Result<HarnessConfig>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args =
            HarnessArgs::try_parse_from(args).map_err(|e| OracleError::Config(e.to_string()))?;
        Ok(args.apply(HarnessConfig::default()))
    }

    /// Checks the config describes a run that can generate valid shapes.
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(OracleError::Config("trials must be > 0".to_string()));
        }
        if self.shapes_per_trial == 0 {
            return Err(OracleError::Config("shapes_per_trial must be > 0".to_string()));
        }
        if self.queries_per_trial == 0 {
            return Err(OracleError::Config("queries_per_trial must be > 0".to_string()));
        }
        if self.max_line_points < 2 {
            return Err(OracleError::Config("max_line_points must be >= 2".to_string()));
        }
        if self.max_polygon_points < 3 {
            return Err(OracleError::Config("max_polygon_points must be >= 3".to_string()));
        }
        if self.shared_vertex_one_in == 0 || self.missing_one_in == 0 {
            return Err(OracleError::Config("one-in rates must be > 0".to_string()));
        }
        Ok(())
    }
}
