// config.rs
//
// Sphere parameters are resolved from, highest priority first:
// - CLI: --radius / --sectors / --stacks / --aspect
// - JSON file: --config <path>, else env UV_SPHERE_CONFIG,
//   else assets/sphere.json next to the exe or in the working dir
// - SphereParameters::default()
//
// The JSON file may hold any subset of the SphereParameters fields.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::mesh::SphereParameters;

pub const CONFIG_ENV: &str = "UV_SPHERE_CONFIG";
const CONFIG_FILE: &str = "sphere.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub params: SphereParameters,
    /// Where to dump the generated mesh as JSON, if anywhere.
    pub output: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Overrides {
    radius: Option<f32>,
    sectors: Option<u32>,
    stacks: Option<u32>,
    aspect: Option<f32>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
}

pub fn load_params(path: &Path) -> Result<SphereParameters, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(path.to_path_buf())
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Find assets/sphere.json by searching:
/// 1) <exe_dir>/assets/sphere.json
/// 2) ./assets/sphere.json
fn find_config_file() -> Option<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let p = dir.join("assets").join(CONFIG_FILE);
            if p.exists() {
                return Some(p);
            }
        }
    }

    let p = PathBuf::from("assets").join(CONFIG_FILE);
    if p.exists() {
        return Some(p);
    }

    None
}

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidArgument {
            flag: flag.to_string(),
            value,
        })
}

fn parse_args<I>(args: I) -> Result<Overrides, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut o = Overrides::default();
    let mut it = args.into_iter();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--radius" => o.radius = Some(parse_value(&a, it.next())?),
            "--sectors" => o.sectors = Some(parse_value(&a, it.next())?),
            "--stacks" => o.stacks = Some(parse_value(&a, it.next())?),
            "--aspect" => o.aspect = Some(parse_value(&a, it.next())?),
            "--config" => o.config = Some(parse_value(&a, it.next())?),
            "--out" => o.output = Some(parse_value(&a, it.next())?),
            other => log::warn!("ignoring unknown argument {:?}", other),
        }
    }
    Ok(o)
}

impl AppConfig {
    /// Resolve from the process arguments and environment.
    pub fn resolve() -> Result<Self, ConfigError> {
        let env_path = std::env::var(CONFIG_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        Self::from_sources(std::env::args().skip(1), env_path, find_config_file())
    }

    /// `explicit_file` is a path the user named (env var); a missing file there
    /// is an error. `fallback_file` is a discovered asset.
    pub fn from_sources<I>(
        args: I,
        explicit_file: Option<PathBuf>,
        fallback_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let o = parse_args(args)?;

        let mut params = match o.config.or(explicit_file) {
            Some(path) => load_params(&path)?,
            None => match fallback_file {
                Some(path) => {
                    log::debug!("using config {}", path.display());
                    load_params(&path)?
                }
                None => SphereParameters::default(),
            },
        };

        if let Some(r) = o.radius {
            params.radius = r;
        }
        if let Some(s) = o.sectors {
            params.sector_count = s;
        }
        if let Some(s) = o.stacks {
            params.stack_count = s;
        }
        if let Some(a) = o.aspect {
            params.aspect_ratio = a;
        }

        params.validate()?;

        Ok(Self {
            params,
            output: o.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn json_file(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_without_sources() {
        let cfg = AppConfig::from_sources(Vec::new(), None, None).unwrap();
        assert_eq!(cfg.params, SphereParameters::default());
        assert_eq!(cfg.output, None);
    }

    #[test]
    fn cli_flags_override_defaults() {
        let cfg = AppConfig::from_sources(
            args(&["--radius", "2.5", "--sectors", "12", "--stacks", "6", "--aspect", "1.5", "--out", "m.json"]),
            None,
            None,
        )
        .unwrap();
        assert_eq!(cfg.params, SphereParameters::new(2.5, 12, 6).with_aspect_ratio(1.5));
        assert_eq!(cfg.output, Some(PathBuf::from("m.json")));
    }

    #[test]
    fn cli_flags_override_file() {
        let f = json_file(r#"{ "radius": 4.0, "sector_count": 10 }"#);
        let cfg = AppConfig::from_sources(args(&["--sectors", "20"]), Some(f.path().into()), None).unwrap();
        assert_eq!(cfg.params.radius, 4.0);
        assert_eq!(cfg.params.sector_count, 20);
        assert_eq!(cfg.params.stack_count, 18);
    }

    #[test]
    fn config_flag_beats_env_file() {
        let env = json_file(r#"{ "radius": 4.0 }"#);
        let flag = json_file(r#"{ "radius": 7.0 }"#);
        let flag_path = flag.path().to_string_lossy().into_owned();
        let cfg = AppConfig::from_sources(
            args(&["--config", flag_path.as_str()]),
            Some(env.path().into()),
            None,
        )
        .unwrap();
        assert_eq!(cfg.params.radius, 7.0);
    }

    #[test]
    fn fallback_file_used_last() {
        let f = json_file(r#"{ "stack_count": 9 }"#);
        let cfg = AppConfig::from_sources(Vec::new(), None, Some(f.path().into())).unwrap();
        assert_eq!(cfg.params.stack_count, 9);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::from_sources(Vec::new(), Some("/nonexistent/sphere.json".into()), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let f = json_file("{ radius: ");
        let err = AppConfig::from_sources(Vec::new(), Some(f.path().into()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn misspelled_key_is_an_error() {
        let f = json_file(r#"{ "sectors": 12 }"#);
        let err = AppConfig::from_sources(Vec::new(), Some(f.path().into()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{:?}", err);
    }

    #[test]
    fn bad_flag_values() {
        let err = AppConfig::from_sources(args(&["--sectors", "many"]), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument { .. }));

        let err = AppConfig::from_sources(args(&["--radius"]), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue(_)));
    }

    #[test]
    fn resolved_params_are_validated() {
        let err = AppConfig::from_sources(args(&["--stacks", "1"]), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Mesh(_)));
    }
}
