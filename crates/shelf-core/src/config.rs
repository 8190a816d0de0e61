//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `SHELF_*` env vars (nested keys split on `__`). Provides helpers to expand
//! `~` and `${VAR}` and to resolve relative paths against the config directory.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const MAX_DEBOUNCE_MS: u64 = 10_000;

pub struct Config {
    figment: Figment,
    base: PathBuf,
    env_name: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    /// Load `config.toml` and the env-specific overlay from `base`.
    pub fn load_from(base: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file(base.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("SHELF_").split("__"));

        let config = Self { figment, base: base.to_path_buf(), env_name: env_name.to_string() };
        config.settings()?.validate_for_env(env_name)?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment.extract().map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))
    }

    pub fn base(&self) -> &Path { &self.base }

    pub fn env_name(&self) -> &str { &self.env_name }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub favourites: FavouritesSettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavouritesSettings {
    pub store_dir: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    pub debounce_ms: u64,
    /// Also fire on the first keystroke of a burst, not only after the last one.
    pub leading_edge: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: CatalogSettings { path: "data/products.json".to_string() },
            favourites: FavouritesSettings { store_dir: "~/.local/share/shelf".to_string(), key: "favourites".to_string() },
            search: SearchSettings::default(),
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self { Self { debounce_ms: 500, leading_edge: false } }
}

impl Settings {
    pub fn validate_for_env(&self, env: &str) -> Result<()> {
        if self.catalog.path.trim().is_empty() {
            return Err(Error::InvalidConfig("catalog.path is empty".to_string()));
        }
        validate_store_key(&self.favourites.key)?;
        if self.search.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(Error::InvalidConfig(format!(
                "search.debounce_ms {} exceeds {}",
                self.search.debounce_ms, MAX_DEBOUNCE_MS
            )));
        }
        match env {
            "prod" | "production" => {
                if self.search.debounce_ms == 0 {
                    return Err(Error::InvalidConfig("search.debounce_ms must be non-zero in production".to_string()));
                }
            }
            "dev" | "development" | "test" | "testing" => {}
            _ => {}
        }
        Ok(())
    }

    pub fn catalog_path(&self, base: &Path) -> PathBuf { resolve_with_base(base, &self.catalog.path) }

    pub fn store_dir(&self, base: &Path) -> PathBuf { resolve_with_base(base, &self.favourites.store_dir) }
}

/// Store keys double as file names: non-empty, `[A-Za-z0-9_.-]`, no leading dot.
pub fn validate_store_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("invalid store key '{key}'")))
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
