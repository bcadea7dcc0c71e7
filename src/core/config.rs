//! 配置管理模块
//!
//! 提供库与命令行工具配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [geometry]
//! default_draw_mode = "TRIANGLES"   # 描述文件未指定 draw_mode 时使用
//! id_prefix = "geometry"            # 自动生成 id 的前缀
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! log_file = "dist_geometry.log"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};
use crate::geometry::container::DEFAULT_ID_PREFIX;
use crate::geometry::DrawMode;

/// 全局配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 几何体默认值
    #[serde(default)]
    pub geometry: GeometryDefaults,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 几何体构建时使用的默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryDefaults {
    /// 默认绘制模式（字符串形式，构建时校验）
    #[serde(default = "default_draw_mode")]
    pub default_draw_mode: String,

    /// 自动生成 id 时使用的前缀
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_draw_mode() -> String { DrawMode::default().as_str().to_string() }
fn default_id_prefix() -> String { DEFAULT_ID_PREFIX.to_string() }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "dist_geometry.log".to_string() }

impl Default for GeometryDefaults {
    fn default() -> Self {
        Self {
            default_draw_mode: default_draw_mode(),
            id_prefix: default_id_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("unknown log level '{}'", other),
            }),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 示例
    ///
    /// ```no_run
    /// use dist_geometry::core::Config;
    ///
    /// let config = Config::from_file("config.toml")?;
    /// # Ok::<(), dist_geometry::core::DistGeometryError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        Self::from_toml_str(&contents)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--log-level <level>`: 设置日志级别
    /// - `--log-file <path>`: 启用文件日志并设置路径
    /// - `--draw-mode <mode>`: 设置默认绘制模式
    ///
    /// 无法解析的值会被忽略，留给 `validate` 之前的默认值。
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(value) = flag_value(&args, "--log-level") {
            if let Ok(level) = value.parse::<LogLevel>() {
                self.logging.level = level;
            }
        }

        if let Some(value) = flag_value(&args, "--log-file") {
            self.logging.file_output = true;
            self.logging.log_file = value.to_string();
        }

        if let Some(value) = flag_value(&args, "--draw-mode") {
            self.geometry.default_draw_mode = value.to_string();
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.geometry.default_draw_mode.parse::<DrawMode>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "geometry.default_draw_mode".to_string(),
                reason: format!(
                    "'{}' is not one of {:?}",
                    self.geometry.default_draw_mode,
                    DrawMode::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>()
                ),
            }.into());
        }

        if self.geometry.id_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "geometry.id_prefix".to_string(),
                reason: "id prefix must not be empty".to_string(),
            }.into());
        }

        if self.logging.file_output && self.logging.log_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.log_file".to_string(),
                reason: "log file path required when file_output is enabled".to_string(),
            }.into());
        }

        Ok(())
    }
}

/// 查找 `flag` 之后紧跟的参数值
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.geometry.default_draw_mode, "TRIANGLES");
        assert_eq!(config.geometry.id_prefix, DEFAULT_ID_PREFIX);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.geometry.default_draw_mode = "HEXAGONS".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.geometry.id_prefix = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(!config.logging.file_output);
        assert_eq!(config.geometry.default_draw_mode, "TRIANGLES");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = Config::from_toml_str("[logging\nlevel = ");
        assert!(matches!(
            result,
            Err(crate::core::DistGeometryError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args([
            "dist_geometry",
            "--log-level",
            "trace",
            "--draw-mode",
            "LINE_STRIP",
            "--log-file",
            "out.log",
        ]);

        assert_eq!(config.logging.level, LogLevel::Trace);
        assert_eq!(config.geometry.default_draw_mode, "LINE_STRIP");
        assert!(config.logging.file_output);
        assert_eq!(config.logging.log_file, "out.log");
    }

    #[test]
    fn test_apply_args_ignores_bad_level() {
        let mut config = Config::default();
        config.apply_args(["--log-level", "loud"]);
        assert_eq!(config.logging.level, LogLevel::Info);
    }
}
