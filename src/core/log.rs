//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//! 库代码只通过 `tracing` 宏输出事件，订阅者由二进制程序在启动时安装。
//!
//! # 使用示例
//!
//! ```no_run
//! use dist_geometry::core::{log, LogLevel};
//!
//! log::init_logger(LogLevel::Info, false, None)?;
//! tracing::info!(attributes = 4, "Geometry loaded");
//! # Ok::<(), dist_geometry::core::DistGeometryError>(())
//! ```

use std::path::Path;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use super::config::LogLevel;
use super::error::{DistGeometryError, Result};

/// 日志文件的默认名称
const DEFAULT_LOG_FILE: &str = "dist_geometry.log";

/// 初始化日志系统
///
/// 进程内只能成功调用一次，重复安装订阅者会返回 `DistGeometryError::Log`。
///
/// # 参数
///
/// * `level` - 日志级别（`RUST_LOG` 未设置时生效）
/// * `file_output` - 是否同时输出到文件
/// * `log_file_path` - 日志文件路径（可选，默认为 "dist_geometry.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) -> Result<()> {
    // RUST_LOG 优先，未设置或无效时使用配置的级别
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level.into()).into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .with_ansi(true);

    let result = if file_output {
        let log_path = log_file_path.unwrap_or(DEFAULT_LOG_FILE);
        let path = Path::new(log_path);
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_LOG_FILE);

        // 每天滚动
        let file_appender = RollingFileAppender::new(Rotation::DAILY, directory, filename);

        let file_layer = fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(file_layer)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .try_init()
    };

    result.map_err(|e| DistGeometryError::Log(e.to_string()))
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}
