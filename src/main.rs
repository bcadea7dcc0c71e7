//! dist_geometry - 几何体检查工具
//!
//! 加载 OBJ 或 TOML 几何体描述文件，经过归一化后输出每个几何体的摘要。
//!
//! # 使用方法
//!
//! ```bash
//! # 检查一个或多个文件
//! cargo run -- quad.toml model.obj
//!
//! # 指定配置文件与命令行覆盖
//! cargo run -- --config config.toml --log-level debug --draw-mode POINTS cloud.toml
//! ```
//!
//! # 命令行参数
//!
//! - `--config <file>`: 配置文件路径，必须存在且可解析（未指定时尝试 config.toml，不存在则使用默认配置）
//! - `--log-level <level>`: 日志级别
//! - `--log-file <path>`: 同时输出到日志文件
//! - `--draw-mode <mode>`: 描述文件未指定绘制模式时使用

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use dist_geometry::core::{log, Config};
use dist_geometry::geometry::loaders::load_geometry;
use dist_geometry::geometry::Geometry;
use tracing::{error, info};

/// 未指定 `--config` 时的配置文件
const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// 带值的参数
const VALUE_FLAGS: [&str; 4] = ["--config", "--log-level", "--log-file", "--draw-mode"];

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // 1. 加载配置（在初始化日志之前）
    let mut config = load_config(&args)?;

    // 2. 应用命令行参数并验证
    config.apply_args(&args);
    config.validate().context("invalid configuration")?;

    // 3. 初始化日志系统
    let log_file = config.logging.file_output.then_some(config.logging.log_file.as_str());
    log::init_logger(config.logging.level, config.logging.file_output, log_file)?;
    info!(version = env!("CARGO_PKG_VERSION"), "dist_geometry starting");

    let inputs = positional_args(&args);
    if inputs.is_empty() {
        bail!("usage: dist_geometry [--config <file>] [--log-level <level>] [--draw-mode <mode>] <file>...");
    }

    let mut failures = 0usize;
    for path in &inputs {
        match load_geometry(path, &config.geometry) {
            Ok(geometry) => print_summary(path, &geometry),
            Err(e) => {
                error!(path = %path.display(), "Failed to load geometry: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} file(s) failed to load", failures, inputs.len());
    }

    Ok(())
}

/// `--config` 之后的配置文件路径
fn config_path(args: &[String]) -> Option<&str> {
    args.iter()
        .position(|a| a == "--config")
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

/// 加载配置
///
/// 显式指定的配置文件必须能读取并解析；
/// 未指定时尝试默认的 config.toml，失败则使用默认配置。
fn load_config(args: &[String]) -> anyhow::Result<Config> {
    match config_path(args) {
        Some(path) => Config::from_file(path).with_context(|| format!("loading {}", path)),
        None => Ok(Config::from_file_or_default(DEFAULT_CONFIG_FILE)),
    }
}

/// 除去带值参数之后剩下的文件路径
fn positional_args(args: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            paths.push(PathBuf::from(arg));
        }
    }

    paths
}

fn print_summary(path: &Path, geometry: &Geometry) {
    println!("{}", path.display());
    println!("  id:           {}", geometry.id());
    println!("  draw mode:    {}", geometry.draw_mode());
    match geometry.vertex_count() {
        Some(count) => println!("  vertex count: {}", count),
        None => println!("  vertex count: unknown"),
    }

    for (name, attribute) in geometry.attributes() {
        println!(
            "  {:<14} size={} type={} buffer={} instanced={} elements={} stride={} ({}, {} bytes)",
            name,
            attribute.size(),
            attribute.attribute_type().map(|t| t.as_str()).unwrap_or("-"),
            attribute.buffer_type().map(|b| b.as_str()).unwrap_or("-"),
            attribute.instanced(),
            attribute.element_count(),
            attribute.byte_stride(),
            attribute.value().component_type(),
            attribute.value().byte_length(),
        );
    }

    if !geometry.user_data().is_empty() {
        let keys: Vec<&str> = geometry.user_data().keys().map(String::as_str).collect();
        println!("  user data:    {}", keys.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_config_path() {
        assert_eq!(config_path(&to_args(&["--config", "my.toml", "a.obj"])), Some("my.toml"));
        assert_eq!(config_path(&to_args(&["a.obj"])), None);
        // 缺少值
        assert_eq!(config_path(&to_args(&["a.obj", "--config"])), None);
    }

    #[test]
    fn test_explicit_config_with_syntax_error_fails() {
        let path = std::env::temp_dir().join("dist_geometry_main_broken_config.toml");
        std::fs::write(&path, "[geometry]\ndefault_draw_mode = \"POINTS\"\nid_prefix = \n").unwrap();

        let args = to_args(&["--config", path.to_str().unwrap(), "a.obj"]);
        let result = load_config(&args);

        let _ = std::fs::remove_file(&path);
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("loading"));
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let args = to_args(&["--config", "does/not/exist/config.toml"]);
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_explicit_config_is_applied() {
        let path = std::env::temp_dir().join("dist_geometry_main_points_config.toml");
        std::fs::write(&path, "[geometry]\ndefault_draw_mode = \"POINTS\"\n").unwrap();

        let args = to_args(&["--config", path.to_str().unwrap()]);
        let config = load_config(&args);

        let _ = std::fs::remove_file(&path);
        assert_eq!(config.unwrap().geometry.default_draw_mode, "POINTS");
    }

    #[test]
    fn test_positional_args_skip_flag_values() {
        let args: Vec<String> = ["--config", "my.toml", "a.obj", "--log-level", "debug", "b.toml", "--verbose"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(positional_args(&args), vec![PathBuf::from("a.obj"), PathBuf::from("b.toml")]);
    }
}
