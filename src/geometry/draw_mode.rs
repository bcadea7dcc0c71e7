/// 图元绘制模式
///
/// 只负责成员校验，不解释各模式的装配语义。

use std::fmt;
use std::str::FromStr;

use crate::core::error::GeometryError;

/// 支持的图元绘制模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl DrawMode {
    /// 所有支持的模式
    pub const ALL: [DrawMode; 7] = [
        DrawMode::Points,
        DrawMode::Lines,
        DrawMode::LineLoop,
        DrawMode::LineStrip,
        DrawMode::Triangles,
        DrawMode::TriangleStrip,
        DrawMode::TriangleFan,
    ];

    /// 模式的标记字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawMode::Points => "POINTS",
            DrawMode::Lines => "LINES",
            DrawMode::LineLoop => "LINE_LOOP",
            DrawMode::LineStrip => "LINE_STRIP",
            DrawMode::Triangles => "TRIANGLES",
            DrawMode::TriangleStrip => "TRIANGLE_STRIP",
            DrawMode::TriangleFan => "TRIANGLE_FAN",
        }
    }
}

impl FromStr for DrawMode {
    type Err = GeometryError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        DrawMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == token)
            .ok_or_else(|| GeometryError::InvalidDrawMode {
                mode: token.to_string(),
            })
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tokens() {
        for mode in DrawMode::ALL {
            assert_eq!(mode.as_str().parse::<DrawMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_parse_unknown_token() {
        assert_eq!(
            "HEXAGONS".parse::<DrawMode>(),
            Err(GeometryError::InvalidDrawMode { mode: "HEXAGONS".to_string() })
        );
        // 标记区分大小写
        assert!("triangles".parse::<DrawMode>().is_err());
    }

    #[test]
    fn test_default_is_triangles() {
        assert_eq!(DrawMode::default(), DrawMode::Triangles);
    }
}
