/// 标识符生成模块
///
/// 调用方未指定 id 时，为几何体生成进程内唯一的标识符。

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// 生成进程内唯一的标识符，形如 `geometry-0`
pub fn next_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", prefix, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = next_id("geometry");
        let b = next_id("geometry");
        assert_ne!(a, b);
        assert!(a.starts_with("geometry-"));
    }
}
