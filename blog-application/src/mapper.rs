//! 对象映射声明
//!
//! 每个合法的 `Source → Target` 组合实现一次 [`MapFrom`]。映射只按同名字段复制，
//! 目标上没有对应来源的字段保持默认值；关联/派生字段（站点、审核标记、别名等）
//! 由命令处理器在映射之后设置。映射只读取来源，不修改来源。
//!
/// 从 `S` 构造 `Self`
pub trait MapFrom<S>: Sized {
    fn map_from(source: &S) -> Self;
}

/// 便捷函数：`let post: Post = map(&cmd);`
pub fn map<S, T>(source: &S) -> T
where
    T: MapFrom<S>,
{
    T::map_from(source)
}
