use serde::Serialize;

/// 数据传输对象（DTO）
///
/// - 作为应用层的输出载体，面向接口/外部系统序列化友好；
/// - 与持久化实体解耦，避免将实体直接暴露到接口层。
pub trait Dto: Serialize + Send + Sync + 'static {}
