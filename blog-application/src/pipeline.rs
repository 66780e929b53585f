//! 创建流程编排器（CreatePipeline）
//!
//! 封装“校验 → 查找引用 → 映射 → 派生字段 → 暂存 → 提交”的标准流程：
//!
//! ```text
//! Validating → Resolving → Mapping → Deriving → Persisting → Committing → Committed
//!      └───────────┴──────────┴─────────┴───────────┴────────────┴──→ Rejected
//! ```
//!
//! 任一阶段失败立即终止整个请求，不重试，也不会写入任何数据。
//! 取消信号在每个阶段开始前与提交前检查；提交开始后不再响应取消。
//!
use crate::command::Command;
use crate::context::AppContext;
use crate::error::AppError;
use crate::mapper::MapFrom;
use crate::validation::Validate;
use async_trait::async_trait;
use blog_domain::entity::Entity;
use blog_domain::persist::{DataStore, PendingInsert, UnitOfWork};
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

/// 流程阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Resolving,
    Mapping,
    Deriving,
    Persisting,
    Committing,
    Committed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Validating => "validating",
            Stage::Resolving => "resolving",
            Stage::Mapping => "mapping",
            Stage::Deriving => "deriving",
            Stage::Persisting => "persisting",
            Stage::Committing => "committing",
            Stage::Committed => "committed",
        };
        f.write_str(s)
    }
}

/// 一种创建操作在流程中的可变部分
#[async_trait]
pub trait CreateOperation: Send + Sync {
    type Command: Command + Validate;
    type Entity: Entity + MapFrom<Self::Command> + Into<PendingInsert> + Send + 'static;
    /// 查找阶段得到的引用，交给派生阶段使用
    type Resolved: Send;

    /// 查找引用并检查唯一性等前置条件
    async fn resolve(
        &self,
        ctx: &AppContext,
        cmd: &Self::Command,
    ) -> Result<Self::Resolved, AppError>;

    /// 设置映射器不负责的关联/派生字段（主键、站点、审核标记、别名等）
    fn derive(
        &self,
        ctx: &AppContext,
        cmd: &Self::Command,
        resolved: Self::Resolved,
        entity: &mut Self::Entity,
    );
}

/// 面向命令处理器的创建流程编排器
pub struct CreatePipeline<S> {
    store: Arc<S>,
}

impl<S> Clone for CreatePipeline<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> CreatePipeline<S>
where
    S: DataStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 执行一次创建请求
    pub async fn execute<O>(
        &self,
        op: &O,
        ctx: &AppContext,
        cmd: O::Command,
    ) -> Result<(), AppError>
    where
        O: CreateOperation,
    {
        let span = tracing::info_span!(
            "command",
            command = <O::Command as Command>::NAME,
            correlation_id = ctx.biz.correlation_id(),
            causation_id = ctx.biz.causation_id(),
            actor_type = ctx.biz.actor_type(),
            actor_id = ctx.biz.actor_id(),
        );

        self.run(op, ctx, cmd).instrument(span).await
    }

    async fn run<O>(&self, op: &O, ctx: &AppContext, cmd: O::Command) -> Result<(), AppError>
    where
        O: CreateOperation,
    {
        // 1. 校验
        ensure_active(ctx, Stage::Validating)?;
        let violations = cmd.validate();
        if !violations.is_empty() {
            return Err(reject(Stage::Validating, violations.into()));
        }

        // 2. 查找引用
        ensure_active(ctx, Stage::Resolving)?;
        let resolved = match ctx
            .cancellation
            .run_until_cancelled(op.resolve(ctx, &cmd))
            .await
        {
            Some(Ok(resolved)) => resolved,
            Some(Err(err)) => return Err(reject(Stage::Resolving, err)),
            None => return Err(reject(Stage::Resolving, AppError::Cancelled)),
        };

        // 3. 映射
        ensure_active(ctx, Stage::Mapping)?;
        let mut entity = <O::Entity as MapFrom<O::Command>>::map_from(&cmd);

        // 4. 派生字段
        ensure_active(ctx, Stage::Deriving)?;
        op.derive(ctx, &cmd, resolved, &mut entity);
        let id = entity.id().to_string();
        let table = <O::Entity as Entity>::TABLE;

        // 5. 暂存
        tracing::debug!(stage = %Stage::Persisting, table, %id);
        let mut uow = self.store.begin();
        uow.add(entity.into());

        // 6. 提交
        ensure_active(ctx, Stage::Committing)?;
        let affected = uow
            .commit()
            .await
            .map_err(|e| reject(Stage::Committing, e.into()))?;
        if affected == 0 {
            return Err(reject(Stage::Committing, AppError::Persistence));
        }

        tracing::info!(stage = %Stage::Committed, table, %id, affected);
        Ok(())
    }
}

fn ensure_active(ctx: &AppContext, stage: Stage) -> Result<(), AppError> {
    if ctx.is_cancelled() {
        return Err(reject(stage, AppError::Cancelled));
    }
    tracing::debug!(%stage);
    Ok(())
}

/// 记录并返回拒绝原因：可由调用方修正的记 warn，其余记 error
fn reject(stage: Stage, err: AppError) -> AppError {
    if err.is_caller_recoverable() {
        tracing::warn!(%stage, error = %err, "command rejected");
    } else {
        tracing::error!(%stage, error = %err, "command failed");
    }
    err
}
