// feedback-backend/src/utils/transaction.rs

//! トランザクション管理の統一化
//!
//! リポジトリ層で一貫したトランザクション境界を提供します。
//! 操作が失敗した場合は必ずロールバックし、元のエラーを返します。

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, error, instrument, warn};

// Future型エイリアス（Boxed Future）
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// トランザクション実行を抽象化するトレイト
pub trait TransactionManager {
    /// トランザクション内で操作を実行
    #[allow(clippy::manual_async_fn)]
    fn execute_in_transaction<F, R>(
        &self,
        operation: F,
    ) -> impl Future<Output = Result<R, DbErr>> + Send
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, DbErr>>
            + Send
            + 'static,
        R: Send + 'static;
}

// DatabaseConnection への実装
impl TransactionManager for DatabaseConnection {
    #[instrument(skip(self, operation), name = "database_transaction")]
    #[allow(clippy::manual_async_fn)]
    fn execute_in_transaction<F, R>(
        &self,
        operation: F,
    ) -> impl Future<Output = Result<R, DbErr>> + Send
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, DbErr>>
            + Send
            + 'static,
        R: Send + 'static,
    {
        async move {
            let transaction_start = std::time::Instant::now();

            debug!("Starting database transaction");

            let txn = self.begin().await.map_err(|e| {
                error!(error = %e, "Failed to begin transaction");
                e
            })?;

            match operation(&txn).await {
                Ok(value) => {
                    txn.commit().await.map_err(|e| {
                        error!(error = %e, "Failed to commit transaction");
                        e
                    })?;

                    debug!(
                        duration_ms = transaction_start.elapsed().as_millis(),
                        "Transaction committed"
                    );

                    Ok(value)
                }
                Err(db_error) => {
                    warn!(error = %db_error, "Transaction operation failed, rolling back");

                    if let Err(rollback_error) = txn.rollback().await {
                        // 接続破棄時に未コミットの変更は破棄される
                        error!(
                            original_error = %db_error,
                            rollback_error = %rollback_error,
                            "Failed to rollback transaction"
                        );
                    }

                    warn!(
                        duration_ms = transaction_start.elapsed().as_millis(),
                        "Transaction rolled back"
                    );

                    Err(db_error)
                }
            }
        }
    }
}

/// トランザクション内での操作を簡単に記述するマクロ
#[macro_export]
macro_rules! with_transaction {
    ($db:expr, |$txn:ident| $body:expr) => {{
        use $crate::utils::transaction::TransactionManager;

        $db.execute_in_transaction(move |$txn| Box::pin($body))
            .await
    }};
}
