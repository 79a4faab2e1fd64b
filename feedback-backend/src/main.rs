// feedback-backend/src/main.rs
use feedback_backend::{
    api::{create_router, AppState},
    config::AppConfig,
    db::{create_db_pool, run_migrations},
    utils::email::{Notifier, SmtpNotifier},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 設定を読み込む（ログフィルタの既定値が debug フラグに依存するため先に行う）
    let app_config = AppConfig::from_env()?;

    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| app_config.default_log_filter().into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Feedback Backend server...");
    tracing::info!(
        environment = %app_config.environment,
        debug = app_config.debug,
        "Configuration loaded"
    );

    if app_config.uses_default_secret() && !app_config.debug {
        tracing::warn!("SECRET_KEY is not set; using the development default");
    }

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config).await?;
    tracing::info!("Database pool created successfully.");

    run_migrations(&db_pool).await?;
    tracing::info!("Database migrations applied.");

    // 認証情報が無ければ通知は無効
    let notifier = SmtpNotifier::from_config(&app_config.mail)
        .map(|notifier| Arc::new(notifier) as Arc<dyn Notifier>);
    if notifier.is_none() {
        tracing::warn!("Mail credentials are not configured; notification emails are disabled");
    }

    let server_addr = app_config.server_addr();
    let app_state = AppState::new(db_pool, app_config, notifier);
    let app_router = create_router(app_state);

    // サーバーの起動
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(
        listener,
        app_router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
