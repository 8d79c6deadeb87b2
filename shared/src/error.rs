use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

// 衝突した既存予約の詳細
// SpatialTemporalConflict エラーに全件載せてクライアントへ返す
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetail {
    pub reservation_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    // 提案中心と既存予約中心の距離（メートル）
    pub distance_m: f64,
    // 衝突とみなされる距離（双方の導出半径の和、メートル）
    pub required_separation_m: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("縦横の寸法は正の値である必要があります（width = {width} m, length = {length} m）")]
    InvalidDimensions { width: f64, length: f64 },
    #[error("開始時刻は終了時刻より前である必要があります（{start} >= {end}）")]
    InvalidTimeWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("スペース（{0}）が見つかりませんでした。")]
    SpaceNotFound(Uuid),
    #[error("リクエストの設置面積がスペースの許可範囲を超えています（導出半径 {derived_radius_m:.1} m >= 許可半径 {allowed_radius_m:.1} m）")]
    FootprintExceedsCapacity {
        derived_radius_m: f64,
        allowed_radius_m: f64,
    },
    #[error("設置場所がスペースの許可範囲の外にあります（中心間距離 {distance_m:.1} m > 許容距離 {max_distance_m:.1} m）")]
    OutOfBounds {
        distance_m: f64,
        derived_radius_m: f64,
        allowed_radius_m: f64,
        max_distance_m: f64,
    },
    #[error("指定の時間帯・場所は既存の承認済み予約（{}件）と重複しています。", conflicts.len())]
    SpatialTemporalConflict { conflicts: Vec<ConflictDetail> },
    #[error("許可証が見つかりませんでした。")]
    PermitNotFound,
    #[error("許可証トークンの署名が不正です。")]
    InvalidSignature,
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    ConversionEntityError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppError::InvalidDimensions { .. }
            | AppError::InvalidTimeWindow { .. }
            | AppError::ValidationError(_)
            | AppError::ConversionEntityError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidSignature => StatusCode::UNAUTHORIZED,
            AppError::SpaceNotFound(_)
            | AppError::PermitNotFound
            | AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::SpatialTemporalConflict { .. } => StatusCode::CONFLICT,
            AppError::FootprintExceedsCapacity { .. }
            | AppError::OutOfBounds { .. }
            | AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // 業務エラーは原因をクライアントが特定できるだけの情報を返す
        let body = match &self {
            AppError::SpatialTemporalConflict { conflicts } => serde_json::json!({
                "error": self.to_string(),
                "conflicts": conflicts,
            }),
            AppError::OutOfBounds {
                distance_m,
                derived_radius_m,
                allowed_radius_m,
                max_distance_m,
            } => serde_json::json!({
                "error": self.to_string(),
                "distanceM": distance_m,
                "derivedRadiusM": derived_radius_m,
                "allowedRadiusM": allowed_radius_m,
                "maxDistanceM": max_distance_m,
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        (status_code, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
