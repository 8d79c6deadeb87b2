use crate::model::permit::{PermitResponse, PermitValidityResponse, VerifyPermitRequest};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{id::PermitId, permit::Permit, reservation::ReservationStatus};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// 提示された QR トークンを検証する。
// 署名不正はエラー（401）、未知の許可証は 404。それ以外は
// 「無効」も含めて必ず検証結果オブジェクトを返す
pub async fn verify_permit(
    State(registry): State<AppRegistry>,
    Json(req): Json<VerifyPermitRequest>,
) -> AppResult<Json<PermitValidityResponse>> {
    req.validate(&())?;

    let verified = registry.signature_verifier().verify(&req.token)?;

    let permit = registry
        .permit_repository()
        .find_by_id(verified.permit_id)
        .await?
        .ok_or(AppError::PermitNotFound)?;

    evaluate(&registry, permit, true).await.map(Json)
}

pub async fn show_permit(
    Path(permit_id): Path<PermitId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PermitResponse>> {
    registry
        .permit_repository()
        .find_by_id(permit_id)
        .await
        .and_then(|permit| match permit {
            Some(p) => Ok(Json(p.into())),
            None => Err(AppError::PermitNotFound),
        })
}

// 許可証 ID 指定での検証。保存済みトークンの署名チェックも行うが、
// こちらの経路では署名不良をエラーではなく不成立のチェックとして返す
pub async fn check_permit_validity(
    Path(permit_id): Path<PermitId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PermitValidityResponse>> {
    let permit = registry
        .permit_repository()
        .find_by_id(permit_id)
        .await?
        .ok_or(AppError::PermitNotFound)?;

    let signature_valid = match registry.signature_verifier().verify(&permit.qr_payload) {
        Ok(verified) => verified.permit_id == permit.id,
        Err(_) => false,
    };

    evaluate(&registry, permit, signature_valid).await.map(Json)
}

pub async fn revoke_permit(
    Path(permit_id): Path<PermitId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry.permit_repository().revoke(permit_id).await?;
    Ok(StatusCode::OK)
}

// 親予約のステータスを取得して 4 チェックの評価を行う
async fn evaluate(
    registry: &AppRegistry,
    permit: Permit,
    signature_valid: bool,
) -> AppResult<PermitValidityResponse> {
    // 親予約が消えている場合は承認済みとは判定しない
    let reservation_status = registry
        .reservation_repository()
        .find_by_id(permit.reservation_id)
        .await?
        .map_or(ReservationStatus::Rejected, |r| r.status);

    let validity = permit.evaluate(reservation_status, signature_valid, Utc::now());
    Ok(PermitValidityResponse::new(permit.id, validity))
}
