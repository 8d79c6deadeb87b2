use crate::database::{
    model::{reservation::ReservationRow, space::SpaceRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    conflict::{conflict_error, detect_conflicts},
    id::{ReservationId, SpaceId},
    reservation::{
        event::{CreateReservation, UpdateReservationStatus},
        Reservation, ReservationStatus,
    },
    space::Space,
    window::TimeWindow,
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

// 衝突候補の抽出条件。時間帯は半開区間 [start, end) として比較する：
//     existing.start < new.end AND new.start < existing.end
// 空間判定（半径和との距離比較）は SQL に埋め込まず、行を取り出してから
// kernel の純粋関数で行う
const SELECT_APPROVED_OVERLAPPING_IN_SPACE: &str = r#"
    SELECT
        reservation_id,
        space_id,
        center_lat,
        center_lng,
        max_width,
        max_length,
        start_time,
        end_time,
        status,
        requested_at
    FROM reservations
    WHERE space_id = $1
      AND status = 'APPROVED'
      AND start_time < $3
      AND $2 < end_time
"#;

// スペースに属さない単独申請どうしの衝突候補
const SELECT_APPROVED_OVERLAPPING_STANDALONE: &str = r#"
    SELECT
        reservation_id,
        space_id,
        center_lat,
        center_lng,
        max_width,
        max_length,
        start_time,
        end_time,
        status,
        requested_at
    FROM reservations
    WHERE space_id IS NULL
      AND status = 'APPROVED'
      AND start_time < $2
      AND $1 < end_time
"#;

const SELECT_RESERVATION: &str = r#"
    SELECT
        reservation_id,
        space_id,
        center_lat,
        center_lng,
        max_width,
        max_length,
        start_time,
        end_time,
        status,
        requested_at
    FROM reservations
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // 出店申請を行う
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // 検索→判定→挿入の並びを同一スペースへの申請どうしで直列化するため、
        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下を調べる。
        // - スペース指定がある場合、そのスペースが存在し利用可能か
        // - 設置範囲がスペースの許可区域に収まるか
        // - 時間帯・場所の両方で重なる承認済み予約がないか
        //
        // 上記すべてを通過した場合、このブロック以降の挿入処理に進む
        {
            if let Some(space_id) = event.space_id {
                //
                // ① スペースの存在確認 ＋ is_active チェック
                //
                let space_row: Option<SpaceRow> = sqlx::query_as(
                    r#"
                    SELECT
                        space_id,
                        space_name,
                        address,
                        center_lat,
                        center_lng,
                        allowed_radius,
                        is_active
                    FROM spaces
                    WHERE space_id = $1
                    "#,
                )
                .bind(space_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                let space = match space_row {
                    None => return Err(AppError::SpaceNotFound(space_id.raw())),
                    Some(row) => Space::from(row),
                };

                if !space.is_active {
                    return Err(AppError::UnprocessableEntity(format!(
                        "スペース（{space_id}）は現在利用できません（is_active = false）"
                    )));
                }

                //
                // ② 設置範囲が許可区域に収まっているか確認
                //
                space.check_contains(&event.footprint)?;
            }

            //
            // ③ 希望時間帯と重複する承認済み予約を取得し、
            //    設置範囲どうしの距離（半径和との比較）で衝突を判定する
            //
            let candidates = self
                .fetch_approved_overlapping(&mut tx, event.space_id, event.window)
                .await?;
            let conflicts = detect_conflicts(&event.footprint, &event.window, &candidates)?;
            if !conflicts.is_empty() {
                return Err(conflict_error(conflicts));
            }

            //
            // ここまでのチェックを通過すれば予約を作成する
            //
        }

        // 予約処理を行う、すなわち reservations テーブルにレコードを追加する
        // 初期ステータスは PENDING（承認ワークフローは別経路）
        let reservation_id = ReservationId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, space_id, center_lat, center_lng,
                max_width, max_length, start_time, end_time,
                status, requested_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ;
            "#,
        )
        .bind(reservation_id)
        .bind(event.space_id)
        .bind(event.footprint.center().latitude)
        .bind(event.footprint.center().longitude)
        .bind(event.footprint.width_m())
        .bind(event.footprint.length_m())
        .bind(event.window.start())
        .bind(event.window.end())
        .bind(ReservationStatus::Pending.as_str())
        .bind(event.requested_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> =
            sqlx::query_as(&format!("{SELECT_RESERVATION} WHERE reservation_id = $1"))
                .bind(reservation_id)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn find_by_space_id(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
            "{SELECT_RESERVATION} WHERE space_id = $1 ORDER BY requested_at ASC"
        ))
        .bind(space_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    // 承認ワークフローからのステータス更新
    async fn update_status(&self, event: UpdateReservationStatus) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET status = $1
                WHERE reservation_id = $2
            "#,
        )
        .bind(event.status.as_str())
        .bind(event.reservation_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified reservation not found".into(),
            ));
        }

        Ok(())
    }
}

impl ReservationRepositoryImpl {
    // create メソッドでのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    // 衝突判定の候補（時間帯が重複する承認済み予約）をトランザクション内で取得する
    async fn fetch_approved_overlapping(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        space_id: Option<SpaceId>,
        window: TimeWindow,
    ) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = match space_id {
            Some(space_id) => {
                sqlx::query_as(SELECT_APPROVED_OVERLAPPING_IN_SPACE)
                    .bind(space_id)
                    .bind(window.start())
                    .bind(window.end())
                    .fetch_all(&mut **tx)
                    .await
            }
            None => {
                sqlx::query_as(SELECT_APPROVED_OVERLAPPING_STANDALONE)
                    .bind(window.start())
                    .bind(window.end())
                    .fetch_all(&mut **tx)
                    .await
            }
        }
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }
}
