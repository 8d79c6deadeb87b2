use crate::model::id::PermitId;
use shared::error::AppResult;

// 署名検証を通過したトークンの中身
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedToken {
    pub permit_id: PermitId,
}

// 許可証トークンの真正性チェック（外部能力）
// 署名方式そのものは本コアの関心外で、adapter 側の実装に委ねる
pub trait SignatureVerifier: Send + Sync {
    // 署名が不正・トークンが壊れている場合は InvalidSignature を返す
    fn verify(&self, token: &str) -> AppResult<VerifiedToken>;
}

// 許可証発行時のトークン生成（検証の対になる能力）
pub trait PermitSigner: Send + Sync {
    fn sign(&self, permit_id: PermitId) -> String;
}
