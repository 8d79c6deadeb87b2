use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use kernel::model::id::PermitId;
use kernel::verifier::{PermitSigner, SignatureVerifier, VerifiedToken};
use sha2::Sha256;
use shared::error::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

// 許可証 QR トークンの署名・検証。
// トークンは base64url(permit_id) と base64url(HMAC-SHA256) をドットで
// つないだ不透明な文字列として扱う
pub struct HmacPermitSigner {
    secret: Vec<u8>,
}

impl HmacPermitSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        // HMAC は任意長の鍵を受け付けるため失敗しない
        HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts keys of any length")
    }
}

impl PermitSigner for HmacPermitSigner {
    fn sign(&self, permit_id: PermitId) -> String {
        let payload = permit_id.raw().to_string();
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let tag = mac.finalize().into_bytes();
        format!(
            "{}.{}",
            general_purpose::URL_SAFE_NO_PAD.encode(payload.as_bytes()),
            general_purpose::URL_SAFE_NO_PAD.encode(tag)
        )
    }
}

impl SignatureVerifier for HmacPermitSigner {
    fn verify(&self, token: &str) -> AppResult<VerifiedToken> {
        let (payload_b64, tag_b64) = token.split_once('.').ok_or(AppError::InvalidSignature)?;
        let payload = general_purpose::URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AppError::InvalidSignature)?;
        let tag = general_purpose::URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| AppError::InvalidSignature)?;

        // verify_slice は定数時間比較
        let mut mac = self.mac();
        mac.update(&payload);
        mac.verify_slice(&tag)
            .map_err(|_| AppError::InvalidSignature)?;

        let permit_id = std::str::from_utf8(&payload)
            .ok()
            .and_then(|s| s.parse::<PermitId>().ok())
            .ok_or(AppError::InvalidSignature)?;

        Ok(VerifiedToken { permit_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_token_round_trips() -> anyhow::Result<()> {
        let signer = HmacPermitSigner::new("test-secret");
        let permit_id = PermitId::new();
        let token = signer.sign(permit_id);
        let verified = signer.verify(&token)?;
        assert_eq!(verified.permit_id, permit_id);
        Ok(())
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let signer = HmacPermitSigner::new("test-secret");
        let token = signer.sign(PermitId::new());
        let other_payload =
            general_purpose::URL_SAFE_NO_PAD.encode(PermitId::new().raw().to_string());
        let tag = token.split_once('.').unwrap().1;
        let forged = format!("{other_payload}.{tag}");
        assert!(matches!(
            signer.verify(&forged),
            Err(AppError::InvalidSignature)
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let signer = HmacPermitSigner::new("test-secret");
        let other = HmacPermitSigner::new("another-secret");
        let token = other.sign(PermitId::new());
        assert!(matches!(
            signer.verify(&token),
            Err(AppError::InvalidSignature)
        ));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let signer = HmacPermitSigner::new("test-secret");
        for token in ["", "no-dot", "bad base64!.also bad!", "b25seQ."] {
            assert!(
                matches!(signer.verify(token), Err(AppError::InvalidSignature)),
                "token = {token:?}"
            );
        }
    }
}
