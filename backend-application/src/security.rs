// CSRF token issuance and verification
// Hex HMAC-SHA256 scoped to the acting operator and the local day

use anyhow::anyhow;
use chrono::Local;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::AppError;

const TOKEN_PREFIX: &str = "report-csrf";
const TOKEN_VERSION: &str = "v1";

type HmacSha256 = Hmac<Sha256>;

pub fn issue_csrf_token(secret: &str, actor_id: &str) -> Result<String, AppError> {
    let day = Local::now().format("%Y%m%d").to_string();
    sign(secret, &day, actor_id)
}

pub fn verify_csrf_token(secret: &str, actor_id: &str, presented: &str) -> Result<(), AppError> {
    let Some(digest) = decode_hex(presented.trim()) else {
        return Err(AppError::Unauthorized);
    };
    let day = Local::now().format("%Y%m%d").to_string();
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| AppError::Internal(anyhow!("hmac init failed: {err}")))?;
    mac.update(token_payload(&day, actor_id).as_bytes());
    mac.verify_slice(&digest).map_err(|_| AppError::Unauthorized)
}

fn sign(secret: &str, day: &str, actor_id: &str) -> Result<String, AppError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| AppError::Internal(anyhow!("hmac init failed: {err}")))?;
    mac.update(token_payload(day, actor_id).as_bytes());
    let digest = mac.finalize().into_bytes();

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    Ok(out)
}

fn token_payload(day: &str, actor_id: &str) -> String {
    format!("{}|{}|{}|{}", TOKEN_PREFIX, TOKEN_VERSION, day, actor_id)
}

fn decode_hex(value: &str) -> Option<Vec<u8>> {
    if value.is_empty() || value.len() % 2 != 0 {
        return None;
    }
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(value.len() / 2);
    for pair in bytes.chunks(2) {
        let high = (pair[0] as char).to_digit(16)?;
        let low = (pair[1] as char).to_digit(16)?;
        out.push((high * 16 + low) as u8);
    }
    Some(out)
}
