use std::time::Duration;

use bytes::Bytes;
use uuid::Uuid;

use medpass::auth::{jwt, password, share};
use medpass::chat::prompt::{self, Category};
use medpass::rate_limit::LoginRateLimiter;
use medpass::storage::{AssetStore, LocalStore};

// ── JWT ─────────────────────────────────────────────────────────

#[test]
fn jwt_roundtrip_preserves_subject_and_role() {
    let id = Uuid::now_v7();

    let token = jwt::encode_token(&jwt::Claims::user(id), "secret").unwrap();
    let claims = jwt::decode_token(&token, "secret").unwrap();
    assert_eq!(claims.sub, id);
    assert_eq!(claims.role, jwt::ROLE_USER);

    let token = jwt::encode_token(&jwt::Claims::admin(id), "secret").unwrap();
    let claims = jwt::decode_token(&token, "secret").unwrap();
    assert_eq!(claims.role, jwt::ROLE_ADMIN);
}

#[test]
fn jwt_rejects_wrong_secret_and_garbage() {
    let token = jwt::encode_token(&jwt::Claims::user(Uuid::now_v7()), "secret").unwrap();
    assert!(jwt::decode_token(&token, "other-secret").is_err());
    assert!(jwt::decode_token("not.a.jwt", "secret").is_err());
}

#[test]
fn jwt_rejects_expired_token() {
    let claims = jwt::Claims {
        sub: Uuid::now_v7(),
        role: jwt::ROLE_USER.to_string(),
        exp: (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp(),
    };
    let token = jwt::encode_token(&claims, "secret").unwrap();
    assert!(jwt::decode_token(&token, "secret").is_err());
}

// ── Passwords ───────────────────────────────────────────────────

#[test]
fn password_hash_verifies_and_rejects() {
    let hash = password::hash("correct horse battery").unwrap();
    assert_ne!(hash, "correct horse battery");
    assert!(password::verify("correct horse battery", &hash).unwrap());
    assert!(!password::verify("wrong password", &hash).unwrap());
}

#[test]
fn password_hashes_are_salted() {
    let a = password::hash("same input").unwrap();
    let b = password::hash("same input").unwrap();
    assert_ne!(a, b);
}

// ── Share tokens ────────────────────────────────────────────────

#[test]
fn share_tokens_are_long_hex_and_unique() {
    let a = share::generate_share_token();
    let b = share::generate_share_token();

    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
}

// ── Prompt shaping ──────────────────────────────────────────────

#[test]
fn categorize_picks_the_right_bucket() {
    assert_eq!(prompt::categorize("I have a fever and headache"), Category::Medical);
    assert_eq!(prompt::categorize("Feeling a lot of STRESS lately"), Category::MentalHealth);
    assert_eq!(prompt::categorize("any diet tips?"), Category::Lifestyle);
    assert_eq!(prompt::categorize("hello there"), Category::General);
}

#[test]
fn categorize_medical_wins_over_mental_health() {
    // "pain" and "stress" both present; physical symptoms take priority.
    assert_eq!(
        prompt::categorize("chest pain from stress"),
        Category::Medical
    );
}

#[test]
fn build_prompt_embeds_the_message() {
    let p = prompt::build_prompt("my knee hurts", Category::Medical);
    assert!(p.contains("my knee hurts"));
    let general = prompt::build_prompt("my knee hurts", Category::General);
    assert_ne!(p, general);
}

#[test]
fn session_title_truncates_after_five_words() {
    assert_eq!(prompt::session_title("short question"), "short question");
    assert_eq!(
        prompt::session_title("one two three four five six seven"),
        "one two three four five..."
    );
    assert_eq!(prompt::session_title("  spaced   out   words  "), "spaced out words");
}

// ── Login rate limiter ──────────────────────────────────────────

#[test]
fn limiter_allows_until_threshold_then_blocks() {
    let limiter = LoginRateLimiter::new();

    for _ in 0..5 {
        assert!(limiter.check("a@x.com").is_ok());
        limiter.record_failure("a@x.com");
    }

    assert!(limiter.check("a@x.com").is_err());
    // Another account is unaffected.
    assert!(limiter.check("b@x.com").is_ok());
}

#[test]
fn limiter_is_case_insensitive_on_email() {
    let limiter = LoginRateLimiter::new();
    for _ in 0..5 {
        limiter.record_failure("Mixed@Case.com");
    }
    assert!(limiter.check("mixed@case.com").is_err());
}

#[test]
fn limiter_cleanup_drops_old_entries() {
    let limiter = LoginRateLimiter::new();
    for _ in 0..5 {
        limiter.record_failure("a@x.com");
    }
    assert!(limiter.check("a@x.com").is_err());

    limiter.cleanup(Duration::from_secs(0));
    assert!(limiter.check("a@x.com").is_ok());
}

// ── Local asset store ───────────────────────────────────────────

fn temp_store() -> (LocalStore, std::path::PathBuf) {
    let dir = std::env::temp_dir().join(format!("medpass-store-{}", Uuid::now_v7()));
    let store = LocalStore::new(dir.clone()).unwrap();
    (store, dir)
}

#[tokio::test]
async fn local_store_writes_file_and_returns_uploads_url() {
    let (store, dir) = temp_store();

    let asset = store
        .store(Bytes::from_static(b"image bytes"), "scan.png")
        .await
        .unwrap();

    assert!(asset.url.starts_with("/uploads/"));
    assert!(asset.url.ends_with("scan.png"));
    assert!(asset.deletion_handle.is_none());

    let name = asset.url.trim_start_matches("/uploads/");
    let written = std::fs::read(dir.join(name)).unwrap();
    assert_eq!(written, b"image bytes");

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn local_store_sanitizes_hostile_filenames() {
    let (store, dir) = temp_store();

    let asset = store
        .store(Bytes::from_static(b"x"), "../../etc/passwd")
        .await
        .unwrap();

    // Separators are stripped so the file cannot escape the upload dir.
    let name = asset.url.trim_start_matches("/uploads/");
    assert!(!name.contains('/'));
    assert!(dir.join(name).is_file());

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn local_store_purge_is_a_noop() {
    let (store, dir) = temp_store();
    assert!(store.purge("anything").await.is_ok());
    let _ = std::fs::remove_dir_all(dir);
}
