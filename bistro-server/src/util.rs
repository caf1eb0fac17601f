//! Shared utility functions for bistro-server

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Stored file name for an upload: `<millis>-<uuid>.<ext>`
pub fn upload_file_name(now_millis: i64, ext: &str) -> String {
    format!("{now_millis}-{}.{ext}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("pizza-night-42").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pizza-night-42", &hash));
        assert!(!verify_password("pizza-night-43", &hash));
        assert!(!verify_password("pizza-night-42", "not-a-phc-string"));
    }

    #[test]
    fn test_upload_file_name() {
        let name = upload_file_name(1_700_000_000_000, "webp");
        assert!(name.starts_with("1700000000000-"));
        assert!(name.ends_with(".webp"));
        assert_ne!(name, upload_file_name(1_700_000_000_000, "webp"));
    }
}
