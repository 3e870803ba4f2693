//! Smoke-run identity generation
//!
//! Each run registers a throwaway member so repeated runs never collide
//! with earlier applications.

use amani_core::dto::auth::RegisterRequest;
use chrono::Utc;
use rand::Rng;

/// Password accepted by the portal's complexity rules
const SMOKE_PASSWORD: &str = "TestPass123!";

/// Builds a unique throwaway registration payload
///
/// Usernames embed the current unix-millis timestamp; phone numbers are
/// random Kenyan mobiles in the +2547 range.
pub fn generate(full_name: &str) -> RegisterRequest {
    let mut rng = rand::thread_rng();
    let subscriber: u32 = rng.gen_range(10_000_000..100_000_000);

    RegisterRequest {
        full_name: full_name.to_string(),
        username: format!("smoke_{}", Utc::now().timestamp_millis()),
        phone_number: format!("+2547{}", subscriber),
        password: SMOKE_PASSWORD.to_string(),
        email: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_identity_shape() {
        let request = generate("Smoke Test User");

        assert_eq!(request.full_name, "Smoke Test User");
        assert!(request.username.starts_with("smoke_"));
        assert_eq!(request.password, SMOKE_PASSWORD);
        assert!(request.email.is_none());
    }

    #[test]
    fn test_phone_number_is_kenyan_mobile() {
        for _ in 0..100 {
            let request = generate("Smoke Test User");

            assert!(request.phone_number.starts_with("+2547"));
            assert_eq!(request.phone_number.len(), 13);
            assert!(
                request.phone_number[1..]
                    .chars()
                    .all(|c| c.is_ascii_digit())
            );
        }
    }
}
