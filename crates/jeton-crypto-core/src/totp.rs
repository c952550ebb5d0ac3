//! RFC 6238 TOTP and RFC 4226 HOTP engine.
//!
//! Standards-compliant one-time password generation using `ring::hmac`
//! for HMAC-SHA1, HMAC-SHA256, and HMAC-SHA512, plus the seed-credential
//! pipeline ([`generate_code`], [`verify_code`]) that ties the engine to
//! [`DecryptedSeed`]. All functions take wall-clock time explicitly, so
//! generation and verification are independently testable.

use ring::hmac;

use crate::error::CryptoError;
use crate::seed::DecryptedSeed;

/// Constant-time byte comparison for OTP codes.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// Uses bitwise OR accumulation to avoid short-circuit timing leaks.
///
/// The early return on length mismatch is acceptable for OTP codes: the
/// expected digit count (6 or 8) is public information. The constant-time
/// property protects the code value, not its length.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

// ── Constants ───────────────────────────────────────────────────────

/// Default TOTP period in seconds (RFC 6238 §4).
pub const DEFAULT_PERIOD: u32 = 30;

/// Default validation window in time steps (±1 per RFC 6238 §5.2).
pub const DEFAULT_WINDOW: u32 = 1;

// ── Types ───────────────────────────────────────────────────────────

/// HMAC algorithm used for OTP generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OtpAlgorithm {
    /// HMAC-SHA1 (default for most authenticator apps, and RFC 4226's).
    Sha1,
    /// HMAC-SHA256.
    Sha256,
    /// HMAC-SHA512.
    Sha512,
}

impl OtpAlgorithm {
    /// Map to the corresponding `ring::hmac::Algorithm`.
    fn to_ring_algorithm(self) -> hmac::Algorithm {
        match self {
            Self::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Self::Sha256 => hmac::HMAC_SHA256,
            Self::Sha512 => hmac::HMAC_SHA512,
        }
    }
}

/// Number of digits in an OTP code (6 or 8 only).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OtpDigits {
    /// 6-digit code (standard).
    Six,
    /// 8-digit code.
    Eight,
}

impl OtpDigits {
    /// Return the numeric digit count.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Six => 6,
            Self::Eight => 8,
        }
    }

    /// Return the modulus value (10^digits) for truncation.
    const fn modulus(self) -> u32 {
        match self {
            Self::Six => 1_000_000,
            Self::Eight => 100_000_000,
        }
    }
}

// ── HOTP (RFC 4226) ────────────────────────────────────────────────

/// Generate an HOTP code per RFC 4226.
///
/// # Arguments
/// - `secret`: Shared secret key bytes (the decoded base32 secret)
/// - `counter`: 8-byte counter value (big-endian per RFC 4226 §5.2)
/// - `digits`: Number of output digits (6 or 8)
/// - `algorithm`: HMAC algorithm to use
///
/// # Errors
/// Returns `CryptoError::Otp` if the secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_hotp(
    secret: &[u8],
    counter: u64,
    digits: OtpDigits,
    algorithm: OtpAlgorithm,
) -> Result<String, CryptoError> {
    if secret.is_empty() {
        return Err(CryptoError::Otp("secret must not be empty".to_owned()));
    }

    // HMAC(K, C) where C is counter as 8-byte big-endian (RFC 4226 §5.2).
    let key = hmac::Key::new(algorithm.to_ring_algorithm(), secret);
    let counter_bytes = counter.to_be_bytes();
    let tag = hmac::sign(&key, &counter_bytes);
    let hmac_result = tag.as_ref();

    // Dynamic Truncation (RFC 4226 §5.3).
    // offset = low-order 4 bits of last byte.
    let offset = usize::from(hmac_result[hmac_result.len().wrapping_sub(1)] & 0x0F);

    // Extract 4 bytes starting at offset, mask high bit (0x7FFFFFFF).
    let binary_code = u32::from_be_bytes([
        hmac_result[offset] & 0x7F,
        hmac_result[offset.wrapping_add(1)],
        hmac_result[offset.wrapping_add(2)],
        hmac_result[offset.wrapping_add(3)],
    ]);

    // code = binary_code mod 10^digits.
    // modulus is always 1_000_000 or 100_000_000 (never zero).
    let modulus = digits.modulus();
    #[allow(clippy::arithmetic_side_effects)]
    let code = binary_code % modulus;
    let width = usize::from(digits.value());

    Ok(format!("{code:0>width$}"))
}

// ── TOTP (RFC 6238) ────────────────────────────────────────────────

/// Generate a TOTP code per RFC 6238.
///
/// # Arguments
/// - `secret`: Shared secret key bytes
/// - `time`: Unix timestamp in seconds
/// - `digits`: Number of output digits (6 or 8)
/// - `period`: Time step in seconds (typically 30)
/// - `algorithm`: HMAC algorithm to use
///
/// # Errors
/// Returns `CryptoError::Otp` if `period` is 0 or secret is empty.
#[must_use = "OTP code should be used or stored"]
pub fn generate_totp(
    secret: &[u8],
    time: u64,
    digits: OtpDigits,
    period: u32,
    algorithm: OtpAlgorithm,
) -> Result<String, CryptoError> {
    if period == 0 {
        return Err(CryptoError::Otp("period must be > 0".to_owned()));
    }

    // T = floor(time / period) per RFC 6238 §4.
    // period is validated non-zero above.
    let period_u64 = u64::from(period);
    #[allow(clippy::arithmetic_side_effects)]
    let time_step = time / period_u64;
    generate_hotp(secret, time_step, digits, algorithm)
}

/// Validate a TOTP code within ±`window` time steps (RFC 6238 §5.2).
///
/// Checks the code against every step in the inclusive range
/// `[T - window, T + window]` using constant-time comparison per step.
/// Past and future steps are tolerated alike; a caller wanting stricter
/// replay resistance passes a smaller window.
///
/// # Arguments
/// - `secret`: Shared secret key bytes
/// - `time`: Unix timestamp in seconds
/// - `code`: The candidate code to validate
/// - `digits`: Number of output digits
/// - `period`: Time step in seconds
/// - `algorithm`: HMAC algorithm to use
/// - `window`: Accepted drift in time steps on each side
///
/// # Errors
/// Returns `CryptoError::Otp` if `period` is 0 or secret is empty.
#[must_use = "validation result should be checked"]
pub fn validate_totp(
    secret: &[u8],
    time: u64,
    code: &str,
    digits: OtpDigits,
    period: u32,
    algorithm: OtpAlgorithm,
    window: u32,
) -> Result<bool, CryptoError> {
    if period == 0 {
        return Err(CryptoError::Otp("period must be > 0".to_owned()));
    }

    // period is validated non-zero above.
    let period_u64 = u64::from(period);
    #[allow(clippy::arithmetic_side_effects)]
    let time_step = time / period_u64;

    // Check every step in [T-window, T+window].
    // Saturating arithmetic keeps the bounds inside u64: at time_step=0
    // the start clamps to 0 (not u64::MAX).
    let mut valid = false;

    let start = time_step.saturating_sub(u64::from(window));
    let end = time_step.saturating_add(u64::from(window));

    let mut step = start;
    loop {
        let expected = generate_hotp(secret, step, digits, algorithm)?;
        // Constant-time comparison to prevent timing attacks.
        if constant_time_eq(expected.as_bytes(), code.as_bytes()) {
            valid = true;
        }
        if step == end {
            break;
        }
        step = step.wrapping_add(1);
    }

    Ok(valid)
}

// ── Seed-credential pipeline ────────────────────────────────────────

// Deployment parameters for seed credentials: SHA-1, six digits, and the
// 30-second period, matching common authenticator apps.

/// Seconds left in the current 30-second step, always in `1..=30`.
fn seconds_remaining(time: u64) -> u32 {
    // DEFAULT_PERIOD is a non-zero constant, and rem < DEFAULT_PERIOD
    // keeps the subtraction inside 1..=30.
    #[allow(clippy::arithmetic_side_effects)]
    let rem = u32::try_from(time % u64::from(DEFAULT_PERIOD)).unwrap_or(0);
    #[allow(clippy::arithmetic_side_effects)]
    let left = DEFAULT_PERIOD - rem;
    left
}

/// Generate the current code for a seed credential.
///
/// Returns the 6-digit code together with `valid_for`, the number of
/// seconds the code remains current (the tail of the 30-second step).
///
/// # Errors
///
/// Returns [`CryptoError::SecretFormat`] if the seed cannot be
/// re-encoded, or [`CryptoError::Otp`] if code generation fails. A
/// malformed stored seed at generation time is an operational fault
/// worth surfacing.
#[must_use = "OTP code should be used or stored"]
pub fn generate_code(
    seed: &DecryptedSeed,
    now_epoch_seconds: u64,
) -> Result<(String, u32), CryptoError> {
    let secret = seed.to_base32()?;
    let key = secret.decode()?;
    let code = generate_totp(
        &key,
        now_epoch_seconds,
        OtpDigits::Six,
        DEFAULT_PERIOD,
        OtpAlgorithm::Sha1,
    )?;
    Ok((code, seconds_remaining(now_epoch_seconds)))
}

/// Check a candidate code for a seed credential.
///
/// The candidate is accepted when it matches any step in the inclusive
/// range `[current - window, current + window]`. Total: malformed
/// candidates and internal failures all collapse to `false`, so this is
/// safe to call blindly with untrusted input.
#[must_use = "validation result should be checked"]
pub fn verify_code(
    seed: &DecryptedSeed,
    candidate: &str,
    now_epoch_seconds: u64,
    window: u32,
) -> bool {
    check_candidate(seed, candidate, now_epoch_seconds, window).unwrap_or(false)
}

// All fallible steps funnel through here; the error-to-false conversion
// happens only at the `verify_code` boundary.
fn check_candidate(
    seed: &DecryptedSeed,
    candidate: &str,
    now_epoch_seconds: u64,
    window: u32,
) -> Result<bool, CryptoError> {
    let secret = seed.to_base32()?;
    let key = secret.decode()?;
    validate_totp(
        &key,
        now_epoch_seconds,
        candidate,
        OtpDigits::Six,
        DEFAULT_PERIOD,
        OtpAlgorithm::Sha1,
        window,
    )
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── RFC 4226 Appendix D test vectors ────────────────────────────
    // Secret: "12345678901234567890" (ASCII), SHA1, 6 digits.
    const RFC4226_SECRET: &[u8] = b"12345678901234567890";

    const RFC4226_EXPECTED: [&str; 10] = [
        "755224", "287082", "359152", "969429", "338314", "254676", "287922", "162583", "399871",
        "520489",
    ];

    #[test]
    fn hotp_rfc4226_appendix_d_vectors() {
        for (counter, expected) in RFC4226_EXPECTED.iter().enumerate() {
            let code = generate_hotp(
                RFC4226_SECRET,
                u64::try_from(counter).expect("counter fits u64"),
                OtpDigits::Six,
                OtpAlgorithm::Sha1,
            )
            .expect("HOTP generation should succeed");
            assert_eq!(
                &code, expected,
                "HOTP mismatch at counter {counter}: got {code}, expected {expected}"
            );
        }
    }

    #[test]
    fn hotp_counter_one_matches_first_rfc6238_vector() {
        // The RFC 6238 time=59 SHA1 vector is HOTP at counter 1.
        let code = generate_hotp(RFC4226_SECRET, 1, OtpDigits::Eight, OtpAlgorithm::Sha1)
            .expect("HOTP generation should succeed");
        assert_eq!(code, "94287082");
    }

    // ── RFC 6238 Appendix B test vectors ────────────────────────────
    // SHA1 secret:   "12345678901234567890"              (20 bytes)
    // SHA256 secret: "12345678901234567890123456789012"   (32 bytes)
    // SHA512 secret: "1234567890123456789012345678901234567890123456789012345678901234" (64 bytes)
    const RFC6238_SECRET_SHA1: &[u8] = b"12345678901234567890";
    const RFC6238_SECRET_SHA256: &[u8] = b"12345678901234567890123456789012";
    const RFC6238_SECRET_SHA512: &[u8] =
        b"1234567890123456789012345678901234567890123456789012345678901234";

    struct Rfc6238Vector {
        time: u64,
        sha1: &'static str,
        sha256: &'static str,
        sha512: &'static str,
    }

    const RFC6238_VECTORS: [Rfc6238Vector; 6] = [
        Rfc6238Vector {
            time: 59,
            sha1: "94287082",
            sha256: "46119246",
            sha512: "90693936",
        },
        Rfc6238Vector {
            time: 1_111_111_109,
            sha1: "07081804",
            sha256: "68084774",
            sha512: "25091201",
        },
        Rfc6238Vector {
            time: 1_111_111_111,
            sha1: "14050471",
            sha256: "67062674",
            sha512: "99943326",
        },
        Rfc6238Vector {
            time: 1_234_567_890,
            sha1: "89005924",
            sha256: "91819424",
            sha512: "93441116",
        },
        Rfc6238Vector {
            time: 2_000_000_000,
            sha1: "69279037",
            sha256: "90698825",
            sha512: "38618901",
        },
        Rfc6238Vector {
            time: 20_000_000_000,
            sha1: "65353130",
            sha256: "77737706",
            sha512: "47863826",
        },
    ];

    #[test]
    fn totp_rfc6238_appendix_b_sha1() {
        for v in &RFC6238_VECTORS {
            let code = generate_totp(
                RFC6238_SECRET_SHA1,
                v.time,
                OtpDigits::Eight,
                30,
                OtpAlgorithm::Sha1,
            )
            .expect("TOTP generation should succeed");
            assert_eq!(
                &code, v.sha1,
                "TOTP SHA1 mismatch at time {}: got {code}, expected {}",
                v.time, v.sha1
            );
        }
    }

    #[test]
    fn totp_rfc6238_appendix_b_sha256() {
        for v in &RFC6238_VECTORS {
            let code = generate_totp(
                RFC6238_SECRET_SHA256,
                v.time,
                OtpDigits::Eight,
                30,
                OtpAlgorithm::Sha256,
            )
            .expect("TOTP generation should succeed");
            assert_eq!(
                &code, v.sha256,
                "TOTP SHA256 mismatch at time {}: got {code}, expected {}",
                v.time, v.sha256
            );
        }
    }

    #[test]
    fn totp_rfc6238_appendix_b_sha512() {
        for v in &RFC6238_VECTORS {
            let code = generate_totp(
                RFC6238_SECRET_SHA512,
                v.time,
                OtpDigits::Eight,
                30,
                OtpAlgorithm::Sha512,
            )
            .expect("TOTP generation should succeed");
            assert_eq!(
                &code, v.sha512,
                "TOTP SHA512 mismatch at time {}: got {code}, expected {}",
                v.time, v.sha512
            );
        }
    }

    // ── Validation window tests ─────────────────────────────────────

    #[test]
    fn validate_totp_accepts_current_step() {
        let secret = b"12345678901234567890";
        let time = 1_234_567_890u64;
        let code =
            generate_totp(secret, time, OtpDigits::Six, 30, OtpAlgorithm::Sha1).expect("generate");
        let valid = validate_totp(secret, time, &code, OtpDigits::Six, 30, OtpAlgorithm::Sha1, 1)
            .expect("validate");
        assert!(valid, "code at same time step should be valid");
    }

    #[test]
    fn validate_totp_accepts_previous_step() {
        let secret = b"12345678901234567890";
        let time = 1_234_567_890u64;
        // Generate at T, validate at T+period (so T is one step behind).
        let code =
            generate_totp(secret, time, OtpDigits::Six, 30, OtpAlgorithm::Sha1).expect("generate");
        let valid = validate_totp(
            secret,
            time.wrapping_add(30),
            &code,
            OtpDigits::Six,
            30,
            OtpAlgorithm::Sha1,
            1,
        )
        .expect("validate");
        assert!(valid, "code from the previous step should be valid at window 1");
    }

    #[test]
    fn validate_totp_accepts_next_step() {
        let secret = b"12345678901234567890";
        let time = 1_234_567_890u64;
        // Generate at T+period, validate at T (so the code is one step ahead).
        let code = generate_totp(
            secret,
            time.wrapping_add(30),
            OtpDigits::Six,
            30,
            OtpAlgorithm::Sha1,
        )
        .expect("generate");
        let valid = validate_totp(secret, time, &code, OtpDigits::Six, 30, OtpAlgorithm::Sha1, 1)
            .expect("validate");
        assert!(valid, "code from the next step should be valid at window 1");
    }

    #[test]
    fn validate_totp_rejects_previous_step_at_window_zero() {
        let secret = b"12345678901234567890";
        let time = 1_234_567_890u64;
        let code =
            generate_totp(secret, time, OtpDigits::Six, 30, OtpAlgorithm::Sha1).expect("generate");
        let valid = validate_totp(
            secret,
            time.wrapping_add(30),
            &code,
            OtpDigits::Six,
            30,
            OtpAlgorithm::Sha1,
            0,
        )
        .expect("validate");
        assert!(!valid, "window 0 must only accept the current step");
    }

    #[test]
    fn validate_totp_rejects_two_steps_away() {
        let secret = b"12345678901234567890";
        let time = 1_234_567_890u64;
        let code =
            generate_totp(secret, time, OtpDigits::Six, 30, OtpAlgorithm::Sha1).expect("generate");
        // Validate at T+2*period (2 steps ahead).
        let valid = validate_totp(
            secret,
            time.wrapping_add(60),
            &code,
            OtpDigits::Six,
            30,
            OtpAlgorithm::Sha1,
            1,
        )
        .expect("validate");
        assert!(!valid, "code two steps behind should be rejected at window 1");
    }

    #[test]
    fn validate_totp_rejects_two_steps_behind() {
        let secret = b"12345678901234567890";
        let time = 1_234_567_890u64;
        // Generate at T+2*period, validate at T.
        let code = generate_totp(
            secret,
            time.wrapping_add(60),
            OtpDigits::Six,
            30,
            OtpAlgorithm::Sha1,
        )
        .expect("generate");
        let valid = validate_totp(secret, time, &code, OtpDigits::Six, 30, OtpAlgorithm::Sha1, 1)
            .expect("validate");
        assert!(!valid, "code two steps ahead should be rejected at window 1");
    }

    #[test]
    fn validate_totp_widened_window_accepts_two_steps() {
        let secret = b"12345678901234567890";
        let time = 1_234_567_890u64;
        let code =
            generate_totp(secret, time, OtpDigits::Six, 30, OtpAlgorithm::Sha1).expect("generate");
        let valid = validate_totp(
            secret,
            time.wrapping_add(60),
            &code,
            OtpDigits::Six,
            30,
            OtpAlgorithm::Sha1,
            2,
        )
        .expect("validate");
        assert!(valid, "code two steps behind should be accepted at window 2");
    }

    // ── Digit length tests ──────────────────────────────────────────

    #[test]
    fn six_digit_output_length() {
        let code =
            generate_hotp(b"secret", 0, OtpDigits::Six, OtpAlgorithm::Sha1).expect("generate");
        assert_eq!(code.len(), 6, "6-digit code should have length 6");
    }

    #[test]
    fn eight_digit_output_length() {
        let code =
            generate_hotp(b"secret", 0, OtpDigits::Eight, OtpAlgorithm::Sha1).expect("generate");
        assert_eq!(code.len(), 8, "8-digit code should have length 8");
    }

    #[test]
    fn leading_zeros_preserved() {
        // Find a counter that produces leading zeros for this secret.
        let secret = b"12345678901234567890";
        let mut found_leading_zero = false;
        for counter in 0u64..10_000 {
            let code = generate_hotp(secret, counter, OtpDigits::Six, OtpAlgorithm::Sha1)
                .expect("generate");
            if code.starts_with('0') {
                assert_eq!(code.len(), 6, "leading-zero code must still be 6 chars");
                found_leading_zero = true;
                break;
            }
        }
        assert!(
            found_leading_zero,
            "should find at least one leading-zero code in 10000 iterations"
        );
    }

    // ── Error handling tests ────────────────────────────────────────

    #[test]
    fn empty_secret_returns_error() {
        let result = generate_hotp(&[], 0, OtpDigits::Six, OtpAlgorithm::Sha1);
        assert!(
            matches!(result, Err(CryptoError::Otp(_))),
            "empty secret should yield CryptoError::Otp, got: {result:?}"
        );
    }

    #[test]
    fn period_zero_returns_error() {
        let result = generate_totp(b"secret", 1_000_000, OtpDigits::Six, 0, OtpAlgorithm::Sha1);
        assert!(
            matches!(result, Err(CryptoError::Otp(_))),
            "period=0 should yield CryptoError::Otp, got: {result:?}"
        );
    }

    #[test]
    fn validate_totp_period_zero_returns_error() {
        let result = validate_totp(
            b"secret",
            1_000_000,
            "123456",
            OtpDigits::Six,
            0,
            OtpAlgorithm::Sha1,
            1,
        );
        assert!(
            matches!(result, Err(CryptoError::Otp(_))),
            "validate with period=0 should yield CryptoError::Otp, got: {result:?}"
        );
    }

    // ── Edge case: time=0 ─────────────────────────────────────────

    #[test]
    fn validate_totp_at_time_zero() {
        let secret = b"12345678901234567890";
        // time=0, period=30: the window start clamps to step 0, not u64::MAX.
        let code = generate_totp(secret, 0, OtpDigits::Six, 30, OtpAlgorithm::Sha1)
            .expect("generate at time 0");
        let valid = validate_totp(secret, 0, &code, OtpDigits::Six, 30, OtpAlgorithm::Sha1, 1)
            .expect("validate at time 0");
        assert!(valid, "code at time 0 should be valid");
    }

    // ── Edge case: wrong-length code ────────────────────────────────

    #[test]
    fn validate_totp_rejects_wrong_length_code() {
        let secret = b"12345678901234567890";
        let time = 1_234_567_890u64;
        // 5-digit code when expecting 6 digits.
        let valid = validate_totp(
            secret,
            time,
            "12345",
            OtpDigits::Six,
            30,
            OtpAlgorithm::Sha1,
            1,
        )
        .expect("validate");
        assert!(!valid, "wrong-length code should be rejected");
    }

    // ── Algorithm differentiation ───────────────────────────────────

    #[test]
    fn different_algorithms_produce_different_codes() {
        let secret = b"12345678901234567890123456789012345678901234567890123456789012345678";
        let time = 1_234_567_890u64;

        let sha1 =
            generate_totp(secret, time, OtpDigits::Six, 30, OtpAlgorithm::Sha1).expect("sha1");
        let sha256 =
            generate_totp(secret, time, OtpDigits::Six, 30, OtpAlgorithm::Sha256).expect("sha256");
        let sha512 =
            generate_totp(secret, time, OtpDigits::Six, 30, OtpAlgorithm::Sha512).expect("sha512");

        // At least two should differ (extremely unlikely all three match by chance).
        let all_same = sha1 == sha256 && sha256 == sha512;
        assert!(
            !all_same,
            "different algorithms should produce different codes: SHA1={sha1}, SHA256={sha256}, SHA512={sha512}"
        );
    }

    // ── Seed-credential pipeline ────────────────────────────────────

    // ASCII "12345678901234567890123456789012" as hex.
    const SEED_HEX: &str = "3132333435363738393031323334353637383930313233343536373839303132";

    fn seed() -> DecryptedSeed {
        DecryptedSeed::parse(SEED_HEX).expect("test seed should parse")
    }

    #[test]
    fn generate_code_yields_six_digits() {
        let (code, _) = generate_code(&seed(), 1_234_567_890).expect("generate_code");
        assert_eq!(code.len(), 6);
        assert!(code.bytes().all(|b| b.is_ascii_digit()), "code must be decimal: {code}");
    }

    #[test]
    fn generate_code_is_stable_within_a_step() {
        let s = seed();
        let (at_start, _) = generate_code(&s, 1_234_567_860).expect("step start");
        let (at_end, _) = generate_code(&s, 1_234_567_889).expect("step end");
        assert_eq!(at_start, at_end, "same 30-second step must yield the same code");
    }

    #[test]
    fn generate_code_changes_across_steps() {
        let s = seed();
        let (before, _) = generate_code(&s, 1_234_567_889).expect("before boundary");
        let (after, _) = generate_code(&s, 1_234_567_890).expect("after boundary");
        assert_ne!(before, after, "adjacent steps should differ for this seed");
    }

    #[test]
    fn generate_code_reports_step_tail() {
        let s = seed();
        let (_, at_boundary) = generate_code(&s, 1_234_567_860).expect("boundary");
        assert_eq!(at_boundary, 30, "a fresh step has the full period left");
        let (_, near_end) = generate_code(&s, 1_234_567_889).expect("near end");
        assert_eq!(near_end, 1, "one second before the boundary");
        let (_, mid) = generate_code(&s, 1_234_567_875).expect("mid step");
        assert_eq!(mid, 15);
    }

    #[test]
    fn verify_code_accepts_fresh_code_at_window_zero() {
        let s = seed();
        let now = 1_234_567_890;
        let (code, _) = generate_code(&s, now).expect("generate");
        assert!(verify_code(&s, &code, now, 0));
    }

    #[test]
    fn verify_code_window_edges() {
        let s = seed();
        let now = 1_234_567_890u64;
        let (previous, _) = generate_code(&s, now.wrapping_sub(30)).expect("previous step");
        assert!(verify_code(&s, &previous, now, 1), "previous step accepted at window 1");
        assert!(!verify_code(&s, &previous, now, 0), "previous step rejected at window 0");

        let (two_behind, _) = generate_code(&s, now.wrapping_sub(60)).expect("two steps back");
        assert!(!verify_code(&s, &two_behind, now, 1), "two steps back rejected at window 1");
    }

    #[test]
    fn verify_code_is_total_on_garbage_candidates() {
        let s = seed();
        let now = 1_234_567_890;
        assert!(!verify_code(&s, "", now, 1));
        assert!(!verify_code(&s, "not-a-code", now, 1));
        assert!(!verify_code(&s, "12345678901234567890", now, 1));
    }

    // ── Performance test ────────────────────────────────────────────

    #[test]
    fn performance_under_10ms_per_code() {
        let secret = b"12345678901234567890";
        let start = std::time::Instant::now();
        for i in 0u64..1_000 {
            let _ = generate_totp(
                secret,
                i.wrapping_mul(30),
                OtpDigits::Six,
                30,
                OtpAlgorithm::Sha1,
            );
        }
        let elapsed = start.elapsed();
        // 1000 codes should complete well under 10 seconds (10ms each).
        assert!(
            elapsed.as_secs() < 10,
            "1000 TOTP generations took {elapsed:?}, expected < 10s"
        );
    }
}
