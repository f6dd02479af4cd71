use spymcli::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_parse_iso8601_duration_common_forms() {
    assert_eq!(parse_iso8601_duration("PT3M2S"), Some(182));
    assert_eq!(parse_iso8601_duration("PT52S"), Some(52));
    assert_eq!(parse_iso8601_duration("PT4M"), Some(240));
    assert_eq!(parse_iso8601_duration("PT1H2M3S"), Some(3723));
    assert_eq!(parse_iso8601_duration("P1DT1S"), Some(86401));

    // live streams report a zero duration
    assert_eq!(parse_iso8601_duration("P0D"), Some(0));
}

#[test]
fn test_parse_iso8601_duration_rejects_garbage() {
    assert_eq!(parse_iso8601_duration(""), None);
    assert_eq!(parse_iso8601_duration("four minutes"), None);
    assert_eq!(parse_iso8601_duration("4:33"), None);
    assert_eq!(parse_iso8601_duration("PT4M33"), None);
}

#[test]
fn test_format_timestamp() {
    // zero means the playlist was never migrated
    assert_eq!(format_timestamp(0), "never");

    assert_eq!(format_timestamp(1_700_000_000), "2023-11-14 22:13");
}
