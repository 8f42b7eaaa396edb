//! Tests for the pattern-based redaction engine

use super::*;
use crate::config::CustomCategoryConfig;

fn engine() -> PatternRedactor {
    PatternRedactor::from_config(&PiiConfig::default()).unwrap()
}

fn engine_with_known(names: &[&str]) -> PatternRedactor {
    let config = PiiConfig {
        known_names: names.iter().map(|n| n.to_string()).collect(),
        ..PiiConfig::default()
    };
    PatternRedactor::from_config(&config).unwrap()
}

fn entries(report: &RedactionReport) -> &BTreeMap<String, RedactionEntry> {
    match report {
        RedactionReport::Pattern { redactions } => redactions,
        RedactionReport::Scanner(_) => panic!("expected pattern report"),
    }
}

#[test]
fn test_empty_text_is_untouched() {
    let engine = engine();

    let (redacted, report) = engine.redact("", "s1");
    assert_eq!(redacted, "");
    assert!(report.is_empty());

    // No session entry was created for the empty call.
    assert_eq!(engine.store().session_count(), 0);
    assert_eq!(engine.restore("", "s1"), "");
}

#[test]
fn test_text_without_pii_is_untouched() {
    let engine = engine();

    let (redacted, report) = engine.redact("nothing sensitive here", "s1");
    assert_eq!(redacted, "nothing sensitive here");
    assert!(report.is_empty());
}

#[test]
fn test_known_name_email_and_phone() {
    let engine = engine_with_known(&["John"]);

    let text = "Contact John at john@example.com or 555-123-4567";
    let (redacted, report) = engine.redact(text, "s1");

    assert_eq!(redacted, "Contact [PERSON_1] at [EMAIL_1] or [PHONE_1]");

    let entries = entries(&report);
    assert_eq!(entries["PERSON_1"].original, "John");
    assert_eq!(entries["PERSON_1"].label, "PERSON");
    assert_eq!(entries["PERSON_1"].description, "Known person name");
    assert_eq!(entries["EMAIL_1"].original, "john@example.com");
    assert_eq!(entries["PHONE_1"].original, "555-123-4567");

    let stats = engine.get_stats("s1");
    assert_eq!(stats.total_redactions, 3);
    assert_eq!(stats.by_type["PERSON"], 1);
    assert_eq!(stats.by_type["EMAIL"], 1);
    assert_eq!(stats.by_type["PHONE"], 1);
}

#[test]
fn test_re_redaction_reuses_tokens() {
    let engine = engine_with_known(&["John"]);
    let text = "Contact John at john@example.com or 555-123-4567";

    let (first, _) = engine.redact(text, "s1");
    let (second, _) = engine.redact(text, "s1");

    assert_eq!(first, second);
    assert!(!second.contains("_2"));

    let stats = engine.get_stats("s1");
    assert_eq!(stats.total_redactions, 3);
}

#[test]
fn test_repeated_value_collapses_to_one_token() {
    let engine = engine();

    let (redacted, report) = engine.redact("mail a@b.com, again a@b.com", "s1");

    assert_eq!(redacted, "mail [EMAIL_1], again [EMAIL_1]");
    let entries = entries(&report);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries["EMAIL_1"].original, "a@b.com");
}

#[test]
fn test_counter_monotonicity() {
    let engine = engine();

    let (redacted, _) = engine.redact("a@b.com then c@d.com", "s1");
    assert_eq!(redacted, "[EMAIL_1] then [EMAIL_2]");

    // Re-redacting a seen value does not advance the counter.
    engine.redact("a@b.com once more", "s1");
    let (third, _) = engine.redact("e@f.com", "s1");
    assert_eq!(third, "[EMAIL_3]");
}

#[test]
fn test_round_trip() {
    let engine = engine_with_known(&["John"]);

    let text = "Contact John at john@example.com or 555-123-4567";
    let (redacted, _) = engine.redact(text, "s1");
    assert_ne!(redacted, text);

    assert_eq!(engine.restore(&redacted, "s1"), text);
}

#[test]
fn test_round_trip_across_calls() {
    let engine = engine();

    let (first, _) = engine.redact("write to a@b.com", "s1");
    let (second, _) = engine.redact("ssn 123-45-6789 and a@b.com", "s1");

    // Tokens from both calls restore from the same session map.
    assert_eq!(engine.restore(&first, "s1"), "write to a@b.com");
    assert_eq!(engine.restore(&second, "s1"), "ssn 123-45-6789 and a@b.com");
}

#[test]
fn test_session_isolation() {
    let engine = engine();

    engine.redact("a@b.com", "session-a");
    let (redacted_b, _) = engine.redact("c@d.com", "session-b");

    assert_eq!(redacted_b, "[EMAIL_1]");

    let stats_a = engine.get_stats("session-a");
    let stats_b = engine.get_stats("session-b");
    assert_eq!(stats_a.total_redactions, 1);
    assert_eq!(stats_b.total_redactions, 1);

    let export_b = engine.export_map("session-b");
    assert_eq!(export_b.redaction_map.len(), 1);
    assert_eq!(export_b.redaction_map["EMAIL_1"], "c@d.com");

    // Session A's token restores nothing in session B.
    assert_eq!(engine.restore("[EMAIL_1]", "session-b"), "c@d.com");
    assert_eq!(engine.restore("[EMAIL_2]", "session-b"), "[EMAIL_2]");
}

#[test]
fn test_clear_then_query() {
    let engine = engine();

    engine.redact("a@b.com and 555-123-4567", "s1");
    engine.clear_session("s1");

    assert_eq!(engine.get_stats("s1"), RedactionStats::default());
    assert!(engine.export_map("s1").redaction_map.is_empty());

    // Counters restart at 1 after a clear.
    let (redacted, _) = engine.redact("x@y.com", "s1");
    assert_eq!(redacted, "[EMAIL_1]");

    // Clearing again is a no-op.
    engine.clear_session("s1");
    engine.clear_session("never-seen");
}

#[test]
fn test_metadata_covers_current_call_only() {
    let engine = engine();

    engine.redact("a@b.com", "s1");
    let (_, report) = engine.redact("555-123-4567", "s1");

    let entries = entries(&report);
    assert_eq!(entries.len(), 1);
    assert!(entries.contains_key("PHONE_1"));

    // Cumulative state still carries both.
    assert_eq!(engine.get_stats("s1").total_redactions, 2);
}

#[test]
fn test_existing_tokens_survive_re_redaction() {
    let engine = engine();

    let (redacted, _) = engine.redact("mail a@b.com, ssn 123-45-6789", "s1");
    assert_eq!(redacted, "mail [EMAIL_1], ssn [SSN_1]");

    // Redacting stored (already redacted) text mints nothing new.
    let (again, report) = engine.redact(&redacted, "s1");
    assert_eq!(again, redacted);
    assert!(report.is_empty());
    assert_eq!(engine.get_stats("s1").total_redactions, 2);
}

#[test]
fn test_known_value_outranks_person_pattern() {
    let engine = engine_with_known(&["John"]);

    // "Contact John" matches the PERSON pattern, but the known value "John"
    // wins the contested span and the rest of the pattern match is dropped.
    let (redacted, _) = engine.redact("Contact John today", "s1");
    assert_eq!(redacted, "Contact [PERSON_1] today");

    let export = engine.export_map("s1");
    assert_eq!(export.redaction_map["PERSON_1"], "John");
}

#[test]
fn test_known_value_substring_containment() {
    let engine = engine_with_known(&["John"]);

    let (redacted, _) = engine.redact("Dear Mr Johnson", "s1");
    assert_eq!(redacted, "Dear Mr [PERSON_1]son");
    assert_eq!(engine.restore(&redacted, "s1"), "Dear Mr Johnson");
}

#[test]
fn test_known_value_inside_pattern_match_wins() {
    let engine = engine_with_known(&["John"]);

    // The known value overlaps the email match; known values win, and the
    // email is left unredacted for this call. Restoration still round-trips.
    let text = "mail John@example.com";
    let (redacted, _) = engine.redact(text, "s1");
    assert_eq!(redacted, "mail [PERSON_1]@example.com");
    assert_eq!(engine.restore(&redacted, "s1"), text);
}

#[test]
fn test_earlier_category_wins_contested_span() {
    let engine = engine();

    // The trailing phone digits also start an ADDRESS match ("4567 Main
    // Street"); PHONE sits earlier in the registry and takes the span, and
    // the street name falls to the PERSON pattern.
    let (redacted, report) = engine.redact("call 555-123-4567 Main Street", "s1");
    assert_eq!(redacted, "call [PHONE_1] [PERSON_1]");
    assert_eq!(entries(&report)["PHONE_1"].original, "555-123-4567");
    assert!(engine.get_stats("s1").by_type.get("ADDRESS").is_none());
}

#[test]
fn test_address_redaction() {
    let engine = engine();

    let (redacted, report) = engine.redact("deliver to 123 elm Street now", "s1");
    assert_eq!(redacted, "deliver to [ADDRESS_1] now");
    assert_eq!(entries(&report)["ADDRESS_1"].original, "123 elm Street");
}

#[test]
fn test_disabled_category_passes_through() {
    let config = PiiConfig {
        detect_phone: false,
        ..PiiConfig::default()
    };
    let engine = PatternRedactor::from_config(&config).unwrap();

    let (redacted, report) = engine.redact("call 555.123.4567 now", "s1");
    assert_eq!(redacted, "call 555.123.4567 now");
    assert!(report.is_empty());
}

#[test]
fn test_multiple_categories_in_one_text() {
    let engine = engine();

    let text = "ip 192.168.1.1, ssn 123-45-6789, card 4532-0151-1283-0366, dob 01/15/1990";
    let (redacted, report) = engine.redact(text, "s1");

    assert_eq!(
        redacted,
        "ip [IP_ADDRESS_1], ssn [SSN_1], card [CREDIT_CARD_1], dob [DOB_1]"
    );

    let entries = entries(&report);
    assert_eq!(entries.len(), 4);
    assert_eq!(entries["CREDIT_CARD_1"].original, "4532-0151-1283-0366");

    // Underscored labels survive the stats suffix-stripping.
    let stats = engine.get_stats("s1");
    assert_eq!(stats.by_type["IP_ADDRESS"], 1);
    assert_eq!(stats.by_type["CREDIT_CARD"], 1);
}

#[test]
fn test_custom_category_redaction() {
    let config = PiiConfig {
        custom_categories: vec![CustomCategoryConfig {
            key: "employee_id".to_string(),
            label: "EMPLOYEE_ID".to_string(),
            pattern: r"\bEMP-\d{6}\b".to_string(),
            description: "Employee identifier".to_string(),
        }],
        ..PiiConfig::default()
    };
    let engine = PatternRedactor::from_config(&config).unwrap();

    let (redacted, report) = engine.redact("badge EMP-123456", "s1");
    assert_eq!(redacted, "badge [EMPLOYEE_ID_1]");
    assert_eq!(entries(&report)["EMPLOYEE_ID_1"].description, "Employee identifier");

    assert_eq!(engine.restore(&redacted, "s1"), "badge EMP-123456");
}

#[test]
fn test_restore_unknown_session() {
    let engine = engine();
    assert_eq!(engine.restore("[EMAIL_1] wrote in", "ghost"), "[EMAIL_1] wrote in");
}

#[test]
fn test_restore_leaves_unknown_tokens() {
    let engine = engine();

    engine.redact("a@b.com", "s1");
    assert_eq!(
        engine.restore("[EMAIL_1] and [EMAIL_99]", "s1"),
        "a@b.com and [EMAIL_99]"
    );
}

#[test]
fn test_restore_is_read_only() {
    let engine = engine();

    engine.redact("a@b.com", "s1");
    engine.restore("[EMAIL_1]", "s1");
    engine.restore("[EMAIL_1]", "s1");

    assert_eq!(engine.get_stats("s1").total_redactions, 1);
}

#[test]
fn test_stats_unknown_session_zeroed() {
    let engine = engine();

    let stats = engine.get_stats("ghost");
    assert_eq!(stats.total_redactions, 0);
    assert!(stats.by_type.is_empty());

    let export = engine.export_map("ghost");
    assert_eq!(export.session_id, "ghost");
    assert!(export.redaction_map.is_empty());
}

#[test]
fn test_export_map_contents() {
    let engine = engine();

    engine.redact("a@b.com and 555-123-4567", "s1");
    let export = engine.export_map("s1");

    assert_eq!(export.session_id, "s1");
    assert_eq!(export.redaction_map["EMAIL_1"], "a@b.com");
    assert_eq!(export.redaction_map["PHONE_1"], "555-123-4567");
    assert_eq!(export.stats.total_redactions, 2);
}

#[test]
fn test_multibyte_text_around_matches() {
    let engine = engine();

    let text = "café owner — reach a@b.com — merci";
    let (redacted, _) = engine.redact(text, "s1");
    assert_eq!(redacted, "café owner — reach [EMAIL_1] — merci");
    assert_eq!(engine.restore(&redacted, "s1"), text);
}

#[test]
fn test_shared_store_across_engines() {
    let store = Arc::new(SessionTokenStore::new());
    let first = PatternRedactor::with_store(&PiiConfig::default(), Arc::clone(&store)).unwrap();
    let second = PatternRedactor::with_store(&PiiConfig::default(), Arc::clone(&store)).unwrap();

    let (redacted, _) = first.redact("a@b.com", "s1");
    assert_eq!(second.restore(&redacted, "s1"), "a@b.com");
}
