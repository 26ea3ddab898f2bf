use std::fs;

use glossa::{
    error::{GlossaError, ParseError, RuntimeError},
    interpreter::{
        debug::{DebugHook, ScopeSnapshot, ScopeTag, StopRequested},
        io::{CapturedOutput, QueuedInput},
    },
};
use walkdir::WalkDir;

fn run_ok(source: &str) -> Vec<String> {
    run_with_input(source, &[])
}

fn run_with_input(source: &str, inputs: &[&str]) -> Vec<String> {
    glossa::run_captured(source, inputs)
        .unwrap_or_else(|e| panic!("Program failed: {e}\nSource:\n{source}"))
}

fn run_err(source: &str, inputs: &[&str]) -> GlossaError {
    match glossa::run_captured(source, inputs) {
        Ok(lines) => panic!("Program succeeded ({lines:?}) but was expected to fail:\n{source}"),
        Err(e) => e,
    }
}

#[test]
fn demo_programs_run() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "glo")
                                      })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let inputs = fs::read_to_string(path.with_extension("in"))
            .map(|text| text.lines().map(String::from).collect::<Vec<_>>())
            .unwrap_or_default();
        let input_refs: Vec<&str> = inputs.iter().map(String::as_str).collect();

        count += 1;
        if let Err(e) = glossa::run_captured(&source, &input_refs) {
            panic!("Demo {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No demo programs found in demos/");
}

#[test]
fn assignment_and_write() {
    let out = run_ok("ΠΡΟΓΡΑΜΜΑ T ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: α ΑΡΧΗ α<-42 ΓΡΑΨΕ α ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ");
    assert_eq!(out, vec!["42"]);
}

#[test]
fn factorial_with_for_loop() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ
              ΑΚΕΡΑΙΕΣ: i, f
          ΑΡΧΗ
              f <- 1
              ΓΙΑ i ΑΠΟ 2 ΜΕΧΡΙ 5
                  f <- f * i
              ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
              ΓΡΑΨΕ f
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["120"]);
}

#[test]
fn while_countdown() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ
              ΑΚΕΡΑΙΕΣ: n
          ΑΡΧΗ
              n <- 3
              ΟΣΟ n > 0 ΕΠΑΝΑΛΑΒΕ
                  ΓΡΑΨΕ n
                  n <- n - 1
              ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["3", "2", "1"]);
}

#[test]
fn repeat_until_runs_at_least_once() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΑΡΧΗ
              ΑΡΧΗ_ΕΠΑΝΑΛΗΨΗΣ
                  ΓΡΑΨΕ «μία φορά»
              ΜΕΧΡΙΣ_ΟΤΟΥ ΑΛΗΘΗΣ
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["μία φορά"]);
}

#[test]
fn select_matches_multi_value_arm() {
    let source = r"ΠΡΟΓΡΑΜΜΑ Τ
        ΜΕΤΑΒΛΗΤΕΣ
            ΑΚΕΡΑΙΕΣ: x
        ΑΡΧΗ
            x <- 3
            ΕΠΙΛΕΞΕ x
                ΠΕΡΙΠΤΩΣΗ 1
                    ΓΡΑΨΕ «ένα»
                ΠΕΡΙΠΤΩΣΗ 2, 3
                    ΓΡΑΨΕ «δύο ή τρία»
                ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ
                    ΓΡΑΨΕ «άλλο»
            ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ
        ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    assert_eq!(run_ok(source), vec!["δύο ή τρία"]);
}

#[test]
fn select_ranges_and_default() {
    let source = r#"ΠΡΟΓΡΑΜΜΑ Τ
        ΜΕΤΑΒΛΗΤΕΣ
            ΑΚΕΡΑΙΕΣ: x
        ΑΡΧΗ
            ΔΙΑΒΑΣΕ x
            ΕΠΙΛΕΞΕ x
                ΠΕΡΙΠΤΩΣΗ 0..9
                    ΓΡΑΨΕ "μικρό"
                ΠΕΡΙΠΤΩΣΗ 10..19
                    ΓΡΑΨΕ "μεσαίο"
                ΠΕΡΙΠΤΩΣΗ ΑΛΛΙΩΣ
                    ΓΡΑΨΕ "μεγάλο"
            ΤΕΛΟΣ_ΕΠΙΛΟΓΩΝ
        ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ"#;
    assert_eq!(run_with_input(source, &["7"]), vec!["μικρό"]);
    assert_eq!(run_with_input(source, &["15"]), vec!["μεσαίο"]);
    assert_eq!(run_with_input(source, &["40"]), vec!["μεγάλο"]);
}

#[test]
fn recursive_fibonacci() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΑΡΧΗ
              ΓΡΑΨΕ Φιμπ(10)
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
          ΣΥΝΑΡΤΗΣΗ Φιμπ(ν: ΑΚΕΡΑΙΑ): ΑΚΕΡΑΙΑ
          ΑΡΧΗ
              ΑΝ ν < 2 ΤΟΤΕ
                  ΕΠΙΣΤΡΕΨΕ ν
              ΤΕΛΟΣ_ΑΝ
              ΕΠΙΣΤΡΕΨΕ Φιμπ(ν - 1) + Φιμπ(ν - 2)
          ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ",
    );
    assert_eq!(out, vec!["55"]);
}

#[test]
fn unbounded_recursion_reports_depth_error() {
    let err = run_err(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΑΡΧΗ
              ΓΡΑΨΕ Β(1)
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
          ΣΥΝΑΡΤΗΣΗ Β(ν: ΑΚΕΡΑΙΑ): ΑΚΕΡΑΙΑ
          ΑΡΧΗ
              ΕΠΙΣΤΡΕΨΕ Β(ν + 1)
          ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ",
        &[],
    );
    assert!(matches!(err,
                     GlossaError::Runtime(RuntimeError::CallDepthExceeded { .. })));
}

#[test]
fn for_loop_descending_step() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: i
          ΑΡΧΗ
              ΓΙΑ i ΑΠΟ 10 ΜΕΧΡΙ 1 ΜΕ_ΒΗΜΑ -1
                  ΓΡΑΨΕ i
              ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    let expected: Vec<String> = (1..=10).rev().map(|n| n.to_string()).collect();
    assert_eq!(out, expected);
}

#[test]
fn for_loop_zero_iterations() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: i
          ΑΡΧΗ
              ΓΙΑ i ΑΠΟ 5 ΜΕΧΡΙ 1
                  ΓΡΑΨΕ i
              ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
              ΓΡΑΨΕ «τέλος»
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["τέλος"]);
}

#[test]
fn for_loop_step_zero_is_error() {
    let err = run_err(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: i
          ΑΡΧΗ
              ΓΙΑ i ΑΠΟ 1 ΜΕΧΡΙ 5 ΜΕ_ΒΗΜΑ 0
                  ΓΡΑΨΕ i
              ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        &[],
    );
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::InvalidLoopStep { .. })));
}

#[test]
fn for_loop_variable_keeps_final_value() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: i
          ΑΡΧΗ
              ΓΙΑ i ΑΠΟ 1 ΜΕΧΡΙ 3
                  ΓΡΑΨΕ i
              ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
              ΓΡΑΨΕ i
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["1", "2", "3", "4"]);
}

#[test]
fn array_write_then_read_returns_last_value() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: Π[10]
          ΑΡΧΗ
              Π[4] <- 1
              Π[4] <- 7
              ΓΡΑΨΕ Π[4]
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["7"]);
}

#[test]
fn array_access_at_bounds_succeeds() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: Π[5]
          ΑΡΧΗ
              Π[1] <- 11
              Π[5] <- 55
              ΓΡΑΨΕ Π[1], Π[5]
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["11 55"]);
}

#[test]
fn array_access_outside_bounds_is_error() {
    for index in ["0", "6"] {
        let source = format!(
            r"ΠΡΟΓΡΑΜΜΑ Τ
              ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: Π[5]
              ΑΡΧΗ
                  Π[{index}] <- 1
              ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ"
        );
        let err = run_err(&source, &[]);
        assert!(matches!(err,
                         GlossaError::Runtime(RuntimeError::IndexOutOfBounds { .. })),
                "index {index}: {err}");
    }
}

#[test]
fn two_dimensional_arrays() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ
              ΑΚΕΡΑΙΕΣ: Π[2, 3], i, j
          ΑΡΧΗ
              ΓΙΑ i ΑΠΟ 1 ΜΕΧΡΙ 2
                  ΓΙΑ j ΑΠΟ 1 ΜΕΧΡΙ 3
                      Π[i, j] <- 10 * i + j
                  ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
              ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
              ΓΡΑΨΕ Π[2, 1]
              ΓΡΑΨΕ Π
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["21", "[[11,12,13],[21,22,23]]"]);
}

#[test]
fn write_whole_array() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: Π[3]
          ΑΡΧΗ
              Π[1] <- 1
              Π[2] <- 2
              Π[3] <- 3
              ΓΡΑΨΕ Π
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["[1, 2, 3]"]);
}

#[test]
fn division_by_zero_for_all_three_operators() {
    for expr in ["5 / 0", "5 DIV 0", "5 MOD 0"] {
        let source = format!("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ {expr} ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ");
        let err = run_err(&source, &[]);
        assert!(matches!(err,
                         GlossaError::Runtime(RuntimeError::DivisionByZero { .. })),
                "{expr}: {err}");
    }
}

#[test]
fn domain_errors_for_log_and_sqrt() {
    for expr in ["ΛΟΓ(0)", "ΛΟΓ(-1)", "Τ_Ρ(-1)"] {
        let source = format!("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ {expr} ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ");
        let err = run_err(&source, &[]);
        assert!(matches!(err, GlossaError::Runtime(RuntimeError::DomainError { .. })),
                "{expr}: {err}");
    }
}

#[test]
fn builtin_library() {
    let out = run_ok(
        r#"ΠΡΟΓΡΑΜΜΑ Τ
           ΑΡΧΗ
               ΓΡΑΨΕ Α_Μ(3.9), Α_Μ(-3.9)
               ΓΡΑΨΕ Α_Τ(-5), Α_Τ(-2.5)
               ΓΡΑΨΕ Τ_Ρ(9), Ε(0), ΗΜ(90), ΣΥΝ(0)
               ΑΝ Α_Τ(ΕΦ(45) - 1.0) < 0.000001 ΤΟΤΕ
                   ΓΡΑΨΕ "εφαπτομένη εντάξει"
               ΤΕΛΟΣ_ΑΝ
           ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ"#,
    );
    assert_eq!(out,
               vec!["3 -3", "5 2.5", "3.0 1.0 1.0 1.0", "εφαπτομένη εντάξει"]);
}

#[test]
fn short_circuit_and_or() {
    let source = r#"ΠΡΟΓΡΑΜΜΑ Τ
        ΑΡΧΗ
            ΑΝ ΨΕΥΔΗΣ ΚΑΙ Κατάσκοπος() ΤΟΤΕ
                ΓΡΑΨΕ "απρόσιτο"
            ΤΕΛΟΣ_ΑΝ
            ΑΝ ΑΛΗΘΗΣ Η Κατάσκοπος() ΤΟΤΕ
                ΓΡΑΨΕ "βραχυκύκλωμα"
            ΤΕΛΟΣ_ΑΝ
        ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
        ΣΥΝΑΡΤΗΣΗ Κατάσκοπος(): ΛΟΓΙΚΗ
        ΑΡΧΗ
            ΓΡΑΨΕ "κλήθηκε"
            ΕΠΙΣΤΡΕΨΕ ΑΛΗΘΗΣ
        ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ"#;
    assert_eq!(run_ok(source), vec!["βραχυκύκλωμα"]);
}

#[test]
fn scalar_arguments_pass_by_value() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: α
          ΑΡΧΗ
              α <- 1
              ΚΑΛΕΣΕ Αλλαγή(α)
              ΓΡΑΨΕ α
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
          ΔΙΑΔΙΚΑΣΙΑ Αλλαγή(α: ΑΚΕΡΑΙΑ)
          ΑΡΧΗ
              α <- 99
          ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ",
    );
    assert_eq!(out, vec!["1"]);
}

#[test]
fn array_arguments_are_copied() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: Π[3]
          ΑΡΧΗ
              Π[1] <- 5
              ΚΑΛΕΣΕ Αλλαγή(Π)
              ΓΡΑΨΕ Π[1]
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
          ΔΙΑΔΙΚΑΣΙΑ Αλλαγή(Π: ΑΚΕΡΑΙΑ)
          ΑΡΧΗ
              Π[1] <- 99
              ΓΡΑΨΕ Π[1]
          ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ",
    );
    assert_eq!(out, vec!["99", "5"]);
}

#[test]
fn read_parses_each_declared_type() {
    let out = run_with_input(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ
              ΑΚΕΡΑΙΕΣ: α
              ΠΡΑΓΜΑΤΙΚΕΣ: ρ
              ΛΟΓΙΚΕΣ: λ
              ΧΑΡΑΚΤΗΡΕΣ: σ
          ΑΡΧΗ
              ΔΙΑΒΑΣΕ α, ρ, λ, σ
              ΓΡΑΨΕ α, ρ, λ, σ
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        &["  -7 ", "3", "ΑΛΗΘΗΣ", "γειά σου"],
    );
    assert_eq!(out, vec!["-7 3.0 ΑΛΗΘΗΣ γειά σου"]);
}

#[test]
fn read_rejects_malformed_input() {
    let source = r"ΠΡΟΓΡΑΜΜΑ Τ
        ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: α
        ΑΡΧΗ
            ΔΙΑΒΑΣΕ α
        ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    let err = run_err(source, &["σαράντα δύο"]);
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::InvalidInput { .. })));

    let source = r"ΠΡΟΓΡΑΜΜΑ Τ
        ΜΕΤΑΒΛΗΤΕΣ ΛΟΓΙΚΕΣ: λ
        ΑΡΧΗ
            ΔΙΑΒΑΣΕ λ
        ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    let err = run_err(source, &["TRUE"]);
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::InvalidInput { .. })));
}

#[test]
fn read_without_input_is_error() {
    let err = run_err(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: α
          ΑΡΧΗ
              ΔΙΑΒΑΣΕ α
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        &[],
    );
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::InputExhausted { .. })));
}

#[test]
fn boolean_output_uses_greek_keywords() {
    let out = run_ok("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ ΑΛΗΘΗΣ, 1 > 2 ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ");
    assert_eq!(out, vec!["ΑΛΗΘΗΣ ΨΕΥΔΗΣ"]);
}

#[test]
fn real_output_always_shows_a_fraction() {
    let out = run_ok("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ 1.5, 3.0, 10 / 4, 10 / 5 ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ");
    assert_eq!(out, vec!["1.5 3.0 2.5 2.0"]);
}

#[test]
fn mixed_arithmetic_and_floor_division() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΑΡΧΗ
              ΓΡΑΨΕ 1 + 2.5
              ΓΡΑΨΕ 7 DIV 2, 7 MOD 2
              ΓΡΑΨΕ -7 DIV 2, -7 MOD 2
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["3.5", "3 1", "-4 1"]);
}

#[test]
fn div_and_mod_require_integers() {
    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ 7.0 DIV 2 ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ", &[]);
    assert!(matches!(err,
                     GlossaError::Runtime(RuntimeError::IncompatibleOperands { .. })));
}

#[test]
fn operator_precedence_and_parentheses() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΑΡΧΗ
              ΓΡΑΨΕ 2 + 3 * 4
              ΓΡΑΨΕ (2 + 3) * 4
              ΓΡΑΨΕ -3 + 5
              ΓΡΑΨΕ ΟΧΙ 1 > 2
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["14", "20", "2", "ΑΛΗΘΗΣ"]);
}

#[test]
fn unknown_identifier_is_error() {
    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ ξ ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ", &[]);
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::UnknownVariable { .. })));
}

#[test]
fn duplicate_declaration_is_parse_error() {
    let err = run_err(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ
              ΑΚΕΡΑΙΕΣ: α
              ΠΡΑΓΜΑΤΙΚΕΣ: α
          ΑΡΧΗ
              α <- 1
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        &[],
    );
    assert!(matches!(err, GlossaError::Parse(ParseError::DuplicateDeclaration { .. })));
}

#[test]
fn real_does_not_narrow_to_integer() {
    let err = run_err(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: α
          ΑΡΧΗ
              α <- 2.5
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        &[],
    );
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::TypeMismatch { .. })));
}

#[test]
fn integer_widens_to_real_slot() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΠΡΑΓΜΑΤΙΚΕΣ: ρ
          ΑΡΧΗ
              ρ <- 3
              ΓΡΑΨΕ ρ
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["3.0"]);
}

#[test]
fn constants_are_usable_and_immutable() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΣΤΑΘΕΡΕΣ
              ΠΙ = 3.14
              ΔΙΠΛΟ = 2 * ΠΙ
          ΑΡΧΗ
              ΓΡΑΨΕ ΠΙ, ΔΙΠΛΟ
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["3.14 6.28"]);

    let err = run_err(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΣΤΑΘΕΡΕΣ
              ΠΙ = 3.14
          ΑΡΧΗ
              ΠΙ <- 3.0
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
        &[],
    );
    assert!(matches!(err,
                     GlossaError::Runtime(RuntimeError::AssignmentToConstant { .. })));
}

#[test]
fn elseif_chain_picks_first_true_arm() {
    let source = r#"ΠΡΟΓΡΑΜΜΑ Τ
        ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: x
        ΑΡΧΗ
            ΔΙΑΒΑΣΕ x
            ΑΝ x < 0 ΤΟΤΕ
                ΓΡΑΨΕ "αρνητικό"
            ΑΛΛΙΩΣ_ΑΝ x = 0 ΤΟΤΕ
                ΓΡΑΨΕ "μηδέν"
            ΑΛΛΙΩΣ_ΑΝ x < 10 ΤΟΤΕ
                ΓΡΑΨΕ "μικρό"
            ΑΛΛΙΩΣ
                ΓΡΑΨΕ "μεγάλο"
            ΤΕΛΟΣ_ΑΝ
        ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ"#;
    assert_eq!(run_with_input(source, &["-5"]), vec!["αρνητικό"]);
    assert_eq!(run_with_input(source, &["0"]), vec!["μηδέν"]);
    assert_eq!(run_with_input(source, &["3"]), vec!["μικρό"]);
    assert_eq!(run_with_input(source, &["11"]), vec!["μεγάλο"]);
}

#[test]
fn guard_must_be_boolean() {
    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΑΝ 1 ΤΟΤΕ ΓΡΑΨΕ 1 ΤΕΛΟΣ_ΑΝ ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
                      &[]);
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::TypeMismatch { .. })));
}

#[test]
fn unterminated_string_is_lexical_error() {
    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ \"άνοιξε ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ", &[]);
    assert!(matches!(err, GlossaError::Parse(ParseError::UnterminatedString { .. })));
}

#[test]
fn unexpected_character_is_lexical_error() {
    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ 1 ; ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ", &[]);
    assert!(matches!(err, GlossaError::Parse(ParseError::UnexpectedCharacter { .. })));
}

#[test]
fn syntax_error_reports_line() {
    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ\nΑΡΧΗ\nΓΙΑ 5\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ", &[]);
    match err {
        GlossaError::Parse(ParseError::UnexpectedToken { line, .. }) => assert_eq!(line, 3),
        other => panic!("Expected a syntax error, got: {other}"),
    }
}

#[test]
fn both_string_delimiters_work() {
    let out = run_ok("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ \"διπλά\", «εισαγωγικά» ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ");
    assert_eq!(out, vec!["διπλά εισαγωγικά"]);
}

#[test]
fn comments_are_ignored() {
    let out = run_ok(
        "ΠΡΟΓΡΑΜΜΑ Τ ! σχόλιο κεφαλίδας\nΑΡΧΗ\n! ολόκληρη γραμμή σχόλιο\nΓΡΑΨΕ 1 ! στο τέλος\nΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["1"]);
}

#[test]
fn function_must_return_a_value() {
    let err = run_err(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΑΡΧΗ
              ΓΡΑΨΕ Χ(1)
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
          ΣΥΝΑΡΤΗΣΗ Χ(ν: ΑΚΕΡΑΙΑ): ΑΚΕΡΑΙΑ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: κ
          ΑΡΧΗ
              κ <- ν
          ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ",
        &[],
    );
    assert!(matches!(err,
                     GlossaError::Runtime(RuntimeError::FunctionWithoutReturn { .. })));
}

#[test]
fn return_outside_function_is_error() {
    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΕΠΙΣΤΡΕΨΕ 1 ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ", &[]);
    assert!(matches!(err,
                     GlossaError::Runtime(RuntimeError::ReturnOutsideFunction { .. })));

    let err = run_err(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΑΡΧΗ
              ΚΑΛΕΣΕ Δ
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
          ΔΙΑΔΙΚΑΣΙΑ Δ
          ΑΡΧΗ
              ΕΠΙΣΤΡΕΨΕ 1
          ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ",
        &[],
    );
    assert!(matches!(err,
                     GlossaError::Runtime(RuntimeError::ReturnOutsideFunction { .. })));
}

#[test]
fn kalese_rejects_functions_and_builtins() {
    let err = run_err(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΑΡΧΗ
              ΚΑΛΕΣΕ Φ(1)
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
          ΣΥΝΑΡΤΗΣΗ Φ(ν: ΑΚΕΡΑΙΑ): ΑΚΕΡΑΙΑ
          ΑΡΧΗ
              ΕΠΙΣΤΡΕΨΕ ν
          ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ",
        &[],
    );
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::NotAProcedure { .. })));

    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΚΑΛΕΣΕ Τ_Ρ(4) ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ", &[]);
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::NotAProcedure { .. })));
}

#[test]
fn arity_mismatch_is_error() {
    let err = run_err(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΑΡΧΗ
              ΓΡΑΨΕ Φ(1, 2)
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
          ΣΥΝΑΡΤΗΣΗ Φ(ν: ΑΚΕΡΑΙΑ): ΑΚΕΡΑΙΑ
          ΑΡΧΗ
              ΕΠΙΣΤΡΕΨΕ ν
          ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ",
        &[],
    );
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::ArityMismatch { .. })));

    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ Τ_Ρ(4, 5) ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ", &[]);
    assert!(matches!(err, GlossaError::Runtime(RuntimeError::ArityMismatch { .. })));
}

#[test]
fn runs_are_deterministic() {
    let source = r"ΠΡΟΓΡΑΜΜΑ Τ
        ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: i, σ
        ΑΡΧΗ
            σ <- 0
            ΓΙΑ i ΑΠΟ 1 ΜΕΧΡΙ 100
                σ <- σ + i
            ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
            ΓΡΑΨΕ σ, Τ_Ρ(σ)
        ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";
    let first = run_ok(source);
    let second = run_ok(source);
    assert_eq!(first, second);
    assert!(first[0].starts_with("5050 71.063"), "unexpected output: {:?}", first);
}

/// Counts statements and records the scope tags it sees.
#[derive(Default)]
struct Probe {
    statements:       usize,
    saw_local_param:  bool,
    saw_outer_global: bool,
}

impl DebugHook for Probe {
    fn before_statement(&mut self, _statement: &glossa::ast::Statement,
                        scope: &ScopeSnapshot)
                        -> Result<(), StopRequested> {
        self.statements += 1;
        for binding in &scope.bindings {
            match (binding.name.as_str(), binding.scope) {
                ("ν", ScopeTag::Local) => self.saw_local_param = true,
                ("γ", ScopeTag::Outer) => self.saw_outer_global = true,
                _ => {},
            }
        }
        Ok(())
    }
}

#[test]
fn debug_hook_sees_every_statement_and_both_scopes() {
    let source = r"ΠΡΟΓΡΑΜΜΑ Τ
        ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: γ
        ΑΡΧΗ
            γ <- 1
            ΚΑΛΕΣΕ Δ(γ)
        ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
        ΔΙΑΔΙΚΑΣΙΑ Δ(ν: ΑΚΕΡΑΙΑ)
        ΑΡΧΗ
            ΓΡΑΨΕ ν
        ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ";

    let mut input = QueuedInput::default();
    let mut output = CapturedOutput::default();
    let mut probe = Probe::default();
    glossa::run_source_with_hook(source, &mut input, &mut output, &mut probe).unwrap();

    assert_eq!(output.lines, vec!["1"]);
    assert_eq!(probe.statements, 3);
    assert!(probe.saw_local_param);
    assert!(probe.saw_outer_global);
}

/// Requests a stop after a fixed number of statements.
struct StopAfter(usize);

impl DebugHook for StopAfter {
    fn before_statement(&mut self, _statement: &glossa::ast::Statement,
                        _scope: &ScopeSnapshot)
                        -> Result<(), StopRequested> {
        if self.0 == 0 {
            return Err(StopRequested);
        }
        self.0 -= 1;
        Ok(())
    }
}

#[test]
fn debug_hook_can_stop_execution() {
    let source = r"ΠΡΟΓΡΑΜΜΑ Τ
        ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: i
        ΑΡΧΗ
            ΓΙΑ i ΑΠΟ 1 ΜΕΧΡΙ 1000
                ΓΡΑΨΕ i
            ΤΕΛΟΣ_ΕΠΑΝΑΛΗΨΗΣ
        ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ";

    let mut input = QueuedInput::default();
    let mut output = CapturedOutput::default();
    let mut hook = StopAfter(4);
    let err = glossa::run_source_with_hook(source, &mut input, &mut output, &mut hook)
        .expect_err("the hook should have stopped the run");

    assert!(matches!(err, GlossaError::Runtime(RuntimeError::Stopped { .. })));
    assert!(output.lines.len() < 1000);
}

#[test]
fn subprograms_may_precede_the_program() {
    let out = run_ok(
        r"ΣΥΝΑΡΤΗΣΗ Διπλό(ν: ΑΚΕΡΑΙΑ): ΑΚΕΡΑΙΑ
          ΑΡΧΗ
              ΕΠΙΣΤΡΕΨΕ 2 * ν
          ΤΕΛΟΣ_ΣΥΝΑΡΤΗΣΗΣ
          ΠΡΟΓΡΑΜΜΑ Τ
          ΑΡΧΗ
              ΓΡΑΨΕ Διπλό(21)
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ",
    );
    assert_eq!(out, vec!["42"]);
}

#[test]
fn locals_shadow_globals() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: χ
          ΑΡΧΗ
              χ <- 1
              ΚΑΛΕΣΕ Δ
              ΓΡΑΨΕ χ
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
          ΔΙΑΔΙΚΑΣΙΑ Δ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: χ
          ΑΡΧΗ
              χ <- 99
              ΓΡΑΨΕ χ
          ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ",
    );
    assert_eq!(out, vec!["99", "1"]);
}

#[test]
fn procedures_may_touch_globals() {
    let out = run_ok(
        r"ΠΡΟΓΡΑΜΜΑ Τ
          ΜΕΤΑΒΛΗΤΕΣ ΑΚΕΡΑΙΕΣ: μετρητής
          ΑΡΧΗ
              μετρητής <- 0
              ΚΑΛΕΣΕ Αύξηση
              ΚΑΛΕΣΕ Αύξηση
              ΓΡΑΨΕ μετρητής
          ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ
          ΔΙΑΔΙΚΑΣΙΑ Αύξηση
          ΑΡΧΗ
              μετρητής <- μετρητής + 1
          ΤΕΛΟΣ_ΔΙΑΔΙΚΑΣΙΑΣ",
    );
    assert_eq!(out, vec!["2"]);
}

#[test]
fn strings_compare_lexicographically() {
    let out = run_ok(
        r#"ΠΡΟΓΡΑΜΜΑ Τ
           ΑΡΧΗ
               ΓΡΑΨΕ "αβγ" < "αβδ", "ίδιο" = "ίδιο"
           ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ"#,
    );
    assert_eq!(out, vec!["ΑΛΗΘΗΣ ΑΛΗΘΗΣ"]);
}

#[test]
fn incompatible_operands_are_rejected() {
    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ \"α\" + 1 ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ", &[]);
    assert!(matches!(err,
                     GlossaError::Runtime(RuntimeError::IncompatibleOperands { .. })));
}

#[test]
fn trailing_content_after_end_is_rejected() {
    let err = run_err("ΠΡΟΓΡΑΜΜΑ Τ ΑΡΧΗ ΓΡΑΨΕ 1 ΤΕΛΟΣ_ΠΡΟΓΡΑΜΜΑΤΟΣ ΓΡΑΨΕ 2", &[]);
    assert!(matches!(err, GlossaError::Parse(ParseError::TrailingInput { .. })));
}
