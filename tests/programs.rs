use frenchy::{CapturedConsole, Fault, FrenchyError, Interpreter, Value};
use pretty_assertions::assert_eq;

fn run(source: &str) -> (Interpreter<CapturedConsole>, Result<(), FrenchyError>) {
    let mut interp = Interpreter::with_console(CapturedConsole::new());
    let result = interp.run_source(source);
    (interp, result)
}

fn output(source: &str) -> Vec<String> {
    let (interp, result) = run(source);
    if let Err(e) = result {
        panic!("program failed: {}", e);
    }
    interp.into_console().lines
}

fn fault(source: &str) -> Fault {
    match run(source).1 {
        Err(FrenchyError::Fault(f)) => f,
        other => panic!("expected a fault, got {:?}", other),
    }
}

#[test]
fn addition_binds_variable() {
    let (interp, result) = run("x = 2 + 3;");
    result.unwrap();
    assert_eq!(interp.scopes().lookup("x").unwrap(), &Value::Integer(5));
}

#[test]
fn text_concatenation() {
    assert_eq!(output("x = \"a\" + 1; afficher(x, 1 + \"b\", \"v: \" + vrai)"), vec!["a1", "1b", "v: vrai"]);
}

#[test]
fn division_by_zero_stops_the_run() {
    let (interp, result) = run("x = 4 / 0; afficher(\"jamais\")");
    assert!(matches!(result, Err(FrenchyError::Fault(Fault::DivideByZero(_)))));
    assert!(interp.console().lines.is_empty());
}

#[test]
fn counting_loop_prints_and_cleans_up() {
    let (interp, result) = run("pour (i = 0; i == 3; i = i + 1) { afficher(i) }");
    result.unwrap();
    assert_eq!(interp.console().lines, vec!["0", "1", "2"]);
    assert!(interp.scopes().lookup("i").is_err());
}

#[test]
fn foreach_writes_back_mutations() {
    let source = "
        l = entier[1, 2, 3];
        pour chaque (entier x dans l) { x = x + 1 }
        afficher(l)
    ";
    assert_eq!(output(source), vec!["[2, 3, 4]"]);
}

#[test]
fn arithmetic_semantics() {
    let source = "
        afficher(7 / 2, 7 % 3, -7 / 2, 1 + 2.5, 10 / 4.0)
        afficher(2147483647 + 1)
        afficher(2 + 3 * 4, (2 + 3) * 4)
    ";
    assert_eq!(output(source), vec!["3", "1", "-3", "3.5", "2.5", "-2147483648", "14", "20"]);
}

#[test]
fn comparisons_and_equality() {
    let source = "
        afficher(1 == 1.0, 2 > 1, 2 <= 1, 3 != 4)
        afficher(\"a\" == \"a\", vrai != faux, nul == nul, nul == \"a\")
    ";
    assert_eq!(output(source), vec!["vrai", "vrai", "faux", "vrai", "vrai", "vrai", "vrai", "faux"]);
}

#[test]
fn invalid_operand_kinds_fault() {
    assert!(matches!(fault("x = vrai + 1"), Fault::TypeMismatch(_)));
    assert!(matches!(fault("x = \"a\" - 1"), Fault::TypeMismatch(_)));
    assert!(matches!(fault("x = \"a\" < \"b\""), Fault::TypeMismatch(_)));
    assert!(matches!(fault("x = 1 == \"1\""), Fault::TypeMismatch(_)));
}

#[test]
fn if_chain_picks_first_true_branch() {
    let source = "
        pour (n = 0; n == 3; n = n + 1) {
            si n == 0 { afficher(\"zéro\") }
            sinon si n == 1 { afficher(\"un\") }
            sinon { afficher(\"beaucoup\") }
        }
    ";
    assert_eq!(output(source), vec!["zéro", "un", "beaucoup"]);
}

#[test]
fn while_loops_in_both_polarities() {
    let source = "
        n = 0
        pendant que n < 3 { n = n + 1 }
        afficher(n)
        jusqu'à n == 6 { n = n + 1 }
        afficher(n)
    ";
    assert_eq!(output(source), vec!["3", "6"]);
}

#[test]
fn builtins() {
    let (interp, result) = run("
        mots = texte[\"a\", \"b\", \"c\"];
        MsgConsole(taille(\"mots\"));
        pause();
        afficher(PI * 2)
    ");
    result.unwrap();
    let console = interp.into_console();
    assert_eq!(console.lines, vec!["3", "6.2831855"]);
    assert_eq!(console.pauses, 1);
}

#[test]
fn constants_cannot_be_reassigned() {
    assert!(matches!(fault("PI = 3"), Fault::TypeMismatch(_)));
    assert!(matches!(fault("afficher = 1"), Fault::TypeMismatch(_)));
}

#[test]
fn mixed_list_faults_at_construction() {
    assert!(matches!(fault("l = entier[1, 2.5]"), Fault::TypeMismatch(_)));
    assert!(matches!(fault("l = booleen[vrai, 1]"), Fault::TypeMismatch(_)));
}

#[test]
fn unknown_names() {
    assert!(matches!(fault("afficher(inconnu)"), Fault::Name(_)));
    assert!(matches!(fault("inconnu()"), Fault::Name(_)));
    assert!(matches!(fault("taille(\"inconnu\")"), Fault::Name(_)));
}

#[test]
fn call_arguments_are_evaluated_before_the_callee_is_checked() {
    let (interp, result) = run("inconnu(afficher(\"x\"))");
    assert!(matches!(result, Err(FrenchyError::Fault(Fault::Name(_)))));
    assert_eq!(interp.console().lines, vec!["x"]);
    assert!(matches!(fault("inconnu(1 / 0)"), Fault::DivideByZero(_)));
}

#[test]
fn non_boolean_condition_faults() {
    let f = fault("si 1 { afficher(1) }");
    assert_eq!(f.to_string(), "type mismatch: value is not boolean (got Integer)");
}

#[test]
fn syntax_errors_are_reported_before_running() {
    let (interp, result) = run("afficher(\"avant\")\nx = (1 + ");
    assert!(matches!(result, Err(FrenchyError::Syntax(_))));
    assert!(interp.console().lines.is_empty());
}

#[test]
fn output_before_a_fault_is_kept() {
    let (interp, result) = run("afficher(1); x = 1 % 0; afficher(2)");
    assert!(matches!(result, Err(FrenchyError::Fault(Fault::DivideByZero(_)))));
    assert_eq!(interp.console().lines, vec!["1"]);
}

#[test]
fn state_persists_across_runs_on_one_interpreter() {
    let mut interp = Interpreter::with_console(CapturedConsole::new());
    interp.run_source("x = 41").unwrap();
    assert!(interp.run_source("y = 1 / 0").is_err());
    interp.run_source("afficher(x + 1)").unwrap();
    assert_eq!(interp.console().lines, vec!["42"]);
}

#[test]
fn comments_are_ignored() {
    let source = "
        // ligne
        x = 1 /* bloc
        sur deux lignes */ + 1
        afficher(x)
    ";
    assert_eq!(output(source), vec!["2"]);
}

#[test]
fn concurrent_runs_are_isolated() {
    let programs = [
        "x = 1; pour (i = 0; i == 100; i = i + 1) { x = x + 1 } afficher(x)",
        "x = \"b\"; pour (i = 0; i == 3; i = i + 1) { x = x + \"b\" } afficher(x)",
    ];
    let handles: Vec<_> = programs
        .iter()
        .map(|p| {
            let source = p.to_string();
            std::thread::spawn(move || output(&source))
        })
        .collect();
    let results: Vec<Vec<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![vec!["101".to_string()], vec!["bbbb".to_string()]]);
}
