use std::path::Path;

use logopad::{drawing, Segment, Turtle};
use logopad_lang::{Interpreter, InterpreterConfig, RepeatMode};

const EPS: f64 = 1e-9;

/// A script and the drawing (in `<Drawing>` format) that it should leave behind.
#[derive(Default, Clone)]
pub struct TestCase {
    script: String,
    drawing: String,
}

fn exec_one(s: &str, repeat_mode: RepeatMode) -> Vec<Segment> {
    let mut turtle = Turtle::default();
    let mut interp = Interpreter::with_output(InterpreterConfig { repeat_mode }, Vec::new());
    let _ = interp.execute(&mut turtle, s);
    turtle.segments().to_vec()
}

fn same(a: &Segment, b: &Segment) -> bool {
    (a.x1 - b.x1).abs() < EPS
        && (a.y1 - b.y1).abs() < EPS
        && (a.x2 - b.x2).abs() < EPS
        && (a.y2 - b.y2).abs() < EPS
}

impl TestCase {
    fn exec(&self, repeat_mode: RepeatMode) {
        let actual = exec_one(&self.script, repeat_mode);
        let expected = drawing::read(self.drawing.as_bytes()).unwrap();
        assert!(
            actual.len() == expected.len() && actual.iter().zip(&expected).all(|(a, b)| same(a, b)),
            "script:\n{}\nexpected {:?}\nfound {:?}",
            self.script,
            expected,
            actual
        );
    }
}

/// A line made of at least two copies of the same character.
fn rule(line: &str) -> Option<char> {
    let line = line.trim();
    let first = line.chars().next()?;
    (line.len() >= 2 && line.chars().all(|c| c == first)).then_some(first)
}

/// Reads a fixture file: each case is a script, a `---` line, the expected drawing and a `===`
/// line.
pub fn read_tests(path: impl AsRef<Path>) -> Vec<TestCase> {
    let text = std::fs::read_to_string(path).unwrap();
    let mut cases = Vec::new();
    let mut case = TestCase::default();
    let mut in_drawing = false;

    for line in text.split_inclusive('\n') {
        match (in_drawing, rule(line)) {
            (false, Some('-')) => in_drawing = true,
            (true, Some('=')) => {
                cases.push(std::mem::take(&mut case));
                in_drawing = false;
            }
            (false, _) => case.script.push_str(line),
            (true, _) => case.drawing.push_str(line),
        }
    }
    assert!(
        case.script.trim().is_empty() && case.drawing.is_empty(),
        "unterminated case at the end of the file"
    );
    cases
}

#[test]
fn literal_scripts() {
    let tests = read_tests("tests/literal.txt");
    assert!(!tests.is_empty());
    for test in tests {
        test.exec(RepeatMode::Literal);
    }
}

#[test]
fn bracketed_scripts() {
    let tests = read_tests("tests/bracketed.txt");
    assert!(!tests.is_empty());
    for test in tests {
        test.exec(RepeatMode::Bracketed);
    }
}

#[test]
fn demo_script_runs_until_bye() {
    let script = "fd 100\nrt 90\nfd 80\nlt 45\npu\nfd 50\npd\nsetpensize 3\nsetpencolor 4\nhome\nclear\nrepeat 4 [ fd 50 rt 90 ]\nppt\nbye\n";
    let mut turtle = Turtle::default();
    let mut interp = Interpreter::with_output(InterpreterConfig::default(), Vec::new());
    let outcome = interp.execute(&mut turtle, script);
    assert_eq!(outcome, logopad_lang::Outcome::Bye);
    assert_eq!(
        String::from_utf8(interp.into_output()).unwrap(),
        "Turtle at (300,337.5) angle=0 penDown=1\n"
    );
}
