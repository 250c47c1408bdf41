use logopad::Turtle;
use logopad_lang::{Interpreter, InterpreterConfig, RepeatMode};

fn main() {
    let mut turtle = Turtle::default();
    let mut interp = Interpreter::new(InterpreterConfig {
        repeat_mode: RepeatMode::Bracketed,
    });
    let _ = interp.execute(&mut turtle, "repeat 4 [ fd 90 rt 90 ]\nppt");
    dbg!(turtle.segments());
}
